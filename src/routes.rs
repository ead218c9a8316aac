//! Route constructors for the consumed API endpoints.
//!
//! Both transports build their requests through these functions so the
//! endpoint catalog cannot drift between the blocking and async paths.

use reqwest::Method;

use crate::enums::Order;
use crate::error::RouteError;
use crate::route::Route;

/// `GET /v1/tags`
///
/// # Errors
///
/// Never fails in practice; the template has no placeholders.
pub fn tags() -> Result<Route, RouteError> {
    Route::new(Method::GET, "/v1/tags", &[])
}

/// `GET /v2/gifs/{id}`
///
/// # Errors
///
/// Returns [`RouteError`] if template resolution fails.
pub fn gif(id: &str) -> Result<Route, RouteError> {
    Route::new(Method::GET, "/v2/gifs/{id}", &[("id", id.into())])
}

/// `GET /v2/gifs/search?...`
///
/// # Errors
///
/// Returns [`RouteError`] if template resolution fails.
pub fn search(search_text: &str, order: Order, count: u32, page: u32) -> Result<Route, RouteError> {
    Route::new(
        Method::GET,
        "/v2/gifs/search?search_text={search_text}&order={order}&count={count}&page={page}",
        &[
            ("search_text", search_text.into()),
            ("order", order.as_str().into()),
            ("count", count.into()),
            ("page", page.into()),
        ],
    )
}

/// `GET /v2/gifs/search?...&type=i`, image-only search.
///
/// # Errors
///
/// Returns [`RouteError`] if template resolution fails.
pub fn search_image(
    search_text: &str,
    order: Order,
    count: u32,
    page: u32,
) -> Result<Route, RouteError> {
    Route::new(
        Method::GET,
        "/v2/gifs/search?search_text={search_text}&order={order}&count={count}&page={page}&type=i",
        &[
            ("search_text", search_text.into()),
            ("order", order.as_str().into()),
            ("count", count.into()),
            ("page", page.into()),
        ],
    )
}

/// `GET /v1/creators/search?...`; the `tags` filter is comma-joined and
/// omitted entirely when empty.
///
/// # Errors
///
/// Returns [`RouteError`] if template resolution fails.
pub fn search_creators(
    page: u32,
    order: Order,
    verified: bool,
    creator_tags: &[&str],
) -> Result<Route, RouteError> {
    if creator_tags.is_empty() {
        Route::new(
            Method::GET,
            "/v1/creators/search?page={page}&order={order}&verified={verified}",
            &[
                ("page", page.into()),
                ("order", order.as_str().into()),
                ("verified", verified.into()),
            ],
        )
    } else {
        Route::new(
            Method::GET,
            "/v1/creators/search?page={page}&order={order}&verified={verified}&tags={tags}",
            &[
                ("page", page.into()),
                ("order", order.as_str().into()),
                ("verified", verified.into()),
                ("tags", creator_tags.join(",").into()),
            ],
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_route() {
        assert_eq!(tags().unwrap().url(), "https://api.redgifs.com/v1/tags");
    }

    #[test]
    fn test_gif_route_interpolates_id() {
        assert_eq!(
            gif("somename").unwrap().url(),
            "https://api.redgifs.com/v2/gifs/somename"
        );
    }

    #[test]
    fn test_search_route_carries_order_token() {
        let url = search("sunset", Order::Best, 40, 2).unwrap().url();
        assert_eq!(
            url,
            "https://api.redgifs.com/v2/gifs/search?search_text=sunset&order=best&count=40&page=2"
        );
    }

    #[test]
    fn test_search_image_route_appends_type_marker() {
        let url = search_image("sunset", Order::Top, 10, 1).unwrap().url();
        assert!(url.ends_with("&type=i"), "image search must pin type=i: {url}");
    }

    #[test]
    fn test_search_encodes_search_text() {
        let url = search("red pandas", Order::Latest, 10, 1).unwrap().url();
        assert!(url.contains("search_text=red%20pandas"), "{url}");
    }

    #[test]
    fn test_creators_route_without_tags_omits_filter() {
        let url = search_creators(1, Order::Trending, true, &[]).unwrap().url();
        assert_eq!(
            url,
            "https://api.redgifs.com/v1/creators/search?page=1&order=trending&verified=true"
        );
    }

    #[test]
    fn test_creators_route_joins_tags_with_commas() {
        let url = search_creators(3, Order::New, false, &["a", "b"]).unwrap().url();
        assert!(url.ends_with("&tags=a%2Cb"), "tags must be comma-joined then encoded: {url}");
        assert!(url.contains("verified=false"), "{url}");
    }
}
