//! Closed enumerations for search query tokens.

use std::fmt;

/// Sort order for gif and creator searches.
///
/// `as_str` yields the exact token the API expects in the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Trending,
    Top,
    Latest,
    Oldest,
    Recent,
    Best,
    New,
    Old,
}

impl Order {
    /// Returns the query-string token for this order.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trending => "trending",
            Self::Top => "top",
            Self::Latest => "latest",
            Self::Oldest => "oldest",
            Self::Recent => "recent",
            Self::Best => "best",
            Self::New => "new",
            Self::Old => "old",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_tokens_are_lowercase_api_values() {
        assert_eq!(Order::Trending.as_str(), "trending");
        assert_eq!(Order::Top.as_str(), "top");
        assert_eq!(Order::Best.as_str(), "best");
        assert_eq!(Order::Recent.to_string(), "recent");
    }
}
