//! Route value type: method + path template + parameters, resolved into a
//! fully-qualified URL at construction time.
//!
//! Resolution is purely textual template interpolation: each `{name}`
//! placeholder is replaced by its parameter value, percent-encoding textual
//! values and substituting numeric/boolean values verbatim. The resolved
//! route is immutable; construct one per call site and hand it to a
//! transport.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Method;

use crate::constants::{API_BASE, compile_static_regex};
use crate::error::RouteError;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"\{([A-Za-z_][A-Za-z0-9_]*)\}"));

/// A parameter value for route template substitution.
///
/// Textual values are percent-encoded before substitution; integers and
/// booleans substitute their canonical literal form unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Int(i64),
    Bool(bool),
}

impl ParamValue {
    /// Renders the value as it appears in the resolved URL.
    fn render(&self) -> String {
        match self {
            Self::Text(s) => urlencoding::encode(s).into_owned(),
            Self::Int(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// A resolved (method, path) pair ready for dispatch by a transport.
#[derive(Debug, Clone)]
pub struct Route {
    method: Method,
    path: String,
}

impl Route {
    /// Resolves a path template and parameters into a route.
    ///
    /// Every `{name}` placeholder in the template must be covered by an
    /// entry in `params`; surplus parameters are ignored. Resolution is a
    /// pure function of its inputs.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::MissingParameter`] when a placeholder has no
    /// matching parameter.
    pub fn new(
        method: Method,
        template: &str,
        params: &[(&str, ParamValue)],
    ) -> Result<Self, RouteError> {
        let mut path = String::with_capacity(template.len());
        let mut last_end = 0;
        for captures in PLACEHOLDER_RE.captures_iter(template) {
            #[allow(clippy::unwrap_used)]
            let whole = captures.get(0).unwrap();
            let name = &captures[1];
            let value = params
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value)
                .ok_or_else(|| RouteError::MissingParameter {
                    name: name.to_string(),
                    template: template.to_string(),
                })?;
            path.push_str(&template[last_end..whole.start()]);
            path.push_str(&value.render());
            last_end = whole.end();
        }
        path.push_str(&template[last_end..]);

        Ok(Self { method, path })
    }

    /// The HTTP method for this route.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The substituted path (and query), without the origin.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The fully-qualified URL against the fixed API origin.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{API_BASE}{}", self.path)
    }
}
