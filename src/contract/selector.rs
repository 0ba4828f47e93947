//! Route selectors binding a contract to a transport.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Prefix marking a path segment as a parameter (`/users/:id`).
pub const PARAM_SENTINEL: char = ':';

/// HTTP methods a REST selector can bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Upper-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// Whether the input record travels as a JSON request body.
    pub fn carries_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a method string is not one of the supported verbs.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported http method: {0}")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

/// One `/`-separated piece of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, possibly empty (leading or trailing slash).
    Literal(String),
    /// Parameter name with the sentinel stripped.
    Param(String),
}

/// Route pattern parsed once into segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a sentinel-style pattern such as `/some/:x/:y`. Never fails.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let segments = raw
            .split('/')
            .map(|part| match part.strip_prefix(PARAM_SENTINEL) {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(part.to_string()),
            })
            .collect();
        Self { raw, segments }
    }

    /// Pattern exactly as declared.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed segments in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of the parameter segments, in order of appearance.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Path key with parameters rendered as `{name}` placeholders.
    pub fn to_swagger_path(&self) -> String {
        let parts: Vec<String> = self
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.clone(),
                Segment::Param(name) => format!("{{{name}}}"),
            })
            .collect();
        parts.join("/")
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Method and path exposed by a REST-capable selector.
#[derive(Debug, Clone, Copy)]
pub struct RestRoute<'a> {
    /// HTTP method.
    pub method: Method,
    /// Parsed path pattern.
    pub pattern: &'a RoutePattern,
}

/// A binding of a contract to some transport.
///
/// Only selectors returning a [`RestRoute`] contribute to the generated document.
pub trait Selector: fmt::Debug + Send + Sync {
    /// Method and path when this selector is an HTTP route.
    fn rest_route(&self) -> Option<RestRoute<'_>>;
}

/// HTTP route selector.
#[derive(Debug, Clone)]
pub struct RestSelector {
    method: Method,
    pattern: RoutePattern,
}

impl RestSelector {
    /// Selector for `method` on `path`.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            pattern: RoutePattern::parse(path),
        }
    }

    /// `GET` selector.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// `POST` selector.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// `PUT` selector.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    /// `PATCH` selector.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    /// `DELETE` selector.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }
}

impl Selector for RestSelector {
    fn rest_route(&self) -> Option<RestRoute<'_>> {
        Some(RestRoute {
            method: self.method,
            pattern: &self.pattern,
        })
    }
}

/// RPC selector identified by a predicate; has no REST shape.
#[derive(Debug, Clone)]
pub struct RpcSelector {
    /// Message predicate routed to the contract.
    pub predicate: String,
}

impl RpcSelector {
    /// Selector matching `predicate`.
    pub fn new(predicate: impl Into<String>) -> Self {
        Self {
            predicate: predicate.into(),
        }
    }
}

impl Selector for RpcSelector {
    fn rest_route(&self) -> Option<RestRoute<'_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_params_and_literals() {
        let pattern = RoutePattern::parse("/some/:x/:y");
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Literal(String::new()),
                Segment::Literal("some".into()),
                Segment::Param("x".into()),
                Segment::Param("y".into()),
            ]
        );
        assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["x", "y"]);
    }

    #[test]
    fn swagger_path_round_trips_structure() {
        assert_eq!(
            RoutePattern::parse("/some/:x/:y").to_swagger_path(),
            "/some/{x}/{y}"
        );
        assert_eq!(RoutePattern::parse("a/:b/").to_swagger_path(), "a/{b}/");
        assert_eq!(RoutePattern::parse("").to_swagger_path(), "");
    }

    #[test]
    fn method_parses_case_insensitively() {
        assert_eq!("get".parse::<Method>(), Ok(Method::Get));
        assert_eq!("Patch".parse::<Method>(), Ok(Method::Patch));
        assert_eq!(
            "OPTIONS".parse::<Method>(),
            Err(UnknownMethod("OPTIONS".into()))
        );
    }

    #[test]
    fn only_rest_selectors_expose_routes() {
        let rest = RestSelector::post("/items");
        let route = rest.rest_route().unwrap();
        assert_eq!(route.method, Method::Post);
        assert_eq!(route.pattern.as_str(), "/items");
        assert!(RpcSelector::new("items.create").rest_route().is_none());
    }
}
