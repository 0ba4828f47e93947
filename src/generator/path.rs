//! Route pattern to Swagger path key conversion.

use crate::contract::RoutePattern;

/// Rewrite `:name` segments into `{name}` placeholders, keeping every other segment as is.
pub fn replace_path(path: &str) -> String {
    RoutePattern::parse(path).to_swagger_path()
}
