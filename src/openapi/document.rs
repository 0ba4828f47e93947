//! Document root, `info` block and tags.

use indexmap::IndexMap;
use serde::Serialize;

use super::{PathItem, Schema};

/// Value of the top-level `swagger` field.
pub const SWAGGER_VERSION: &str = "2.0";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
/// `info` block.
pub struct Info {
    /// API title.
    pub title: String,
    /// API version string.
    pub version: String,
    /// Free-form description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Tag declared at document level.
pub struct Tag {
    /// Tag name.
    pub name: String,
    /// Optional tag description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Root of a generated Swagger 2.0 document.
pub struct Document {
    /// Always [`SWAGGER_VERSION`].
    pub swagger: &'static str,
    /// API metadata.
    pub info: Info,
    /// Supported transfer schemes.
    pub schemes: Vec<String>,
    /// One tag per service.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    /// Path items keyed by `{param}`-style path.
    pub paths: IndexMap<String, PathItem>,
    /// Schema definitions keyed by type name.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub definitions: IndexMap<String, Schema>,
}

impl Document {
    /// Empty document carrying `info`.
    pub fn new(info: Info) -> Self {
        Self {
            swagger: SWAGGER_VERSION,
            info,
            schemes: vec!["http".into(), "https".into()],
            tags: Vec::new(),
            paths: IndexMap::new(),
            definitions: IndexMap::new(),
        }
    }

    /// Register a tag with no description.
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push(Tag {
            name: name.into(),
            description: None,
        });
    }

    /// Path item for `path`, created on first use.
    pub fn path_item_mut(&mut self, path: String) -> &mut PathItem {
        self.paths.entry(path).or_default()
    }
}
