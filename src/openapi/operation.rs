//! Operations, parameters, responses and path items.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{contract::Method, openapi::Schema};

use super::SchemaType;

/// Media type every generated operation consumes and produces.
pub const JSON_MEDIA_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// Where a parameter is carried.
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// URL path segment.
    Path,
    /// URL query string.
    Query,
    /// Request body.
    Body,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Operation parameter.
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Whether the parameter must be supplied.
    pub required: bool,
    /// Whether an empty value is accepted; only set for path/query parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_empty_value: Option<bool>,
    /// Primitive wire type for path/query parameters.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<SchemaType>,
    /// Format hint for `type`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Element type when `type` is `array`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Body schema, only for body parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

impl Parameter {
    fn non_body(name: &str, location: ParameterLocation, wire: Schema) -> Self {
        Self {
            name: name.to_string(),
            location,
            required: true,
            allow_empty_value: Some(false),
            param_type: wire.schema_type,
            format: wire.format,
            items: wire.items,
            schema: None,
        }
    }

    /// Required path parameter rejecting empty values, typed after `wire`.
    pub fn path(name: &str, wire: Schema) -> Self {
        Self::non_body(name, ParameterLocation::Path, wire)
    }

    /// Required query parameter rejecting empty values, typed after `wire`.
    pub fn query(name: &str, wire: Schema) -> Self {
        Self::non_body(name, ParameterLocation::Query, wire)
    }

    /// Body parameter carrying `schema`.
    pub fn body(name: &str, schema: Schema) -> Self {
        Self {
            name: name.to_string(),
            location: ParameterLocation::Body,
            required: false,
            allow_empty_value: None,
            param_type: None,
            format: None,
            items: None,
            schema: Some(schema),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
/// Response entry for one status code.
pub struct Response {
    /// Human readable description.
    pub description: String,
    /// Payload schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// A single method on a path.
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Unique operation identifier.
    pub operation_id: String,
    /// Grouping tags.
    pub tags: Vec<String>,
    /// Accepted request media types.
    pub consumes: Vec<String>,
    /// Produced response media types.
    pub produces: Vec<String>,
    /// Path, query and body parameters.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// Responses keyed by status code.
    pub responses: BTreeMap<u16, Response>,
}

impl Operation {
    /// JSON-in, JSON-out operation tagged with `tag`.
    pub fn new(operation_id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            operation_id: operation_id.into(),
            tags: vec![tag.into()],
            consumes: vec![JSON_MEDIA_TYPE.to_string()],
            produces: vec![JSON_MEDIA_TYPE.to_string()],
            parameters: Vec::new(),
            responses: BTreeMap::new(),
        }
    }

    /// Set the response for `code`, replacing any previous one.
    pub fn responds_with(&mut self, code: u16, response: Response) {
        self.responses.insert(code, response);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
/// Operations available on one path.
pub struct PathItem {
    /// `GET` operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// `PUT` operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    /// `POST` operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    /// `DELETE` operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    /// `PATCH` operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
}

impl PathItem {
    /// Operation bound to `method`, if any.
    pub fn operation(&self, method: Method) -> Option<&Operation> {
        match method {
            Method::Get => self.get.as_ref(),
            Method::Put => self.put.as_ref(),
            Method::Post => self.post.as_ref(),
            Method::Delete => self.delete.as_ref(),
            Method::Patch => self.patch.as_ref(),
        }
    }

    /// Bind `operation` to `method`, returning the operation it replaced.
    pub fn set(&mut self, method: Method, operation: Operation) -> Option<Operation> {
        let slot = match method {
            Method::Get => &mut self.get,
            Method::Put => &mut self.put,
            Method::Post => &mut self.post,
            Method::Delete => &mut self.delete,
            Method::Patch => &mut self.patch,
        };
        slot.replace(operation)
    }
}
