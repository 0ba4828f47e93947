//! Serializable OpenAPI 2.0 object model.

mod document;
mod operation;
mod schema;

pub use self::document::{Document, Info, SWAGGER_VERSION, Tag};
pub use self::operation::{
    JSON_MEDIA_TYPE, Operation, Parameter, ParameterLocation, PathItem, Response,
};
pub use self::schema::{Schema, SchemaType, definition_ref};
