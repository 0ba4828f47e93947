//! Swagger 2.0 generation from declarative service contracts.
//!
//! Services list contracts; contracts name their input, output and error records and the
//! selectors that expose them. Records describe their fields through [`contract::Record`] and
//! [`contract::Describe`], which the generator walks to emit parameters and schema definitions.
//!
//! ```
//! use contract_swagger::{
//!     SwaggerGenerator,
//!     contract::{Contract, FieldDescriptor, Record, RestSelector, Service},
//! };
//!
//! struct Lookup;
//!
//! impl Record for Lookup {
//!     fn type_name() -> &'static str {
//!         "Lookup"
//!     }
//!
//!     fn fields() -> Vec<FieldDescriptor> {
//!         vec![FieldDescriptor::of::<String>("id").tag("json", "id")]
//!     }
//! }
//!
//! let service = Service::new("lookups").add_contract(
//!     Contract::new("getLookup")
//!         .with_input::<Lookup>()
//!         .with_output::<Lookup>()
//!         .add_selector(RestSelector::get("/lookups/:id")),
//! );
//!
//! let document = SwaggerGenerator::new("Lookups", "v1", "").generate(&[service]).unwrap();
//! assert!(document.paths.contains_key("/lookups/{id}"));
//! ```

pub mod config;
pub mod contract;
#[cfg(feature = "docs-router")]
pub mod docs;
mod error;
pub mod generator;
pub mod openapi;

pub use config::{CyclePolicy, GeneratorConfig};
pub use error::{GenerateError, GenerateResult};
pub use generator::{SwaggerGenerator, replace_path};
