//! Swagger document generation from service descriptions.

mod definitions;
mod operation;
mod parameters;
mod path;

use std::{fs::File, io::Write, path::Path};

use tracing::{debug, info};

use crate::{
    GenerateError, GenerateResult,
    config::{CyclePolicy, GeneratorConfig},
    contract::Service,
    openapi::{Document, Info},
};

pub use self::definitions::{DefinitionBuilder, NameCollision};
pub use self::parameters::{classify, wire_type};
pub use self::path::replace_path;

/// Generates Swagger 2.0 documents for a set of services.
///
/// The generator only holds configuration; each call builds a fresh document, so one instance
/// can serve any number of independent runs.
#[derive(Debug, Clone, Default)]
pub struct SwaggerGenerator {
    config: GeneratorConfig,
}

impl SwaggerGenerator {
    /// Generator with the given `info` block and default settings otherwise.
    pub fn new(
        title: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            config: GeneratorConfig {
                title: title.into(),
                version: version.into(),
                description: description.into(),
                ..GeneratorConfig::default()
            },
        }
    }

    /// Generator driven by a loaded configuration.
    pub fn from_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Read exposed field names from the `tag_name` namespace.
    pub fn with_tag(mut self, tag_name: impl Into<String>) -> Self {
        self.config.tag_name = tag_name.into();
        self
    }

    /// Emit indented JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.config.pretty = pretty;
        self
    }

    /// Choose how self-referential records are handled.
    pub fn with_cycle_policy(mut self, policy: CyclePolicy) -> Self {
        self.config.cycle_policy = policy;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Build the document for `services`.
    pub fn generate(&self, services: &[Service]) -> GenerateResult<Document> {
        let mut document = Document::new(Info {
            title: self.config.title.clone(),
            version: self.config.version.clone(),
            description: self.config.description.clone(),
        });
        let mut definitions =
            DefinitionBuilder::new(self.config.tag_name.as_str(), self.config.cycle_policy);

        for service in services {
            debug!(
                service = %service.name,
                contracts = service.contracts.len(),
                "processing service"
            );
            document.add_tag(service.name.as_str());
            for contract in &service.contracts {
                operation::add_contract(&mut document, &mut definitions, &service.name, contract)?;
            }
        }

        let collisions = definitions.collisions().len();
        document.definitions = definitions.into_definitions();
        info!(
            services = services.len(),
            paths = document.paths.len(),
            definitions = document.definitions.len(),
            collisions,
            "generated swagger document"
        );
        Ok(document)
    }

    /// Encode `document` according to the configured formatting.
    pub fn encode(&self, document: &Document) -> GenerateResult<Vec<u8>> {
        let bytes = if self.config.pretty {
            serde_json::to_vec_pretty(document)?
        } else {
            serde_json::to_vec(document)?
        };
        Ok(bytes)
    }

    /// Generate and encode the document for `services`.
    pub fn to_json(&self, services: &[Service]) -> GenerateResult<Vec<u8>> {
        let document = self.generate(services)?;
        self.encode(&document)
    }

    /// Generate the document and write it to `writer` in one piece.
    pub fn write_to<W: Write>(&self, mut writer: W, services: &[Service]) -> GenerateResult<()> {
        let bytes = self.to_json(services)?;
        writer.write_all(&bytes).map_err(GenerateError::Write)?;
        writer.flush().map_err(GenerateError::Write)
    }

    /// Generate the document and write it to the file at `path`.
    ///
    /// The file is only created once the document has been encoded, so a failed run leaves no
    /// partial output behind.
    pub fn write_to_file(
        &self,
        path: impl AsRef<Path>,
        services: &[Service],
    ) -> GenerateResult<()> {
        let path = path.as_ref();
        let bytes = self.to_json(services)?;
        let mut file = File::create(path).map_err(|source| GenerateError::CreateDestination {
            path: path.to_path_buf(),
            source,
        })?;
        file.write_all(&bytes).map_err(GenerateError::Write)?;
        info!(path = %path.display(), bytes = bytes.len(), "wrote swagger document");
        Ok(())
    }
}
