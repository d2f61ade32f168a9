//! Registration manifests
//!
//! A manifest carries a type catalog and a record list in one JSON or TOML
//! document, so a host can compose without linking descriptor code.
//!
//! ```toml
//! [[types]]
//! name = { namespace = "Shop", name = "IProduct" }
//! kind = "interface"
//! is_abstract = true
//!
//! [[records]]
//! implementation_type = { kind = "named", definition = { namespace = "Shop", name = "Battery" } }
//! lifetime = "singleton"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use strata_domain::error::{Error, Result};
use strata_domain::ports::TypeDescriptor;
use strata_domain::value_objects::RegistrationRecord;
use tracing::debug;

use crate::catalog::InMemoryTypeCatalog;
use crate::error_ext::ErrorContext;

/// Types and records loaded from one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationManifest {
    /// Type descriptions
    #[serde(default)]
    pub types: Vec<TypeDescriptor>,
    /// Registration records, in registration order
    #[serde(default)]
    pub records: Vec<RegistrationRecord>,
}

impl RegistrationManifest {
    /// Parse a JSON manifest
    pub fn from_json_str(content: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Parse a TOML manifest
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let manifest: Self =
            toml::from_str(content).config_context("Failed to parse TOML manifest")?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Load a manifest, choosing the format by file extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .io_context(format!("Failed to read manifest: {}", path.display()))?;
        let manifest = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content)?,
            Some("toml") => Self::from_toml_str(&content)?,
            other => {
                return Err(Error::configuration(format!(
                    "Unsupported manifest extension: {}",
                    other.unwrap_or("<none>")
                )));
            }
        };
        debug!(
            path = %path.display(),
            types = manifest.types.len(),
            records = manifest.records.len(),
            "Loaded registration manifest"
        );
        Ok(manifest)
    }

    /// Serialize as pretty JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every record
    pub fn validate(&self) -> Result<()> {
        self.records.iter().try_for_each(RegistrationRecord::validate)
    }

    /// Catalog over the manifest's types
    pub fn to_catalog(&self) -> InMemoryTypeCatalog {
        self.types.iter().cloned().collect()
    }
}
