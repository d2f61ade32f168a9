//! Composer bootstrap
//!
//! Turns a [`CompositionConfig`] into a configured [`CompositionService`] and
//! runs it against a catalog, a record list and an adapter.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let config = ConfigLoader::new().load()?;
//! let composer = Composer::from_app_config(&config);
//!
//! let manifest = RegistrationManifest::load("registrations.toml")?;
//! let mut services = composer.collection();
//! let composition = composer.compose_manifest(&manifest, &mut services)?;
//!
//! let provider = services.build_provider(ActivatorRegistry::from_linked());
//! ```

use strata_application::domain_services::ActiveConditions;
use strata_application::use_cases::{Composition, CompositionService};
use strata_domain::error::Result;
use strata_domain::ports::{ContainerAdapter, TypeCatalog};
use strata_domain::value_objects::RegistrationRecord;
use tracing::{info, warn};

use crate::config::{AppConfig, CompositionConfig};
use crate::container::ServiceCollection;
use crate::manifest::RegistrationManifest;

/// Configured entry point for hosts
#[derive(Debug, Clone)]
pub struct Composer {
    config: CompositionConfig,
    active: ActiveConditions,
    service: CompositionService,
}

impl Composer {
    /// Create from composition settings
    pub fn new(config: CompositionConfig) -> Self {
        let active = ActiveConditions::new(config.active_conditions.iter().cloned());
        let service = CompositionService::new()
            .with_builtin_namespace(config.builtin_namespace.clone())
            .with_type_universe_scan(config.scan_type_universe)
            .with_strict_arity(config.strict_arity);
        Self {
            config,
            active,
            service,
        }
    }

    /// Create from the application configuration
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::new(config.composition.clone())
    }

    /// Composition settings
    pub fn config(&self) -> &CompositionConfig {
        &self.config
    }

    /// Active condition tags
    pub fn active_conditions(&self) -> &ActiveConditions {
        &self.active
    }

    /// Underlying composition service
    pub fn service(&self) -> &CompositionService {
        &self.service
    }

    /// Empty collection honoring the keyed-layer setting
    pub fn collection(&self) -> ServiceCollection {
        if self.config.keyed_layers {
            ServiceCollection::new()
        } else {
            ServiceCollection::new().without_keyed_layers()
        }
    }

    /// Compose `records` into `adapter`
    pub fn compose<A: ContainerAdapter>(
        &self,
        catalog: &dyn TypeCatalog,
        records: &[RegistrationRecord],
        adapter: &mut A,
    ) -> Result<Composition> {
        info!(
            records = records.len(),
            conditions = self.active.len(),
            adapter = adapter.name(),
            "Composing registrations"
        );
        let composition = self
            .service
            .compose(catalog, records, &self.active, adapter)?;
        for diagnostic in &composition.graph.diagnostics {
            warn!(kind = %diagnostic.kind, implementation = %diagnostic.implementation, "{}", diagnostic.message);
        }
        Ok(composition)
    }

    /// Compose a manifest into `services`
    pub fn compose_manifest(
        &self,
        manifest: &RegistrationManifest,
        services: &mut ServiceCollection,
    ) -> Result<Composition> {
        let catalog = manifest.to_catalog();
        self.compose(&catalog, &manifest.records, services)
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(CompositionConfig::default())
    }
}
