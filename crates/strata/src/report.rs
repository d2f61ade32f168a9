//! Graph reports
//!
//! A [`GraphReport`] flattens a [`Composition`] into strings: what is
//! registered, which layers wrap which service and in what order, which
//! dispatch tables exist, and what the builder flagged.

use std::fmt;

use serde::Serialize;
use strata_application::use_cases::Composition;
use strata_domain::error::Result;
use strata_domain::value_objects::{RegistrationEntry, RegistrationGraph};

/// One base registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationLine {
    pub implementation: String,
    /// Effective service types, in resolution order
    pub services: Vec<String>,
    pub lifetime: String,
    pub key: Option<String>,
    /// Condition label, `(always)` when unconditional
    pub conditions: String,
}

/// One layer in a service's chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerLine {
    pub implementation: String,
    pub kind: &'static str,
    pub order: i32,
}

/// Layers of one service, innermost first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerChain {
    pub service: String,
    pub layers: Vec<LayerLine>,
}

/// One dispatch case
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchCaseLine {
    pub argument: String,
    pub implementations: Vec<String>,
}

/// One dispatch composite
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatcherLine {
    pub dispatcher: String,
    pub service: String,
    pub mode: String,
    pub cases: Vec<DispatchCaseLine>,
}

/// Printable summary of a composition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphReport {
    /// Base registrations that passed their conditions
    pub registrations: Vec<RegistrationLine>,
    pub layers: Vec<LayerChain>,
    pub dispatchers: Vec<DispatcherLine>,
    pub diagnostics: Vec<String>,
}

impl GraphReport {
    /// Summarize `composition`
    ///
    /// With `export_only`, registrations and layers are limited to records
    /// flagged for visualization export.
    pub fn from_composition(composition: &Composition, export_only: bool) -> Self {
        let graph = &composition.graph;
        let include = |entry: &RegistrationEntry| !export_only || entry.record.export_for_visualization;

        let registrations = graph
            .base_registrations
            .iter()
            .filter(|e| include(*e))
            .map(registration_line)
            .collect();

        let layers = layer_chains(graph, &include);

        let dispatchers = composition
            .dispatch_plans
            .iter()
            .map(|plan| DispatcherLine {
                dispatcher: plan.dispatcher.implementation_name(),
                service: plan.service.to_string(),
                mode: format!("{:?}", plan.mode).to_lowercase(),
                cases: plan
                    .cases
                    .iter()
                    .map(|case| DispatchCaseLine {
                        argument: case.argument.to_string(),
                        implementations: case.implementations.iter().map(ToString::to_string).collect(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            registrations,
            layers,
            dispatchers,
            diagnostics: graph.diagnostics.iter().map(ToString::to_string).collect(),
        }
    }

    /// Pretty JSON rendering
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn registration_line(entry: &RegistrationEntry) -> RegistrationLine {
    RegistrationLine {
        implementation: entry.record.implementation_name(),
        services: entry
            .effective_service_types
            .iter()
            .map(ToString::to_string)
            .collect(),
        lifetime: entry.record.lifetime.to_string(),
        key: entry.record.key.as_ref().map(ToString::to_string),
        conditions: entry.condition_label.clone(),
    }
}

fn layer_chains(
    graph: &RegistrationGraph,
    include: &dyn Fn(&RegistrationEntry) -> bool,
) -> Vec<LayerChain> {
    graph
        .layers_by_service
        .iter()
        .filter_map(|(service, entries)| {
            let layers: Vec<LayerLine> = entries
                .iter()
                .filter(|e| include(*e))
                .map(|e| LayerLine {
                    implementation: e.record.implementation_name(),
                    kind: if e.record.is_decorator { "decorator" } else { "composite" },
                    order: e.record.order,
                })
                .collect();
            (!layers.is_empty()).then(|| LayerChain {
                service: service.to_string(),
                layers,
            })
        })
        .collect()
}

impl fmt::Display for GraphReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Registrations ({})", self.registrations.len())?;
        for line in &self.registrations {
            write!(f, "  {} [{}]", line.implementation, line.lifetime)?;
            if let Some(key) = &line.key {
                write!(f, " key={key}")?;
            }
            writeln!(f, " {} -> {}", line.conditions, line.services.join(", "))?;
        }

        writeln!(f, "Layers ({})", self.layers.len())?;
        for chain in &self.layers {
            let rendered: Vec<String> = chain
                .layers
                .iter()
                .map(|l| format!("{}:{}@{}", l.kind, l.implementation, l.order))
                .collect();
            writeln!(f, "  {}: {}", chain.service, rendered.join(" > "))?;
        }

        writeln!(f, "Dispatchers ({})", self.dispatchers.len())?;
        for dispatcher in &self.dispatchers {
            writeln!(
                f,
                "  {} as {} ({})",
                dispatcher.dispatcher, dispatcher.service, dispatcher.mode
            )?;
            for case in &dispatcher.cases {
                writeln!(f, "    {} => {}", case.argument, case.implementations.join(", "))?;
            }
        }

        writeln!(f, "Diagnostics ({})", self.diagnostics.len())?;
        for diagnostic in &self.diagnostics {
            writeln!(f, "  {diagnostic}")?;
        }
        Ok(())
    }
}
