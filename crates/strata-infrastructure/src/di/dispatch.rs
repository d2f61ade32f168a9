//! Runtime composite dispatch
//!
//! A [`CompositeDispatcher`] resolves a [`DispatchPlan`] once into a table
//! from argument type to handler instances. Calls look the argument type up
//! and combine the handlers' results by the plan's [`AggregationMode`].
//! An argument type with no case gets the neutral result: nothing for unit
//! calls, the mode's default for boolean calls, an empty list for
//! collecting calls.
//!
//! Dispatch is synchronous, so `All` and `Sequential` both run every handler
//! in registration order; `Any` stops at the first success.

use std::collections::HashMap;

use strata_application::domain_services::DispatchPlan;
use strata_domain::error::{Error, Result};
use strata_domain::value_objects::{AggregationMode, TypeRef};
use tracing::debug;

use crate::container::{Instance, ServiceProvider};

/// Handler table for one dispatch composite
#[derive(Debug, Clone)]
pub struct CompositeDispatcher {
    service: TypeRef,
    mode: AggregationMode,
    handlers: HashMap<TypeRef, Vec<Instance>>,
}

impl CompositeDispatcher {
    /// Resolve every case of `plan` through `provider`
    ///
    /// Without `multiple`, a case keeps only its last registered handler.
    pub fn build(plan: &DispatchPlan, provider: &ServiceProvider) -> Result<Self> {
        let mut handlers = HashMap::with_capacity(plan.cases.len());
        for case in &plan.cases {
            let mut instances = provider.get_all(&case.service)?;
            if !plan.multiple && instances.len() > 1 {
                instances = instances.split_off(instances.len() - 1);
            }
            debug!(
                dispatcher = %plan.service,
                argument = %case.argument,
                handlers = instances.len(),
                "Resolved dispatch case"
            );
            handlers.insert(case.argument.clone(), instances);
        }
        Ok(Self {
            service: plan.service.clone(),
            mode: plan.mode,
            handlers,
        })
    }

    /// Service the dispatcher stands in for
    pub fn service(&self) -> &TypeRef {
        &self.service
    }

    /// Aggregation mode
    pub fn mode(&self) -> AggregationMode {
        self.mode
    }

    /// Argument types with a case, sorted
    pub fn cases(&self) -> Vec<&TypeRef> {
        let mut cases: Vec<&TypeRef> = self.handlers.keys().collect();
        cases.sort();
        cases
    }

    /// Handlers for `argument`; empty when there is no case
    pub fn select(&self, argument: &TypeRef) -> &[Instance] {
        self.handlers.get(argument).map(Vec::as_slice).unwrap_or_default()
    }

    /// Invoke handlers that return nothing
    pub fn dispatch_unit<F>(&self, argument: &TypeRef, mut call: F) -> Result<()>
    where
        F: FnMut(&Instance) -> Result<()>,
    {
        let handlers = self.select(argument);
        match self.mode {
            AggregationMode::Any => {
                let mut last_error = None;
                for handler in handlers {
                    match call(handler) {
                        Ok(()) => return Ok(()),
                        Err(e) => last_error = Some(e),
                    }
                }
                last_error.map_or(Ok(()), Err)
            }
            AggregationMode::All | AggregationMode::Sequential => {
                let mut first_error: Option<Error> = None;
                for handler in handlers {
                    if let Err(e) = call(handler) {
                        first_error.get_or_insert(e);
                    }
                }
                first_error.map_or(Ok(()), Err)
            }
        }
    }

    /// Invoke handlers that return a flag
    ///
    /// `All` and `Sequential` combine with AND, `Any` with OR.
    pub fn dispatch_bool<F>(&self, argument: &TypeRef, mut call: F) -> Result<bool>
    where
        F: FnMut(&Instance) -> Result<bool>,
    {
        let handlers = self.select(argument);
        if handlers.is_empty() {
            return Ok(self.mode.default_bool());
        }
        match self.mode {
            AggregationMode::Any => {
                for handler in handlers {
                    if call(handler)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            AggregationMode::All | AggregationMode::Sequential => {
                let mut result = true;
                for handler in handlers {
                    result &= call(handler)?;
                }
                Ok(result)
            }
        }
    }

    /// Invoke handlers that return sequences
    ///
    /// `All` and `Sequential` concatenate, `Any` returns the first non-empty result.
    pub fn dispatch_collect<T, F>(&self, argument: &TypeRef, mut call: F) -> Result<Vec<T>>
    where
        F: FnMut(&Instance) -> Result<Vec<T>>,
    {
        let handlers = self.select(argument);
        match self.mode {
            AggregationMode::Any => {
                for handler in handlers {
                    let items = call(handler)?;
                    if !items.is_empty() {
                        return Ok(items);
                    }
                }
                Ok(Vec::new())
            }
            AggregationMode::All | AggregationMode::Sequential => {
                let mut collected = Vec::new();
                for handler in handlers {
                    collected.extend(call(handler)?);
                }
                Ok(collected)
            }
        }
    }
}
