//! Condition matching
//!
//! Records carry condition tags; a record is active when it has none, or when
//! any of its tags is among the active ones. Tags compare case-insensitively.

use std::collections::HashSet;

use strata_domain::constants::{CONDITION_LABEL_SEPARATOR, UNCONDITIONAL_LABEL};
use strata_domain::value_objects::RegistrationRecord;

/// The set of condition tags active for one composition pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveConditions {
    tags: HashSet<String>,
}

impl ActiveConditions {
    /// Create from any collection of tags
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tags: tags
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// No active tags
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether `tag` is active, ignoring case
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(&tag.trim().to_lowercase())
    }

    /// Number of active tags
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether no tag is active
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Whether `record` is active under `active`
pub fn is_matched(record: &RegistrationRecord, active: &ActiveConditions) -> bool {
    record.conditions.is_empty() || record.conditions.iter().any(|tag| active.contains(tag))
}

/// Diagnostic rendering of a record's conditions
pub fn condition_label(record: &RegistrationRecord) -> String {
    if record.conditions.is_empty() {
        UNCONDITIONAL_LABEL.to_string()
    } else {
        record
            .conditions
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(CONDITION_LABEL_SEPARATOR)
    }
}
