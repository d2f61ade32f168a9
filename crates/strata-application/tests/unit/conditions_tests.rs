//! Unit tests for condition matching

use strata_application::domain_services::{ActiveConditions, condition_label, is_matched};
use strata_domain::value_objects::RegistrationRecord;

use crate::fixtures::app;

fn conditioned(tags: &[&str]) -> RegistrationRecord {
    tags.iter()
        .fold(RegistrationRecord::builder(app("ConsoleLogger")), |b, t| b.condition(*t))
        .build()
        .expect("record should build")
}

#[test]
fn test_unconditional_record_always_matches() {
    let record = conditioned(&[]);

    assert!(is_matched(&record, &ActiveConditions::none()));
    assert!(is_matched(&record, &ActiveConditions::new(["prod"])));
    assert_eq!(condition_label(&record), "(always)");
}

#[test]
fn test_any_active_tag_matches() {
    let record = conditioned(&["dev", "test"]);

    assert!(is_matched(&record, &ActiveConditions::new(["test"])));
    assert!(!is_matched(&record, &ActiveConditions::new(["prod"])));
    assert!(!is_matched(&record, &ActiveConditions::none()));
}

#[test]
fn test_tags_compare_case_insensitively() {
    let record = conditioned(&["Prod"]);

    assert!(is_matched(&record, &ActiveConditions::new(["PROD"])));
    assert!(ActiveConditions::new([" Dev "]).contains("dev"));
}

#[test]
fn test_empty_tags_are_ignored() {
    let active = ActiveConditions::new(["", "  ", "prod"]);

    assert_eq!(active.len(), 1);
    assert!(!active.is_empty());
}

#[test]
fn test_condition_label_joins_sorted_tags() {
    let record = conditioned(&["test", "dev"]);

    assert_eq!(condition_label(&record), "dev|test");
}
