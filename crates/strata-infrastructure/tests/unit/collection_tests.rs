//! Service Collection Tests

use strata_domain::error::Error;
use strata_domain::ports::{BaseRegistrationRequest, ContainerAdapter, RegistrationKind};
use strata_domain::value_objects::{DuplicatePolicy, Lifetime, ServiceKey, TypeRef};
use strata_infrastructure::container::{Activation, ServiceCollection};

use crate::utils::{app, logger};

fn request(
    service: TypeRef,
    implementation: &str,
    policy: DuplicatePolicy,
    key: Option<ServiceKey>,
) -> BaseRegistrationRequest {
    BaseRegistrationRequest {
        service_type: service,
        implementation_type: app(implementation),
        lifetime: Lifetime::Singleton,
        duplicate_policy: policy,
        kind: RegistrationKind::Direct,
        key,
    }
}

fn implementations(services: &ServiceCollection, service: &TypeRef) -> Vec<String> {
    services
        .descriptors_for_service(service)
        .iter()
        .map(|d| d.activation.implementation().to_string())
        .collect()
}

#[test]
fn test_add_policy_keeps_every_registration() {
    let mut services = ServiceCollection::new();

    for name in ["ConsoleLogger", "FileLogger"] {
        let added = services
            .try_add_base_registration(&request(logger(), name, DuplicatePolicy::Add, None))
            .expect("add should succeed");
        assert!(added);
    }

    assert_eq!(
        implementations(&services, &logger()),
        vec!["App.ConsoleLogger", "App.FileLogger"]
    );
}

#[test]
fn test_skip_policy_keeps_existing() {
    let mut services = ServiceCollection::new();
    services
        .try_add_base_registration(&request(logger(), "ConsoleLogger", DuplicatePolicy::Add, None))
        .expect("add should succeed");

    let added = services
        .try_add_base_registration(&request(logger(), "FileLogger", DuplicatePolicy::Skip, None))
        .expect("skip should succeed");

    assert!(!added);
    assert_eq!(implementations(&services, &logger()), vec!["App.ConsoleLogger"]);
}

#[test]
fn test_replace_policy_removes_existing() {
    let mut services = ServiceCollection::new();
    services
        .try_add_base_registration(&request(logger(), "ConsoleLogger", DuplicatePolicy::Add, None))
        .expect("add should succeed");

    services
        .try_add_base_registration(&request(logger(), "FileLogger", DuplicatePolicy::Replace, None))
        .expect("replace should succeed");

    assert_eq!(implementations(&services, &logger()), vec!["App.FileLogger"]);
}

#[test]
fn test_throw_policy_reports_key() {
    let mut services = ServiceCollection::new();
    let key = Some(ServiceKey::from("files"));
    services
        .try_add_base_registration(&request(logger(), "ConsoleLogger", DuplicatePolicy::Add, key.clone()))
        .expect("add should succeed");

    let error = services
        .try_add_base_registration(&request(logger(), "FileLogger", DuplicatePolicy::Throw, key))
        .expect_err("duplicate must fail");

    match error {
        Error::DuplicateRegistration { service, key, implementation } => {
            assert_eq!(service, "App.ILogger");
            assert_eq!(key, " [key files]");
            assert_eq!(implementation, "App.FileLogger");
        }
        other => panic!("Expected DuplicateRegistration, got {other:?}"),
    }
}

#[test]
fn test_policies_compare_keys() {
    let mut services = ServiceCollection::new();
    services
        .try_add_base_registration(&request(logger(), "ConsoleLogger", DuplicatePolicy::Add, None))
        .expect("add should succeed");

    let added = services
        .try_add_base_registration(&request(
            logger(),
            "FileLogger",
            DuplicatePolicy::Throw,
            Some(ServiceKey::from(7)),
        ))
        .expect("different key is not a duplicate");

    assert!(added);
    assert!(services.contains(&logger(), Some(&ServiceKey::from(7))));
    assert!(services.contains(&logger(), None));
}

#[test]
fn test_forward_registration_records_target() {
    let mut services = ServiceCollection::new();
    let mut forward = request(logger(), "ConsoleLogger", DuplicatePolicy::Add, None);
    forward.kind = RegistrationKind::Forward;

    services
        .try_add_base_registration(&forward)
        .expect("add should succeed");

    assert!(matches!(
        services.descriptors()[0].activation,
        Activation::Forward { .. }
    ));
}

#[test]
fn test_replace_descriptors_keeps_service_position() {
    let mut services = ServiceCollection::new();
    for (service, name) in [
        (app("ConsoleLogger"), "ConsoleLogger"),
        (logger(), "ConsoleLogger"),
        (logger(), "FileLogger"),
        (app("FileLogger"), "FileLogger"),
    ] {
        services
            .try_add_base_registration(&request(service, name, DuplicatePolicy::Add, None))
            .expect("add should succeed");
    }

    let mut replacement = services.descriptors_for_service(&logger());
    replacement.reverse();
    services.replace_descriptors_for_service(&logger(), replacement);

    let order: Vec<String> = services
        .descriptors()
        .iter()
        .map(|d| format!("{}={}", d.service_type, d.activation.implementation()))
        .collect();
    assert_eq!(
        order,
        vec![
            "App.ConsoleLogger=App.ConsoleLogger",
            "App.ILogger=App.FileLogger",
            "App.ILogger=App.ConsoleLogger",
            "App.FileLogger=App.FileLogger",
        ]
    );
}

#[test]
fn test_keyed_layer_support_is_configurable() {
    assert!(ServiceCollection::new().supports_keyed_layers());
    assert!(!ServiceCollection::new().without_keyed_layers().supports_keyed_layers());
}
