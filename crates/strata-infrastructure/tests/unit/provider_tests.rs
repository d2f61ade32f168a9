//! Service Provider Tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use strata_domain::error::Error;
use strata_domain::ports::{BaseRegistrationRequest, ContainerAdapter, RegistrationKind};
use strata_domain::value_objects::{DuplicatePolicy, Lifetime, ServiceKey, TypeName, TypeRef};
use strata_infrastructure::container::{ActivatorRegistry, Instance, ServiceCollection, ServiceProvider};

use crate::utils::{Label, activators, app, label_of, logger};

fn register(
    services: &mut ServiceCollection,
    service: TypeRef,
    implementation: &str,
    lifetime: Lifetime,
    kind: RegistrationKind,
    key: Option<ServiceKey>,
) {
    services
        .try_add_base_registration(&BaseRegistrationRequest {
            service_type: service,
            implementation_type: app(implementation),
            lifetime,
            duplicate_policy: DuplicatePolicy::Add,
            kind,
            key,
        })
        .expect("registration should succeed");
}

fn provider_with(lifetime: Lifetime) -> ServiceProvider {
    let mut services = ServiceCollection::new();
    register(&mut services, app("ConsoleLogger"), "ConsoleLogger", lifetime, RegistrationKind::Direct, None);
    register(&mut services, logger(), "ConsoleLogger", lifetime, RegistrationKind::Forward, None);
    services.build_provider(activators())
}

#[test]
fn test_singleton_is_shared_across_scopes() {
    let provider = provider_with(Lifetime::Singleton);
    let scope = provider.create_scope();

    let first = provider.get(&logger()).expect("logger should resolve");
    let second = scope.get(&logger()).expect("logger should resolve");

    assert!(first.ptr_eq(&second));
}

#[test]
fn test_transient_is_never_shared() {
    let provider = provider_with(Lifetime::Transient);

    let first = provider.get(&logger()).expect("logger should resolve");
    let second = provider.get(&logger()).expect("logger should resolve");

    assert!(!first.ptr_eq(&second));
    assert_eq!(label_of(&first), "console");
}

#[test]
fn test_scoped_is_shared_within_scope_only() {
    let provider = provider_with(Lifetime::Scoped);
    let scope_a = provider.create_scope();
    let scope_b = provider.create_scope();

    let a1 = scope_a.get(&logger()).expect("logger should resolve");
    let a2 = scope_a.get(&logger()).expect("logger should resolve");
    let b = scope_b.get(&logger()).expect("logger should resolve");

    assert_ne!(scope_a.scope(), scope_b.scope());
    assert!(a1.ptr_eq(&a2));
    assert!(!a1.ptr_eq(&b));
}

#[test]
fn test_ending_scope_drops_scoped_instances() {
    let provider = provider_with(Lifetime::Scoped);
    let scope = provider.create_scope();
    let before = scope.get(&logger()).expect("logger should resolve");

    scope.end_scope();
    let after = scope.get(&logger()).expect("logger should resolve");

    assert!(!before.ptr_eq(&after));
}

#[test]
fn test_forward_shares_the_implementation_instance() {
    let provider = provider_with(Lifetime::Singleton);

    let by_interface = provider.get(&logger()).expect("logger should resolve");
    let by_type = provider.get(&app("ConsoleLogger")).expect("console should resolve");

    assert!(by_interface.ptr_eq(&by_type));
}

#[test]
fn test_get_returns_last_and_get_all_returns_every_registration() {
    let mut services = ServiceCollection::new();
    register(&mut services, logger(), "ConsoleLogger", Lifetime::Transient, RegistrationKind::Direct, None);
    register(&mut services, logger(), "FileLogger", Lifetime::Transient, RegistrationKind::Direct, None);
    let provider = services.build_provider(activators());

    let last = provider.get(&logger()).expect("logger should resolve");
    let all: Vec<String> = provider
        .get_all(&logger())
        .expect("loggers should resolve")
        .iter()
        .map(label_of)
        .collect();

    assert_eq!(label_of(&last), "file");
    assert_eq!(all, vec!["console", "file"]);
}

#[test]
fn test_keyed_resolution() {
    let key = ServiceKey::from("files");
    let mut services = ServiceCollection::new();
    register(&mut services, logger(), "ConsoleLogger", Lifetime::Transient, RegistrationKind::Direct, None);
    register(&mut services, logger(), "FileLogger", Lifetime::Transient, RegistrationKind::Direct, Some(key.clone()));
    let provider = services.build_provider(activators());

    let keyed = provider.get_keyed(&logger(), &key).expect("keyed logger should resolve");
    let unkeyed = provider.get_all(&logger()).expect("loggers should resolve");

    assert_eq!(label_of(&keyed), "file");
    assert_eq!(unkeyed.len(), 1);
    assert!(matches!(
        provider.get_keyed(&logger(), &ServiceKey::from("other")),
        Err(Error::NotFound { .. })
    ));
}

#[test]
fn test_unknown_service_is_not_found() {
    let provider = provider_with(Lifetime::Transient);

    assert!(matches!(provider.get(&app("Billing")), Err(Error::NotFound { .. })));
    assert!(provider.try_get(&app("Billing")).expect("lookup should succeed").is_none());
    assert!(!provider.contains(&app("Billing")));
    assert!(provider.contains(&logger()));
}

#[test]
fn test_missing_activator_is_an_activation_error() {
    let mut services = ServiceCollection::new();
    register(&mut services, logger(), "ConsoleLogger", Lifetime::Transient, RegistrationKind::Direct, None);
    let provider = services.build_provider(ActivatorRegistry::new());

    match provider.get(&logger()) {
        Err(Error::Activation { service, message }) => {
            assert_eq!(service, "App.ILogger");
            assert!(message.contains("App.ConsoleLogger"));
        }
        other => panic!("Expected Activation error, got {other:?}"),
    }
}

#[test]
fn test_forward_without_target_is_an_activation_error() {
    let mut services = ServiceCollection::new();
    register(&mut services, logger(), "ConsoleLogger", Lifetime::Transient, RegistrationKind::Forward, None);
    let provider = services.build_provider(activators());

    assert!(matches!(provider.get(&logger()), Err(Error::Activation { .. })));
}

#[test]
fn test_activator_failure_is_propagated() {
    let mut services = ServiceCollection::new();
    register(&mut services, logger(), "ConsoleLogger", Lifetime::Singleton, RegistrationKind::Direct, None);
    let registry = ActivatorRegistry::new().with(TypeName::new("App", "ConsoleLogger"), |ctx| {
        Err(Error::activation(ctx.service().to_string(), "disk full"))
    });
    let provider = services.build_provider(registry);

    assert!(provider.get(&logger()).is_err());
}

#[test]
fn test_instance_downcasting() {
    let instance = Instance::new(Label("x".to_string()));

    assert!(instance.is::<Label>());
    assert!(!instance.is::<String>());
    assert_eq!(instance.downcast::<Label>().map(|l| l.0.clone()), Some("x".to_string()));
    assert!(instance.ptr_eq(&instance.clone()));
}

#[test]
fn test_concurrent_first_resolution_stores_one_singleton() {
    const THREADS: usize = 8;

    let mut services = ServiceCollection::new();
    register(&mut services, logger(), "ConsoleLogger", Lifetime::Singleton, RegistrationKind::Direct, None);
    let constructions = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&constructions);
    let registry = ActivatorRegistry::new().with(TypeName::new("App", "ConsoleLogger"), move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Instance::new(Label("console".to_string())))
    });
    let provider = services.build_provider(registry);
    let barrier = Barrier::new(THREADS);

    let resolved: Vec<Instance> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    provider.get(&logger()).expect("logger should resolve")
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("resolver thread should not panic"))
            .collect()
    });

    let first = &resolved[0];
    assert!(resolved.iter().all(|instance| instance.ptr_eq(first)));
    assert!(constructions.load(Ordering::SeqCst) >= 1);

    let later = provider.get(&logger()).expect("logger should resolve");
    assert!(later.ptr_eq(first));
    assert_eq!(label_of(&later), "console");
}
