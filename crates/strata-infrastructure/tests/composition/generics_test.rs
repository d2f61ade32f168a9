//! Open-generic registrations resolved through the container

use strata_domain::value_objects::{RegistrationRecord, TypeRef};
use strata_infrastructure::di::Composer;

use crate::utils::{APP, activators, app, catalog, label_of, open};

fn repository(entity: &str) -> TypeRef {
    TypeRef::generic(APP, "IRepository", vec![app(entity)])
}

#[test]
fn test_explicit_closed_registration_beats_generic_fallback() {
    let records = vec![
        RegistrationRecord::builder(open(APP, "Repository"))
            .build()
            .expect("record should build"),
        RegistrationRecord::builder(app("OrderRepository"))
            .build()
            .expect("record should build"),
        RegistrationRecord::builder(app("Billing"))
            .requires(repository("Order"))
            .requires(repository("Invoice"))
            .build()
            .expect("record should build"),
    ];
    let composer = Composer::default();
    let mut services = composer.collection();

    let composition = composer
        .compose(&catalog(), &records, &mut services)
        .expect("composition should succeed");
    let provider = services.build_provider(activators());

    let orders = provider.get(&repository("Order")).expect("orders should resolve");
    let invoices = provider.get(&repository("Invoice")).expect("invoices should resolve");
    assert_eq!(label_of(&orders), "orders");
    assert_eq!(label_of(&invoices), "repo<App.Invoice>");
    assert_eq!(
        provider
            .get_all(&repository("Order"))
            .expect("orders should resolve")
            .len(),
        1
    );
    assert!(composition.graph.diagnostics.is_empty());
}

#[test]
fn test_unused_open_generic_is_reported_not_registered() {
    let records = vec![
        RegistrationRecord::builder(open(APP, "Repository"))
            .build()
            .expect("record should build"),
    ];
    let composer = Composer::default();
    let mut services = composer.collection();

    let composition = composer
        .compose(&catalog(), &records, &mut services)
        .expect("composition should succeed");

    assert_eq!(composition.graph.diagnostics.len(), 1);
    assert!(!services.contains(&repository("Order"), None));
}
