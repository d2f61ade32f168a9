//! Unit tests for type system queries

use strata_application::domain_services::{ConstraintViolation, TypeSystem};
use strata_domain::ports::GenericParameter;
use strata_domain::value_objects::{TypeName, TypeRef};

use crate::fixtures::{FixtureCatalog, app, catalog, logger, shop, shop_generic, shop_open};

fn object() -> TypeRef {
    TypeRef::named("System", "Object")
}

#[test]
fn test_builtin_and_object_detection() {
    let catalog = catalog();
    let types = TypeSystem::new(&catalog, "System");

    assert!(types.is_builtin(&TypeRef::named("System", "IDisposable")));
    assert!(types.is_builtin(&TypeRef::named("System.IO", "Stream")));
    assert!(!types.is_builtin(&logger()));
    assert!(types.is_object(&object()));
    assert!(!types.is_object(&TypeRef::named("Other", "Object")));
}

#[test]
fn test_assignability() {
    let catalog = catalog();
    let types = TypeSystem::new(&catalog, "System");

    assert!(types.is_assignable(&shop("Battery"), &shop("Battery")));
    assert!(types.is_assignable(&shop("Battery"), &shop("ProductBase")));
    assert!(types.is_assignable(&shop("Battery"), &shop("IProduct")));
    assert!(types.is_assignable(&app("Order"), &object()));
    assert!(!types.is_assignable(&app("Order"), &shop("IProduct")));
}

#[test]
fn test_interfaces_of_closed_generic_substitutes_arguments() {
    let catalog = catalog();
    let types = TypeSystem::new(&catalog, "System");

    let closed = shop_generic("Validator", shop("Screen"));

    assert_eq!(
        types.interfaces_of(&closed),
        vec![shop_generic("IValidator", shop("Screen"))]
    );
}

#[test]
fn test_base_chain_nearest_first() {
    let catalog = catalog();
    let types = TypeSystem::new(&catalog, "System");

    assert_eq!(types.base_chain(&shop("Battery")), vec![shop("ProductBase")]);
    assert!(types.base_chain(&shop("Screen")).is_empty());
}

#[test]
fn test_close_satisfying_argument() {
    let catalog = catalog();
    let types = TypeSystem::new(&catalog, "System");

    let closed = types
        .close(&shop_open("Validator"), &[shop("Battery")])
        .expect("battery satisfies the product constraint");

    assert_eq!(closed, shop_generic("Validator", shop("Battery")));
}

#[test]
fn test_close_rejects_unassignable_argument() {
    let catalog = catalog();
    let types = TypeSystem::new(&catalog, "System");

    let violation = types
        .close(&shop_open("Validator"), &[app("Order")])
        .expect_err("order is not a product");

    assert!(matches!(violation, ConstraintViolation::NotAssignable { .. }));
}

#[test]
fn test_close_rejects_wrong_arity() {
    let catalog = catalog();
    let types = TypeSystem::new(&catalog, "System");

    let violation = types
        .close(&shop_open("Validator"), &[shop("Battery"), shop("Screen")])
        .expect_err("validator takes one argument");

    assert_eq!(
        violation,
        ConstraintViolation::ArityMismatch {
            definition: "Shop.Validator`1".to_string(),
            expected: 1,
            actual: 2,
        }
    );
}

#[test]
fn test_close_rejects_unknown_argument() {
    let catalog = catalog();
    let types = TypeSystem::new(&catalog, "System");

    let violation = types
        .close(&shop_open("Validator"), &[shop("Ghost")])
        .expect_err("unknown types never satisfy constraints");

    assert!(matches!(violation, ConstraintViolation::UnknownType(_)));
}

#[test]
fn test_special_constraints() {
    let catalog = FixtureCatalog::default()
        .with(strata_domain::ports::TypeDescriptor::value("Shop", "Sku"))
        .with(strata_domain::ports::TypeDescriptor::class("Shop", "Screen"))
        .with(
            strata_domain::ports::TypeDescriptor::class("Shop", "Bare")
                .default_constructible(),
        );
    let types = TypeSystem::new(&catalog, "System");
    let reference = GenericParameter::new("T").reference_type();
    let value = GenericParameter::new("T").value_type();
    let constructible = GenericParameter::new("T").default_constructor();

    assert!(matches!(
        types.satisfies(&reference, &shop("Sku"), &[]),
        Err(ConstraintViolation::NotReferenceType { .. })
    ));
    assert!(matches!(
        types.satisfies(&value, &shop("Screen"), &[]),
        Err(ConstraintViolation::NotValueType { .. })
    ));
    assert!(matches!(
        types.satisfies(&constructible, &shop("Screen"), &[]),
        Err(ConstraintViolation::MissingDefaultConstructor { .. })
    ));
    assert!(types.satisfies(&constructible, &shop("Bare"), &[]).is_ok());
    assert!(types.satisfies(&constructible, &shop("Sku"), &[]).is_ok());
}

#[test]
fn test_open_argument_rejected() {
    let catalog = catalog();
    let types = TypeSystem::new(&catalog, "System");
    let parameter = GenericParameter::new("T");

    assert!(matches!(
        types.satisfies(&parameter, &TypeRef::parameter(0), &[]),
        Err(ConstraintViolation::OpenArgument(_))
    ));
}

#[test]
fn test_single_interface_constraint() {
    let catalog = catalog();
    let types = TypeSystem::new(&catalog, "System");

    assert_eq!(
        types.single_interface_constraint(&TypeName::generic("Shop", "IHandler", 1)),
        Some(shop("IProduct"))
    );
    assert_eq!(
        types.single_interface_constraint(&TypeName::generic("App", "IRepository", 1)),
        None
    );
    assert_eq!(
        types.single_interface_constraint(&TypeName::generic("App", "IMapper", 2)),
        None
    );
}

#[test]
fn test_object_constraint_is_not_explicit() {
    let catalog = catalog();
    let types = TypeSystem::new(&catalog, "System");
    let parameter = GenericParameter::new("T").with_type_constraint(object());

    assert!(types.explicit_type_constraints(&parameter).is_empty());
}
