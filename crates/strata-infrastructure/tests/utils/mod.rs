//! Shared test fixtures: a logging/shop catalog and label-producing activators

#![allow(dead_code)]

use strata_domain::error::{Error, Result};
use strata_domain::ports::{GenericParameter, TypeDescriptor};
use strata_domain::value_objects::{Lifetime, RegistrationRecord, TypeName, TypeRef};
use strata_infrastructure::catalog::InMemoryTypeCatalog;
use strata_infrastructure::container::{ActivationContext, ActivatorRegistry, Instance};

pub const APP: &str = "App";
pub const SHOP: &str = "Shop";

/// Instance payload describing how it was built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label(pub String);

pub fn label_of(instance: &Instance) -> String {
    instance
        .downcast_ref::<Label>()
        .map(|l| l.0.clone())
        .unwrap_or_else(|| "<unlabeled>".to_string())
}

pub fn app(name: &str) -> TypeRef {
    TypeRef::named(APP, name)
}

pub fn shop(name: &str) -> TypeRef {
    TypeRef::named(SHOP, name)
}

pub fn logger() -> TypeRef {
    app("ILogger")
}

pub fn handler(product: &str) -> TypeRef {
    TypeRef::generic(SHOP, "IHandler", vec![shop(product)])
}

pub fn open(namespace: &str, name: &str) -> TypeRef {
    TypeRef::definition_of(TypeName::generic(namespace, name, 1))
}

pub fn catalog() -> InMemoryTypeCatalog {
    let product = || GenericParameter::new("T").with_type_constraint(shop("IProduct"));
    InMemoryTypeCatalog::new()
        .with_type(TypeDescriptor::class("System", "Object"))
        .with_type(TypeDescriptor::interface(APP, "ILogger"))
        .with_type(TypeDescriptor::class(APP, "ConsoleLogger").implements(logger()))
        .with_type(TypeDescriptor::class(APP, "FileLogger").implements(logger()))
        .with_type(TypeDescriptor::class(APP, "TimestampLogger").implements(logger()))
        .with_type(TypeDescriptor::class(APP, "AuditLogger").implements(logger()))
        .with_type(TypeDescriptor::class(APP, "CompositeLogger").implements(logger()))
        .with_type(
            TypeDescriptor::interface(APP, "IRepository").with_parameter(GenericParameter::new("T")),
        )
        .with_type(
            TypeDescriptor::class(APP, "Repository")
                .with_parameter(GenericParameter::new("T"))
                .implements(TypeRef::generic(APP, "IRepository", vec![TypeRef::parameter(0)])),
        )
        .with_type(
            TypeDescriptor::class(APP, "OrderRepository")
                .implements(TypeRef::generic(APP, "IRepository", vec![app("Order")])),
        )
        .with_type(TypeDescriptor::class(APP, "Order"))
        .with_type(TypeDescriptor::class(APP, "Invoice"))
        .with_type(TypeDescriptor::class(APP, "Billing"))
        .with_type(TypeDescriptor::interface(SHOP, "IProduct"))
        .with_type(TypeDescriptor::class(SHOP, "Battery").implements(shop("IProduct")))
        .with_type(TypeDescriptor::class(SHOP, "Screen").implements(shop("IProduct")))
        .with_type(TypeDescriptor::class(SHOP, "Cable").implements(shop("IProduct")))
        .with_type(TypeDescriptor::interface(SHOP, "IHandler").with_parameter(product()))
        .with_type(TypeDescriptor::class(SHOP, "BatteryHandler").implements(handler("Battery")))
        .with_type(
            TypeDescriptor::class(SHOP, "BackupBatteryHandler").implements(handler("Battery")),
        )
        .with_type(TypeDescriptor::class(SHOP, "ScreenHandler").implements(handler("Screen")))
        .with_type(
            TypeDescriptor::class(SHOP, "HandlerDispatcher")
                .with_parameter(product())
                .implements(TypeRef::generic(SHOP, "IHandler", vec![TypeRef::parameter(0)])),
        )
}

fn leaf(label: &'static str) -> impl Fn(&ActivationContext<'_>) -> Result<Instance> {
    move |_| Ok(Instance::new(Label(label.to_string())))
}

fn wrapper(label: &'static str) -> impl Fn(&ActivationContext<'_>) -> Result<Instance> {
    move |ctx| {
        let inner = ctx.inner().ok_or_else(|| {
            Error::activation(ctx.service().to_string(), "decorator without inner instance")
        })?;
        Ok(Instance::new(Label(format!("{label}({})", label_of(inner)))))
    }
}

fn aggregate(label: &'static str) -> impl Fn(&ActivationContext<'_>) -> Result<Instance> {
    move |ctx| {
        let inner: Vec<String> = ctx.inners().iter().map(label_of).collect();
        Ok(Instance::new(Label(format!("{label}[{}]", inner.join(",")))))
    }
}

pub fn activators() -> ActivatorRegistry {
    ActivatorRegistry::new()
        .with(TypeName::new(APP, "ConsoleLogger"), leaf("console"))
        .with(TypeName::new(APP, "FileLogger"), leaf("file"))
        .with(TypeName::new(APP, "TimestampLogger"), wrapper("ts"))
        .with(TypeName::new(APP, "AuditLogger"), wrapper("audit"))
        .with(TypeName::new(APP, "CompositeLogger"), aggregate("all"))
        .with(TypeName::new(APP, "OrderRepository"), leaf("orders"))
        .with(TypeName::generic(APP, "Repository", 1), |ctx| {
            let argument = ctx
                .argument(0)
                .map(ToString::to_string)
                .unwrap_or_default();
            Ok(Instance::new(Label(format!("repo<{argument}>"))))
        })
        .with(TypeName::new(SHOP, "BatteryHandler"), leaf("battery"))
        .with(TypeName::new(SHOP, "BackupBatteryHandler"), leaf("backup"))
        .with(TypeName::new(SHOP, "ScreenHandler"), leaf("screen"))
}

pub fn base(name: &str, lifetime: Lifetime) -> RegistrationRecord {
    RegistrationRecord::builder(app(name))
        .lifetime(lifetime)
        .build()
        .expect("record should build")
}

pub fn decorator(name: &str, order: i32) -> RegistrationRecord {
    RegistrationRecord::builder(app(name))
        .alias(logger())
        .order(order)
        .decorator()
        .build()
        .expect("record should build")
}

pub fn composite(name: &str, order: i32) -> RegistrationRecord {
    RegistrationRecord::builder(app(name))
        .alias(logger())
        .order(order)
        .composite()
        .build()
        .expect("record should build")
}
