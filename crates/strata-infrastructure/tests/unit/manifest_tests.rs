//! Registration Manifest Tests

use std::fs;

use strata_domain::error::Error;
use strata_domain::ports::TypeCatalog;
use strata_domain::value_objects::{Lifetime, TypeName};
use strata_infrastructure::manifest::RegistrationManifest;

use crate::utils::{app, logger};

const TOML_MANIFEST: &str = r#"
[[types]]
name = { namespace = "App", name = "ILogger" }
kind = "interface"
is_abstract = true

[[types]]
name = { namespace = "App", name = "ConsoleLogger" }
interfaces = [{ kind = "named", definition = { namespace = "App", name = "ILogger" } }]

[[records]]
implementation_type = { kind = "named", definition = { namespace = "App", name = "ConsoleLogger" } }
lifetime = "singleton"
conditions = ["prod"]
"#;

const JSON_MANIFEST: &str = r#"{
  "types": [
    { "name": { "namespace": "App", "name": "ILogger" }, "kind": "interface" },
    { "name": { "namespace": "App", "name": "TimestampLogger" } }
  ],
  "records": [
    {
      "implementation_type": { "kind": "named", "definition": { "namespace": "App", "name": "TimestampLogger" } },
      "service_type_aliases": [{ "kind": "named", "definition": { "namespace": "App", "name": "ILogger" } }],
      "is_decorator": true,
      "order": 3,
      "key": "files"
    }
  ]
}"#;

#[test]
fn test_parse_toml_manifest() {
    let manifest = RegistrationManifest::from_toml_str(TOML_MANIFEST).expect("manifest should parse");

    assert_eq!(manifest.types.len(), 2);
    assert_eq!(manifest.records.len(), 1);
    let record = &manifest.records[0];
    assert_eq!(record.implementation_type, app("ConsoleLogger"));
    assert_eq!(record.lifetime, Lifetime::Singleton);
    assert!(record.conditions.contains("prod"));
    assert!(record.dispatch_multiple);
    assert_eq!(manifest.types[1].interfaces, vec![logger()]);
}

#[test]
fn test_parse_json_manifest() {
    let manifest = RegistrationManifest::from_json_str(JSON_MANIFEST).expect("manifest should parse");

    let record = &manifest.records[0];
    assert!(record.is_decorator);
    assert_eq!(record.order, 3);
    assert_eq!(record.service_type_aliases, vec![logger()]);
    assert_eq!(record.key.as_ref().map(ToString::to_string).as_deref(), Some("files"));
}

#[test]
fn test_invalid_record_is_rejected() {
    let content = r#"{
      "records": [{
        "implementation_type": { "kind": "named", "definition": { "namespace": "App", "name": "Both" } },
        "is_decorator": true,
        "is_composite": true
      }]
    }"#;

    let error = RegistrationManifest::from_json_str(content).expect_err("record must be rejected");

    assert!(matches!(error, Error::InvalidArgument { .. }));
}

#[test]
fn test_malformed_json_is_a_json_error() {
    let error = RegistrationManifest::from_json_str("{ not json").expect_err("must fail");
    assert!(matches!(error, Error::Json { .. }));
}

#[test]
fn test_load_by_extension() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let toml_path = dir.path().join("registrations.toml");
    let json_path = dir.path().join("registrations.json");
    fs::write(&toml_path, TOML_MANIFEST).expect("manifest should be written");
    fs::write(&json_path, JSON_MANIFEST).expect("manifest should be written");

    let from_toml = RegistrationManifest::load(&toml_path).expect("toml should load");
    let from_json = RegistrationManifest::load(&json_path).expect("json should load");

    assert_eq!(from_toml.records[0].implementation_type, app("ConsoleLogger"));
    assert_eq!(from_json.records[0].implementation_type, app("TimestampLogger"));
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("registrations.yaml");
    fs::write(&path, "records: []").expect("manifest should be written");

    let error = RegistrationManifest::load(&path).expect_err("yaml is not supported");

    assert!(error.is_configuration());
    assert!(error.to_string().contains("yaml"));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir should be created");

    let error = RegistrationManifest::load(dir.path().join("absent.json")).expect_err("must fail");

    assert!(matches!(error, Error::Io { .. }));
}

#[test]
fn test_json_output_parses_back() {
    let manifest = RegistrationManifest::from_toml_str(TOML_MANIFEST).expect("manifest should parse");

    let json = manifest.to_json_string().expect("manifest should serialize");
    let reparsed = RegistrationManifest::from_json_str(&json).expect("output should parse");

    assert_eq!(reparsed, manifest);
}

#[test]
fn test_catalog_from_manifest() {
    let manifest = RegistrationManifest::from_toml_str(TOML_MANIFEST).expect("manifest should parse");

    let catalog = manifest.to_catalog();

    assert_eq!(catalog.len(), 2);
    let logger = catalog
        .describe(&TypeName::new("App", "ILogger"))
        .expect("logger should be described");
    assert!(logger.is_interface());
}
