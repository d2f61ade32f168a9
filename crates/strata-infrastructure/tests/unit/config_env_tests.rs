//! Environment override tests
//!
//! These tests modify environment variables and must run sequentially:
//!
//! ```bash
//! cargo test -p strata-infrastructure --test unit config_env -- --test-threads=1 --ignored
//! ```

use std::env;

use strata_infrastructure::config::ConfigLoader;

fn set_env(key: &str, value: &str) {
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::set_var(key, value);
    }
}

fn remove_env(key: &str) {
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::remove_var(key);
    }
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_nested_env_override() {
    set_env("STRATA_ENVTEST_COMPOSITION__STRICT_ARITY", "true");
    set_env("STRATA_ENVTEST_LOGGING__LEVEL", "warn");

    let result = ConfigLoader::new()
        .with_env_prefix("STRATA_ENVTEST")
        .load();

    remove_env("STRATA_ENVTEST_COMPOSITION__STRICT_ARITY");
    remove_env("STRATA_ENVTEST_LOGGING__LEVEL");

    let config = result.expect("config should load");
    assert!(config.composition.strict_arity);
    assert_eq!(config.logging.level, "warn");
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_invalid_env_value_fails() {
    set_env("STRATA_ENVBAD_COMPOSITION__SCAN_TYPE_UNIVERSE", "sometimes");

    let result = ConfigLoader::new().with_env_prefix("STRATA_ENVBAD").load();

    remove_env("STRATA_ENVBAD_COMPOSITION__SCAN_TYPE_UNIVERSE");

    let error = result.expect_err("non-boolean must fail");
    assert!(error.is_configuration());
}
