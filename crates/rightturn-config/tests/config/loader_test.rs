//! Configuration Loader Tests

use std::env;

use rightturn::TurnError;
use rightturn_config::ConfigLoader;
use serde::{Deserialize, Serialize};

use crate::test_helpers::temp_dir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Greeting {
    name: String,
    repeat: u32,
}

fn isolated_loader() -> ConfigLoader {
    ConfigLoader::new()
        .with_env_prefix("RIGHTTURN_LOADER_TEST")
        .without_default_paths()
}

fn defaults() -> serde_json::Value {
    serde_json::json!({ "greeting": { "name": "world", "repeat": 1 } })
}

#[test]
fn test_load_defaults_only() {
    let configuration = isolated_loader()
        .with_defaults(defaults())
        .load()
        .expect("Should load config");

    let greeting: Greeting = configuration.extract_section("greeting").unwrap();
    assert_eq!(
        greeting,
        Greeting {
            name: "world".to_string(),
            repeat: 1
        }
    );
}

#[test]
fn test_inline_toml_overrides_defaults() {
    let configuration = isolated_loader()
        .with_defaults(defaults())
        .with_toml_str("[greeting]\nname = \"inline\"\n")
        .load()
        .expect("Should load config");

    let greeting: Greeting = configuration.extract_section("greeting").unwrap();
    assert_eq!(greeting.name, "inline");
    assert_eq!(greeting.repeat, 1);
}

#[test]
fn test_file_overrides_inline_toml() {
    let dir = temp_dir();
    let path = dir.path().join("appsettings.toml");
    std::fs::write(&path, "[greeting]\nrepeat = 3\n").unwrap();

    let configuration = isolated_loader()
        .with_defaults(defaults())
        .with_toml_str("[greeting]\nrepeat = 2\n")
        .with_config_path(&path)
        .load()
        .expect("Should load config");

    let greeting: Greeting = configuration.extract_section("greeting").unwrap();
    assert_eq!(greeting.repeat, 3);
    assert_eq!(greeting.name, "world");
}

#[test]
fn test_missing_file_is_not_fatal() {
    let dir = temp_dir();

    let configuration = isolated_loader()
        .with_defaults(defaults())
        .with_config_path(dir.path().join("absent.toml"))
        .load()
        .expect("Missing file should fall back to other sources");

    assert!(configuration.contains("greeting.name"));
    assert!(!configuration.contains("greeting.absent"));
}

#[test]
fn test_malformed_file_fails() {
    let dir = temp_dir();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[greeting\nname = ").unwrap();

    let err = isolated_loader()
        .with_config_path(&path)
        .load()
        .expect_err("Malformed TOML should fail");

    assert!(
        matches!(err, TurnError::Configuration { .. }),
        "unexpected error: {err:?}"
    );
}

#[test]
fn test_save_then_load_from_file() {
    let dir = temp_dir();
    let path = dir.path().join("saved.toml");
    let loader = isolated_loader().with_config_path(&path);
    let saved = serde_json::json!({
        "greeting": { "name": "saved", "repeat": 5 }
    });

    loader.save_to_file(&saved, &path).expect("Should save config");
    let configuration = loader.reload().expect("Should load saved config");

    let greeting: Greeting = configuration.extract_section("greeting").unwrap();
    assert_eq!(greeting.name, "saved");
    assert_eq!(greeting.repeat, 5);
    assert_eq!(loader.config_path(), Some(path.as_path()));
}

#[test]
fn test_section_or_default_for_absent_section() {
    let configuration = isolated_loader().load().expect("Should load config");

    let greeting: Option<Greeting> = configuration.section_or_default("greeting").unwrap();
    assert!(greeting.is_none());
}

/// Verify prefixed env vars override file and defaults
///
/// Run with: `cargo test -p rightturn-config -- --test-threads=1 --ignored`
#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_env_vars_override_other_sources() {
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::set_var("RIGHTTURN_LOADER_TEST__GREETING__NAME", "from-env");
    }

    let configuration = isolated_loader()
        .with_defaults(defaults())
        .with_toml_str("[greeting]\nname = \"inline\"\n")
        .load()
        .expect("Should load config");

    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::remove_var("RIGHTTURN_LOADER_TEST__GREETING__NAME");
    }

    let greeting: Greeting = configuration.extract_section("greeting").unwrap();
    assert_eq!(greeting.name, "from-env");
}
