// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Plinth CLI configuration.

use std::collections::HashMap;
use std::io::Write;

use plinth_config::diagnostic::ConfigError;
use plinth_config::{
    builtin_config, load_and_validate, load_and_validate_str, load_config, load_config_from_str,
    CliConfig,
};
use proptest::prelude::*;

/// Valid TOML with both sections deserializes successfully.
#[test]
fn valid_toml_deserializes_into_cli_config() {
    let toml = r#"
[providers]
aws = "/opt/plugins/plinth-provider-aws"
"local-cloud" = "plinth-provider-local"

[provisioners]
chef = "plinth-provisioner-chef"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.providers.len(), 2);
    assert_eq!(config.providers["aws"], "/opt/plugins/plinth-provider-aws");
    assert_eq!(config.providers["local-cloud"], "plinth-provider-local");
    assert_eq!(config.provisioners["chef"], "plinth-provisioner-chef");
}

/// Inline tables decode the same as sections.
#[test]
fn inline_tables_are_accepted() {
    let config = load_config_from_str(r#"providers = { aws = "custom-aws-path" }"#)
        .expect("inline table should deserialize");
    assert_eq!(config.providers["aws"], "custom-aws-path");
    assert!(config.provisioners.is_empty());
}

/// Missing sections default to empty mappings.
#[test]
fn empty_text_yields_empty_config() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert!(config.is_empty());
}

/// Syntax errors are reported as parse errors with a source span.
#[test]
fn syntax_error_reports_parse_error() {
    let errors = load_config_from_str("[providers]\naws = \n").expect_err("should reject");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::Parse { path, span, .. } => {
            assert_eq!(path, "<inline>");
            assert!(span.is_some(), "parse error should carry a span");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

/// A misspelled top-level key is a decode error with a suggestion.
#[test]
fn unknown_top_level_key_suggests_correction() {
    let toml = r#"
[provider]
aws = "x"
"#;

    let errors = load_config_from_str(toml).expect_err("should reject unknown field");
    assert!(errors.iter().all(ConfigError::is_decode));
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "provider");
            assert_eq!(suggestion.as_deref(), Some("providers"));
        }
        other => panic!("expected unknown key error, got {other:?}"),
    }
}

/// Non-string plugin paths are decode errors, not parse errors.
#[test]
fn wrong_value_type_is_decode_error() {
    let toml = r#"
[providers]
aws = 3
"#;

    let errors = load_config_from_str(toml).expect_err("should reject integer path");
    assert!(!errors.is_empty());
    assert!(errors.iter().all(ConfigError::is_decode));
    assert!(!errors.iter().any(ConfigError::is_parse));
}

/// A section that is not a table is a decode error.
#[test]
fn scalar_section_is_decode_error() {
    let errors = load_config_from_str("providers = \"aws\"").expect_err("should reject");
    assert!(errors.iter().all(ConfigError::is_decode));
}

/// Validation runs after decoding and collects empty paths.
#[test]
fn validation_rejects_empty_paths() {
    let toml = r#"
[providers]
aws = ""

[provisioners]
file = ""
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .all(|e| matches!(e, ConfigError::Validation { .. })));
}

/// Loading from a file names the file in diagnostics.
#[test]
fn load_config_reads_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[provisioners]\nchef = \"plinth-provisioner-chef\"").expect("write");

    let config = load_and_validate(file.path()).expect("file should load");
    assert_eq!(config.provisioners["chef"], "plinth-provisioner-chef");
}

#[test]
fn parse_error_names_the_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "providers = {{").expect("write");

    let errors = load_config(file.path()).expect_err("should reject");
    match &errors[0] {
        ConfigError::Parse { path, .. } => {
            assert_eq!(path, &file.path().display().to_string());
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn missing_file_is_read_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let errors = load_config(&dir.path().join("absent.rc")).expect_err("should fail");
    assert!(matches!(errors[0], ConfigError::Read { .. }));
    assert!(!errors[0].is_parse());
    assert!(!errors[0].is_decode());
}

/// User config overrides the built-in provider path.
#[test]
fn user_config_overrides_builtin() {
    let user = load_config_from_str(r#"providers = { aws = "custom-aws-path" }"#)
        .expect("should deserialize");
    let merged = builtin_config().merge(&user);

    assert_eq!(merged.providers["aws"], "custom-aws-path");
    assert_eq!(merged.providers["heroku"], "plinth-provider-heroku");
    assert_eq!(merged.provisioners.len(), builtin_config().provisioners.len());
}

/// Figment decoding accepts the same shape when layered programmatically.
#[test]
fn figment_layering_matches_merge() {
    use figment::{
        providers::{Format, Serialized, Toml},
        Figment,
    };

    let config: CliConfig = Figment::new()
        .merge(Serialized::defaults(builtin_config()))
        .merge(Toml::string(r#"providers = { aws = "custom-aws-path" }"#))
        .extract()
        .expect("should layer");

    let user = load_config_from_str(r#"providers = { aws = "custom-aws-path" }"#).unwrap();
    assert_eq!(config, builtin_config().merge(&user));
}

fn name_map() -> impl Strategy<Value = HashMap<String, String>> {
    prop::collection::hash_map("[a-z]{1,6}", "[a-z/-]{1,12}", 0..8)
}

fn cli_config() -> impl Strategy<Value = CliConfig> {
    (name_map(), name_map()).prop_map(|(providers, provisioners)| CliConfig {
        providers,
        provisioners,
    })
}

proptest! {
    #[test]
    fn merge_second_argument_wins(a in cli_config(), b in cli_config()) {
        let merged = a.merge(&b);

        for (base, over, out) in [
            (&a.providers, &b.providers, &merged.providers),
            (&a.provisioners, &b.provisioners, &merged.provisioners),
        ] {
            let union: std::collections::HashSet<&String> =
                base.keys().chain(over.keys()).collect();
            prop_assert_eq!(out.len(), union.len());
            for name in union {
                let expected = over.get(name).or_else(|| base.get(name));
                prop_assert_eq!(out.get(name), expected);
            }
        }
    }

    #[test]
    fn merge_leaves_inputs_untouched(a in cli_config(), b in cli_config()) {
        let (a_before, b_before) = (a.clone(), b.clone());
        let _ = a.merge(&b);
        prop_assert_eq!(a, a_before);
        prop_assert_eq!(b, b_before);
    }
}
