// Copyright (c) Contributors to the autoenv project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use super::*;

const EXAMPLE_YAML: &str = r#"
enabled: true
plugin_mapping: "maya=core-1.0 render-2.1;nuke=core-1.0"
forced_plugin_mapping: "maya=studio-3.2"
ignore_missing: true
opt_out_job_groups:
  - "sim_*"
opt_out_workers:
  - "gpu-??"
repositories:
  - name: home
    location: /mnt/pipeline/modules
  - name: tracker
    location: https://tracker.example.com
    api_key: abc123
"#;

#[rstest]
fn test_from_yaml() {
    let config = PluginConfig::from_yaml(EXAMPLE_YAML).unwrap();
    assert!(config.enabled);
    assert!(config.ignore_missing);
    assert_eq!(config.repositories.len(), 2);
    assert_eq!(config.repositories[0].name, "home");
    assert_eq!(config.repositories[1].api_key.as_deref(), Some("abc123"));

    let mapping = config.plugin_mapping().unwrap();
    assert_eq!(mapping.get("maya").unwrap().len(), 2);
}

#[rstest]
fn test_defaults() {
    let config = PluginConfig::from_yaml("{}").unwrap();
    assert!(config.enabled);
    assert!(!config.ignore_missing);
    assert!(config.plugin_mapping.is_empty());
    assert!(config.repositories.is_empty());
}

#[rstest]
fn test_invalid_yaml() {
    assert!(matches!(
        PluginConfig::from_yaml("enabled: [not-a-bool"),
        Err(Error::InvalidYaml { .. })
    ));
}

#[rstest]
fn test_load_missing_file() {
    assert!(matches!(
        PluginConfig::load("/no/such/autoenv.yaml"),
        Err(Error::ReadFailed { .. })
    ));
}

#[rstest]
fn test_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("autoenv.yaml");
    std::fs::write(&path, EXAMPLE_YAML).unwrap();

    let config = PluginConfig::load(&path).unwrap();
    assert_eq!(config.repositories.len(), 2);
}

#[rstest]
fn test_validate_catches_bad_mapping() {
    let config = PluginConfig {
        plugin_mapping: "maya core-1.0".into(),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(Error::InvalidPluginMapping { .. })
    ));
}

#[rstest]
fn test_validate_catches_bad_pattern() {
    let config = PluginConfig {
        opt_out_workers: vec!["gpu-[".into()],
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(Error::InvalidPattern { .. })));
}

#[rstest]
fn test_enabled_for_job_opt_out() {
    let config = PluginConfig {
        opt_out_job_groups: vec!["sim_*".into()],
        ..Default::default()
    };
    assert!(!config.enabled_for_job("sim_fluids").unwrap());
    assert!(config.enabled_for_job("lighting").unwrap());
}

#[rstest]
fn test_enabled_for_worker_matches_name_or_group() {
    let config = PluginConfig {
        opt_out_workers: vec!["gpu-*".into()],
        ..Default::default()
    };
    assert!(!config.enabled_for_worker("gpu-04", "render").unwrap());
    assert!(!config.enabled_for_worker("node-12", "gpu-pool").unwrap());
    assert!(config.enabled_for_worker("node-12", "render").unwrap());
}

#[rstest]
fn test_master_disable() {
    let config = PluginConfig {
        enabled: false,
        ..Default::default()
    };
    assert!(!config.enabled_for_job("anything").unwrap());
    assert!(!config.enabled_for_worker("any", "any").unwrap());
}
