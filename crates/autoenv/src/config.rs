// Copyright (c) Contributors to the autoenv project.
// SPDX-License-Identifier: Apache-2.0

//! Administrator configuration for the autoenv plugin.
//!
//! The configuration is constructed once per hook invocation and threaded
//! explicitly through every component call; resolution logic never mutates
//! ambient process state to carry settings.

use std::path::Path;

use glob::Pattern;
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "./config_test.rs"]
mod config_test;

use crate::plugin_map::PluginMapping;
use crate::{Error, Result};

/// A named environment-module repository descriptor, passed through to
/// the external resolution library.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Repository name used in log lines and library lookups.
    pub name: String,
    /// Location understood by the library (path or URL).
    pub location: String,
    /// Optional credential for remote repositories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Administrator-supplied plugin settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PluginConfig {
    /// Master enable switch for the whole plugin.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Glob patterns matched against a job's group; matching jobs are
    /// skipped entirely.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub opt_out_job_groups: Vec<String>,

    /// Glob patterns matched against a worker's name or group; matching
    /// workers skip activation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub opt_out_workers: Vec<String>,

    /// Plugin-mapping table text (`pluginType=req1 req2;...`).
    #[serde(default)]
    pub plugin_mapping: String,

    /// Forced-mapping table text, unioned into every resolution result.
    #[serde(default)]
    pub forced_plugin_mapping: String,

    /// Proceed with the resolved subset when some requirements cannot be
    /// resolved, instead of aborting activation.
    #[serde(default)]
    pub ignore_missing: bool,

    /// Module repositories the resolution library should search.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub repositories: Vec<RepositoryConfig>,
}

fn default_enabled() -> bool {
    true
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            opt_out_job_groups: Vec::new(),
            opt_out_workers: Vec::new(),
            plugin_mapping: String::new(),
            forced_plugin_mapping: String::new(),
            ignore_missing: false,
            repositories: Vec::new(),
        }
    }
}

impl PluginConfig {
    /// Parse configuration from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| Error::InvalidYaml {
            error: e,
            yaml_content: yaml.to_string(),
        })
    }

    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| Error::ReadFailed {
            path: path.to_path_buf(),
            error: e,
        })?;
        Self::from_yaml(&yaml)
    }

    /// Parse the primary plugin-mapping table.
    pub fn plugin_mapping(&self) -> Result<PluginMapping> {
        PluginMapping::parse(&self.plugin_mapping)
    }

    /// Parse the forced plugin-mapping table.
    pub fn forced_plugin_mapping(&self) -> Result<PluginMapping> {
        PluginMapping::parse(&self.forced_plugin_mapping)
    }

    /// Validate everything an operator can get wrong: both mapping tables
    /// and every opt-out glob pattern.
    pub fn validate(&self) -> Result<()> {
        self.plugin_mapping()?;
        self.forced_plugin_mapping()?;
        for pattern in self.opt_out_job_groups.iter().chain(&self.opt_out_workers) {
            compile_pattern(pattern)?;
        }
        Ok(())
    }

    /// Whether resolution should run for a job in the given group.
    pub fn enabled_for_job(&self, job_group: &str) -> Result<bool> {
        if !self.enabled {
            return Ok(false);
        }
        Ok(!matches_any(&self.opt_out_job_groups, &[job_group])?)
    }

    /// Whether activation should run on the given worker.
    pub fn enabled_for_worker(&self, worker_name: &str, worker_group: &str) -> Result<bool> {
        if !self.enabled {
            return Ok(false);
        }
        Ok(!matches_any(&self.opt_out_workers, &[worker_name, worker_group])?)
    }
}

fn matches_any(patterns: &[String], candidates: &[&str]) -> Result<bool> {
    for raw in patterns {
        let pattern = compile_pattern(raw)?;
        if candidates.iter().any(|c| pattern.matches(c)) {
            return Ok(true);
        }
    }
    Ok(false)
}

fn compile_pattern(raw: &str) -> Result<Pattern> {
    Pattern::new(raw).map_err(|error| Error::InvalidPattern {
        pattern: raw.to_string(),
        error,
    })
}
