// Copyright (c) Contributors to the autoenv project.
// SPDX-License-Identifier: Apache-2.0

//! Preview the requirement list the mapping tables yield for a plugin type.

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use miette::Result;

/// Show the requirements resolved for a plugin type
#[derive(Debug, Args)]
pub struct CmdShow {
    /// Path to the autoenv configuration YAML
    config: PathBuf,

    /// Job plugin type to look up (e.g. maya, nuke)
    plugin_type: String,
}

impl CmdShow {
    pub fn run(&mut self) -> Result<i32> {
        let config = autoenv::PluginConfig::load(&self.config)?;

        let mapping = config.plugin_mapping()?;
        let forced = config.forced_plugin_mapping()?;

        let mapped = mapping
            .get(&self.plugin_type)
            .map(<[String]>::to_vec)
            .unwrap_or_default();
        let forced_reqs = forced
            .get(&self.plugin_type)
            .map(<[String]>::to_vec)
            .unwrap_or_default();

        let combined = autoenv::combine(&mapped, &forced_reqs);

        if combined.is_empty() {
            println!(
                "No requirements configured for plugin type '{}'",
                self.plugin_type
            );
            return Ok(2);
        }

        println!("{}", self.plugin_type.bold());
        for requirement in &combined {
            let marker = if forced_reqs.contains(requirement) {
                "forced".yellow().to_string()
            } else {
                "mapped".normal().to_string()
            };
            println!("  {requirement}  ({marker})");
        }

        Ok(0)
    }
}
