// Copyright (c) Contributors to the autoenv project.
// SPDX-License-Identifier: Apache-2.0

//! Validate an autoenv plugin configuration file.

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use miette::Result;

/// Validate a plugin configuration file
#[derive(Debug, Args)]
pub struct CmdCheck {
    /// Path to the autoenv configuration YAML
    config: PathBuf,

    /// Print the validated configuration, normalized, as YAML
    #[clap(long)]
    dump: bool,
}

impl CmdCheck {
    pub fn run(&mut self) -> Result<i32> {
        let config = autoenv::PluginConfig::load(&self.config)?;
        config.validate()?;

        if self.dump {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| miette::miette!("Failed to serialize configuration: {e}"))?;
            print!("{yaml}");
            return Ok(0);
        }

        let mapping = config.plugin_mapping()?;
        let forced = config.forced_plugin_mapping()?;

        println!("{} {}", "✓".green(), "Configuration is valid");
        println!("  plugin types mapped: {}", mapping.len());
        println!("  forced plugin types: {}", forced.len());
        println!("  repositories:        {}", config.repositories.len());
        for repo in &config.repositories {
            println!("    {} ({})", repo.name, repo.location);
        }
        if !config.enabled {
            println!("{}", "Note: the plugin is currently disabled".yellow());
        }

        Ok(0)
    }
}
