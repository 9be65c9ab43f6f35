// Copyright (c) Contributors to the autoenv project.
// SPDX-License-Identifier: Apache-2.0

//! Administrator plugin-mapping table: job plugin type to requirements.

use std::collections::HashMap;

#[cfg(test)]
#[path = "./plugin_map_test.rs"]
mod plugin_map_test;

use crate::{Error, Result};

/// Mapping from job plugin type to a requirement list, parsed from the
/// `pluginType=req1 req2;...` configuration grammar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginMapping {
    entries: HashMap<String, Vec<String>>,
}

impl PluginMapping {
    /// Parse the semicolon-separated configuration text.
    ///
    /// Blank input yields an empty mapping. Any entry without `=` makes
    /// the whole table invalid: a partially parsed table could silently
    /// drop requirements for unrelated plugin types.
    ///
    /// Duplicate plugin keys keep the first occurrence.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut entries = HashMap::new();

        for entry in raw.split(';') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }

            let (plugin, requirements) = entry
                .split_once('=')
                .ok_or_else(|| Error::InvalidPluginMapping {
                    entry: entry.to_string(),
                })?;

            let plugin = plugin.trim().to_string();
            if plugin.is_empty() {
                return Err(Error::InvalidPluginMapping {
                    entry: entry.to_string(),
                });
            }

            let requirements: Vec<String> = requirements
                .split_whitespace()
                .map(String::from)
                .collect();

            // First occurrence wins, matching the long-standing behavior
            // administrators rely on.
            entries.entry(plugin).or_insert(requirements);
        }

        Ok(Self { entries })
    }

    /// Look up the requirement list for a plugin type.
    pub fn get(&self, plugin_type: &str) -> Option<&[String]> {
        self.entries.get(plugin_type).map(Vec::as_slice)
    }

    /// Number of configured plugin types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether any plugin types are configured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate configured plugin types in unspecified order.
    pub fn plugin_types(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
