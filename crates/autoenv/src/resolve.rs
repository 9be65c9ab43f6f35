// Copyright (c) Contributors to the autoenv project.
// SPDX-License-Identifier: Apache-2.0

//! The ordered requirement-discovery chain.
//!
//! Strategies are tried in a fixed order and the first non-empty result
//! wins. The forced plugin mapping is outside the chain: it always runs
//! and its requirements are unioned into whatever the chain produced.

use std::path::Path;

#[cfg(test)]
#[path = "./resolve_test.rs"]
mod resolve_test;

use crate::activate::{ModuleResolver, NullReporter};
use crate::config::PluginConfig;
use crate::job::{JobRecord, ProcessEnv};
use crate::plugin_map::PluginMapping;
use crate::requirement::combine;
use crate::{Error, Result, ACTIVE_MODULES_VAR, PATH_LIST_SEP, REQUIREMENTS_KEY};

/// Discovery strategies in chain order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Requirements a prior run already persisted on the job record.
    StoredMetadata,
    /// The well-known variable in the job's own environment block.
    JobEnvironment,
    /// The well-known variable in the submitting process's environment.
    LocalEnvironment,
    /// Implicit requirements discovered from the scene file's directory.
    SceneFile,
    /// The administrator plugin-mapping table.
    PluginMapping,
}

const CHAIN: &[Strategy] = &[
    Strategy::StoredMetadata,
    Strategy::JobEnvironment,
    Strategy::LocalEnvironment,
    Strategy::SceneFile,
    Strategy::PluginMapping,
];

/// Result of evaluating one strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Found(Vec<String>),
    NotFound,
    Error(String),
}

/// The chain's final answer: an empty requirement list is the normal
/// "nothing to do" skip condition, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Combined requirement list, one entry per distinct name.
    pub requirements: Vec<String>,
    /// Which strategy produced the chain's result, when any did.
    pub source: Option<Strategy>,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

/// Run the discovery chain for a job and union in the forced mapping.
///
/// Strategy-level failures are logged and treated as not-found; only a
/// malformed mapping table is fatal, since it could silently suppress
/// requirements for unrelated plugin types.
pub fn resolve_requirements(
    job: &dyn JobRecord,
    local_env: &dyn ProcessEnv,
    resolver: &dyn ModuleResolver,
    config: &PluginConfig,
) -> Result<Resolution> {
    // Both tables parse up front so a ConfigError skips resolution
    // entirely rather than surfacing halfway down the chain.
    let mapping = config.plugin_mapping()?;
    let forced = config.forced_plugin_mapping()?;

    let mut found: Option<(Strategy, Vec<String>)> = None;
    for &strategy in CHAIN {
        match eval_strategy(strategy, job, local_env, resolver, &mapping) {
            Outcome::Found(requirements) => {
                tracing::info!(
                    job_id = %job.job_id(),
                    strategy = ?strategy,
                    count = requirements.len(),
                    "found requirements"
                );
                for requirement in &requirements {
                    tracing::info!(job_id = %job.job_id(), "  {requirement}");
                }
                found = Some((strategy, requirements));
                break;
            }
            Outcome::NotFound => {
                tracing::info!(job_id = %job.job_id(), strategy = ?strategy, "no requirements");
            }
            Outcome::Error(reason) => {
                tracing::warn!(
                    job_id = %job.job_id(),
                    strategy = ?strategy,
                    %reason,
                    "strategy failed, continuing"
                );
            }
        }
    }

    let (source, requirements) = match found {
        Some((strategy, requirements)) => (Some(strategy), requirements),
        None => (None, Vec::new()),
    };

    // Forced requirements always apply, even when the chain found nothing.
    let forced_requirements = forced
        .get(job.plugin_type())
        .map(<[String]>::to_vec)
        .unwrap_or_default();

    let requirements = if forced_requirements.is_empty() {
        requirements
    } else {
        tracing::info!(
            job_id = %job.job_id(),
            count = forced_requirements.len(),
            "merging forced requirements"
        );
        combine(&requirements, &forced_requirements)
    };

    Ok(Resolution {
        requirements,
        source,
    })
}

fn eval_strategy(
    strategy: Strategy,
    job: &dyn JobRecord,
    local_env: &dyn ProcessEnv,
    resolver: &dyn ModuleResolver,
    mapping: &PluginMapping,
) -> Outcome {
    match strategy {
        Strategy::StoredMetadata => {
            found_if_any(job.extra_info(REQUIREMENTS_KEY).map(|stored| {
                stored.split_whitespace().map(String::from).collect()
            }))
        }
        Strategy::JobEnvironment => {
            found_if_any(job.env_var(ACTIVE_MODULES_VAR).map(split_path_list))
        }
        Strategy::LocalEnvironment => {
            found_if_any(local_env.get(ACTIVE_MODULES_VAR).map(split_path_list))
        }
        Strategy::SceneFile => eval_scene_file(job, resolver),
        Strategy::PluginMapping => {
            found_if_any(mapping.get(job.plugin_type()).map(<[String]>::to_vec))
        }
    }
}

/// Walk from the scene file's directory to discover implicit requirements
/// via the resolution library. A library "not found" is expected here and
/// swallowed; anything else is a strategy error.
fn eval_scene_file(job: &dyn JobRecord, resolver: &dyn ModuleResolver) -> Outcome {
    let Some(scene_file) = job.scene_file() else {
        return Outcome::NotFound;
    };
    let Some(scene_dir) = Path::new(&scene_file).parent() else {
        return Outcome::NotFound;
    };

    let query = vec![scene_dir.to_string_lossy().into_owned()];
    match resolver.resolve(&query, false, &mut NullReporter) {
        Ok(resolved) => found_if_any(Some(
            resolved.into_iter().map(|spec| spec.qualified_name).collect(),
        )),
        Err(Error::Resolution(_)) => Outcome::NotFound,
        Err(err) => Outcome::Error(err.to_string()),
    }
}

fn found_if_any(requirements: Option<Vec<String>>) -> Outcome {
    match requirements {
        Some(requirements) if !requirements.is_empty() => Outcome::Found(requirements),
        _ => Outcome::NotFound,
    }
}

fn split_path_list(value: String) -> Vec<String> {
    value
        .split(PATH_LIST_SEP)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}
