// Copyright (c) Contributors to the autoenv project.
// SPDX-License-Identifier: Apache-2.0

//! Writing a composed module environment back to its destination.
//!
//! Both destinations follow the same shape: read the currently-set values
//! for the module environment's keys, merge with the module environment
//! winning on conflict, expand variable references, then write the whole
//! mapping.

use crate::job::{JobRecord, ProcessEnv};
use crate::mapping::{expand, merge, EnvMapping};
use crate::Result;

#[cfg(test)]
#[path = "./apply_test.rs"]
mod apply_test;

/// Merge a composed module environment into a job's persisted environment
/// variables and save the job record.
///
/// Persistence is all-or-nothing: if the save fails, the resolved
/// mapping is discarded, the record's prior values are restored, and the
/// job falls back to its prior environment with the failure logged.
pub fn apply_to_job(job: &mut dyn JobRecord, module_env: &EnvMapping) -> Result<()> {
    // Snapshot the prior values while building the merge base, so a
    // failed save can be rolled back.
    let mut prior: Vec<(String, Option<String>)> = Vec::new();
    let resolved = resolve_against(module_env, |key| {
        let value = job.env_var(key);
        prior.push((key.to_string(), value.clone()));
        value
    });

    for (key, value) in &resolved {
        job.set_env_var(key, value);
    }

    if let Err(err) = job.save() {
        for (key, value) in &prior {
            match value {
                Some(value) => job.set_env_var(key, value),
                None => job.unset_env_var(key),
            }
        }
        tracing::error!(
            job_id = %job.job_id(),
            error = %err,
            "failed to persist job environment, prior environment remains"
        );
        return Err(err);
    }
    Ok(())
}

/// Merge a composed module environment into the worker's live process
/// environment, scoped to the current job's execution.
pub fn apply_to_process(process: &mut dyn ProcessEnv, module_env: &EnvMapping) -> Result<()> {
    let resolved = resolve_against(module_env, |key| process.get(key));

    for (key, value) in &resolved {
        process.set(key, value);
    }

    Ok(())
}

/// Build the final mapping for a destination: existing values for the
/// module environment's keys as the base, module values on top, then a
/// single expansion pass.
fn resolve_against(
    module_env: &EnvMapping,
    mut current: impl FnMut(&str) -> Option<String>,
) -> EnvMapping {
    let mut base = EnvMapping::new();
    for key in module_env.keys() {
        if let Some(value) = current(key) {
            base.insert(key.clone(), value);
        }
    }

    expand(&merge(&base, module_env))
}
