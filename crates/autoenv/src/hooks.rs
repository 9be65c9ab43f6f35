// Copyright (c) Contributors to the autoenv project.
// SPDX-License-Identifier: Apache-2.0

//! Scheduler hook entry points.
//!
//! [`on_job_submitted`] runs once when a job enters the queue: it
//! discovers the job's requirements and persists them as job metadata.
//! [`job_pre_load`] and [`on_worker_starting_job`] run on each worker
//! before the job executes: they activate the persisted requirements and
//! write the composed environment to the process or the job record.

use crate::activate::{activate, ActivateOptions, LocalizePolicy, LogReporter, ModuleResolver};
use crate::apply::{apply_to_job, apply_to_process};
use crate::config::PluginConfig;
use crate::job::{JobRecord, ProcessEnv};
use crate::resolve::resolve_requirements;
use crate::{Result, REQUIREMENTS_KEY};

#[cfg(test)]
#[path = "./hooks_test.rs"]
mod hooks_test;

/// Submission hook: resolve the job's requirements and persist them under
/// [`REQUIREMENTS_KEY`] so workers can activate them later.
///
/// Finding no requirements is a normal skip, not an error; the job simply
/// runs unmodified.
pub fn on_job_submitted(
    job: &mut dyn JobRecord,
    local_env: &dyn ProcessEnv,
    resolver: &dyn ModuleResolver,
    config: &PluginConfig,
) -> Result<()> {
    if !config.enabled_for_job(job.group())? {
        tracing::info!(job_id = %job.job_id(), "autoenv disabled for this job, skipping");
        return Ok(());
    }

    let resolution = resolve_requirements(job, local_env, resolver, config)?;
    if resolution.is_empty() {
        tracing::info!(job_id = %job.job_id(), "no requirements found, job runs unmodified");
        return Ok(());
    }

    let joined = resolution.requirements.join(" ");
    if job.extra_info(REQUIREMENTS_KEY).as_deref() == Some(joined.as_str()) {
        tracing::info!(job_id = %job.job_id(), "requirements already persisted");
        return Ok(());
    }

    tracing::info!(job_id = %job.job_id(), requirements = %joined, "persisting requirements");
    job.set_extra_info(REQUIREMENTS_KEY, &joined);
    job.save()
}

/// Pre-load hook: activate the job's persisted requirements on this
/// worker and merge the composed environment into the worker's process
/// environment, scoped to this job's execution.
pub fn job_pre_load(
    job: &dyn JobRecord,
    process: &mut dyn ProcessEnv,
    resolver: &dyn ModuleResolver,
    config: &PluginConfig,
    worker_name: &str,
    worker_group: &str,
) -> Result<()> {
    let Some(module_env) = activate_stored(job, resolver, config, worker_name, worker_group)?
    else {
        return Ok(());
    };

    tracing::info!(job_id = %job.job_id(), "setting process environment variables");
    apply_to_process(process, &module_env)?;

    for (key, value) in &module_env {
        tracing::debug!(job_id = %job.job_id(), "  {key}={value}");
    }
    Ok(())
}

/// Worker-start hook variant that writes the composed environment onto
/// the job record itself and persists it.
pub fn on_worker_starting_job(
    job: &mut dyn JobRecord,
    resolver: &dyn ModuleResolver,
    config: &PluginConfig,
    worker_name: &str,
    worker_group: &str,
) -> Result<()> {
    let Some(module_env) = activate_stored(job, resolver, config, worker_name, worker_group)?
    else {
        return Ok(());
    };

    tracing::info!(job_id = %job.job_id(), "writing job environment variables");
    apply_to_job(job, &module_env)
}

/// Shared start-time body: gate on the worker opt-outs, read the
/// persisted requirement list, and activate it. `None` means there is
/// nothing to apply.
fn activate_stored(
    job: &dyn JobRecord,
    resolver: &dyn ModuleResolver,
    config: &PluginConfig,
    worker_name: &str,
    worker_group: &str,
) -> Result<Option<crate::mapping::EnvMapping>> {
    if !config.enabled_for_worker(worker_name, worker_group)? {
        tracing::info!(
            job_id = %job.job_id(),
            worker = worker_name,
            "autoenv disabled for this worker, skipping"
        );
        return Ok(None);
    }

    let Some(stored) = job.extra_info(REQUIREMENTS_KEY) else {
        tracing::info!(job_id = %job.job_id(), "job has no requirements, skipping");
        return Ok(None);
    };

    let requirements: Vec<String> = stored.split_whitespace().map(String::from).collect();
    if requirements.is_empty() {
        tracing::info!(job_id = %job.job_id(), "job has no requirements, skipping");
        return Ok(None);
    }

    let options = ActivateOptions {
        ignore_missing: config.ignore_missing,
        localize: LocalizePolicy::NeverOverwrite,
    };
    let mut reporter = LogReporter::new(job.job_id());
    let module_env = activate(resolver, &requirements, &options, &mut reporter)?;

    tracing::info!(
        job_id = %job.job_id(),
        modules = requirements.len(),
        variables = module_env.len(),
        "activated modules"
    );
    Ok(Some(module_env))
}
