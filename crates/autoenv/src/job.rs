// Copyright (c) Contributors to the autoenv project.
// SPDX-License-Identifier: Apache-2.0

//! External-collaborator interfaces to the scheduler's job record and the
//! worker process environment.
//!
//! The scheduler owns job metadata; this crate only reads and writes it
//! through [`JobRecord`] and never caches it across invocations.

use crate::Result;

/// A scheduler job record: metadata, per-job environment variables, and
/// arbitrary extra-info key/values, with explicit persistence.
pub trait JobRecord {
    /// Scheduler identifier for this job, used in log lines.
    fn job_id(&self) -> &str;

    /// The job's plugin type (e.g. `maya`, `nuke`).
    fn plugin_type(&self) -> &str;

    /// The job's group, matched against opt-out patterns.
    fn group(&self) -> &str;

    /// The scene-file path from the job's plugin info, when present.
    fn scene_file(&self) -> Option<String>;

    /// Read an extra-info value.
    fn extra_info(&self, key: &str) -> Option<String>;

    /// Write an extra-info value.
    fn set_extra_info(&mut self, key: &str, value: &str);

    /// Read a per-job environment variable.
    fn env_var(&self, name: &str) -> Option<String>;

    /// Write a per-job environment variable.
    fn set_env_var(&mut self, name: &str, value: &str);

    /// Remove a per-job environment variable.
    fn unset_env_var(&mut self, name: &str);

    /// Persist the record in the scheduler's metadata store. The store's
    /// last-writer-wins semantics apply; there is no finer locking.
    fn save(&mut self) -> Result<()>;
}

/// Key/value environment scoped to a running process.
pub trait ProcessEnv {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&mut self, name: &str, value: &str);
}

/// [`ProcessEnv`] backed by the current process's real environment.
#[derive(Debug, Default)]
pub struct SystemEnv;

impl ProcessEnv for SystemEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn set(&mut self, name: &str, value: &str) {
        // SAFETY: hooks run synchronously within a single scheduler
        // invocation; no other thread reads the environment concurrently.
        unsafe { std::env::set_var(name, value) }
    }
}
