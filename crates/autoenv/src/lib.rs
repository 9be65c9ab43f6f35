// Copyright (c) Contributors to the autoenv project.
// SPDX-License-Identifier: Apache-2.0

//! autoenv - Automatic environment-module activation for render-farm jobs
//!
//! This crate decides which reusable environment modules a rendering job
//! requires, resolves those requirements against one or more module
//! repositories, and injects the composed environment variables into the
//! job before it runs on a worker.
//!
//! # Overview
//!
//! Resolution happens in two scheduler hooks:
//!
//! 1. At submission ([`hooks::on_job_submitted`]) an ordered chain of
//!    discovery strategies finds the job's requirement list (stored
//!    metadata, job environment, local environment, scene file, plugin
//!    mapping) and persists it on the job record.
//! 2. At job start ([`hooks::job_pre_load`]) each worker activates the
//!    persisted requirements itself: modules are localized to the worker,
//!    their environment contributions composed, merged over the current
//!    process environment, expanded, and written back.
//!
//! The scheduler's job/worker object model and the module-resolution
//! library are external collaborators reached through the traits in
//! [`job`] and [`activate`].

pub mod activate;
pub mod apply;
pub mod config;
pub mod error;
pub mod hooks;
pub mod job;
pub mod mapping;
pub mod plugin_map;
pub mod requirement;
pub mod resolve;

pub use activate::{
    activate, ActivateOptions, LocalizePolicy, LogReporter, ModuleResolver, ModuleSpec,
    NullReporter, ProgressReporter,
};
pub use apply::{apply_to_job, apply_to_process};
pub use config::{PluginConfig, RepositoryConfig};
pub use error::{Error, Result};
pub use job::{JobRecord, ProcessEnv, SystemEnv};
pub use mapping::{expand, merge, to_delimited, to_mapping, EnvMapping};
pub use plugin_map::PluginMapping;
pub use requirement::{combine, Requirement, Version};
pub use resolve::{resolve_requirements, Outcome, Resolution, Strategy};

/// Well-known environment variable carrying an inline requirement list,
/// delimited by the platform path-list separator.
pub const ACTIVE_MODULES_VAR: &str = "AUTOENV_ACTIVE_MODULES";

/// Well-known job metadata key holding the persisted, space-delimited
/// requirement list.
pub const REQUIREMENTS_KEY: &str = "autoenv_requirements";

/// Platform path-list separator used when splitting [`ACTIVE_MODULES_VAR`].
#[cfg(unix)]
pub const PATH_LIST_SEP: char = ':';
#[cfg(windows)]
pub const PATH_LIST_SEP: char = ';';
