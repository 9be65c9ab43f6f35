// Copyright (c) Contributors to the autoenv project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for autoenv operations.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience Result type with autoenv Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during autoenv operations.
///
/// Strategy-level "found nothing" conditions are not errors; they are
/// [`crate::resolve::Outcome`] values recovered inside the resolver chain.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Malformed plugin-mapping configuration text.
    #[error("Invalid plugin mapping entry: {entry:?}")]
    #[diagnostic(
        code(autoenv::invalid_plugin_mapping),
        help("Entries must look like 'pluginType=req1 req2', separated by ';'")
    )]
    InvalidPluginMapping { entry: String },

    /// Invalid YAML in a configuration file.
    #[error("Invalid autoenv configuration: {error}")]
    #[diagnostic(
        code(autoenv::invalid_yaml),
        help("Check YAML syntax against the documented configuration keys")
    )]
    InvalidYaml {
        #[source]
        error: serde_yaml::Error,
        yaml_content: String,
    },

    /// Invalid glob pattern in an opt-out list.
    #[error("Invalid opt-out pattern: {pattern:?}")]
    #[diagnostic(code(autoenv::invalid_pattern))]
    InvalidPattern {
        pattern: String,
        #[source]
        error: glob::PatternError,
    },

    /// Failed to read a configuration file.
    #[error("Failed to read file: {path:?}")]
    #[diagnostic(code(autoenv::read_failed))]
    ReadFailed {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// A requirement string could not be parsed into name and version.
    #[error("Unparsable requirement: {0:?}")]
    #[diagnostic(code(autoenv::invalid_requirement))]
    InvalidRequirement(String),

    /// The external module-resolution library failed to resolve or
    /// localize a requirement.
    #[error("Module resolution failed: {0}")]
    #[diagnostic(
        code(autoenv::resolution_failed),
        help("The job will run without the requested environment; fix the \
              requirement or enable ignore_missing to proceed with a subset")
    )]
    Resolution(String),

    /// The job record could not be saved after resolution.
    #[error("Failed to persist job record: {0}")]
    #[diagnostic(code(autoenv::persistence_failed))]
    Persistence(String),

    /// IO error passthrough.
    #[error(transparent)]
    #[diagnostic(code(autoenv::io_error))]
    Io(#[from] std::io::Error),
}
