// Copyright (c) Contributors to the autoenv project.
// SPDX-License-Identifier: Apache-2.0

//! Adapter over the external module-resolution library: resolve a
//! requirement list, localize the modules, and compose their environment
//! contributions into one mapping.

use crate::mapping::EnvMapping;
use crate::Result;

#[cfg(test)]
#[path = "./activate_test.rs"]
mod activate_test;

/// A concrete module produced by resolution: enough identity for progress
/// reporting and logging; everything else stays inside the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSpec {
    /// Fully qualified `name-version` of the module.
    pub qualified_name: String,
    /// Name of the repository the module resolved from.
    pub repository: String,
    /// Location of the module within its repository.
    pub location: String,
}

/// Whether localization may replace an existing locally cached module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalizePolicy {
    /// Keep any existing local copy. Safe under concurrent localization
    /// of the same module by multiple workers.
    #[default]
    NeverOverwrite,
    /// Replace the local copy unconditionally.
    Overwrite,
}

/// Options controlling one activation cycle.
#[derive(Debug, Clone, Default)]
pub struct ActivateOptions {
    /// Proceed with the resolved subset when some requirements are
    /// missing, rather than failing the activation.
    pub ignore_missing: bool,
    /// Localization overwrite policy.
    pub localize: LocalizePolicy,
}

/// Progress callbacks fed by the resolution library during resolve and
/// localize. Implementations are passed explicitly into [`activate`].
pub trait ProgressReporter {
    fn on_resolve_start(&mut self, _requirements: &[String]) {}
    fn on_requirement_resolved(&mut self, _requirement: &str, _spec: &ModuleSpec) {}
    fn on_resolve_end(&mut self, _resolved: &[ModuleSpec], _unresolved: &[String]) {}
    fn on_localize_start(&mut self, _specs: &[ModuleSpec]) {}
    fn on_progress(&mut self, _label: &str, _spec: &ModuleSpec) {}
}

/// Reporter that discards all progress events.
#[derive(Debug, Default)]
pub struct NullReporter;

impl ProgressReporter for NullReporter {}

/// Reporter that renders progress as log lines tagged with the job id,
/// so one job's resolution trace can be grepped out of a worker log.
#[derive(Debug)]
pub struct LogReporter {
    job_id: String,
}

impl LogReporter {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
        }
    }
}

impl ProgressReporter for LogReporter {
    fn on_resolve_start(&mut self, requirements: &[String]) {
        tracing::info!(job_id = %self.job_id, count = requirements.len(), "resolving requirements");
    }

    fn on_requirement_resolved(&mut self, _requirement: &str, spec: &ModuleSpec) {
        tracing::info!(
            job_id = %self.job_id,
            module = %spec.qualified_name,
            location = %spec.location,
            "resolved"
        );
    }

    fn on_resolve_end(&mut self, _resolved: &[ModuleSpec], unresolved: &[String]) {
        if !unresolved.is_empty() {
            tracing::warn!(
                job_id = %self.job_id,
                unresolved = %unresolved.join(", "),
                "failed to resolve requirements"
            );
        }
    }

    fn on_localize_start(&mut self, specs: &[ModuleSpec]) {
        tracing::info!(job_id = %self.job_id, count = specs.len(), "localizing modules");
    }

    fn on_progress(&mut self, label: &str, spec: &ModuleSpec) {
        let label_lower = label.to_lowercase();
        if label_lower.contains("download") {
            tracing::info!(
                job_id = %self.job_id,
                module = %spec.qualified_name,
                repository = %spec.repository,
                "downloading module"
            );
        } else if label_lower.contains("upload") {
            tracing::info!(
                job_id = %self.job_id,
                module = %spec.qualified_name,
                repository = %spec.repository,
                "uploading module"
            );
        } else {
            tracing::info!(job_id = %self.job_id, module = %spec.qualified_name, "{label}");
        }
    }
}

/// The external environment-resolution library.
///
/// Implementations report progress through the supplied reporter and
/// surface unresolved requirements or localization I/O failures as
/// [`crate::Error::Resolution`].
pub trait ModuleResolver {
    /// Resolve requirement strings to concrete module specifications.
    /// With `ignore_missing`, unresolved requirements are dropped instead
    /// of failing the call.
    fn resolve(
        &self,
        requirements: &[String],
        ignore_missing: bool,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<Vec<ModuleSpec>>;

    /// Ensure each resolved module's files are available locally.
    fn localize(
        &self,
        specs: &[ModuleSpec],
        policy: LocalizePolicy,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<Vec<ModuleSpec>>;

    /// Compose the localized modules' declared environment contributions
    /// into one mapping.
    fn combine(&self, specs: &[ModuleSpec]) -> Result<EnvMapping>;
}

/// Resolve, localize, and compose a requirement list into a single
/// environment mapping.
///
/// Library failures propagate and abort the activation; the job then
/// proceeds without the requested environment. With
/// [`ActivateOptions::ignore_missing`] the resolved subset is used
/// instead.
pub fn activate(
    resolver: &dyn ModuleResolver,
    requirements: &[String],
    options: &ActivateOptions,
    reporter: &mut dyn ProgressReporter,
) -> Result<EnvMapping> {
    let resolved = resolver.resolve(requirements, options.ignore_missing, reporter)?;
    let localized = resolver.localize(&resolved, options.localize, reporter)?;
    resolver.combine(&localized)
}
