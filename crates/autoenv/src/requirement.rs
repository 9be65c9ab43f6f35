// Copyright (c) Contributors to the autoenv project.
// SPDX-License-Identifier: Apache-2.0

//! Requirement parsing and version-conflict combination.
//!
//! Requirements are opaque strings except for the name/version split used
//! to resolve duplicates: `"maya-2024.2"` splits into name `maya` and
//! version `2024.2`, while path-style requirements and bare names carry
//! no version.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

#[cfg(test)]
#[path = "./requirement_test.rs"]
mod requirement_test;

use crate::{Error, Result};

/// A parsed requirement: the original string plus its name/version split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// The requirement exactly as discovered.
    pub raw: String,
    /// Name portion used for duplicate grouping.
    pub name: String,
    /// Version portion, when the requirement carries one.
    pub version: Option<Version>,
}

impl Requirement {
    /// Parse a requirement string into name and optional version.
    ///
    /// The split point is the last `-` whose suffix begins with a digit.
    /// Requirements containing a path separator are treated as path-style
    /// and never split.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Error::InvalidRequirement(raw.to_string()));
        }

        if raw.contains('/') || raw.contains('\\') {
            return Ok(Self {
                raw: raw.to_string(),
                name: raw.to_string(),
                version: None,
            });
        }

        let split = raw.rmatch_indices('-').find_map(|(idx, _)| {
            let suffix = &raw[idx + 1..];
            suffix
                .chars()
                .next()
                .filter(char::is_ascii_digit)
                .map(|_| idx)
        });

        let (name, version) = match split {
            Some(idx) => (&raw[..idx], Some(Version::parse(&raw[idx + 1..]))),
            None => (raw, None),
        };

        if name.is_empty() {
            return Err(Error::InvalidRequirement(raw.to_string()));
        }

        Ok(Self {
            raw: raw.to_string(),
            name: name.to_string(),
            version,
        })
    }
}

/// A dotted version with numeric components ordered numerically and
/// alphanumeric components ordered lexically after all numerics.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    parts: Vec<VersionPart>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum VersionPart {
    Number(u64),
    Alpha(String),
}

impl Version {
    /// Parse a dotted version string. Components that are not plain
    /// integers are kept as alphanumeric text, so parsing never fails.
    pub fn parse(text: &str) -> Self {
        let parts = text
            .split('.')
            .map(|part| match part.parse::<u64>() {
                Ok(n) => VersionPart::Number(n),
                Err(_) => VersionPart::Alpha(part.to_string()),
            })
            .collect();
        Self { parts }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match part {
                VersionPart::Number(n) => write!(f, "{n}")?,
                VersionPart::Alpha(s) => f.write_str(s)?,
            }
        }
        Ok(())
    }
}

/// Merge two requirement lists, keeping one entry per distinct name.
///
/// Where both lists name the same target, the higher version survives.
/// When a pair cannot be compared (either side has no version), the entry
/// from `b` wins over `a` so forced or explicit requirements override.
///
/// Degraded mode: if any requirement fails to parse, the lists are
/// concatenated with duplicates left intact. A conflict-detection failure
/// must never block environment setup.
pub fn combine(a: &[String], b: &[String]) -> Vec<String> {
    let parsed: Result<Vec<(Requirement, bool)>> = a
        .iter()
        .map(|raw| Requirement::parse(raw).map(|req| (req, false)))
        .chain(b.iter().map(|raw| Requirement::parse(raw).map(|req| (req, true))))
        .collect();

    let parsed = match parsed {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::warn!(
                error = %err,
                "failed to parse requirements, concatenating without conflict resolution"
            );
            return a.iter().chain(b.iter()).cloned().collect();
        }
    };

    // Winner per name, with first-appearance order preserved for output.
    let mut order: Vec<String> = Vec::new();
    let mut winners: HashMap<String, (Requirement, bool)> = HashMap::new();

    for (challenger, from_b) in parsed {
        match winners.entry(challenger.name.clone()) {
            Entry::Vacant(slot) => {
                order.push(challenger.name.clone());
                slot.insert((challenger, from_b));
            }
            Entry::Occupied(mut slot) => {
                let (incumbent, incumbent_from_b) = slot.get();
                if challenger_wins(incumbent, *incumbent_from_b, &challenger, from_b) {
                    slot.insert((challenger, from_b));
                }
            }
        }
    }

    order
        .iter()
        .map(|name| winners[name].0.raw.clone())
        .collect()
}

fn challenger_wins(
    incumbent: &Requirement,
    incumbent_from_b: bool,
    challenger: &Requirement,
    challenger_from_b: bool,
) -> bool {
    match (&incumbent.version, &challenger.version) {
        (Some(iv), Some(cv)) => match cv.cmp(iv) {
            Ordering::Greater => true,
            Ordering::Equal => challenger_from_b && !incumbent_from_b,
            Ordering::Less => false,
        },
        // Comparison undefined: the explicit/forced side (b) wins.
        _ => challenger_from_b && !incumbent_from_b,
    }
}
