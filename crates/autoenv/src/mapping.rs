// Copyright (c) Contributors to the autoenv project.
// SPDX-License-Identifier: Apache-2.0

//! Environment dictionary conversion, merging, and variable expansion.

use std::borrow::Cow;
use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

#[cfg(test)]
#[path = "./mapping_test.rs"]
mod mapping_test;

/// An environment variable mapping. Keys are case-sensitive; ordered so
/// composition output is deterministic.
pub type EnvMapping = BTreeMap<String, String>;

/// Matches `${NAME}` and `%NAME%` variable references.
static VAR_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}|%([A-Za-z_][A-Za-z0-9_]*)%")
        .expect("variable reference pattern is valid")
});

/// Split a delimited `KEY=VALUE` string into a mapping.
///
/// Empty segments and segments without `=` are dropped.
pub fn to_mapping(delimited: &str, sep: char) -> EnvMapping {
    delimited
        .split(sep)
        .filter(|segment| !segment.is_empty())
        .filter_map(|segment| {
            segment
                .split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
        })
        .collect()
}

/// Join a mapping back into a `sep`-delimited `KEY=VALUE` string.
pub fn to_delimited(mapping: &EnvMapping, sep: char) -> String {
    let mut out = String::new();
    for (key, value) in mapping {
        if !out.is_empty() {
            out.push(sep);
        }
        out.push_str(key);
        out.push('=');
        out.push_str(value);
    }
    out
}

/// Key-wise union of two mappings. Where both define a key, `overrides`
/// wins: pass the currently-set environment as `base` and the newly
/// resolved module environment as `overrides`.
pub fn merge(base: &EnvMapping, overrides: &EnvMapping) -> EnvMapping {
    let mut merged = base.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Expand `${NAME}` and `%NAME%` references in every value.
///
/// References are looked up in `mapping` itself first, then the ambient
/// process environment. Unresolved references are left as literal text.
/// Expansion is single-pass: substituted text is never re-expanded, so
/// circular references cannot loop.
pub fn expand(mapping: &EnvMapping) -> EnvMapping {
    mapping
        .iter()
        .map(|(key, value)| (key.clone(), expand_value(value, mapping).into_owned()))
        .collect()
}

fn expand_value<'a>(value: &'a str, mapping: &EnvMapping) -> Cow<'a, str> {
    VAR_REF.replace_all(value, |caps: &Captures| {
        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or_default();
        match mapping.get(name) {
            Some(found) => found.clone(),
            None => std::env::var(name).unwrap_or_else(|_| caps[0].to_string()),
        }
    })
}
