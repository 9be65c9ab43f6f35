// Copyright (c) Contributors to the autoenv project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use super::*;

fn mapping(pairs: &[(&str, &str)]) -> EnvMapping {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[rstest]
fn test_to_mapping_basic() {
    let m = to_mapping("A=1:B=2/path", ':');
    assert_eq!(m, mapping(&[("A", "1"), ("B", "2/path")]));
}

#[rstest]
fn test_to_mapping_drops_empty_segments() {
    let m = to_mapping(":A=1::B=2:", ':');
    assert_eq!(m.len(), 2);
}

#[rstest]
fn test_to_mapping_empty_input() {
    assert!(to_mapping("", ':').is_empty());
}

#[rstest]
fn test_round_trip() {
    let m = mapping(&[("A", "1"), ("B", "two"), ("C", "3")]);
    assert_eq!(to_mapping(&to_delimited(&m, ';'), ';'), m);
}

#[rstest]
fn test_merge_disjoint_is_union() {
    let base = mapping(&[("A", "1")]);
    let over = mapping(&[("B", "2")]);
    assert_eq!(merge(&base, &over), mapping(&[("A", "1"), ("B", "2")]));
}

#[rstest]
fn test_merge_override_wins() {
    let base = mapping(&[("A", "old"), ("B", "keep")]);
    let over = mapping(&[("A", "new")]);
    let merged = merge(&base, &over);
    assert_eq!(merged.get("A").unwrap(), "new");
    assert_eq!(merged.get("B").unwrap(), "keep");
}

#[rstest]
fn test_expand_from_mapping() {
    let m = mapping(&[("A", "1"), ("B", "${A}/2")]);
    let expanded = expand(&m);
    assert_eq!(expanded.get("B").unwrap(), "1/2");
}

#[rstest]
fn test_expand_percent_syntax() {
    let m = mapping(&[("ROOT", "/mnt/tools"), ("BIN", "%ROOT%/bin")]);
    assert_eq!(expand(&m).get("BIN").unwrap(), "/mnt/tools/bin");
}

#[rstest]
fn test_expand_unresolved_left_literal() {
    let m = mapping(&[("B", "${AUTOENV_NO_SUCH_VAR_12345}/2")]);
    let expanded = expand(&m);
    assert_eq!(expanded.get("B").unwrap(), "${AUTOENV_NO_SUCH_VAR_12345}/2");
}

#[rstest]
fn test_expand_idempotent_when_unresolvable() {
    let m = mapping(&[("B", "${AUTOENV_NO_SUCH_VAR_12345}")]);
    assert_eq!(expand(&expand(&m)), expand(&m));
}

#[rstest]
fn test_expand_single_pass_on_circular_reference() {
    // A and B reference each other; one pass substitutes each once and
    // never re-expands the substituted text.
    let m = mapping(&[("A", "${B}"), ("B", "${A}")]);
    let expanded = expand(&m);
    assert_eq!(expanded.get("A").unwrap(), "${A}");
    assert_eq!(expanded.get("B").unwrap(), "${B}");
}

#[rstest]
fn test_expand_falls_back_to_process_env() {
    // PATH is defined in any reasonable test environment.
    let m = mapping(&[("COPY", "${PATH}")]);
    let expanded = expand(&m);
    assert_eq!(expanded.get("COPY").unwrap(), &std::env::var("PATH").unwrap());
}
