// Copyright (c) Contributors to the autoenv project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use super::*;

fn reqs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[rstest]
#[case("core-1.0", "core", Some("1.0"))]
#[case("maya-2024.2", "maya", Some("2024.2"))]
#[case("render-2.1.0-beta.1", "render", Some("2.1.0-beta.1"))]
#[case("tools", "tools", None)]
#[case("arnold-mtoa", "arnold-mtoa", None)]
fn test_parse_name_version_split(
    #[case] raw: &str,
    #[case] name: &str,
    #[case] version: Option<&str>,
) {
    let req = Requirement::parse(raw).unwrap();
    assert_eq!(req.name, name);
    assert_eq!(
        req.version.map(|v| v.to_string()),
        version.map(String::from)
    );
}

#[rstest]
fn test_parse_version_split_at_last_dash() {
    let req = Requirement::parse("houdini-20.5.370").unwrap();
    assert_eq!(req.name, "houdini");
    assert_eq!(req.version.unwrap().to_string(), "20.5.370");
}

#[rstest]
fn test_parse_path_style_has_no_version() {
    let req = Requirement::parse("/mnt/modules/maya-2024").unwrap();
    assert_eq!(req.name, "/mnt/modules/maya-2024");
    assert!(req.version.is_none());
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("-1.0")]
fn test_parse_rejects_invalid(#[case] raw: &str) {
    assert!(Requirement::parse(raw).is_err());
}

#[rstest]
fn test_version_ordering() {
    assert!(Version::parse("2.0") > Version::parse("1.9"));
    assert!(Version::parse("1.10") > Version::parse("1.9"));
    assert!(Version::parse("1.0.1") > Version::parse("1.0"));
    // Alphanumeric components order after numerics.
    assert!(Version::parse("1.rc1") > Version::parse("1.99"));
    assert_eq!(Version::parse("1.2.3"), Version::parse("1.2.3"));
}

#[rstest]
fn test_combine_highest_version_wins() {
    assert_eq!(
        combine(&reqs(&["core-1.0"]), &reqs(&["core-2.0"])),
        reqs(&["core-2.0"])
    );
    assert_eq!(
        combine(&reqs(&["core-2.0"]), &reqs(&["core-1.0"])),
        reqs(&["core-2.0"])
    );
}

#[rstest]
fn test_combine_one_entry_per_name() {
    let result = combine(
        &reqs(&["core-1.0", "render-2.1"]),
        &reqs(&["core-2.0", "nuke-14.0"]),
    );
    assert_eq!(result, reqs(&["core-2.0", "render-2.1", "nuke-14.0"]));
}

#[rstest]
fn test_combine_membership_commutative() {
    let a = reqs(&["core-1.0", "render-2.1"]);
    let b = reqs(&["core-2.0"]);

    let mut ab: Vec<String> = combine(&a, &b);
    let mut ba: Vec<String> = combine(&b, &a);
    ab.sort();
    ba.sort();
    assert_eq!(ab, ba);
}

#[rstest]
fn test_combine_b_wins_unversioned_tie() {
    // Path-style requirements have no version; the b side must win.
    let a = reqs(&["/mnt/modules/lighting"]);
    let b = reqs(&["/mnt/modules/lighting"]);
    assert_eq!(combine(&a, &b), b);

    let a = reqs(&["tools"]);
    let b = reqs(&["tools-2.0"]);
    // Unversioned vs versioned is also an undefined comparison.
    assert_eq!(combine(&a, &b), reqs(&["tools-2.0"]));
}

#[rstest]
fn test_combine_a_kept_on_unversioned_tie_within_a() {
    let a = reqs(&["tools", "tools"]);
    let result = combine(&a, &[]);
    assert_eq!(result, reqs(&["tools"]));
}

#[rstest]
fn test_combine_degrades_to_concatenation() {
    let a = reqs(&["core-1.0", ""]);
    let b = reqs(&["core-2.0"]);
    assert_eq!(combine(&a, &b), reqs(&["core-1.0", "", "core-2.0"]));
}

#[rstest]
fn test_combine_empty_sides() {
    assert!(combine(&[], &[]).is_empty());
    assert_eq!(combine(&reqs(&["core-1.0"]), &[]), reqs(&["core-1.0"]));
    assert_eq!(combine(&[], &reqs(&["core-1.0"])), reqs(&["core-1.0"]));
}
