// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Input Set Capability Tests
 * The mutation, diffing, reset and round-trip contract every auditable
 * element relies on
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::collections::BTreeMap;

use seitti::{Cookie, Element, Form, InputRules, InputSet};

fn subject() -> InputSet {
    InputSet::new(
        InputRules::Generic,
        [("input1", "value1"), ("input2", "value2")],
    )
    .unwrap()
}

#[test]
fn update_merges_and_chains() {
    let mut set = subject();

    set.update([("input1", "val1"), ("input2", "val3")]).unwrap();
    assert_eq!(set.get("input1"), Some("val1"));
    assert_eq!(set.get("input2"), Some("val3"));

    let mut chained = subject();
    chained
        .update([("input1", "1")])
        .unwrap()
        .update([("input2", "2")])
        .unwrap();
    assert_eq!(chained.get("input1"), Some("1"));
    assert_eq!(chained.get("input2"), Some("2"));
}

#[test]
fn update_converts_missing_values_to_empty_strings() {
    let mut set = subject();
    set.update([("input1", None::<String>)]).unwrap();
    assert_eq!(set.get("input1"), Some(""));
}

#[test]
fn changes_reports_exactly_what_diverged() {
    let base = subject();

    for (updates, expected_len) in [
        (vec![("input1", "val1"), ("input2", "val3")], 2usize),
        (vec![("input2", "val3")], 1),
        (vec![], 0),
    ] {
        let mut set = subject();
        set.update(updates.clone()).unwrap();

        let changes = set.changes();
        assert_eq!(changes.len(), expected_len, "updates: {updates:?}");
        for (name, value) in updates {
            if value != base.get(name).unwrap_or_default() {
                assert_eq!(changes.get(name).map(String::as_str), Some(value));
            }
        }
    }
}

#[test]
fn reset_returns_the_set_to_its_original_state() {
    let original = subject();
    let mut mutated = original.clone();

    mutated.update([("input1", "payload")]).unwrap();
    mutated.set_affected_input("input1", "payload");
    mutated.set_seed("payload");

    assert_ne!(mutated.inputs(), original.inputs());
    assert!(mutated.affected_input_name().is_some());

    mutated.reset();

    assert_eq!(mutated.inputs(), original.inputs());
    assert_eq!(mutated.affected_input_name(), None);
    assert_eq!(mutated.affected_input_value(), None);
    assert_eq!(mutated.seed(), None);
}

#[test]
fn defaults_survive_any_working_copy_mutation() {
    let mut set = subject();
    set.set_inputs([("other", "x")]).unwrap();

    let defaults = set.default_inputs().clone();
    assert_eq!(defaults.get("input1").map(String::as_str), Some("value1"));
    assert_eq!(defaults.get("input2").map(String::as_str), Some("value2"));
}

#[test]
fn try_input_turns_validation_failures_into_false() {
    let mut set = InputSet::new(InputRules::Cookie, [("session", "abc")]).unwrap();

    // Callers can probe the validators directly before mutating.
    assert!(set.rules().valid_name("session"));
    assert!(!set.rules().valid_value("a;b"));

    assert!(set.try_input(|s| s.set("session", "xyz")));
    assert!(!set.try_input(|s| s.set("session", "a;b")));
    assert_eq!(set.get("session"), Some("xyz"));
}

#[test]
fn identity_is_order_independent_and_content_sensitive() {
    let mut forward = subject();
    forward.update([("zz", "9")]).unwrap();

    let mut reverse = InputSet::new(InputRules::Generic, [("zz", "9")]).unwrap();
    reverse
        .update([("input2", "value2"), ("input1", "value1")])
        .unwrap();

    assert_eq!(forward.identity(), reverse.identity());

    let mut perturbed = forward.clone();
    perturbed.set("zz", "8").unwrap();
    assert_ne!(forward.identity(), perturbed.identity());
}

#[test]
fn serde_round_trip_is_behaviorally_indistinguishable() {
    let mut set = subject();
    set.update([("input2", "val3")]).unwrap();

    let json = serde_json::to_string(&set).unwrap();
    let restored: InputSet = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, set);
    assert_eq!(restored.identity(), set.identity());
    assert_eq!(restored.changes(), set.changes());
    assert_eq!(restored.inputs(), set.inputs());
    assert_eq!(restored.default_inputs(), set.default_inputs());
}

#[test]
fn element_round_trip_preserves_identity_and_defaults() {
    let form = Form::new(
        "http://a.test/page",
        "http://a.test/submit",
        "post",
        [
            ("user".to_string(), Some("admin".to_string())),
            ("token".to_string(), None),
        ],
    )
    .unwrap();
    let element = Element::from(form);

    let json = serde_json::to_string(&element).unwrap();
    let restored: Element = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, element);
    assert_eq!(restored.identity(), element.identity());
    assert_eq!(restored.inputs().default_inputs(), element.inputs().default_inputs());

    let mut fuzzed = restored.clone();
    fuzzed.inputs_mut().set("user", "payload").unwrap();
    assert_ne!(fuzzed.identity(), element.identity());
}

#[test]
fn fuzzed_then_reset_element_dedups_to_its_original_identity() {
    let cookie = Cookie::new("http://a.test/", "session", "abc").unwrap();
    let original_identity = cookie.identity();

    let mut fuzzed = cookie.clone();
    fuzzed.inputs_mut().set("session", "' OR 1=1--").unwrap();
    fuzzed.inputs_mut().set_seed("' OR 1=1--");
    assert_ne!(fuzzed.identity(), original_identity);

    fuzzed.inputs_mut().reset();
    assert_eq!(fuzzed.identity(), original_identity);

    let expected: BTreeMap<String, String> = BTreeMap::new();
    assert_eq!(fuzzed.inputs().changes(), expected);
}
