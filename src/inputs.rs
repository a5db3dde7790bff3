// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Element Input Sets
 * Named-value mappings with frozen defaults, validated mutation and
 * change tracking; the capability every auditable element embeds
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::element::fingerprint;
use crate::errors::{InputError, InputResult};

/// Conversion target for input values.
///
/// Every stored value is a plain string; a missing value coerces to the
/// empty string so extraction code can hand over `Option`s directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputValue(String);

impl From<&str> for InputValue {
    fn from(v: &str) -> Self {
        InputValue(v.to_string())
    }
}

impl From<String> for InputValue {
    fn from(v: String) -> Self {
        InputValue(v)
    }
}

impl From<Option<String>> for InputValue {
    fn from(v: Option<String>) -> Self {
        InputValue(v.unwrap_or_default())
    }
}

impl From<Option<&str>> for InputValue {
    fn from(v: Option<&str>) -> Self {
        InputValue(v.unwrap_or_default().to_string())
    }
}

impl From<InputValue> for String {
    fn from(v: InputValue) -> String {
        v.0
    }
}

/// Validation strategy for input names and values, chosen by the element
/// variant that owns the input set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputRules {
    #[default]
    Generic,
    /// Query-string pairs: names and values must survive inside a query
    /// component unencoded.
    Query,
    /// Cookie pairs per the RFC 6265 token and value grammar.
    Cookie,
}

impl InputRules {
    pub fn valid_name(&self, name: &str) -> bool {
        if name.is_empty() || name.chars().any(char::is_control) {
            return false;
        }
        match self {
            InputRules::Generic => true,
            InputRules::Query => !name.contains(['&', '=', '#']),
            InputRules::Cookie => !name.contains([';', ',', '=', ' ', '\t']),
        }
    }

    pub fn valid_value(&self, value: &str) -> bool {
        if value.chars().any(char::is_control) {
            return false;
        }
        match self {
            InputRules::Generic => true,
            InputRules::Query => !value.contains(['&', '#']),
            InputRules::Cookie => !value.contains([';', ',']),
        }
    }
}

/// A named-value mapping with a frozen default snapshot and a mutable
/// working copy.
///
/// `default_inputs` is captured once at construction from the
/// first-observed values and never changes afterwards; `inputs` starts
/// equal to it and absorbs every validated mutation. The split is what
/// lets an audit driver perturb an element and put it back exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSet {
    inputs: BTreeMap<String, String>,
    default_inputs: BTreeMap<String, String>,
    #[serde(default)]
    rules: InputRules,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    affected_input_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    affected_input_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seed: Option<String>,
}

impl InputSet {
    /// Builds an input set from first-observed pairs, validating every
    /// name and value. The validated pairs become both the working copy
    /// and the frozen defaults.
    pub fn new<I, K, V>(rules: InputRules, pairs: I) -> InputResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<InputValue>,
    {
        let initial = Self::validated(rules, pairs)?;
        Ok(Self {
            inputs: initial.clone(),
            default_inputs: initial,
            rules,
            affected_input_name: None,
            affected_input_value: None,
            seed: None,
        })
    }

    /// Validates and stringifies a batch of pairs. Fails on the first
    /// offending pair without producing a partial result.
    fn validated<I, K, V>(rules: InputRules, pairs: I) -> InputResult<BTreeMap<String, String>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<InputValue>,
    {
        let mut out = BTreeMap::new();
        for (name, value) in pairs {
            let name = name.into();
            let value: String = value.into().into();
            if !rules.valid_name(&name) {
                return Err(InputError::InvalidName { name });
            }
            if !rules.valid_value(&value) {
                return Err(InputError::InvalidValue { name });
            }
            out.insert(name, value);
        }
        Ok(out)
    }

    /// Replaces the working copy wholesale. Defaults are not recaptured.
    pub fn set_inputs<I, K, V>(&mut self, pairs: I) -> InputResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<InputValue>,
    {
        self.inputs = Self::validated(self.rules, pairs)?;
        Ok(())
    }

    /// Merges pairs into the working copy. Returns `&mut Self` so updates
    /// can be chained.
    pub fn update<I, K, V>(&mut self, pairs: I) -> InputResult<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<InputValue>,
    {
        let validated = Self::validated(self.rules, pairs)?;
        self.inputs.extend(validated);
        Ok(self)
    }

    /// Single-pair writer.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<InputValue>) -> InputResult<()> {
        self.update([(name.into(), value.into())])?;
        Ok(())
    }

    /// Single-pair reader against the working copy.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inputs.get(name).map(String::as_str)
    }

    pub fn inputs(&self) -> &BTreeMap<String, String> {
        &self.inputs
    }

    pub fn default_inputs(&self) -> &BTreeMap<String, String> {
        &self.default_inputs
    }

    pub fn rules(&self) -> InputRules {
        self.rules
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// The entries of the working copy that differ from the defaults.
    /// Keys absent from the defaults count as changed.
    pub fn changes(&self) -> BTreeMap<String, String> {
        self.inputs
            .iter()
            .filter(|&(name, value)| self.default_inputs.get(name.as_str()) != Some(value))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    pub fn has_input(&self, name: &str) -> bool {
        self.inputs.contains_key(name)
    }

    /// Whether all of the given names are present in the working copy.
    pub fn has_inputs<I, S>(&self, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().all(|n| self.inputs.contains_key(n.as_ref()))
    }

    /// Whether all of the given names are present with exactly the given
    /// values.
    pub fn has_input_values(&self, pairs: &BTreeMap<String, String>) -> bool {
        pairs.iter().all(|(name, value)| self.inputs.get(name) == Some(value))
    }

    /// Runs a fallible mutation, reporting failure as an ordinary `false`
    /// instead of propagating. Lets callers probe applicability without
    /// error-based control flow.
    pub fn try_input<F>(&mut self, op: F) -> bool
    where
        F: FnOnce(&mut Self) -> InputResult<()>,
    {
        match op(self) {
            Ok(()) => true,
            Err(err) => {
                debug!(input = err.input_name(), "input mutation rejected");
                false
            }
        }
    }

    /// Order-independent fingerprint of the working copy. Two sets with
    /// the same names and values hash identically no matter the order
    /// they were assigned in.
    pub fn identity(&self) -> u64 {
        fingerprint("", &self.inputs)
    }

    /// Restores the post-construction state: working copy back to the
    /// defaults, fuzz bookkeeping cleared.
    pub fn reset(&mut self) {
        self.inputs = self.default_inputs.clone();
        self.affected_input_name = None;
        self.affected_input_value = None;
        self.seed = None;
    }

    pub fn affected_input_name(&self) -> Option<&str> {
        self.affected_input_name.as_deref()
    }

    pub fn affected_input_value(&self) -> Option<&str> {
        self.affected_input_value.as_deref()
    }

    /// Records which input a fuzz attempt targeted and with what value.
    pub fn set_affected_input(&mut self, name: impl Into<String>, value: impl Into<InputValue>) {
        self.affected_input_name = Some(name.into());
        self.affected_input_value = Some(value.into().into());
    }

    pub fn seed(&self) -> Option<&str> {
        self.seed.as_deref()
    }

    /// Records the payload last tried against this element.
    pub fn set_seed(&mut self, seed: impl Into<String>) {
        self.seed = Some(seed.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject() -> InputSet {
        InputSet::new(
            InputRules::Generic,
            [("input1", "value1"), ("input2", "value2")],
        )
        .unwrap()
    }

    #[test]
    fn test_none_value_coerces_to_empty_string() {
        let mut set = InputSet::new(InputRules::Generic, [("input1", None::<String>)]).unwrap();
        assert_eq!(set.get("input1"), Some(""));

        set.set("input2", None::<&str>).unwrap();
        assert_eq!(set.get("input2"), Some(""));
    }

    #[test]
    fn test_invalid_name_rejected_atomically() {
        let mut set = subject();
        let err = set
            .update([("bad\u{0}name", "x"), ("input1", "mutated")])
            .unwrap_err();
        assert_eq!(err, InputError::InvalidName { name: "bad\u{0}name".into() });
        assert_eq!(set.get("input1"), Some("value1"));
    }

    #[test]
    fn test_invalid_value_rejected_atomically() {
        let mut set = InputSet::new(InputRules::Query, [("q", "ok")]).unwrap();
        let err = set.set("q", "a&b").unwrap_err();
        assert_eq!(err, InputError::InvalidValue { name: "q".into() });
        assert_eq!(set.get("q"), Some("ok"));
    }

    #[test]
    fn test_cookie_rules_reject_separator_characters() {
        assert!(!InputRules::Cookie.valid_name("se;sion"));
        assert!(!InputRules::Cookie.valid_name("a=b"));
        assert!(!InputRules::Cookie.valid_value("x;y"));
        assert!(InputRules::Cookie.valid_name("session"));
        assert!(InputRules::Cookie.valid_value("abc123"));
    }

    #[test]
    fn test_update_chains_and_merges() {
        let mut set = subject();
        set.update([("input1", "1")])
            .unwrap()
            .update([("input2", "2")])
            .unwrap();
        assert_eq!(set.get("input1"), Some("1"));
        assert_eq!(set.get("input2"), Some("2"));
    }

    #[test]
    fn test_changes_tracks_differing_and_new_keys() {
        let mut set = subject();
        assert!(set.changes().is_empty());

        set.update([("input2", "val3")]).unwrap();
        let changes = set.changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes.get("input2").map(String::as_str), Some("val3"));

        set.update([("extra", "new")]).unwrap();
        assert!(set.changes().contains_key("extra"));
    }

    #[test]
    fn test_set_inputs_does_not_recapture_defaults() {
        let mut set = subject();
        set.set_inputs([("other", "x")]).unwrap();
        assert_eq!(set.default_inputs().get("input1").map(String::as_str), Some("value1"));
        assert_eq!(set.inputs().len(), 1);
    }

    #[test]
    fn test_reset_is_total() {
        let mut set = subject();
        set.update([("input1", "payload")]).unwrap();
        set.set_affected_input("input1", "payload");
        set.set_seed("payload");

        set.reset();

        assert_eq!(set.inputs(), set.default_inputs());
        assert_eq!(set.affected_input_name(), None);
        assert_eq!(set.affected_input_value(), None);
        assert_eq!(set.seed(), None);
    }

    #[test]
    fn test_has_inputs_by_name_and_value() {
        let set = subject();
        assert!(set.has_input("input1"));
        assert!(!set.has_input("missing"));
        assert!(set.has_inputs(["input1", "input2"]));
        assert!(!set.has_inputs(["input1", "missing"]));

        let exact: BTreeMap<String, String> =
            [("input1".to_string(), "value1".to_string())].into();
        assert!(set.has_input_values(&exact));

        let wrong: BTreeMap<String, String> =
            [("input1".to_string(), "value1 x".to_string())].into();
        assert!(!set.has_input_values(&wrong));
    }

    #[test]
    fn test_try_input_reports_failure_without_propagating() {
        let mut set = InputSet::new(InputRules::Query, [("q", "v")]).unwrap();
        assert!(set.try_input(|s| s.set("q", "fine")));
        assert!(!set.try_input(|s| s.set("q", "a&b")));
        assert_eq!(set.get("q"), Some("fine"));
    }

    #[test]
    fn test_identity_ignores_insertion_order() {
        let mut a = InputSet::new(InputRules::Generic, [("a", "1")]).unwrap();
        a.update([("b", "2")]).unwrap();
        let mut b = InputSet::new(InputRules::Generic, [("b", "2")]).unwrap();
        b.update([("a", "1")]).unwrap();
        assert_eq!(a.identity(), b.identity());
    }

    #[test]
    fn test_identity_sensitive_to_names_and_values() {
        let base = InputSet::new(InputRules::Generic, [("a", "1")]).unwrap();
        let other_value = InputSet::new(InputRules::Generic, [("a", "2")]).unwrap();
        let other_name = InputSet::new(InputRules::Generic, [("b", "1")]).unwrap();
        assert_ne!(base.identity(), other_value.identity());
        assert_ne!(base.identity(), other_name.identity());
    }

    #[test]
    fn test_clone_mutates_independently() {
        let original = subject();
        let mut copy = original.clone();
        copy.set("input1", "mutated").unwrap();
        assert_eq!(original.get("input1"), Some("value1"));
        assert_eq!(copy.get("input1"), Some("mutated"));
        assert_eq!(original.default_inputs(), copy.default_inputs());
    }
}
