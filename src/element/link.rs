// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{fingerprint, ElementKind};
use crate::errors::InputResult;
use crate::inputs::{InputRules, InputSet};

/// A discovered anchor, its query variables exposed as auditable inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// URL of the page the link was observed on.
    pub url: String,
    /// Absolute target of the anchor.
    pub href: String,
    inputs: InputSet,
}

impl Link {
    pub fn new(url: &str, href: &str, vars: BTreeMap<String, String>) -> InputResult<Self> {
        Ok(Self {
            url: url.to_string(),
            href: href.to_string(),
            inputs: InputSet::new(InputRules::Query, vars)?,
        })
    }

    pub fn inputs(&self) -> &InputSet {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut InputSet {
        &mut self.inputs
    }

    pub fn identity(&self) -> u64 {
        fingerprint(ElementKind::Link.tag(), self.inputs.inputs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_stable_across_var_order() {
        let forward: BTreeMap<String, String> =
            [("a".into(), "1".into()), ("b".into(), "2".into())].into();
        let reverse: BTreeMap<String, String> =
            [("b".into(), "2".into()), ("a".into(), "1".into())].into();

        let one = Link::new("http://a.test/", "http://a.test/p?a=1&b=2", forward).unwrap();
        let two = Link::new("http://a.test/", "http://a.test/p?b=2&a=1", reverse).unwrap();
        assert_eq!(one.identity(), two.identity());
    }
}
