// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use serde::{Deserialize, Serialize};

use super::{fingerprint, ElementKind};
use crate::errors::InputResult;
use crate::inputs::{InputRules, InputSet, InputValue};

/// A discovered cookie, its single name-value pair exposed as an
/// auditable input. Set-Cookie attributes are carried for the audit
/// driver but stay out of the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    /// URL of the response the cookie arrived on.
    pub url: String,
    pub domain: Option<String>,
    pub path: Option<String>,
    pub secure: bool,
    pub http_only: bool,
    inputs: InputSet,
}

impl Cookie {
    pub fn new(url: &str, name: impl Into<String>, value: impl Into<InputValue>) -> InputResult<Self> {
        Ok(Self {
            url: url.to_string(),
            domain: None,
            path: None,
            secure: false,
            http_only: false,
            inputs: InputSet::new(InputRules::Cookie, [(name.into(), value.into())])?,
        })
    }

    pub fn with_attributes(
        mut self,
        domain: Option<String>,
        path: Option<String>,
        secure: bool,
        http_only: bool,
    ) -> Self {
        self.domain = domain;
        self.path = path;
        self.secure = secure;
        self.http_only = http_only;
        self
    }

    pub fn name(&self) -> &str {
        self.inputs
            .inputs()
            .keys()
            .next()
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn value(&self) -> &str {
        self.inputs
            .inputs()
            .values()
            .next()
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn inputs(&self) -> &InputSet {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut InputSet {
        &mut self.inputs
    }

    pub fn identity(&self) -> u64 {
        fingerprint(ElementKind::Cookie.tag(), self.inputs.inputs())
    }
}
