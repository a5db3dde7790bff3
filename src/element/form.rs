// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use serde::{Deserialize, Serialize};

use super::{fingerprint, ElementKind};
use crate::errors::InputResult;
use crate::inputs::{InputRules, InputSet};

/// A discovered form, its fields exposed as auditable inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    /// URL of the page the form was observed on.
    pub url: String,
    /// Resolved submission target.
    pub action: String,
    /// Upper-cased HTTP method, GET when the markup leaves it out.
    pub method: String,
    inputs: InputSet,
}

impl Form {
    /// Builds a form from extracted fields. Fields without a value coerce
    /// to the empty string.
    pub fn new<I>(url: &str, action: &str, method: &str, fields: I) -> InputResult<Self>
    where
        I: IntoIterator<Item = (String, Option<String>)>,
    {
        Ok(Self {
            url: url.to_string(),
            action: action.to_string(),
            method: method.to_uppercase(),
            inputs: InputSet::new(InputRules::Generic, fields)?,
        })
    }

    pub fn inputs(&self) -> &InputSet {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut InputSet {
        &mut self.inputs
    }

    pub fn identity(&self) -> u64 {
        fingerprint(ElementKind::Form.tag(), self.inputs.inputs())
    }
}
