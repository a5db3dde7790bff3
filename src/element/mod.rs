// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Auditable Elements
 * Link, form and cookie variants composing an input set, each with a
 * stable order-independent identity for cross-response deduplication
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::inputs::InputSet;

mod cookie;
mod form;
mod link;

pub use cookie::Cookie;
pub use form::Form;
pub use link::Link;

/// The element variants the trainer discovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Link,
    Form,
    Cookie,
}

impl ElementKind {
    pub fn tag(&self) -> &'static str {
        match self {
            ElementKind::Link => "link",
            ElementKind::Form => "form",
            ElementKind::Cookie => "cookie",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Order-independent fingerprint over a tag and a key-sorted mapping.
///
/// Every component is length-framed before hashing so adjacent strings
/// cannot collide by concatenation. The digest is truncated to 64 bits;
/// SHA-256 keeps it stable across processes, which a swappable or
/// distributed element store depends on.
pub fn fingerprint(tag: &str, inputs: &BTreeMap<String, String>) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update((tag.len() as u64).to_le_bytes());
    hasher.update(tag.as_bytes());
    for (name, value) in inputs {
        hasher.update((name.len() as u64).to_le_bytes());
        hasher.update(name.as_bytes());
        hasher.update((value.len() as u64).to_le_bytes());
        hasher.update(value.as_bytes());
    }
    let digest = hasher.finalize();
    let mut word = [0u8; 8];
    word.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(word)
}

/// A discovered unit of attack surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    Link(Link),
    Form(Form),
    Cookie(Cookie),
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Link(_) => ElementKind::Link,
            Element::Form(_) => ElementKind::Form,
            Element::Cookie(_) => ElementKind::Cookie,
        }
    }

    pub fn identity(&self) -> u64 {
        match self {
            Element::Link(link) => link.identity(),
            Element::Form(form) => form.identity(),
            Element::Cookie(cookie) => cookie.identity(),
        }
    }

    /// The URL the element was observed on.
    pub fn url(&self) -> &str {
        match self {
            Element::Link(link) => &link.url,
            Element::Form(form) => &form.url,
            Element::Cookie(cookie) => &cookie.url,
        }
    }

    pub fn inputs(&self) -> &InputSet {
        match self {
            Element::Link(link) => link.inputs(),
            Element::Form(form) => form.inputs(),
            Element::Cookie(cookie) => cookie.inputs(),
        }
    }

    pub fn inputs_mut(&mut self) -> &mut InputSet {
        match self {
            Element::Link(link) => link.inputs_mut(),
            Element::Form(form) => form.inputs_mut(),
            Element::Cookie(cookie) => cookie.inputs_mut(),
        }
    }
}

impl From<Link> for Element {
    fn from(link: Link) -> Self {
        Element::Link(link)
    }
}

impl From<Form> for Element {
    fn from(form: Form) -> Self {
        Element::Form(form)
    }
}

impl From<Cookie> for Element {
    fn from(cookie: Cookie) -> Self {
        Element::Cookie(cookie)
    }
}
