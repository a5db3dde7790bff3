// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Page Model
 * Mutable aggregate of one logical page's discovered elements with a
 * one-shot update signal for the audit driver
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::collections::{BTreeMap, HashMap};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::element::{Cookie, Element, ElementKind, Form, Link};
use crate::url_utils;

/// The element collections of a page, one per kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageElements {
    pub cookies: Vec<Cookie>,
    pub forms: Vec<Form>,
    pub links: Vec<Link>,
}

impl PageElements {
    pub fn count(&self) -> usize {
        self.cookies.len() + self.forms.len() + self.links.len()
    }

    /// All elements of one kind as the unified enum, for consumers that
    /// iterate the page kind by kind.
    pub fn by_kind(&self, kind: ElementKind) -> Vec<Element> {
        match kind {
            ElementKind::Cookie => self.cookies.iter().cloned().map(Element::from).collect(),
            ElementKind::Form => self.forms.iter().cloned().map(Element::from).collect(),
            ElementKind::Link => self.links.iter().cloned().map(Element::from).collect(),
        }
    }
}

/// One logical page of the crawl target: canonical URL, last-seen body,
/// discovered elements and the headers of the request that produced the
/// body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub url: String,
    pub html: String,
    pub elements: PageElements,
    pub request_headers: HashMap<String, String>,
    pub query_vars: BTreeMap<String, String>,
    #[serde(skip)]
    updated: bool,
}

impl Page {
    pub fn new(url: &str) -> Self {
        Self {
            query_vars: url_utils::query_vars(url),
            url: url.to_string(),
            html: String::new(),
            elements: PageElements::default(),
            request_headers: HashMap::new(),
            updated: false,
        }
    }

    /// Replaces the cookie collection when the incoming one is non-empty.
    /// An empty result is a no-op, not a clear. Returns whether anything
    /// changed.
    pub fn apply_cookies(&mut self, new: Vec<Cookie>) -> bool {
        if new.is_empty() {
            return false;
        }
        self.elements.cookies = new;
        self.updated = true;
        true
    }

    pub fn apply_forms(&mut self, new: Vec<Form>) -> bool {
        if new.is_empty() {
            return false;
        }
        self.elements.forms = new;
        self.updated = true;
        true
    }

    pub fn apply_links(&mut self, new: Vec<Link>) -> bool {
        if new.is_empty() {
            return false;
        }
        self.elements.links = new;
        self.updated = true;
        true
    }

    /// The canonical URL this page would carry after absorbing a
    /// redirect-resolved effective URL. Pure computation so callers can
    /// validate before mutating anything.
    pub fn merge_redirect_url(&self, effective: &str) -> Result<String, url::ParseError> {
        url_utils::merge_url(&self.url, effective)
    }

    /// Replaces the page snapshot after a training round that changed any
    /// element collection.
    pub fn refresh(&mut self, html: &str, url: String, request_headers: HashMap<String, String>) {
        self.html = html.to_string();
        self.query_vars = url_utils::query_vars(&url);
        self.url = url;
        self.request_headers = request_headers;
    }

    pub fn is_updated(&self) -> bool {
        self.updated
    }

    /// Returns the page state and clears the update flag iff it was set.
    /// Each round of changes is delivered to exactly one poll.
    pub fn pop_if_updated(&mut self) -> Option<Page> {
        if self.updated {
            self.updated = false;
            Some(self.clone())
        } else {
            None
        }
    }
}

/// The mutual-exclusion domain of one page model.
///
/// Trainer mutation and consumer polls serialize on the same lock, so a
/// poll that observes the update flag and clears it can never lose a
/// concurrent apply: the apply lands after and sets the flag for the next
/// poll.
#[derive(Debug)]
pub struct PageHandle {
    inner: Mutex<Page>,
}

impl PageHandle {
    pub fn new(page: Page) -> Self {
        Self {
            inner: Mutex::new(page),
        }
    }

    /// Runs `f` with exclusive access to the page. The whole read-modify-
    /// write sequence of a training pass goes through one call.
    pub fn with<R>(&self, f: impl FnOnce(&mut Page) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn url(&self) -> String {
        self.inner.lock().url.clone()
    }

    /// The sole consumer read path; see [`Page::pop_if_updated`].
    pub fn pop_if_updated(&self) -> Option<Page> {
        self.inner.lock().pop_if_updated()
    }

    /// Current state without touching the update flag.
    pub fn snapshot(&self) -> Page {
        self.inner.lock().clone()
    }
}
