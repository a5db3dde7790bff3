// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Trainer
 * Analyzes completed HTTP responses looking for new auditable elements
 * and merges them into the running page models
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::analyzer::{Analyzer, LinkRecord};
use crate::config::TrainerConfig;
use crate::element::{Cookie, Form, Link};
use crate::element_index::ElementIndex;
use crate::page::{Page, PageHandle};
use crate::response::HttpResponse;
use crate::scope::ScopePolicy;
use crate::url_utils;

/// What a single `add_response` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainOutcome {
    /// New elements were merged into the page model.
    Trained,
    /// The response was in scope but brought nothing new.
    Unchanged,
    /// The response, or its redirect target, is outside crawl scope.
    OutOfScope,
    /// A URL did not parse; the page keeps its last good state.
    InvalidUrl,
}

/// Per-crawl-session trainer.
///
/// Owns one page model per logical page URL, created lazily on the first
/// in-scope response. Scope policy, analyzer and element index are
/// injected; the index is the only state shared across pages, so distinct
/// pages train fully in parallel.
pub struct Trainer {
    scope: Arc<dyn ScopePolicy>,
    analyzer: Arc<dyn Analyzer>,
    index: Arc<dyn ElementIndex>,
    config: TrainerConfig,
    pages: RwLock<HashMap<String, Arc<PageHandle>>>,
}

impl Trainer {
    pub fn new(
        scope: Arc<dyn ScopePolicy>,
        analyzer: Arc<dyn Analyzer>,
        index: Arc<dyn ElementIndex>,
        config: TrainerConfig,
    ) -> Self {
        Self {
            scope,
            analyzer,
            index,
            config,
            pages: RwLock::new(HashMap::new()),
        }
    }

    /// Analyzes one completed response for new auditable elements.
    ///
    /// `redirect` carries the redirect target URL when the transport was
    /// forced to redirect; the target is scope-checked and becomes the
    /// link-extraction base.
    pub fn add_response(&self, res: &HttpResponse, redirect: Option<&str>) -> TrainOutcome {
        if !self.scope.follow(&res.effective_url) {
            debug!(url = %res.effective_url, "response out of scope");
            return TrainOutcome::OutOfScope;
        }
        if let Some(target) = redirect {
            // A Location header may be relative; resolve it before the
            // scope check.
            match url_utils::merge_url(&res.effective_url, target) {
                Ok(absolute) if self.scope.follow(&absolute) => {}
                Ok(absolute) => {
                    debug!(url = %absolute, "redirect target out of scope");
                    return TrainOutcome::OutOfScope;
                }
                Err(err) => {
                    warn!(url = %target, %err, "unresolvable redirect target, response skipped");
                    return TrainOutcome::InvalidUrl;
                }
            }
        }

        let key = match url_utils::page_key(&res.effective_url) {
            Ok(key) => key,
            Err(err) => {
                warn!(url = %res.effective_url, %err, "unparsable effective URL, response skipped");
                return TrainOutcome::InvalidUrl;
            }
        };

        let handle = self.page_slot(&key, &res.effective_url);
        handle.with(|page| self.analyze(page, res, redirect))
    }

    /// The page model a URL belongs to, if one has been created.
    pub fn page(&self, url: &str) -> Option<Arc<PageHandle>> {
        let key = url_utils::page_key(url).ok()?;
        self.pages.read().get(&key).map(Arc::clone)
    }

    /// All page models created this session.
    pub fn handles(&self) -> Vec<Arc<PageHandle>> {
        self.pages.read().values().map(Arc::clone).collect()
    }

    pub fn index(&self) -> &Arc<dyn ElementIndex> {
        &self.index
    }

    fn page_slot(&self, key: &str, url: &str) -> Arc<PageHandle> {
        if let Some(handle) = self.pages.read().get(key) {
            return Arc::clone(handle);
        }
        let mut pages = self.pages.write();
        Arc::clone(pages.entry(key.to_string()).or_insert_with(|| {
            debug!(%url, "page model created");
            Arc::new(PageHandle::new(Page::new(url)))
        }))
    }

    /// The per-response training pass. Runs under the page's lock; the
    /// step order matches the convergence contract: cookies first, then
    /// the body-equality gate, then forms and links.
    fn analyze(&self, page: &mut Page, res: &HttpResponse, redirect: Option<&str>) -> TrainOutcome {
        debug!(request_id = res.request_id, url = %res.effective_url, "training started");

        // Resolve every URL before touching the page so a malformed one
        // cannot leave it half-mutated.
        let merged_url = match page.merge_redirect_url(&res.effective_url) {
            Ok(url) => url,
            Err(err) => {
                warn!(url = %res.effective_url, %err, "URL merge failed, response skipped");
                return TrainOutcome::InvalidUrl;
            }
        };
        let link_base = if let Some(target) = redirect {
            match url_utils::merge_url(&page.url, target) {
                Ok(base) => Some(base),
                Err(err) => {
                    warn!(url = %target, %err, "redirect target merge failed, response skipped");
                    return TrainOutcome::InvalidUrl;
                }
            }
        } else {
            None
        };

        let new_cookies = self.train_cookies(res);
        let cookie_count = new_cookies.len();
        let cookies_changed = page.apply_cookies(new_cookies);
        if cookies_changed {
            debug!(count = cookie_count, "new cookies found");
        }

        // No cookie news and an identical body mean the page cannot have
        // changed; skip the parse entirely.
        if res.body == page.html && !cookies_changed {
            debug!("page unchanged, skipping body analysis");
            return TrainOutcome::Unchanged;
        }

        let mut changed = cookies_changed;

        if self.config.audit_forms {
            let new_forms = self.train_forms(res);
            let count = new_forms.len();
            if page.apply_forms(new_forms) {
                changed = true;
                debug!(count, "new forms found");
            }
        }

        if self.config.audit_links {
            let new_links = self.train_links(res, link_base.as_deref());
            let count = new_links.len();
            if page.apply_links(new_links) {
                changed = true;
                debug!(count, "new links found");
            }
        }

        if changed {
            page.refresh(&res.body, merged_url, res.request_headers.clone());
            info!(
                url = %page.url,
                cookies = page.elements.cookies.len(),
                forms = page.elements.forms.len(),
                links = page.elements.links.len(),
                "page model updated"
            );
            TrainOutcome::Trained
        } else {
            debug!("training complete, nothing new");
            TrainOutcome::Unchanged
        }
    }

    fn train_cookies(&self, res: &HttpResponse) -> Vec<Cookie> {
        let header = res.header("set-cookie").unwrap_or_default();
        if header.is_empty() {
            return Vec::new();
        }

        let mut survivors = Vec::new();
        for record in self.analyzer.cookies(&header) {
            let cookie = match Cookie::new(&res.effective_url, record.name, record.value) {
                Ok(cookie) => cookie.with_attributes(
                    record.domain,
                    record.path,
                    record.secure,
                    record.http_only,
                ),
                Err(err) => {
                    debug!(input = err.input_name(), "cookie rejected by input validation");
                    continue;
                }
            };
            if self.index.observe(cookie.identity()) {
                survivors.push(cookie);
            }
        }
        survivors
    }

    fn train_forms(&self, res: &HttpResponse) -> Vec<Form> {
        let mut survivors = Vec::new();
        for record in self.analyzer.forms(&res.body, &res.effective_url) {
            let fields = record.fields.into_iter().map(|f| (f.name, f.value));
            let form = match Form::new(&res.effective_url, &record.action, &record.method, fields) {
                Ok(form) => form,
                Err(err) => {
                    debug!(input = err.input_name(), "form rejected by input validation");
                    continue;
                }
            };
            if self.index.observe(form.identity()) {
                survivors.push(form);
            }
        }
        survivors
    }

    fn train_links(&self, res: &HttpResponse, redirect_base: Option<&str>) -> Vec<Link> {
        let base = redirect_base.unwrap_or(&res.effective_url);
        let mut records = self.analyzer.links(&res.body, base);

        if redirect_base.is_some() {
            // The redirect target itself is an auditable link.
            records.push(LinkRecord {
                href: base.to_string(),
                vars: self.analyzer.link_vars(base),
            });
        }

        let mut survivors = Vec::new();
        for record in records {
            let link = match Link::new(&res.effective_url, &record.href, record.vars) {
                Ok(link) => link,
                Err(err) => {
                    debug!(input = err.input_name(), "link rejected by input validation");
                    continue;
                }
            };
            if self.index.observe(link.identity()) {
                survivors.push(link);
            }
        }
        survivors
    }
}
