// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Crawl Scope Policy
 * Decides which URLs are eligible for training: domain/subdomain
 * anchoring plus include/exclude pattern lists
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

fn default_true() -> bool {
    true
}

/// Scope rules for one crawl target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeConfig {
    /// Root URL of the crawl target; its host anchors the domain check.
    pub target: String,

    #[serde(default = "default_true")]
    pub allow_subdomains: bool,

    /// When non-empty, only URLs matching at least one pattern are in
    /// scope.
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// URLs matching any pattern are out of scope, regardless of the
    /// include list.
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

/// The three predicates the trainer vetoes a response on.
pub trait ScopePolicy: Send + Sync {
    fn excluded(&self, url: &str) -> bool;

    fn included(&self, url: &str) -> bool;

    fn in_domain(&self, url: &Url) -> bool;

    /// Whether a URL is eligible for training. Unparsable URLs are not.
    fn follow(&self, url: &str) -> bool {
        if self.excluded(url) || !self.included(url) {
            return false;
        }
        match Url::parse(url) {
            Ok(parsed) => self.in_domain(&parsed),
            Err(_) => false,
        }
    }
}

/// Scope policy compiled from a [`ScopeConfig`].
pub struct CrawlScope {
    host: String,
    allow_subdomains: bool,
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl CrawlScope {
    pub fn new(config: &ScopeConfig) -> Result<Self> {
        let target = Url::parse(&config.target)
            .with_context(|| format!("invalid scope target {}", config.target))?;
        let host = target
            .host_str()
            .context("scope target has no host")?
            .to_string();

        Ok(Self {
            host,
            allow_subdomains: config.allow_subdomains,
            include: Self::compile(&config.include_patterns)?,
            exclude: Self::compile(&config.exclude_patterns)?,
        })
    }

    fn compile(patterns: &[String]) -> Result<Vec<Regex>> {
        patterns
            .iter()
            .map(|p| Regex::new(p).with_context(|| format!("invalid scope pattern {p:?}")))
            .collect()
    }
}

impl ScopePolicy for CrawlScope {
    fn excluded(&self, url: &str) -> bool {
        self.exclude.iter().any(|re| re.is_match(url))
    }

    fn included(&self, url: &str) -> bool {
        self.include.is_empty() || self.include.iter().any(|re| re.is_match(url))
    }

    fn in_domain(&self, url: &Url) -> bool {
        match url.host_str() {
            Some(host) if host == self.host => true,
            Some(host) if self.allow_subdomains => host
                .strip_suffix(self.host.as_str())
                .is_some_and(|prefix| prefix.ends_with('.')),
            _ => false,
        }
    }
}
