// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Response Analyzer
 * Pure extraction of candidate attack-surface records from response
 * bodies and headers
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::url_utils;

static FORM_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("form").unwrap());
static FIELD_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("input, textarea, select").unwrap());
static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// One extracted form field. A `None` value means the markup carried no
/// value attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRecord {
    pub name: String,
    pub value: Option<String>,
}

/// One extracted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRecord {
    pub action: String,
    pub method: String,
    pub fields: Vec<FieldRecord>,
}

/// One extracted anchor with its query variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub href: String,
    pub vars: BTreeMap<String, String>,
}

/// One cookie parsed from a Set-Cookie header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    pub domain: Option<String>,
    pub path: Option<String>,
    pub secure: bool,
    pub http_only: bool,
}

/// Extraction interface the trainer consumes. Every function is pure and
/// bounded-time; the trainer never hands it anything stateful.
pub trait Analyzer: Send + Sync {
    fn forms(&self, html: &str, base_url: &str) -> Vec<FormRecord>;

    fn links(&self, html: &str, base_url: &str) -> Vec<LinkRecord>;

    /// Parses a Set-Cookie header value, one cookie per line.
    fn cookies(&self, set_cookie: &str) -> Vec<CookieRecord>;

    /// Query variables of a URL; empty when it does not parse.
    fn link_vars(&self, url: &str) -> BTreeMap<String, String> {
        url_utils::query_vars(url)
    }
}

/// Scraper-backed analyzer for HTML response bodies.
#[derive(Debug, Default)]
pub struct HtmlAnalyzer;

impl HtmlAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn resolve(base: &str, relative: &str) -> Option<String> {
        if relative.starts_with("http://") || relative.starts_with("https://") {
            return Some(relative.to_string());
        }
        Url::parse(base)
            .ok()?
            .join(relative)
            .ok()
            .map(|resolved| resolved.to_string())
    }
}

impl Analyzer for HtmlAnalyzer {
    fn forms(&self, html: &str, base_url: &str) -> Vec<FormRecord> {
        let document = Html::parse_document(html);
        let mut forms = Vec::new();

        for form in document.select(&FORM_SELECTOR) {
            let raw_action = form.value().attr("action").unwrap_or("");
            let method = form.value().attr("method").unwrap_or("GET").to_uppercase();

            let mut fields = Vec::new();
            for field in form.select(&FIELD_SELECTOR) {
                // Name falls back to id; unnamed fields are not auditable.
                let name = field
                    .value()
                    .attr("name")
                    .or_else(|| field.value().attr("id"));
                if let Some(name) = name {
                    fields.push(FieldRecord {
                        name: name.to_string(),
                        value: field.value().attr("value").map(str::to_string),
                    });
                }
            }

            let action =
                Self::resolve(base_url, raw_action).unwrap_or_else(|| base_url.to_string());
            debug!(action = %action, fields = fields.len(), "form extracted");
            forms.push(FormRecord { action, method, fields });
        }

        forms
    }

    fn links(&self, html: &str, base_url: &str) -> Vec<LinkRecord> {
        let document = Html::parse_document(html);
        let mut links = Vec::new();

        for anchor in document.select(&LINK_SELECTOR) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if href.starts_with('#')
                || href.starts_with("javascript:")
                || href.starts_with("mailto:")
            {
                continue;
            }
            let Some(absolute) = Self::resolve(base_url, href) else {
                continue;
            };
            let vars = url_utils::query_vars(&absolute);
            links.push(LinkRecord { href: absolute, vars });
        }

        links
    }

    fn cookies(&self, set_cookie: &str) -> Vec<CookieRecord> {
        set_cookie.lines().filter_map(parse_set_cookie).collect()
    }
}

/// Parses one Set-Cookie header value into its pair and the attributes
/// the audit driver cares about.
fn parse_set_cookie(line: &str) -> Option<CookieRecord> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let mut parts = line.split(';');
    let (name, value) = parts.next()?.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let mut record = CookieRecord {
        name: name.to_string(),
        value: value.trim().to_string(),
        domain: None,
        path: None,
        secure: false,
        http_only: false,
    };

    for attr in parts {
        let attr = attr.trim();
        match attr.split_once('=') {
            Some((key, val)) if key.eq_ignore_ascii_case("domain") => {
                record.domain = Some(val.trim().to_string());
            }
            Some((key, val)) if key.eq_ignore_ascii_case("path") => {
                record.path = Some(val.trim().to_string());
            }
            None if attr.eq_ignore_ascii_case("secure") => record.secure = true,
            None if attr.eq_ignore_ascii_case("httponly") => record.http_only = true,
            _ => {}
        }
    }

    Some(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_extraction_resolves_action_and_fields() {
        let html = r#"
            <html><body>
                <form action="/submit" method="post">
                    <input type="text" name="username" value="" />
                    <input type="password" name="password" />
                    <textarea name="comment"></textarea>
                    <select name="country"><option value="fi">FI</option></select>
                    <input type="text" id="fallback" />
                </form>
            </body></html>
        "#;

        let forms = HtmlAnalyzer::new().forms(html, "http://a.test/page");
        assert_eq!(forms.len(), 1);

        let form = &forms[0];
        assert_eq!(form.action, "http://a.test/submit");
        assert_eq!(form.method, "POST");

        let names: Vec<&str> = form.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["username", "password", "comment", "country", "fallback"]);
        assert_eq!(form.fields[0].value.as_deref(), Some(""));
        assert_eq!(form.fields[1].value, None);
    }

    #[test]
    fn test_link_extraction_skips_fragments_and_pseudo_schemes() {
        let html = r##"
            <html><body>
                <a href="/page2?x=1">two</a>
                <a href="#section">skip</a>
                <a href="javascript:void(0)">skip</a>
                <a href="mailto:a@a.test">skip</a>
                <a href="http://other.test/abs">abs</a>
            </body></html>
        "##;

        let links = HtmlAnalyzer::new().links(html, "http://a.test/");
        let hrefs: Vec<&str> = links.iter().map(|l| l.href.as_str()).collect();
        assert_eq!(hrefs, ["http://a.test/page2?x=1", "http://other.test/abs"]);
        assert_eq!(links[0].vars.get("x").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_set_cookie_parsing_with_attributes() {
        let header = "session=abc123; Path=/; Domain=.a.test; Secure; HttpOnly\ntheme=dark";

        let cookies = HtmlAnalyzer::new().cookies(header);
        assert_eq!(cookies.len(), 2);

        let session = &cookies[0];
        assert_eq!(session.name, "session");
        assert_eq!(session.value, "abc123");
        assert_eq!(session.domain.as_deref(), Some(".a.test"));
        assert_eq!(session.path.as_deref(), Some("/"));
        assert!(session.secure);
        assert!(session.http_only);

        assert_eq!(cookies[1].name, "theme");
        assert!(!cookies[1].secure);
    }

    #[test]
    fn test_set_cookie_parsing_rejects_nameless_lines() {
        let cookies = HtmlAnalyzer::new().cookies("=orphan\nnot-a-pair\n");
        assert!(cookies.is_empty());
    }
}
