// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! URL hygiene helpers for the trainer: lenient percent-encoding of what
//! the transport leaves raw, base-relative merging and query parsing.

use std::collections::BTreeMap;

use url::Url;

/// Characters allowed through unescaped. The reserved set stays intact so
/// already well-formed URLs pass unchanged.
fn is_url_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-_.~!*'();:@&=+$,/?#[]%".contains(c)
}

/// Percent-encodes characters the transport left raw, leaving valid `%XX`
/// sequences untouched so nothing gets double-encoded.
pub fn escape_unescaped(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'%' {
            let already_escaped = bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit);
            if already_escaped {
                out.push_str(&raw[i..i + 3]);
                i += 3;
            } else {
                out.push_str("%25");
                i += 1;
            }
        } else if b.is_ascii() && is_url_safe(b as char) {
            out.push(b as char);
            i += 1;
        } else {
            out.push_str(&format!("%{b:02X}"));
            i += 1;
        }
    }
    out
}

/// Resolves `other` against `base` with standard relative-resolution
/// semantics, escaping both sides first.
pub fn merge_url(base: &str, other: &str) -> Result<String, url::ParseError> {
    let base = Url::parse(&escape_unescaped(base))?;
    let merged = base.join(&escape_unescaped(other))?;
    Ok(merged.to_string())
}

/// Query variables of `url`; empty when it does not parse.
pub fn query_vars(url: &str) -> BTreeMap<String, String> {
    match Url::parse(url) {
        Ok(parsed) => parsed
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect(),
        Err(_) => BTreeMap::new(),
    }
}

/// Normalized page key: scheme, authority and path with query and
/// fragment dropped, so every response for one logical page lands on the
/// same page model.
pub fn page_key(url: &str) -> Result<String, url::ParseError> {
    let mut parsed = Url::parse(&escape_unescaped(url))?;
    parsed.set_query(None);
    parsed.set_fragment(None);
    Ok(parsed.to_string())
}
