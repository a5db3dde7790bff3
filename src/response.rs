// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! The completed-request record the transport hands to the trainer.

use std::collections::HashMap;

/// One completed HTTP exchange as delivered by the transport.
///
/// The trainer only reads from it; ownership stays with the transport's
/// completion handler.
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status_code: u16,
    /// URL the request was issued against.
    pub url: String,
    /// Final URL after any redirects the transport followed.
    pub effective_url: String,
    pub body: String,
    /// Response headers, keys lower-cased by the transport.
    pub headers: HashMap<String, String>,
    /// Headers of the request that produced this response.
    pub request_headers: HashMap<String, String>,
    /// Opaque transport-side id, carried through for logging.
    pub request_id: u64,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers.get(&name.to_lowercase()).cloned()
    }
}
