// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Element Deduplication Index
 * Session-wide registry of element fingerprints backing cross-response
 * deduplication
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::collections::HashSet;

use parking_lot::Mutex;

/// Registry of every element fingerprint seen during a crawl session.
///
/// Injected into the trainer so a shared or distributed implementation
/// can replace the in-memory one when scanning fans out across workers.
pub trait ElementIndex: Send + Sync {
    /// Records the fingerprint and reports whether it was first seen just
    /// now. Test-and-insert is atomic: of two concurrent observers of the
    /// same fingerprint exactly one is told the element is new.
    fn observe(&self, id: u64) -> bool;

    /// Number of distinct fingerprints observed so far.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory element index. Grows monotonically for the session; callers
/// needing bounded memory reset it at session boundaries.
#[derive(Debug, Default)]
pub struct SessionElementIndex {
    seen: Mutex<HashSet<u64>>,
}

impl SessionElementIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ElementIndex for SessionElementIndex {
    fn observe(&self, id: u64) -> bool {
        self.seen.lock().insert(id)
    }

    fn len(&self) -> usize {
        self.seen.lock().len()
    }
}
