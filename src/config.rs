// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Training configuration.

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Gates for the per-response training passes. Cookie extraction is
/// always on; forms and links can be disabled independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerConfig {
    #[serde(default = "default_true")]
    pub audit_forms: bool,

    #[serde(default = "default_true")]
    pub audit_links: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            audit_forms: true,
            audit_links: true,
        }
    }
}
