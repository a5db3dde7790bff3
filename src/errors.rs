// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Training Error Types
 * Typed errors surfaced by element input mutation
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use thiserror::Error;

/// Raised when an element input mutation fails validation.
///
/// Rejection is atomic: when a name or value is refused, the input set is
/// left exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("invalid input name {name:?}")]
    InvalidName { name: String },

    #[error("invalid value for input {name:?}")]
    InvalidValue { name: String },
}

impl InputError {
    /// The input name the rejected mutation was addressing.
    pub fn input_name(&self) -> &str {
        match self {
            InputError::InvalidName { name } | InputError::InvalidValue { name } => name,
        }
    }
}

/// Result type for input mutations.
pub type InputResult<T> = Result<T, InputError>;
