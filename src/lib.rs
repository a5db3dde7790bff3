// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Seitti Discovery Core
 * Incremental page discovery and element identity for web application
 * security scanning
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

pub mod analyzer;
pub mod config;
pub mod element;
pub mod element_index;
pub mod errors;
pub mod inputs;
pub mod page;
pub mod response;
pub mod scope;
pub mod trainer;
pub mod url_utils;

pub use analyzer::{Analyzer, HtmlAnalyzer};
pub use config::TrainerConfig;
pub use element::{Cookie, Element, ElementKind, Form, Link};
pub use element_index::{ElementIndex, SessionElementIndex};
pub use errors::{InputError, InputResult};
pub use inputs::{InputRules, InputSet, InputValue};
pub use page::{Page, PageElements, PageHandle};
pub use response::HttpResponse;
pub use scope::{CrawlScope, ScopeConfig, ScopePolicy};
pub use trainer::{TrainOutcome, Trainer};
