// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors.
//!
//! The behaviours themselves never fail: a missing element turns the affected
//! behaviour into a no-op. Only loading or validating a [`PageConfig`](crate::config::PageConfig)
//! can produce a [`ConfigError`].

use vitrine_dom::SelectorError;

/// Errors raised while loading or validating page configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration text is not valid JSON for [`PageConfig`](crate::config::PageConfig).
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A numeric setting is out of range.
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// Configuration field name.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A selector setting does not parse.
    #[error("invalid selector for `{field}` ({selector:?}): {source}")]
    Selector {
        /// Configuration field name.
        field: &'static str,
        /// The selector text as configured.
        selector: String,
        /// Parser error.
        #[source]
        source: SelectorError,
    },
}
