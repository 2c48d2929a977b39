//! Error types for Tally UI

use crate::core::WidgetId;
use thiserror::Error;

/// Errors surfaced by the page and its configuration helpers.
///
/// Widget operations themselves never fail: out-of-range and malformed
/// input is absorbed by policy (refused, clamped or ignored).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// Theme tag outside blue/green/purple
    #[error("unknown theme `{0}`")]
    UnknownTheme(String),

    /// Event addressed to a widget that is not mounted
    #[error("no widget with id {0}")]
    UnknownWidget(WidgetId),

    /// Inconsistent counter bounds
    #[error("invalid counter config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, UiError>;
