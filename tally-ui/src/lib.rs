//! Tally UI - themed, bounded counter widgets rendered to HTML
//!
//! Widgets keep their state in reactive [`State`](core::State) cells, render
//! to a small element tree and serialize to markup. Timers run on a virtual
//! clock owned by the page so behavior is deterministic under test.

pub mod core;
pub mod error;
pub mod widgets;
pub mod render;
pub mod style;
pub mod app;

pub use app::{Page, PageEvent, Patch};
pub use error::{Result, UiError};
pub use widgets::*;
pub use style::*;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::app::{Page, PageEvent, Patch};
    pub use crate::widgets::*;
    pub use crate::style::*;
    pub use crate::core::{Action, Context, Event, State, Theme, Widget, WidgetId};
    pub use crate::render::{to_html, Document, Node};
}
