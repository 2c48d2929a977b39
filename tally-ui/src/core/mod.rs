//! Core types and traits for Tally UI

mod widget;
mod state;
pub mod context;
mod events;
mod timer;

pub use widget::*;
pub use state::*;
pub use context::*;
pub use events::*;
pub use timer::*;
