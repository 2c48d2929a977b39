//! Built-in widgets for Tally UI

mod container;
mod text;
mod button;
mod input;
mod counter;

pub use container::*;
pub use text::*;
pub use button::*;
pub use input::*;
pub use counter::*;
