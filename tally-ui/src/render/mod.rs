//! Rendering: element trees, HTML serialization and the document shell

mod node;
mod html;
mod document;

pub use node::*;
pub use html::*;
pub use document::*;
