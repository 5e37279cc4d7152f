pub mod commands;
pub mod editing;
pub mod error;
pub mod host;
pub mod lifecycle;
pub mod parsing;
pub mod registry;
pub mod render;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use commands::*;
pub use editing::{Document, EditError, Patch};
pub use error::PreviewError;
pub use host::{StyleSource, TextSource};
pub use lifecycle::*;
pub use parsing::{Span, scan, select_nearest};
pub use registry::{DocumentId, DocumentRegistry, OpenDocument};
pub use render::{CompilerRenderer, RenderError, Renderer, Rgb, StyleDescriptor};
