//! # Fragment Rendering
//!
//! Turns one raw fragment into an image via an external compiler.
//!
//! - **`style`**: `Rgb` and the per-render `StyleDescriptor`
//! - **`source`**: `build_source()` assembles the self-contained compiler input
//! - **`compiler`**: the `Renderer` seam and its process-backed `CompilerRenderer`
//!
//! The adapter only reports success or failure; compiler diagnostics are
//! logged, never parsed.

pub mod compiler;
pub mod source;
pub mod style;

pub use compiler::{CompilerRenderer, OUTPUT_FILE, RenderError, Renderer, SOURCE_FILE};
pub use source::{EMPTY_USER_CONFIG, build_source, fragment_body};
pub use style::{ColorParseError, Rgb, StyleDescriptor};
