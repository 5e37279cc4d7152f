//! # Artifact Lifecycle
//!
//! Binds fragment spans to rendered artifacts and keeps that set in step with
//! the document.
//!
//! A binding goes `Unbound → Bound → removed`; there are no other states.
//! Bindings are created only by a successful render and destroyed by toggling,
//! clearing, re-rendering, or an edit that changes their text. Each binding
//! owns one temporary directory, which is deleted with it.

pub mod binding;
pub mod manager;

pub use binding::{Binding, BindingId, RenderedArtifact};
pub use manager::{ARTIFACT_DIR_PREFIX, ArtifactManager, RenderReport, ToggleOutcome};
