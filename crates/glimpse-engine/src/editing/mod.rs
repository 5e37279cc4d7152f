/*!
 * # Editing
 *
 * Host-side text storage. The engine never owns document text; hosts expose it
 * through `host::TextSource`. This module provides the in-memory host document
 * used by the CLI and by tests.
 *
 * - **`document`**: `Document`, an xi-rope buffer with validated range edits
 * - **`patch`**: `Patch`, the pre-edit description of one edit that bindings
 *   are invalidated and shifted against
 *
 * Edits are compiled to an xi-rope `Delta` and applied in one step; every edit
 * bumps the document version.
 */

pub mod document;
pub mod patch;

pub use document::{Document, EditError};
pub use patch::Patch;
