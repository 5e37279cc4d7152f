//! User-facing preview commands.
//!
//! Each command re-scans the document, then delegates to the document's
//! [`ArtifactManager`]. Hosts only need the success/failure status.

use crate::error::PreviewError;
use crate::host::TextSource;
use crate::lifecycle::{ArtifactManager, RenderReport, ToggleOutcome};
use crate::parsing::{nearest_with_distance, scan};
use crate::render::{Renderer, StyleDescriptor};

/// Shows or hides the fragment nearest to `cursor`.
pub fn toggle_nearest_block<T, R>(
    document: &T,
    bindings: &mut ArtifactManager,
    cursor: usize,
    style: &StyleDescriptor,
    renderer: &R,
) -> Result<ToggleOutcome, PreviewError>
where
    T: TextSource + ?Sized,
    R: Renderer + ?Sized,
{
    let spans = scan(&document.full_text());
    let (span, distance) =
        nearest_with_distance(&spans, cursor).ok_or(PreviewError::NoBlockFound)?;
    log::debug!(
        "nearest fragment to {cursor} is {}..{} (distance {distance})",
        span.start,
        span.end
    );
    bindings.toggle(span, document, style, renderer)
}

/// Hides every rendered fragment in the document.
pub fn clear_all_in_document(bindings: &mut ArtifactManager) -> usize {
    bindings.clear_all()
}

/// Renders every fragment that is not shown yet.
pub fn render_all_unbound_in_document<T, R>(
    document: &T,
    bindings: &mut ArtifactManager,
    style: &StyleDescriptor,
    renderer: &R,
) -> RenderReport
where
    T: TextSource + ?Sized,
    R: Renderer + ?Sized,
{
    let spans = scan(&document.full_text());
    bindings.render_all_unbound(&spans, document, style, renderer)
}
