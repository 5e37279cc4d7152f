use crate::parsing::Span;

/// Result of applying an edit: what was replaced, in pre-edit coordinates.
///
/// Hosts pass this to `ArtifactManager::apply_edit` so bindings over the
/// edited text go stale and bindings after it move with the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Patch {
    /// Replaced byte range, in the document as it was before the edit.
    pub removed: Span,
    /// Byte length of the inserted text.
    pub inserted_len: usize,
    pub version: u64,
}

impl Patch {
    /// True when the edit changed text inside `span`.
    ///
    /// A pure insertion only counts when it lands strictly inside the span;
    /// typing right before or right after a fragment leaves it intact.
    pub fn touches(&self, span: Span) -> bool {
        if self.removed.is_empty() {
            let at = self.removed.start;
            span.start < at && at < span.end
        } else {
            span.intersects(self.removed)
        }
    }

    /// Maps a span that the edit did not touch into post-edit coordinates.
    pub fn shift(&self, span: Span) -> Span {
        if span.start < self.removed.end {
            return span;
        }
        let map = |pos: usize| pos - self.removed.len() + self.inserted_len;
        Span {
            start: map(span.start),
            end: map(span.end),
        }
    }
}
