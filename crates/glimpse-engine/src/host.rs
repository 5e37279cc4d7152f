//! Capabilities the host environment supplies to the engine.

use crate::parsing::Span;
use crate::render::StyleDescriptor;

/// Read access to a document's current text.
pub trait TextSource {
    fn document_length(&self) -> usize;

    /// Text covered by `span`, clamped to the document.
    fn read_range(&self, span: Span) -> String;

    /// Whole document text. Every engine operation re-scans from this.
    fn full_text(&self) -> String {
        self.read_range(Span::new(0, self.document_length()))
    }
}

/// Supplies the active style; queried once per render call.
pub trait StyleSource {
    fn current_style(&self) -> StyleDescriptor;
}

impl StyleSource for StyleDescriptor {
    fn current_style(&self) -> StyleDescriptor {
        self.clone()
    }
}

impl TextSource for str {
    fn document_length(&self) -> usize {
        self.len()
    }

    fn read_range(&self, span: Span) -> String {
        let floor = |pos: usize| {
            let mut pos = pos.min(self.len());
            while !self.is_char_boundary(pos) {
                pos -= 1;
            }
            pos
        };
        let start = floor(span.start);
        let end = floor(span.end).max(start);
        self[start..end].to_string()
    }
}

impl TextSource for String {
    fn document_length(&self) -> usize {
        self.len()
    }

    fn read_range(&self, span: Span) -> String {
        self.as_str().read_range(span)
    }
}
