use std::ops::Range;

use xi_rope::{Delta, Rope, RopeInfo};

use crate::editing::Patch;
use crate::host::TextSource;
use crate::parsing::Span;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EditError {
    #[error("Edit range {start}..{end} is outside the document (length {len})")]
    OutOfBounds { start: usize, end: usize, len: usize },
    #[error("Edit boundary {0} is not on a character boundary")]
    NotCharBoundary(usize),
}

/// In-memory text document backed by an xi-rope buffer.
///
/// This is the host-side text store the CLI drives; the engine itself only
/// sees it through [`TextSource`].
#[derive(Clone)]
pub struct Document {
    pub(crate) buffer: Rope,
    /// Incremented on each edit.
    pub(crate) version: u64,
}

impl Document {
    /// Create a new document from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::from_text(text))
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            version: 0,
        }
    }

    /// Get the document's content as raw bytes (exact round-trip)
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.to_string().into_bytes()
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Replaces `range` with `insert` and reports what changed.
    pub fn apply_edit(&mut self, range: Range<usize>, insert: &str) -> Result<Patch, EditError> {
        let len = self.buffer.len();
        if range.start > range.end || range.end > len {
            return Err(EditError::OutOfBounds {
                start: range.start,
                end: range.end,
                len,
            });
        }
        let text = self.buffer.to_string();
        for pos in [range.start, range.end] {
            if !text.is_char_boundary(pos) {
                return Err(EditError::NotCharBoundary(pos));
            }
        }

        let delta: Delta<RopeInfo> = Delta::simple_edit(range.clone(), Rope::from(insert), len);
        self.buffer = delta.apply(&self.buffer);
        self.version += 1;

        Ok(Patch {
            removed: Span::from(range),
            inserted_len: insert.len(),
            version: self.version,
        })
    }

    /// Clamps `span` to the document and to character boundaries.
    fn clamp(&self, span: Span) -> Range<usize> {
        let text = self.buffer.to_string();
        let floor = |mut pos: usize| {
            pos = pos.min(text.len());
            while !text.is_char_boundary(pos) {
                pos -= 1;
            }
            pos
        };
        let start = floor(span.start);
        let end = floor(span.end).max(start);
        start..end
    }
}

impl TextSource for Document {
    fn document_length(&self) -> usize {
        self.buffer.len()
    }

    fn read_range(&self, span: Span) -> String {
        // Silently clamp: bindings may point past text that has since changed
        self.buffer.slice_to_cow(self.clamp(span)).into_owned()
    }
}
