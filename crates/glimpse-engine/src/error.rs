use std::path::PathBuf;

use crate::parsing::Span;
use crate::render::RenderError;

/// Failures surfaced by the preview operations.
///
/// Malformed or unmatched markers are not an error: the scanner tolerates them
/// and simply yields fewer fragments.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("No fragment found in document")]
    NoBlockFound,
    #[error("Fragment at {}..{} produced no artifact: {source}", span.start, span.end)]
    RenderFailed { span: Span, source: RenderError },
    #[error("Failed to remove artifact directory {dir}: {source}")]
    CleanupPartial {
        dir: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to allocate artifact directory: {0}")]
    TempDir(#[source] std::io::Error),
}
