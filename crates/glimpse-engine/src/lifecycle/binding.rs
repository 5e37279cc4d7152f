use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::PreviewError;
use crate::parsing::Span;

/// Identifier of a binding, unique within one `ArtifactManager`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(pub u64);

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A rendered image and the temporary directory that holds it.
///
/// The directory belongs to this artifact alone. It is deleted recursively by
/// [`RenderedArtifact::discard`], or on drop if the artifact is never
/// discarded explicitly.
#[derive(Debug)]
pub struct RenderedArtifact {
    path: PathBuf,
    dir: TempDir,
}

impl RenderedArtifact {
    pub(crate) fn new(path: PathBuf, dir: TempDir) -> Self {
        Self { path, dir }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Deletes the backing directory.
    ///
    /// A directory that is already gone counts as deleted.
    pub fn discard(self) -> Result<(), PreviewError> {
        let dir = self.dir.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(PreviewError::CleanupPartial { dir, source }),
        }
    }
}

/// A fragment span bound to its rendered artifact.
#[derive(Debug)]
pub struct Binding {
    pub id: BindingId,
    pub span: Span,
    pub artifact: RenderedArtifact,
}
