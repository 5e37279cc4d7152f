use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use uuid::Uuid;

use crate::host::{StyleSource, TextSource};
use crate::lifecycle::{ArtifactManager, RenderReport};
use crate::render::Renderer;

/// Identity of an open document, assigned when it is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DocumentId(Uuid);

impl DocumentId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A document together with the bindings rendered for it.
pub struct OpenDocument<D> {
    pub document: D,
    pub bindings: ArtifactManager,
}

/// Every open document and its artifact manager.
///
/// A manager lives exactly as long as its document is registered: `close`
/// drops it, which deletes the remaining artifact directories. Style changes
/// are broadcast through [`DocumentRegistry::style_changed`].
pub struct DocumentRegistry<D> {
    documents: HashMap<DocumentId, OpenDocument<D>>,
    temp_root: Option<PathBuf>,
}

impl<D> Default for DocumentRegistry<D> {
    fn default() -> Self {
        Self {
            documents: HashMap::new(),
            temp_root: None,
        }
    }
}

impl<D: TextSource> DocumentRegistry<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Managers created by this registry allocate artifact directories under `root`.
    pub fn with_temp_root(root: impl Into<PathBuf>) -> Self {
        Self {
            documents: HashMap::new(),
            temp_root: Some(root.into()),
        }
    }

    pub fn open(&mut self, document: D) -> DocumentId {
        let id = DocumentId::new();
        let bindings = match &self.temp_root {
            Some(root) => ArtifactManager::with_temp_root(root),
            None => ArtifactManager::new(),
        };
        self.documents
            .insert(id, OpenDocument { document, bindings });
        log::debug!("opened document {id}");
        id
    }

    /// Unregisters a document, deleting all of its artifacts.
    pub fn close(&mut self, id: DocumentId) -> Option<D> {
        let mut open = self.documents.remove(&id)?;
        let removed = open.bindings.clear_all();
        log::debug!("closed document {id}, removed {removed} bindings");
        Some(open.document)
    }

    pub fn get(&self, id: DocumentId) -> Option<&OpenDocument<D>> {
        self.documents.get(&id)
    }

    pub fn get_mut(&mut self, id: DocumentId) -> Option<&mut OpenDocument<D>> {
        self.documents.get_mut(&id)
    }

    pub fn ids(&self) -> Vec<DocumentId> {
        self.documents.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The active style changed: re-render every binding of every open document.
    ///
    /// The style is fetched fresh from `styles` for each document.
    pub fn style_changed<S, R>(&mut self, styles: &S, renderer: &R) -> RenderReport
    where
        S: StyleSource + ?Sized,
        R: Renderer + ?Sized,
    {
        let mut total = RenderReport::default();
        for (id, open) in &mut self.documents {
            let style = styles.current_style();
            let report = open
                .bindings
                .rerender_all(&open.document, &style, renderer);
            log::debug!("re-rendered document {id}: {report:?}");
            total.rendered += report.rendered;
            total.skipped += report.skipped;
            total.failed += report.failed;
        }
        total
    }
}
