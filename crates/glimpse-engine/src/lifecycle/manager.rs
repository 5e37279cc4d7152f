use std::path::PathBuf;

use serde::Serialize;
use tempfile::TempDir;

use super::binding::{Binding, BindingId, RenderedArtifact};
use crate::editing::Patch;
use crate::error::PreviewError;
use crate::host::TextSource;
use crate::parsing::Span;
use crate::render::{Renderer, StyleDescriptor};

/// Prefix of every artifact directory.
pub const ARTIFACT_DIR_PREFIX: &str = "glimpse-";

/// What a successful toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// A new binding was rendered for the range.
    Created(BindingId),
    /// This many existing bindings overlapping the range were removed.
    Removed(usize),
}

/// Tally of a bulk render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderReport {
    pub rendered: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RenderReport {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Owns the live bindings of one document.
///
/// Each binding owns a private temporary directory. Removing a binding deletes
/// its directory; dropping the manager deletes every remaining one.
///
/// All operations run on the calling thread and block on the renderer.
#[derive(Debug, Default)]
pub struct ArtifactManager {
    bindings: Vec<Binding>,
    next_id: u64,
    temp_root: Option<PathBuf>,
}

impl ArtifactManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates artifact directories under `root` instead of the system temp dir.
    pub fn with_temp_root(root: impl Into<PathBuf>) -> Self {
        Self {
            temp_root: Some(root.into()),
            ..Self::default()
        }
    }

    /// Live bindings in creation order.
    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    pub fn get(&self, id: BindingId) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings whose span intersects `range` (a point query when `range` is empty).
    pub fn bindings_overlapping(&self, range: Span) -> Vec<&Binding> {
        self.bindings
            .iter()
            .filter(|b| b.span.intersects(range))
            .collect()
    }

    /// Removes a binding and deletes its directory.
    ///
    /// The binding leaves the set before deletion is attempted, so a failed
    /// deletion still removes it. Returns `Ok(false)` for an unknown id.
    pub fn remove(&mut self, id: BindingId) -> Result<bool, PreviewError> {
        let Some(index) = self.bindings.iter().position(|b| b.id == id) else {
            return Ok(false);
        };
        let binding = self.bindings.remove(index);
        log::debug!(
            "removing binding {} at {}..{}",
            binding.id,
            binding.span.start,
            binding.span.end
        );
        binding.artifact.discard()?;
        Ok(true)
    }

    /// Removes every binding overlapping `range`, or renders a new one if none does.
    pub fn toggle<T, R>(
        &mut self,
        range: Span,
        text: &T,
        style: &StyleDescriptor,
        renderer: &R,
    ) -> Result<ToggleOutcome, PreviewError>
    where
        T: TextSource + ?Sized,
        R: Renderer + ?Sized,
    {
        let overlapping = self.ids_overlapping(range);
        if overlapping.is_empty() {
            return self
                .create(range, text, style, renderer)
                .map(ToggleOutcome::Created);
        }

        let count = overlapping.len();
        for id in overlapping {
            self.remove_logged(id);
        }
        Ok(ToggleOutcome::Removed(count))
    }

    /// Renders every span that has no binding at its midpoint yet.
    ///
    /// A failed span is counted and skipped; it never stops the pass.
    pub fn render_all_unbound<T, R>(
        &mut self,
        spans: &[Span],
        text: &T,
        style: &StyleDescriptor,
        renderer: &R,
    ) -> RenderReport
    where
        T: TextSource + ?Sized,
        R: Renderer + ?Sized,
    {
        let mut report = RenderReport::default();
        for &span in spans {
            if !self
                .bindings_overlapping(Span::point(span.midpoint()))
                .is_empty()
            {
                report.skipped += 1;
                continue;
            }
            match self.create(span, text, style, renderer) {
                Ok(_) => report.rendered += 1,
                Err(_) => report.failed += 1,
            }
        }
        log::info!(
            "rendered {} fragments ({} already bound, {} failed)",
            report.rendered,
            report.skipped,
            report.failed
        );
        report
    }

    /// Replaces every binding with a fresh render of the text now under its span.
    pub fn rerender_all<T, R>(
        &mut self,
        text: &T,
        style: &StyleDescriptor,
        renderer: &R,
    ) -> RenderReport
    where
        T: TextSource + ?Sized,
        R: Renderer + ?Sized,
    {
        let mut targets: Vec<(BindingId, Span)> =
            self.bindings.iter().map(|b| (b.id, b.span)).collect();
        targets.sort_by_key(|&(_, span)| span);

        let mut report = RenderReport::default();
        for (id, span) in targets {
            self.remove_logged(id);
            match self.create(span, text, style, renderer) {
                Ok(_) => report.rendered += 1,
                Err(_) => report.failed += 1,
            }
        }
        report
    }

    /// Removes every binding. Returns how many were removed.
    pub fn clear_all(&mut self) -> usize {
        let bindings = std::mem::take(&mut self.bindings);
        let count = bindings.len();
        for binding in bindings {
            if let Err(e) = binding.artifact.discard() {
                log::warn!("{e}");
            }
        }
        count
    }

    /// Reacts to a document edit: bindings whose text changed are removed,
    /// bindings after the edit move with the text.
    ///
    /// Returns the ids of the removed bindings.
    pub fn apply_edit(&mut self, patch: &Patch) -> Vec<BindingId> {
        let stale: Vec<BindingId> = self
            .bindings
            .iter()
            .filter(|b| patch.touches(b.span))
            .map(|b| b.id)
            .collect();
        for &id in &stale {
            self.remove_logged(id);
        }
        for binding in &mut self.bindings {
            binding.span = patch.shift(binding.span);
        }
        stale
    }

    fn ids_overlapping(&self, range: Span) -> Vec<BindingId> {
        self.bindings_overlapping(range)
            .into_iter()
            .map(|b| b.id)
            .collect()
    }

    /// Removal where a cleanup failure is reported but not propagated.
    fn remove_logged(&mut self, id: BindingId) {
        if let Err(e) = self.remove(id) {
            log::warn!("{e}");
        }
    }

    fn create<T, R>(
        &mut self,
        span: Span,
        text: &T,
        style: &StyleDescriptor,
        renderer: &R,
    ) -> Result<BindingId, PreviewError>
    where
        T: TextSource + ?Sized,
        R: Renderer + ?Sized,
    {
        let dir = self.allocate_dir().map_err(PreviewError::TempDir)?;
        let raw = text.read_range(span);

        match renderer.render(&raw, style, dir.path()) {
            Ok(path) => {
                let id = BindingId(self.next_id);
                self.next_id += 1;
                log::debug!(
                    "bound {id} at {}..{} to {}",
                    span.start,
                    span.end,
                    path.display()
                );
                self.bindings.push(Binding {
                    id,
                    span,
                    artifact: RenderedArtifact::new(path, dir),
                });
                Ok(id)
            }
            Err(source) => {
                log::warn!(
                    "fragment at {}..{} produced no artifact: {source}",
                    span.start,
                    span.end
                );
                // the directory never outlives a failed render
                let dir_path = dir.path().to_path_buf();
                if let Err(e) = dir.close() {
                    log::warn!("failed to remove {}: {e}", dir_path.display());
                }
                Err(PreviewError::RenderFailed { span, source })
            }
        }
    }

    fn allocate_dir(&self) -> std::io::Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(ARTIFACT_DIR_PREFIX);
        match &self.temp_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
    }
}
