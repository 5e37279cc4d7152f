use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};

use crate::lifecycle::ARTIFACT_DIR_PREFIX;
use crate::render::{OUTPUT_FILE, RenderError, Renderer, StyleDescriptor, fragment_body};

/// Renderer double: writes the fragment body as the "image" and records every call.
///
/// Calls listed in `fail_on` (1-based) fail without writing anything.
#[derive(Default)]
pub struct StubRenderer {
    fail_on: Vec<usize>,
    calls: Cell<usize>,
    fragments: RefCell<Vec<String>>,
}

impl StubRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(calls: &[usize]) -> Self {
        Self {
            fail_on: calls.to_vec(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Raw fragments passed to `render`, in call order.
    pub fn fragments(&self) -> Vec<String> {
        self.fragments.borrow().clone()
    }
}

impl Renderer for StubRenderer {
    fn render(
        &self,
        raw_fragment: &str,
        _style: &StyleDescriptor,
        output_dir: &Path,
    ) -> Result<PathBuf, RenderError> {
        let call = self.calls.get() + 1;
        self.calls.set(call);
        self.fragments.borrow_mut().push(raw_fragment.to_string());

        if self.fail_on.contains(&call) {
            return Err(RenderError::Other(format!("stub failure on call {call}")));
        }
        let path = output_dir.join(OUTPUT_FILE);
        fs::write(&path, fragment_body(raw_fragment))
            .map_err(|e| RenderError::Other(e.to_string()))?;
        Ok(path)
    }
}

/// Artifact directories currently present under `root`.
pub fn artifact_dirs(root: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(root)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| {
            path.is_dir()
                && path
                    .file_name()
                    .is_some_and(|name| name.to_string_lossy().starts_with(ARTIFACT_DIR_PREFIX))
        })
        .collect();
    dirs.sort();
    dirs
}
