use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};

use glimpse_engine::render::{OUTPUT_FILE, fragment_body};
use glimpse_engine::{RenderError, Renderer, StyleDescriptor};

/// Writes `<svg>` wrapping the fragment body and the requested color; fails on listed calls.
#[derive(Default)]
pub struct FakeCompiler {
    pub fail_on: Vec<usize>,
    calls: Cell<usize>,
}

impl FakeCompiler {
    pub fn failing_on(calls: &[usize]) -> Self {
        Self {
            fail_on: calls.to_vec(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Renderer for FakeCompiler {
    fn render(
        &self,
        raw_fragment: &str,
        style: &StyleDescriptor,
        output_dir: &Path,
    ) -> Result<PathBuf, RenderError> {
        let call = self.calls.get() + 1;
        self.calls.set(call);
        if self.fail_on.contains(&call) {
            return Err(RenderError::Other("compile error".to_string()));
        }
        let path = output_dir.join(OUTPUT_FILE);
        let svg = format!(
            "<svg fill=\"{}\">{}</svg>",
            style.foreground,
            fragment_body(raw_fragment)
        );
        fs::write(&path, svg).map_err(|e| RenderError::Other(e.to_string()))?;
        Ok(path)
    }
}

pub fn read_artifact(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}
