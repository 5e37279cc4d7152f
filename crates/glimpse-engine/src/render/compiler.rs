use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use super::source::{EMPTY_USER_CONFIG, build_source};
use super::style::StyleDescriptor;

/// Name of the generated source file inside the output directory.
pub const SOURCE_FILE: &str = "fragment.typ";
/// Name of the rendered image inside the output directory.
pub const OUTPUT_FILE: &str = "fragment.svg";
/// Vector format requested from the compiler.
pub const OUTPUT_FORMAT: &str = "svg";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to write fragment source to {path}: {source}")]
    WriteSource {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to launch compiler {program}: {source}")]
    Launch {
        program: PathBuf,
        source: std::io::Error,
    },
    #[error("Compiler exited with {status}")]
    Exit { status: ExitStatus },
    #[error("Renderer failed: {0}")]
    Other(String),
}

/// Turns a raw fragment into an image file inside a caller-owned directory.
///
/// Implementations must only write inside `output_dir`.
pub trait Renderer {
    fn render(
        &self,
        raw_fragment: &str,
        style: &StyleDescriptor,
        output_dir: &Path,
    ) -> Result<PathBuf, RenderError>;
}

/// Renders through an external compiler process:
/// `<program> compile --format=svg <source> <output>`.
///
/// The call blocks until the compiler exits; there is no timeout.
#[derive(Debug, Clone)]
pub struct CompilerRenderer {
    program: PathBuf,
    user_config: String,
}

impl CompilerRenderer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            user_config: EMPTY_USER_CONFIG.to_string(),
        }
    }

    /// Sets the configuration block inserted before every fragment body.
    pub fn with_user_config(mut self, user_config: impl Into<String>) -> Self {
        self.user_config = user_config.into();
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for CompilerRenderer {
    fn default() -> Self {
        Self::new("typst")
    }
}

impl Renderer for CompilerRenderer {
    fn render(
        &self,
        raw_fragment: &str,
        style: &StyleDescriptor,
        output_dir: &Path,
    ) -> Result<PathBuf, RenderError> {
        let source_path = output_dir.join(SOURCE_FILE);
        let output_path = output_dir.join(OUTPUT_FILE);

        let source = build_source(raw_fragment, style, &self.user_config);
        fs::write(&source_path, source).map_err(|source| RenderError::WriteSource {
            path: source_path.clone(),
            source,
        })?;

        log::debug!(
            "running {} compile on {}",
            self.program.display(),
            source_path.display()
        );
        let output = Command::new(&self.program)
            .arg("compile")
            .arg(format!("--format={OUTPUT_FORMAT}"))
            .arg(&source_path)
            .arg(&output_path)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| RenderError::Launch {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            log::debug!(
                "compiler stderr: {}",
                String::from_utf8_lossy(&output.stderr).trim_end()
            );
            return Err(RenderError::Exit {
                status: output.status,
            });
        }

        Ok(output_path)
    }
}
