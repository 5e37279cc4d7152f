use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glimpse_engine::parsing::nearest_with_distance;
use glimpse_engine::{
    Document, DocumentId, DocumentRegistry, OpenDocument, Renderer, StyleDescriptor,
    TextSource, ToggleOutcome, clear_all_in_document, render_all_unbound_in_document, scan,
    toggle_nearest_block,
};

use crate::command::{Command, HELP};

pub enum Reply {
    Status(String),
    Quit,
}

/// One editing session over a single file.
pub struct App<R> {
    path: PathBuf,
    registry: DocumentRegistry<Document>,
    doc_id: DocumentId,
    style: StyleDescriptor,
    renderer: R,
}

impl<R: Renderer> App<R> {
    pub fn new(
        path: PathBuf,
        document: Document,
        style: StyleDescriptor,
        renderer: R,
        temp_root: Option<&Path>,
    ) -> Self {
        let mut registry = match temp_root {
            Some(root) => DocumentRegistry::with_temp_root(root),
            None => DocumentRegistry::new(),
        };
        let doc_id = registry.open(document);
        Self {
            path,
            registry,
            doc_id,
            style,
            renderer,
        }
    }

    pub fn open(
        path: PathBuf,
        style: StyleDescriptor,
        renderer: R,
        temp_root: Option<&Path>,
    ) -> Result<Self> {
        let bytes =
            fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        let document = Document::from_bytes(&bytes)
            .with_context(|| format!("{} is not valid UTF-8", path.display()))?;
        Ok(Self::new(path, document, style, renderer, temp_root))
    }

    pub fn document(&self) -> Option<&OpenDocument<Document>> {
        self.registry.get(self.doc_id)
    }

    pub fn style(&self) -> &StyleDescriptor {
        &self.style
    }

    /// Reads commands from `input` until `quit` or end of input.
    ///
    /// A failing command prints its error and the loop carries on.
    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let reply = line
                .parse::<Command>()
                .and_then(|command| self.execute(command));
            match reply {
                Ok(Reply::Status(status)) => writeln!(output, "{status}")?,
                Ok(Reply::Quit) => break,
                Err(e) => writeln!(output, "error: {e:#}")?,
            }
        }
        self.close();
        Ok(())
    }

    pub fn execute(&mut self, command: Command) -> Result<Reply> {
        let open = self
            .registry
            .get_mut(self.doc_id)
            .context("Document is no longer open")?;

        let status = match command {
            Command::Toggle(cursor) => {
                match toggle_nearest_block(
                    &open.document,
                    &mut open.bindings,
                    cursor,
                    &self.style,
                    &self.renderer,
                )? {
                    ToggleOutcome::Created(id) => {
                        let binding = open
                            .bindings
                            .get(id)
                            .context("New binding vanished")?;
                        format!(
                            "shown {id} {}..{} -> {}",
                            binding.span.start,
                            binding.span.end,
                            binding.artifact.path().display()
                        )
                    }
                    ToggleOutcome::Removed(count) => format!("hidden {count}"),
                }
            }
            Command::Nearest(cursor) => {
                let spans = scan(&open.document.text());
                match nearest_with_distance(&spans, cursor) {
                    Some((span, distance)) => format!(
                        "{}..{} (distance {distance}): {}",
                        span.start,
                        span.end,
                        open.document.read_range(span)
                    ),
                    None => "no fragment".to_string(),
                }
            }
            Command::RenderAll => {
                let report = render_all_unbound_in_document(
                    &open.document,
                    &mut open.bindings,
                    &self.style,
                    &self.renderer,
                );
                format!(
                    "rendered {}, already shown {}, failed {}",
                    report.rendered, report.skipped, report.failed
                )
            }
            Command::Clear => format!("hidden {}", clear_all_in_document(&mut open.bindings)),
            Command::List => {
                let lines: Vec<String> = open
                    .bindings
                    .bindings()
                    .map(|b| {
                        format!(
                            "{} {}..{} {}",
                            b.id,
                            b.span.start,
                            b.span.end,
                            b.artifact.path().display()
                        )
                    })
                    .collect();
                if lines.is_empty() {
                    "nothing shown".to_string()
                } else {
                    lines.join("\n")
                }
            }
            Command::Style {
                foreground,
                font_weight,
                font_size_pt,
            } => {
                self.style.foreground = foreground;
                if let Some(weight) = font_weight {
                    self.style.font_weight = weight;
                }
                if let Some(size) = font_size_pt {
                    self.style.font_size_pt = size;
                }
                let report = self.registry.style_changed(&self.style, &self.renderer);
                format!(
                    "style {} {} {}pt, re-rendered {}, failed {}",
                    self.style.foreground,
                    self.style.font_weight,
                    self.style.font_size_pt,
                    report.rendered,
                    report.failed
                )
            }
            Command::Insert { offset, text } => {
                let patch = open.document.apply_edit(offset..offset, &text)?;
                let stale = open.bindings.apply_edit(&patch);
                format!(
                    "inserted {} bytes at {offset}, hidden {}",
                    text.len(),
                    stale.len()
                )
            }
            Command::Delete { start, end } => {
                let patch = open.document.apply_edit(start..end, "")?;
                let stale = open.bindings.apply_edit(&patch);
                format!("deleted {start}..{end}, hidden {}", stale.len())
            }
            Command::Write => {
                fs::write(&self.path, open.document.to_bytes())
                    .with_context(|| format!("Failed to write {}", self.path.display()))?;
                format!("wrote {}", self.path.display())
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Status(status))
    }

    /// Ends the session, deleting every artifact directory.
    pub fn close(&mut self) {
        if self.registry.close(self.doc_id).is_some() {
            log::info!("closed {}", self.path.display());
        }
    }
}
