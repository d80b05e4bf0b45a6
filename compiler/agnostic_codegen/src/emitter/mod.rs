//! Output Emitter
//!
//! Abstraction over where rendered source goes. Documents are always rendered
//! into a [`StringEmitter`] first; only a fully rendered document is handed to
//! a [`FileEmitter`], so a failed run never leaves a partial file behind.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use agnostic_diagnostic::{CodegenError, Result};

/// Indentation unit of a target syntax.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Indent {
    Tab,
    Spaces(usize),
}

impl Indent {
    fn unit(self) -> String {
        match self {
            Indent::Tab => "\t".to_string(),
            Indent::Spaces(n) => " ".repeat(n),
        }
    }
}

/// Trait for emitting rendered output.
pub trait Emitter {
    /// Emit a text fragment.
    fn emit(&mut self, text: &str);

    /// Emit a newline (Unix-style `\n`).
    fn emit_newline(&mut self);

    /// Emit `level` indentation units.
    fn emit_indent(&mut self, level: usize);

    /// Emit one indented line. Empty lines get no indentation.
    fn emit_line(&mut self, level: usize, text: &str) {
        if !text.is_empty() {
            self.emit_indent(level);
            self.emit(text);
        }
        self.emit_newline();
    }
}

/// String-based emitter for in-memory rendering.
pub struct StringEmitter {
    buffer: String,
    unit: String,
}

impl StringEmitter {
    pub fn new(indent: Indent) -> Self {
        Self {
            buffer: String::with_capacity(4096),
            unit: indent.unit(),
        }
    }

    /// Get the rendered output.
    pub fn output(self) -> String {
        self.buffer
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn emit_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn emit_indent(&mut self, level: usize) {
        for _ in 0..level {
            self.buffer.push_str(&self.unit);
        }
    }
}

/// File-based emitter for streaming output to a file.
///
/// Write errors are latched and reported by [`FileEmitter::finish`]. The file
/// handle is released when the emitter is dropped, on every exit path.
pub struct FileEmitter {
    path: PathBuf,
    writer: BufWriter<File>,
    unit: String,
    error: Option<io::Error>,
}

impl FileEmitter {
    /// Create (or truncate) the file at `path`.
    pub fn create(path: impl Into<PathBuf>, indent: Indent) -> Result<Self> {
        let path = path.into();
        let file = File::create(&path).map_err(|source| CodegenError::Output {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
            unit: indent.unit(),
            error: None,
        })
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        if self.error.is_none() {
            if let Err(err) = self.writer.write_all(bytes) {
                self.error = Some(err);
            }
        }
    }

    /// Flush and report the first error that occurred.
    pub fn finish(mut self) -> Result<PathBuf> {
        let result = match self.error.take() {
            Some(err) => Err(err),
            None => self.writer.flush(),
        };
        result.map_err(|source| CodegenError::Output {
            path: self.path.clone(),
            source,
        })?;
        Ok(self.path)
    }
}

impl Emitter for FileEmitter {
    fn emit(&mut self, text: &str) {
        self.write_bytes(text.as_bytes());
    }

    fn emit_newline(&mut self) {
        self.write_bytes(b"\n");
    }

    fn emit_indent(&mut self, level: usize) {
        let unit = self.unit.repeat(level);
        self.write_bytes(unit.as_bytes());
    }
}

/// `base` with `extension` appended verbatim (`out/model` + `.ts`).
///
/// Unlike `Path::with_extension`, dots already in the base are kept.
pub fn output_path(base: &Path, extension: &str) -> PathBuf {
    let mut path = base.as_os_str().to_owned();
    path.push(extension);
    PathBuf::from(path)
}

/// Write a fully rendered document to `base` + `extension`.
#[tracing::instrument(level = "debug", skip(text), fields(bytes = text.len()))]
pub fn write_document(base: &Path, extension: &str, text: &str) -> Result<PathBuf> {
    let mut emitter = FileEmitter::create(output_path(base, extension), Indent::Tab)?;
    emitter.emit(text);
    let path = emitter.finish()?;
    tracing::debug!(path = %path.display(), "document written");
    Ok(path)
}
