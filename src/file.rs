use std::path::{Path, PathBuf};

use log::info;

use crate::ast::Document;
use crate::error::LoadError;
use crate::render::{render_with, RenderOptions};

/// A material file loaded from disk together with its parsed statements.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialFile {
    file_name: PathBuf,
    document: Document,
}

impl MaterialFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|_| LoadError::InvalidUtf8 {
            path: path.to_path_buf(),
        })?;

        let text = text.strip_prefix('\u{FEFF}').unwrap_or(&text);

        let file = MaterialFile::from_text(path, text);
        info!(
            "loaded {}: {} lines, {} recognized",
            path.display(),
            file.document.len(),
            file.document.recognized_count()
        );
        Ok(file)
    }

    /// Build from text already in memory; `file_name` is only recorded.
    pub fn from_text(file_name: impl Into<PathBuf>, text: &str) -> Self {
        MaterialFile {
            file_name: file_name.into(),
            document: crate::parser::parse(text),
        }
    }

    pub fn file_name(&self) -> &Path {
        &self.file_name
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn render(&self) -> String {
        self.document.render()
    }

    pub fn render_with(&self, options: &RenderOptions) -> String {
        render_with(&self.document, options)
    }
}
