use std::path::PathBuf;

use thiserror::Error;

/// Why a line could not be classified as a statement.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LineErrorKind {
    /// The line never started a directive or a declaration.
    #[error("not a directive or constant declaration")]
    Unrecognized,
    #[error("unknown directive #{0}")]
    UnknownDirective(String),
    #[error("expected a name")]
    ExpectedName,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("expected an integer literal")]
    ExpectedInteger,
    #[error("expected a float literal")]
    ExpectedFloat,
    #[error("unknown constant type {0}")]
    UnknownType(String),
    #[error("constructor {found} does not match declared type {expected}")]
    ConstructorMismatch { expected: String, found: String },
    #[error("{expected} needs {expected_count} components, found {found}")]
    ComponentCount {
        expected: String,
        expected_count: usize,
        found: usize,
    },
    #[error("expected '{0}'")]
    ExpectedChar(char),
    #[error("unexpected text after statement")]
    TrailingText,
}

/// A classification failure at a 0-based character column of the line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{column}: {kind}")]
pub struct LineError {
    pub kind: LineErrorKind,
    pub column: usize,
}

impl LineError {
    pub fn new(kind: LineErrorKind, column: usize) -> Self {
        LineError { kind, column }
    }

    /// True when the line simply was not an attempt at any statement
    /// (comments, blank lines, shader code).
    pub fn is_unrecognized(&self) -> bool {
        self.kind == LineErrorKind::Unrecognized
    }
}

/// Failure to read a material file from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not valid UTF-8", path.display())]
    InvalidUtf8 { path: PathBuf },
}
