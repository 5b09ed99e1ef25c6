use crate::document::SourceDocument;
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

/// A line that should hold a quoted string does not parse as one
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid string literal: {literal}")]
pub struct InvalidLiteralError {
    literal: String,
}

impl InvalidLiteralError {
    pub fn new(literal: &str) -> Self {
        InvalidLiteralError {
            literal: literal.into(),
        }
    }

    /// The offending literal, trimmed
    pub fn literal(&self) -> &str {
        &self.literal
    }
}

/// Fatal problems with a single line of a translation file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    /// A line starting with a quote matched none of the known shapes
    #[error("unhandled line: {0}")]
    UnhandledLine(String),
    /// A closing bracket without an open array to close
    #[error("closing bracket without a matching opening array")]
    UnbalancedNesting,
    /// The document ended inside one or more arrays
    #[error("{depth} array(s) still open at end of file")]
    UnclosedNesting { depth: usize },
}

/// A [`LineError`] located in the document it occurred in
#[derive(Error, Debug, Diagnostic)]
#[error("{name}:{line}: {kind}")]
#[diagnostic(code(php_lang_transcoder::line))]
pub struct SourceError {
    name: String,
    line: usize,
    kind: LineError,
    #[source_code]
    src: NamedSource<String>,
    #[label("here")]
    span: SourceSpan,
}

impl SourceError {
    /// Attach `kind` to the line at `index` (0-based) of `document`
    ///
    /// An index past the last line points at the end of the document.
    pub fn new(document: &SourceDocument, index: usize, kind: LineError) -> Self {
        let span = match document.lines().get(index) {
            Some(line) => (document.line_offset(index), line.len()),
            None => (document.text_len(), 0),
        };
        SourceError {
            name: document.name().into(),
            line: index + 1,
            kind,
            src: NamedSource::new(document.name(), document.text()),
            span: span.into(),
        }
    }

    /// Name of the document the error occurred in
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 1-based line number
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn kind(&self) -> &LineError {
        &self.kind
    }
}

pub trait ResultExt<T> {
    fn at_line(self, document: &SourceDocument, index: usize) -> Result<T, SourceError>;
}

impl<T> ResultExt<T> for Result<T, LineError> {
    fn at_line(self, document: &SourceDocument, index: usize) -> Result<T, SourceError> {
        self.map_err(|kind| SourceError::new(document, index, kind))
    }
}

/// Errors while building or applying a language mapping
#[derive(Error, Debug, Diagnostic)]
pub enum MappingError {
    /// The file is not a php translation file
    #[error("not a .php file: {}", .0.display())]
    UnsupportedFile(PathBuf),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Source(#[from] SourceError),
    #[error("invalid language mapping: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read translation file: {0}")]
    Io(#[from] std::io::Error),
}
