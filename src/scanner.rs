use crate::document::SourceDocument;
use crate::error::{LineError, ResultExt, SourceError};
use crate::line::{indent_width, Line};
use std::iter::Enumerate;
use std::slice::Iter;

/// The keys of the arrays enclosing the current line
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    pub fn push(&mut self, key: &str) {
        self.0.push(key.into());
    }

    pub fn pop(&mut self) -> Result<(), LineError> {
        self.0.pop().map(drop).ok_or(LineError::UnbalancedNesting)
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// The flat key of the path itself, used for lists
    pub fn join(&self) -> String {
        self.0.join(".")
    }

    /// The flat key of `key` inside the path
    pub fn child(&self, key: &str) -> String {
        if self.0.is_empty() {
            key.into()
        } else {
            format!("{}.{}", self.join(), key)
        }
    }
}

/// A classified line together with its position in the document
#[derive(Debug, Clone, Copy)]
pub struct ScannedLine<'doc> {
    /// 0-based line index
    pub index: usize,
    pub raw: &'doc str,
    pub indent: usize,
    pub line: Line<'doc>,
}

/// Walks a document line by line, keeping track of the enclosing array keys
///
/// The key path is updated before a line is yielded, so after an
/// [`Line::Open`] it already contains the opened key.
///
/// Scanning stops at the first error. Besides the errors of the line itself
/// and a `]` closing more arrays than were opened, a document that ends while
/// arrays are still open fails with [`LineError::UnclosedNesting`] reported
/// one line past the last, so well-formed files always end at depth 0.
pub struct Scanner<'doc> {
    document: &'doc SourceDocument,
    lines: Enumerate<Iter<'doc, String>>,
    path: KeyPath,
    done: bool,
}

impl<'doc> Scanner<'doc> {
    pub fn new(document: &'doc SourceDocument) -> Self {
        Scanner {
            document,
            lines: document.lines().iter().enumerate(),
            path: KeyPath::default(),
            done: false,
        }
    }

    pub fn path(&self) -> &KeyPath {
        &self.path
    }

    fn step(&mut self, raw: &'doc str) -> Result<Line<'doc>, LineError> {
        let line = Line::classify(raw)?;
        match line {
            Line::Close { terminal: false } => self.path.pop()?,
            Line::Open { key } => self.path.push(key),
            _ => {}
        }
        Ok(line)
    }
}

impl<'doc> Iterator for Scanner<'doc> {
    type Item = Result<ScannedLine<'doc>, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let (index, raw) = match self.lines.next() {
            Some(next) => next,
            None => {
                self.done = true;
                let depth = self.path.depth();
                if depth == 0 {
                    return None;
                }
                return Some(Err(SourceError::new(
                    self.document,
                    self.document.lines().len(),
                    LineError::UnclosedNesting { depth },
                )));
            }
        };

        let result = self.step(raw).at_line(self.document, index);
        if result.is_err() {
            self.done = true;
        }
        Some(result.map(|line| ScannedLine {
            index,
            raw,
            indent: indent_width(raw),
            line,
        }))
    }
}
