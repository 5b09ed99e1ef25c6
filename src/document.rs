use std::io::{self, BufRead};

/// The raw lines of one translation file
///
/// Line terminators (`\n` or `\r\n`) are not part of the stored lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    name: String,
    lines: Vec<String>,
}

impl SourceDocument {
    pub fn from_str(name: impl Into<String>, source: &str) -> Self {
        SourceDocument {
            name: name.into(),
            lines: source.lines().map(String::from).collect(),
        }
    }

    /// Read a document line by line from `reader`
    pub fn from_reader<R: BufRead>(name: impl Into<String>, reader: R) -> io::Result<Self> {
        Ok(SourceDocument {
            name: name.into(),
            lines: reader.lines().collect::<io::Result<_>>()?,
        })
    }

    /// Name used when reporting warnings and errors, usually the file path
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The document text with `\n` separated lines
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub(crate) fn text_len(&self) -> usize {
        self.line_offset(self.lines.len()).saturating_sub(1)
    }

    /// Byte offset of the start of line `index` in [`text`](Self::text)
    pub(crate) fn line_offset(&self, index: usize) -> usize {
        self.lines.iter().take(index).map(|line| line.len() + 1).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_from_reader() {
        let doc = SourceDocument::from_reader("a.php", Cursor::new("<?php\r\nreturn [\n];\n"))
            .unwrap();
        assert_eq!(doc.lines(), &["<?php", "return [", "];"]);
        assert_eq!(doc, SourceDocument::from_str("a.php", "<?php\nreturn [\n];"));
    }

    #[test]
    fn test_offsets() {
        let doc = SourceDocument::from_str("a.php", "ab\ncde\n\nf");
        assert_eq!(doc.line_offset(0), 0);
        assert_eq!(doc.line_offset(1), 3);
        assert_eq!(doc.line_offset(3), 8);
        assert_eq!(doc.text_len(), doc.text().len());
        assert_eq!(&doc.text()[doc.line_offset(1)..][..3], "cde");
    }
}
