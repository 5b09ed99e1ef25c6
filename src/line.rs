use crate::error::LineError;
use memchr::memmem;

/// The shape of a single trimmed line of a translation file
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Line<'a> {
    /// `]` or `],`, the `];` closing the returned array is terminal
    Close { terminal: bool },
    /// Anything not starting with a quote: comments, blank lines, `return [` etc.
    Other,
    /// `'key' => [`
    Open { key: &'a str },
    /// `'key' => 'value',` split at the first `=>`
    Pair { key: &'a str, value: &'a str },
    /// `'value',` inside a list
    Item { literal: &'a str },
}

impl<'a> Line<'a> {
    /// Classify a line, surrounding whitespace is ignored
    pub fn classify(line: &'a str) -> Result<Self, LineError> {
        let line = line.trim();

        if line.starts_with(']') {
            return Ok(Line::Close {
                terminal: line.ends_with(';'),
            });
        }

        let quote = match line.chars().next() {
            Some(quote @ ('\'' | '"')) => quote,
            _ => return Ok(Line::Other),
        };

        if line.ends_with('[') {
            // the key runs up to the last matching quote, unescaped
            let end = line.rfind(quote).unwrap_or(0).max(1);
            return Ok(Line::Open { key: &line[1..end] });
        }

        if let Some(arrow) = memmem::find(line.as_bytes(), b"=>") {
            return Ok(Line::Pair {
                key: &line[..arrow],
                value: &line[arrow + 2..],
            });
        }

        let body = line.strip_suffix(',').unwrap_or(line);
        if body.ends_with('\'') || body.ends_with('"') {
            return Ok(Line::Item { literal: line });
        }

        Err(LineError::UnhandledLine(line.into()))
    }
}

/// Number of leading whitespace characters of a raw line
pub fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}
