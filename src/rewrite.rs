use crate::document::SourceDocument;
use crate::error::SourceError;
use crate::line::Line;
use crate::scanner::Scanner;
use crate::string::{quote_single, unquote_pair};
use crate::value::{LeafShape, LeafValue, Replacements};
use std::fmt::{self, Display, Formatter};
use tracing::warn;

/// Extra indentation of list items relative to the line opening the list
pub const LIST_INDENT: usize = 4;

/// The lines of a translation file after replacing its values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewrittenFile {
    lines: Vec<String>,
}

impl RewrittenFile {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl Display for RewrittenFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Rewrite a translation file with the values from `replacements`
///
/// Every line that doesn't hold a value is kept as-is (minus trailing
/// whitespace). `key => value` lines with a replacement are rebuilt at their
/// original indentation, lists with a replacement are written out in full
/// below their opening line. The items of the original lists are always
/// dropped, so a list without a replacement ends up empty.
///
/// ## Example
///
/// ```rust
/// use php_lang_transcoder::{rewrite, SourceDocument, LeafValue};
/// use std::collections::HashMap;
/// # use std::error::Error;
///
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let doc = SourceDocument::from_str("auth.php", "return [\n    'title' => 'Login',\n];");
/// let mut replacements = HashMap::new();
/// replacements.insert("title".to_string(), LeafValue::from("Anmelden"));
///
/// let rewritten = rewrite(&doc, &replacements)?;
/// assert_eq!(rewritten.to_string(), "return [\n    'title' => 'Anmelden',\n];\n");
/// # Ok(())
/// # }
/// ```
pub fn rewrite(
    document: &SourceDocument,
    replacements: &Replacements,
) -> Result<RewrittenFile, SourceError> {
    let mut lines = Vec::with_capacity(document.lines().len());
    let mut scanner = Scanner::new(document);

    while let Some(scanned) = scanner.next() {
        let scanned = scanned?;
        let raw = scanned.raw.trim_end();

        match scanned.line {
            Line::Close { .. } | Line::Other => lines.push(raw.into()),
            Line::Open { .. } => {
                lines.push(raw.into());

                let key = scanner.path().join();
                // only a list replacement makes this a substitution point
                if let Some(LeafValue::List(items)) = replacements.get(&key) {
                    let indent = " ".repeat(scanned.indent + LIST_INDENT);
                    lines.extend(
                        items
                            .iter()
                            .map(|item| format!("{}{},", indent, quote_single(item))),
                    );
                }
            }
            Line::Pair { key, value } => match unquote_pair(key, value) {
                Ok((key, _)) => {
                    let flat_key = scanner.path().child(&key);
                    match replacements.get(&flat_key) {
                        Some(LeafValue::Text(text)) => lines.push(format!(
                            "{}{} => {},",
                            " ".repeat(scanned.indent),
                            quote_single(&key),
                            quote_single(text)
                        )),
                        Some(list) => {
                            warn!(
                                file = document.name(),
                                line = scanned.index + 1,
                                key = %flat_key,
                                expected = %LeafShape::Text,
                                found = %list.shape(),
                                "kept line with mismatched replacement"
                            );
                            lines.push(raw.into());
                        }
                        None => lines.push(raw.into()),
                    }
                }
                Err(error) => {
                    warn!(
                        file = document.name(),
                        line = scanned.index + 1,
                        key = key.trim(),
                        %error,
                        "kept line with invalid literal"
                    );
                    lines.push(raw.into());
                }
            },
            // re-emitted from the opening line
            Line::Item { .. } => {}
        }
    }

    Ok(RewrittenFile { lines })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LineError;
    use maplit::hashmap;

    fn rewrite_str(source: &str, replacements: Replacements) -> String {
        let doc = SourceDocument::from_str("test.php", source);
        match rewrite(&doc, &replacements) {
            Ok(file) => file.to_string(),
            Err(err) => panic!("{}", err),
        }
    }

    #[test]
    fn test_rewrite_scalar_keeps_indent() {
        let out = rewrite_str(
            "return [\n    'title' => 'Old',\n];",
            hashmap! { "title".to_string() => LeafValue::from("Néw 'Name'") },
        );
        assert_eq!(out, "return [\n    'title' => 'Néw \\'Name\\'',\n];\n");
    }

    #[test]
    fn test_rewrite_nested_scalar() {
        let out = rewrite_str(
            "return [\n  'a' => [\n\t'b' => \"x\"\n  ],\n  'b' => 'y',\n];",
            hashmap! { "a.b".to_string() => LeafValue::from("z") },
        );
        assert_eq!(out, "return [\n  'a' => [\n 'b' => 'z',\n  ],\n  'b' => 'y',\n];\n");
    }

    #[test]
    fn test_rewrite_list() {
        let source = "return [\n    'colors' => [\n        'cyan',\n        'magenta',\n        'yellow',\n    ],\n];";
        let out = rewrite_str(
            source,
            hashmap! { "colors".to_string() => LeafValue::from(vec!["red", "it's green"]) },
        );
        assert_eq!(
            out,
            "return [\n    'colors' => [\n        'red',\n        'it\\'s green',\n    ],\n];\n"
        );
    }

    #[test]
    fn test_rewrite_drops_unreplaced_list_items() {
        let out = rewrite_str(
            "return [\n    'colors' => [\n        'cyan',\n    ],\n];",
            Replacements::new(),
        );
        assert_eq!(out, "return [\n    'colors' => [\n    ],\n];\n");
    }

    #[test]
    fn test_rewrite_keeps_other_lines() {
        let source = "<?php\n\n// keep me   \nreturn [\n    /* and me */\n    'a' => 'b', \n];";
        let out = rewrite_str(source, hashmap! { "missing".to_string() => LeafValue::from("x") });
        assert_eq!(
            out,
            "<?php\n\n// keep me\nreturn [\n    /* and me */\n    'a' => 'b',\n];\n"
        );
    }

    #[test]
    fn test_rewrite_keeps_invalid_literal_line() {
        let out = rewrite_str(
            "return [\n    'a' => __('x'),\n];",
            hashmap! { "a".to_string() => LeafValue::from("y") },
        );
        assert_eq!(out, "return [\n    'a' => __('x'),\n];\n");
    }

    #[test]
    fn test_rewrite_list_on_pair_is_copied() {
        let out = rewrite_str(
            "return [\n    'a' => 'b',\n];",
            hashmap! { "a".to_string() => LeafValue::from(vec!["b"]) },
        );
        assert_eq!(out, "return [\n    'a' => 'b',\n];\n");
    }

    #[test]
    fn test_rewrite_text_on_array_open_is_copied() {
        let out = rewrite_str(
            "return [\n    'a' => [\n        'b' => 'y',\n    ],\n];",
            hashmap! { "a".to_string() => LeafValue::from("x") },
        );
        assert_eq!(out, "return [\n    'a' => [\n        'b' => 'y',\n    ],\n];\n");
    }

    #[test]
    fn test_rewrite_drops_invalid_list_item() {
        let out = rewrite_str(
            "return [\n    'colors' => [\n        'abc\",\n        'red',\n    ],\n];",
            hashmap! { "colors".to_string() => LeafValue::from(vec!["red"]) },
        );
        assert_eq!(out, "return [\n    'colors' => [\n        'red',\n    ],\n];\n");
    }

    #[test]
    fn test_rewrite_unhandled() {
        let doc = SourceDocument::from_str("test.php", "return [\n    'a\n];");
        let err = rewrite(&doc, &Replacements::new()).unwrap_err();
        assert_eq!(err.kind(), &LineError::UnhandledLine("'a".into()));
        assert!(err.to_string().starts_with("test.php:2:"));
    }
}
