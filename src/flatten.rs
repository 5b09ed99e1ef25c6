use crate::document::SourceDocument;
use crate::error::SourceError;
use crate::line::Line;
use crate::scanner::Scanner;
use crate::string::{unquote, unquote_pair};
use crate::value::{FlatMap, LeafValue};
use indexmap::map::Entry;
use tracing::warn;

/// Flatten the nested arrays of a translation file into dotted keys
///
/// Values that fail to unquote are logged and left out of the result, any
/// structural problem with the file is returned as an error.
///
/// ## Example
///
/// ```rust
/// use php_lang_transcoder::{flatten, SourceDocument};
/// # use std::error::Error;
///
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let doc = SourceDocument::from_str("auth.php", "return [\n    'nested' => [\n        'title' => 'Login',\n    ],\n];");
/// let map = flatten(&doc)?;
///
/// assert_eq!(map["nested.title"], "Login");
/// # Ok(())
/// # }
/// ```
pub fn flatten(document: &SourceDocument) -> Result<FlatMap, SourceError> {
    let mut map = FlatMap::new();
    let mut scanner = Scanner::new(document);

    while let Some(scanned) = scanner.next() {
        let scanned = scanned?;
        match scanned.line {
            Line::Pair { key, value } => match unquote_pair(key, value) {
                Ok((key, value)) => {
                    map.insert(scanner.path().child(&key), LeafValue::Text(value));
                }
                Err(error) => warn!(
                    file = document.name(),
                    line = scanned.index + 1,
                    key = key.trim(),
                    %error,
                    "ignored entry"
                ),
            },
            Line::Item { literal } => match unquote(literal) {
                Ok(item) => push_item(&mut map, scanner.path().join(), item),
                Err(error) => warn!(
                    file = document.name(),
                    line = scanned.index + 1,
                    key = %scanner.path().join(),
                    %error,
                    "ignored list item"
                ),
            },
            Line::Close { .. } | Line::Other | Line::Open { .. } => {}
        }
    }

    Ok(map)
}

fn push_item(map: &mut FlatMap, key: String, item: String) {
    match map.entry(key) {
        Entry::Occupied(mut entry) => match entry.get_mut() {
            LeafValue::List(list) => list.push(item),
            text => *text = LeafValue::List(vec![item]),
        },
        Entry::Vacant(entry) => {
            entry.insert(LeafValue::List(vec![item]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(source: &str) -> FlatMap {
        flatten(&SourceDocument::from_str("test.php", source)).unwrap()
    }

    #[test]
    fn test_flatten_nested() {
        let map = flat(
            r#"<?php

return [
    // comment
    'title' => 'Panel',
    "quoted" => "say \"hi\"",
    'auth' => [
        'login' => [
            'button' => 'Log in',
        ],
        'logout' => 'Log out',
    ],
    'after' => 'it\'s',
];
"#,
        );

        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["title", "quoted", "auth.login.button", "auth.logout", "after"]
        );
        assert_eq!(map["quoted"], "say \"hi\"");
        assert_eq!(map["auth.login.button"], "Log in");
        assert_eq!(map["after"], "it's");
    }

    #[test]
    fn test_flatten_list() {
        let map = flat(
            "return [\n    'colors' => [\n        'red',\n        \"green\",\n        'blue'\n    ],\n];",
        );
        assert_eq!(map["colors"], LeafValue::from(vec!["red", "green", "blue"]));
    }

    #[test]
    fn test_flatten_skips_invalid_value() {
        let map = flat("return [\n    'good' => 'yes',\n    'bad' => trans('x'),\n];");
        assert_eq!(map.len(), 1);
        assert!(map.get("bad").is_none());
    }

    #[test]
    fn test_flatten_skips_invalid_key() {
        let map = flat("return [\n    'bad\" => 'x',\n    'good' => 'yes',\n];");
        assert_eq!(map.keys().collect::<Vec<_>>(), ["good"]);
    }

    #[test]
    fn test_flatten_skips_invalid_list_item() {
        let map = flat("return [\n    'colors' => [\n        'abc\",\n        'red',\n    ],\n];");
        assert_eq!(map["colors"], LeafValue::from(vec!["red"]));
    }

    #[test]
    fn test_flatten_lone_quote_item() {
        let map = flat("return [\n    'list' => [\n        '',\n        ',\n    ],\n];");
        assert_eq!(map["list"], LeafValue::from(vec!["", ""]));
    }

    #[test]
    fn test_flatten_duplicate_key_last_wins() {
        let map = flat("return [\n    'a' => 'first',\n    'b' => 'other',\n    'a' => 'second',\n];");
        assert_eq!(map["a"], "second");
        // the first occurrence keeps its position
        assert_eq!(map.get_index_of("a"), Some(0));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_flatten_list_replaces_text() {
        let map = flat("return [\n    'a' => 'text',\n    'a' => [\n        'item',\n    ],\n];");
        assert_eq!(map["a"], LeafValue::from(vec!["item"]));
    }

    #[test]
    fn test_flatten_empty() {
        assert!(flat("").is_empty());
        assert!(flat("<?php\n\nreturn [\n];\n").is_empty());
    }
}
