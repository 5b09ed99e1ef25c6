use indexmap::IndexMap;
use parse_display::Display;
use serde_derive::{Deserialize, Serialize};
use std::collections::HashMap;

/// A translated value, either a single string or an ordered list of strings
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LeafValue {
    Text(String),
    List(Vec<String>),
}

/// The two shapes a [`LeafValue`] can take
#[derive(Debug, PartialEq, Eq, Clone, Copy, Display)]
#[display(style = "lowercase")]
pub enum LeafShape {
    Text,
    List,
}

impl LeafValue {
    pub fn shape(&self) -> LeafShape {
        match self {
            LeafValue::Text(_) => LeafShape::Text,
            LeafValue::List(_) => LeafShape::List,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            LeafValue::Text(text) => Some(text),
            LeafValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            LeafValue::List(list) => Some(list),
            LeafValue::Text(_) => None,
        }
    }
}

impl From<&str> for LeafValue {
    fn from(text: &str) -> Self {
        LeafValue::Text(text.into())
    }
}

impl From<String> for LeafValue {
    fn from(text: String) -> Self {
        LeafValue::Text(text)
    }
}

impl<S: Into<String>> From<Vec<S>> for LeafValue {
    fn from(list: Vec<S>) -> Self {
        LeafValue::List(list.into_iter().map(Into::into).collect())
    }
}

impl PartialEq<str> for LeafValue {
    fn eq(&self, other: &str) -> bool {
        self.as_text() == Some(other)
    }
}

impl PartialEq<&str> for LeafValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_text() == Some(*other)
    }
}

/// Flat keys of one file mapped to their values, in file order
pub type FlatMap = IndexMap<String, LeafValue>;

/// Flat keys of one file mapped to the values that should replace them
pub type Replacements = HashMap<String, LeafValue>;

#[test]
fn test_leaf_json() {
    let text: LeafValue = serde_json::from_str(r#""hello""#).unwrap();
    assert_eq!(text, "hello");
    assert_eq!(text.shape(), LeafShape::Text);

    let list: LeafValue = serde_json::from_str(r#"["a", "b"]"#).unwrap();
    assert_eq!(list, LeafValue::from(vec!["a", "b"]));
    assert_eq!(list.as_list().map(<[String]>::len), Some(2));
    assert_eq!(serde_json::to_string(&list).unwrap(), r#"["a","b"]"#);

    assert!(serde_json::from_str::<LeafValue>("12").is_err());
    assert!(serde_json::from_str::<LeafValue>(r#"[1, 2]"#).is_err());
}

#[test]
fn test_shape_display() {
    assert_eq!(LeafShape::Text.to_string(), "text");
    assert_eq!(LeafShape::List.to_string(), "list");
}
