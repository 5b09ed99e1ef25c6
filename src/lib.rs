//! Transcode php translation arrays to flat key/value maps and back.
//!
//! [`flatten`] turns a file like
//!
//! ```php
//! return [
//!     'auth' => [
//!         'title' => 'Login',
//!     ],
//! ];
//! ```
//!
//! into `auth.title => Login`, [`rewrite`] writes replacement values back
//! into the original file, keeping comments, blank lines and indentation.
//! [`LanguageMapping`] collects the values of a whole language directory
//! into the json form used for translating.
mod document;
mod error;
mod flatten;
mod line;
mod mapping;
mod rewrite;
mod scanner;
mod string;
mod value;

pub use document::SourceDocument;
pub use error::{InvalidLiteralError, LineError, MappingError, SourceError};
pub use flatten::flatten;
pub use line::Line;
pub use mapping::{FileKey, LanguageMapping, FILE_SEPARATOR};
pub use rewrite::{rewrite, RewrittenFile, LIST_INDENT};
pub use scanner::{KeyPath, ScannedLine, Scanner};
pub use string::{quote_single, unquote};
pub use value::{FlatMap, LeafShape, LeafValue, Replacements};
