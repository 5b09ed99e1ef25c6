use crate::document::SourceDocument;
use crate::error::MappingError;
use crate::flatten::flatten;
use crate::rewrite::{rewrite, RewrittenFile};
use crate::value::{FlatMap, LeafValue, Replacements};
use indexmap::{IndexMap, IndexSet};
use serde_derive::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::io::BufRead;
use std::path::{Component, Path};
use tracing::{debug, warn};

/// Separates the file key from the flat key in a language mapping
pub const FILE_SEPARATOR: char = '/';

/// Identifies a translation file by its path relative to the language directory
///
/// `admin/users.php` becomes `admin.users`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileKey(String);

impl FileKey {
    pub const EXTENSION: &'static str = "php";

    pub fn from_relative_path(path: &Path) -> Result<Self, MappingError> {
        if path.extension().and_then(|ext| ext.to_str()) != Some(Self::EXTENSION) {
            return Err(MappingError::UnsupportedFile(path.into()));
        }

        let parts: Vec<_> = path
            .with_extension("")
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        Ok(FileKey(parts.join(".")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn prefix(&self) -> String {
        format!("{}{}", self.0, FILE_SEPARATOR)
    }
}

impl Display for FileKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The values of a whole language directory, keyed by `<file key>/<flat key>`
///
/// Serializes to a flat json object, keeping the order in which files and
/// keys were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageMapping {
    entries: IndexMap<String, LeafValue>,
}

impl LanguageMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, MappingError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pretty printed json with 2 space indentation
    pub fn to_json(&self) -> Result<String, MappingError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&LeafValue> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LeafValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Add the flattened values of one file
    pub fn insert_file(&mut self, file: &FileKey, values: FlatMap) {
        let prefix = file.prefix();
        self.entries.extend(
            values
                .into_iter()
                .map(|(key, value)| (format!("{}{}", prefix, key), value)),
        );
    }

    /// Flatten `document` and add its values under the file key of `path`
    ///
    /// Files that aren't php files are skipped with a warning, in which case
    /// `false` is returned.
    pub fn add_document(
        &mut self,
        path: &Path,
        document: &SourceDocument,
    ) -> Result<bool, MappingError> {
        let file = match FileKey::from_relative_path(path) {
            Ok(file) => file,
            Err(error) => {
                warn!(%error, "skipped file");
                return Ok(false);
            }
        };

        let values = flatten(document)?;
        debug!(file = %file, count = values.len(), "flattened file");
        self.insert_file(&file, values);
        Ok(true)
    }

    /// Read a document from `reader` and add it like [`add_document`](Self::add_document)
    pub fn add_reader<R: BufRead>(&mut self, path: &Path, reader: R) -> Result<bool, MappingError> {
        let document = SourceDocument::from_reader(path.to_string_lossy(), reader)?;
        self.add_document(path, &document)
    }

    /// Add all entries of `other`, entries of `other` win on conflict
    pub fn merge(&mut self, other: LanguageMapping) {
        self.entries.extend(other.entries);
    }

    /// The distinct file keys of all entries
    pub fn file_keys(&self) -> IndexSet<&str> {
        self.entries
            .keys()
            .map(|key| key.split_once(FILE_SEPARATOR).map_or(key.as_str(), |(file, _)| file))
            .collect()
    }

    pub fn contains_file(&self, file: &FileKey) -> bool {
        let prefix = file.prefix();
        self.entries.keys().any(|key| key.starts_with(&prefix))
    }

    /// The entries of one file, keyed by their flat key
    pub fn scoped(&self, file: &FileKey) -> Replacements {
        let prefix = file.prefix();
        self.entries
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(&prefix)
                    .map(|flat_key| (flat_key.to_string(), value.clone()))
            })
            .collect()
    }

    /// Rewrite `document` with the entries for the file key of `path`
    ///
    /// Returns `None` for files that aren't php files or have no entries in
    /// the mapping, those files should not be written.
    pub fn apply(
        &self,
        path: &Path,
        document: &SourceDocument,
    ) -> Result<Option<RewrittenFile>, MappingError> {
        let file = match FileKey::from_relative_path(path) {
            Ok(file) => file,
            Err(error) => {
                warn!(%error, "skipped file");
                return Ok(None);
            }
        };

        if !self.contains_file(&file) {
            debug!(file = %file, "no entries for file");
            return Ok(None);
        }

        Ok(Some(rewrite(document, &self.scoped(&file))?))
    }
}
