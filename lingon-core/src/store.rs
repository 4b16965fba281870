//! On-disk translation store.
//!
//! Expected layout under the languages root:
//!
//! ```text
//! languages/
//!   en_US/
//!     common.json          -> "common"
//!     command/help.json    -> "command.help"
//!   zh_TW/
//!     common.json
//! ```
//!
//! Only top-level directories named like `xx_YY` are read. Every `.json`
//! file below one (any depth, extension matched case-insensitively) becomes a
//! document named by its relative path with separators turned into dots.

use crate::locale::is_locale_dir_name;
use crate::{LingonError, Result};
use lingon_log::debug;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use walkdir::WalkDir;

/// All documents of one locale directory, keyed by dotted name.
///
/// A table is never modified after it is built; reloads install a new one.
#[derive(Debug, Clone, Default)]
pub struct LocaleTable {
    documents: HashMap<String, Arc<Value>>,
}

impl LocaleTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every `.json` file below `dir`.
    ///
    /// A missing directory yields an empty table. Unreadable entries and
    /// malformed JSON are errors.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut table = Self::new();
        if !dir.is_dir() {
            return Ok(table);
        }

        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                match e.into_io_error() {
                    Some(source) => LingonError::io(path, source),
                    None => LingonError::io(
                        path,
                        std::io::Error::other("filesystem loop detected"),
                    ),
                }
            })?;

            if !entry.file_type().is_file() || !has_json_extension(entry.path()) {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(dir).unwrap_or(path);
            let name = dotted_name(relative);

            let content = fs::read(path).map_err(|e| LingonError::io(path, e))?;
            let document: Value =
                serde_json::from_slice(&content).map_err(|e| LingonError::parse(path, e))?;

            table.insert(name, document);
        }

        Ok(table)
    }

    /// Add or replace a document.
    pub fn insert(&mut self, name: impl Into<String>, document: Value) {
        self.documents.insert(name.into(), Arc::new(document));
    }

    /// Get a document by dotted name.
    pub fn get(&self, name: &str) -> Option<&Arc<Value>> {
        self.documents.get(name)
    }

    /// Check if the table holds a document.
    pub fn contains(&self, name: &str) -> bool {
        self.documents.contains_key(name)
    }

    /// Dotted names of all documents, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.documents.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if the table has no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Map a path relative to a locale directory to its document name.
///
/// `command/help.json` becomes `command.help`; a trailing `.json` is removed
/// regardless of case.
pub fn dotted_name(relative: &Path) -> String {
    let mut name = relative.to_string_lossy().replace('\\', "/");
    if name.to_ascii_lowercase().ends_with(".json") {
        name.truncate(name.len() - ".json".len());
    }
    name.replace('/', ".")
}

fn has_json_extension(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.to_ascii_lowercase().ends_with(".json"))
}

/// Locale tables keyed by canonical directory name.
pub type LocaleTables = HashMap<String, Arc<LocaleTable>>;

/// Read every locale directory under `root`.
///
/// Returns an empty set when `root` does not exist.
pub fn load_tables(root: &Path) -> Result<LocaleTables> {
    let mut tables = LocaleTables::new();
    if !root.is_dir() {
        debug!(path = root.display(); "Languages directory does not exist yet");
        return Ok(tables);
    }

    let entries = fs::read_dir(root).map_err(|e| LingonError::io(root, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| LingonError::io(root, e))?;
        let path = entry.path();

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !is_locale_dir_name(name) || !path.is_dir() {
            continue;
        }

        let table = LocaleTable::load(&path)?;
        debug!(locale = name; "Loaded {} documents", table.len());
        tables.insert(name.to_string(), Arc::new(table));
    }

    Ok(tables)
}

/// In-memory view of a languages directory.
///
/// The store does no I/O after [`TranslationStore::load`]; callers read
/// tables with [`load_tables`] or [`LocaleTable::load`] and install them with
/// [`TranslationStore::replace_all`] or [`TranslationStore::replace_locale`].
#[derive(Debug, Clone, Default)]
pub struct TranslationStore {
    tables: LocaleTables,
}

impl TranslationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every locale directory under `root`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use lingon_core::TranslationStore;
    ///
    /// let store = TranslationStore::load("data/languages")?;
    /// for locale in store.loaded_locales() {
    ///     println!("{locale}");
    /// }
    /// # Ok::<(), lingon_core::LingonError>(())
    /// ```
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            tables: load_tables(root.as_ref())?,
        })
    }

    /// Install a freshly loaded set of tables.
    pub fn replace_all(&mut self, tables: LocaleTables) {
        self.tables = tables;
    }

    /// Install or drop one locale. Empty tables remove the entry.
    pub fn replace_locale(&mut self, name: &str, table: LocaleTable) -> bool {
        if table.is_empty() {
            self.tables.remove(name);
            false
        } else {
            self.tables.insert(name.to_string(), Arc::new(table));
            true
        }
    }

    /// Names of all loaded locales, sorted.
    pub fn loaded_locales(&self) -> BTreeSet<String> {
        self.tables.keys().cloned().collect()
    }

    /// Get the table for a locale directory name.
    pub fn table(&self, locale: &str) -> Option<Arc<LocaleTable>> {
        self.tables.get(locale).cloned()
    }

    /// Get one document of one locale.
    pub fn document(&self, locale: &str, name: &str) -> Option<Arc<Value>> {
        self.tables.get(locale)?.get(name).cloned()
    }

    /// Number of loaded locales.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if no locale is loaded.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_dotted_name() {
        assert_eq!(dotted_name(Path::new("common.json")), "common");
        assert_eq!(dotted_name(Path::new("command/help.json")), "command.help");
        assert_eq!(dotted_name(Path::new("a/b/c.JSON")), "a.b.c");
        assert_eq!(dotted_name(Path::new("command\\help.json")), "command.help");
    }

    #[test]
    fn test_load_nested_documents() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "en_US/common.json", r#"{"hello": "Hello"}"#);
        write(dir.path(), "en_US/command/help.json", r#"{"usage": "Usage"}"#);
        write(dir.path(), "en_US/UPPER.JSON", r#"{"x": 1}"#);
        write(dir.path(), "en_US/notes.txt", "ignored");

        let store = TranslationStore::load(dir.path()).unwrap();
        let table = store.table("en_US").unwrap();
        assert_eq!(table.names(), vec!["UPPER", "command.help", "common"]);
        assert_eq!(
            store.document("en_US", "command.help").as_deref(),
            Some(&json!({"usage": "Usage"}))
        );
    }

    #[test]
    fn test_ignores_non_locale_directories() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "en_US/common.json", "{}");
        write(dir.path(), "backup/common.json", "{}");
        write(dir.path(), "en/common.json", "{}");
        write(dir.path(), "EN_us/common.json", "{}");
        write(dir.path(), "zh_TW.json", "{}");

        let store = TranslationStore::load(dir.path()).unwrap();
        assert_eq!(store.loaded_locales(), BTreeSet::from(["en_US".to_string()]));
    }

    #[test]
    fn test_missing_root_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = TranslationStore::load(dir.path().join("nope")).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "en_US/good.json", "{}");
        write(dir.path(), "en_US/bad.json", "{ not json");

        let err = TranslationStore::load(dir.path()).unwrap_err();
        match err {
            LingonError::Parse { path, .. } => assert!(path.ends_with("bad.json")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_replace_locale() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "en_US/common.json", r#"{"a": "1"}"#);
        write(dir.path(), "zh_TW/common.json", r#"{"a": "一"}"#);
        let mut store = TranslationStore::load(dir.path()).unwrap();

        write(dir.path(), "en_US/common.json", r#"{"a": "2"}"#);
        let table = LocaleTable::load(&dir.path().join("en_US")).unwrap();
        assert!(store.replace_locale("en_US", table));
        assert_eq!(store.document("en_US", "common").as_deref(), Some(&json!({"a": "2"})));

        fs::remove_dir_all(dir.path().join("zh_TW")).unwrap();
        let table = LocaleTable::load(&dir.path().join("zh_TW")).unwrap();
        assert!(table.is_empty());
        assert!(!store.replace_locale("zh_TW", table));
        assert_eq!(store.loaded_locales(), BTreeSet::from(["en_US".to_string()]));
    }

    #[test]
    fn test_malformed_locale_table_leaves_store_alone() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "en_US/common.json", r#"{"a": "1"}"#);
        let store = TranslationStore::load(dir.path()).unwrap();

        write(dir.path(), "en_US/common.json", "[");
        assert!(load_tables(dir.path()).is_err());
        assert!(LocaleTable::load(&dir.path().join("en_US")).is_err());
        assert_eq!(store.document("en_US", "common").as_deref(), Some(&json!({"a": "1"})));
    }

    #[test]
    fn test_documents_survive_replace_all() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "en_US/common.json", r#"{"a": "old"}"#);
        let mut store = TranslationStore::load(dir.path()).unwrap();
        let before = store.document("en_US", "common").unwrap();

        write(dir.path(), "en_US/common.json", r#"{"a": "new"}"#);
        store.replace_all(load_tables(dir.path()).unwrap());

        assert_eq!(*before, json!({"a": "old"}));
        assert_eq!(store.document("en_US", "common").as_deref(), Some(&json!({"a": "new"})));
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = TranslationStore::new();
        assert!(store.is_empty());
        assert!(store.table("en_US").is_none());
    }

    #[test]
    fn test_locale_table_basics() {
        let mut table = LocaleTable::new();
        assert!(table.is_empty());
        table.insert("common", json!({"k": "v"}));
        assert!(table.contains("common"));
        assert!(!table.contains("other"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("common").map(|d| d["k"].clone()), Some(json!("v")));
    }
}
