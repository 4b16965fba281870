//! Lingon configuration.
//!
//! Built in code with [`LingonConfig::new`] and the `with_*` methods, or read
//! from a TOML or JSON file:
//!
//! ```toml
//! root = "data"                 # languages live in data/languages
//! default_locale = "en_US"
//! resources = "resources"       # bundled files in resources/languages
//! create_directories = true
//! ```
//!
//! Relative paths in a file are resolved against the file's directory.

use crate::bootstrap::{BundledSource, DirectorySource};
use crate::{LingonError, Locale, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    /// Pick a format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }

    /// Pick a format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                LingonError::Config(format!("No file extension on {}", path.display()))
            })?;

        Self::from_extension(ext)
            .ok_or_else(|| LingonError::Config(format!("Unsupported config format: {}", ext)))
    }
}

/// File form of [`LingonConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LingonConfigFile {
    /// Base directory; translations are read from `<root>/languages`
    pub root: PathBuf,
    /// Locale used when the requested one lacks a value
    #[serde(default)]
    pub default_locale: Option<Locale>,
    /// Resource directory whose `languages/` subdirectory is imported
    #[serde(default)]
    pub resources: Option<PathBuf>,
    /// Create the languages directory when missing
    #[serde(default = "default_create_directories")]
    pub create_directories: bool,
}

fn default_create_directories() -> bool {
    true
}

/// Settings for constructing a [`Lingon`](crate::Lingon).
#[derive(Debug, Clone)]
pub struct LingonConfig {
    /// Base directory; translations are read from `<root>/languages`
    pub root: PathBuf,
    /// Locale used when the requested one lacks a value
    pub default_locale: Locale,
    /// Translation files to import before the first load
    pub bundled: Option<Arc<dyn BundledSource>>,
    /// Create the languages directory when missing. When `false`, bundled
    /// files are only imported into a languages directory that already exists.
    pub create_directories: bool,
}

impl LingonConfig {
    /// Create a configuration rooted at `root`, defaulting to `en_US`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            default_locale: Locale::en_us(),
            bundled: None,
            create_directories: true,
        }
    }

    /// Set the default (fallback) locale.
    pub fn with_default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = locale;
        self
    }

    /// Import `source` into the languages directory on construction.
    pub fn with_bundled(mut self, source: impl BundledSource + 'static) -> Self {
        self.bundled = Some(Arc::new(source));
        self
    }

    /// Set whether the languages directory is created when missing.
    pub fn with_create_directories(mut self, create: bool) -> Self {
        self.create_directories = create;
        self
    }

    /// Directory translations are read from.
    pub fn languages_path(&self) -> PathBuf {
        self.root.join(crate::bootstrap::LANGUAGES_DIR)
    }

    /// Parse configuration text.
    ///
    /// ```
    /// use lingon_core::config::{FileFormat, LingonConfig};
    /// use lingon_core::Locale;
    ///
    /// let config = LingonConfig::parse(
    ///     r#"
    ///         root = "data"
    ///         default_locale = "zh_TW"
    ///     "#,
    ///     FileFormat::Toml,
    /// )?;
    /// assert_eq!(config.default_locale, Locale::zh_tw());
    /// # Ok::<(), lingon_core::LingonError>(())
    /// ```
    pub fn parse(content: &str, format: FileFormat) -> Result<Self> {
        Ok(Self::from(LingonConfigFile::parse(content, format)?))
    }

    /// Read configuration from a `.toml` or `.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = FileFormat::from_path(path)?;
        let content = fs::read_to_string(path).map_err(|e| LingonError::io(path, e))?;

        let mut file = LingonConfigFile::parse(&content, format)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        file.root = base.join(&file.root);
        file.resources = file.resources.map(|resources| base.join(resources));
        Ok(Self::from(file))
    }
}

impl LingonConfigFile {
    /// Deserialize the file form.
    pub fn parse(content: &str, format: FileFormat) -> Result<Self> {
        match format {
            FileFormat::Json => serde_json::from_str(content)
                .map_err(|e| LingonError::Config(format!("JSON parse error: {}", e))),
            FileFormat::Toml => toml::from_str(content)
                .map_err(|e| LingonError::Config(format!("TOML parse error: {}", e))),
        }
    }
}

impl From<LingonConfigFile> for LingonConfig {
    fn from(file: LingonConfigFile) -> Self {
        let mut config = LingonConfig::new(file.root)
            .with_create_directories(file.create_directories);
        if let Some(locale) = file.default_locale {
            config = config.with_default_locale(locale);
        }
        if let Some(resources) = file.resources {
            config = config.with_bundled(DirectorySource::new(resources));
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builder() {
        let config = LingonConfig::new("/srv/app")
            .with_default_locale(Locale::zh_tw())
            .with_create_directories(false)
            .with_bundled(DirectorySource::new("/srv/res"));

        assert_eq!(config.default_locale, Locale::zh_tw());
        assert!(!config.create_directories);
        assert!(config.bundled.is_some());
        assert_eq!(config.languages_path(), PathBuf::from("/srv/app/languages"));
    }

    #[test]
    fn test_defaults() {
        let config = LingonConfig::new("data");
        assert_eq!(config.default_locale, Locale::en_us());
        assert!(config.create_directories);
        assert!(config.bundled.is_none());
    }

    #[test]
    fn test_parse_json() {
        let config = LingonConfig::parse(
            r#"{"root": "data", "default_locale": "fr-FR", "create_directories": false}"#,
            FileFormat::Json,
        )
        .unwrap();
        assert_eq!(config.root, PathBuf::from("data"));
        assert_eq!(config.default_locale, Locale::fr_fr());
        assert!(!config.create_directories);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            LingonConfig::parse("root = ", FileFormat::Toml),
            Err(LingonError::Config(_))
        ));
        assert!(matches!(
            LingonConfig::parse(r#"{"default_locale": "en_US"}"#, FileFormat::Json),
            Err(LingonError::Config(_))
        ));
        assert!(matches!(
            LingonConfig::parse(r#"{"root": "x", "default_locale": "???"}"#, FileFormat::Json),
            Err(LingonError::Config(_))
        ));
    }

    #[test]
    fn test_file_format_detection() {
        assert_eq!(FileFormat::from_extension("TOML"), Some(FileFormat::Toml));
        assert_eq!(FileFormat::from_path(Path::new("a.json")).unwrap(), FileFormat::Json);
        assert!(FileFormat::from_path(Path::new("a.yaml")).is_err());
        assert!(FileFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_from_file_resolves_relative_paths() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lingon.toml");
        fs::write(
            &path,
            "root = \"data\"\ndefault_locale = \"zh_TW\"\nresources = \"res\"\n",
        )
        .unwrap();

        let config = LingonConfig::from_file(&path).unwrap();
        assert_eq!(config.root, dir.path().join("data"));
        assert_eq!(config.default_locale, Locale::zh_tw());
        let bundled = config.bundled.unwrap();
        assert!(bundled.describe().starts_with(&dir.path().join("res").display().to_string()));
    }

    #[test]
    fn test_from_file_missing() {
        let dir = TempDir::new().unwrap();
        let err = LingonConfig::from_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, LingonError::Io { .. }));
    }
}
