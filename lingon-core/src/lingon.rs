//! The shared translation handle.

use crate::bootstrap::{import, BundledSource};
use crate::locale::is_locale_dir_name;
use crate::store::{load_tables, LocaleTable, TranslationStore};
use crate::{LingonConfig, LingonError, Locale, ResolutionBundle, Result};
use lingon_log::{debug, info, warn};
use parking_lot::RwLock;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Localized text lookup over `<root>/languages`.
///
/// Cloning is cheap and clones share the same store and default locale.
///
/// # Examples
///
/// ```no_run
/// use lingon_core::{Lingon, Locale};
///
/// let lingon = Lingon::new("data", Locale::en_us())?;
/// let help = lingon.get(&Locale::zh_tw(), "command.help");
/// println!("{}", help.get("usage"));
/// println!("{}", help.get("examples[0]").substitute([("name", "Jerry")]));
/// # Ok::<(), lingon_core::LingonError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Lingon {
    languages_path: PathBuf,
    store: Arc<RwLock<TranslationStore>>,
    default_locale: Arc<RwLock<Locale>>,
}

impl Lingon {
    /// Open `<root>/languages` with no bundled files.
    pub fn new(root: impl Into<PathBuf>, default_locale: Locale) -> Result<Self> {
        Self::from_config(LingonConfig::new(root).with_default_locale(default_locale))
    }

    /// Import `bundled` into `<root>/languages`, then open it.
    pub fn with_bundled(
        bundled: impl BundledSource + 'static,
        root: impl Into<PathBuf>,
        default_locale: Locale,
    ) -> Result<Self> {
        Self::from_config(
            LingonConfig::new(root)
                .with_default_locale(default_locale)
                .with_bundled(bundled),
        )
    }

    /// Build from a configuration.
    ///
    /// Creates the languages directory (unless disabled), imports bundled
    /// files, then loads every locale. Malformed JSON fails construction.
    pub fn from_config(config: LingonConfig) -> Result<Self> {
        let languages_path = config.languages_path();

        if config.create_directories && !languages_path.exists() {
            fs::create_dir_all(&languages_path)
                .map_err(|e| LingonError::io(&languages_path, e))?;
            info!(path = languages_path.display(); "Created languages directory");
        }

        if let Some(bundled) = &config.bundled {
            if languages_path.is_dir() {
                import(bundled.as_ref(), &languages_path)?;
            } else {
                debug!(path = languages_path.display(); "Skipping bootstrap, directory missing");
            }
        }

        let store = TranslationStore::load(&languages_path)?;
        info!(
            default_locale = config.default_locale;
            "Lingon initialized with {} locales",
            store.len()
        );

        Ok(Self {
            languages_path,
            store: Arc::new(RwLock::new(store)),
            default_locale: Arc::new(RwLock::new(config.default_locale)),
        })
    }

    /// Look up the document `name` for `locale`, with the default locale as
    /// fallback.
    ///
    /// Never fails: missing locales or documents give a bundle whose lookups
    /// return their keys.
    pub fn get(&self, locale: &Locale, name: &str) -> ResolutionBundle {
        let primary_key = locale.canonical_name();
        let fallback_key = self.default_locale.read().canonical_name();

        let (primary, fallback) = {
            let store = self.store.read();
            (
                primary_key
                    .as_deref()
                    .and_then(|key| store.document(key, name)),
                fallback_key
                    .as_deref()
                    .and_then(|key| store.document(key, name)),
            )
        };

        if primary.is_none() && fallback.is_none() {
            warn!(
                document = name,
                locale = primary_key.as_deref().unwrap_or("<none>"),
                fallback = fallback_key.as_deref().unwrap_or("<none>");
                "Missing translation document"
            );
        }

        ResolutionBundle::new(locale.clone(), primary_key, primary, fallback_key, fallback)
    }

    /// Change the fallback locale for later lookups.
    pub fn set_default_locale(&self, locale: Locale) {
        *self.default_locale.write() = locale;
    }

    /// The current fallback locale.
    pub fn default_locale(&self) -> Locale {
        self.default_locale.read().clone()
    }

    /// Re-read every locale from disk.
    ///
    /// Bundles obtained earlier keep their documents. On error nothing
    /// changes.
    pub fn reload(&self) -> Result<()> {
        info!(path = self.languages_path.display(); "Reloading language data");
        let tables = load_tables(&self.languages_path)?;

        let count = tables.len();
        self.store.write().replace_all(tables);
        info!("Language data reloaded for {} locales", count);
        Ok(())
    }

    /// Re-read one locale from disk.
    ///
    /// Returns `Ok(false)` when the locale does not name a `language_REGION`
    /// directory or its directory holds no documents; in the latter case it
    /// is also dropped from [`Lingon::loaded_locales`].
    pub fn reload_locale(&self, locale: &Locale) -> Result<bool> {
        let Some(name) = locale
            .canonical_name()
            .filter(|name| is_locale_dir_name(name))
        else {
            warn!(locale = format!("{locale:?}"); "Locale does not name a language directory");
            return Ok(false);
        };

        debug!(locale = &name; "Reloading locale data");
        let table = LocaleTable::load(&self.languages_path.join(&name))?;

        if table.is_empty() {
            warn!(locale = &name; "No data found for locale");
        }

        let found = self.store.write().replace_locale(&name, table);
        if found {
            info!(locale = &name; "Reloaded locale");
        }
        Ok(found)
    }

    /// Names of the loaded locale directories.
    pub fn loaded_locales(&self) -> BTreeSet<String> {
        self.store.read().loaded_locales()
    }

    /// The directory translations are read from.
    pub fn languages_path(&self) -> &Path {
        &self.languages_path
    }
}
