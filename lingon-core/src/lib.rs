//! File-backed JSON translations with locale fallback.
//!
//! Translations live in `<root>/languages/<locale>/**/*.json`, one directory
//! per locale named `language_REGION`. A lookup names a locale and a document
//! (`command/help.json` is `command.help`) and then a path inside it
//! (`examples[0].text`). Values missing from the requested locale come from
//! the default locale, and values missing from both come back as the path
//! itself, so a gap in a translation never breaks the caller.
//!
//! - **Store**: loads every locale directory into shared, immutable tables
//! - **Lookup**: two-tier primary/fallback resolution with path addressing
//! - **Templates**: named `{key}` substitution and positional `{0}` formatting
//! - **Bootstrap**: copies bundled default translations on first run
//! - **Reloading**: full or per-locale, without disturbing earlier lookups
//!
//! # Quick Start
//!
//! ```no_run
//! use lingon_core::{Lingon, Locale};
//!
//! let lingon = Lingon::new("data", Locale::en_us())?;
//!
//! // data/languages/zh_TW/b/test.json: {"a": {"chat": ["嗨", "掰"]}}
//! let lang = lingon.get(&Locale::zh_tw(), "b.test");
//! println!("{}", lang.get("a.chat[1]"));
//!
//! // Named placeholders
//! let text = lang.get("welcome").substitute([("name", "Jerry")]);
//!
//! // Positional placeholders with number/date sub-formats
//! let text = lang.get("stats").format(&["Ann".into(), 1234.into()])?;
//! # Ok::<(), lingon_core::LingonError>(())
//! ```
//!
//! # Bundled Translations
//!
//! ```no_run
//! use lingon_core::{Lingon, LingonConfig, Locale};
//! use lingon_core::bootstrap::DirectorySource;
//!
//! let config = LingonConfig::new("data")
//!     .with_default_locale(Locale::en_us())
//!     .with_bundled(DirectorySource::new("resources"));
//! let lingon = Lingon::from_config(config)?;
//! # Ok::<(), lingon_core::LingonError>(())
//! ```

pub mod bootstrap;
mod bundle;
pub mod config;
mod error;
mod format;
mod lingon;
mod locale;
mod localized;
pub mod message_format;
pub mod pointer;
mod store;

pub use bootstrap::{BundledSource, DirectorySource, ImportReport};
#[cfg(feature = "embed")]
pub use bootstrap::EmbeddedSource;
pub use bundle::ResolutionBundle;
pub use config::LingonConfig;
pub use error::LingonError;
pub use format::{
    CurrencyFormatter, DateFormatter, DateStyle, NumberFormatter, TimeStyle, currency_for_locale,
    format_currency, format_date, format_integer, format_number, format_percent,
};
pub use lingon::Lingon;
pub use locale::{Locale, is_locale_dir_name};
pub use localized::LocalizedValue;
pub use message_format::{ChoiceFormat, FormatArg, MessageFormat, format_message};
pub use pointer::resolve;
pub use store::{LocaleTable, LocaleTables, TranslationStore, dotted_name, load_tables};

/// Result type for Lingon operations
pub type Result<T> = std::result::Result<T, LingonError>;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        FormatArg, Lingon, LingonConfig, LingonError, Locale, LocalizedValue, ResolutionBundle,
        Result,
    };
}
