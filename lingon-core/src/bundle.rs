//! Two-tier document lookup results.

use crate::pointer::{is_missing_or_null, node_text, resolve};
use crate::{Locale, LocalizedValue};
use serde_json::Value;
use std::sync::Arc;

/// The requested locale's document and the default locale's document for one
/// lookup.
///
/// Documents are shared snapshots: a bundle keeps returning what was loaded
/// when it was created, even after the store is reloaded.
///
/// # Examples
///
/// ```
/// use lingon_core::{Locale, ResolutionBundle};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let bundle = ResolutionBundle::new(
///     Locale::zh_tw(),
///     Some("zh_TW".to_string()),
///     Some(Arc::new(json!({"greeting": "你好"}))),
///     Some("en_US".to_string()),
///     Some(Arc::new(json!({"greeting": "Hello", "farewell": "Bye"}))),
/// );
///
/// assert_eq!(bundle.get("greeting").raw(), "你好");
/// assert_eq!(bundle.get("farewell").raw(), "Bye");
/// assert_eq!(bundle.get("missing.key").raw(), "missing.key");
/// ```
#[derive(Debug, Clone)]
pub struct ResolutionBundle {
    locale: Locale,
    primary_locale: Option<String>,
    primary: Option<Arc<Value>>,
    fallback_locale: Option<String>,
    fallback: Option<Arc<Value>>,
}

impl ResolutionBundle {
    /// Create a bundle from already resolved documents.
    pub fn new(
        locale: Locale,
        primary_locale: Option<String>,
        primary: Option<Arc<Value>>,
        fallback_locale: Option<String>,
        fallback: Option<Arc<Value>>,
    ) -> Self {
        Self {
            locale,
            primary_locale,
            primary,
            fallback_locale,
            fallback,
        }
    }

    /// Resolve `path` to text.
    ///
    /// Tries the primary document, then the fallback. A node that is missing
    /// or JSON `null` in both yields `path` itself. Strings give their content,
    /// other nodes their compact JSON.
    pub fn get(&self, path: &str) -> LocalizedValue {
        let text = self
            .node(path)
            .map(node_text)
            .unwrap_or_else(|| path.to_string());
        LocalizedValue::new(text, self.locale.clone())
    }

    /// Resolve `path` to the raw JSON node, primary first.
    ///
    /// JSON `null` in the primary document falls through to the fallback.
    pub fn node(&self, path: &str) -> Option<&Value> {
        let primary = resolve(self.primary.as_deref(), path);
        if !is_missing_or_null(primary) {
            return primary;
        }

        let fallback = resolve(self.fallback.as_deref(), path);
        if !is_missing_or_null(fallback) {
            return fallback;
        }

        None
    }

    /// Check if `path` resolves to a non-null node in either document.
    pub fn contains(&self, path: &str) -> bool {
        self.node(path).is_some()
    }

    /// Locale the lookup was made for.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Directory name of the requested locale.
    pub fn primary_locale(&self) -> Option<&str> {
        self.primary_locale.as_deref()
    }

    /// Document of the requested locale, if it exists.
    pub fn primary(&self) -> Option<&Value> {
        self.primary.as_deref()
    }

    /// Directory name of the default locale.
    pub fn fallback_locale(&self) -> Option<&str> {
        self.fallback_locale.as_deref()
    }

    /// Document of the default locale, if it exists.
    pub fn fallback(&self) -> Option<&Value> {
        self.fallback.as_deref()
    }

    /// Check if neither document exists.
    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.fallback.is_none()
    }
}
