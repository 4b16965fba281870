//! Resolved translation text.

use crate::message_format::{FormatArg, MessageFormat};
use crate::{Locale, Result};
use std::fmt;

/// A resolved translation template, or the lookup key when nothing was found.
///
/// # Examples
///
/// ```
/// use lingon_core::{LocalizedValue, Locale};
///
/// let value = LocalizedValue::new("Hello {name}", Locale::en_us());
/// assert_eq!(value.raw(), "Hello {name}");
/// assert_eq!(value.substitute([("name", "Jerry")]), "Hello Jerry");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedValue {
    template: String,
    locale: Locale,
}

impl LocalizedValue {
    /// Wrap a template. `locale` drives number and date rendering in
    /// [`LocalizedValue::format`].
    pub fn new(template: impl Into<String>, locale: Locale) -> Self {
        Self {
            template: template.into(),
            locale,
        }
    }

    /// The template with no substitution applied.
    pub fn raw(&self) -> &str {
        &self.template
    }

    /// Locale used for formatting.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Replace `{key}` placeholders with the given values.
    ///
    /// Entries are applied one after another in iteration order, each over the
    /// output of the previous one. Placeholders with no entry stay as they are.
    ///
    /// ```
    /// use lingon_core::{LocalizedValue, Locale};
    /// use std::collections::BTreeMap;
    ///
    /// let value = LocalizedValue::new("{user} sent {count} files to {other}", Locale::en_us());
    /// let mut values = BTreeMap::new();
    /// values.insert("user", "Ann".to_string());
    /// values.insert("count", 3.to_string());
    /// assert_eq!(value.substitute(&values), "Ann sent 3 files to {other}");
    /// ```
    pub fn substitute<I, K, V>(&self, values: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: fmt::Display,
    {
        values
            .into_iter()
            .fold(self.template.clone(), |text, (key, value)| {
                let placeholder = format!("{{{}}}", key.as_ref());
                text.replace(&placeholder, &value.to_string())
            })
    }

    /// Render positional `{0}`, `{1}`, ... placeholders.
    ///
    /// See [`crate::message_format`] for the supported sub-formats. Fails with
    /// [`LingonError::Format`](crate::LingonError::Format) when the template is
    /// not a valid pattern.
    ///
    /// ```
    /// use lingon_core::{LocalizedValue, Locale};
    ///
    /// let value = LocalizedValue::new("{0} has {1,number,integer} items", Locale::en_us());
    /// assert_eq!(value.format(&["Ann".into(), 1234.into()]).unwrap(), "Ann has 1,234 items");
    /// ```
    pub fn format(&self, args: &[FormatArg]) -> Result<String> {
        MessageFormat::new(&self.template, self.locale.clone())?.format(args)
    }

    /// Take the template out.
    pub fn into_string(self) -> String {
        self.template
    }
}

impl fmt::Display for LocalizedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

impl AsRef<str> for LocalizedValue {
    fn as_ref(&self) -> &str {
        &self.template
    }
}

impl From<LocalizedValue> for String {
    fn from(value: LocalizedValue) -> Self {
        value.template
    }
}

impl PartialEq<str> for LocalizedValue {
    fn eq(&self, other: &str) -> bool {
        self.template == other
    }
}

impl PartialEq<&str> for LocalizedValue {
    fn eq(&self, other: &&str) -> bool {
        self.template == *other
    }
}
