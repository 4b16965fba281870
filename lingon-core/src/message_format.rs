//! Positional message formatting.
//!
//! Patterns use numbered placeholders with optional sub-formats:
//!
//! | Placeholder                      | Renders                                   |
//! |----------------------------------|-------------------------------------------|
//! | `{0}`                            | argument 0 with its default presentation  |
//! | `{0,number}`                     | grouped number, up to 3 fraction digits   |
//! | `{0,number,integer}`             | rounded (half-even) grouped integer       |
//! | `{0,number,percent}`             | ratio as a percentage                     |
//! | `{0,number,currency}`            | amount in the locale's currency           |
//! | `{0,date}` / `{0,date,long}`     | date in the given style (medium default)  |
//! | `{0,time}` / `{0,time,short}`    | time in the given style (medium default)  |
//! | `{0,choice,0#none\|1#one\|1<many}` | text chosen by numeric range            |
//!
//! A single quote starts a literal section (`'{0}'` prints `{0}`), and `''`
//! prints one quote. A placeholder without a matching argument is left as
//! `{N}`.
//!
//! # Examples
//!
//! ```
//! use lingon_core::{format_message, FormatArg, Locale};
//!
//! let text = format_message(
//!     "{0} has {1,number,integer} items",
//!     &Locale::en_us(),
//!     &[FormatArg::from("Ann"), FormatArg::from(1234)],
//! )
//! .unwrap();
//! assert_eq!(text, "Ann has 1,234 items");
//! ```

use crate::format::{
    format_integer, format_number, format_percent, CurrencyFormatter, DateFormatter, DateStyle,
    NumberFormatter, TimeStyle,
};
use crate::{LingonError, Locale, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

// ============================================================================
// Arguments
// ============================================================================

/// A value substituted into a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    /// Plain text
    Text(String),
    /// Integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Boolean, rendered as `true`/`false`
    Bool(bool),
    /// Calendar date
    Date(NaiveDate),
    /// Wall-clock time
    Time(NaiveTime),
    /// Date and time
    DateTime(NaiveDateTime),
}

impl FormatArg {
    /// Numeric value of the argument, if it is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FormatArg::Int(n) => Some(*n as f64),
            FormatArg::Float(n) => Some(*n),
            _ => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            FormatArg::Text(_) => "text",
            FormatArg::Int(_) => "integer",
            FormatArg::Float(_) => "float",
            FormatArg::Bool(_) => "boolean",
            FormatArg::Date(_) => "date",
            FormatArg::Time(_) => "time",
            FormatArg::DateTime(_) => "date-time",
        }
    }
}

impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatArg::Text(s) => f.write_str(s),
            FormatArg::Int(n) => write!(f, "{n}"),
            FormatArg::Float(n) => write!(f, "{n}"),
            FormatArg::Bool(b) => write!(f, "{b}"),
            FormatArg::Date(d) => write!(f, "{d}"),
            FormatArg::Time(t) => write!(f, "{t}"),
            FormatArg::DateTime(dt) => write!(f, "{dt}"),
        }
    }
}

impl From<&str> for FormatArg {
    fn from(s: &str) -> Self {
        FormatArg::Text(s.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(s: String) -> Self {
        FormatArg::Text(s)
    }
}

impl From<&String> for FormatArg {
    fn from(s: &String) -> Self {
        FormatArg::Text(s.clone())
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FormatArg {
                fn from(n: $ty) -> Self {
                    FormatArg::Int(i64::from(n))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_from_wide_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FormatArg {
                fn from(n: $ty) -> Self {
                    match i64::try_from(n) {
                        Ok(n) => FormatArg::Int(n),
                        Err(_) => FormatArg::Float(n as f64),
                    }
                }
            }
        )*
    };
}

impl_from_wide_int!(u64, usize, isize);

impl From<f32> for FormatArg {
    fn from(n: f32) -> Self {
        FormatArg::Float(f64::from(n))
    }
}

impl From<f64> for FormatArg {
    fn from(n: f64) -> Self {
        FormatArg::Float(n)
    }
}

impl From<bool> for FormatArg {
    fn from(b: bool) -> Self {
        FormatArg::Bool(b)
    }
}

impl From<NaiveDate> for FormatArg {
    fn from(d: NaiveDate) -> Self {
        FormatArg::Date(d)
    }
}

impl From<NaiveTime> for FormatArg {
    fn from(t: NaiveTime) -> Self {
        FormatArg::Time(t)
    }
}

impl From<NaiveDateTime> for FormatArg {
    fn from(dt: NaiveDateTime) -> Self {
        FormatArg::DateTime(dt)
    }
}

// ============================================================================
// Pattern
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Element {
    Literal(String),
    Argument { index: usize, kind: ArgumentKind },
}

#[derive(Debug, Clone, PartialEq)]
enum ArgumentKind {
    Plain,
    Number(NumberStyle),
    Date(DateStyle),
    Time(TimeStyle),
    Choice(ChoiceFormat),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberStyle {
    Default,
    Integer,
    Percent,
    Currency,
}

/// A parsed message pattern bound to a locale.
#[derive(Debug, Clone)]
pub struct MessageFormat {
    locale: Locale,
    elements: Vec<Element>,
}

impl MessageFormat {
    /// Parse `pattern`, failing on malformed placeholders.
    pub fn new(pattern: &str, locale: Locale) -> Result<Self> {
        Ok(Self {
            locale,
            elements: parse_pattern(pattern)?,
        })
    }

    /// The locale numbers and dates are rendered for.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Render the pattern with `args`.
    pub fn format(&self, args: &[FormatArg]) -> Result<String> {
        let mut out = String::new();
        for element in &self.elements {
            match element {
                Element::Literal(text) => out.push_str(text),
                Element::Argument { index, kind } => match args.get(*index) {
                    Some(arg) => out.push_str(&self.render(*index, kind, arg, args)?),
                    None => {
                        out.push('{');
                        out.push_str(&index.to_string());
                        out.push('}');
                    }
                },
            }
        }
        Ok(out)
    }

    fn render(
        &self,
        index: usize,
        kind: &ArgumentKind,
        arg: &FormatArg,
        args: &[FormatArg],
    ) -> Result<String> {
        let locale = &self.locale;
        let incompatible = |expected: &str| {
            LingonError::Format(format!(
                "argument {index} is {} but the placeholder expects {expected}",
                arg.kind()
            ))
        };

        match kind {
            ArgumentKind::Plain => Ok(match arg {
                FormatArg::Text(s) => s.clone(),
                FormatArg::Int(n) => format_integer(*n, locale),
                FormatArg::Float(n) => format_number(*n, locale),
                FormatArg::Bool(b) => b.to_string(),
                FormatArg::Date(d) => DateFormatter::new()
                    .date_style(DateStyle::Short)
                    .format_date(*d, locale),
                FormatArg::Time(t) => DateFormatter::new()
                    .time_style(TimeStyle::Short)
                    .format_time(*t, locale),
                FormatArg::DateTime(dt) => DateFormatter::new()
                    .date_style(DateStyle::Short)
                    .time_style(TimeStyle::Short)
                    .format_datetime(*dt, locale),
            }),
            ArgumentKind::Number(style) => {
                let n = arg.as_f64().ok_or_else(|| incompatible("a number"))?;
                Ok(match (style, arg) {
                    (NumberStyle::Default | NumberStyle::Integer, FormatArg::Int(i)) => {
                        format_integer(*i, locale)
                    }
                    (NumberStyle::Default, _) => format_number(n, locale),
                    (NumberStyle::Integer, _) => NumberFormatter::new()
                        .max_fraction_digits(0)
                        .format(n, locale),
                    (NumberStyle::Percent, _) => format_percent(n, locale),
                    (NumberStyle::Currency, _) => {
                        CurrencyFormatter::for_locale(locale).format(n, locale)
                    }
                })
            }
            ArgumentKind::Date(style) => {
                let formatter = DateFormatter::new().date_style(*style);
                match arg {
                    FormatArg::Date(d) => Ok(formatter.format_date(*d, locale)),
                    FormatArg::DateTime(dt) => Ok(formatter.format_date(dt.date(), locale)),
                    _ => Err(incompatible("a date")),
                }
            }
            ArgumentKind::Time(style) => {
                let formatter = DateFormatter::new().time_style(*style);
                match arg {
                    FormatArg::Time(t) => Ok(formatter.format_time(*t, locale)),
                    FormatArg::DateTime(dt) => Ok(formatter.format_time(dt.time(), locale)),
                    _ => Err(incompatible("a time")),
                }
            }
            ArgumentKind::Choice(choice) => {
                let n = arg.as_f64().ok_or_else(|| incompatible("a number"))?;
                let text = choice.select(n);
                if text.contains('{') {
                    MessageFormat::new(text, locale.clone())?.format(args)
                } else {
                    Ok(text.to_string())
                }
            }
        }
    }
}

/// Parse `pattern` and render it with `args` for `locale`.
pub fn format_message(pattern: &str, locale: &Locale, args: &[FormatArg]) -> Result<String> {
    MessageFormat::new(pattern, locale.clone())?.format(args)
}

fn parse_pattern(pattern: &str) -> Result<Vec<Element>> {
    let mut elements = Vec::new();
    let mut literal = String::new();
    let mut in_quote = false;
    let mut chars = pattern.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\'' if chars.peek() == Some(&'\'') => {
                chars.next();
                literal.push('\'');
            }
            '\'' => in_quote = !in_quote,
            '{' if !in_quote => {
                let segments = read_placeholder(&mut chars)?;
                if !literal.is_empty() {
                    elements.push(Element::Literal(std::mem::take(&mut literal)));
                }
                elements.push(build_argument(&segments)?);
            }
            _ => literal.push(ch),
        }
    }

    if !literal.is_empty() {
        elements.push(Element::Literal(literal));
    }
    Ok(elements)
}

/// Read up to the brace closing the current placeholder, splitting it into
/// index, type and style. Commas past the second belong to the style.
fn read_placeholder(chars: &mut Peekable<Chars<'_>>) -> Result<[String; 3]> {
    let mut segments: [String; 3] = Default::default();
    let mut part = 0;
    let mut depth = 0usize;
    let mut in_quote = false;

    for ch in chars.by_ref() {
        if in_quote {
            segments[part].push(ch);
            if ch == '\'' {
                in_quote = false;
            }
            continue;
        }

        match ch {
            ',' if part < 2 => part += 1,
            '{' => {
                depth += 1;
                segments[part].push(ch);
            }
            '}' if depth == 0 => return Ok(segments),
            '}' => {
                depth -= 1;
                segments[part].push(ch);
            }
            '\'' => {
                in_quote = true;
                segments[part].push(ch);
            }
            _ => segments[part].push(ch),
        }
    }

    Err(LingonError::Format("unmatched braces in the pattern".to_string()))
}

fn build_argument(segments: &[String; 3]) -> Result<Element> {
    let index_text = segments[0].trim();
    let index = index_text.parse::<usize>().map_err(|_| {
        LingonError::Format(format!("can't parse argument number: '{index_text}'"))
    })?;

    let format_type = segments[1].trim().to_lowercase();
    let style = segments[2].trim();

    let unknown_style = || {
        LingonError::Format(format!("unknown {format_type} style: '{style}'"))
    };

    let kind = match format_type.as_str() {
        "" => ArgumentKind::Plain,
        "number" => ArgumentKind::Number(match style.to_lowercase().as_str() {
            "" => NumberStyle::Default,
            "integer" => NumberStyle::Integer,
            "percent" => NumberStyle::Percent,
            "currency" => NumberStyle::Currency,
            _ => return Err(unknown_style()),
        }),
        "date" => ArgumentKind::Date(if style.is_empty() {
            DateStyle::default()
        } else {
            DateStyle::from_keyword(style).ok_or_else(unknown_style)?
        }),
        "time" => ArgumentKind::Time(if style.is_empty() {
            TimeStyle::default()
        } else {
            TimeStyle::from_keyword(style).ok_or_else(unknown_style)?
        }),
        "choice" => ArgumentKind::Choice(ChoiceFormat::parse(&segments[2])?),
        other => {
            return Err(LingonError::Format(format!("unknown format type: '{other}'")));
        }
    };

    Ok(Element::Argument { index, kind })
}

// ============================================================================
// Choice
// ============================================================================

/// Range-based text selection, e.g. `0#no files|1#one file|1<{0} files`.
///
/// `n#text` matches values `>= n`; `n<text` matches values `> n`. The last
/// range whose limit is satisfied wins; values below the first limit use the
/// first text.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceFormat {
    limits: Vec<f64>,
    texts: Vec<String>,
}

impl ChoiceFormat {
    /// Parse a choice pattern.
    pub fn parse(pattern: &str) -> Result<Self> {
        let malformed =
            |detail: &str| LingonError::Format(format!("malformed choice '{pattern}': {detail}"));

        let mut limits: Vec<f64> = Vec::new();
        let mut texts = Vec::new();
        let mut limit = String::new();
        let mut text = String::new();
        let mut in_limit = true;
        let mut in_quote = false;
        let mut chars = pattern.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch == '\'' {
                if chars.peek() == Some(&'\'') {
                    chars.next();
                    let target = if in_limit { &mut limit } else { &mut text };
                    target.push('\'');
                } else {
                    in_quote = !in_quote;
                }
                continue;
            }

            if in_quote {
                let target = if in_limit { &mut limit } else { &mut text };
                target.push(ch);
            } else if in_limit {
                match ch {
                    '#' | '≤' | '<' => {
                        let mut value = parse_limit(&limit).ok_or_else(|| {
                            malformed(&format!("invalid limit '{}'", limit.trim()))
                        })?;
                        if ch == '<' {
                            value = value.next_up();
                        }
                        if limits.last().is_some_and(|&last| value <= last) {
                            return Err(malformed("limits must be ascending"));
                        }
                        limits.push(value);
                        limit.clear();
                        in_limit = false;
                    }
                    _ => limit.push(ch),
                }
            } else if ch == '|' {
                texts.push(std::mem::take(&mut text));
                in_limit = true;
            } else {
                text.push(ch);
            }
        }

        if in_limit {
            if !limit.trim().is_empty() {
                return Err(malformed("missing '#' after limit"));
            }
        } else {
            texts.push(text);
        }

        if limits.is_empty() {
            return Err(malformed("no choices"));
        }

        Ok(Self { limits, texts })
    }

    /// Text for the value `n`.
    pub fn select(&self, n: f64) -> &str {
        let mut selected = 0;
        for (i, limit) in self.limits.iter().enumerate() {
            if n >= *limit {
                selected = i;
            } else {
                break;
            }
        }
        &self.texts[selected]
    }
}

fn parse_limit(text: &str) -> Option<f64> {
    match text.trim() {
        "∞" => Some(f64::INFINITY),
        "-∞" => Some(f64::NEG_INFINITY),
        other => other.parse().ok(),
    }
}
