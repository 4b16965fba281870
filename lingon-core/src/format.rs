//! Locale-aware number, currency, date and time rendering.
//!
//! These are the building blocks behind the `number`, `date` and `time`
//! sub-formats of [`LocalizedValue::format`](crate::LocalizedValue::format).
//! They only cover the conventions translation files commonly need; there is
//! no CLDR data behind them.

use crate::Locale;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

/// Date formatting style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    /// Full date (e.g., "Monday, January 15, 2024")
    Full,
    /// Long date (e.g., "January 15, 2024")
    Long,
    /// Medium date (e.g., "Jan 15, 2024")
    #[default]
    Medium,
    /// Short date (e.g., "1/15/24")
    Short,
}

/// Time formatting style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeStyle {
    /// Same as [`TimeStyle::Long`]; naive times carry no zone to print
    Full,
    /// Hours, minutes and seconds
    Long,
    /// Hours, minutes and seconds (e.g., "2:30:00 PM")
    #[default]
    Medium,
    /// Hours and minutes (e.g., "2:30 PM")
    Short,
}

impl DateStyle {
    /// Parse a style keyword (`short`, `medium`, `long`, `full`).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_lowercase().as_str() {
            "short" => Some(Self::Short),
            "medium" => Some(Self::Medium),
            "long" => Some(Self::Long),
            "full" => Some(Self::Full),
            _ => None,
        }
    }
}

impl TimeStyle {
    /// Parse a style keyword (`short`, `medium`, `long`, `full`).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_lowercase().as_str() {
            "short" => Some(Self::Short),
            "medium" => Some(Self::Medium),
            "long" => Some(Self::Long),
            "full" => Some(Self::Full),
            _ => None,
        }
    }
}

// ============================================================================
// Number Formatting
// ============================================================================

/// Number formatting configuration.
#[derive(Debug, Clone)]
pub struct NumberFormatter {
    /// Minimum fraction digits
    pub min_fraction_digits: usize,
    /// Maximum fraction digits
    pub max_fraction_digits: usize,
    /// Use grouping separators
    pub use_grouping: bool,
}

impl Default for NumberFormatter {
    fn default() -> Self {
        Self {
            min_fraction_digits: 0,
            max_fraction_digits: 3,
            use_grouping: true,
        }
    }
}

impl NumberFormatter {
    /// Create a new number formatter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum fraction digits.
    pub fn min_fraction_digits(mut self, digits: usize) -> Self {
        self.min_fraction_digits = digits;
        self
    }

    /// Set maximum fraction digits.
    pub fn max_fraction_digits(mut self, digits: usize) -> Self {
        self.max_fraction_digits = digits;
        self
    }

    /// Set whether to use grouping separators.
    pub fn use_grouping(mut self, use_grouping: bool) -> Self {
        self.use_grouping = use_grouping;
        self
    }

    /// Format a number for the given locale.
    ///
    /// Rounds half-to-even at the maximum fraction digits and trims trailing
    /// zeros down to the minimum.
    pub fn format(&self, n: f64, locale: &Locale) -> String {
        if n.is_nan() {
            return "NaN".to_string();
        }
        if n.is_infinite() {
            return if n > 0.0 { "∞" } else { "-∞" }.to_string();
        }

        let (decimal_sep, group_sep) = number_separators(locale);
        let max_digits = self.max_fraction_digits.max(self.min_fraction_digits);

        let scale = 10f64.powi(max_digits as i32);
        let scaled = n * scale;
        let rounded = if scaled.is_finite() {
            scaled.round_ties_even() / scale
        } else {
            // Too large to carry any fraction digits.
            n
        };
        let negative = rounded < 0.0;

        let formatted = format!("{:.1$}", rounded.abs(), max_digits);
        let (integer_part, fraction_part) = match formatted.split_once('.') {
            Some((int, frac)) => (int, frac),
            None => (formatted.as_str(), ""),
        };

        let mut fraction = fraction_part.trim_end_matches('0').to_string();
        while fraction.len() < self.min_fraction_digits {
            fraction.push('0');
        }

        let integer = if self.use_grouping {
            add_grouping(integer_part, group_sep)
        } else {
            integer_part.to_string()
        };

        let sign = if negative { "-" } else { "" };
        if fraction.is_empty() {
            format!("{sign}{integer}")
        } else {
            format!("{sign}{integer}{decimal_sep}{fraction}")
        }
    }
}

/// Format a number for a locale with up to three fraction digits.
///
/// # Example
///
/// ```
/// use lingon_core::{format_number, Locale};
///
/// assert_eq!(format_number(1234567.891, &Locale::en_us()), "1,234,567.891");
/// assert_eq!(format_number(1234567.89, &Locale::de_de()), "1.234.567,89");
/// assert_eq!(format_number(1234567.89, &Locale::fr_fr()), "1 234 567,89");
/// ```
pub fn format_number(n: f64, locale: &Locale) -> String {
    NumberFormatter::default().format(n, locale)
}

/// Format an integer for a locale without going through floating point.
///
/// ```
/// use lingon_core::{format_integer, Locale};
///
/// assert_eq!(format_integer(-1234, &Locale::en_us()), "-1,234");
/// assert_eq!(format_integer(9_007_199_254_740_993, &Locale::en_us()), "9,007,199,254,740,993");
/// ```
pub fn format_integer(n: i64, locale: &Locale) -> String {
    let (_, group_sep) = number_separators(locale);
    let digits = n.unsigned_abs().to_string();
    let sign = if n < 0 { "-" } else { "" };
    format!("{sign}{}", add_grouping(&digits, group_sep))
}

/// Format a ratio as a percentage for a locale.
///
/// # Example
///
/// ```
/// use lingon_core::{format_percent, Locale};
///
/// assert_eq!(format_percent(0.75, &Locale::en_us()), "75%");
/// assert_eq!(format_percent(0.375, &Locale::de_de()), "38%");
/// ```
pub fn format_percent(n: f64, locale: &Locale) -> String {
    let formatted = NumberFormatter::new()
        .max_fraction_digits(0)
        .format(n * 100.0, locale);
    format!("{}%", formatted)
}

// ============================================================================
// Currency Formatting
// ============================================================================

/// Currency formatting configuration.
#[derive(Debug, Clone)]
pub struct CurrencyFormatter {
    /// Currency code (ISO 4217)
    pub currency_code: String,
    /// Show currency symbol instead of code
    pub use_symbol: bool,
}

impl CurrencyFormatter {
    /// Create a new currency formatter.
    pub fn new(currency_code: impl Into<String>) -> Self {
        Self {
            currency_code: currency_code.into().to_uppercase(),
            use_symbol: true,
        }
    }

    /// Formatter for the currency conventionally used in the locale's region.
    pub fn for_locale(locale: &Locale) -> Self {
        Self::new(currency_for_locale(locale))
    }

    /// Set whether to use symbol.
    pub fn use_symbol(mut self, use_symbol: bool) -> Self {
        self.use_symbol = use_symbol;
        self
    }

    /// Format a currency amount.
    pub fn format(&self, amount: f64, locale: &Locale) -> String {
        let (symbol, before) = currency_symbol(&self.currency_code, locale);
        let digits = currency_fraction_digits(&self.currency_code);

        let formatted = NumberFormatter::new()
            .min_fraction_digits(digits)
            .max_fraction_digits(digits)
            .format(amount.abs(), locale);

        let sign = if amount < 0.0 { "-" } else { "" };

        if !self.use_symbol {
            format!("{sign}{formatted} {}", self.currency_code)
        } else if before {
            format!("{sign}{symbol}{formatted}")
        } else {
            format!("{sign}{formatted} {symbol}")
        }
    }
}

/// Format a currency amount for a locale.
///
/// # Example
///
/// ```
/// use lingon_core::{format_currency, Locale};
///
/// assert_eq!(format_currency(99.99, "USD", &Locale::en_us()), "$99.99");
/// assert_eq!(format_currency(99.99, "EUR", &Locale::de_de()), "99,99 €");
/// assert_eq!(format_currency(1500.0, "TWD", &Locale::zh_tw()), "NT$1,500.00");
/// ```
pub fn format_currency(amount: f64, currency_code: &str, locale: &Locale) -> String {
    CurrencyFormatter::new(currency_code).format(amount, locale)
}

/// ISO 4217 code of the currency used in the locale's region.
///
/// Falls back to `USD` when the locale has no region or the region is unknown.
pub fn currency_for_locale(locale: &Locale) -> &'static str {
    match locale.region.as_deref() {
        Some("US") => "USD",
        Some("GB") => "GBP",
        Some("DE" | "FR" | "ES" | "IT" | "NL" | "PT" | "FI" | "AT" | "BE" | "IE" | "GR") => "EUR",
        Some("JP") => "JPY",
        Some("CN") => "CNY",
        Some("TW") => "TWD",
        Some("HK") => "HKD",
        Some("KR") => "KRW",
        Some("IN") => "INR",
        Some("RU") => "RUB",
        Some("BR") => "BRL",
        Some("CH") => "CHF",
        Some("CA") => "CAD",
        Some("AU") => "AUD",
        Some("SG") => "SGD",
        Some("SE") => "SEK",
        Some("NO") => "NOK",
        Some("DK") => "DKK",
        Some("PL") => "PLN",
        Some("CZ") => "CZK",
        Some("MX") => "MXN",
        Some("TH") => "THB",
        _ => "USD",
    }
}

// ============================================================================
// Date Formatting
// ============================================================================

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTHS_LONG: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Date and time formatting configuration.
#[derive(Debug, Clone, Default)]
pub struct DateFormatter {
    /// Date style
    pub date_style: Option<DateStyle>,
    /// Time style
    pub time_style: Option<TimeStyle>,
}

impl DateFormatter {
    /// Create a new date formatter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set date style.
    pub fn date_style(mut self, style: DateStyle) -> Self {
        self.date_style = Some(style);
        self
    }

    /// Set time style.
    pub fn time_style(mut self, style: TimeStyle) -> Self {
        self.time_style = Some(style);
        self
    }

    /// Format a calendar date.
    pub fn format_date(&self, date: NaiveDate, locale: &Locale) -> String {
        render_date(date, self.date_style.unwrap_or_default(), locale)
    }

    /// Format a wall-clock time.
    pub fn format_time(&self, time: NaiveTime, locale: &Locale) -> String {
        render_time(time, self.time_style.unwrap_or_default(), locale)
    }

    /// Format a date and time, joined the way the locale's short forms are.
    pub fn format_datetime(&self, datetime: NaiveDateTime, locale: &Locale) -> String {
        let date = self.format_date(datetime.date(), locale);
        let time = self.format_time(datetime.time(), locale);
        format!("{date}, {time}")
    }
}

/// Format a date for a locale in the medium style.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use lingon_core::{format_date, Locale};
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// assert_eq!(format_date(date, &Locale::en_us()), "Jan 15, 2024");
/// assert_eq!(format_date(date, &Locale::en_gb()), "15 Jan 2024");
/// ```
pub fn format_date(date: NaiveDate, locale: &Locale) -> String {
    render_date(date, DateStyle::Medium, locale)
}

/// Field order a locale writes dates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateOrder {
    MonthDayYear,
    DayMonthYear,
    YearMonthDay,
}

fn date_order(locale: &Locale) -> DateOrder {
    match locale.language.as_str() {
        "ja" | "zh" | "ko" => DateOrder::YearMonthDay,
        "en" if locale.region.as_deref() == Some("US") || locale.region.is_none() => {
            DateOrder::MonthDayYear
        }
        "en" | "fr" | "de" | "es" | "it" | "pt" | "ru" | "pl" | "nl" => DateOrder::DayMonthYear,
        _ => DateOrder::MonthDayYear,
    }
}

fn render_date(date: NaiveDate, style: DateStyle, locale: &Locale) -> String {
    let (year, month, day) = (date.year(), date.month(), date.day());
    let month_idx = date.month0() as usize;
    let order = date_order(locale);

    match style {
        DateStyle::Full => {
            let weekday = weekday_name(date.weekday());
            match order {
                DateOrder::YearMonthDay => format!("{year}/{month}/{day} {weekday}"),
                DateOrder::DayMonthYear => {
                    format!("{weekday}, {day} {} {year}", MONTHS_LONG[month_idx])
                }
                DateOrder::MonthDayYear => {
                    format!("{weekday}, {} {day}, {year}", MONTHS_LONG[month_idx])
                }
            }
        }
        DateStyle::Long => match order {
            DateOrder::YearMonthDay => format!("{year}/{month}/{day}"),
            DateOrder::DayMonthYear => format!("{day} {} {year}", MONTHS_LONG[month_idx]),
            DateOrder::MonthDayYear => format!("{} {day}, {year}", MONTHS_LONG[month_idx]),
        },
        DateStyle::Medium => match order {
            DateOrder::YearMonthDay => format!("{year}/{month}/{day}"),
            DateOrder::DayMonthYear => format!("{day} {} {year}", MONTHS_SHORT[month_idx]),
            DateOrder::MonthDayYear => format!("{} {day}, {year}", MONTHS_SHORT[month_idx]),
        },
        DateStyle::Short => {
            let yy = year.rem_euclid(100);
            match order {
                DateOrder::YearMonthDay => format!("{yy:02}/{month}/{day}"),
                DateOrder::DayMonthYear => format!("{day}/{month}/{yy:02}"),
                DateOrder::MonthDayYear => format!("{month}/{day}/{yy:02}"),
            }
        }
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn render_time(time: NaiveTime, style: TimeStyle, locale: &Locale) -> String {
    let (hour, minute, second) = (time.hour(), time.minute(), time.second());
    let use_12h = locale.language == "en";

    let with_seconds = !matches!(style, TimeStyle::Short);

    if use_12h {
        let (h, period) = match hour {
            0 => (12, "AM"),
            1..=11 => (hour, "AM"),
            12 => (12, "PM"),
            _ => (hour - 12, "PM"),
        };
        if with_seconds {
            format!("{h}:{minute:02}:{second:02} {period}")
        } else {
            format!("{h}:{minute:02} {period}")
        }
    } else if with_seconds {
        format!("{hour:02}:{minute:02}:{second:02}")
    } else {
        format!("{hour:02}:{minute:02}")
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Get decimal and grouping separators for a locale.
fn number_separators(locale: &Locale) -> (&'static str, &'static str) {
    match locale.language.as_str() {
        // Comma decimal, period grouping
        "de" | "es" | "it" | "pt" | "nl" | "da" | "sv" | "no" | "fi" | "pl" | "cs" | "sk"
        | "hu" | "ro" | "bg" | "el" | "ru" | "uk" | "tr" | "id" | "vi" => (",", "."),

        // Comma decimal, space grouping
        "fr" => (",", " "),

        _ => (".", ","),
    }
}

/// Add grouping separators to a string of ASCII digits.
fn add_grouping(digits: &str, sep: &str) -> String {
    let len = digits.len();
    if len <= 3 {
        return digits.to_string();
    }

    let mut result = String::with_capacity(len + (len - 1) / 3 * sep.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push_str(sep);
        }
        result.push(c);
    }
    result
}

fn currency_fraction_digits(currency_code: &str) -> usize {
    match currency_code {
        "JPY" | "KRW" => 0,
        _ => 2,
    }
}

/// Get currency symbol and position for a locale.
fn currency_symbol(currency_code: &str, locale: &Locale) -> (String, bool) {
    let symbol_before = !matches!(
        locale.language.as_str(),
        "de" | "fr" | "es" | "it" | "pt" | "nl" | "da" | "sv" | "no" | "fi" | "pl" | "cs"
            | "sk" | "hu" | "ro" | "bg" | "el" | "ru" | "uk" | "vi"
    );

    let symbol = match currency_code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" | "CNY" => "¥",
        "KRW" => "₩",
        "INR" => "₹",
        "RUB" => "₽",
        "BRL" => "R$",
        "CAD" => "CA$",
        "AUD" => "A$",
        "HKD" => "HK$",
        "SGD" => "S$",
        "SEK" | "NOK" | "DKK" => "kr",
        "PLN" => "zł",
        "CZK" => "Kč",
        "MXN" => "MX$",
        "THB" => "฿",
        "TWD" => "NT$",
        _ => currency_code,
    };

    (symbol.to_string(), symbol_before)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_format_number_us() {
        let locale = Locale::en_us();
        assert_eq!(format_number(1234567.89, &locale), "1,234,567.89");
        assert_eq!(format_number(1000.0, &locale), "1,000");
        assert_eq!(format_number(1.5, &locale), "1.5");
        assert_eq!(format_number(0.12345, &locale), "0.123");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-123.0, &Locale::en_us()), "-123");
        assert_eq!(format_number(-1234.5, &Locale::en_us()), "-1,234.5");
    }

    #[test]
    fn test_format_number_german() {
        assert_eq!(format_number(1234567.89, &Locale::de_de()), "1.234.567,89");
    }

    #[test]
    fn test_format_number_french() {
        assert_eq!(format_number(1234567.89, &Locale::fr_fr()), "1 234 567,89");
    }

    #[test]
    fn test_number_formatter_min_digits() {
        let formatter = NumberFormatter::new()
            .min_fraction_digits(2)
            .max_fraction_digits(2);
        assert_eq!(formatter.format(3.0, &Locale::en_us()), "3.00");
        assert_eq!(formatter.format(3.456, &Locale::en_us()), "3.46");
    }

    #[test]
    fn test_integer_rounding_is_half_even() {
        let formatter = NumberFormatter::new().max_fraction_digits(0);
        assert_eq!(formatter.format(2.5, &Locale::en_us()), "2");
        assert_eq!(formatter.format(3.5, &Locale::en_us()), "4");
    }

    #[test]
    fn test_format_integer() {
        assert_eq!(format_integer(1234, &Locale::en_us()), "1,234");
        assert_eq!(format_integer(-123, &Locale::en_us()), "-123");
        assert_eq!(format_integer(1234567, &Locale::de_de()), "1.234.567");
        assert_eq!(format_integer(i64::MIN, &Locale::en_us()), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.75, &Locale::en_us()), "75%");
        assert_eq!(format_percent(0.755, &Locale::en_us()), "76%");
        assert_eq!(format_percent(0.125, &Locale::de_de()), "12%");
        assert_eq!(format_percent(0.375, &Locale::de_de()), "38%");
    }

    #[test]
    fn test_format_number_near_max_stays_finite() {
        let huge = format_number(1e306, &Locale::en_us());
        assert!(huge.starts_with("1,000"), "got {huge}");
        assert!(!huge.contains('.'));

        let negative = format_number(-f64::MAX, &Locale::de_de());
        assert!(negative.starts_with("-179.769"), "got {negative}");
        assert!(format_percent(1e305, &Locale::en_us()).ends_with('%'));
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(99.99, "USD", &Locale::en_us()), "$99.99");
        assert_eq!(format_currency(99.99, "EUR", &Locale::de_de()), "99,99 €");
        assert_eq!(format_currency(99.99, "GBP", &Locale::en_gb()), "£99.99");
        assert_eq!(format_currency(-5.0, "USD", &Locale::en_us()), "-$5.00");
        assert_eq!(format_currency(1500.0, "JPY", &Locale::ja_jp()), "¥1,500");
    }

    #[test]
    fn test_currency_for_locale() {
        assert_eq!(currency_for_locale(&Locale::zh_tw()), "TWD");
        assert_eq!(currency_for_locale(&Locale::fr_fr()), "EUR");
        assert_eq!(currency_for_locale(&Locale::en()), "USD");
        let formatter = CurrencyFormatter::for_locale(&Locale::en_gb()).use_symbol(false);
        assert_eq!(formatter.format(3.5, &Locale::en_gb()), "3.50 GBP");
    }

    #[test]
    fn test_format_date_medium() {
        let d = date(2024, 1, 15);
        assert_eq!(format_date(d, &Locale::en_us()), "Jan 15, 2024");
        assert_eq!(format_date(d, &Locale::de_de()), "15 Jan 2024");
        assert_eq!(format_date(d, &Locale::zh_tw()), "2024/1/15");
    }

    #[test]
    fn test_format_date_short() {
        let d = date(2024, 1, 15);
        let short = DateFormatter::new().date_style(DateStyle::Short);
        assert_eq!(short.format_date(d, &Locale::en_us()), "1/15/24");
        assert_eq!(short.format_date(d, &Locale::en_gb()), "15/1/24");
        assert_eq!(short.format_date(d, &Locale::ja_jp()), "24/1/15");
        assert_eq!(short.format_date(date(2005, 3, 1), &Locale::en_us()), "3/1/05");
    }

    #[test]
    fn test_format_date_full_has_weekday() {
        let d = date(2024, 1, 15);
        let full = DateFormatter::new().date_style(DateStyle::Full);
        assert_eq!(full.format_date(d, &Locale::en_us()), "Monday, January 15, 2024");
    }

    #[test]
    fn test_format_time() {
        let t = time(14, 30, 5);
        let short = DateFormatter::new().time_style(TimeStyle::Short);
        assert_eq!(short.format_time(t, &Locale::en_us()), "2:30 PM");
        assert_eq!(short.format_time(t, &Locale::de_de()), "14:30");
        assert_eq!(DateFormatter::new().format_time(t, &Locale::en_us()), "2:30:05 PM");
        assert_eq!(short.format_time(time(0, 5, 0), &Locale::en_us()), "12:05 AM");
    }

    #[test]
    fn test_format_datetime() {
        let dt = date(2024, 1, 15).and_time(time(9, 5, 0));
        let formatter = DateFormatter::new()
            .date_style(DateStyle::Short)
            .time_style(TimeStyle::Short);
        assert_eq!(formatter.format_datetime(dt, &Locale::en_us()), "1/15/24, 9:05 AM");
    }

    #[test]
    fn test_style_keywords() {
        assert_eq!(DateStyle::from_keyword("SHORT"), Some(DateStyle::Short));
        assert_eq!(TimeStyle::from_keyword(" full "), Some(TimeStyle::Full));
        assert_eq!(DateStyle::from_keyword("tiny"), None);
    }

    #[test]
    fn test_add_grouping() {
        assert_eq!(add_grouping("1234567", ","), "1,234,567");
        assert_eq!(add_grouping("123", ","), "123");
        assert_eq!(add_grouping("1234", " "), "1 234");
    }
}
