//! Lingon Logging
//!
//! Leveled records for the Lingon localization loader. Every record may
//! carry `key = value` fields (typically `locale` and `document`) which are
//! appended to pretty lines and flattened into JSON lines.
//!
//! # Usage
//!
//! ```rust
//! use lingon_log::{debug, info, warn};
//!
//! info!("Loaded {} locales", 3);
//! debug!(locale = "zh_TW"; "Reloading locale data");
//! warn!(locale = "zh_TW", document = "command.help"; "Missing translation document");
//! ```
//!
//! # Environment Variables
//!
//! - `LINGON_LOG_LEVEL=debug|info|warn|error|off` - minimum level (default `info`)
//! - `LINGON_DEBUG=1` - shorthand for `LINGON_LOG_LEVEL=debug`
//! - `LINGON_LOG_FORMAT=pretty|json` - output format
//! - `LINGON_LOG_COLOR=1|0` - colored level names (needs the `color` feature)
//! - `LINGON_LOG_TIMESTAMPS=1|0` - include timestamps

use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use std::env;
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

// ============================================================================
// Levels and Formats
// ============================================================================

/// Severity of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    /// Per-locale loads and bootstrap details
    Debug = 0,
    /// Construction and reloads
    Info = 1,
    /// Missing documents and unusable locales
    Warn = 2,
    /// Only reached through the `log` bridge
    Error = 3,
    /// Nothing is written
    Off = 4,
}

impl Level {
    /// Upper-case name used in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => Level::Debug,
            1 => Level::Info,
            2 => Level::Warn,
            3 => Level::Error,
            _ => Level::Off,
        }
    }

    /// The matching filter for the `log` facade.
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Level::Debug => log::LevelFilter::Debug,
            Level::Info => log::LevelFilter::Info,
            Level::Warn => log::LevelFilter::Warn,
            Level::Error => log::LevelFilter::Error,
            Level::Off => log::LevelFilter::Off,
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "off" | "none" => Ok(Level::Off),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace | log::Level::Debug => Level::Debug,
            log::Level::Info => Level::Info,
            log::Level::Warn => Level::Warn,
            log::Level::Error => Level::Error,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `LEVEL [target] message key=value`
    Pretty,
    /// One JSON object per line, fields flattened into it
    Json,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Format::Pretty),
            "json" => Ok(Format::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Output settings, read once from the environment.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum level written
    pub level: Level,
    /// Line format
    pub format: Format,
    /// Colored level names in pretty lines
    pub color: bool,
    /// Prefix lines with a timestamp
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            format: Format::Pretty,
            color: false,
            timestamps: true,
        }
    }
}

impl LogConfig {
    /// Read the `LINGON_LOG_*` variables. Unparsable values fall back to the
    /// defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let debug = env_flag("LINGON_DEBUG").unwrap_or(false);

        let level = env::var("LINGON_LOG_LEVEL")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(if debug { Level::Debug } else { defaults.level });

        let format = env::var("LINGON_LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.format);

        Self {
            level,
            format,
            color: env_flag("LINGON_LOG_COLOR")
                .unwrap_or_else(|| env::var_os("NO_COLOR").is_none() && env::var_os("TERM").is_some()),
            timestamps: env_flag("LINGON_LOG_TIMESTAMPS").unwrap_or(defaults.timestamps),
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

static LEVEL: AtomicU8 = AtomicU8::new(Level::Info as u8);

static CONFIG: Lazy<LogConfig> = Lazy::new(|| {
    let config = LogConfig::from_env();
    LEVEL.store(config.level as u8, Ordering::SeqCst);
    config
});

/// Read the environment now instead of at the first record.
pub fn init() {
    Lazy::force(&CONFIG);
}

/// The configuration read from the environment.
pub fn config() -> &'static LogConfig {
    &CONFIG
}

/// Check whether records at `level` are written.
#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    init();
    level != Level::Off && level as u8 >= LEVEL.load(Ordering::Relaxed)
}

/// Current minimum level.
pub fn current_level() -> Level {
    init();
    Level::from_u8(LEVEL.load(Ordering::Relaxed))
}

/// Change the minimum level at runtime.
pub fn set_level(level: Level) {
    init();
    LEVEL.store(level as u8, Ordering::SeqCst);
    log::set_max_level(level.to_level_filter());
}

// ============================================================================
// Records
// ============================================================================

/// One log event.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    /// Severity
    pub level: Level,
    /// Emitting module
    pub target: &'a str,
    /// Rendered message
    pub message: String,
    /// Structured context such as `locale` and `document`
    pub fields: Vec<(&'static str, String)>,
}

impl Record<'_> {
    /// Value of a field, if present.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Render a record as a pretty line, without the trailing newline.
pub fn render_pretty(record: &Record<'_>, config: &LogConfig) -> String {
    let mut line = String::new();

    if config.timestamps {
        line.push_str(&chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f ").to_string());
    }
    line.push_str(&level_label(record.level, config.color));
    line.push(' ');
    if !record.target.is_empty() {
        line.push_str(&format!("[{}] ", record.target));
    }
    line.push_str(&record.message);

    for (key, value) in &record.fields {
        if value.is_empty() || value.contains(char::is_whitespace) {
            line.push_str(&format!(" {key}={value:?}"));
        } else {
            line.push_str(&format!(" {key}={value}"));
        }
    }
    line
}

/// Render a record as one JSON object.
pub fn render_json(record: &Record<'_>, config: &LogConfig) -> String {
    let mut entry = Map::new();
    if config.timestamps {
        entry.insert(
            "timestamp".to_string(),
            Value::from(chrono::Utc::now().to_rfc3339()),
        );
    }
    entry.insert("level".to_string(), Value::from(record.level.as_str()));
    entry.insert("target".to_string(), Value::from(record.target));
    entry.insert("message".to_string(), Value::from(record.message.as_str()));
    for (key, value) in &record.fields {
        entry.insert((*key).to_string(), Value::from(value.as_str()));
    }
    Value::Object(entry).to_string()
}

#[cfg(feature = "color")]
fn level_label(level: Level, color: bool) -> String {
    use colored::Colorize;

    let label = format!("{:<5}", level.as_str());
    if !color {
        return label;
    }
    match level {
        Level::Debug => label.as_str().blue().to_string(),
        Level::Info => label.as_str().green().to_string(),
        Level::Warn => label.as_str().yellow().to_string(),
        Level::Error => label.as_str().red().bold().to_string(),
        Level::Off => label,
    }
}

#[cfg(not(feature = "color"))]
fn level_label(level: Level, _color: bool) -> String {
    format!("{:<5}", level.as_str())
}

/// Write a record to stderr if its level is enabled.
#[doc(hidden)]
pub fn emit(record: &Record<'_>) {
    if !is_level_enabled(record.level) {
        return;
    }
    let config = config();
    let line = match config.format {
        Format::Pretty => render_pretty(record, config),
        Format::Json => render_json(record, config),
    };
    let _ = writeln!(std::io::stderr().lock(), "{line}");
}

// ============================================================================
// `log` Facade Bridge
// ============================================================================

/// Renders records from the `log` facade with the Lingon formatter.
///
/// Embedding applications that already log through `log::info!` and friends
/// can install this once to get a single, consistently formatted stream.
#[derive(Debug, Default)]
pub struct LogBridge;

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        is_level_enabled(Level::from(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        emit(&Record {
            level: Level::from(record.level()),
            target: record.target(),
            message: record.args().to_string(),
            fields: Vec::new(),
        });
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static BRIDGE: LogBridge = LogBridge;

/// Install [`LogBridge`] as the global `log` logger.
///
/// Fails if another logger was installed first.
pub fn install_log_bridge() -> Result<(), log::SetLoggerError> {
    log::set_logger(&BRIDGE)?;
    log::set_max_level(current_level().to_level_filter());
    Ok(())
}

// ============================================================================
// Macros
// ============================================================================

#[doc(hidden)]
#[macro_export]
macro_rules! __record {
    ($level:expr, [$(($key:ident, $value:expr)),*], $($arg:tt)+) => {
        if $crate::is_level_enabled($level) {
            $crate::emit(&$crate::Record {
                level: $level,
                target: module_path!(),
                message: format!($($arg)+),
                fields: vec![$((stringify!($key), ($value).to_string())),*],
            });
        }
    };
}

/// Log a debug record.
///
/// Only written with `LINGON_DEBUG=1` or `LINGON_LOG_LEVEL=debug`.
#[macro_export]
macro_rules! debug {
    ($($key:ident = $value:expr),+ ; $($arg:tt)+) => {
        $crate::__record!($crate::Level::Debug, [$(($key, $value)),+], $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__record!($crate::Level::Debug, [], $($arg)+)
    };
}

/// Log an info record.
#[macro_export]
macro_rules! info {
    ($($key:ident = $value:expr),+ ; $($arg:tt)+) => {
        $crate::__record!($crate::Level::Info, [$(($key, $value)),+], $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__record!($crate::Level::Info, [], $($arg)+)
    };
}

/// Log a warning record.
///
/// ```rust
/// use lingon_log::warn;
///
/// let locale = "zh_TW";
/// warn!(locale = locale, document = "b.test"; "Missing translation document");
/// ```
#[macro_export]
macro_rules! warn {
    ($($key:ident = $value:expr),+ ; $($arg:tt)+) => {
        $crate::__record!($crate::Level::Warn, [$(($key, $value)),+], $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__record!($crate::Level::Warn, [], $($arg)+)
    };
}
