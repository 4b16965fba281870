// Lingon - locale-keyed JSON translations with default-locale fallback
//
// This library loads translation documents from `<root>/languages/<locale>/`,
// resolves dotted paths against them, and formats the resulting templates.

// Re-export core functionality
pub use lingon_core::*;

// Logging controls (LINGON_LOG_LEVEL, LINGON_LOG_FORMAT, ...)
pub use lingon_log as log;

/// Prelude for common imports
pub mod prelude {
    pub use lingon_core::prelude::*;
    pub use lingon_core::bootstrap::DirectorySource;
    #[cfg(feature = "embed")]
    pub use lingon_core::bootstrap::EmbeddedSource;
}
