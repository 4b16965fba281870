//! Copying bundled translation files into the runtime languages directory.
//!
//! Applications ship default translations either as loose files next to the
//! binary ([`DirectorySource`]) or compiled in with `include_dir`
//! ([`EmbeddedSource`]). Either way they live under a `languages/` directory
//! and are copied into `<root>/languages/` once, without overwriting files
//! that already exist there. Local edits therefore always win over the
//! bundled defaults.
//!
//! # Examples
//!
//! ```no_run
//! use lingon_core::bootstrap::{import, DirectorySource};
//!
//! let report = import(&DirectorySource::new("resources"), "data/languages".as_ref())?;
//! println!("{} imported, {} kept", report.imported, report.skipped);
//! # Ok::<(), lingon_core::LingonError>(())
//! ```

use crate::{LingonError, Result};
use lingon_log::debug;
use std::fmt::Debug;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Name of the resource directory bundled translations live under.
pub const LANGUAGES_DIR: &str = "languages";

/// Where the bytes of a bundled file come from.
#[derive(Debug, Clone)]
pub enum BundledContents {
    /// A file on disk
    File(PathBuf),
    /// Bytes compiled into the binary
    Static(&'static [u8]),
}

impl BundledContents {
    fn write_to(&self, target: &Path) -> Result<()> {
        match self {
            BundledContents::File(source) => {
                fs::copy(source, target).map_err(|e| LingonError::io(source, e))?;
            }
            BundledContents::Static(bytes) => {
                fs::write(target, bytes).map_err(|e| LingonError::io(target, e))?;
            }
        }
        Ok(())
    }
}

/// One bundled file, addressed relative to the `languages/` root.
#[derive(Debug, Clone)]
pub struct BundledFile {
    /// Relative path with `/` separators, e.g. `en_US/common.json`
    pub relative_path: String,
    /// File contents
    pub contents: BundledContents,
}

/// A set of translation files shipped with the application.
pub trait BundledSource: Debug + Send + Sync {
    /// Short description for log output.
    fn describe(&self) -> String;

    /// Every file below the `languages/` root.
    ///
    /// A source without a `languages/` directory has no entries.
    fn files(&self) -> Result<Vec<BundledFile>>;
}

/// Bundled files in a directory on disk.
///
/// `root` is the resource directory containing `languages/`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Create a source reading `<root>/languages/`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The resource directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl BundledSource for DirectorySource {
    fn describe(&self) -> String {
        self.root.join(LANGUAGES_DIR).display().to_string()
    }

    fn files(&self) -> Result<Vec<BundledFile>> {
        let languages = self.root.join(LANGUAGES_DIR);
        if !languages.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&languages).follow_links(true) {
            let entry = entry.map_err(|e| {
                LingonError::Bootstrap(format!("failed to walk {}: {e}", languages.display()))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry.path().strip_prefix(&languages).unwrap_or(entry.path());
            files.push(BundledFile {
                relative_path: relative.to_string_lossy().replace('\\', "/"),
                contents: BundledContents::File(entry.path().to_path_buf()),
            });
        }

        Ok(files)
    }
}

/// Bundled files compiled into the binary.
///
/// ```ignore
/// use include_dir::{include_dir, Dir};
/// use lingon_core::bootstrap::EmbeddedSource;
///
/// // `resources/languages/en_US/common.json`, ...
/// static RESOURCES: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/resources");
///
/// let source = EmbeddedSource::new(&RESOURCES);
/// ```
#[cfg(feature = "embed")]
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedSource {
    dir: &'static include_dir::Dir<'static>,
}

#[cfg(feature = "embed")]
impl EmbeddedSource {
    /// Create a source reading the `languages/` child of `dir`.
    pub fn new(dir: &'static include_dir::Dir<'static>) -> Self {
        Self { dir }
    }
}

#[cfg(feature = "embed")]
impl BundledSource for EmbeddedSource {
    fn describe(&self) -> String {
        format!("embedded {}", self.dir.path().join(LANGUAGES_DIR).display())
    }

    fn files(&self) -> Result<Vec<BundledFile>> {
        let languages_path = self.dir.path().join(LANGUAGES_DIR);
        let Some(languages) = self.dir.get_dir(&languages_path) else {
            return Ok(Vec::new());
        };

        let mut files = Vec::new();
        collect_embedded(languages, &languages_path, &mut files);
        Ok(files)
    }
}

#[cfg(feature = "embed")]
fn collect_embedded(
    dir: &'static include_dir::Dir<'static>,
    base: &Path,
    out: &mut Vec<BundledFile>,
) {
    for entry in dir.entries() {
        match entry {
            include_dir::DirEntry::Dir(child) => collect_embedded(child, base, out),
            include_dir::DirEntry::File(file) => {
                let relative = file.path().strip_prefix(base).unwrap_or(file.path());
                out.push(BundledFile {
                    relative_path: relative.to_string_lossy().replace('\\', "/"),
                    contents: BundledContents::Static(file.contents()),
                });
            }
        }
    }
}

/// Outcome of an [`import`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Files copied into the target directory
    pub imported: usize,
    /// Files left alone because the destination already existed
    pub skipped: usize,
    /// Files refused because their path tries to leave the target directory
    pub rejected: usize,
}

/// Check whether a bundled relative path could escape the target directory.
///
/// Any `..` is refused, as is any root or prefix component.
pub fn is_unsafe_path(relative: &str) -> bool {
    relative.contains("..")
        || Path::new(relative)
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
}

fn is_json_file(relative: &str) -> bool {
    relative.to_ascii_lowercase().ends_with(".json")
}

/// Copy the JSON files of `source` into `target`.
///
/// Creates `target` if needed. Existing files are never overwritten, so
/// running this twice is a no-op the second time.
pub fn import(source: &dyn BundledSource, target: &Path) -> Result<ImportReport> {
    fs::create_dir_all(target).map_err(|e| LingonError::io(target, e))?;

    let mut report = ImportReport::default();
    for file in source.files()? {
        if !is_json_file(&file.relative_path) {
            continue;
        }

        if is_unsafe_path(&file.relative_path) {
            debug!(file = &file.relative_path; "Refusing bundled file with unsafe path");
            report.rejected += 1;
            continue;
        }

        let destination = target.join(&file.relative_path);
        if destination.exists() {
            report.skipped += 1;
            continue;
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|e| LingonError::io(parent, e))?;
        }
        file.contents.write_to(&destination)?;
        debug!(file = &file.relative_path; "Imported bundled file");
        report.imported += 1;
    }

    debug!(
        source = source.describe();
        "Bootstrap finished: {} new, {} existing, {} rejected",
        report.imported,
        report.skipped,
        report.rejected
    );

    Ok(report)
}
