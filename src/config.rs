//! Per-call configuration.

use std::path::PathBuf;

use crate::render::Style;

/// Configuration for one version computation.
///
/// Passed explicitly into every entry point rather than held as ambient
/// state, so a single process can compute versions for several independent
/// source trees (e.g. sub-packages with different tag prefixes).
#[derive(Debug, Clone)]
pub struct VersionConfig {
    /// Render style for the final version string.
    pub style: Style,

    /// Prefix stripped from VCS tags to obtain the bare version
    /// (e.g. `"v"` for tags like `v1.2.3`).
    pub tag_prefix: String,

    /// Prefix stripped from the source root's directory name when falling
    /// back to an unpacked-archive directory like `myproject-1.2.3/`.
    /// `None` disables the parent-directory method.
    pub parentdir_prefix: Option<String>,

    /// Path of the generated version file, relative to the source root.
    /// Read for both pre-baked version data and expanded archive keywords.
    /// `None` disables both file-based methods.
    pub versionfile: Option<PathBuf>,

    /// Emit one-line provenance and diagnostic messages to stderr.
    pub verbose: bool,
}

impl Default for VersionConfig {
    fn default() -> Self {
        VersionConfig {
            style: Style::default(),
            tag_prefix: "v".to_string(),
            parentdir_prefix: None,
            versionfile: None,
            verbose: false,
        }
    }
}
