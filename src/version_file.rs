//! The generated version-file fragment.
//!
//! A small line-oriented text file serves two methods of the cascade. Inside
//! a `git archive` export it carries keyword substitutions:
//!
//! ```text
//! git_refnames = " (HEAD -> main, tag: v1.2.3)"
//! git_full = "250b7ca731388d8f016db2e06ab1d6289486424b"
//! ```
//!
//! Inside a packaged source distribution it carries a previously rendered
//! result instead:
//!
//! ```text
//! version_version = '1.2.3'
//! version_full = '250b7ca731388d8f016db2e06ab1d6289486424b'
//! ```
//!
//! Each line is matched by a fixed pattern; line order does not matter.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{
    Context,
    Result,
};
use regex::Regex;

use crate::git::Keywords;
use crate::pieces::VersionInfo;

static GIT_REFNAMES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^git_refnames\s*=\s*"(.*)"\s*$"#).expect("hard-coded pattern"));
static GIT_FULL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^git_full\s*=\s*"(.*)"\s*$"#).expect("hard-coded pattern"));
static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^version_version\s*=\s*'([^']+)'\s*$").expect("hard-coded pattern"));
static FULL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^version_full\s*=\s*'([^']*)'\s*$").expect("hard-coded pattern"));

/// Read the keyword substitution values, expanded or not.
///
/// `None` when the file is missing or either line is absent; deciding
/// whether the values were actually expanded is up to the keyword
/// extractor.
pub fn keywords_from_file(path: &Path) -> Option<Keywords> {
    let text = fs::read_to_string(path).ok()?;
    let mut refnames = None;
    let mut full = None;
    for line in text.lines() {
        if let Some(caps) = GIT_REFNAMES_RE.captures(line) {
            refnames = Some(caps[1].to_string());
        }
        if let Some(caps) = GIT_FULL_RE.captures(line) {
            full = Some(caps[1].to_string());
        }
    }
    Some(Keywords {
        refnames: refnames?,
        full: full?,
    })
}

/// Read a previously rendered version pair.
///
/// `None` when the file is missing or carries no `version_version` line.
/// An empty `version_full` value means the revision id was unknown when the
/// file was written.
pub fn versions_from_file(path: &Path) -> Option<VersionInfo> {
    let text = fs::read_to_string(path).ok()?;
    let mut version = None;
    let mut full = None;
    for line in text.lines() {
        if let Some(caps) = VERSION_RE.captures(line) {
            version = Some(caps[1].to_string());
        }
        if let Some(caps) = FULL_RE.captures(line) {
            full = Some(caps[1].to_string());
        }
    }
    Some(VersionInfo {
        version: version?,
        full_revisionid: full.filter(|f| !f.is_empty()),
    })
}

/// Write the pre-baked form of the version file.
///
/// Packaging scripts call this so distribution archives answer version
/// queries without any VCS metadata present.
pub fn write_versions(path: &Path, info: &VersionInfo) -> Result<()> {
    let content = format!(
        "# This file was generated by cargo-vcs-version from revision-control\n\
         # data, or from the parent directory name of an unpacked source\n\
         # archive. Distribution tarballs contain a pre-generated copy.\n\
         \n\
         version_version = '{}'\n\
         version_full = '{}'\n",
        info.version,
        info.full_revisionid.as_deref().unwrap_or("")
    );
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
