//! Compute and print the version command.
//!
//! Runs the full extraction cascade for a source tree and prints the result.
//!
//! # Examples
//!
//! ```bash
//! # Version of the current checkout (tags like v1.2.3)
//! cargo vcs-version version
//!
//! # Native describe style instead of PEP440
//! cargo vcs-version version --style git-describe
//!
//! # JSON output with provenance
//! cargo vcs-version version --format json
//!
//! # Unpacked source archive with no VCS metadata
//! cargo vcs-version version --parentdir-prefix myproject-
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use crate::cascade::{
    Provenance,
    resolve,
};
use crate::config::VersionConfig;
use crate::pieces::VersionInfo;
use crate::render::Style;

/// Arguments for the `version` command.
#[derive(Parser, Debug)]
pub struct VersionArgs {
    /// Path to the root of the source tree.
    ///
    /// Defaults to the current directory.
    #[arg(long, default_value = ".")]
    pub repo_path: PathBuf,

    /// Prefix stripped from VCS tags (e.g. "v" matches tags like v1.2.3).
    #[arg(long, default_value = "v")]
    pub tag_prefix: String,

    /// Directory-name prefix for unpacked source archives.
    ///
    /// Enables the parent-directory fallback: a source root named
    /// `myproject-1.2.3` with prefix `myproject-` yields version `1.2.3`.
    #[arg(long)]
    pub parentdir_prefix: Option<String>,

    /// Path of the generated version file, relative to the source root.
    ///
    /// Read for pre-baked version data and for expanded archive keywords.
    #[arg(long)]
    pub version_file: Option<PathBuf>,

    /// Render style.
    ///
    /// One of `pep440` (default), `pep440-pre`, `pep440-post`, `pep440-old`,
    /// `git-describe`, `git-describe-long`.
    #[arg(long, default_value = "pep440")]
    pub style: String,

    /// Fallback version when every extraction method comes up empty.
    ///
    /// Without it, exhaustion of the cascade is a hard error.
    #[arg(long, env = "VCS_VERSION_DEFAULT")]
    pub default: Option<String>,

    /// Output format.
    ///
    /// - `version`: Print just the version string
    /// - `full`: Print just the full revision id
    /// - `json`: Print JSON with version, full-revisionid and source fields
    #[arg(long, default_value = "version")]
    pub format: String,

    /// Print one-line provenance and diagnostic messages to stderr.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl VersionArgs {
    pub(crate) fn to_config(&self) -> Result<VersionConfig> {
        let style: Style = self.style.parse()?;
        Ok(VersionConfig {
            style,
            tag_prefix: self.tag_prefix.clone(),
            parentdir_prefix: self.parentdir_prefix.clone(),
            versionfile: self.version_file.clone(),
            verbose: self.verbose,
        })
    }

    pub(crate) fn default_info(&self) -> Option<VersionInfo> {
        self.default.as_ref().map(|version| VersionInfo {
            version: version.clone(),
            full_revisionid: None,
        })
    }
}

#[derive(Serialize)]
struct Report<'a> {
    version: &'a str,
    #[serde(rename = "full-revisionid")]
    full_revisionid: Option<&'a str>,
    source: Provenance,
}

/// Run the extraction cascade and print the version.
///
/// # Errors
///
/// Returns an error if:
/// - The style or format name is not recognized
/// - Every extraction method fails and no `--default` was supplied
pub fn version(args: VersionArgs) -> Result<()> {
    let cfg = args.to_config()?;
    let default = args.default_info();
    let (info, provenance) = resolve(&cfg, &args.repo_path, default.as_ref())?;

    match args.format.as_str() {
        "version" => println!("{}", info.version),
        "full" => println!("{}", info.full_revisionid.as_deref().unwrap_or("")),
        "json" => {
            let report = Report {
                version: &info.version,
                full_revisionid: info.full_revisionid.as_deref(),
                source: provenance,
            };
            println!("{}", serde_json::to_string(&report)?);
        }
        _ => anyhow::bail!("Invalid format: {}", args.format),
    }

    Ok(())
}

/// Report the tool's own version (the `-V`/`--version` path).
///
/// build.rs bakes the computed version of this crate's checkout into
/// CARGO_PKG_VERSION, so this stays correct for source builds too.
pub fn own_version() -> Result<()> {
    println!("cargo-vcs-version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
