//! Try every extraction method in strict priority order.

use std::fmt;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::config::VersionConfig;
use crate::git;
use crate::parentdir::versions_from_parentdir;
use crate::pieces::VersionInfo;
use crate::render::render;
use crate::version_file;

/// Which method of the cascade supplied the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    /// Pre-baked version file inside a source distribution.
    VersionFile,
    /// Expanded `git archive` keyword substitutions.
    ExpandedKeywords,
    /// Live `git describe` against a checkout.
    Vcs,
    /// Parent directory name of an unpacked archive.
    ParentDir,
    /// Caller-supplied default.
    Default,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provenance::VersionFile => "version file",
            Provenance::ExpandedKeywords => "expanded keywords",
            Provenance::Vcs => "VCS",
            Provenance::ParentDir => "parent directory",
            Provenance::Default => "default",
        };
        f.write_str(name)
    }
}

/// Run the cascade and report which method won.
///
/// Order: pre-baked version file, expanded keywords, `git describe`, parent
/// directory name, then `default`. The first method that yields data wins;
/// inapplicable methods advance silently (or with a verbose diagnostic).
/// Exhaustion with no default is a hard error -- fabricating a version would
/// be worse than stopping the build.
pub fn resolve(
    cfg: &VersionConfig,
    root: &Path,
    default: Option<&VersionInfo>,
) -> Result<(VersionInfo, Provenance)> {
    // relative roots like "." have no usable basename for the parentdir
    // method, so resolve once up front
    let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());

    if let Some(relative) = &cfg.versionfile {
        let path = root.join(relative);

        if let Some(info) = version_file::versions_from_file(&path) {
            report(cfg, Provenance::VersionFile, &info);
            return Ok((info, Provenance::VersionFile));
        }

        if let Some(keywords) = version_file::keywords_from_file(&path)
            && let Some(pieces) = git::pieces_from_keywords(&keywords, &cfg.tag_prefix, cfg.verbose)
        {
            let info = render(&pieces, cfg.style);
            report(cfg, Provenance::ExpandedKeywords, &info);
            return Ok((info, Provenance::ExpandedKeywords));
        }
    }

    if let Some(pieces) = git::pieces_from_vcs(cfg, &root) {
        let info = render(&pieces, cfg.style);
        report(cfg, Provenance::Vcs, &info);
        return Ok((info, Provenance::Vcs));
    }

    if let Some(prefix) = &cfg.parentdir_prefix
        && let Some(info) = versions_from_parentdir(prefix, &root, cfg.verbose)
    {
        report(cfg, Provenance::ParentDir, &info);
        return Ok((info, Provenance::ParentDir));
    }

    if let Some(info) = default {
        report(cfg, Provenance::Default, info);
        return Ok((info.clone(), Provenance::Default));
    }

    anyhow::bail!("unable to compute version for {}", root.display())
}

fn report(cfg: &VersionConfig, provenance: Provenance, info: &VersionInfo) {
    if cfg.verbose {
        eprintln!("got version from {}: {}", provenance, info.version);
    }
}

/// Compute the version pair for `root`.
pub fn get_versions(cfg: &VersionConfig, root: &Path) -> Result<VersionInfo> {
    resolve(cfg, root, None).map(|(info, _)| info)
}

/// Compute just the version string for `root`.
pub fn get_version(cfg: &VersionConfig, root: &Path) -> Result<String> {
    get_versions(cfg, root).map(|info| info.version)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;

    // temp dirs carry no .git, so the VCS method never fires here

    fn cfg_with_versionfile() -> VersionConfig {
        VersionConfig {
            versionfile: Some(PathBuf::from("_version.txt")),
            ..VersionConfig::default()
        }
    }

    #[test]
    fn test_prebaked_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("_version.txt"),
            "version_version = '1.2.3'\nversion_full = 'abc123'\n",
        )
        .unwrap();

        let (info, provenance) = resolve(&cfg_with_versionfile(), dir.path(), None).unwrap();
        assert_eq!(provenance, Provenance::VersionFile);
        assert_eq!(info.version, "1.2.3");
        assert_eq!(info.full_revisionid.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_expanded_keywords_after_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("_version.txt"),
            "git_refnames = \" (HEAD -> main, tag: v2.0)\"\n\
             git_full = \"250b7ca731388d8f016db2e06ab1d6289486424b\"\n",
        )
        .unwrap();

        let (info, provenance) = resolve(&cfg_with_versionfile(), dir.path(), None).unwrap();
        assert_eq!(provenance, Provenance::ExpandedKeywords);
        assert_eq!(info.version, "2.0");
        assert_eq!(
            info.full_revisionid.as_deref(),
            Some("250b7ca731388d8f016db2e06ab1d6289486424b")
        );
    }

    #[test]
    fn test_unexpanded_keywords_fall_through() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("_version.txt"),
            "git_refnames = \"$Format:%d$\"\ngit_full = \"$Format:%H$\"\n",
        )
        .unwrap();

        let default = VersionInfo {
            version: "9.9".to_string(),
            full_revisionid: None,
        };
        let (info, provenance) =
            resolve(&cfg_with_versionfile(), dir.path(), Some(&default)).unwrap();
        assert_eq!(provenance, Provenance::Default);
        assert_eq!(info.version, "9.9");
    }

    #[test]
    fn test_keywords_without_suitable_tags_are_terminal() {
        // a clean archive of an untagged commit renders the unknown
        // sentinel; the cascade does not fall through to weaker methods
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("_version.txt"),
            "git_refnames = \" (HEAD -> main, origin/main)\"\n\
             git_full = \"250b7ca731388d8f016db2e06ab1d6289486424b\"\n",
        )
        .unwrap();

        let (info, provenance) = resolve(&cfg_with_versionfile(), dir.path(), None).unwrap();
        assert_eq!(provenance, Provenance::ExpandedKeywords);
        assert_eq!(info.version, "0+unknown");
        assert_eq!(
            info.full_revisionid.as_deref(),
            Some("250b7ca731388d8f016db2e06ab1d6289486424b")
        );
    }

    #[test]
    fn test_parentdir_fallback() {
        let base = tempfile::tempdir().unwrap();
        let root = base.path().join("myproject-1.2.3");
        fs::create_dir(&root).unwrap();

        let cfg = VersionConfig {
            parentdir_prefix: Some("myproject-".to_string()),
            ..VersionConfig::default()
        };
        let (info, provenance) = resolve(&cfg, &root, None).unwrap();
        assert_eq!(provenance, Provenance::ParentDir);
        assert_eq!(info.version, "1.2.3");
        assert_eq!(info.full_revisionid, None);
    }

    #[test]
    fn test_parentdir_prefix_mismatch_advances() {
        let base = tempfile::tempdir().unwrap();
        let root = base.path().join("otherthing-1.2.3");
        fs::create_dir(&root).unwrap();

        let cfg = VersionConfig {
            parentdir_prefix: Some("myproject-".to_string()),
            ..VersionConfig::default()
        };
        assert!(resolve(&cfg, &root, None).is_err());
    }

    #[test]
    fn test_exhaustion_is_hard_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve(&VersionConfig::default(), dir.path(), None).unwrap_err();
        assert!(err.to_string().contains("unable to compute version"));
    }

    #[test]
    fn test_get_version_uses_default_style() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("_version.txt"),
            "version_version = '0.5.0'\nversion_full = ''\n",
        )
        .unwrap();
        let version = get_version(&cfg_with_versionfile(), dir.path()).unwrap();
        assert_eq!(version, "0.5.0");
    }
}
