//! Write the pre-baked version file command.
//!
//! Computes the version with the same cascade as `version`, then persists
//! the rendered result as the pre-baked version-file fragment. Packaging
//! scripts run this while assembling a source archive so the shipped tree
//! answers version queries without VCS metadata.
//!
//! # Examples
//!
//! ```bash
//! # Bake the computed version into the tree being packaged
//! cargo vcs-version write --output src/_version.txt
//!
//! # Same, for an archive of a differently tagged sub-package
//! cargo vcs-version write --tag-prefix sub- --output sub/_version.txt
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::cascade::resolve;
use crate::commands::VersionArgs;
use crate::version_file::write_versions;

/// Arguments for the `write` command.
#[derive(Parser, Debug)]
pub struct WriteArgs {
    /// Destination path for the generated version file.
    #[arg(long)]
    pub output: PathBuf,

    #[command(flatten)]
    pub version: VersionArgs,
}

/// Compute the version and write it as a pre-baked version file.
///
/// # Errors
///
/// Returns an error if the cascade is exhausted with no `--default`, or the
/// output file cannot be written.
pub fn write(args: WriteArgs) -> Result<()> {
    let cfg = args.version.to_config()?;
    let default = args.version.default_info();
    let (info, _) = resolve(&cfg, &args.version.repo_path, default.as_ref())?;

    write_versions(&args.output, &info)?;
    println!("set {} to '{}'", args.output.display(), info.version);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::version_file::versions_from_file;

    #[test]
    fn test_write_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("_version.txt"),
            "version_version = '1.2.3'\nversion_full = 'abc123'\n",
        )
        .unwrap();

        let output = dir.path().join("baked.txt");
        let args = WriteArgs {
            output: output.clone(),
            version: VersionArgs {
                repo_path: dir.path().to_path_buf(),
                tag_prefix: "v".to_string(),
                parentdir_prefix: None,
                version_file: Some("_version.txt".into()),
                style: "pep440".to_string(),
                default: None,
                format: "version".to_string(),
                verbose: false,
            },
        };
        assert!(write(args).is_ok());

        let baked = versions_from_file(&output).unwrap();
        assert_eq!(baked.version, "1.2.3");
        assert_eq!(baked.full_revisionid.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_write_fails_on_exhaustion() {
        let dir = tempfile::tempdir().unwrap();
        let args = WriteArgs {
            output: dir.path().join("baked.txt"),
            version: VersionArgs {
                repo_path: dir.path().to_path_buf(),
                tag_prefix: "v".to_string(),
                parentdir_prefix: None,
                version_file: None,
                style: "pep440".to_string(),
                default: None,
                format: "version".to_string(),
                verbose: false,
            },
        };
        assert!(write(args).is_err());
    }
}
