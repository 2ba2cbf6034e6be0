//! Derive a version from the name of an unpacked source archive directory.

use std::path::Path;

use crate::pieces::VersionInfo;

/// Treat the source root's directory name as `PREFIX<version>`.
///
/// Archive tools conventionally unpack to `myproject-1.2.3/`; stripping the
/// configured prefix leaves a bare version string. This method exists for
/// trees with no VCS metadata and no expanded keywords, so it never knows a
/// revision id, distance, or dirty state. A basename without the prefix
/// means no data.
pub fn versions_from_parentdir(
    parentdir_prefix: &str,
    root: &Path,
    verbose: bool,
) -> Option<VersionInfo> {
    let dirname = root.file_name()?.to_str()?;
    match dirname.strip_prefix(parentdir_prefix) {
        Some(version) => Some(VersionInfo {
            version: version.to_string(),
            full_revisionid: None,
        }),
        None => {
            if verbose {
                eprintln!(
                    "directory '{}' doesn't start with prefix '{}'",
                    dirname, parentdir_prefix
                );
            }
            None
        }
    }
}
