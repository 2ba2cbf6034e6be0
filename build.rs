//! Build script that versions the tool with its own pipeline.
//!
//! Runs `git describe --tags --dirty --always --long` against this source
//! tree and renders the result as a PEP440 string, overriding
//! CARGO_PKG_VERSION. Build scripts cannot depend on the crate they build, so
//! this is a small standalone copy of the describe-to-pep440 path in
//! `src/git/describe.rs` and `src/render.rs`.

use std::path::Path;
use std::process::Command;

fn main() {
    let version = compute_version(Path::new(".")).unwrap_or_else(|| {
        println!("cargo:warning=version computation failed, using 0+unknown");
        "0+unknown".to_string()
    });

    println!("cargo:rustc-env=CARGO_PKG_VERSION={}", version);
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");
}

fn compute_version(root: &Path) -> Option<String> {
    if !root.join(".git").exists() {
        return None;
    }
    let describe = git(
        root,
        &["describe", "--tags", "--dirty", "--always", "--long"],
    )?;
    Some(pep440(root, &describe, "v"))
}

fn git(root: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(root)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if stdout.is_empty() { None } else { Some(stdout) }
}

/// Minimal TAG-NUM-gHEX[-dirty] to PEP440 conversion for self-versioning.
fn pep440(root: &Path, describe: &str, tag_prefix: &str) -> String {
    let (describe, dirty) = match describe.strip_suffix("-dirty") {
        Some(rest) => (rest, true),
        None => (describe, false),
    };

    // TAG-NUM-gHEX, splitting from the right so hyphenated tags survive
    let parsed = describe.rsplit_once('-').and_then(|(head, hex)| {
        let hex = hex.strip_prefix('g')?;
        let (tag, num) = head.rsplit_once('-')?;
        let distance: u64 = num.parse().ok()?;
        Some((tag.strip_prefix(tag_prefix).unwrap_or(tag), distance, hex))
    });

    let Some((tag, distance, hex)) = parsed else {
        // bare revision id (no tags anywhere in history)
        let count = git(root, &["rev-list", "HEAD", "--count"]).unwrap_or_else(|| "0".to_string());
        let mut version = format!("0+untagged.{}.g{}", count, describe);
        if dirty {
            version.push_str(".dirty");
        }
        return version;
    };

    let mut version = tag.to_string();
    if distance > 0 || dirty {
        version.push_str(&format!("+{}.g{}", distance, hex));
        if dirty {
            version.push_str(".dirty");
        }
    }
    version
}
