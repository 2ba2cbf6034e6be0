//! Git extraction strategies: describe parsing and archive keywords.

mod describe;
mod keywords;

use std::path::Path;

pub use describe::parse_describe;
pub use keywords::{
    Keywords,
    pieces_from_keywords,
};

use crate::config::VersionConfig;
use crate::pieces::{
    Pieces,
    abbrev_revision,
};
use crate::run::{
    git_executables,
    run_command,
};

/// Extract [`Pieces`] by running git against a checked-out source tree.
///
/// Returns `None` when `root` has no `.git` or the git client cannot be run,
/// advancing the cascade. Unparseable describe output is returned as an error
/// record instead: a malformed answer from a live repository is
/// authoritative, and falling through to weaker methods would hide it.
pub fn pieces_from_vcs(cfg: &VersionConfig, root: &Path) -> Option<Pieces> {
    if !root.join(".git").exists() {
        if cfg.verbose {
            eprintln!("no .git in {}", root.display());
        }
        return None;
    }

    let gits = git_executables();

    // tagged history yields TAG-NUM-gHEX[-dirty], untagged yields HEX[-dirty]
    let raw = run_command(
        gits,
        &["describe", "--tags", "--dirty", "--always", "--long"],
        root,
        cfg.verbose,
    )?;

    let mut pieces = parse_describe(&raw, &cfg.tag_prefix, cfg.verbose);
    if pieces.error.is_some() {
        return Some(pieces);
    }

    let long = run_command(gits, &["rev-parse", "HEAD"], root, cfg.verbose)?;
    if pieces.short.is_none() {
        pieces.short = Some(abbrev_revision(&long));
    }
    pieces.long = Some(long);

    if pieces.closest_tag.is_none() && pieces.distance.is_none() {
        // bare-revision case: the distance contract is "commits since the
        // dawn of history", counted with one extra command
        let count = run_command(gits, &["rev-list", "HEAD", "--count"], root, cfg.verbose)?;
        pieces.distance = count.parse().ok();
    }

    Some(pieces)
}
