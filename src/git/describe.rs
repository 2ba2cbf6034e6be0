//! Parse `git describe` output into a [`Pieces`] record.

use std::sync::LazyLock;

use regex::Regex;

use crate::pieces::Pieces;

/// TAG-NUM-gHEX with a greedy tag group, so tags containing hyphens keep
/// their full name.
static DESCRIBE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)-(\d+)-g([0-9a-f]+)$").expect("hard-coded pattern"));

/// Parse the output of `git describe --tags --dirty --always --long`.
///
/// Accepted shapes are `TAG-NUM-gHEX[-dirty]` and, for histories with no
/// tags at all, a bare `HEX[-dirty]`. The returned record never carries the
/// full revision id or the untagged commit count; the caller obtains both
/// with separate git invocations.
///
/// Unexpected output becomes an error record (the describe answer is
/// authoritative, even when broken), not a panic. A tag that lacks
/// `tag_prefix` is reported at verbose level and demoted to the untagged
/// case.
pub fn parse_describe(raw: &str, tag_prefix: &str, verbose: bool) -> Pieces {
    let mut pieces = Pieces::default();

    // the dirty marker is always the outermost suffix
    let describe = match raw.strip_suffix("-dirty") {
        Some(rest) => {
            pieces.dirty = true;
            rest
        }
        None => raw,
    };

    if !describe.contains('-') {
        // bare revision id, no tags anywhere in history
        pieces.short = Some(describe.to_string());
        return pieces;
    }

    let Some(caps) = DESCRIBE_RE.captures(describe) else {
        return Pieces {
            dirty: pieces.dirty,
            ..Pieces::from_error(format!("unable to parse git-describe output: '{}'", raw))
        };
    };

    let full_tag = &caps[1];
    match full_tag.strip_prefix(tag_prefix) {
        Some(tag) => pieces.closest_tag = Some(tag.to_string()),
        None => {
            if verbose {
                eprintln!(
                    "tag '{}' doesn't start with prefix '{}'",
                    full_tag, tag_prefix
                );
            }
        }
    }

    pieces.distance = caps[2].parse().ok();
    pieces.short = Some(caps[3].to_string());
    pieces
}
