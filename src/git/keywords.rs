//! Extract version data from expanded `git archive` keyword substitutions.
//!
//! A tree exported with `git archive` has `$Format:%d$` and `$Format:%H$`
//! placeholders in the version file replaced by the ref-name list and the
//! full revision id of the archived commit. A plain checkout still carries
//! the literal placeholders, which is the signal that this method does not
//! apply.

use crate::pieces::{
    Pieces,
    abbrev_revision,
};

/// The two keyword values read from the generated version file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keywords {
    /// Expansion of `%d`: a parenthesized, comma-separated ref-name list.
    pub refnames: String,
    /// Expansion of `%H`: the full revision id.
    pub full: String,
}

/// Convert expanded keywords into a [`Pieces`] record.
///
/// Returns `None` when the ref list still contains the unexpanded `$Format`
/// placeholder, meaning the tree was not produced by `git archive` and the
/// cascade must move on.
///
/// When several tags point at the archived commit the candidates are sorted
/// and the first is taken, so e.g. `2.0` wins over `2.0rc1`. An archive is
/// necessarily a clean snapshot (`dirty` is false) and carries no commit
/// distance.
pub fn pieces_from_keywords(
    keywords: &Keywords,
    tag_prefix: &str,
    verbose: bool,
) -> Option<Pieces> {
    let refnames = keywords.refnames.trim();
    if refnames.starts_with("$Format") {
        if verbose {
            eprintln!("keywords are unexpanded, not using");
        }
        return None;
    }

    let inner = refnames.trim_start_matches('(').trim_end_matches(')');

    let mut candidates: Vec<&str> = Vec::new();
    for name in inner.split(',') {
        let name = name.trim();
        if name.is_empty() || name == "HEAD" || name.starts_with("HEAD -> ") {
            continue;
        }
        // newer git decorates tags as "tag: NAME"
        let name = name.strip_prefix("tag: ").unwrap_or(name);
        if let Some(tag) = name.strip_prefix(tag_prefix) {
            candidates.push(tag);
        }
    }
    candidates.sort_unstable();

    let long = keywords.full.trim().to_string();
    let short = abbrev_revision(&long);

    match candidates.first() {
        Some(&tag) => {
            if verbose {
                eprintln!("picking tag '{}' from expanded keywords", tag);
            }
            Some(Pieces {
                closest_tag: Some(tag.to_string()),
                distance: None,
                dirty: false,
                short: Some(short),
                long: Some(long),
                error: None,
            })
        }
        None => {
            if verbose {
                eprintln!("no suitable tags, using unknown + full revision id");
            }
            Some(Pieces {
                short: Some(short),
                long: Some(long),
                ..Pieces::from_error("no suitable tags")
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(refnames: &str, full: &str, prefix: &str) -> Option<Pieces> {
        pieces_from_keywords(
            &Keywords {
                refnames: refnames.to_string(),
                full: full.to_string(),
            },
            prefix,
            false,
        )
    }

    #[test]
    fn test_basic() {
        let p = parse(" (HEAD, 2.0,master  , otherbranch ) ", " full ", "").unwrap();
        assert_eq!(p.closest_tag.as_deref(), Some("2.0"));
        assert_eq!(p.long.as_deref(), Some("full"));
        assert!(!p.dirty);
        assert_eq!(p.distance, None);
        assert_eq!(p.error, None);
    }

    #[test]
    fn test_ambiguous_tags_prefer_sorted_first() {
        // "2.0" sorts before its release candidates
        let p = parse(" (HEAD, 2.0rc1, 2.0, 2.0rc2) ", " full ", "").unwrap();
        assert_eq!(p.closest_tag.as_deref(), Some("2.0"));
    }

    #[test]
    fn test_prefix_stripped() {
        let p = parse(" (HEAD, projectname-2.0) ", " full ", "projectname-").unwrap();
        assert_eq!(p.closest_tag.as_deref(), Some("2.0"));
    }

    #[test]
    fn test_modern_decoration() {
        let p = parse(
            " (HEAD -> main, tag: v1.4.0, tag: v1.4.0rc1, origin/main) ",
            "250b7ca731388d8f016db2e06ab1d6289486424b",
            "v",
        )
        .unwrap();
        assert_eq!(p.closest_tag.as_deref(), Some("1.4.0"));
        assert_eq!(p.short.as_deref(), Some("250b7ca"));
    }

    #[test]
    fn test_unexpanded_placeholder_is_not_this_method() {
        assert_eq!(parse(" $Format$ ", " full ", "projectname-"), None);
        assert_eq!(parse("$Format:%d$", "$Format:%H$", ""), None);
    }

    #[test]
    fn test_no_tags_at_all() {
        let p = parse("(HEAD, master)", "full", "").unwrap();
        assert_eq!(p.error.as_deref(), Some("no suitable tags"));
        assert_eq!(p.closest_tag, None);
        assert_eq!(p.long.as_deref(), Some("full"));
        assert!(!p.dirty);
    }

    #[test]
    fn test_no_ref_matches_prefix() {
        let p = parse("(HEAD, master, 1.23)", "full", "missingprefix-").unwrap();
        assert_eq!(p.error.as_deref(), Some("no suitable tags"));
    }
}
