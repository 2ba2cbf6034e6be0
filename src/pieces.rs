//! The normalized intermediate record shared by all extraction methods.

use serde::Serialize;

/// Conventional abbreviated length of a git revision id.
const SHORT_LEN: usize = 7;

/// Normalized version evidence extracted from one source.
///
/// Every extraction method (describe parsing, archive keywords) produces one
/// of these; the renderer consumes it without mutating it. A record is built
/// fresh on every computation and discarded after rendering -- there is no
/// caching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pieces {
    /// Nearest ancestor tag with the configured prefix stripped. `None` when
    /// no tag was found or the tag did not carry the required prefix.
    pub closest_tag: Option<String>,

    /// Commits since `closest_tag` (`0` when sitting exactly on the tag), or
    /// commits since the dawn of history when no tag was found. Absent when
    /// the extraction method cannot know it (archive keywords).
    pub distance: Option<u64>,

    /// Working tree has uncommitted modifications.
    pub dirty: bool,

    /// Abbreviated revision id.
    pub short: Option<String>,

    /// Full revision id.
    pub long: Option<String>,

    /// Why extraction could not produce a confident result. When set, the
    /// record renders as the `0+unknown` sentinel in every style.
    pub error: Option<String>,
}

impl Pieces {
    /// Record carrying only an error, for authoritative-but-broken VCS
    /// answers.
    pub fn from_error(error: impl Into<String>) -> Self {
        Pieces {
            error: Some(error.into()),
            ..Pieces::default()
        }
    }
}

/// Abbreviate a full revision id to the conventional short form.
///
/// Used at `Pieces` construction time when the extraction method supplies
/// only the full id; never recomputed downstream.
pub fn abbrev_revision(long: &str) -> String {
    long.chars().take(SHORT_LEN).collect()
}

/// A rendered version: the version string plus the full revision id it was
/// derived from (with a `.dirty` marker when applicable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    /// The rendered version string.
    pub version: String,

    /// Full revision id, `.dirty`-suffixed for modified working trees.
    /// `None` when the winning method had no revision id (parent directory,
    /// caller default).
    #[serde(rename = "full-revisionid")]
    pub full_revisionid: Option<String>,
}
