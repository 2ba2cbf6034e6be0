//! Render a [`Pieces`] record into a version string.
//!
//! Pure functions only: no I/O, and the incoming record is never mutated.
//! Everything derived while formatting (tag-or-zero, dirty suffixes, the
//! local-segment separator) is a local value, so no style's intermediate
//! state can leak into another's.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde::Serialize;

use crate::pieces::{
    Pieces,
    VersionInfo,
};

/// Version rendered for error records, regardless of style.
const UNKNOWN_VERSION: &str = "0+unknown";

/// A named version-string formatting convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    /// `TAG[+N.gHEX[.dirty]]`, the default.
    #[default]
    Pep440,
    /// `TAG[.post.devN]`; no revision id or dirty marker.
    Pep440Pre,
    /// `TAG[.postN[.dev0]+gHEX]`.
    Pep440Post,
    /// `TAG[.postN[.dev0]]`, the pre-local-identifier convention.
    Pep440Old,
    /// What `git describe --tags --dirty` would print.
    GitDescribe,
    /// What `git describe --tags --dirty --long` would print.
    GitDescribeLong,
}

impl FromStr for Style {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" | "default" | "pep440" => Ok(Style::Pep440),
            "pep440-pre" => Ok(Style::Pep440Pre),
            "pep440-post" => Ok(Style::Pep440Post),
            "pep440-old" => Ok(Style::Pep440Old),
            "git-describe" => Ok(Style::GitDescribe),
            "git-describe-long" => Ok(Style::GitDescribeLong),
            other => anyhow::bail!("unknown style '{}'", other),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Style::Pep440 => "pep440",
            Style::Pep440Pre => "pep440-pre",
            Style::Pep440Post => "pep440-post",
            Style::Pep440Old => "pep440-old",
            Style::GitDescribe => "git-describe",
            Style::GitDescribeLong => "git-describe-long",
        };
        f.write_str(name)
    }
}

/// Render `pieces` under `style`.
///
/// Error records collapse to the literal `0+unknown` in every style; no
/// style-specific formatting is attempted on them. The full revision id
/// carries a `.dirty` suffix when the working tree was modified.
pub fn render(pieces: &Pieces, style: Style) -> VersionInfo {
    if pieces.error.is_some() {
        return VersionInfo {
            version: UNKNOWN_VERSION.to_string(),
            full_revisionid: pieces.long.clone(),
        };
    }

    let version = match style {
        Style::Pep440 => render_pep440(pieces),
        Style::Pep440Pre => render_pep440_pre(pieces),
        Style::Pep440Post => render_pep440_post(pieces),
        Style::Pep440Old => render_pep440_old(pieces),
        Style::GitDescribe => render_git_describe(pieces),
        Style::GitDescribeLong => render_git_describe_long(pieces),
    };

    let full_revisionid = pieces.long.as_ref().map(|long| {
        if pieces.dirty {
            format!("{}.dirty", long)
        } else {
            long.clone()
        }
    });

    VersionInfo {
        version,
        full_revisionid,
    }
}

fn distance(pieces: &Pieces) -> u64 {
    pieces.distance.unwrap_or(0)
}

fn short(pieces: &Pieces) -> &str {
    pieces.short.as_deref().unwrap_or("")
}

/// Separator for appending to a local version segment: tags that already
/// contain a `+` get `.` so the result stays a single local identifier.
fn plus_or_dot(pieces: &Pieces) -> &'static str {
    match &pieces.closest_tag {
        Some(tag) if tag.contains('+') => ".",
        _ => "+",
    }
}

/// TAG[+N.gHEX[.dirty]] | 0+untagged.N.gHEX[.dirty]
///
/// The exceptions (distance and/or dirty) land in the local version
/// identifier, so a dirtied tagged build still ends in `.dirty`.
fn render_pep440(pieces: &Pieces) -> String {
    let mut version = match &pieces.closest_tag {
        Some(tag) => {
            let mut v = tag.clone();
            if distance(pieces) > 0 || pieces.dirty {
                v.push_str(plus_or_dot(pieces));
                v.push_str(&format!("{}.g{}", distance(pieces), short(pieces)));
            }
            v
        }
        None => format!("0+untagged.{}.g{}", distance(pieces), short(pieces)),
    };
    if pieces.dirty {
        version.push_str(".dirty");
    }
    version
}

/// TAG[.post.devN] -- sorts before TAG, never marks dirty.
fn render_pep440_pre(pieces: &Pieces) -> String {
    let tag = pieces.closest_tag.as_deref().unwrap_or("0");
    if pieces.closest_tag.is_none() || distance(pieces) > 0 {
        format!("{}.post.dev{}", tag, distance(pieces))
    } else {
        tag.to_string()
    }
}

/// TAG[.postN[.dev0]+gHEX] -- sorts after TAG; `.dev0` marks dirty trees.
fn render_pep440_post(pieces: &Pieces) -> String {
    match &pieces.closest_tag {
        Some(tag) => {
            let mut version = tag.clone();
            if distance(pieces) > 0 || pieces.dirty {
                version.push_str(&format!(".post{}", distance(pieces)));
                if pieces.dirty {
                    version.push_str(".dev0");
                }
                version.push_str(plus_or_dot(pieces));
                version.push_str(&format!("g{}", short(pieces)));
            }
            version
        }
        None => {
            let mut version = format!("0.post{}", distance(pieces));
            if pieces.dirty {
                version.push_str(".dev0");
            }
            version.push_str(&format!("+g{}", short(pieces)));
            version
        }
    }
}

/// TAG[.postN[.dev0]] -- like `pep440-post` without the revision id, for
/// tooling that predates local version identifiers.
fn render_pep440_old(pieces: &Pieces) -> String {
    match &pieces.closest_tag {
        Some(tag) => {
            let mut version = tag.clone();
            if distance(pieces) > 0 || pieces.dirty {
                version.push_str(&format!(".post{}", distance(pieces)));
                if pieces.dirty {
                    version.push_str(".dev0");
                }
            }
            version
        }
        None => {
            let mut version = format!("0.post{}", distance(pieces));
            if pieces.dirty {
                version.push_str(".dev0");
            }
            version
        }
    }
}

/// TAG[-N-gHEX][-dirty] | HEX[-dirty]
fn render_git_describe(pieces: &Pieces) -> String {
    let mut version = match &pieces.closest_tag {
        Some(tag) => {
            let mut v = tag.clone();
            if distance(pieces) > 0 {
                v.push_str(&format!("-{}-g{}", distance(pieces), short(pieces)));
            }
            v
        }
        None => short(pieces).to_string(),
    };
    if pieces.dirty {
        version.push_str("-dirty");
    }
    version
}

/// TAG-N-gHEX[-dirty] | HEX[-dirty] -- the distance is always included.
fn render_git_describe_long(pieces: &Pieces) -> String {
    let mut version = match &pieces.closest_tag {
        Some(tag) => format!("{}-{}-g{}", tag, distance(pieces), short(pieces)),
        None => short(pieces).to_string(),
    };
    if pieces.dirty {
        version.push_str("-dirty");
    }
    version
}
