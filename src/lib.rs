#![doc = include_str!("../README.md")]

/// The extraction cascade and the library entry points.
pub mod cascade;
/// Command implementations and argument types.
pub mod commands;
/// Per-call configuration.
pub mod config;
/// Git extraction strategies.
pub mod git;
/// Parent-directory fallback for unpacked archives.
pub mod parentdir;
/// The normalized `Pieces` record.
pub mod pieces;
/// Style rendering.
pub mod render;
/// External command execution.
pub mod run;
/// The generated version-file fragment.
pub mod version_file;

pub use cascade::{
    Provenance,
    get_version,
    get_versions,
    resolve,
};
pub use config::VersionConfig;
pub use pieces::{
    Pieces,
    VersionInfo,
};
pub use render::{
    Style,
    render,
};
