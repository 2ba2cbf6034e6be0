//! Command implementations.

mod version;
mod write;

pub use version::{
    VersionArgs,
    own_version,
    version,
};
pub use write::{
    WriteArgs,
    write,
};
