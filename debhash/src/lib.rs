//! debhash: hash lookups in Debian-style repository metadata
//!
//! This crate provides:
//! - Package lookup in `Packages` indices (filename and hash of a package version)
//! - Index lookup in `Release`/`InRelease` manifests (hash of a per-arch `Packages` file)
//! - Debian revision handling for loose version matching
//! - Local artifact verification against a looked-up hash

pub mod checksum;
pub mod config;
pub mod error;
pub mod packages;
pub mod query;
pub mod release;
pub mod stanza;
pub mod version;

pub use config::{HashType, MatchOptions};
pub use error::{Error, Result};
pub use packages::{PackageEntry, PackageQuery};
pub use query::{Answer, IndexKind, Query};
pub use release::ChecksumEntry;
pub use stanza::Stanza;
