//! Index lookup in `Release` and `InRelease` manifests
//!
//! A release manifest lists every index file of the repository under one
//! section per hash algorithm:
//!
//! ```text
//! SHA256:
//!  a1b2c3...  1234 main/binary-amd64/Packages
//!  d4e5f6...   567 main/binary-amd64/Packages.gz
//! ```

use std::path::Path;

use tracing::{debug, trace};

use crate::{config::HashType, Result};

/// Prefix of files that are still being written and must be ignored
const TRANSIENT_PREFIX: &str = ".work_";

/// One `<hash> <size> <path>` listing line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumEntry<'a> {
    pub hash: &'a str,
    /// `None` when the size column is not a number
    pub size: Option<u64>,
    pub path: &'a str,
}

impl<'a> ChecksumEntry<'a> {
    /// Parse a listing line. Surrounding and repeated whitespace is ignored.
    ///
    /// Only the token count is checked; a malformed size does not reject the line.
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let hash = tokens.next()?;
        let size = tokens.next()?.parse().ok();
        let path = tokens.next()?;
        Some(Self { hash, size, path })
    }

    /// Whether the entry names an incomplete artifact
    pub fn is_transient(&self) -> bool {
        self.path.starts_with(TRANSIENT_PREFIX)
    }
}

/// Path of the uncompressed package index for an architecture and component.
pub fn packages_index_path(arch: &str, component: &str) -> String {
    format!("{}/binary-{}/Packages", component, arch)
}

/// Whether `line` references `index` itself rather than a compressed variant.
fn references_index(line: &str, index: &str) -> bool {
    line.contains(index) && !line.contains(&format!("{}.", index))
}

/// Find the hash of `<component>/binary-<arch>/Packages` in a release manifest.
///
/// Scanning starts at the first `<hash_type>:` section header. A manifest
/// without that header yields `None`, even if a listing line for the index
/// appears elsewhere in the file.
pub fn find_index_hash(
    content: &str,
    arch: &str,
    component: &str,
    hash_type: &HashType,
) -> Option<String> {
    let header = hash_type.header();
    let index = packages_index_path(arch, component);

    let lines: Vec<&str> = content.lines().collect();
    let Some(start) = lines.iter().position(|line| line.starts_with(&header)) else {
        debug!("No {} section in release file", hash_type);
        return None;
    };
    trace!("{} section starts at line {}", hash_type, start + 1);

    for line in &lines[start..] {
        if !references_index(line, &index) {
            continue;
        }
        let Some(entry) = ChecksumEntry::parse(line) else {
            debug!("Ignoring malformed listing line: {:?}", line);
            continue;
        };
        if entry.is_transient() {
            debug!("Ignoring transient entry {}", entry.path);
            continue;
        }
        debug!("Matched {} (size {:?})", entry.path, entry.size);
        return Some(entry.hash.to_string());
    }

    None
}

/// Read a release manifest and look up the package index hash in it.
pub fn lookup_release_file(
    path: &Path,
    arch: &str,
    component: &str,
    hash_type: &HashType,
) -> Result<Option<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(find_index_hash(&content, arch, component, hash_type))
}
