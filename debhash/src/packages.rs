//! Package lookup in `Packages` indices
//!
//! Finds the first stanza for a package whose version satisfies the match
//! policy and reports its pool filename and hash.

use std::{fmt, path::Path};

use tracing::{debug, trace};

use crate::{
    config::{HashType, MatchOptions},
    stanza::{split_stanzas, Stanza},
    version::revision_equivalent,
    Result,
};

/// What to look for in a `Packages` file
#[derive(Debug, Clone)]
pub struct PackageQuery {
    pub name: String,
    pub version: String,
    pub hash_type: HashType,
}

impl PackageQuery {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            hash_type: HashType::default(),
        }
    }

    pub fn with_hash_type(mut self, hash_type: HashType) -> Self {
        self.hash_type = hash_type;
        self
    }
}

/// A complete package record: every field required for a result is present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    pub filename: String,
    pub version: String,
    pub hash: String,
}

impl PackageEntry {
    /// Extract an entry from a stanza, or `None` if any required field is missing.
    fn from_stanza(stanza: &Stanza<'_>, hash_type: &HashType) -> Option<Self> {
        Some(Self {
            filename: stanza.get("Filename")?.to_string(),
            version: stanza.get("Version")?.to_string(),
            hash: stanza.get(hash_type.as_str())?.to_string(),
        })
    }

    fn satisfies(&self, wanted: &str, options: &MatchOptions) -> bool {
        options.without_version_binding
            || self.version == wanted
            || (options.allow_revision_mismatch && revision_equivalent(&self.version, wanted))
    }
}

impl fmt::Display for PackageEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ", self.filename)?;
        write!(f, "{}", self.hash)
    }
}

/// Find the first stanza matching `query` in the contents of a `Packages` file.
///
/// CRLF line endings are accepted.
pub fn find_package(
    content: &str,
    query: &PackageQuery,
    options: &MatchOptions,
) -> Option<PackageEntry> {
    let content = content.replace("\r\n", "\n");
    for stanza in split_stanzas(&content) {
        if !stanza.is_package(&query.name) {
            continue;
        }
        trace!("Found stanza for {}", query.name);

        let Some(entry) = PackageEntry::from_stanza(&stanza, &query.hash_type) else {
            debug!(
                "Skipping incomplete stanza for {} (needs Filename, Version and {})",
                query.name, query.hash_type
            );
            continue;
        };

        if entry.satisfies(&query.version, options) {
            debug!("Matched {} {} -> {}", query.name, entry.version, entry.filename);
            return Some(entry);
        }

        debug!(
            "Version mismatch for {}: wanted {}, found {}",
            query.name, query.version, entry.version
        );
    }

    None
}

/// Read a `Packages` file and look up `query` in it.
pub fn lookup_packages_file(
    path: &Path,
    query: &PackageQuery,
    options: &MatchOptions,
) -> Result<Option<PackageEntry>> {
    let content = std::fs::read_to_string(path)?;
    Ok(find_package(&content, query, options))
}
