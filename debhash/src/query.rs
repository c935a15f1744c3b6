//! Lookup dispatch by index file name

use std::{
    fmt,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{
    config::{HashType, MatchOptions},
    packages::{lookup_packages_file, PackageEntry, PackageQuery},
    release::lookup_release_file,
    Error, Result,
};

/// Kind of repository metadata file, decided by its file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// A `Packages` index
    Packages,
    /// A `Release` or `InRelease` manifest
    Release,
}

impl IndexKind {
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path.to_string_lossy();
        if name.ends_with("Packages") {
            Ok(Self::Packages)
        } else if name.ends_with("InRelease") || name.ends_with("Release") {
            Ok(Self::Release)
        } else {
            Err(Error::UnrecognizedIndex(name.into_owned()))
        }
    }
}

/// A lookup resolved from the command line
#[derive(Debug, Clone)]
pub enum Query {
    /// Package filename and hash from a `Packages` file
    Package { path: PathBuf, query: PackageQuery },
    /// Package index hash from a release manifest
    Index {
        path: PathBuf,
        arch: String,
        component: String,
        hash_type: HashType,
    },
}

impl Query {
    /// Build a query from the three positional arguments.
    ///
    /// For a `Packages` file `first` and `second` are the package name and
    /// version; for a release manifest they are the architecture and component.
    pub fn new(
        path: impl Into<PathBuf>,
        first: impl Into<String>,
        second: impl Into<String>,
        hash_type: HashType,
    ) -> Result<Self> {
        let path = path.into();
        let query = match IndexKind::from_path(&path)? {
            IndexKind::Packages => Query::Package {
                path,
                query: PackageQuery::new(first, second).with_hash_type(hash_type),
            },
            IndexKind::Release => Query::Index {
                path,
                arch: first.into(),
                component: second.into(),
                hash_type,
            },
        };
        Ok(query)
    }

    pub fn kind(&self) -> IndexKind {
        match self {
            Query::Package { .. } => IndexKind::Packages,
            Query::Index { .. } => IndexKind::Release,
        }
    }

    /// Run the lookup. `Ok(None)` means nothing matched.
    pub fn execute(&self, options: &MatchOptions) -> Result<Option<Answer>> {
        match self {
            Query::Package { path, query } => {
                info!("Looking up {} {} in {}", query.name, query.version, path.display());
                Ok(lookup_packages_file(path, query, options)?.map(Answer::Package))
            }
            Query::Index {
                path,
                arch,
                component,
                hash_type,
            } => {
                info!("Looking up {}/binary-{} in {}", component, arch, path.display());
                Ok(lookup_release_file(path, arch, component, hash_type)?.map(Answer::Index))
            }
        }
    }
}

/// Result of a successful lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Package(PackageEntry),
    Index(String),
}

impl Answer {
    pub fn hash(&self) -> &str {
        match self {
            Answer::Package(entry) => &entry.hash,
            Answer::Index(hash) => hash,
        }
    }
}

/// Renders the lines printed on stdout, without the final newline.
impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Package(entry) => fmt::Display::fmt(entry, f),
            Answer::Index(hash) => f.write_str(hash),
        }
    }
}
