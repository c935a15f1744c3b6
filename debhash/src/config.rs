//! Lookup configuration
//!
//! Options are resolved once at the process boundary (environment and command
//! line) and passed into the lookups, which never read the environment
//! themselves.

use std::{convert::Infallible, fmt, str::FromStr};

/// Disables version comparison in `Packages` lookups when set to `true`.
pub const WITHOUT_BINDING_ENV: &str = "TERMUX_WITHOUT_DEPVERSION_BINDING";

/// Accepts revision-only version differences when set to `true`.
pub const ALLOW_REVISION_MISMATCH_ENV: &str = "TERMUX_ALLOW_REVISION_MISMATCH";

/// Version matching policy for `Packages` lookups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// Match the first stanza with the right package name, whatever its version
    pub without_version_binding: bool,
    /// Treat `4.2.2-1` and `4.2.2` as the same version
    pub allow_revision_mismatch: bool,
}

impl MatchOptions {
    /// Read the options from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build options from an arbitrary variable source.
    ///
    /// A flag is only enabled by the exact value `true`.
    pub fn from_vars<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = |key: &str| get(key).is_some_and(|v| v == "true");
        Self {
            without_version_binding: enabled(WITHOUT_BINDING_ENV),
            allow_revision_mismatch: enabled(ALLOW_REVISION_MISMATCH_ENV),
        }
    }

    /// Enable any flag that is set in `other`.
    pub fn merge(self, other: MatchOptions) -> Self {
        Self {
            without_version_binding: self.without_version_binding
                || other.without_version_binding,
            allow_revision_mismatch: self.allow_revision_mismatch
                || other.allow_revision_mismatch,
        }
    }
}

/// Hash algorithm name as it appears in repository metadata (`SHA256`, `MD5Sum`, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashType(String);

impl HashType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Field key in a `Packages` stanza or section header in a `Release` file.
    pub fn header(&self) -> String {
        format!("{}:", self.0)
    }
}

impl Default for HashType {
    fn default() -> Self {
        Self::new("SHA256")
    }
}

impl fmt::Display for HashType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for HashType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_flags_require_exact_true() {
        let env = vars(&[
            (WITHOUT_BINDING_ENV, "true"),
            (ALLOW_REVISION_MISMATCH_ENV, "1"),
        ]);
        let options = MatchOptions::from_vars(|k| env.get(k).cloned());
        assert!(options.without_version_binding);
        assert!(!options.allow_revision_mismatch);
    }

    #[test]
    fn test_flags_default_off() {
        let options = MatchOptions::from_vars(|_| None);
        assert_eq!(options, MatchOptions::default());
    }

    #[test]
    fn test_merge() {
        let env = MatchOptions {
            without_version_binding: false,
            allow_revision_mismatch: true,
        };
        let cli = MatchOptions {
            without_version_binding: true,
            allow_revision_mismatch: false,
        };
        let merged = env.merge(cli);
        assert!(merged.without_version_binding);
        assert!(merged.allow_revision_mismatch);
    }

    #[test]
    fn test_hash_type_header() {
        assert_eq!(HashType::default().header(), "SHA256:");
        assert_eq!("MD5Sum".parse::<HashType>().unwrap().header(), "MD5Sum:");
    }
}
