use std::collections::BTreeMap;

use thiserror::Error;

/// Filename prefixes stripped before the version number, applied in order.
///
/// `SumatraPDF-prerelase-` is a misspelling carried by old builds that are
/// still in the bucket.
pub const DEFAULT_NAME_PREFIXES: &[&str] = &[
    "SumatraPDF-prerelease-",
    "SumatraPDF-prerelase-",
    "manifest-",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("no version number in '{key}': '{token}' is not an integer")]
    InvalidToken { key: String, token: String },
}

/// Pulls the build number out of remote object keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionExtractor {
    prefixes: Vec<String>,
}

impl Default for VersionExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_NAME_PREFIXES.iter().copied())
    }
}

impl VersionExtractor {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Extract the version from a key such as
    /// `software/sumatrapdf/prerel/SumatraPDF-prerelease-11290-64-install.exe`
    /// (yields `11290`).
    ///
    /// # Errors
    /// Returns an error when the token after the stripped prefix is not an
    /// integer. Callers must not treat such keys as version 0 or skip them.
    pub fn extract(&self, key: &str) -> Result<u32, VersionError> {
        let mut name = key.rsplit_once('/').map_or(key, |(_, name)| name);
        for prefix in &self.prefixes {
            name = name.strip_prefix(prefix.as_str()).unwrap_or(name);
        }

        let token = name.split(['-', '.']).next().unwrap_or(name);
        token.parse().map_err(|_| VersionError::InvalidToken {
            key: key.to_string(),
            token: token.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionGroup {
    pub version: u32,
    pub files: Vec<String>,
}

impl VersionGroup {
    /// Partition keys by extracted version, newest version first.
    ///
    /// Files inside a group keep the order in which they were listed.
    ///
    /// # Errors
    /// Fails on the first key whose version cannot be extracted.
    pub fn from_keys<I, S>(extractor: &VersionExtractor, keys: I) -> Result<Vec<Self>, VersionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut groups: BTreeMap<u32, Vec<String>> = BTreeMap::new();

        for key in keys {
            let key = key.into();
            let version = extractor.extract(&key)?;
            groups.entry(version).or_default().push(key);
        }

        Ok(groups
            .into_iter()
            .rev()
            .map(|(version, files)| VersionGroup { version, files })
            .collect())
    }
}
