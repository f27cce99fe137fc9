use std::str::FromStr;

use thiserror::Error;

/// Common root of every object this tool writes.
pub const REMOTE_ROOT: &str = "software/sumatrapdf/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuildType {
    Daily,
    Prerel,
    Rel,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid build type: '{0}' (expected daily, prerel or rel)")]
pub struct BuildTypeError(pub String);

impl BuildType {
    pub const ALL: [Self; 3] = [Self::Daily, Self::Prerel, Self::Rel];

    /// Channels that are subject to retention pruning, in pruning order.
    pub const PRUNABLE: [Self; 2] = [Self::Prerel, Self::Daily];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Prerel => "prerel",
            Self::Rel => "rel",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "daily" => Some(Self::Daily),
            "prerel" => Some(Self::Prerel),
            "rel" => Some(Self::Rel),
            _ => None,
        }
    }

    /// Stable releases are never pruned.
    #[must_use]
    pub const fn is_prunable(self) -> bool {
        !matches!(self, Self::Rel)
    }

    /// Remote directory for this channel, with a trailing slash.
    #[must_use]
    pub fn remote_dir(self) -> String {
        format!("{REMOTE_ROOT}{}/", self.as_str())
    }
}

impl FromStr for BuildType {
    type Err = BuildTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| BuildTypeError(s.to_string()))
    }
}

impl std::fmt::Display for BuildType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
