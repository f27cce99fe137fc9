use std::path::{Path, PathBuf};

use relpub_core::{DEFAULT_NAME_PREFIXES, VersionExtractor};
use relpub_store::{Credentials, StoreConfig};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    #[serde(default = "default_bucket")]
    pub bucket: String,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_region")]
    pub region: String,

    #[serde(default = "default_key_env")]
    pub key_env: String,

    #[serde(default = "default_secret_env")]
    pub secret_env: String,

    /// Filename prefixes stripped before the build number. Old naming
    /// schemes still present in the bucket go here.
    #[serde(default = "default_name_prefixes")]
    pub name_prefixes: Vec<String>,

    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid settings: {0}")]
    Invalid(&'static str),
}

fn default_bucket() -> String {
    "kjkpubsf".to_string()
}

fn default_endpoint() -> String {
    "sfo2.digitaloceanspaces.com".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_key_env() -> String {
    "SPACES_KEY".to_string()
}

fn default_secret_env() -> String {
    "SPACES_SECRET".to_string()
}

fn default_name_prefixes() -> Vec<String> {
    DEFAULT_NAME_PREFIXES.iter().map(ToString::to_string).collect()
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("out")
}

fn default_artifacts_dir() -> PathBuf {
    Path::new("out").join("artifacts")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
            endpoint: default_endpoint(),
            region: default_region(),
            key_env: default_key_env(),
            secret_env: default_secret_env(),
            name_prefixes: default_name_prefixes(),
            out_dir: default_out_dir(),
            artifacts_dir: default_artifacts_dir(),
        }
    }
}

impl Settings {
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("relpub").join("settings.json"))
    }

    /// Load settings from `explicit`, else from the per-user settings file if
    /// it exists, else defaults. The result is validated.
    ///
    /// # Errors
    /// Returns an error if a settings file cannot be read or parsed, or if
    /// the loaded settings are invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        let settings = match explicit {
            Some(path) => Self::load_from(path)?,
            None => match Self::default_path().filter(|path| path.is_file()) {
                Some(path) => Self::load_from(&path)?,
                None => Self::default(),
            },
        };
        settings.validate()?;
        Ok(settings)
    }

    fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// # Errors
    /// Returns an error naming the first field that cannot be used.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.bucket.trim().is_empty() {
            return Err(SettingsError::Invalid("bucket must not be empty"));
        }
        if self.endpoint.trim().is_empty() {
            return Err(SettingsError::Invalid("endpoint must not be empty"));
        }
        if self.name_prefixes.is_empty() {
            return Err(SettingsError::Invalid("name_prefixes must list at least one prefix"));
        }
        if self.name_prefixes.iter().any(String::is_empty) {
            return Err(SettingsError::Invalid("name_prefixes must not contain empty entries"));
        }
        Ok(())
    }

    #[must_use]
    pub fn extractor(&self) -> VersionExtractor {
        VersionExtractor::new(self.name_prefixes.iter().cloned())
    }

    #[must_use]
    pub fn store_config(&self, credentials: Credentials) -> StoreConfig {
        StoreConfig {
            credentials,
            bucket: self.bucket.clone(),
            endpoint: self.endpoint.clone(),
            region: self.region.clone(),
        }
    }
}
