use std::fmt;

use crate::error::CredentialsError;

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub storage_key: String,
    pub storage_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("storage_key", &self.storage_key)
            .field("storage_secret", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Read the key and secret from the named environment variables.
    ///
    /// # Errors
    /// Returns an error naming the first variable that is unset or empty.
    pub fn from_env(key_var: &str, secret_var: &str) -> Result<Self, CredentialsError> {
        Self::from_lookup(key_var, secret_var, |name| std::env::var(name).ok())
    }

    /// Same as [`Credentials::from_env`] with a custom variable source.
    ///
    /// # Errors
    /// Returns an error naming the first variable that is unset or empty.
    pub fn from_lookup<F>(key_var: &str, secret_var: &str, lookup: F) -> Result<Self, CredentialsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| CredentialsError::MissingVariable(name.to_string()))
        };
        Ok(Self {
            storage_key: read(key_var)?,
            storage_secret: read(secret_var)?,
        })
    }
}

/// Connection settings for an S3-compatible bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub credentials: Credentials,
    pub bucket: String,
    /// Host name such as `sfo2.digitaloceanspaces.com`, addressed
    /// virtual-hosted style. A full URL such as `http://127.0.0.1:9000`
    /// is addressed path style.
    pub endpoint: String,
    pub region: String,
}

impl StoreConfig {
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        if self.endpoint.contains("://") {
            self.endpoint.trim_end_matches('/').to_string()
        } else {
            format!("https://{}", self.endpoint.trim_end_matches('/'))
        }
    }

    /// Whether the bucket goes in the URL path rather than the host name.
    #[must_use]
    pub fn path_style(&self) -> bool {
        self.endpoint.contains("://")
    }

    /// Public URL of the bucket, with a trailing slash.
    #[must_use]
    pub fn public_base_url(&self) -> String {
        let endpoint = self.endpoint_url();
        if self.path_style() {
            return format!("{endpoint}/{}/", self.bucket);
        }
        match endpoint.split_once("://") {
            Some((scheme, host)) => format!("{scheme}://{}.{host}/", self.bucket),
            None => format!("https://{}.{endpoint}/", self.bucket),
        }
    }
}
