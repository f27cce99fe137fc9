use relpub_store::{Credentials, CredentialsError, ObjectStore, S3Store, StoreConfig};

use crate::settings::Settings;

/// Where credentials come from and how the bucket is opened with them.
pub trait StoreProvider: Send + Sync {
    /// # Errors
    /// Returns an error naming the credential that is not set.
    fn credentials(&self, settings: &Settings) -> Result<Credentials, CredentialsError>;

    fn create_store(&self, config: &StoreConfig) -> Box<dyn ObjectStore>;
}

/// Credentials from the environment, store over the S3 API.
pub struct SpacesProvider;

impl StoreProvider for SpacesProvider {
    fn credentials(&self, settings: &Settings) -> Result<Credentials, CredentialsError> {
        Credentials::from_env(&settings.key_env, &settings.secret_env)
    }

    fn create_store(&self, config: &StoreConfig) -> Box<dyn ObjectStore> {
        Box::new(S3Store::new(config))
    }
}

/// The store for one command, or `None` (logged) when credentials are not set.
pub fn open_store(
    provider: &dyn StoreProvider,
    settings: &Settings,
    action: &str,
) -> Option<(StoreConfig, Box<dyn ObjectStore>)> {
    match provider.credentials(settings) {
        Ok(credentials) => {
            let config = settings.store_config(credentials);
            let store = provider.create_store(&config);
            Some((config, store))
        }
        Err(e) => {
            log::info!("Not {action} {} because {e}", settings.endpoint);
            None
        }
    }
}
