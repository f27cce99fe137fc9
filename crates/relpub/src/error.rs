use relpub_core::{BuildType, PlanError, VersionError};
use relpub_store::StoreError;
use thiserror::Error;

use crate::settings::SettingsError;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("refusing to prune '{0}': stable releases are never pruned")]
    NotPrunable(BuildType),
}
