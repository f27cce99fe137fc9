use relpub_core::{
    BUILDS_TO_RETAIN, BuildType, Disposition, RetentionPlan, VersionExtractor, VersionGroup,
};
use relpub_store::ObjectStore;

use crate::error::PublishError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PruneReport {
    pub build_type: BuildType,
    pub listed: usize,
    pub retained_versions: usize,
    pub deleted_versions: usize,
    pub deleted_files: usize,
}

/// Deletes every build of a channel except the newest [`BUILDS_TO_RETAIN`].
pub struct Pruner<'a> {
    store: &'a dyn ObjectStore,
    extractor: &'a VersionExtractor,
    dry_run: bool,
}

impl<'a> Pruner<'a> {
    pub fn new(store: &'a dyn ObjectStore, extractor: &'a VersionExtractor) -> Self {
        Self {
            store,
            extractor,
            dry_run: false,
        }
    }

    /// Log decisions without deleting anything.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Builds stored under a channel, newest first.
    ///
    /// # Errors
    /// Returns an error if listing fails or any key has no version number.
    pub async fn groups(&self, build_type: BuildType) -> Result<Vec<VersionGroup>, PublishError> {
        let remote_dir = build_type.remote_dir();
        let keys = self.store.list_keys(&remote_dir).await?;
        log::info!(
            "{} {} files under '{remote_dir}'",
            keys.len(),
            self.store.name()
        );
        Ok(VersionGroup::from_keys(self.extractor, keys)?)
    }

    /// # Errors
    /// Returns an error for the `rel` channel, when listing fails, when a key
    /// has no version number, or on the first failed delete. Deletes already
    /// issued are not rolled back.
    pub async fn prune(&self, build_type: BuildType) -> Result<PruneReport, PublishError> {
        if !build_type.is_prunable() {
            return Err(PublishError::NotPrunable(build_type));
        }

        let groups = self.groups(build_type).await?;
        let listed = groups.iter().map(|g| g.files.len()).sum();
        let plan = RetentionPlan::new(groups, BUILDS_TO_RETAIN);

        let mut report = PruneReport {
            build_type,
            listed,
            retained_versions: 0,
            deleted_versions: 0,
            deleted_files: 0,
        };

        for decision in &plan.decisions {
            let group = &decision.group;
            match decision.disposition {
                Disposition::Retain => {
                    log::info!("{}, not deleting", group.version);
                    report.retained_versions += 1;
                }
                Disposition::Delete => {
                    log::info!("{}, deleting", group.version);
                    for file in &group.files {
                        if self.dry_run {
                            log::info!("  {file} would be deleted (dry run)");
                            continue;
                        }
                        log::info!("  {file} deleting");
                        self.store.delete(file).await?;
                        report.deleted_files += 1;
                    }
                    report.deleted_versions += 1;
                }
            }
        }

        Ok(report)
    }
}
