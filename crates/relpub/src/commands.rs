use relpub_core::{BuildType, LatestScript, UploadPlan, pointer_files};

use crate::cli::{PruneArgs, UploadArgs};
use crate::error::PublishError;
use crate::provider::{StoreProvider, open_store};
use crate::prune::{PruneReport, Pruner};
use crate::settings::Settings;
use crate::upload::Uploader;

pub async fn upload(
    provider: &dyn StoreProvider,
    settings: &Settings,
    args: UploadArgs,
) -> Result<(), PublishError> {
    if args.skip_upload {
        log::info!("Skipping upload of build {}", args.version);
        return Ok(());
    }

    let plan = UploadPlan::new(
        args.build_type,
        &args.version,
        &settings.out_dir,
        &settings.artifacts_dir,
    )?;

    let Some((config, store)) = open_store(provider, settings, "uploading to") else {
        return Ok(());
    };

    let public_base = config.public_base_url();
    let script = LatestScript {
        build_type: args.build_type,
        version: &args.version,
        commit: &args.commit,
        built_on: chrono::Utc::now().date_naive(),
        public_base: &public_base,
    }
    .render();

    Uploader::new(store.as_ref())
        .upload_build(&plan, pointer_files(args.build_type, &args.version, script))
        .await
}

/// Prunes the requested channel, or prerel then daily when none is given.
pub async fn prune(
    provider: &dyn StoreProvider,
    settings: &Settings,
    args: PruneArgs,
) -> Result<(), PublishError> {
    if let Some(build_type) = args.build_type
        && !build_type.is_prunable()
    {
        return Err(PublishError::NotPrunable(build_type));
    }

    let Some((_, store)) = open_store(provider, settings, "deleting old builds from") else {
        return Ok(());
    };

    let extractor = settings.extractor();
    let pruner = Pruner::new(store.as_ref(), &extractor).dry_run(args.dry_run);

    let channels = match args.build_type {
        Some(build_type) => vec![build_type],
        None => BuildType::PRUNABLE.to_vec(),
    };
    for build_type in channels {
        let report = pruner.prune(build_type).await?;
        log::info!("{}", prune_summary(&report, args.dry_run));
    }
    Ok(())
}

pub async fn list(
    provider: &dyn StoreProvider,
    settings: &Settings,
    build_type: BuildType,
) -> Result<(), PublishError> {
    let Some((_, store)) = open_store(provider, settings, "listing") else {
        return Ok(());
    };

    let extractor = settings.extractor();
    let groups = Pruner::new(store.as_ref(), &extractor)
        .groups(build_type)
        .await?;
    for group in &groups {
        println!("{}\t{} files", group.version, group.files.len());
    }
    Ok(())
}

fn prune_summary(report: &PruneReport, dry_run: bool) -> String {
    if dry_run {
        format!(
            "Dry run for {}: {} files listed, would keep {} builds, would remove {} builds",
            report.build_type, report.listed, report.retained_versions, report.deleted_versions
        )
    } else {
        format!(
            "Pruned {}: {} files listed, kept {} builds, removed {} builds ({} files)",
            report.build_type,
            report.listed,
            report.retained_versions,
            report.deleted_versions,
            report.deleted_files
        )
    }
}
