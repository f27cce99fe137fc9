use std::path::Path;

use relpub_core::{
    BUILDS_TO_RETAIN, BuildType, Disposition, RetentionPlan, UploadPlan, VersionExtractor,
    VersionGroup,
};

fn uploaded_keys(build_type: BuildType, version: u32) -> Vec<String> {
    UploadPlan::new(
        build_type,
        &version.to_string(),
        Path::new("out"),
        Path::new("out/artifacts"),
    )
    .expect("numeric version plans")
    .items()
    .map(|item| item.remote.clone())
    .collect()
}

#[test]
fn twenty_uploaded_builds_prune_down_to_sixteen() {
    // Listing order from the store is arbitrary; interleave builds.
    let mut keys: Vec<String> = (0..20u32)
        .flat_map(|i| uploaded_keys(BuildType::Prerel, 11000 + (i * 7) % 20))
        .collect();
    keys.reverse();
    keys.push("software/sumatrapdf/prerel/SumatraPDF-prerelase-10999.exe".to_string());
    keys.push("software/sumatrapdf/prerel/manifest-10998.txt".to_string());

    let groups = VersionGroup::from_keys(&VersionExtractor::default(), keys.clone())
        .expect("all keys carry versions");
    assert_eq!(groups.len(), 22);

    let plan = RetentionPlan::new(groups, BUILDS_TO_RETAIN);

    let kept: Vec<u32> = plan.retained().map(|g| g.version).collect();
    let expected: Vec<u32> = (11004..11020).rev().collect();
    assert_eq!(kept, expected);

    let deleted: Vec<u32> = plan.to_delete().map(|g| g.version).collect();
    assert_eq!(deleted, vec![11003, 11002, 11001, 11000, 10999, 10998]);
    assert_eq!(plan.delete_count(), 4 * 9 + 2);

    let total: usize = plan.decisions.iter().map(|d| d.group.files.len()).sum();
    assert_eq!(total, keys.len());
    assert!(plan.decisions[..BUILDS_TO_RETAIN]
        .iter()
        .all(|d| d.disposition == Disposition::Retain));
}

#[test]
fn configured_prefix_list_replaces_builtin_one() {
    let keys = ["software/sumatrapdf/daily/Sumatra-daily-42-64.exe"];

    assert!(VersionGroup::from_keys(&VersionExtractor::default(), keys).is_err());

    let extractor = VersionExtractor::new(["Sumatra-daily-"]);
    let groups = VersionGroup::from_keys(&extractor, keys).expect("prefix is configured");
    assert_eq!(groups[0].version, 42);
}
