use std::time::Instant;

use relpub_core::{PointerFile, UploadPlan};
use relpub_store::ObjectStore;

use crate::error::PublishError;

pub struct Uploader<'a> {
    store: &'a dyn ObjectStore,
}

impl<'a> Uploader<'a> {
    pub fn new(store: &'a dyn ObjectStore) -> Self {
        Self { store }
    }

    /// Push the build artifacts and manifest, then the pointer files.
    ///
    /// Stops at the first failed upload; whatever was uploaded before it
    /// stays in the bucket.
    ///
    /// # Errors
    /// Returns the first upload or local read error.
    pub async fn upload_build(
        &self,
        plan: &UploadPlan,
        pointers: [PointerFile; 3],
    ) -> Result<(), PublishError> {
        let started = Instant::now();
        let store_name = self.store.name();

        for item in plan.items() {
            self.store
                .upload_file_public(&item.remote, &item.local)
                .await?;
            log::info!(
                "Uploaded to {store_name}: '{}' as '{}'",
                item.local.display(),
                item.remote
            );
        }

        for pointer in pointers {
            self.store
                .upload_data_public(pointer.remote, pointer.body)
                .await?;
            log::info!("Uploaded to {store_name}: '{}'", pointer.remote);
        }

        log::info!(
            "Uploaded {} build {} to {store_name} in {:.2?}",
            plan.build_type,
            plan.version,
            started.elapsed()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use relpub_core::{BuildType, pointer_files};
    use relpub_store::{MemoryStore, StoreError, StoreOperation};

    use super::*;

    const LOCAL_FILES: [&str; 4] = [
        "SumatraPDF.exe",
        "SumatraPDF-dll.exe",
        "SumatraPDF.pdb.zip",
        "SumatraPDF.pdb.lzsa",
    ];

    fn write_build_outputs(root: &Path) {
        for arch in ["rel32", "rel64"] {
            let dir = root.join(arch);
            std::fs::create_dir_all(&dir).expect("create arch dir");
            for name in LOCAL_FILES {
                std::fs::write(dir.join(name), format!("{arch}/{name}")).expect("write artifact");
            }
        }
        let artifacts = root.join("artifacts");
        std::fs::create_dir_all(&artifacts).expect("create artifacts dir");
        std::fs::write(artifacts.join("manifest.txt"), "manifest").expect("write manifest");
    }

    fn plan_in(root: &Path, build_type: BuildType, version: &str) -> UploadPlan {
        UploadPlan::new(build_type, version, root, &root.join("artifacts")).expect("valid plan")
    }

    #[tokio::test]
    async fn uploads_artifacts_manifest_then_pointers_in_order() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        write_build_outputs(temp_dir.path());
        let plan = plan_in(temp_dir.path(), BuildType::Daily, "15001");
        let store = MemoryStore::new();

        Uploader::new(&store)
            .upload_build(
                &plan,
                pointer_files(BuildType::Daily, "15001", "var sumLatestVer = 15001;\n".into()),
            )
            .await
            .expect("upload succeeds");

        let uploaded = store.uploaded();
        assert_eq!(uploaded.len(), 12);
        assert_eq!(
            uploaded[0],
            "software/sumatrapdf/daily/SumatraPDF-prerelease-15001.exe"
        );
        assert_eq!(
            uploaded[7],
            "software/sumatrapdf/daily/SumatraPDF-prerelease-15001-64.pdb.lzsa"
        );
        assert_eq!(
            uploaded[8],
            "software/sumatrapdf/daily/SumatraPDF-prerelease-15001-manifest.txt"
        );
        assert_eq!(
            &uploaded[9..],
            &[
                "software/sumatrapdf/sumadaily.js",
                "software/sumatrapdf/sumpdf-daily-latest.txt",
                "software/sumatrapdf/sumpdf-daily-update.txt",
            ]
        );

        let installer64 = store
            .get("software/sumatrapdf/daily/SumatraPDF-prerelease-15001-64-install.exe")
            .expect("installer uploaded");
        assert_eq!(installer64.data, b"rel64/SumatraPDF-dll.exe");

        let update = store
            .get("software/sumatrapdf/sumpdf-daily-update.txt")
            .expect("update pointer uploaded");
        assert_eq!(update.data, b"[SumatraPDF]\nLatest 15001\n");
        assert_eq!(
            store
                .get("software/sumatrapdf/sumpdf-daily-latest.txt")
                .expect("version pointer uploaded")
                .data,
            b"15001"
        );
    }

    #[tokio::test]
    async fn first_failed_upload_aborts_without_cleanup() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        write_build_outputs(temp_dir.path());
        let plan = plan_in(temp_dir.path(), BuildType::Prerel, "1027");
        let store = MemoryStore::new();
        store.fail_on(
            StoreOperation::Upload,
            "software/sumatrapdf/prerel/SumatraPDF-prerelease-1027.pdb.zip",
        );

        let result = Uploader::new(&store)
            .upload_build(&plan, pointer_files(BuildType::Prerel, "1027", String::new()))
            .await;

        assert!(matches!(
            result,
            Err(PublishError::Store(StoreError::Request {
                operation: StoreOperation::Upload,
                ..
            }))
        ));
        assert_eq!(
            store.uploaded(),
            vec![
                "software/sumatrapdf/prerel/SumatraPDF-prerelease-1027.exe",
                "software/sumatrapdf/prerel/SumatraPDF-prerelease-1027-install.exe",
            ]
        );
        assert!(store.get("software/sumatrapdf/sumatralatest.js").is_none());
    }

    #[tokio::test]
    async fn missing_local_artifact_is_fatal() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        write_build_outputs(temp_dir.path());
        std::fs::remove_file(temp_dir.path().join("artifacts").join("manifest.txt"))
            .expect("remove manifest");
        let plan = plan_in(temp_dir.path(), BuildType::Prerel, "1027");
        let store = MemoryStore::new();

        let result = Uploader::new(&store)
            .upload_build(&plan, pointer_files(BuildType::Prerel, "1027", String::new()))
            .await;

        assert!(matches!(result, Err(PublishError::Store(StoreError::Io { .. }))));
        assert_eq!(store.uploaded().len(), 8);
        assert!(store.get("software/sumatrapdf/sumpdf-prerelease-latest.txt").is_none());
    }
}
