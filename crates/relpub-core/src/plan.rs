use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::build_type::BuildType;

/// Local build output name and the suffix it gets after the remote prefix.
const ARTIFACTS: [(&str, &str); 4] = [
    ("SumatraPDF.exe", ".exe"),
    ("SumatraPDF-dll.exe", "-install.exe"),
    ("SumatraPDF.pdb.zip", ".pdb.zip"),
    ("SumatraPDF.pdb.lzsa", ".pdb.lzsa"),
];

const MANIFEST_FILE: &str = "manifest.txt";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("version must not be empty")]
    EmptyVersion,
    #[error("version '{0}' must not contain '/'")]
    ContainsSlash(String),
    #[error("version '{0}' is not a build number")]
    NotBuildNumber(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X86,
    X64,
}

impl Arch {
    pub const ALL: [Self; 2] = [Self::X86, Self::X64];

    /// Directory under the build output root holding this architecture.
    pub const fn out_dir(self) -> &'static str {
        match self {
            Self::X86 => "rel32",
            Self::X64 => "rel64",
        }
    }

    pub const fn name_suffix(self) -> &'static str {
        match self {
            Self::X86 => "",
            Self::X64 => "-64",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadItem {
    pub local: PathBuf,
    pub remote: String,
}

/// Everything a single build pushes to the bucket, in upload order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPlan {
    pub build_type: BuildType,
    pub version: String,
    pub artifacts: Vec<UploadItem>,
    pub manifest: UploadItem,
}

impl UploadPlan {
    /// Map local build outputs to remote keys for `version`.
    ///
    /// Daily and pre-release versions have to be plain build numbers so
    /// every uploaded key can later be grouped by the pruner. Stable
    /// releases are never pruned and take any version without a `/`.
    ///
    /// # Errors
    /// Returns an error when `version` is empty or contains `/`, or when a
    /// prunable channel gets a version that is not all ASCII digits.
    pub fn new(
        build_type: BuildType,
        version: &str,
        out_dir: &Path,
        artifacts_dir: &Path,
    ) -> Result<Self, PlanError> {
        if version.is_empty() {
            return Err(PlanError::EmptyVersion);
        }
        if version.contains('/') {
            return Err(PlanError::ContainsSlash(version.to_string()));
        }
        if build_type.is_prunable() && !version.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PlanError::NotBuildNumber(version.to_string()));
        }

        let remote_dir = build_type.remote_dir();
        let mut artifacts = Vec::with_capacity(Arch::ALL.len() * ARTIFACTS.len());
        for arch in Arch::ALL {
            let prefix = file_prefix(version, arch);
            let local_dir = out_dir.join(arch.out_dir());
            artifacts.extend(ARTIFACTS.iter().map(|(local, suffix)| UploadItem {
                local: local_dir.join(local),
                remote: format!("{remote_dir}{prefix}{suffix}"),
            }));
        }

        let manifest = UploadItem {
            local: artifacts_dir.join(MANIFEST_FILE),
            remote: format!("{remote_dir}{}-manifest.txt", file_prefix(version, Arch::X86)),
        };

        Ok(Self {
            build_type,
            version: version.to_string(),
            artifacts,
            manifest,
        })
    }

    /// Artifacts followed by the manifest.
    pub fn items(&self) -> impl Iterator<Item = &UploadItem> {
        self.artifacts.iter().chain(std::iter::once(&self.manifest))
    }
}

fn file_prefix(version: &str, arch: Arch) -> String {
    format!("SumatraPDF-prerelease-{version}{}", arch.name_suffix())
}
