use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::build_type::BuildType;

/// Remote names of the three pointer files for a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerPaths {
    pub latest_script: &'static str,
    pub latest_version: &'static str,
    pub update_check: &'static str,
}

impl PointerPaths {
    #[must_use]
    pub const fn for_build_type(build_type: BuildType) -> Self {
        match build_type {
            BuildType::Daily => Self {
                latest_script: "software/sumatrapdf/sumadaily.js",
                latest_version: "software/sumatrapdf/sumpdf-daily-latest.txt",
                update_check: "software/sumatrapdf/sumpdf-daily-update.txt",
            },
            BuildType::Prerel | BuildType::Rel => Self {
                latest_script: "software/sumatrapdf/sumatralatest.js",
                latest_version: "software/sumatrapdf/sumpdf-prerelease-latest.txt",
                update_check: "software/sumatrapdf/sumpdf-prerelease-update.txt",
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerFile {
    pub remote: &'static str,
    pub body: Vec<u8>,
}

/// Update-check block. Pre-release builds never advertise a stable version.
#[must_use]
pub fn update_check_text(version: &str) -> String {
    format!("[SumatraPDF]\nLatest {version}\n")
}

/// The script, version and update-check pointer files, in upload order.
#[must_use]
pub fn pointer_files(build_type: BuildType, version: &str, script: String) -> [PointerFile; 3] {
    let paths = PointerPaths::for_build_type(build_type);
    [
        PointerFile {
            remote: paths.latest_script,
            body: script.into_bytes(),
        },
        PointerFile {
            remote: paths.latest_version,
            body: version.as_bytes().to_vec(),
        },
        PointerFile {
            remote: paths.update_check,
            body: update_check_text(version).into_bytes(),
        },
    ]
}

/// JavaScript snippet the download page includes to link the newest build.
#[derive(Debug, Clone)]
pub struct LatestScript<'a> {
    pub build_type: BuildType,
    pub version: &'a str,
    pub commit: &'a str,
    pub built_on: NaiveDate,
    /// Public base URL of the bucket, e.g. `https://kjkpubsf.sfo2.digitaloceanspaces.com/`.
    pub public_base: &'a str,
}

impl LatestScript<'_> {
    #[must_use]
    pub fn render(&self) -> String {
        let ver = self.version;
        let prefix = "SumatraPDF-prerelease";
        let host = format!(
            "{}/{}",
            self.public_base.trim_end_matches('/'),
            self.build_type.remote_dir()
        );

        let mut out = String::with_capacity(768);
        // Writing into a String cannot fail.
        let _ = writeln!(out, "var sumLatestVer = {ver};");
        let _ = writeln!(out, "var sumCommitSha1 = \"{}\";", self.commit);
        let _ = writeln!(out, "var sumBuiltOn = \"{}\";", self.built_on.format("%Y-%m-%d"));
        let _ = writeln!(out, "var sumLatestName = \"{prefix}-{ver}.exe\";");
        out.push('\n');
        let _ = writeln!(out, "var sumLatestExe = \"{host}{prefix}-{ver}.exe\";");
        let _ = writeln!(out, "var sumLatestPdb = \"{host}{prefix}-{ver}.pdb.zip\";");
        let _ = writeln!(out, "var sumLatestInstaller = \"{host}{prefix}-{ver}-install.exe\";");
        out.push('\n');
        let _ = writeln!(out, "var sumLatestExe64 = \"{host}{prefix}-{ver}-64.exe\";");
        let _ = writeln!(out, "var sumLatestPdb64 = \"{host}{prefix}-{ver}-64.pdb.zip\";");
        let _ = writeln!(
            out,
            "var sumLatestInstaller64 = \"{host}{prefix}-{ver}-64-install.exe\";"
        );
        out
    }
}
