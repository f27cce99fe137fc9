//! Core release publishing logic for relpub.
//!
//! Everything in this crate is pure and independent of the object store:
//! - Build channel tags and the remote path scheme.
//! - Version extraction from remote keys and grouping by version.
//! - The retention decision over grouped versions.
//! - The upload plan for a build and the pointer file contents.

mod build_type;
mod plan;
mod pointer;
mod retention;
mod version;

/// Build channel tag and remote directory layout.
pub use build_type::{BuildType, BuildTypeError, REMOTE_ROOT};
/// Local-to-remote artifact mapping for one build.
pub use plan::{Arch, PlanError, UploadItem, UploadPlan};
/// Pointer file names and contents read by the update checker.
pub use pointer::{LatestScript, PointerFile, PointerPaths, pointer_files, update_check_text};
/// Keep/delete decision over versions sorted newest first.
pub use retention::{BUILDS_TO_RETAIN, Disposition, RetentionDecision, RetentionPlan};
/// Remote key version parsing and grouping.
pub use version::{DEFAULT_NAME_PREFIXES, VersionError, VersionExtractor, VersionGroup};
