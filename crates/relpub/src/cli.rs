use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use relpub_core::BuildType;

#[derive(Parser, Debug)]
#[command(name = "relpub", version, about = "Publish SumatraPDF builds to object storage")]
pub struct Cli {
    /// Settings file (JSON). Defaults to the per-user relpub/settings.json
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also append log output to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upload a build and point the update checker at it
    Upload(UploadArgs),
    /// Delete all but the newest builds of the pre-release and daily channels
    Prune(PruneArgs),
    /// Show the builds stored for a channel, newest first
    List {
        /// daily, prerel or rel
        build_type: BuildType,
    },
}

#[derive(Args, Debug, Clone)]
pub struct UploadArgs {
    /// Build number, e.g. 15001
    #[arg(long = "ver")]
    pub version: String,

    /// daily, prerel or rel
    #[arg(long)]
    pub build_type: BuildType,

    /// Git commit the build was made from, written into the latest-version script
    #[arg(long, default_value = "")]
    pub commit: String,

    /// Do nothing; for CI runs that build without publishing
    #[arg(long)]
    pub skip_upload: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PruneArgs {
    /// Channel to prune; prunes prerel and daily when omitted
    pub build_type: Option<BuildType>,

    /// Log what would be deleted without deleting
    #[arg(long)]
    pub dry_run: bool,
}
