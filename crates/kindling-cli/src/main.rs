//! kindling - interactive website skeleton generator

use anyhow::Result;
use clap::Parser;
use kindling_core::{Profile, RunArgs, TermConsole};
use std::path::PathBuf;

/// CLI version - compared against the resource set version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Kindling product configuration
const PROFILE: Profile = Profile {
    display_name: "Kindling",
    resource_url: "https://kindling.dev/resources/definitions",
    resource_url_env: "KINDLING_RESOURCE_URL",
    asset_url: "https://kindling.dev/resources/assets",
    asset_url_env: "KINDLING_ASSET_URL",
    user_agent: "kindling",
    upgrade_command: "cargo install kindling-cli --force",
    staging_dir_name: ".kindling-staging",
    install_program: "composer",
};

#[derive(Parser, Debug)]
#[command(name = "kindling")]
#[command(about = "Interactive website skeleton generator")]
#[command(version)]
pub struct Args {
    /// Directory to generate the site into
    #[arg(default_value = ".")]
    pub target: PathBuf,

    /// Local directory to use for resources instead of fetching from
    /// remote (for development use)
    #[arg(long = "resources")]
    pub resources_dir: Option<PathBuf>,

    /// Resource root URL override
    #[arg(long)]
    pub resource_url: Option<String>,

    /// Asset root URL override
    #[arg(long)]
    pub asset_url: Option<String>,

    /// Install development dependencies as well
    #[arg(long)]
    pub dev: bool,

    /// Skip the dependency install step
    #[arg(long)]
    pub skip_install: bool,
}

impl From<Args> for RunArgs {
    fn from(args: Args) -> Self {
        let mut install_args = Vec::new();
        if args.dev {
            install_args.push("--dev".to_string());
        }
        RunArgs {
            target: args.target,
            resources_dir: args.resources_dir,
            resource_url: args.resource_url,
            asset_url: args.asset_url,
            install_args,
            skip_install: args.skip_install,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Exit cleanly on Ctrl+C instead of leaving a half-answered interview.
    ctrlc::set_handler(move || {
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let console = TermConsole::new();

    kindling_core::run(&PROFILE, args.into(), CLI_VERSION, &console).await?;
    Ok(())
}
