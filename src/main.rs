//! Cargo subcommand for computing a release version from VCS evidence.
//!
//! One pipeline answers "what version am I" the same way everywhere:
//! - `git describe` for developer checkouts
//! - Expanded `$Format$` keywords for `git archive` exports
//! - A pre-baked version file for source distributions
//! - The parent directory name for bare unpacked trees
//!
//! Replaces per-project shell snippets that each reimplement a slice of
//! this logic.

use anyhow::Result;
use cargo_vcs_version::commands;
use cargo_vcs_version::commands::{
    VersionArgs,
    WriteArgs,
};
use clap::{
    ArgAction,
    CommandFactory,
    Parser,
    Subcommand,
};

#[derive(Parser, Debug)]
#[command(
    bin_name = "cargo",
    disable_version_flag = true,
    arg_required_else_help = false
)]
struct CargoArgs {
    #[command(subcommand)]
    subcmd: Option<TopCommand>,
}

#[derive(Subcommand, Debug)]
enum TopCommand {
    /// Compute a release version from VCS state
    #[command(name = "vcs-version")]
    VcsVersion(VcsVersionCli),
}

#[derive(Parser, Debug)]
#[command(
    disable_version_flag = true,
    subcommand_required = false,
    arg_required_else_help = false
)]
struct VcsVersionCli {
    /// Show this tool's own version.
    #[arg(long = "version", short = 'V', action = ArgAction::SetTrue)]
    version_flag: bool,

    #[command(subcommand)]
    command: Option<VcsVersionCommand>,

    /// Capture trailing args after `--` (e.g., `--version`).
    #[arg(trailing_var_arg = true, hide = true)]
    passthrough: Vec<String>,
}

#[derive(Parser, Debug)]
enum VcsVersionCommand {
    /// Compute and print the version for a source tree
    #[command(name = "version")]
    Version(VersionArgs),
    /// Compute the version and write the pre-baked version file
    #[command(name = "write")]
    Write(WriteArgs),
}

fn main() -> Result<()> {
    let args = CargoArgs::parse();

    if let Some(TopCommand::VcsVersion(cli)) = args.subcmd {
        if cli.version_flag {
            return commands::own_version();
        }

        if let Some(command) = cli.command {
            return match command {
                VcsVersionCommand::Version(args) => commands::version(args),
                VcsVersionCommand::Write(args) => commands::write(args),
            };
        }

        if cli
            .passthrough
            .iter()
            .any(|arg| arg == "--version" || arg == "-V")
        {
            return commands::own_version();
        }

        // No inner command: show help
        VcsVersionCli::command().print_help()?;
        println!();
        return Ok(());
    }

    // No subcommand: show help
    CargoArgs::command().print_help()?;
    println!();
    Ok(())
}
