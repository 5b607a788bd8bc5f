//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// puzzle-reqs - Resolve puzzle item requirements for a level.
#[derive(Debug, Parser)]
#[command(name = "puzzle-reqs")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory manifest paths are resolved against (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Discover a level, resolve its requirements and show what each puzzle requires
    Resolve(ResolveArgs),

    /// List every item of a level with the index requirements refer to
    Dump(DumpArgs),

    /// Find the movable puzzle that owns a sensor
    Lookup(LookupArgs),

    /// Validate a level manifest
    Check(CheckArgs),

    /// Print the JSON schema of level manifests
    Schema,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `resolve` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ResolveArgs {
    /// Level manifest (defaults to level.yml)
    pub manifest: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `dump` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DumpArgs {
    /// Level manifest (defaults to level.yml)
    pub manifest: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `lookup` command.
#[derive(Debug, Clone, clap::Args)]
pub struct LookupArgs {
    /// Level manifest (defaults to level.yml)
    pub manifest: Option<PathBuf>,

    /// Sensor identity to look up
    #[arg(short, long)]
    pub sensor: u64,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Level manifest (defaults to level.yml)
    pub manifest: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_resolve_with_manifest() {
        let cli = Cli::parse_from(["puzzle-reqs", "resolve", "levels/r1a1.yml", "--json"]);
        match cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.manifest, Some(PathBuf::from("levels/r1a1.yml")));
                assert!(args.json);
            }
            other => panic!("Expected Resolve command, got {:?}", other),
        }
    }

    #[test]
    fn manifest_is_optional() {
        let cli = Cli::parse_from(["puzzle-reqs", "dump"]);
        match cli.command {
            Commands::Dump(args) => assert!(args.manifest.is_none()),
            other => panic!("Expected Dump command, got {:?}", other),
        }
    }

    #[test]
    fn lookup_requires_sensor() {
        assert!(Cli::try_parse_from(["puzzle-reqs", "lookup"]).is_err());
        let cli = Cli::parse_from(["puzzle-reqs", "lookup", "--sensor", "7001"]);
        match cli.command {
            Commands::Lookup(args) => assert_eq!(args.sensor, 7001),
            other => panic!("Expected Lookup command, got {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["puzzle-reqs", "check", "--debug", "-C", "/levels"]);
        assert!(cli.debug);
        assert_eq!(cli.dir, Some(PathBuf::from("/levels")));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["puzzle-reqs"]).is_err());
    }
}
