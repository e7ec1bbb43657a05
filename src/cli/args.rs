//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Use this global config file instead of searching
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// aevents - Persist analysis events onto a component tree
#[derive(Parser, Debug)]
#[command(name = "aevents")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use this global config file instead of the standard locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Persist the events of an analysis report
    #[command(
        name = "persist",
        long_about = "Persist the events of an analysis report.\n\n\
            Reads the report, rebuilds its component tree and writes every \
            quality gate and quality profile event onto its component. For \
            each component declaring a version, any previous version event \
            with the same name is replaced.\n\n\
            All writes are committed together at the end. If anything fails, \
            the store is left exactly as it was.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Persist into the configured store (events.json by default)
    aevents persist --report target/analysis.json

    # Persist into a specific store file
    aevents persist --report target/analysis.json --store /var/lib/aevents/events.json"
    )]
    Persist {
        /// Analysis report to read
        #[arg(long, value_name = "FILE")]
        report: PathBuf,

        /// Event store file (overrides config)
        #[arg(long, value_name = "FILE")]
        store: Option<PathBuf>,
    },

    /// List the stored events of a component
    #[command(
        name = "events",
        after_help = "\
WORKFLOW EXAMPLES:
    # Human-readable listing
    aevents events --component AX-project-uuid

    # Machine-readable output for scripting
    aevents events --component AX-project-uuid --json"
    )]
    Events {
        /// Component uuid
        #[arg(long, value_name = "UUID")]
        component: String,

        /// Event store file (overrides config)
        #[arg(long, value_name = "FILE")]
        store: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for aevents commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    aevents completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    aevents completion zsh >> ~/.zshrc

    # Fish
    aevents completion fish > ~/.config/fish/completions/aevents.fish

    # PowerShell
    aevents completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}
