use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Sync a roadmap schedule onto a GitHub Projects board using the gh CLI
#[derive(Parser, Debug)]
#[command(name = "plansync", author, version, long_about = None)]
pub struct Cli {
    /// Path of the schedule document (defaults to roadmap.toml)
    #[arg(short, long, global = true)]
    pub schedule: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Set start and end dates on every scheduled project item
    Dates(DatesCommand),
    /// Add every mapped issue to the project
    Add(AddCommand),
    /// List the project's fields and the chosen date fields
    Fields,
    /// Preview the computed dates without contacting GitHub
    Plan,
    /// Validate the schedule document
    Check,
}

#[derive(Parser, Debug, Clone)]
pub struct DatesCommand {
    /// Apply without asking for confirmation
    #[clap(short, long)]
    pub yes: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// Apply without asking for confirmation
    #[clap(short, long)]
    pub yes: bool,
}
