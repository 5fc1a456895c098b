//! Command-line parsing for the graduate cost estimator.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! catalog and pricing code.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::domain::Credits;

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "gradcost", version, about = "Graduate program cost estimator")]
pub struct Cli {
    /// Rate table CSV (defaults to $GRADCOST_DATA, then ./TuitionCost.csv).
    #[arg(short = 'f', long = "data", value_name = "CSV", global = true)]
    pub data: Option<PathBuf>,

    /// Fail the load when a college/program pair appears more than once.
    #[arg(long, global = true)]
    pub reject_duplicates: bool,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List colleges in the rate table.
    Colleges,
    /// List programs offered by a college.
    Programs(ProgramsArgs),
    /// Compute the estimated cost of a program.
    Quote(QuoteArgs),
    /// Load and validate the rate table, then print a summary.
    Check,
    /// Choose a college and program interactively.
    Pick,
}

#[derive(Debug, Parser, Clone)]
pub struct ProgramsArgs {
    /// College name, exactly as listed by `gradcost colleges`.
    pub college: String,
}

#[derive(Debug, Parser, Clone)]
pub struct QuoteArgs {
    /// College name.
    pub college: String,

    /// Program name.
    pub program: String,

    /// Credits per term (ignored for flat-rate programs).
    #[arg(short = 'c', long, default_value_t = Credits::DEFAULT)]
    pub credits: u32,

    /// Print the quote as JSON instead of the text breakdown.
    #[arg(long)]
    pub json: bool,

    /// Also write the quote to a JSON file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}
