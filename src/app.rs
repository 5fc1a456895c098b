//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - initializes logging
//! - resolves settings (defaults, environment, flags)
//! - loads the rate catalog
//! - dispatches to the requested command and prints its output

use std::io;

use clap::Parser;
use tracing::info;

use crate::cli::{Cli, Command, ProgramsArgs, QuoteArgs};
use crate::config::Settings;
use crate::domain::DuplicatePolicy;
use crate::error::AppError;

pub mod pipeline;

use pipeline::Session;

/// Entry point for the `gradcost` binary.
pub fn run() -> Result<(), AppError> {
    // `gradcost` and `gradcost -f rates.csv` behave like `gradcost pick ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);

    crate::init_tracing(cli.verbose);

    let mut settings = Settings::from_env()?;
    if let Some(path) = &cli.data {
        settings.data_path = path.clone();
    }
    if cli.reject_duplicates {
        settings.duplicate_policy = DuplicatePolicy::Reject;
    }
    info!(data = %settings.data_path.display(), "settings resolved");

    let mut session = Session::new(settings);

    match cli.command {
        Command::Colleges => handle_colleges(&mut session),
        Command::Programs(args) => handle_programs(&mut session, args),
        Command::Quote(args) => handle_quote(&mut session, args),
        Command::Check => handle_check(&mut session),
        Command::Pick => handle_pick(&mut session),
    }
}

fn handle_colleges(session: &mut Session) -> Result<(), AppError> {
    let catalog = session.catalog()?;
    for college in catalog.colleges() {
        println!("{college}");
    }
    Ok(())
}

fn handle_programs(session: &mut Session, args: ProgramsArgs) -> Result<(), AppError> {
    let catalog = session.catalog()?;
    let programs = catalog.programs(&args.college);
    if programs.is_empty() {
        return Err(AppError::new(
            3,
            format!(
                "Unknown college: {}. Run `gradcost colleges` to see the options.",
                args.college.trim()
            ),
        ));
    }
    for program in programs {
        println!("{program}");
    }
    Ok(())
}

fn handle_quote(session: &mut Session, args: QuoteArgs) -> Result<(), AppError> {
    let quote = session.quote(&args.college, &args.program, args.credits)?;

    if args.json {
        println!("{}", quote.to_json_pretty()?);
    } else {
        print!(
            "{}",
            crate::report::format_breakdown(&quote.college, &quote.program, &quote.breakdown)
        );
    }

    if let Some(path) = &args.export {
        crate::io::export::write_quote_json(path, &quote)?;
        info!(path = %path.display(), "quote exported");
    }

    Ok(())
}

fn handle_check(session: &mut Session) -> Result<(), AppError> {
    let catalog = session.catalog()?;
    print!("{}", crate::report::format_catalog_summary(&catalog));
    Ok(())
}

fn handle_pick(session: &mut Session) -> Result<(), AppError> {
    let catalog = session.catalog()?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let selection = crate::cli::picker::prompt_selection(&catalog, &mut input, &mut output)?;

    let quote = session.quote(&selection.college, &selection.program, selection.credits)?;
    println!();
    print!(
        "{}",
        crate::report::format_breakdown(&quote.college, &quote.program, &quote.breakdown)
    );
    Ok(())
}

/// Rewrite argv so `gradcost` defaults to `gradcost pick`.
///
/// Rules:
/// - `gradcost`                      -> `gradcost pick`
/// - `gradcost -f rates.csv ...`     -> `gradcost pick -f rates.csv ...`
/// - `gradcost --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("pick".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    if is_subcommand_name(&arg1) {
        return argv;
    }

    // Global flags may precede the subcommand; only rewrite when none follows.
    if arg1.starts_with('-') && !argv.iter().skip(1).any(|a| is_subcommand_name(a)) {
        argv.insert(1, "pick".to_string());
        return argv;
    }

    argv
}

fn is_subcommand_name(arg: &str) -> bool {
    matches!(arg, "colleges" | "programs" | "quote" | "check" | "pick")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_picks() {
        assert_eq!(rewrite_args(args(&["gradcost"])), args(&["gradcost", "pick"]));
    }

    #[test]
    fn flags_only_invocation_picks() {
        assert_eq!(
            rewrite_args(args(&["gradcost", "-f", "rates.csv"])),
            args(&["gradcost", "pick", "-f", "rates.csv"])
        );
    }

    #[test]
    fn explicit_subcommands_are_untouched() {
        let quote = args(&["gradcost", "quote", "Hartt School", "Music"]);
        assert_eq!(rewrite_args(quote.clone()), quote);

        let global_first = args(&["gradcost", "-f", "rates.csv", "colleges"]);
        assert_eq!(rewrite_args(global_first.clone()), global_first);

        let help = args(&["gradcost", "--help"]);
        assert_eq!(rewrite_args(help.clone()), help);
    }

    #[test]
    fn cli_parses_quote() {
        let cli = Cli::parse_from(args(&[
            "gradcost",
            "--data",
            "rates.csv",
            "quote",
            "Arts & Sciences",
            "Data Science",
            "--credits",
            "9",
            "--json",
        ]));
        assert_eq!(cli.data.as_deref(), Some(std::path::Path::new("rates.csv")));
        match cli.command {
            Command::Quote(q) => {
                assert_eq!(q.college, "Arts & Sciences");
                assert_eq!(q.credits, 9);
                assert!(q.json);
                assert!(q.export.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn quote_credits_default() {
        let cli = Cli::parse_from(args(&["gradcost", "quote", "Hartt School", "Music"]));
        match cli.command {
            Command::Quote(q) => assert_eq!(q.credits, 12),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
