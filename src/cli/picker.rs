//! Interactive selection.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the picker provides the "run `gradcost` and choose a program" UX
//!
//! Choices are always drawn from the catalog, so a completed selection always
//! resolves.

use std::io::{BufRead, Write};

use crate::catalog::RateCatalog;
use crate::domain::{Credits, FLAT_RATE_REFERENCE_CREDITS};
use crate::error::AppError;
use crate::report::format_listing;

/// A completed interactive selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub college: String,
    pub program: String,
    pub credits: u32,
}

/// Walk the user through college → program → credits.
///
/// Behavior:
/// - list the options with numbers
/// - accept either a number from the list or the exact name (case-insensitive)
/// - `q` cancels
/// - the credit prompt only appears for per-credit programs; blank keeps the default
pub fn prompt_selection<R: BufRead, W: Write>(
    catalog: &RateCatalog,
    input: &mut R,
    output: &mut W,
) -> Result<Selection, AppError> {
    let colleges = catalog.colleges();
    if colleges.is_empty() {
        return Err(AppError::new(2, "The rate table has no programs to choose from."));
    }

    let college = choose(input, output, "College", &colleges)?;
    let programs = catalog.programs(&college);
    let program = choose(input, output, "Program", &programs)?;

    let record = catalog
        .get(&college, &program)
        .ok_or_else(|| AppError::new(3, format!("No rate entry for {program} at {college}.")))?;

    let credits = if record.billing.is_per_credit() {
        prompt_credits(input, output)?
    } else {
        say(
            output,
            &format!("Flat rate tuition applied ({FLAT_RATE_REFERENCE_CREDITS} credits)."),
        )?;
        Credits::DEFAULT
    };

    Ok(Selection {
        college,
        program,
        credits,
    })
}

fn choose<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    options: &[&str],
) -> Result<String, AppError> {
    say(output, &format!("\n{label}s:"))?;
    say(output, format_listing(options).trim_end())?;

    loop {
        let answer = ask(
            input,
            output,
            &format!("Select a {} by number (1-{}) or name (q to quit): ", label.to_lowercase(), options.len()),
        )?;

        if let Ok(choice) = answer.parse::<usize>() {
            if (1..=options.len()).contains(&choice) {
                return Ok(options[choice - 1].to_string());
            }
            say(
                output,
                &format!("Invalid choice: {choice}. Enter a number between 1 and {}.", options.len()),
            )?;
            continue;
        }

        if let Some(found) = options.iter().find(|o| o.eq_ignore_ascii_case(&answer)) {
            return Ok(found.to_string());
        }
        say(output, &format!("Unknown {}: {answer}", label.to_lowercase()))?;
    }
}

fn prompt_credits<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<u32, AppError> {
    loop {
        let answer = ask(
            input,
            output,
            &format!(
                "Number of credits ({}-{}) [{}]: ",
                Credits::MIN,
                Credits::MAX,
                Credits::DEFAULT
            ),
        )?;

        if answer.is_empty() {
            return Ok(Credits::DEFAULT);
        }

        match answer.parse::<u32>().map_err(|_| answer.clone()) {
            Ok(n) => match Credits::new(n) {
                Ok(credits) => return Ok(credits.get()),
                Err(e) => say(output, &e.to_string())?,
            },
            Err(raw) => say(output, &format!("Not a whole number: {raw}"))?,
        }
    }
}

/// Print a prompt and read one trimmed line. `q` and end of input cancel.
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String, AppError> {
    write!(output, "{prompt}")
        .and_then(|_| output.flush())
        .map_err(|e| AppError::new(2, format!("Failed to write prompt: {e}")))?;

    let mut line = String::new();
    let bytes = input
        .read_line(&mut line)
        .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;

    if bytes == 0 {
        return Err(AppError::new(
            2,
            "No input received. Use `gradcost quote <COLLEGE> <PROGRAM>` for non-interactive use.",
        ));
    }

    let line = line.trim();
    if line.eq_ignore_ascii_case("q") {
        return Err(AppError::new(2, "Canceled."));
    }
    Ok(line.to_string())
}

fn say<W: Write>(output: &mut W, line: &str) -> Result<(), AppError> {
    writeln!(output, "{line}").map_err(|e| AppError::new(2, format!("Failed to write output: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DuplicatePolicy;
    use crate::io::ingest::load_catalog_from_reader;
    use std::io::Cursor;

    fn catalog() -> RateCatalog {
        let csv = "College,Program,Per Credit,Tuition for 18 Credits,Fees,Living Expenses\n\
                   Hartt School,Music,flat,18000,1200,9000\n\
                   Arts & Sciences,Data Science,950,,800,9000\n\
                   Arts & Sciences,ELI Program,950,,800,9000\n";
        load_catalog_from_reader(csv.as_bytes(), "picker.csv", DuplicatePolicy::First).unwrap()
    }

    fn run(script: &str) -> (Result<Selection, AppError>, String) {
        let catalog = catalog();
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = prompt_selection(&catalog, &mut input, &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn selects_by_number_and_credits() {
        let (result, transcript) = run("1\n1\n9\n");
        assert_eq!(
            result.unwrap(),
            Selection {
                college: "Arts & Sciences".to_string(),
                program: "Data Science".to_string(),
                credits: 9,
            }
        );
        assert!(transcript.contains("  1) Arts & Sciences"));
        assert!(transcript.contains("  2) ELI Program"));
    }

    #[test]
    fn flat_rate_skips_credit_prompt() {
        let (result, transcript) = run("hartt school\nMusic\n");
        let selection = result.unwrap();
        assert_eq!(selection.program, "Music");
        assert_eq!(selection.credits, Credits::DEFAULT);
        assert!(transcript.contains("Flat rate tuition applied (18 credits)."));
        assert!(!transcript.contains("Number of credits"));
    }

    #[test]
    fn invalid_answers_are_retried() {
        let (result, transcript) = run("7\nArts & Sciences\n2\n0\nten\n\n");
        let selection = result.unwrap();
        assert_eq!(selection.program, "ELI Program");
        assert_eq!(selection.credits, Credits::DEFAULT);
        assert!(transcript.contains("Invalid choice: 7"));
        assert!(transcript.contains("outside the accepted range"));
        assert!(transcript.contains("Not a whole number: ten"));
    }

    #[test]
    fn long_listings_stay_aligned() {
        let csv = (1..=12).fold(
            String::from("College,Program,Per Credit,Tuition for 18 Credits,Fees,Living Expenses\n"),
            |mut acc, n| {
                acc.push_str(&format!("College {n:02},Program,500,,0,0\n"));
                acc
            },
        );
        let catalog = load_catalog_from_reader(csv.as_bytes(), "many.csv", DuplicatePolicy::First).unwrap();
        let mut input = Cursor::new(b"12\n1\n\n".to_vec());
        let mut output = Vec::new();

        let selection = prompt_selection(&catalog, &mut input, &mut output).unwrap();
        assert_eq!(selection.college, "College 12");

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("Colleges:\n   1) College 01\n"));
        assert!(transcript.contains("  12) College 12\n"));
    }

    #[test]
    fn quit_and_end_of_input_cancel() {
        let (result, _) = run("q\n");
        assert_eq!(result.unwrap_err().to_string(), "Canceled.");

        let (result, _) = run("1\n");
        assert_eq!(result.unwrap_err().exit_code(), 2);
    }
}
