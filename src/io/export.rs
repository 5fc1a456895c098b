//! Export a resolved quote to JSON.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts. Amounts are written as exact decimal strings.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::domain::CostBreakdown;
use crate::error::AppError;

/// A breakdown together with the selection and source it was computed from.
#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    pub college: String,
    pub program: String,
    /// Credits the user asked for (flat-rate programs ignore it).
    pub credits_requested: u32,
    pub source: String,
    pub generated_at: DateTime<Local>,
    pub breakdown: CostBreakdown,
}

impl Quote {
    pub fn new(
        college: impl Into<String>,
        program: impl Into<String>,
        credits_requested: u32,
        source: impl Into<String>,
        breakdown: CostBreakdown,
    ) -> Self {
        Self {
            college: college.into(),
            program: program.into(),
            credits_requested,
            source: source.into(),
            generated_at: Local::now(),
            breakdown,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, AppError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AppError::new(2, format!("Failed to serialize quote: {e}")))
    }
}

/// Write a quote JSON file.
pub fn write_quote_json(path: &Path, quote: &Quote) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create quote JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, quote)
        .map_err(|e| AppError::new(2, format!("Failed to write quote JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AppliedSurcharge, BillingModel};
    use rust_decimal_macros::dec;

    fn quote() -> Quote {
        Quote::new(
            "Arts & Sciences",
            "ELI Program",
            9,
            "TuitionCost.csv",
            CostBreakdown {
                billing: BillingModel::PerCredit { rate: dec!(950) },
                credits_billed: Some(9),
                base_tuition: dec!(8550),
                tuition: dec!(13936),
                fees: dec!(800),
                living_expenses: dec!(9000),
                total: dec!(23736),
                applied_surcharges: vec![AppliedSurcharge {
                    label: "Student Support Fee".to_string(),
                    amount: dec!(5386),
                }],
            },
        )
    }

    #[test]
    fn json_carries_exact_amounts() {
        let value: serde_json::Value = serde_json::from_str(&quote().to_json_pretty().unwrap()).unwrap();

        assert_eq!(value["college"], "Arts & Sciences");
        assert_eq!(value["breakdown"]["billing"]["model"], "per_credit");
        assert_eq!(value["breakdown"]["billing"]["rate"], "950");
        assert_eq!(value["breakdown"]["total"], "23736");
        assert_eq!(value["breakdown"]["applied_surcharges"][0]["label"], "Student Support Fee");
        assert!(value["generated_at"].is_string());
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quote.json");
        write_quote_json(&path, &quote()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"program\": \"ELI Program\""));
    }
}
