//! Run settings.
//!
//! Resolution order: built-in defaults, then environment variables (a `.env`
//! file in the working directory is honoured), then CLI flags applied by the
//! caller.

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::DuplicatePolicy;
use crate::error::AppError;
use crate::pricing::{ELI_SUPPORT_FEE, HARTT_ANNUAL_FEE, SurchargeSchedule};

pub const DEFAULT_DATA_FILE: &str = "TuitionCost.csv";

pub const ENV_DATA: &str = "GRADCOST_DATA";
pub const ENV_HARTT_FEE: &str = "GRADCOST_HARTT_FEE";
pub const ENV_ELI_FEE: &str = "GRADCOST_ELI_FEE";
pub const ENV_DUPLICATES: &str = "GRADCOST_DUPLICATES";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_path: PathBuf,
    pub duplicate_policy: DuplicatePolicy,
    pub hartt_fee: Decimal,
    pub eli_fee: Decimal,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            duplicate_policy: DuplicatePolicy::First,
            hartt_fee: HARTT_ANNUAL_FEE,
            eli_fee: ELI_SUPPORT_FEE,
        }
    }
}

impl Settings {
    /// Settings from the process environment (after loading `.env`).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Settings from an arbitrary key lookup; unset or blank keys keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut settings = Settings::default();

        if let Some(path) = get(ENV_DATA) {
            settings.data_path = PathBuf::from(path.trim());
        }
        if let Some(raw) = get(ENV_DUPLICATES) {
            settings.duplicate_policy = DuplicatePolicy::from_str(&raw)
                .map_err(|e| AppError::new(2, format!("Invalid {ENV_DUPLICATES}: {e}")))?;
        }
        if let Some(raw) = get(ENV_HARTT_FEE) {
            settings.hartt_fee = parse_fee(ENV_HARTT_FEE, &raw)?;
        }
        if let Some(raw) = get(ENV_ELI_FEE) {
            settings.eli_fee = parse_fee(ENV_ELI_FEE, &raw)?;
        }

        Ok(settings)
    }

    pub fn surcharge_schedule(&self) -> SurchargeSchedule {
        SurchargeSchedule::with_amounts(self.hartt_fee, self.eli_fee)
    }
}

fn parse_fee(key: &str, raw: &str) -> Result<Decimal, AppError> {
    match crate::io::ingest::parse_currency(raw) {
        Ok(Some(fee)) => Ok(fee),
        Ok(None) => Err(AppError::new(2, format!("Invalid {key}: expected an amount, got '{raw}'"))),
        Err(e) => Err(AppError::new(2, format!("Invalid {key}: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use rust_decimal_macros::dec;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.data_path, PathBuf::from("TuitionCost.csv"));
        assert_eq!(settings.surcharge_schedule(), SurchargeSchedule::default());
    }

    #[test]
    fn environment_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            (ENV_DATA, "data/rates-2025.csv"),
            (ENV_DUPLICATES, "reject"),
            (ENV_HARTT_FEE, "$450"),
            (ENV_ELI_FEE, "5,500.00"),
        ]))
        .unwrap();

        assert_eq!(settings.data_path, PathBuf::from("data/rates-2025.csv"));
        assert_eq!(settings.duplicate_policy, DuplicatePolicy::Reject);
        assert_eq!(settings.hartt_fee, dec!(450));
        assert_eq!(settings.eli_fee, dec!(5500));
    }

    #[test]
    fn blank_values_keep_defaults() {
        let settings = Settings::from_lookup(lookup(&[(ENV_HARTT_FEE, "  ")])).unwrap();
        assert_eq!(settings.hartt_fee, HARTT_ANNUAL_FEE);
    }

    #[test]
    fn invalid_values_name_the_key() {
        let err = Settings::from_lookup(lookup(&[(ENV_ELI_FEE, "lots")])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains(ENV_ELI_FEE));

        let err = Settings::from_lookup(lookup(&[(ENV_DUPLICATES, "last")])).unwrap_err();
        assert!(err.to_string().contains(ENV_DUPLICATES));
    }
}
