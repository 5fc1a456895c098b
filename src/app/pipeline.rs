//! Shared "quote pipeline" logic used by every front-end command.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! settings -> cached catalog load -> resolve -> quote
//!
//! The commands can then focus on presentation (printing vs prompting).

use std::sync::Arc;

use crate::catalog::{CatalogCache, RateCatalog};
use crate::config::Settings;
use crate::error::AppError;
use crate::io::export::Quote;
use crate::pricing::{Resolver, SurchargeSchedule};

/// Owns the catalog cache and surcharge schedule for one process.
#[derive(Debug)]
pub struct Session {
    settings: Settings,
    schedule: SurchargeSchedule,
    cache: CatalogCache,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            schedule: settings.surcharge_schedule(),
            cache: CatalogCache::new(settings.duplicate_policy),
            settings,
        }
    }

    /// The catalog for the configured data file, parsed at most once per change.
    pub fn catalog(&mut self) -> Result<Arc<RateCatalog>, AppError> {
        Ok(self.cache.load(&self.settings.data_path)?)
    }

    /// Resolve a selection against the configured catalog and schedule.
    pub fn quote(&mut self, college: &str, program: &str, credits: u32) -> Result<Quote, AppError> {
        let catalog = self.catalog()?;
        let breakdown = Resolver::new(&catalog, &self.schedule).resolve(college, program, credits)?;
        Ok(Quote::new(
            college.trim(),
            program.trim(),
            credits,
            catalog.origin(),
            breakdown,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::fs;

    fn session_with(body: &str) -> (tempfile::TempDir, Session) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("TuitionCost.csv");
        fs::write(
            &path,
            format!("College,Program,Per Credit,Tuition for 18 Credits,Fees,Living Expenses\n{body}"),
        )
        .unwrap();

        let settings = Settings {
            data_path: path,
            ..Settings::default()
        };
        (dir, Session::new(settings))
    }

    #[test]
    fn quotes_use_configured_fees() {
        let (_dir, mut session) = session_with("\"Arts & Sciences\",ELI Program,$950.00,,$800.00,\"$9,000.00\"\n");
        let quote = session.quote("Arts & Sciences", "ELI Program", 9).unwrap();
        assert_eq!(quote.breakdown.total, dec!(23736));

        let mut cheaper = Session::new(Settings {
            eli_fee: dec!(1000),
            ..session.settings.clone()
        });
        let quote = cheaper.quote("Arts & Sciences", "ELI Program", 9).unwrap();
        assert_eq!(quote.breakdown.tuition, dec!(9550));
    }

    #[test]
    fn catalog_is_shared_between_calls() {
        let (_dir, mut session) = session_with("Hartt School,Music,flat,18000,1200,9000\n");
        let first = session.catalog().unwrap();
        let second = session.catalog().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn errors_map_to_exit_codes() {
        let (_dir, mut session) = session_with("Hartt School,Music,flat,18000,1200,9000\n");
        assert_eq!(session.quote("Nonexistent", "X", 12).unwrap_err().exit_code(), 3);

        let mut missing = Session::new(Settings {
            data_path: "does/not/exist.csv".into(),
            ..Settings::default()
        });
        assert_eq!(missing.catalog().unwrap_err().exit_code(), 2);
    }
}
