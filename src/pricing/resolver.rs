//! Cost resolution: selection → `CostBreakdown`.
//!
//! Resolution is pure. It reads the catalog and the surcharge schedule, never
//! mutates either, and identical inputs always produce an identical breakdown.

use rust_decimal::Decimal;
use tracing::debug;

use crate::catalog::RateCatalog;
use crate::domain::{AppliedSurcharge, BillingModel, CostBreakdown, Credits};
use crate::error::ResolveError;

use super::SurchargeSchedule;

/// Resolves selections against one catalog and one surcharge schedule.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    catalog: &'a RateCatalog,
    schedule: &'a SurchargeSchedule,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a RateCatalog, schedule: &'a SurchargeSchedule) -> Self {
        Self { catalog, schedule }
    }

    /// Compute the cost breakdown for `(college, program)` at `credits`.
    ///
    /// `credits` must be within `Credits::MIN..=Credits::MAX` for per-credit
    /// programs and is ignored entirely under flat-rate billing. Every sum is
    /// checked, so oversized catalog amounts surface as
    /// `ResolveError::AmountOverflow` instead of a panic.
    pub fn resolve(&self, college: &str, program: &str, credits: u32) -> Result<CostBreakdown, ResolveError> {
        let record = self
            .catalog
            .get(college, program)
            .ok_or_else(|| ResolveError::UnknownSelection {
                college: college.trim().to_string(),
                program: program.trim().to_string(),
            })?;

        let overflow = || ResolveError::AmountOverflow {
            college: record.college.clone(),
            program: record.program.clone(),
        };

        let (base_tuition, credits_billed) = match record.billing {
            BillingModel::PerCredit { rate } => {
                let credits = Credits::new(credits)?.get();
                let tuition = rate.checked_mul(Decimal::from(credits)).ok_or_else(overflow)?;
                (tuition, Some(credits))
            }
            BillingModel::FlatRate { tuition } => (tuition, None),
        };

        let applied_surcharges: Vec<AppliedSurcharge> = self
            .schedule
            .applicable(record)
            .map(|rule| AppliedSurcharge {
                label: rule.label.clone(),
                amount: rule.amount,
            })
            .collect();

        let tuition = applied_surcharges
            .iter()
            .try_fold(base_tuition, |acc, surcharge| acc.checked_add(surcharge.amount))
            .ok_or_else(overflow)?;
        let total = tuition
            .checked_add(record.fees)
            .and_then(|sum| sum.checked_add(record.living_expenses))
            .ok_or_else(overflow)?;

        debug!(
            college = %record.college,
            program = %record.program,
            billing = record.billing.display_name(),
            %tuition,
            %total,
            surcharges = applied_surcharges.len(),
            "resolved cost"
        );

        Ok(CostBreakdown {
            billing: record.billing,
            credits_billed,
            base_tuition,
            tuition,
            fees: record.fees,
            living_expenses: record.living_expenses,
            total,
            applied_surcharges,
        })
    }
}

/// Resolve against the standard surcharge schedule.
pub fn resolve(
    catalog: &RateCatalog,
    college: &str,
    program: &str,
    credits: u32,
) -> Result<CostBreakdown, ResolveError> {
    Resolver::new(catalog, &SurchargeSchedule::default()).resolve(college, program, credits)
}
