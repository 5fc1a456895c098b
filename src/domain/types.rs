//! Shared domain types.
//!
//! Monetary values are `rust_decimal::Decimal` throughout: outputs are shown to
//! the cent and compared exactly, so no binary floating point is involved.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ResolveError;

/// Reference credit load the flat-rate tuition figure is quoted for.
pub const FLAT_RATE_REFERENCE_CREDITS: u32 = 18;

/// How tuition is billed for a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum BillingModel {
    /// `credits × rate`.
    PerCredit { rate: Decimal },
    /// Fixed amount for an 18-credit load, independent of credits taken.
    FlatRate { tuition: Decimal },
}

impl BillingModel {
    /// Select the billing model from the two source figures.
    ///
    /// A per-credit rate always wins; the flat figure is only consulted when the
    /// rate is absent. `None` means neither figure is usable.
    pub fn select(per_credit_rate: Option<Decimal>, flat_tuition: Option<Decimal>) -> Option<Self> {
        match (per_credit_rate, flat_tuition) {
            (Some(rate), _) => Some(BillingModel::PerCredit { rate }),
            (None, Some(tuition)) => Some(BillingModel::FlatRate { tuition }),
            (None, None) => None,
        }
    }

    pub fn is_per_credit(&self) -> bool {
        matches!(self, BillingModel::PerCredit { .. })
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BillingModel::PerCredit { .. } => "per-credit",
            BillingModel::FlatRate { .. } => "flat rate",
        }
    }
}

/// One program's cost structure at one college.
///
/// Built once by the loader and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateRecord {
    pub college: String,
    pub program: String,
    pub billing: BillingModel,
    /// The 18-credit figure as given in the source, kept even when the
    /// per-credit rate takes precedence.
    pub flat_tuition_18_credits: Option<Decimal>,
    pub fees: Decimal,
    pub living_expenses: Decimal,
    /// 1-based line in the source the record came from.
    #[serde(skip)]
    pub line: usize,
}

impl RateRecord {
    pub fn per_credit_rate(&self) -> Option<Decimal> {
        match self.billing {
            BillingModel::PerCredit { rate } => Some(rate),
            BillingModel::FlatRate { .. } => None,
        }
    }
}

/// What to do when the source lists the same `(college, program)` twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Keep the first occurrence in source order; later ones are reported.
    #[default]
    First,
    /// Fail the load.
    Reject,
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(DuplicatePolicy::First),
            "reject" => Ok(DuplicatePolicy::Reject),
            other => Err(format!("expected `first` or `reject`, got `{other}`")),
        }
    }
}

/// A validated credit count for one term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Credits(u32);

impl Credits {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 100;
    /// Value offered when the user has not chosen one.
    pub const DEFAULT: u32 = 12;

    pub fn new(credits: u32) -> Result<Self, ResolveError> {
        if (Self::MIN..=Self::MAX).contains(&credits) {
            Ok(Self(credits))
        } else {
            Err(ResolveError::CreditsOutOfRange {
                credits,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// A surcharge that was actually added to tuition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedSurcharge {
    pub label: String,
    pub amount: Decimal,
}

/// Result of resolving a selection. Computed per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostBreakdown {
    pub billing: BillingModel,
    /// Credits used for the tuition figure; `None` under flat-rate billing.
    pub credits_billed: Option<u32>,
    /// Tuition before surcharges.
    pub base_tuition: Decimal,
    /// Tuition including every applied surcharge.
    pub tuition: Decimal,
    pub fees: Decimal,
    pub living_expenses: Decimal,
    pub total: Decimal,
    pub applied_surcharges: Vec<AppliedSurcharge>,
}
