//! Data-driven tuition surcharges.
//!
//! Each rule pairs a trigger on the selection's identifiers with a fixed
//! amount and a display label. Rules are evaluated in schedule order and every
//! matching rule applies.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::domain::RateRecord;

/// Annual fee charged by the Hartt School.
pub const HARTT_ANNUAL_FEE: Decimal = dec!(400);
/// Student support fee for English Language Institute programs.
pub const ELI_SUPPORT_FEE: Decimal = dec!(5386);

pub const HARTT_FEE_LABEL: &str = "Hartt Annual Fee";
pub const ELI_FEE_LABEL: &str = "Student Support Fee";

/// How a trigger compares against an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Pattern {
    /// Case-sensitive match of a whole token; identifiers are split at every
    /// non-alphanumeric character. `Word("ELI")` matches "ELI Program" and
    /// "Intensive (ELI)" but not "DELIVERY".
    Word(String),
    /// Case-sensitive raw substring match.
    Substring(String),
}

impl Pattern {
    pub fn matches(&self, identifier: &str) -> bool {
        match self {
            Pattern::Word(word) => identifier
                .split(|c: char| !c.is_alphanumeric())
                .any(|token| token == word),
            Pattern::Substring(needle) => identifier.contains(needle.as_str()),
        }
    }
}

/// Which identifier of the selection a rule inspects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    College(Pattern),
    Program(Pattern),
}

impl Trigger {
    pub fn matches(&self, record: &RateRecord) -> bool {
        match self {
            Trigger::College(pattern) => pattern.matches(&record.college),
            Trigger::Program(pattern) => pattern.matches(&record.program),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurchargeRule {
    pub label: String,
    pub amount: Decimal,
    pub trigger: Trigger,
}

impl SurchargeRule {
    pub fn new(label: impl Into<String>, amount: Decimal, trigger: Trigger) -> Self {
        Self {
            label: label.into(),
            amount,
            trigger,
        }
    }
}

/// Ordered list of surcharge rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurchargeSchedule {
    rules: Vec<SurchargeRule>,
}

impl SurchargeSchedule {
    pub fn new(rules: Vec<SurchargeRule>) -> Self {
        Self { rules }
    }

    /// A schedule that never adds anything.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// The standard schedule with the given amounts: the Hartt fee first, then
    /// the ELI fee.
    pub fn with_amounts(hartt_fee: Decimal, eli_fee: Decimal) -> Self {
        Self::new(vec![
            SurchargeRule::new(
                HARTT_FEE_LABEL,
                hartt_fee,
                Trigger::College(Pattern::Word("Hartt".to_string())),
            ),
            SurchargeRule::new(
                ELI_FEE_LABEL,
                eli_fee,
                Trigger::Program(Pattern::Word("ELI".to_string())),
            ),
        ])
    }

    pub fn rules(&self) -> &[SurchargeRule] {
        &self.rules
    }

    /// Rules that apply to `record`, in schedule order.
    pub fn applicable<'a>(&'a self, record: &'a RateRecord) -> impl Iterator<Item = &'a SurchargeRule> + 'a {
        self.rules.iter().filter(move |rule| rule.trigger.matches(record))
    }
}

impl Default for SurchargeSchedule {
    fn default() -> Self {
        Self::with_amounts(HARTT_ANNUAL_FEE, ELI_SUPPORT_FEE)
    }
}
