//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the pricing code stays free of presentation concerns
//! - output changes are localized

use rust_decimal::{Decimal, RoundingStrategy};

use crate::catalog::RateCatalog;
use crate::domain::{BillingModel, CostBreakdown, FLAT_RATE_REFERENCE_CREDITS};

const RULE: &str = "---------------------------------";

/// Format an amount to cents with thousands grouping, e.g. `12,345.67`.
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// `$` followed by the amount right-aligned in 12 columns.
pub fn format_money(value: Decimal) -> String {
    format!("${:>12}", format_amount(value))
}

/// Plaintext breakdown for one resolved selection.
pub fn format_breakdown(college: &str, program: &str, breakdown: &CostBreakdown) -> String {
    let mut out = String::new();

    out.push_str(&format!("College:  {college}\n"));
    out.push_str(&format!("Program:  {program}\n"));
    out.push_str(&format!("Billing:  {}\n", describe_billing(breakdown)));

    if !breakdown.applied_surcharges.is_empty() {
        out.push_str("Surcharges:\n");
        for surcharge in &breakdown.applied_surcharges {
            out.push_str(&format!(
                "  + {:<28}{}\n",
                surcharge.label,
                format_money(surcharge.amount)
            ));
        }
    }

    out.push('\n');
    out.push_str(&format!("{:<16}{}\n", "Tuition:", format_money(breakdown.tuition)));
    out.push_str(&format!("{:<16}{}\n", "Fees:", format_money(breakdown.fees)));
    out.push_str(&format!(
        "{:<16}{}\n",
        "Living Costs:",
        format_money(breakdown.living_expenses)
    ));
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("{:<16}{}\n", "Grand Total:", format_money(breakdown.total)));

    out
}

fn describe_billing(breakdown: &CostBreakdown) -> String {
    match (breakdown.billing, breakdown.credits_billed) {
        (BillingModel::PerCredit { rate }, Some(credits)) => {
            format!("per-credit ({credits} credits x ${})", format_amount(rate))
        }
        (BillingModel::PerCredit { rate }, None) => format!("per-credit (${} per credit)", format_amount(rate)),
        (BillingModel::FlatRate { .. }, _) => {
            format!("flat rate tuition applied ({FLAT_RATE_REFERENCE_CREDITS} credits)")
        }
    }
}

/// Numbered list, one entry per line: `  1) Arts & Sciences`.
pub fn format_listing<S: AsRef<str>>(items: &[S]) -> String {
    let width = items.len().to_string().len();
    let mut out = String::new();
    for (idx, item) in items.iter().enumerate() {
        out.push_str(&format!("{:>width$}) {}\n", idx + 1, item.as_ref(), width = width + 2));
    }
    out
}

/// Summary of a loaded catalog, as printed by `gradcost check`.
pub fn format_catalog_summary(catalog: &RateCatalog) -> String {
    let mut out = String::new();

    let per_credit = catalog.records().filter(|r| r.billing.is_per_credit()).count();
    let flat = catalog.len() - per_credit;

    out.push_str(&format!("Source:    {}\n", catalog.origin()));
    out.push_str(&format!(
        "Programs:  {} across {} college(s)\n",
        catalog.len(),
        catalog.colleges().len()
    ));
    out.push_str(&format!("Billing:   {per_credit} per-credit, {flat} flat rate\n"));

    if catalog.duplicates().is_empty() {
        out.push_str("Duplicates: none\n");
    } else {
        out.push_str(&format!("Duplicates: {} skipped\n", catalog.duplicates().len()));
        for dup in catalog.duplicates() {
            out.push_str(&format!(
                "  line {}: {} / {} (kept line {})\n",
                dup.line, dup.college, dup.program, dup.first_line
            ));
        }
    }

    out.push('\n');
    for college in catalog.colleges() {
        out.push_str(&format!("{college}\n"));
        for program in catalog.programs(college) {
            if let Some(record) = catalog.get(college, program) {
                out.push_str(&format!("  {:<40} {}\n", program, describe_rate(&record.billing)));
            }
        }
    }

    out
}

fn describe_rate(billing: &BillingModel) -> String {
    match billing {
        BillingModel::PerCredit { rate } => format!("${} / credit", format_amount(*rate)),
        BillingModel::FlatRate { tuition } => format!("${} flat", format_amount(*tuition)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AppliedSurcharge;
    use rust_decimal_macros::dec;

    #[test]
    fn amounts_are_grouped_and_rounded() {
        assert_eq!(format_amount(dec!(0)), "0.00");
        assert_eq!(format_amount(dec!(950)), "950.00");
        assert_eq!(format_amount(dec!(1200)), "1,200.00");
        assert_eq!(format_amount(dec!(12345.67)), "12,345.67");
        assert_eq!(format_amount(dec!(1234567.891)), "1,234,567.89");
        assert_eq!(format_amount(dec!(0.005)), "0.01");
        assert_eq!(format_amount(dec!(-400)), "-400.00");
    }

    #[test]
    fn money_column_is_right_aligned() {
        assert_eq!(format_money(dec!(18400)), "$   18,400.00");
        assert_eq!(format_money(dec!(28600)), "$   28,600.00");
    }

    #[test]
    fn breakdown_layout() {
        let breakdown = CostBreakdown {
            billing: BillingModel::FlatRate { tuition: dec!(18000) },
            credits_billed: None,
            base_tuition: dec!(18000),
            tuition: dec!(18400),
            fees: dec!(1200),
            living_expenses: dec!(9000),
            total: dec!(28600),
            applied_surcharges: vec![AppliedSurcharge {
                label: "Hartt Annual Fee".to_string(),
                amount: dec!(400),
            }],
        };

        let text = format_breakdown("Hartt School", "Music", &breakdown);
        let expected_tail = "\
Tuition:        $   18,400.00
Fees:           $    1,200.00
Living Costs:   $    9,000.00
---------------------------------
Grand Total:    $   28,600.00
";
        assert!(text.ends_with(expected_tail), "{text}");
        assert!(text.contains("Billing:  flat rate tuition applied (18 credits)"));
        assert!(text.contains("  + Hartt Annual Fee            $      400.00"));
    }

    #[test]
    fn per_credit_billing_line() {
        let breakdown = CostBreakdown {
            billing: BillingModel::PerCredit { rate: dec!(950) },
            credits_billed: Some(9),
            base_tuition: dec!(8550),
            tuition: dec!(8550),
            fees: dec!(800),
            living_expenses: dec!(9000),
            total: dec!(18350),
            applied_surcharges: Vec::new(),
        };

        let text = format_breakdown("Arts & Sciences", "Data Science", &breakdown);
        assert!(text.contains("Billing:  per-credit (9 credits x $950.00)"));
        assert!(!text.contains("Surcharges:"));
    }

    #[test]
    fn listing_is_numbered() {
        let text = format_listing(&["Arts & Sciences", "Hartt School"]);
        assert_eq!(text, "  1) Arts & Sciences\n  2) Hartt School\n");
    }
}
