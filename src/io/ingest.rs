//! CSV ingest and normalization.
//!
//! This module turns a rate table exported from a spreadsheet into validated
//! `RateRecord`s and indexes them into a `RateCatalog`.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors, exit code 2)
//! - **Fail fast**: any invalid row aborts the load; a partially loaded catalog
//!   is never returned
//! - **Exact money**: currency text is coerced straight to `Decimal`

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::StringRecord;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::catalog::RateCatalog;
use crate::domain::{BillingModel, DuplicatePolicy, RateRecord};
use crate::error::CatalogError;

pub const COL_COLLEGE: &str = "College";
pub const COL_PROGRAM: &str = "Program";
pub const COL_PER_CREDIT: &str = "Per Credit";
pub const COL_FLAT_TUITION: &str = "Tuition for 18 Credits";
pub const COL_FEES: &str = "Fees";
pub const COL_LIVING: &str = "Living Expenses";

const REQUIRED_COLUMNS: [&str; 6] = [
    COL_COLLEGE,
    COL_PROGRAM,
    COL_PER_CREDIT,
    COL_FLAT_TUITION,
    COL_FEES,
    COL_LIVING,
];

/// Case-insensitive tokens that mark a currency cell as "no figure".
///
/// `Per Credit` uses these to flag flat-rate programs ("Flat", "per year", "N/A").
pub const ABSENT_MARKERS: [&str; 3] = ["flat", "year", "n/a"];

/// Leading currency symbols accepted on amounts.
pub const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

/// Load a rate catalog from a CSV file.
pub fn load_catalog(path: &Path, policy: DuplicatePolicy) -> Result<RateCatalog, CatalogError> {
    let origin = path.display().to_string();
    let file = File::open(path).map_err(|e| CatalogError::DataLoad {
        origin: origin.clone(),
        reason: e.to_string(),
    })?;
    load_catalog_from_reader(file, &origin, policy)
}

/// Load a rate catalog from any CSV byte source. `origin` names the source in
/// errors and logs.
pub fn load_catalog_from_reader<R: Read>(
    source: R,
    origin: &str,
    policy: DuplicatePolicy,
) -> Result<RateCatalog, CatalogError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| CatalogError::DataLoad {
            origin: origin.to_string(),
            reason: format!("failed to read CSV headers: {e}"),
        })?
        .clone();

    let columns = ColumnMap::resolve(&headers)?;

    let mut records = Vec::new();
    let mut rows_read = 0usize;

    for result in reader.records() {
        let record = result.map_err(|e| CatalogError::DataLoad {
            origin: origin.to_string(),
            reason: format!("CSV parse error: {e}"),
        })?;
        rows_read += 1;

        let line = record
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or(rows_read + 1);

        if record.iter().all(|field| field.trim().is_empty()) {
            debug!(line, "skipping blank row");
            continue;
        }

        records.push(parse_row(&record, &columns, line)?);
    }

    let catalog = RateCatalog::build(origin, records, policy)?;
    info!(
        origin,
        rows_read,
        records = catalog.len(),
        duplicates = catalog.duplicates().len(),
        "rate catalog loaded"
    );
    Ok(catalog)
}

/// Positions of the required columns in the header row.
struct ColumnMap {
    college: usize,
    program: usize,
    per_credit: usize,
    flat_tuition: usize,
    fees: usize,
    living: usize,
}

impl ColumnMap {
    fn resolve(headers: &StringRecord) -> Result<Self, CatalogError> {
        let by_name: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (normalize_header_name(name), idx))
            .collect();

        let find = |column: &'static str| {
            by_name
                .get(&normalize_header_name(column))
                .copied()
                .ok_or(CatalogError::MissingColumn { column })
        };

        // Check in a fixed order so the reported column is deterministic.
        for column in REQUIRED_COLUMNS {
            find(column)?;
        }

        Ok(Self {
            college: find(COL_COLLEGE)?,
            program: find(COL_PROGRAM)?,
            per_credit: find(COL_PER_CREDIT)?,
            flat_tuition: find(COL_FLAT_TUITION)?,
            fees: find(COL_FEES)?,
            living: find(COL_LIVING)?,
        })
    }
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim_start_matches('\u{feff}').trim();
    name.to_ascii_lowercase()
}

fn parse_row(record: &StringRecord, columns: &ColumnMap, line: usize) -> Result<RateRecord, CatalogError> {
    let college = field(record, columns.college).to_string();
    let program = field(record, columns.program).to_string();

    let invalid = |column: &'static str, reason: String| CatalogError::InvalidRow {
        line,
        column,
        college: college.clone(),
        program: program.clone(),
        reason,
    };

    if college.is_empty() {
        return Err(invalid(COL_COLLEGE, "college name is blank".to_string()));
    }
    if program.is_empty() {
        return Err(invalid(COL_PROGRAM, "program name is blank".to_string()));
    }

    let money = |column: &'static str, idx: usize| {
        parse_currency(field(record, idx)).map_err(|reason| invalid(column, reason))
    };

    let per_credit_rate = money(COL_PER_CREDIT, columns.per_credit)?;
    let flat_tuition = money(COL_FLAT_TUITION, columns.flat_tuition)?;
    let fees = money(COL_FEES, columns.fees)?
        .ok_or_else(|| invalid(COL_FEES, "fees amount is missing".to_string()))?;
    let living_expenses = money(COL_LIVING, columns.living)?
        .ok_or_else(|| invalid(COL_LIVING, "living expenses amount is missing".to_string()))?;

    let billing = BillingModel::select(per_credit_rate, flat_tuition).ok_or_else(|| {
        invalid(
            COL_FLAT_TUITION,
            "no per-credit rate and no flat 18-credit tuition; one is required".to_string(),
        )
    })?;

    Ok(RateRecord {
        college,
        program,
        billing,
        flat_tuition_18_credits: flat_tuition,
        fees,
        living_expenses,
        line,
    })
}

/// Missing trailing fields (short rows) read as blank.
fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).map(str::trim).unwrap_or("")
}

/// Coerce currency text such as `"$12,345.00"` to a decimal amount.
///
/// One leading symbol from `CURRENCY_SYMBOLS` and any grouping commas are
/// stripped; no conversion between currencies takes place. Returns `Ok(None)` for blank cells and cells containing an absent marker
/// (see `ABSENT_MARKERS`). Negative or unparseable amounts are errors.
pub fn parse_currency(raw: &str) -> Result<Option<Decimal>, String> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(None);
    }

    let lower = s.to_lowercase();
    if ABSENT_MARKERS.iter().any(|marker| lower.contains(marker)) {
        return Ok(None);
    }

    let digits: String = s
        .strip_prefix(CURRENCY_SYMBOLS)
        .unwrap_or(s)
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .collect();

    let value = Decimal::from_str(&digits).map_err(|_| format!("'{s}' is not a currency amount"))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(format!("'{s}' is negative"));
    }
    Ok(Some(value))
}
