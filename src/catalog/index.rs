//! The in-memory rate catalog.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use tracing::warn;

use crate::domain::{DuplicatePolicy, RateRecord};
use crate::error::CatalogError;

/// A source row that was dropped because its key was already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDuplicate {
    pub line: usize,
    pub first_line: usize,
    pub college: String,
    pub program: String,
}

/// Immutable index of rate records keyed by `(college, program)`.
///
/// Keys are stored trimmed and ordered, so college and program listings come
/// out sorted and de-duplicated without further work.
#[derive(Debug, Clone, Default)]
pub struct RateCatalog {
    origin: String,
    by_college: BTreeMap<String, BTreeMap<String, RateRecord>>,
    duplicates: Vec<SkippedDuplicate>,
}

impl RateCatalog {
    /// Index records given in source order.
    pub fn build(
        origin: impl Into<String>,
        records: Vec<RateRecord>,
        policy: DuplicatePolicy,
    ) -> Result<Self, CatalogError> {
        let mut catalog = RateCatalog {
            origin: origin.into(),
            ..RateCatalog::default()
        };

        for record in records {
            let programs = catalog.by_college.entry(record.college.clone()).or_default();
            match programs.entry(record.program.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(record);
                }
                Entry::Occupied(existing) => {
                    let first_line = existing.get().line;
                    match policy {
                        DuplicatePolicy::Reject => {
                            return Err(CatalogError::DuplicateEntry {
                                line: record.line,
                                first_line,
                                college: record.college,
                                program: record.program,
                            });
                        }
                        DuplicatePolicy::First => {
                            warn!(
                                line = record.line,
                                first_line,
                                college = %record.college,
                                program = %record.program,
                                "skipping duplicate rate entry"
                            );
                            catalog.duplicates.push(SkippedDuplicate {
                                line: record.line,
                                first_line,
                                college: record.college,
                                program: record.program,
                            });
                        }
                    }
                }
            }
        }

        Ok(catalog)
    }

    /// Where the catalog was loaded from (a path or a caller-supplied label).
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Sorted college names.
    pub fn colleges(&self) -> Vec<&str> {
        self.by_college.keys().map(String::as_str).collect()
    }

    /// Sorted program names offered by `college`; empty for unknown colleges.
    pub fn programs(&self, college: &str) -> Vec<&str> {
        self.by_college
            .get(college.trim())
            .map(|programs| programs.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn get(&self, college: &str, program: &str) -> Option<&RateRecord> {
        self.by_college.get(college.trim())?.get(program.trim())
    }

    /// All records in `(college, program)` order.
    pub fn records(&self) -> impl Iterator<Item = &RateRecord> {
        self.by_college.values().flat_map(|programs| programs.values())
    }

    pub fn len(&self) -> usize {
        self.by_college.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_college.is_empty()
    }

    /// Rows dropped under `DuplicatePolicy::First`, in source order.
    pub fn duplicates(&self) -> &[SkippedDuplicate] {
        &self.duplicates
    }
}
