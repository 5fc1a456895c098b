//! Error types.
//!
//! Library code returns typed errors (`CatalogError`, `ResolveError`) so callers
//! decide how to present them. The binary funnels everything into `AppError`,
//! which carries the process exit code:
//!
//! - `2`: the dataset or configuration could not be used
//! - `3`: a selection could not be resolved to a cost

use thiserror::Error;

/// Failures while building a `RateCatalog` from a tabular source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The source could not be opened or is not structurally readable.
    #[error("Failed to load rate data from {origin}: {reason}")]
    DataLoad { origin: String, reason: String },

    /// A required column is absent from the header row.
    #[error("Missing required column: `{column}`")]
    MissingColumn { column: &'static str },

    /// A data row violates the record invariants.
    #[error("Invalid row at line {line} ({college} / {program}), column `{column}`: {reason}")]
    InvalidRow {
        line: usize,
        column: &'static str,
        college: String,
        program: String,
        reason: String,
    },

    /// A `(college, program)` pair appears twice and duplicates are rejected.
    #[error(
        "Duplicate entry at line {line}: {college} / {program} (first defined at line {first_line})"
    )]
    DuplicateEntry {
        line: usize,
        first_line: usize,
        college: String,
        program: String,
    },
}

impl CatalogError {
    /// True for failures caused by the content of the source rather than its
    /// availability.
    pub fn is_schema_error(&self) -> bool {
        !matches!(self, CatalogError::DataLoad { .. })
    }
}

/// Failures while resolving a selection to a `CostBreakdown`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("No rate entry for program \"{program}\" at \"{college}\"")]
    UnknownSelection { college: String, program: String },

    #[error("Credit count {credits} is outside the accepted range {min}-{max}")]
    CreditsOutOfRange { credits: u32, min: u32, max: u32 },

    /// The amounts on the record are too large to total exactly.
    #[error("Cost of \"{program}\" at \"{college}\" exceeds the representable amount")]
    AmountOverflow { college: String, program: String },
}

/// Process-level error: a message plus the exit code the binary returns.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError::new(2, err.to_string())
    }
}

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        AppError::new(3, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_classification() {
        let load = CatalogError::DataLoad {
            origin: "TuitionCost.csv".to_string(),
            reason: "No such file".to_string(),
        };
        assert!(!load.is_schema_error());
        assert!(CatalogError::MissingColumn { column: "Fees" }.is_schema_error());
    }

    #[test]
    fn exit_codes_follow_error_kind() {
        let load: AppError = CatalogError::MissingColumn { column: "Program" }.into();
        assert_eq!(load.exit_code(), 2);
        assert_eq!(load.to_string(), "Missing required column: `Program`");

        let resolve: AppError = ResolveError::UnknownSelection {
            college: "Nonexistent".to_string(),
            program: "X".to_string(),
        }
        .into();
        assert_eq!(resolve.exit_code(), 3);

        let overflow: AppError = ResolveError::AmountOverflow {
            college: "Arts".to_string(),
            program: "Big".to_string(),
        }
        .into();
        assert_eq!(overflow.exit_code(), 3);
    }
}
