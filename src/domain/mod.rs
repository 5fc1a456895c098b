//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - rate records and billing models (`RateRecord`, `BillingModel`)
//! - resolution inputs and outputs (`Credits`, `CostBreakdown`)

pub mod types;

pub use types::*;
