//! Reporting utilities: currency formatting, cost breakdowns, and listings.

pub mod format;

pub use format::*;
