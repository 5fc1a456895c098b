//! Input/output helpers.
//!
//! - CSV ingest + validation of the rate table (`ingest`)
//! - quote exports (JSON) (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
