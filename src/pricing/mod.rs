//! Cost resolution.
//!
//! - surcharge rules and schedules (`surcharge`)
//! - the resolver that turns a selection into a `CostBreakdown` (`resolver`)

pub mod resolver;
pub mod surcharge;

pub use resolver::*;
pub use surcharge::*;
