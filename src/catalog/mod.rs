//! Rate catalog: the indexed, immutable view of the rate table, plus a
//! caller-owned cache that avoids re-parsing an unchanged source.

pub mod cache;
pub mod index;

pub use cache::*;
pub use index::*;
