//! `gradcost` library crate.
//!
//! The binary (`gradcost`) is a thin wrapper around this library so that:
//!
//! - the catalog loader and cost resolver are testable without spawning processes
//! - other front-ends (web form, notebook) can reuse the same core
//!
//! Typical use:
//!
//! 1. load a `catalog::RateCatalog` once (directly via `io::load_catalog` or
//!    through a `catalog::CatalogCache`)
//! 2. offer `colleges()` / `programs(college)` as choices
//! 3. call `pricing::resolve` (or a `pricing::Resolver` with a custom
//!    surcharge schedule) with the final selection

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod pricing;
pub mod report;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize tracing/logging on stderr.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks the level
/// (0 = warn, 1 = info, 2+ = debug). Calling this twice is harmless.
pub fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init();
}
