//! Test Module
//!
//! Cross-module test suite for the Todo Generator.
//!
//! ## Test Categories
//! - `generator_tests`: full pipeline runs over realistic note text
//! - `export_tests`: serialization of pipeline output to the export formats

pub mod generator_tests;

/// Installs a test subscriber so `RUST_LOG` works under `cargo test`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
