//! # ipcidr
//!
//! Generates per-country IP CIDR lists from the delegation statistics
//! published by the five regional internet registries (RIRs).
//!
//! The pipeline fetches each registry's statistics file (probing backwards
//! through publication dates for the one registry without a stable path),
//! discovers which country codes actually appear in the data, and writes one
//! `ipv4.txt`/`ipv6.txt` pair per country under an output root, processing
//! up to ten countries in parallel while tolerating per-country failures.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ipcidr::{Pipeline, PipelineConfig, RegistryCatalog};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = Pipeline::new(PipelineConfig::default(), RegistryCatalog::builtin());
//!     let summary = pipeline.run().await?;
//!     println!("{summary}");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Per-country output bucket writer
pub mod bucket;
/// Country code catalog and excluded territories
pub mod catalog;
/// Prefix-length normalization
pub mod cidr;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Country-code universe extraction
pub mod extract;
/// Delegation file fetching
pub mod fetch;
/// Pipeline orchestration
pub mod pipeline;

pub use catalog::RegistryCatalog;
pub use config::{PipelineConfig, SourceDescriptor};
pub use error::{Error, Result};
pub use pipeline::{Pipeline, RunSummary};
