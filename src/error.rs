//! Error types for ipcidr
//!
//! This module provides error handling for the library, including:
//! - Fetch errors split by cause (transport vs. HTTP status) so the
//!   date-probing retry loop can tell them apart
//! - Extraction and per-country bucket errors carrying their context
//! - A crate-wide [`Result`] alias

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ipcidr operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ipcidr
#[derive(Debug, Error)]
pub enum Error {
    /// Upstream answered with a non-success HTTP status
    ///
    /// Kept separate from [`Error::Http`] because the AFRINIC date probe
    /// retries on status failures only.
    #[error("HTTP status {status} fetching {url}")]
    Status {
        /// URL that was requested
        url: String,
        /// The non-2xx status code returned
        status: u16,
    },

    /// Transport-level HTTP failure (DNS, connect, timeout, body read)
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Compressed delegation file could not be decoded
    #[error("gzip decode error for {url}: {message}")]
    Decode {
        /// URL the payload came from
        url: String,
        /// Underlying decoder failure
        message: String,
    },

    /// Raw delegation file could not be read during the country-code scan
    ///
    /// Fatal for the whole run: without a country universe there is nothing
    /// to bucketize.
    #[error("failed to scan {path}: {source}")]
    Extraction {
        /// Path of the unreadable raw file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// One country's output bucket could not be produced
    ///
    /// Contained by the orchestrator: collected into the run summary without
    /// aborting sibling country tasks.
    #[error("bucket for {country} failed: {message}")]
    Bucket {
        /// ISO 3166 alpha-2 code of the affected country
        country: String,
        /// Human-readable failure description
        message: String,
    },

    /// No delegation source could be fetched, so the run cannot proceed
    #[error("no delegation source could be fetched")]
    NoSources,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for failures the date probe should keep stepping through.
    ///
    /// Only HTTP status failures mean "this dated file does not exist yet";
    /// everything else (transport, decode, filesystem) aborts the probe.
    pub fn is_status(&self) -> bool {
        matches!(self, Error::Status { .. })
    }
}
