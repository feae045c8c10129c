//! Country-code universe extraction from raw delegation files.
//!
//! One pass over every fetched file discovers which country codes actually
//! appear in valid records, restricted to codes the catalog recognizes. The
//! resulting sorted list drives how many bucket tasks the pipeline schedules.

use crate::catalog::RegistryCatalog;
use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// Shape of a valid ISO 3166 alpha-2 code in a delegation record.
static COUNTRY_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}$").expect("valid regex"));

/// Scan the raw files for the set of recognized, non-excluded country codes.
///
/// Comment lines (`#`) are ignored, records need at least two pipe-separated
/// fields, and the second field must both match the two-uppercase-letter
/// shape and be a known non-excluded catalog code. Codes seen multiple times
/// count once; the result is lexicographically sorted for deterministic
/// downstream scheduling and progress output.
///
/// An unreadable file fails the whole scan: a partial universe would silently
/// drop countries.
pub fn country_universe<P: AsRef<Path>>(
    files: &[P],
    catalog: &RegistryCatalog,
) -> Result<Vec<String>> {
    let mut codes = BTreeSet::new();

    for file in files {
        let path = file.as_ref();
        let handle = File::open(path).map_err(|source| Error::Extraction {
            path: path.to_path_buf(),
            source,
        })?;

        for line in BufReader::new(handle).lines() {
            let line = line.map_err(|source| Error::Extraction {
                path: path.to_path_buf(),
                source,
            })?;
            if line.starts_with('#') {
                continue;
            }

            let mut fields = line.split('|');
            let (Some(_registry), Some(cc)) = (fields.next(), fields.next()) else {
                continue;
            };
            if COUNTRY_CODE.is_match(cc) && catalog.contains(cc) {
                codes.insert(cc.to_string());
            }
        }
    }

    Ok(codes.into_iter().collect())
}
