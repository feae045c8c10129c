//! Per-country bucket writer.
//!
//! One bucket task re-scans every raw delegation file for records matching
//! its country code and emits two artifacts, `ipv4.txt` and `ipv6.txt`,
//! under `output_root/<code lowercase>/`. Both artifacts are assembled in
//! memory, staged as temporary files next to their targets, and renamed into
//! place only once both writes succeeded, so a failed task leaves the
//! previous bucket content untouched.

use crate::catalog::RegistryCatalog;
use crate::cidr::ipv4_prefix;
use crate::error::{Error, Result};
use chrono::Utc;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::debug;

/// Comment block written below the timestamp of every artifact.
const ATTRIBUTION: &str = "\
# generated by ipcidr from RIR delegation statistics
# sources: APNIC, ARIN, RIPE NCC, AFRINIC, LACNIC
# https://github.com/jvz-devx/ipcidr
";

/// Produce the ipv4/ipv6 artifacts for one country code.
///
/// Excluded codes are a no-op: the extractor filters them already, but this
/// function must not trust that invariant across future callers. Records are
/// emitted in raw-file scan order (file order, then line order) and never
/// re-sorted, so identical inputs yield identical artifacts apart from the
/// timestamp line.
pub fn write_country<P: AsRef<Path>>(
    cc: &str,
    files: &[P],
    output_root: &Path,
    catalog: &RegistryCatalog,
) -> Result<()> {
    if catalog.is_excluded(cc) {
        debug!(country = cc, "skipping excluded territory");
        return Ok(());
    }

    let bucket_err = |message: String| Error::Bucket {
        country: cc.to_string(),
        message,
    };

    let mut ipv4_blocks = Vec::new();
    let mut ipv6_blocks = Vec::new();

    for file in files {
        let path = file.as_ref();
        let handle = File::open(path)
            .map_err(|e| bucket_err(format!("cannot open {}: {e}", path.display())))?;

        for line in BufReader::new(handle).lines() {
            let line = line
                .map_err(|e| bucket_err(format!("cannot read {}: {e}", path.display())))?;
            if line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split('|').collect();
            if fields.len() < 5 || fields[1] != cc {
                continue;
            }

            let start = fields[3];
            let Ok(value) = fields[4].parse::<u64>() else {
                // Malformed size: skip the record, keep scanning.
                continue;
            };

            match fields[2] {
                "ipv4" => ipv4_blocks.push(format!("{start}/{}", ipv4_prefix(value))),
                // IPv6 sizes already are prefix lengths; pass through as-is.
                "ipv6" => ipv6_blocks.push(format!("{start}/{value}")),
                // Unknown type tags (asn, future additions) are skipped.
                _ => {}
            }
        }
    }

    let country_dir = output_root.join(cc.to_lowercase());
    std::fs::create_dir_all(&country_dir)
        .map_err(|e| bucket_err(format!("cannot create {}: {e}", country_dir.display())))?;

    // Stage both artifacts fully before the first rename: a failure in this
    // loop means no target file has been touched yet.
    let header = format!("# last updated: {}\n{ATTRIBUTION}", Utc::now().to_rfc3339());
    let mut staged = Vec::new();
    for (filename, blocks) in [("ipv4.txt", ipv4_blocks), ("ipv6.txt", ipv6_blocks)] {
        let target = country_dir.join(filename);
        if target.is_dir() {
            return Err(bucket_err(format!(
                "{} exists and is a directory",
                target.display()
            )));
        }

        let mut content = header.clone();
        for block in &blocks {
            content.push_str(block);
            content.push('\n');
        }

        let mut tmp = tempfile::NamedTempFile::new_in(&country_dir)
            .map_err(|e| bucket_err(format!("cannot stage {}: {e}", target.display())))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| bucket_err(format!("cannot stage {}: {e}", target.display())))?;
        staged.push((tmp, target));
    }

    for (tmp, target) in staged {
        tmp.persist(&target)
            .map_err(|e| bucket_err(format!("cannot write {}: {e}", target.display())))?;
    }

    Ok(())
}
