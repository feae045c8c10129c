//! Configuration types for ipcidr

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// One upstream RIR delegation source.
///
/// Most registries publish under a fixed `delegated-*-latest` path. AFRINIC
/// publishes under a date-stamped filename with unpredictable lag, so its
/// descriptor sets [`probe_by_date`](Self::probe_by_date) and a retry budget
/// for stepping backwards through candidate dates.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceDescriptor {
    /// Display name used in logs and the run summary
    pub name: String,

    /// Fixed download URL, or the directory base when probing by date
    pub url: String,

    /// Whether the file name must be probed backwards from today's date
    #[serde(default)]
    pub probe_by_date: bool,

    /// Maximum extra probe attempts before falling back to the static URL
    #[serde(default)]
    pub max_retries: u32,

    /// Last-resort URL tried once when every dated candidate failed
    #[serde(default)]
    pub fallback_url: Option<String>,
}

impl SourceDescriptor {
    /// Fixed-path source with no retry policy.
    pub fn fixed(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            probe_by_date: false,
            max_retries: 0,
            fallback_url: None,
        }
    }
}

/// Static last-resort URL when every dated AFRINIC candidate fails.
pub const AFRINIC_FALLBACK_URL: &str =
    "http://ftp.afrinic.net/pub/stats/afrinic/RIR-Statistics-Exchange-Format.txt";

/// The five built-in RIR statistics sources.
pub fn default_sources() -> Vec<SourceDescriptor> {
    vec![
        SourceDescriptor::fixed(
            "APNIC",
            "https://ftp.apnic.net/stats/apnic/delegated-apnic-latest",
        ),
        SourceDescriptor::fixed(
            "ARIN",
            "https://ftp.arin.net/pub/stats/arin/delegated-arin-extended-latest",
        ),
        SourceDescriptor::fixed(
            "RIPE NCC",
            "https://ftp.ripe.net/ripe/stats/delegated-ripencc-latest",
        ),
        SourceDescriptor {
            name: "AFRINIC".to_string(),
            url: "https://ftp.afrinic.net/pub/stats/afrinic/".to_string(),
            probe_by_date: true,
            max_retries: 30,
            fallback_url: Some(AFRINIC_FALLBACK_URL.to_string()),
        },
        SourceDescriptor::fixed(
            "LACNIC",
            "https://ftp.lacnic.net/pub/stats/lacnic/delegated-lacnic-latest",
        ),
    ]
}

/// Pipeline behavior configuration (output location, concurrency, timeouts)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Root directory for per-country output (default: "data")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Maximum country buckets processed simultaneously (default: 10)
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_countries: usize,

    /// Per-request deadline for every network fetch (default: 30s)
    #[serde(default = "default_fetch_timeout", with = "duration_secs")]
    pub fetch_timeout: Duration,

    /// Upstream delegation sources (default: the five RIRs)
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceDescriptor>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            max_concurrent_countries: default_max_concurrent(),
            fetch_timeout: default_fetch_timeout(),
            sources: default_sources(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_max_concurrent() -> usize {
    10
}

fn default_fetch_timeout() -> Duration {
    Duration::from_secs(30)
}

/// Serialize durations as whole seconds so config files stay readable.
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(d)?))
    }
}
