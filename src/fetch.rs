//! Source fetcher: HTTP retrieval of raw delegation files.
//!
//! Downloads one file per upstream source into a destination directory,
//! transparently decompressing gzip payloads (detected by `.gz` filename
//! suffix, not content-type). AFRINIC publishes under a date-stamped path
//! with unpredictable lag, so [`Fetcher::fetch_dated`] probes candidate
//! dates backwards from today before falling back to a static URL.

use crate::config::SourceDescriptor;
use crate::error::{Error, Result};
use chrono::{Days, Utc};
use flate2::read::GzDecoder;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// HTTP fetcher shared across all sources of one run.
#[derive(Clone, Debug)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    /// Build a fetcher whose every request carries `timeout` as a deadline.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Download `url` into `dest_dir`, returning the local file path.
    ///
    /// The file is named after the URL's final path segment. A `.gz` segment
    /// is decompressed and stored under the name with the suffix stripped, so
    /// downstream consumers always see plain text.
    pub async fn fetch(&self, url: &str, dest_dir: &Path) -> Result<PathBuf> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let filename = url.rsplit('/').next().unwrap_or(url).to_string();
        let body = response.bytes().await?;

        let (filename, content) = if let Some(stem) = filename.strip_suffix(".gz") {
            let mut decoded = Vec::new();
            GzDecoder::new(body.as_ref())
                .read_to_end(&mut decoded)
                .map_err(|e| Error::Decode {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            (stem.to_string(), decoded)
        } else {
            (filename, body.to_vec())
        };

        let path = dest_dir.join(filename);
        tokio::fs::write(&path, content).await?;
        debug!(url, path = %path.display(), "fetched delegation file");
        Ok(path)
    }

    /// Fetch a date-probed source, stepping backwards from today.
    ///
    /// Candidate URLs take the form
    /// `{base}{YYYY}/delegated-afrinic-extended-{YYYYMMDD}`. An HTTP status
    /// failure means the dated file is not published yet, so the previous day
    /// is tried, up to `max_retries` extra attempts. Any other failure class
    /// aborts immediately. When every candidate is exhausted, one attempt is
    /// made at the descriptor's fallback URL; without one, the last status
    /// failure is returned.
    pub async fn fetch_dated(
        &self,
        source: &SourceDescriptor,
        dest_dir: &Path,
    ) -> Result<PathBuf> {
        let mut date = Utc::now().date_naive();
        let mut last_err = None;

        for attempt in 0..=source.max_retries {
            let url = format!(
                "{}{}/delegated-afrinic-extended-{}",
                source.url,
                date.format("%Y"),
                date.format("%Y%m%d"),
            );
            info!(
                url,
                attempt = attempt + 1,
                max = source.max_retries + 1,
                "probing dated delegation file"
            );

            match self.fetch(&url, dest_dir).await {
                Ok(path) => return Ok(path),
                Err(err) if err.is_status() => {
                    last_err = Some(err);
                    match date.checked_sub_days(Days::new(1)) {
                        Some(previous) => date = previous,
                        None => break,
                    }
                }
                Err(err) => return Err(err),
            }
        }

        match (&source.fallback_url, last_err) {
            (Some(fallback), _) => {
                info!(url = %fallback, "all dated candidates failed, trying fallback");
                self.fetch(fallback, dest_dir).await
            }
            (None, Some(err)) => Err(err),
            (None, None) => Err(Error::NoSources),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source(base: &str, max_retries: u32, fallback_url: Option<String>) -> SourceDescriptor {
        SourceDescriptor {
            name: "AFRINIC".into(),
            url: base.to_string(),
            probe_by_date: true,
            max_retries,
            fallback_url,
        }
    }

    fn dated_path(days_back: u64) -> String {
        let date = Utc::now()
            .date_naive()
            .checked_sub_days(Days::new(days_back))
            .unwrap();
        format!(
            "/stats/{}/delegated-afrinic-extended-{}",
            date.format("%Y"),
            date.format("%Y%m%d"),
        )
    }

    #[tokio::test]
    async fn fetch_writes_file_named_after_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stats/delegated-apnic-latest"))
            .respond_with(ResponseTemplate::new(200).set_body_string("apnic|JP|ipv4|1.0.0.0|256|20110101|allocated\n"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let fetcher = Fetcher::new(Duration::from_secs(5)).unwrap();
        let path = fetcher
            .fetch(
                &format!("{}/stats/delegated-apnic-latest", server.uri()),
                dir.path(),
            )
            .await
            .unwrap();

        assert_eq!(path.file_name().unwrap(), "delegated-apnic-latest");
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("apnic|JP"));
    }

    #[tokio::test]
    async fn non_success_status_is_a_typed_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let fetcher = Fetcher::new(Duration::from_secs(5)).unwrap();
        let err = fetcher
            .fetch(&format!("{}/missing", server.uri()), dir.path())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn gz_payload_is_decompressed_and_renamed() {
        let mut encoder =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(b"ripencc|FR|ipv6|2001:67c::|32|20100101|allocated\n")
            .unwrap();
        let compressed = encoder.finish().unwrap();

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stats/delegated-ripencc-latest.gz"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(compressed))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let fetcher = Fetcher::new(Duration::from_secs(5)).unwrap();
        let path = fetcher
            .fetch(
                &format!("{}/stats/delegated-ripencc-latest.gz", server.uri()),
                dir.path(),
            )
            .await
            .unwrap();

        assert_eq!(path.file_name().unwrap(), "delegated-ripencc-latest");
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "ripencc|FR|ipv6|2001:67c::|32|20100101|allocated\n");
    }

    #[tokio::test]
    async fn corrupt_gz_payload_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stats/delegated-ripencc-latest.gz"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"not gzip".to_vec()))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let fetcher = Fetcher::new(Duration::from_secs(5)).unwrap();
        let err = fetcher
            .fetch(
                &format!("{}/stats/delegated-ripencc-latest.gz", server.uri()),
                dir.path(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Decode { .. }));
    }

    #[tokio::test]
    async fn date_probe_succeeds_after_stepping_back() {
        let server = MockServer::start().await;
        // Today through two days ago miss; three days back hits.
        Mock::given(method("GET"))
            .and(path(dated_path(3).as_str()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("afrinic|ZA|ipv4|41.0.0.0|2097152|20100101|allocated\n"),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let fetcher = Fetcher::new(Duration::from_secs(5)).unwrap();
        let base = format!("{}/stats/", server.uri());
        let path = fetcher
            .fetch_dated(&source(&base, 5, None), dir.path())
            .await
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("afrinic|ZA"));
    }

    #[tokio::test]
    async fn exhausted_probe_falls_back_to_static_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stats/RIR-Statistics-Exchange-Format.txt"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("afrinic|EG|ipv4|41.32.0.0|1048576|20100101|allocated\n"),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let fetcher = Fetcher::new(Duration::from_secs(5)).unwrap();
        let base = format!("{}/stats/", server.uri());
        let fallback = format!("{}/stats/RIR-Statistics-Exchange-Format.txt", server.uri());
        let path = fetcher
            .fetch_dated(&source(&base, 2, Some(fallback)), dir.path())
            .await
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("afrinic|EG"));
    }

    #[tokio::test]
    async fn exhausted_probe_without_fallback_reports_last_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let fetcher = Fetcher::new(Duration::from_secs(5)).unwrap();
        let base = format!("{}/stats/", server.uri());
        let err = fetcher
            .fetch_dated(&source(&base, 2, None), dir.path())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn transport_failure_aborts_the_probe() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Fetcher::new(Duration::from_millis(50)).unwrap();
        // Unroutable base: every candidate fails at the transport level, so
        // no date stepping happens and the error is not a status error.
        let err = fetcher
            .fetch_dated(&source("http://127.0.0.1:1/stats/", 30, None), dir.path())
            .await
            .unwrap_err();

        assert!(!err.is_status());
    }
}
