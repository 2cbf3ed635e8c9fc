//! Synchronous client for the **BPstat API (v1)** of Banco de Portugal.
//!
//! Two endpoints are used:
//! - `series/` lists metadata (domains, dataset, label) for a set of series ids;
//! - `domains/{domain}/datasets/{dataset}/` returns the observations as a
//!   JSON-stat 2.0 dataset.
//!
//! One request per call, no pagination and no retries. Timeouts come from
//! [`Config`].
//!
//! Typical usage:
//! ```no_run
//! # use bpstat_rs::{Client, Config};
//! let client = Client::new(&Config::default())?;
//! let series = client.fetch_series_metadata(&["12518356".into()])?;
//! # Ok::<(), anyhow::Error>(())
//! ```
use crate::config::{Config, Language};
use crate::models::{DatasetLocation, JsonStatDataset, SeriesMetadata};
use anyhow::{Context, Result, bail};
use log::debug;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    pub language: Language,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(&Config::default()).expect("reqwest client build")
    }
}

// Allow -, _, . unescaped in ids
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc(part: &str) -> String {
    percent_encoding::utf8_percent_encode(part.trim(), SAFE).to_string()
}

fn enc_join<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts.into_iter().map(enc).collect::<Vec<_>>().join(",")
}

/// URL of the series metadata listing.
pub fn series_url(base_url: &str, lang: Language, series_ids: &[String]) -> String {
    format!(
        "{}/series/?lang={}&series_ids={}",
        base_url.trim_end_matches('/'),
        lang.as_query(),
        enc_join(series_ids.iter().map(String::as_str))
    )
}

/// URL of a dataset's observations restricted to some series.
pub fn dataset_url(
    base_url: &str,
    lang: Language,
    location: &DatasetLocation,
    series_ids: &[String],
) -> String {
    format!(
        "{}/domains/{}/datasets/{}/?lang={}&series_ids={}",
        base_url.trim_end_matches('/'),
        enc(&location.domain_id),
        enc(&location.dataset_id),
        lang.as_query(),
        enc_join(series_ids.iter().map(String::as_str))
    )
}

impl Client {
    pub fn new(config: &Config) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(config.timeout) // total request timeout
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .user_agent(concat!("bpstat_rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build http client")?;
        Ok(Self {
            base_url: config.base_url.clone(),
            language: config.language,
            http,
        })
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET {url}");
        let resp = self.http.get(url).send().context("send request")?;
        let status = resp.status();
        if !status.is_success() {
            bail!("request failed with HTTP {status}");
        }
        resp.json().context("decode json")
    }

    /// Fetch metadata for all `series_ids` in one call.
    ///
    /// The API answers with one object per known series; unknown ids are
    /// silently dropped, so the result may be shorter than the input.
    pub fn fetch_series_metadata(&self, series_ids: &[String]) -> Result<Vec<SeriesMetadata>> {
        if series_ids.is_empty() {
            bail!("at least one series id required");
        }
        let url = series_url(&self.base_url, self.language, series_ids);
        self.get_json(&url).with_context(|| format!("GET {url}"))
    }

    /// Fetch the observations of `series_ids` from the dataset at `location`.
    pub fn fetch_dataset(
        &self,
        location: &DatasetLocation,
        series_ids: &[String],
    ) -> Result<JsonStatDataset> {
        let url = dataset_url(&self.base_url, self.language, location, series_ids);
        self.get_json(&url).with_context(|| format!("GET {url}"))
    }
}
