use anyhow::Context;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use std::time::Duration;

use crate::config::HttpConfig;

/// Language and region requested from YouTube.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Localization {
    pub language: String,
    pub country: String,
}

impl Localization {
    pub fn new(language: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            country: country.into(),
        }
    }

    /// `en-GB, en;q=0.9` style header value.
    pub fn accept_language(&self) -> String {
        if self.country.is_empty() {
            self.language.clone()
        } else {
            format!("{}-{}, {};q=0.9", self.language, self.country, self.language)
        }
    }
}

impl Default for Localization {
    fn default() -> Self {
        Self::new("en", "US")
    }
}

/// Fetches a URL and hands back the parsed JSON body.
#[allow(async_fn_in_trait)]
pub trait Downloader {
    async fn fetch_json(
        &self,
        url: &str,
        localization: &Localization,
    ) -> anyhow::Result<serde_json::Value>;
}

#[derive(Debug, Clone)]
pub struct HttpDownloader {
    http: reqwest::Client,
}

impl HttpDownloader {
    pub fn new(cfg: &HttpConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&cfg.user_agent).context("user agent header")?,
        );
        // pbj=1 only answers with JSON when the web client identifies itself.
        headers.insert("x-youtube-client-name", HeaderValue::from_static("1"));
        headers.insert(
            "x-youtube-client-version",
            HeaderValue::from_str(&cfg.client_version).context("client version header")?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("build reqwest client")?;

        Ok(Self { http })
    }
}

impl Downloader for HttpDownloader {
    async fn fetch_json(
        &self,
        url: &str,
        localization: &Localization,
    ) -> anyhow::Result<serde_json::Value> {
        tracing::debug!(url, "fetching");
        let v: serde_json::Value = self
            .http
            .get(url)
            .header(ACCEPT_LANGUAGE, localization.accept_language())
            .send()
            .await
            .with_context(|| format!("send request to {url}"))?
            .error_for_status()
            .context("watch page http status")?
            .json()
            .await
            .context("parse watch page json")?;
        Ok(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_language() {
        assert_eq!(
            Localization::new("de", "AT").accept_language(),
            "de-AT, de;q=0.9"
        );
        assert_eq!(Localization::new("fr", "").accept_language(), "fr");
    }
}
