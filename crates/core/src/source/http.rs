use crate::config::Settings;
use crate::domain::{CityName, PricePoint, Product, ProductDetail, Recommendation};
use crate::source::{FetchError, FetchStage, PriceDataSource};
use anyhow::{Context, Result};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;

// Response bodies quoted in errors are cut to this many characters.
const BODY_EXCERPT_CHARS: usize = 300;

#[derive(Debug, Clone)]
pub struct HttpPriceSource {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpPriceSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url.trim())
            .with_context(|| format!("invalid price API base URL: {base_url}"))?;
        anyhow::ensure!(
            !base_url.cannot_be_a_base(),
            "price API base URL cannot carry a path: {base_url}"
        );

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build price API http client")?;

        Ok(Self { http, base_url })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(settings.base_url(), settings.request_timeout)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `segments` to the base path. Each segment is percent-encoded,
    /// so city names with spaces, commas or accents survive intact.
    pub fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("base URL cannot be a base: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        segments: &[&str],
    ) -> Result<T> {
        let fail = |stage: FetchStage, detail: String| FetchError {
            operation,
            stage,
            detail,
        };

        let url = self
            .url(segments)
            .map_err(|e| fail(FetchStage::Url, format!("{e:#}")))?;

        tracing::debug!(operation, %url, "price API request");

        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| fail(FetchStage::Transport, e.to_string()))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| fail(FetchStage::Transport, format!("failed to read body: {e}")))?;

        if !status.is_success() {
            let detail = format!("HTTP {status}: {}", excerpt(&text));
            return Err(fail(FetchStage::Status, detail).into());
        }

        let parsed = serde_json::from_str::<T>(&text)
            .map_err(|e| fail(FetchStage::Decode, format!("{e}: {}", excerpt(&text))))?;
        Ok(parsed)
    }
}

fn excerpt(body: &str) -> String {
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(BODY_EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

#[async_trait::async_trait]
impl PriceDataSource for HttpPriceSource {
    fn source_name(&self) -> &'static str {
        "http_json"
    }

    async fn fetch_products(&self) -> Result<Vec<Product>> {
        self.get_json("products", &["products"]).await
    }

    async fn fetch_cities(&self) -> Result<Vec<CityName>> {
        self.get_json("cities", &["cities"]).await
    }

    async fn fetch_price_series(&self, product_id: i64, city: &str) -> Result<Vec<PricePoint>> {
        let id = product_id.to_string();
        self.get_json("price_series", &["price-data", id.as_str(), city])
            .await
    }

    async fn fetch_recommendations(&self) -> Result<Vec<Recommendation>> {
        self.get_json("recommendations", &["recommendations"])
            .await
    }

    async fn fetch_product_detail(&self, product_id: i64) -> Result<ProductDetail> {
        let id = product_id.to_string();
        self.get_json("product_detail", &["product-detail", id.as_str()])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(base: &str) -> HttpPriceSource {
        HttpPriceSource::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn joins_operation_path_onto_root() {
        let url = source("http://localhost:8000").url(&["products"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/products");
    }

    #[test]
    fn keeps_base_path_prefix_with_or_without_trailing_slash() {
        for base in ["http://h/api", "http://h/api/"] {
            let url = source(base).url(&["cities"]).unwrap();
            assert_eq!(url.as_str(), "http://h/api/cities");
        }
    }

    #[test]
    fn percent_encodes_city_segment() {
        let url = source("http://localhost:8000")
            .url(&["price-data", "10", "BOGOTÁ, D.C."])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/price-data/10/BOGOT%C3%81,%20D.C."
        );
    }

    #[test]
    fn slash_in_city_does_not_add_a_segment() {
        let url = source("http://h").url(&["price-data", "1", "A/B"]).unwrap();
        assert_eq!(url.path(), "/price-data/1/A%2FB");
    }

    #[test]
    fn long_bodies_are_cut_in_errors() {
        let body = "é".repeat(BODY_EXCERPT_CHARS + 50);
        let cut = excerpt(&body);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), BODY_EXCERPT_CHARS + 3);
        assert_eq!(excerpt("short"), "short");
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(HttpPriceSource::new("not a url", Duration::from_secs(1)).is_err());
        assert!(HttpPriceSource::new("mailto:x@example.com", Duration::from_secs(1)).is_err());
    }
}
