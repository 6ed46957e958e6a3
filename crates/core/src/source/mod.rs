pub mod http;

use crate::domain::{CityName, PricePoint, Product, ProductDetail, Recommendation};
use std::fmt;

pub use http::HttpPriceSource;

/// A remote origin for dashboard data. Implementations report every failure;
/// substituting fallback data is the repository's job.
#[async_trait::async_trait]
pub trait PriceDataSource: Send + Sync {
    fn source_name(&self) -> &'static str;

    async fn fetch_products(&self) -> anyhow::Result<Vec<Product>>;

    async fn fetch_cities(&self) -> anyhow::Result<Vec<CityName>>;

    async fn fetch_price_series(
        &self,
        product_id: i64,
        city: &str,
    ) -> anyhow::Result<Vec<PricePoint>>;

    async fn fetch_recommendations(&self) -> anyhow::Result<Vec<Recommendation>>;

    async fn fetch_product_detail(&self, product_id: i64) -> anyhow::Result<ProductDetail>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    Url,
    Transport,
    Status,
    Decode,
}

impl fmt::Display for FetchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FetchStage::Url => "url",
            FetchStage::Transport => "transport",
            FetchStage::Status => "status",
            FetchStage::Decode => "decode",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct FetchError {
    pub operation: &'static str,
    pub stage: FetchStage,
    pub detail: String,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fetch failed (operation={}, stage={}): {}",
            self.operation, self.stage, self.detail
        )
    }
}

impl std::error::Error for FetchError {}
