//! Data access layer. Every operation resolves to data: remote failures are
//! logged and replaced by the bundled fallback dataset.

use crate::config::{DataMode, Settings};
use crate::domain::{CityName, PricePoint, Product, ProductDetail, Recommendation};
use crate::fallback;
use crate::source::{HttpPriceSource, PriceDataSource};
use std::sync::Arc;
use std::time::Duration;

const PRODUCTS_LATENCY: Duration = Duration::from_millis(300);
const CITIES_LATENCY: Duration = Duration::from_millis(300);
const PRICE_SERIES_LATENCY: Duration = Duration::from_millis(500);
const RECOMMENDATIONS_LATENCY: Duration = Duration::from_millis(700);
const PRODUCT_DETAIL_LATENCY: Duration = Duration::from_millis(500);

#[derive(Clone)]
enum Backend {
    Mock { latency: Option<Duration> },
    Remote(Arc<dyn PriceDataSource>),
}

#[derive(Clone)]
pub struct PriceRepository {
    backend: Backend,
}

impl std::fmt::Debug for PriceRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source = match &self.backend {
            Backend::Mock { .. } => "bundled",
            Backend::Remote(source) => source.source_name(),
        };
        f.debug_struct("PriceRepository")
            .field("mode", &self.mode())
            .field("source", &source)
            .finish()
    }
}

impl PriceRepository {
    /// Serves the bundled dataset. `latency` replaces the per-operation
    /// simulated delays when set.
    pub fn mock(latency: Option<Duration>) -> Self {
        Self {
            backend: Backend::Mock { latency },
        }
    }

    pub fn remote(source: Arc<dyn PriceDataSource>) -> Self {
        Self {
            backend: Backend::Remote(source),
        }
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Self::with_mode(settings.data_mode, settings)
    }

    pub fn with_mode(mode: DataMode, settings: &Settings) -> anyhow::Result<Self> {
        Ok(match mode {
            DataMode::Mock => Self::mock(settings.mock_latency),
            DataMode::Remote => Self::remote(Arc::new(HttpPriceSource::from_settings(settings)?)),
        })
    }

    pub fn mode(&self) -> DataMode {
        match self.backend {
            Backend::Mock { .. } => DataMode::Mock,
            Backend::Remote(_) => DataMode::Remote,
        }
    }

    pub async fn products(&self) -> Vec<Product> {
        match &self.backend {
            Backend::Mock { latency } => {
                simulate_latency(latency.unwrap_or(PRODUCTS_LATENCY)).await;
                fallback::products()
            }
            Backend::Remote(source) => {
                or_fallback("products", source.fetch_products().await, fallback::products)
            }
        }
    }

    pub async fn cities(&self) -> Vec<CityName> {
        match &self.backend {
            Backend::Mock { latency } => {
                simulate_latency(latency.unwrap_or(CITIES_LATENCY)).await;
                fallback::cities()
            }
            Backend::Remote(source) => {
                or_fallback("cities", source.fetch_cities().await, fallback::cities)
            }
        }
    }

    /// `city` is passed through as-is; it is not checked against [`Self::cities`].
    pub async fn price_series(&self, product_id: i64, city: &str) -> Vec<PricePoint> {
        match &self.backend {
            Backend::Mock { latency } => {
                tracing::debug!(product_id, city, "serving bundled price series");
                simulate_latency(latency.unwrap_or(PRICE_SERIES_LATENCY)).await;
                fallback::price_series()
            }
            Backend::Remote(source) => match source.fetch_price_series(product_id, city).await {
                Ok(series) => series,
                Err(err) => {
                    tracing::warn!(
                        operation = "price_series",
                        product_id,
                        city,
                        error = %err,
                        "remote fetch failed; serving fallback dataset"
                    );
                    fallback::price_series()
                }
            },
        }
    }

    pub async fn recommendations(&self) -> Vec<Recommendation> {
        match &self.backend {
            Backend::Mock { latency } => {
                simulate_latency(latency.unwrap_or(RECOMMENDATIONS_LATENCY)).await;
                fallback::recommendations()
            }
            Backend::Remote(source) => or_fallback(
                "recommendations",
                source.fetch_recommendations().await,
                fallback::recommendations,
            ),
        }
    }

    pub async fn product_detail(&self, product_id: i64) -> ProductDetail {
        match &self.backend {
            Backend::Mock { latency } => {
                simulate_latency(latency.unwrap_or(PRODUCT_DETAIL_LATENCY)).await;
                fallback::product_detail()
            }
            Backend::Remote(source) => match source.fetch_product_detail(product_id).await {
                Ok(detail) => detail,
                Err(err) => {
                    tracing::warn!(
                        operation = "product_detail",
                        product_id,
                        error = %err,
                        "remote fetch failed; serving fallback dataset"
                    );
                    fallback::product_detail()
                }
            },
        }
    }
}

async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

fn or_fallback<T>(operation: &'static str, res: anyhow::Result<T>, fallback: fn() -> T) -> T {
    match res {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(operation, error = %err, "remote fetch failed; serving fallback dataset");
            fallback()
        }
    }
}
