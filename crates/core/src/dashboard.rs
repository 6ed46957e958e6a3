//! View models that combine the repository with the derived metrics.

use crate::catalog::{Catalog, ProductProfile};
use crate::domain::{CityName, CityPrice, PricePoint, Product, Recommendation};
use crate::metrics::{
    self, CityDifference, PriceVariation, PurchaseAdvice, SeasonalRow, Sentiment, TrendLabel,
    YearlyVariation,
};
use crate::repository::PriceRepository;
use crate::session::{LatestSlot, RequestToken};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// City used by the product detail view when none is given.
pub const DEFAULT_CITY: &str = "BOGOTÁ, D.C.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub product: Product,
    pub city: CityName,
}

/// A price series fetch detached from the dashboard, so several can be in
/// flight at once.
#[derive(Debug, Clone)]
pub struct SeriesRequest {
    token: RequestToken,
    selection: Selection,
    repo: PriceRepository,
}

#[derive(Debug, Clone)]
pub struct SeriesResponse {
    token: RequestToken,
    selection: Selection,
    series: Vec<PricePoint>,
}

impl SeriesRequest {
    pub fn token(&self) -> RequestToken {
        self.token
    }

    pub async fn fetch(self) -> SeriesResponse {
        let series = self
            .repo
            .price_series(self.selection.product.id, &self.selection.city)
            .await;
        SeriesResponse {
            token: self.token,
            selection: self.selection,
            series,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationView {
    #[serde(flatten)]
    pub recommendation: Recommendation,
    pub trend_label: TrendLabel,
    pub sentiment: Sentiment,
}

impl From<Recommendation> for RecommendationView {
    fn from(recommendation: Recommendation) -> Self {
        Self {
            trend_label: recommendation.trend.into(),
            sentiment: recommendation.recommendation.into(),
            recommendation,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub product: Product,
    pub city: CityName,
    pub current_price: Option<f64>,
    pub variation: PriceVariation,
    pub trend: TrendLabel,
    pub advice: PurchaseAdvice,
    pub series: Vec<PricePoint>,
    pub recommendations: Vec<RecommendationView>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct Dashboard {
    repo: PriceRepository,
    products: Vec<Product>,
    cities: Vec<CityName>,
    recommendations: Vec<Recommendation>,
    selection: Option<Selection>,
    series: LatestSlot<(Selection, Vec<PricePoint>)>,
}

impl Dashboard {
    pub fn new(repo: PriceRepository) -> Self {
        Self {
            repo,
            products: Vec::new(),
            cities: Vec::new(),
            recommendations: Vec::new(),
            selection: None,
            series: LatestSlot::new(),
        }
    }

    /// Loads the reference lists concurrently and selects the first product
    /// and city, if any.
    pub async fn load_initial(&mut self) {
        let (products, cities, recommendations) = tokio::join!(
            self.repo.products(),
            self.repo.cities(),
            self.repo.recommendations()
        );

        tracing::info!(
            mode = ?self.repo.mode(),
            products = products.len(),
            cities = cities.len(),
            recommendations = recommendations.len(),
            "dashboard data loaded"
        );

        self.selection = match (products.first(), cities.first()) {
            (Some(product), Some(city)) => Some(Selection {
                product: product.clone(),
                city: city.clone(),
            }),
            _ => None,
        };
        self.products = products;
        self.cities = cities;
        self.recommendations = recommendations;
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn cities(&self) -> &[CityName] {
        &self.cities
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn is_loading_series(&self) -> bool {
        self.series.is_pending()
    }

    /// Changes the selection and issues a series fetch for it. An unknown
    /// product id leaves the selection untouched. `city` defaults to the
    /// current one.
    pub fn begin_selection(
        &mut self,
        product_id: i64,
        city: Option<&str>,
    ) -> Option<SeriesRequest> {
        let product = self.products.iter().find(|p| p.id == product_id)?.clone();
        let city = match city {
            Some(c) => c.to_string(),
            None => self.selection.as_ref()?.city.clone(),
        };
        let selection = Selection { product, city };
        self.selection = Some(selection.clone());
        Some(self.issue(selection))
    }

    /// Re-issues a fetch for the current selection.
    pub fn begin_refresh(&mut self) -> Option<SeriesRequest> {
        let selection = self.selection.clone()?;
        Some(self.issue(selection))
    }

    fn issue(&mut self, selection: Selection) -> SeriesRequest {
        SeriesRequest {
            token: self.series.issue(),
            selection,
            repo: self.repo.clone(),
        }
    }

    /// Applies a finished fetch. Responses to superseded requests are dropped.
    pub fn finish_selection(&mut self, response: SeriesResponse) -> bool {
        self.series
            .resolve(response.token, (response.selection, response.series))
    }

    /// Convenience for sequential callers.
    pub async fn select(&mut self, product_id: i64, city: Option<&str>) -> bool {
        match self.begin_selection(product_id, city) {
            Some(req) => {
                let res = req.fetch().await;
                self.finish_selection(res)
            }
            None => false,
        }
    }

    pub async fn refresh(&mut self) -> bool {
        match self.begin_refresh() {
            Some(req) => {
                let res = req.fetch().await;
                self.finish_selection(res)
            }
            None => false,
        }
    }

    /// Display-ready statistics for the last accepted series.
    pub fn summary(&self) -> Option<DashboardSummary> {
        let (selection, series) = self.series.current()?;
        let trend = metrics::classify_trend(series);

        Some(DashboardSummary {
            product: selection.product.clone(),
            city: selection.city.clone(),
            current_price: metrics::current_price(series),
            variation: metrics::price_variation(series),
            trend,
            advice: metrics::recommendation_from_trend(trend),
            series: series.clone(),
            recommendations: self
                .recommendations
                .iter()
                .cloned()
                .map(RecommendationView::from)
                .collect(),
            generated_at: Utc::now(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInsight {
    pub product: Product,
    pub city: CityName,
    pub profile: Option<ProductProfile>,
    pub current_price: Option<f64>,
    pub trend: TrendLabel,
    pub advice: PurchaseAdvice,
    pub series: Vec<PricePoint>,
    pub yearly_variation: PriceVariation,
    pub yearly: Vec<YearlyVariation>,
    pub best_city: Option<CityPrice>,
    pub city_differences: Vec<CityDifference>,
    pub seasonality: Vec<SeasonalRow>,
    pub generated_at: DateTime<Utc>,
}

/// Builds the product detail view. `None` when `product_id` is not in the
/// product list.
pub async fn product_insight(
    repo: &PriceRepository,
    catalog: &Catalog,
    product_id: i64,
    city: Option<&str>,
) -> Option<ProductInsight> {
    let products = repo.products().await;
    let Some(product) = products.into_iter().find(|p| p.id == product_id) else {
        tracing::info!(product_id, "product not found");
        return None;
    };
    let city = city.unwrap_or(DEFAULT_CITY).to_string();

    let (series, detail) = tokio::join!(
        repo.price_series(product.id, &city),
        repo.product_detail(product.id)
    );

    let trend = metrics::classify_recent_trend(&series);

    Some(ProductInsight {
        profile: catalog.profile(product.id).copied(),
        current_price: metrics::current_price(&series),
        trend,
        advice: metrics::recommendation_from_trend(trend),
        yearly_variation: metrics::latest_yearly_variation(&detail.historical_data),
        yearly: metrics::yearly_variations(&detail.historical_data),
        best_city: metrics::best_city(&detail.city_price_data).cloned(),
        city_differences: metrics::average_difference(&detail.city_price_data),
        seasonality: metrics::seasonality_table(&detail.seasonality_data),
        series,
        product,
        city,
        generated_at: Utc::now(),
    })
}
