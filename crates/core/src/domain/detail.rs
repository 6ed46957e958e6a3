use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyPrice {
    pub year: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityPrice {
    pub city: String,
    pub price: f64,
}

/// Monthly price relative to the yearly average (100 = average).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityIndex {
    pub month: String,
    pub index: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    /// Oldest year first.
    pub historical_data: Vec<YearlyPrice>,
    /// Order carries no meaning.
    pub city_price_data: Vec<CityPrice>,
    pub seasonality_data: Vec<SeasonalityIndex>,
}
