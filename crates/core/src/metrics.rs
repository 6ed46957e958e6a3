//! Pure derived statistics for the dashboard views. Every function accepts
//! empty or undersized input and answers with a sentinel instead of failing.

use crate::domain::{Advice, CityPrice, PricePoint, SeasonalityIndex, Trend, YearlyPrice};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

const NOT_AVAILABLE: &str = "N/A";

// Seasonality index bounds around the yearly average (100).
const SEASON_LOW_BELOW: f64 = 98.0;
const SEASON_HIGH_ABOVE: f64 = 102.0;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Percentage change from `from` to `to`, one decimal. `None` when the base
/// is zero or either side is not finite.
pub fn change_percent(from: f64, to: f64) -> Option<f64> {
    if from == 0.0 || !from.is_finite() || !to.is_finite() {
        return None;
    }
    let pct = round1((to / from - 1.0) * 100.0);
    pct.is_finite().then_some(pct)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceVariation {
    NotAvailable,
    Change { percent: f64, is_increase: bool },
}

impl PriceVariation {
    pub fn percent(&self) -> Option<f64> {
        match self {
            PriceVariation::NotAvailable => None,
            PriceVariation::Change { percent, .. } => Some(*percent),
        }
    }

    pub fn is_increase(&self) -> bool {
        matches!(
            self,
            PriceVariation::Change {
                is_increase: true,
                ..
            }
        )
    }

    /// `"10.0"` style label, or `"N/A"`.
    pub fn label(&self) -> String {
        match self {
            PriceVariation::NotAvailable => NOT_AVAILABLE.to_string(),
            PriceVariation::Change { percent, .. } => format!("{percent:.1}"),
        }
    }
}

impl Serialize for PriceVariation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("PriceVariation", 2)?;
        s.serialize_field("percent", &self.label())?;
        s.serialize_field("isIncrease", &self.is_increase())?;
        s.end()
    }
}

pub fn current_price(series: &[PricePoint]) -> Option<f64> {
    series.last().map(|p| p.price)
}

/// Change between the first and last point of the series.
/// A zero first price yields [`PriceVariation::NotAvailable`].
pub fn price_variation(series: &[PricePoint]) -> PriceVariation {
    let (first, last) = match series {
        [first, .., last] => (first, last),
        _ => return PriceVariation::NotAvailable,
    };

    match change_percent(first.price, last.price) {
        Some(percent) => PriceVariation::Change {
            percent,
            is_increase: percent > 0.0,
        },
        None => PriceVariation::NotAvailable,
    }
}

/// A rising price is bad news for the buyer; a falling one is good news.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrendLabel {
    #[serde(rename = "rising")]
    Rising,
    #[serde(rename = "falling")]
    Falling,
    #[serde(rename = "stable")]
    Stable,
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl TrendLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendLabel::Rising => "rising",
            TrendLabel::Falling => "falling",
            TrendLabel::Stable => "stable",
            TrendLabel::NotAvailable => NOT_AVAILABLE,
        }
    }

    pub fn sentiment(&self) -> Sentiment {
        match self {
            TrendLabel::Rising => Sentiment::Unfavorable,
            TrendLabel::Falling => Sentiment::Favorable,
            TrendLabel::Stable | TrendLabel::NotAvailable => Sentiment::Neutral,
        }
    }
}

impl From<Trend> for TrendLabel {
    fn from(trend: Trend) -> Self {
        match trend {
            Trend::Alza => TrendLabel::Rising,
            Trend::Baja => TrendLabel::Falling,
            Trend::Estable => TrendLabel::Stable,
        }
    }
}

/// Compares the two most recent points. Needs at least three points.
pub fn classify_trend(series: &[PricePoint]) -> TrendLabel {
    if series.len() < 3 {
        return TrendLabel::NotAvailable;
    }
    compare_last_two(series)
}

/// Trend for the product detail view, which only needs two points.
pub fn classify_recent_trend(series: &[PricePoint]) -> TrendLabel {
    if series.len() < 2 {
        return TrendLabel::NotAvailable;
    }
    compare_last_two(series)
}

fn compare_last_two(series: &[PricePoint]) -> TrendLabel {
    let last = series[series.len() - 1].price;
    let prev = series[series.len() - 2].price;

    if last > prev {
        TrendLabel::Rising
    } else if last < prev {
        TrendLabel::Falling
    } else {
        TrendLabel::Stable
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Favorable,
    Unfavorable,
    Neutral,
}

impl From<Advice> for Sentiment {
    fn from(advice: Advice) -> Self {
        match advice {
            Advice::Comprar => Sentiment::Favorable,
            Advice::Esperar => Sentiment::Unfavorable,
            Advice::Neutral => Sentiment::Neutral,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PurchaseAdvice {
    pub text: &'static str,
    pub sentiment: Sentiment,
}

pub fn recommendation_from_trend(trend: TrendLabel) -> PurchaseAdvice {
    let text = match trend {
        TrendLabel::Rising => "Consider waiting",
        TrendLabel::Falling => "Good time to buy",
        TrendLabel::Stable | TrendLabel::NotAvailable => "No advantage in waiting",
    };
    PurchaseAdvice {
        text,
        sentiment: trend.sentiment(),
    }
}

/// Cheapest city; ties go to the earliest entry.
pub fn best_city(city_prices: &[CityPrice]) -> Option<&CityPrice> {
    let mut iter = city_prices.iter();
    let first = iter.next()?;
    Some(iter.fold(first, |best, c| if c.price < best.price { c } else { best }))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityDifference {
    pub city: String,
    pub price: f64,
    pub percent_diff_from_mean: f64,
    /// Below the mean, i.e. a good place to buy.
    pub favorable: bool,
}

/// Each city's distance from the mean price, in percent.
/// A zero mean reports every difference as `0.0`.
pub fn average_difference(city_prices: &[CityPrice]) -> Vec<CityDifference> {
    if city_prices.is_empty() {
        return Vec::new();
    }
    let mean = city_prices.iter().map(|c| c.price).sum::<f64>() / city_prices.len() as f64;

    city_prices
        .iter()
        .map(|c| CityDifference {
            city: c.city.clone(),
            price: c.price,
            percent_diff_from_mean: change_percent(mean, c.price).unwrap_or(0.0),
            favorable: c.price < mean,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyVariation {
    pub year: String,
    pub price: f64,
    /// Change against the previous year; absent for the first year.
    pub percent: Option<f64>,
}

pub fn yearly_variations(historical: &[YearlyPrice]) -> Vec<YearlyVariation> {
    let mut prev: Option<f64> = None;
    historical
        .iter()
        .map(|y| {
            let percent = prev.and_then(|p| change_percent(p, y.price));
            prev = Some(y.price);
            YearlyVariation {
                year: y.year.clone(),
                price: y.price,
                percent,
            }
        })
        .collect()
}

/// Last year against the one before it. A zero change counts as an increase.
pub fn latest_yearly_variation(historical: &[YearlyPrice]) -> PriceVariation {
    let [.., prev, last] = historical else {
        return PriceVariation::NotAvailable;
    };
    match change_percent(prev.price, last.price) {
        Some(percent) => PriceVariation::Change {
            percent,
            is_increase: percent >= 0.0,
        },
        None => PriceVariation::NotAvailable,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonLevel {
    Low,
    Normal,
    High,
}

impl SeasonLevel {
    pub fn action(&self) -> &'static str {
        match self {
            SeasonLevel::Low => "Buy in bulk",
            SeasonLevel::Normal => "Buy as usual",
            SeasonLevel::High => "Reduce consumption",
        }
    }
}

pub fn classify_season(index: f64) -> SeasonLevel {
    if index < SEASON_LOW_BELOW {
        SeasonLevel::Low
    } else if index > SEASON_HIGH_ABOVE {
        SeasonLevel::High
    } else {
        SeasonLevel::Normal
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalRow {
    pub month: String,
    pub index: f64,
    pub level: SeasonLevel,
    pub action: &'static str,
}

pub fn seasonality_table(data: &[SeasonalityIndex]) -> Vec<SeasonalRow> {
    data.iter()
        .map(|s| {
            let level = classify_season(s.index);
            SeasonalRow {
                month: s.month.clone(),
                index: s.index,
                level,
                action: level.action(),
            }
        })
        .collect()
}
