use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
}

/// City names are opaque labels; they are never checked against a known list.
pub type CityName = String;

/// One observation of a price series. Series are ordered oldest to newest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    #[serde(rename = "month", alias = "period")]
    pub period: String,
    /// Currency units per kg.
    pub price: f64,
    /// Period inflation in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inflation: Option<f64>,
}

impl PricePoint {
    pub fn new(period: impl Into<String>, price: f64, inflation: Option<f64>) -> Self {
        Self {
            period: period.into(),
            price,
            inflation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn price_point_uses_month_on_the_wire() {
        let p: PricePoint =
            serde_json::from_value(json!({"month": "Ene", "price": 2500, "inflation": 1.2}))
                .unwrap();
        assert_eq!(p.period, "Ene");
        assert_eq!(p.price, 2500.0);
        assert_eq!(p.inflation, Some(1.2));

        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["month"], "Ene");
    }

    #[test]
    fn price_point_accepts_period_alias_and_missing_inflation() {
        let p: PricePoint =
            serde_json::from_value(json!({"period": "2025-01", "price": 10.5})).unwrap();
        assert_eq!(p.period, "2025-01");
        assert!(p.inflation.is_none());
    }

    #[test]
    fn rejects_non_numeric_price() {
        let res = serde_json::from_value::<PricePoint>(json!({"month": "Ene", "price": "2500"}));
        assert!(res.is_err());
    }
}
