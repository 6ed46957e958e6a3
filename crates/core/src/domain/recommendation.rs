use serde::{Deserialize, Serialize};

/// Price direction as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Alza,
    Baja,
    Estable,
}

/// Purchase advice as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Advice {
    Comprar,
    Esperar,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: i64,
    pub product: String,
    pub current_price: f64,
    pub trend: Trend,
    pub recommendation: Advice,
    /// Free text supplied by the backend; never derived locally.
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_backend_shape() {
        let r: Recommendation = serde_json::from_value(json!({
            "id": 2,
            "product": "Aguacate",
            "currentPrice": 5200,
            "trend": "alza",
            "recommendation": "esperar",
            "reason": "Precios altos."
        }))
        .unwrap();
        assert_eq!(r.trend, Trend::Alza);
        assert_eq!(r.recommendation, Advice::Esperar);
        assert_eq!(r.current_price, 5200.0);
    }

    #[test]
    fn rejects_unknown_trend() {
        let res = serde_json::from_value::<Recommendation>(json!({
            "id": 1,
            "product": "Tomate",
            "currentPrice": 3050,
            "trend": "up",
            "recommendation": "comprar",
            "reason": ""
        }));
        assert!(res.is_err());
    }
}
