//! Bundled dataset served in mock mode and whenever a remote fetch fails.

use crate::domain::{
    Advice, CityName, CityPrice, PricePoint, Product, ProductDetail, Recommendation,
    SeasonalityIndex, Trend, YearlyPrice,
};

const PRODUCTS: [(i64, &str); 6] = [
    (10, "Tomate"),
    (12, "Aguacate"),
    (30, "Papa criolla"),
    (13, "Banano"),
    (18, "Limón Tahití"),
    (3, "Cebolla cabezona blanca"),
];

const CITIES: [&str; 11] = [
    "BOGOTÁ, D.C.",
    "MEDELLÍN",
    "CALI",
    "BARRANQUILLA",
    "CARTAGENA DE INDIAS",
    "BUCARAMANGA",
    "PEREIRA",
    "ARMENIA",
    "CÚCUTA",
    "IBAGUÉ",
    "TUNJA",
];

const PRICE_SERIES: [(&str, f64, f64); 12] = [
    ("Ene", 2500.0, 1.2),
    ("Feb", 2530.0, 1.3),
    ("Mar", 2600.0, 2.1),
    ("Abr", 2650.0, 1.8),
    ("May", 2580.0, -0.9),
    ("Jun", 2610.0, 0.5),
    ("Jul", 2720.0, 3.2),
    ("Ago", 2750.0, 1.1),
    ("Sep", 2800.0, 1.7),
    ("Oct", 2840.0, 1.4),
    ("Nov", 2920.0, 2.6),
    ("Dic", 3050.0, 4.1),
];

const HISTORICAL: [(&str, f64); 6] = [
    ("2020", 2100.0),
    ("2021", 2330.0),
    ("2022", 2450.0),
    ("2023", 2780.0),
    ("2024", 2920.0),
    ("2025", 3050.0),
];

const CITY_PRICES: [(&str, f64); 7] = [
    ("BOGOTÁ, D.C.", 3050.0),
    ("MEDELLÍN", 2950.0),
    ("CALI", 3120.0),
    ("BUCARAMANGA", 3210.0),
    ("BARRANQUILLA", 3320.0),
    ("PEREIRA", 2800.0),
    ("CARTAGENA DE INDIAS", 3400.0),
];

const SEASONALITY: [(&str, f64); 12] = [
    ("Ene", 95.0),
    ("Feb", 97.0),
    ("Mar", 100.0),
    ("Abr", 103.0),
    ("May", 108.0),
    ("Jun", 105.0),
    ("Jul", 102.0),
    ("Ago", 98.0),
    ("Sep", 97.0),
    ("Oct", 94.0),
    ("Nov", 95.0),
    ("Dic", 98.0),
];

pub fn products() -> Vec<Product> {
    PRODUCTS
        .iter()
        .map(|(id, name)| Product {
            id: *id,
            name: name.to_string(),
        })
        .collect()
}

pub fn cities() -> Vec<CityName> {
    CITIES.iter().map(|c| c.to_string()).collect()
}

/// The same 12-month series is served for every product/city pair.
pub fn price_series() -> Vec<PricePoint> {
    PRICE_SERIES
        .iter()
        .map(|(month, price, inflation)| PricePoint::new(*month, *price, Some(*inflation)))
        .collect()
}

pub fn recommendations() -> Vec<Recommendation> {
    vec![
        Recommendation {
            id: 1,
            product: "Tomate".to_string(),
            current_price: 3050.0,
            trend: Trend::Baja,
            recommendation: Advice::Comprar,
            reason: "Se proyecta una caída del 5% en las próximas dos semanas debido a la nueva cosecha.".to_string(),
        },
        Recommendation {
            id: 2,
            product: "Aguacate".to_string(),
            current_price: 5200.0,
            trend: Trend::Alza,
            recommendation: Advice::Esperar,
            reason: "Precios altos debido a factores estacionales. Se recomienda esperar o considerar alternativas.".to_string(),
        },
        Recommendation {
            id: 3,
            product: "Cebolla".to_string(),
            current_price: 1850.0,
            trend: Trend::Estable,
            recommendation: Advice::Neutral,
            reason: "El precio se mantiene estable. No hay ventaja en esperar para la compra.".to_string(),
        },
    ]
}

pub fn product_detail() -> ProductDetail {
    ProductDetail {
        historical_data: HISTORICAL
            .iter()
            .map(|(year, price)| YearlyPrice {
                year: year.to_string(),
                price: *price,
            })
            .collect(),
        city_price_data: CITY_PRICES
            .iter()
            .map(|(city, price)| CityPrice {
                city: city.to_string(),
                price: *price,
            })
            .collect(),
        seasonality_data: SEASONALITY
            .iter()
            .map(|(month, index)| SeasonalityIndex {
                month: month.to_string(),
                index: *index,
            })
            .collect(),
    }
}
