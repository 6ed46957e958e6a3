//! Static product reference data used by the catalog view: a reference price,
//! a coarse trend and a category per product id.

use crate::domain::Product;
use crate::metrics::TrendLabel;
use serde::Serialize;
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Fruits,
    Vegetables,
    Grains,
    Dairy,
    Meat,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Fruits,
        Category::Vegetables,
        Category::Grains,
        Category::Dairy,
        Category::Meat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fruits => "fruits",
            Category::Vegetables => "vegetables",
            Category::Grains => "grains",
            Category::Dairy => "dairy",
            Category::Meat => "meat",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Fruits => "Frutas",
            Category::Vegetables => "Verduras",
            Category::Grains => "Granos",
            Category::Dairy => "Lácteos",
            Category::Meat => "Carnes",
        }
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let needle = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| anyhow::anyhow!("unknown category: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductProfile {
    pub reference_price: f64,
    pub trend: TrendLabel,
    pub category: Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceSort {
    #[default]
    None,
    PriceAsc,
    PriceDesc,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    pub search: String,
    /// `None` matches every product.
    pub category: Option<Category>,
    pub sort: PriceSort,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub product: Product,
    pub profile: Option<ProductProfile>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    profiles: HashMap<i64, ProductProfile>,
}

impl Catalog {
    pub fn new(profiles: HashMap<i64, ProductProfile>) -> Self {
        Self { profiles }
    }

    /// Profiles for the bundled product list.
    pub fn bundled() -> Self {
        let rows = [
            (10, 2500.0, TrendLabel::Rising, Category::Vegetables),
            (12, 5200.0, TrendLabel::Falling, Category::Fruits),
            (30, 1800.0, TrendLabel::Stable, Category::Vegetables),
            (13, 2100.0, TrendLabel::Rising, Category::Fruits),
            (18, 3500.0, TrendLabel::Falling, Category::Fruits),
            (3, 1500.0, TrendLabel::Stable, Category::Vegetables),
        ];
        let profiles = rows
            .into_iter()
            .map(|(id, reference_price, trend, category)| {
                (
                    id,
                    ProductProfile {
                        reference_price,
                        trend,
                        category,
                    },
                )
            })
            .collect();
        Self { profiles }
    }

    pub fn profile(&self, product_id: i64) -> Option<&ProductProfile> {
        self.profiles.get(&product_id)
    }

    /// Filters by case-insensitive name substring and category, then sorts by
    /// reference price. Products without a profile sort as price 0 and never
    /// match a specific category. Sorting is stable.
    pub fn query(&self, products: &[Product], query: &CatalogQuery) -> Vec<CatalogEntry> {
        let needle = query.search.to_lowercase();

        let mut out: Vec<CatalogEntry> = products
            .iter()
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .filter(|p| match query.category {
                None => true,
                Some(category) => self.profile(p.id).is_some_and(|pr| pr.category == category),
            })
            .map(|p| CatalogEntry {
                product: p.clone(),
                profile: self.profile(p.id).copied(),
            })
            .collect();

        let price = |e: &CatalogEntry| e.profile.map(|p| p.reference_price).unwrap_or(0.0);
        match query.sort {
            PriceSort::None => {}
            PriceSort::PriceAsc => out.sort_by(|a, b| price(a).total_cmp(&price(b))),
            PriceSort::PriceDesc => out.sort_by(|a, b| price(b).total_cmp(&price(a))),
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback;

    fn ids(entries: &[CatalogEntry]) -> Vec<i64> {
        entries.iter().map(|e| e.product.id).collect()
    }

    #[test]
    fn empty_query_keeps_input_order() {
        let catalog = Catalog::bundled();
        let products = fallback::products();
        let out = catalog.query(&products, &CatalogQuery::default());
        assert_eq!(ids(&out), vec![10, 12, 30, 13, 18, 3]);
    }

    #[test]
    fn search_is_case_insensitive_and_accent_aware() {
        let catalog = Catalog::bundled();
        let products = fallback::products();
        let query = CatalogQuery {
            search: "LIMÓN".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&catalog.query(&products, &query)), vec![18]);

        let query = CatalogQuery {
            search: "pa".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&catalog.query(&products, &query)), vec![30]);
    }

    #[test]
    fn search_is_not_trimmed() {
        let catalog = Catalog::bundled();
        let products = fallback::products();
        let query = CatalogQuery {
            search: " tomate".to_string(),
            ..Default::default()
        };
        assert!(catalog.query(&products, &query).is_empty());
    }

    #[test]
    fn category_filter_and_price_sort() {
        let catalog = Catalog::bundled();
        let products = fallback::products();
        let query = CatalogQuery {
            category: Some(Category::Fruits),
            sort: PriceSort::PriceDesc,
            ..Default::default()
        };
        assert_eq!(ids(&catalog.query(&products, &query)), vec![12, 18, 13]);

        let query = CatalogQuery {
            sort: PriceSort::PriceAsc,
            ..Default::default()
        };
        assert_eq!(ids(&catalog.query(&products, &query)), vec![3, 30, 13, 10, 18, 12]);
    }

    #[test]
    fn unknown_products_sort_as_zero_and_skip_categories() {
        let catalog = Catalog::bundled();
        let mut products = fallback::products();
        products.push(Product {
            id: 99,
            name: "Mango".to_string(),
        });

        let asc = catalog.query(
            &products,
            &CatalogQuery {
                sort: PriceSort::PriceAsc,
                ..Default::default()
            },
        );
        assert_eq!(asc[0].product.id, 99);
        assert!(asc[0].profile.is_none());

        let fruits = catalog.query(
            &products,
            &CatalogQuery {
                category: Some(Category::Fruits),
                ..Default::default()
            },
        );
        assert!(!ids(&fruits).contains(&99));
    }

    #[test]
    fn parses_category_names() {
        assert_eq!("Fruits".parse::<Category>().unwrap(), Category::Fruits);
        assert!("candy".parse::<Category>().is_err());
        assert_eq!(Category::Dairy.display_name(), "Lácteos");
    }
}
