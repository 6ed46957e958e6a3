pub mod detail;
pub mod product;
pub mod recommendation;

pub use detail::{CityPrice, ProductDetail, SeasonalityIndex, YearlyPrice};
pub use product::{CityName, PricePoint, Product};
pub use recommendation::{Advice, Recommendation, Trend};
