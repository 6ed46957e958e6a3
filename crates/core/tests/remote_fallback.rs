use std::sync::Arc;
use std::time::{Duration, Instant};

use agroprecios_core::fallback;
use agroprecios_core::repository::PriceRepository;
use agroprecios_core::source::{HttpPriceSource, PriceDataSource};
use axum::{extract::Path, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn repo(base_url: &str) -> PriceRepository {
    let source = HttpPriceSource::new(base_url, Duration::from_secs(5)).unwrap();
    PriceRepository::remote(Arc::new(source))
}

fn stub_backend() -> Router {
    Router::new()
        .route(
            "/products",
            get(|| async { Json(json!([{"id": 0, "name": "Arveja verde"}])) }),
        )
        .route(
            "/cities",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Data not loaded properly") }),
        )
        .route(
            "/price-data/:product_id/:city",
            get(|Path((product_id, city)): Path<(i64, String)>| async move {
                Json(json!([
                    {"month": format!("{product_id}"), "price": 100.0, "inflation": 0.0},
                    {"month": city, "price": 110.0, "inflation": 10.0}
                ]))
            }),
        )
        .route("/recommendations", get(|| async { "<html>not json</html>" }))
        .route(
            "/product-detail/:product_id",
            get(|| async {
                Json(json!({
                    "historicalData": [],
                    "cityPriceData": [],
                    "seasonalityData": []
                }))
            }),
        )
}

#[tokio::test]
async fn decodes_successful_responses() {
    let base = serve(stub_backend()).await;
    let repo = repo(&base);

    let products = repo.products().await;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Arveja verde");
}

#[tokio::test]
async fn city_round_trips_through_the_path() {
    let base = serve(stub_backend()).await;
    let series = repo(&base).price_series(10, "BOGOTÁ, D.C.").await;

    assert_eq!(series.len(), 2);
    assert_eq!(series[0].period, "10");
    assert_eq!(series[1].period, "BOGOTÁ, D.C.");
}

#[tokio::test]
async fn non_success_status_serves_fallback() {
    let base = serve(stub_backend()).await;
    assert_eq!(repo(&base).cities().await, fallback::cities());
}

#[tokio::test]
async fn undecodable_body_serves_fallback() {
    let base = serve(stub_backend()).await;
    assert_eq!(
        repo(&base).recommendations().await,
        fallback::recommendations()
    );
}

#[tokio::test]
async fn empty_bundle_is_returned_as_is() {
    let base = serve(stub_backend()).await;
    let detail = repo(&base).product_detail(3).await;
    assert!(detail.historical_data.is_empty());
    assert!(detail.city_price_data.is_empty());
}

#[tokio::test]
async fn unreachable_backend_serves_fallback_everywhere() {
    let repo = repo("http://127.0.0.1:1");

    assert_eq!(repo.products().await, fallback::products());
    assert_eq!(repo.cities().await, fallback::cities());
    assert_eq!(repo.price_series(10, "CALI").await, fallback::price_series());
    assert_eq!(repo.recommendations().await, fallback::recommendations());
    assert_eq!(repo.product_detail(10).await, fallback::product_detail());
}

#[tokio::test]
async fn source_reports_failures_it_does_not_mask() {
    let base = serve(stub_backend()).await;
    let source = HttpPriceSource::new(&base, Duration::from_secs(5)).unwrap();

    let err = source.fetch_cities().await.unwrap_err();
    assert!(err.to_string().contains("stage=status"), "{err}");

    let err = source.fetch_recommendations().await.unwrap_err();
    assert!(err.to_string().contains("stage=decode"), "{err}");
}

#[tokio::test]
async fn missing_route_status_serves_fallback() {
    let base = serve(Router::new().route("/", get(|| async { Json(Value::Null) }))).await;
    let repo = repo(&base);
    assert_eq!(repo.price_series(1, "TUNJA").await, fallback::price_series());
    assert_eq!(repo.products().await, fallback::products());
}

#[tokio::test]
async fn slow_backend_times_out_to_fallback() {
    let app = Router::new().route(
        "/products",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!([{"id": 1, "name": "Tarde"}]))
        }),
    );
    let base = serve(app).await;
    let timeout = Duration::from_millis(300);
    let source = HttpPriceSource::new(&base, timeout).unwrap();
    let repo = PriceRepository::remote(Arc::new(source));

    let started = Instant::now();
    let products = repo.products().await;
    let elapsed = started.elapsed();

    assert_eq!(products, fallback::products());
    assert!(elapsed >= timeout, "returned before the timeout: {elapsed:?}");
    assert!(elapsed < Duration::from_secs(2), "timeout not applied: {elapsed:?}");
}
