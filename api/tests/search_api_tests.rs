use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use dish_search::{DbCatalog, DEFAULT_TOP_N, Ranker};
use dish_search_api::{AppState, Config, connect, router};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app(seed_demo_data: bool) -> Router {
    let config = Config {
        database_url: "sqlite::memory:".to_owned(),
        host: "127.0.0.1".to_owned(),
        port: 0,
        top_n: DEFAULT_TOP_N,
        seed_demo_data,
    };
    let db = connect(&config).await.unwrap();
    router(AppState::new(Ranker::new(DbCatalog::new(db))))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn biryani_ranked_by_orders() {
    let (status, body) = get(
        app(true).await,
        "/search/dishes?name=biryani&minPrice=150&maxPrice=300",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let restaurants = body["restaurants"].as_array().unwrap();
    assert_eq!(restaurants.len(), 10);
    assert_eq!(
        restaurants[0],
        json!({
            "restaurantId": 1,
            "restaurantName": "Hyderabadi Spice House",
            "city": "Hyderabad",
            "dishName": "Chicken Biryani",
            "dishPrice": "220.00",
            "orderCount": 96,
        })
    );

    let counts: Vec<u64> = restaurants
        .iter()
        .map(|r| r["orderCount"].as_u64().unwrap())
        .collect();
    assert_eq!(counts, vec![96, 89, 88, 84, 82, 79, 78, 76, 73, 72]);

    let mumbai = restaurants
        .iter()
        .position(|r| r["restaurantName"] == "Mumbai Masala Kitchen")
        .unwrap();
    assert_eq!(restaurants[mumbai]["dishName"], "Chicken Biryani");
    assert_eq!(restaurants[mumbai]["dishPrice"], "200.00");
    assert!(mumbai > 0);
}

#[tokio::test]
async fn max_price_missing_is_bad_request() {
    let (status, body) = get(app(true).await, "/search/dishes?name=biryani&minPrice=150").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "error": "MissingField",
            "message": "Both minPrice and maxPrice are required",
        })
    );
}

#[tokio::test]
async fn both_prices_missing_is_bad_request() {
    let (status, body) = get(app(false).await, "/search/dishes?name=biryani").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "MissingField");
}

#[tokio::test]
async fn name_missing_is_bad_request() {
    let (status, body) = get(app(false).await, "/search/dishes?minPrice=1&maxPrice=2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Dish name (name) is required");
}

#[tokio::test]
async fn inverted_range_is_bad_request() {
    let (status, body) = get(
        app(false).await,
        "/search/dishes?name=biryani&minPrice=300&maxPrice=150",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidRange");
    assert_eq!(
        body["message"],
        "minPrice must be less than or equal to maxPrice"
    );
}

#[tokio::test]
async fn malformed_price_is_bad_request() {
    let (status, body) = get(
        app(false).await,
        "/search/dishes?name=biryani&minPrice=cheap&maxPrice=150",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidRange");
}

#[tokio::test]
async fn no_match_is_empty_list() {
    let (status, body) = get(
        app(true).await,
        "/search/dishes?name=pizza&minPrice=0&maxPrice=1000",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "restaurants": [] }));
}

#[tokio::test]
async fn empty_catalog_is_empty_list() {
    let (status, body) = get(
        app(false).await,
        "/search/dishes?name=biryani&minPrice=150&maxPrice=300",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "restaurants": [] }));
}

#[tokio::test]
async fn exact_price_band() {
    let (status, body) = get(
        app(true).await,
        "/search/dishes?name=chicken&minPrice=200&maxPrice=200",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["restaurants"],
        json!([{
            "restaurantId": 2,
            "restaurantName": "Mumbai Masala Kitchen",
            "city": "Mumbai",
            "dishName": "Chicken Biryani",
            "dishPrice": "200.00",
            "orderCount": 84,
        }])
    );
}

#[tokio::test]
async fn health_and_index() {
    let app = app(false).await;

    let (status, body) = get(app.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "OK" }));

    let (status, body) = get(app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["healthCheck"], "/health");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, body) = get(app(false).await, "/search/cakes").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NotFound");
}
