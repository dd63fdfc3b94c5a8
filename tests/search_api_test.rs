mod common;

use axum::http::Method;
use serde_json::json;

use common::{response_json, TestApp};

async fn seed(app: &TestApp) {
    for (name, slot) in [
        ("Hex bolt M8", 1),
        ("Carriage BOLT", 2),
        ("Pressure sensor", 3),
        ("Hydraulic pump", 4),
    ] {
        let response = app
            .request(
                Method::POST,
                "/api/v1/products",
                Some(json!({"name": name, "box_no": 1, "row_no": 1, "slot_no": slot})),
            )
            .await;
        assert_eq!(response.status(), 201);
    }
}

#[tokio::test]
async fn empty_query_without_category_returns_nothing() {
    let app = TestApp::new().await;
    seed(&app).await;

    for uri in ["/api/v1/search", "/api/v1/search?q=", "/api/v1/search?q=%20%20"] {
        let response = app.request(Method::GET, uri, None).await;
        assert_eq!(response.status(), 200);
        let body = response_json(response).await;
        assert_eq!(
            body["products"].as_array().unwrap().len(),
            0,
            "expected empty result for {uri}"
        );
    }
}

#[tokio::test]
async fn name_match_is_case_insensitive_substring() {
    let app = TestApp::new().await;
    seed(&app).await;

    let response = app.request(Method::GET, "/api/v1/search?q=bolt", None).await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    let names: Vec<&str> = body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Hex bolt M8"));
    assert!(names.contains(&"Carriage BOLT"));

    let response = app
        .request(Method::GET, "/api/v1/search?q=washer", None)
        .await;
    let body = response_json(response).await;
    assert_eq!(body["products"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn category_filter_uses_inference_for_unassigned_products() {
    let app = TestApp::new().await;
    seed(&app).await;

    // Resolve the seeded default category for sensors.
    let response = app.request(Method::GET, "/api/v1/categories", None).await;
    let body = response_json(response).await;
    let sensors = body["categories"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["slug"] == "sensors-control")
        .expect("default sensors category")["id"]
        .as_str()
        .unwrap()
        .to_string();

    // No explicit assignments exist, so inference decides membership.
    let response = app
        .request(
            Method::GET,
            &format!("/api/v1/search?category={sensors}"),
            None,
        )
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Pressure sensor");

    // Query and category combine.
    let response = app
        .request(
            Method::GET,
            &format!("/api/v1/search?q=bolt&category={sensors}"),
            None,
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(body["products"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn explicit_assignment_overrides_inference() {
    let app = TestApp::new().await;
    seed(&app).await;

    let response = app.request(Method::GET, "/api/v1/categories", None).await;
    let body = response_json(response).await;
    let categories = body["categories"].as_array().unwrap().clone();
    let find = |slug: &str| {
        categories
            .iter()
            .find(|c| c["slug"] == slug)
            .expect("default category")["id"]
            .as_str()
            .unwrap()
            .to_string()
    };
    let sensors = find("sensors-control");
    let tools = find("tools-equipment");

    // Assign "Pressure sensor" (inferred: sensors) explicitly to tools.
    let response = app.request(Method::GET, "/api/v1/search?q=sensor", None).await;
    let body = response_json(response).await;
    let product_id = body["products"][0]["id"].as_str().unwrap().to_string();

    app.state
        .services
        .categories
        .assign(
            product_id.parse().unwrap(),
            tools.parse().unwrap(),
        )
        .await
        .expect("assignment");

    // The assignment, not the name heuristic, decides membership now.
    let response = app
        .request(
            Method::GET,
            &format!("/api/v1/search?category={sensors}"),
            None,
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(body["products"].as_array().unwrap().len(), 0);

    let response = app
        .request(
            Method::GET,
            &format!("/api/v1/search?category={tools}"),
            None,
        )
        .await;
    let body = response_json(response).await;
    let names: Vec<&str> = body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Pressure sensor"));
}

#[tokio::test]
async fn unknown_category_matches_nothing() {
    let app = TestApp::new().await;
    seed(&app).await;

    let response = app
        .request(
            Method::GET,
            "/api/v1/search?category=00000000-0000-0000-0000-000000000000",
            None,
        )
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    assert_eq!(body["products"].as_array().unwrap().len(), 0);
}
