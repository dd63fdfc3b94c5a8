mod common;

use axum::http::Method;
use serde_json::json;

use common::{response_json, TestApp};

#[tokio::test]
async fn product_lifecycle() {
    let app = TestApp::new().await;

    // Create
    let response = app
        .request(
            Method::POST,
            "/api/v1/products",
            Some(json!({
                "name": "Hydraulic pump",
                "product_code": "SKU-1000",
                "qr_code": "QR-1000",
                "box_no": 1,
                "row_no": 2,
                "slot_no": 3
            })),
        )
        .await;
    assert_eq!(response.status(), 201);
    let body = response_json(response).await;
    let product = &body["product"];
    assert_eq!(product["name"], "Hydraulic pump");
    assert_eq!(product["box_no"], 1);
    assert_eq!(product["row_no"], 2);
    assert_eq!(product["slot_no"], 3);
    assert!(product["created_at"].is_string());
    let id = product["id"].as_str().expect("product id").to_string();

    // Fetch
    let response = app
        .request(Method::GET, &format!("/api/v1/products/{id}"), None)
        .await;
    assert_eq!(response.status(), 200);
    let fetched = response_json(response).await;
    assert_eq!(fetched["product"]["id"], id.as_str());

    // Partial update: rename without touching the location
    let response = app
        .request(
            Method::PUT,
            &format!("/api/v1/products/{id}"),
            Some(json!({"name": "Hydraulic pump (rebuilt)"})),
        )
        .await;
    assert_eq!(response.status(), 200);
    let updated = response_json(response).await;
    assert_eq!(updated["product"]["name"], "Hydraulic pump (rebuilt)");
    assert_eq!(updated["product"]["slot_no"], 3);

    // Relocate via update
    let response = app
        .request(
            Method::PUT,
            &format!("/api/v1/products/{id}"),
            Some(json!({"box_no": 2, "row_no": 1, "slot_no": 1})),
        )
        .await;
    assert_eq!(response.status(), 200);
    let relocated = response_json(response).await;
    assert_eq!(relocated["product"]["box_no"], 2);

    // Delete is idempotent
    let response = app
        .request(Method::DELETE, &format!("/api/v1/products/{id}"), None)
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(response_json(response).await["success"], true);

    let response = app
        .request(Method::DELETE, &format!("/api/v1/products/{id}"), None)
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(response_json(response).await["success"], true);

    // Gone for real
    let response = app
        .request(Method::GET, &format!("/api/v1/products/{id}"), None)
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn list_returns_newest_first() {
    let app = TestApp::new().await;

    for (i, name) in ["Air filter", "Oil filter", "Fuel filter"].iter().enumerate() {
        let response = app
            .request(
                Method::POST,
                "/api/v1/products",
                Some(json!({
                    "name": name,
                    "box_no": 1,
                    "row_no": 1,
                    "slot_no": i + 1
                })),
            )
            .await;
        assert_eq!(response.status(), 201);
        // Keep created_at strictly increasing for the ordering assertion.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let response = app.request(Method::GET, "/api/v1/products", None).await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    let products = body["products"].as_array().expect("products array");
    assert_eq!(products.len(), 3);
    assert_eq!(products[0]["name"], "Fuel filter");
    assert_eq!(products[2]["name"], "Air filter");
}

#[tokio::test]
async fn duplicate_location_rejected_then_freed_slot_accepts() {
    let app = TestApp::new().await;

    // Create P1 at (1,1,1)
    let response = app
        .request(
            Method::POST,
            "/api/v1/products",
            Some(json!({"name": "Bearing", "box_no": 1, "row_no": 1, "slot_no": 1})),
        )
        .await;
    assert_eq!(response.status(), 201);
    let p1 = response_json(response).await["product"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Create P2 at (1,1,1) fails with a duplicate-location error
    let response = app
        .request(
            Method::POST,
            "/api/v1/products",
            Some(json!({"name": "Gasket", "box_no": 1, "row_no": 1, "slot_no": 1})),
        )
        .await;
    assert_eq!(response.status(), 400);
    let body = response_json(response).await;
    assert_eq!(body["error"], "This location is already occupied");

    // Move P1 to (1,1,2)
    let response = app
        .request(
            Method::POST,
            "/api/v1/products/move",
            Some(json!({"product_id": p1, "to_box": 1, "to_row": 1, "to_slot": 2})),
        )
        .await;
    assert_eq!(response.status(), 200);

    // One move record was appended with from=(1,1,1) to=(1,1,2)
    let response = app.request(Method::GET, "/api/v1/move-history", None).await;
    let body = response_json(response).await;
    let moves = body["moves"].as_array().expect("moves array");
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0]["from_slot"], 1);
    assert_eq!(moves[0]["to_slot"], 2);

    // The freed slot now accepts P2
    let response = app
        .request(
            Method::POST,
            "/api/v1/products",
            Some(json!({"name": "Gasket", "box_no": 1, "row_no": 1, "slot_no": 1})),
        )
        .await;
    assert_eq!(response.status(), 201);
}

#[tokio::test]
async fn update_collision_excludes_the_product_itself() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/products",
            Some(json!({"name": "Spark plug", "box_no": 1, "row_no": 1, "slot_no": 4})),
        )
        .await;
    let id = response_json(response).await["product"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Re-submitting the product's own location is not a collision
    let response = app
        .request(
            Method::PUT,
            &format!("/api/v1/products/{id}"),
            Some(json!({"box_no": 1, "row_no": 1, "slot_no": 4, "name": "Spark plug set"})),
        )
        .await;
    assert_eq!(response.status(), 200);

    // But another product's slot is
    app.request(
        Method::POST,
        "/api/v1/products",
        Some(json!({"name": "Fuse", "box_no": 1, "row_no": 1, "slot_no": 5})),
    )
    .await;
    let response = app
        .request(
            Method::PUT,
            &format!("/api/v1/products/{id}"),
            Some(json!({"box_no": 1, "row_no": 1, "slot_no": 5})),
        )
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn validation_rejects_bad_names_and_locations() {
    let app = TestApp::new().await;

    // Empty name
    let response = app
        .request(
            Method::POST,
            "/api/v1/products",
            Some(json!({"name": "", "box_no": 1, "row_no": 1, "slot_no": 1})),
        )
        .await;
    assert_eq!(response.status(), 400);

    // Angle brackets
    let response = app
        .request(
            Method::POST,
            "/api/v1/products",
            Some(json!({"name": "<script>alert(1)</script>", "box_no": 1, "row_no": 1, "slot_no": 1})),
        )
        .await;
    assert_eq!(response.status(), 400);

    // Out-of-range axes (limits: box 1-8, row 1-12, slot 1-12)
    for (box_no, row_no, slot_no) in [(0, 1, 1), (9, 1, 1), (1, 13, 1), (1, 1, 0)] {
        let response = app
            .request(
                Method::POST,
                "/api/v1/products",
                Some(json!({"name": "Probe", "box_no": box_no, "row_no": row_no, "slot_no": slot_no})),
            )
            .await;
        assert_eq!(response.status(), 400, "({box_no},{row_no},{slot_no}) should be rejected");
    }

    // Nothing was stored
    let response = app.request(Method::GET, "/api/v1/products", None).await;
    let body = response_json(response).await;
    assert_eq!(body["products"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn update_unknown_product_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::PUT,
            "/api/v1/products/00000000-0000-0000-0000-000000000000",
            Some(json!({"name": "Ghost"})),
        )
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn lookup_prefers_qr_code_over_product_code() {
    let app = TestApp::new().await;

    // Product A holds the value in product_code; product B in qr_code.
    let response = app
        .request(
            Method::POST,
            "/api/v1/products",
            Some(json!({
                "name": "Belt drive",
                "product_code": "SCAN-7",
                "box_no": 1, "row_no": 1, "slot_no": 1
            })),
        )
        .await;
    assert_eq!(response.status(), 201);

    let response = app
        .request(
            Method::POST,
            "/api/v1/products",
            Some(json!({
                "name": "Chain sprocket",
                "qr_code": "SCAN-7",
                "box_no": 1, "row_no": 1, "slot_no": 2
            })),
        )
        .await;
    assert_eq!(response.status(), 201);

    // The qr_code match wins the tie.
    let response = app
        .request(Method::GET, "/api/v1/products/lookup?qr=SCAN-7", None)
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    assert_eq!(body["product"]["name"], "Chain sprocket");

    // Unknown value resolves to null, not an error.
    let response = app
        .request(Method::GET, "/api/v1/products/lookup?code=NOPE", None)
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    assert!(body["product"].is_null());

    // Missing parameters are a client error.
    let response = app
        .request(Method::GET, "/api/v1/products/lookup", None)
        .await;
    assert_eq!(response.status(), 400);
}
