//! End-to-end order lifecycle: creation with nested clothes and
//! measurements, wholesale child replacement, delivery payments and soft
//! delete.

mod common;

use axum::http::{Method, StatusCode};
use common::{response_json, TestApp};
use serde_json::json;

#[tokio::test]
async fn order_create_totals_and_children() {
    let app = TestApp::new().await;
    let (shop_id, customer_id) = app.seed_shop_and_customer().await;
    let token = app.owner_token();

    let payload = json!({
        "customer_id": customer_id,
        "shop_id": shop_id,
        "order_type": "STITCHING",
        "clothes": [
            { "garment_type": "kurta", "price": "500" },
            { "garment_type": "lehenga", "price": "600", "material_cost": "100" }
        ]
    });

    let response = app
        .request(Method::POST, "/orders", Some(payload), Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response_json(response).await;
    assert_eq!(body["total_amount"], "1200");
    assert_eq!(body["status"], "PENDING");
    assert_eq!(body["clothes"].as_array().unwrap().len(), 2);
    assert_eq!(body["costs"].as_array().unwrap().len(), 0);
    assert!(body["clothes"][0]["measurements"].as_array().unwrap().is_empty());
    assert_eq!(body["customer"]["name"], "Asha");
}

#[tokio::test]
async fn measurements_link_positionally_and_extras_drop() {
    let app = TestApp::new().await;
    let (shop_id, customer_id) = app.seed_shop_and_customer().await;
    let token = app.owner_token();

    let payload = json!({
        "customer_id": customer_id,
        "shop_id": shop_id,
        "order_type": "STITCHING",
        "clothes": [
            { "garment_type": "kurta", "price": "500",
              "measurement": { "chest": "38", "waist": "32" } },
            { "garment_type": "pants", "price": "300" }
        ]
    });

    let response = app
        .request(Method::POST, "/orders", Some(payload), Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response_json(response).await;
    let clothes = body["clothes"].as_array().unwrap();
    assert_eq!(clothes[0]["measurements"].as_array().unwrap().len(), 1);
    assert_eq!(clothes[0]["measurements"][0]["chest"], "38");
    assert!(clothes[1]["measurements"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn surplus_measurements_drop_without_error() {
    let app = TestApp::new().await;
    let (shop_id, customer_id) = app.seed_shop_and_customer().await;
    let token = app.owner_token();

    let payload = json!({
        "customer_id": customer_id,
        "shop_id": shop_id,
        "order_type": "STITCHING",
        "clothes": [
            { "garment_type": "kurta", "price": "500" },
            { "garment_type": "pants", "price": "300" }
        ]
    });
    let body = response_json(
        app.request(Method::POST, "/orders", Some(payload), Some(&token))
            .await,
    )
    .await;
    let order_id = body["id"].as_str().unwrap().to_string();

    // One cloth, two measurements: the second has no cloth to link to.
    let patch = json!({
        "clothes": [{ "garment_type": "sherwani", "price": "2500" }],
        "measurements": [
            { "shoulder": "18" },
            { "chest": "40" }
        ]
    });
    let response = app
        .request(
            Method::PATCH,
            &format!("/orders/{order_id}"),
            Some(patch),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let clothes = body["clothes"].as_array().unwrap();
    assert_eq!(clothes.len(), 1);
    assert_eq!(clothes[0]["measurements"].as_array().unwrap().len(), 1);
    assert_eq!(clothes[0]["measurements"][0]["shoulder"], "18");

    // The surplus measurement was dropped, not stored unlinked.
    use darzi_api::entities::measurement::{self, Entity as MeasurementEntity};
    use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
    let stored = MeasurementEntity::find()
        .filter(measurement::Column::OrderId.eq(uuid::Uuid::parse_str(&order_id).unwrap()))
        .all(&*app.state.db)
        .await
        .expect("query measurements");
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn delivery_creates_payment_idempotently() {
    let app = TestApp::new().await;
    let (shop_id, customer_id) = app.seed_shop_and_customer().await;
    let token = app.owner_token();

    let payload = json!({
        "customer_id": customer_id,
        "shop_id": shop_id,
        "order_type": "STITCHING",
        "clothes": [{ "garment_type": "kurta", "price": "500" }],
        "costs": [{ "material_cost": "400", "labor_cost": "500" }]
    });

    let response = app
        .request(Method::POST, "/orders", Some(payload), Some(&token))
        .await;
    let body = response_json(response).await;
    let order_id = body["id"].as_str().unwrap().to_string();

    // First delivery creates the payment from the cost rows.
    let response = app
        .request(
            Method::PUT,
            &format!("/orders/{order_id}/status"),
            Some(json!({ "status": "DELIVERED" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let window = format!(
        "/payments?shopId={shop_id}&start=2000-01-01T00:00:00Z&end=2100-01-01T00:00:00Z"
    );
    let body = response_json(app.request(Method::GET, &window, None, Some(&token)).await).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["payments"][0]["amount"], "900");

    // Second identical call updates in place; still one row.
    app.request(
        Method::PUT,
        &format!("/orders/{order_id}/status"),
        Some(json!({ "status": "DELIVERED" })),
        Some(&token),
    )
    .await;

    let body = response_json(app.request(Method::GET, &window, None, Some(&token)).await).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["synced_created"], 0);
}

#[tokio::test]
async fn update_replaces_children_wholesale() {
    let app = TestApp::new().await;
    let (shop_id, customer_id) = app.seed_shop_and_customer().await;
    let token = app.owner_token();

    let payload = json!({
        "customer_id": customer_id,
        "shop_id": shop_id,
        "order_type": "STITCHING",
        "clothes": [
            { "garment_type": "kurta", "price": "500" },
            { "garment_type": "pants", "price": "300" }
        ],
        "costs": [{ "total_cost": "800" }]
    });

    let response = app
        .request(Method::POST, "/orders", Some(payload), Some(&token))
        .await;
    let body = response_json(response).await;
    let order_id = body["id"].as_str().unwrap().to_string();

    let patch = json!({
        "clothes": [{ "garment_type": "sherwani", "price": "2500",
                      "measurement": { "shoulder": "18" } }],
        "costs": [{ "total_cost": "2500" }],
        "measurements": [{ "shoulder": "18" }]
    });

    let response = app
        .request(
            Method::PATCH,
            &format!("/orders/{order_id}"),
            Some(patch),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let clothes = body["clothes"].as_array().unwrap();
    assert_eq!(clothes.len(), 1);
    assert_eq!(clothes[0]["garment_type"], "sherwani");
    assert_eq!(clothes[0]["measurements"].as_array().unwrap().len(), 1);
    assert_eq!(body["total_amount"], "2500");
    assert_eq!(body["costs"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn omitted_child_arrays_leave_rows_untouched() {
    let app = TestApp::new().await;
    let (shop_id, customer_id) = app.seed_shop_and_customer().await;
    let token = app.owner_token();

    let payload = json!({
        "customer_id": customer_id,
        "shop_id": shop_id,
        "order_type": "ALTERATION",
        "clothes": [{ "garment_type": "blazer", "price": "700" }]
    });

    let response = app
        .request(Method::POST, "/orders", Some(payload), Some(&token))
        .await;
    let body = response_json(response).await;
    let order_id = body["id"].as_str().unwrap().to_string();

    // Patch a scalar only.
    let response = app
        .request(
            Method::PATCH,
            &format!("/orders/{order_id}"),
            Some(json!({ "notes": "rush job" })),
            Some(&token),
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(body["notes"], "rush job");
    assert_eq!(body["clothes"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn assignment_activates_tailor() {
    let app = TestApp::new().await;
    let (shop_id, customer_id) = app.seed_shop_and_customer().await;
    let token = app.owner_token();

    let tailor = app
        .state
        .services
        .tailors
        .create_tailor(darzi_api::services::tailors::CreateTailorRequest {
            shop_id,
            name: "Ravi".to_string(),
            mobile_number: "+919811112222".to_string(),
        })
        .await
        .expect("seed tailor");
    assert_eq!(tailor.status, "INACTIVE");

    let payload = json!({
        "customer_id": customer_id,
        "shop_id": shop_id,
        "order_type": "STITCHING",
        "clothes": [{ "garment_type": "kurta", "price": "500" }]
    });
    let body = response_json(
        app.request(Method::POST, "/orders", Some(payload), Some(&token))
            .await,
    )
    .await;
    let order_id = body["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            Method::POST,
            &format!("/orders/{order_id}/assign"),
            Some(json!({ "tailor_id": tailor.id })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let refreshed = app
        .state
        .services
        .tailors
        .get_tailor(tailor.id)
        .await
        .expect("tailor still present");
    assert_eq!(refreshed.status, "ACTIVE");

    let assigned = response_json(
        app.request(
            Method::GET,
            &format!("/orders/assigned/{}", tailor.id),
            None,
            Some(&token),
        )
        .await,
    )
    .await;
    assert_eq!(assigned.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn soft_deleted_order_disappears() {
    let app = TestApp::new().await;
    let (shop_id, customer_id) = app.seed_shop_and_customer().await;
    let token = app.owner_token();

    let payload = json!({
        "customer_id": customer_id,
        "shop_id": shop_id,
        "order_type": "STITCHING",
        "clothes": [{ "garment_type": "kurta", "price": "500" }]
    });
    let body = response_json(
        app.request(Method::POST, "/orders", Some(payload), Some(&token))
            .await,
    )
    .await;
    let order_id = body["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            Method::DELETE,
            &format!("/orders/{order_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .request(
            Method::GET,
            &format!("/orders/{order_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let list = response_json(
        app.request(
            Method::GET,
            &format!("/orders?shopId={shop_id}"),
            None,
            Some(&token),
        )
        .await,
    )
    .await;
    assert!(list.as_array().unwrap().is_empty());
}
