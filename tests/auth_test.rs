//! OTP login flow and the role gate.

mod common;

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use common::{response_json, TestApp};
use darzi_api::entities::user::{self, Entity as UserEntity};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde_json::json;

const PHONE: &str = "+919900887766";

#[tokio::test]
async fn send_otp_creates_shop_owner_account() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/auth/send-otp",
            Some(json!({ "mobile_number": PHONE })),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["otp"].as_str().unwrap().len(), 6);

    let created = UserEntity::find()
        .filter(user::Column::MobileNumber.eq(PHONE))
        .one(&*app.state.db)
        .await
        .expect("query user")
        .expect("user created");
    assert_eq!(created.role, "SHOP_OWNER");
    assert_eq!(created.language.as_deref(), Some("HI"));
}

#[tokio::test]
async fn verify_otp_round_trip_issues_tokens() {
    let app = TestApp::new().await;

    let body = response_json(
        app.request(
            Method::POST,
            "/auth/send-otp",
            Some(json!({ "mobile_number": PHONE })),
            None,
        )
        .await,
    )
    .await;
    let otp = body["otp"].as_str().unwrap().to_string();

    let response = app
        .request(
            Method::POST,
            "/auth/verify-otp",
            Some(json!({ "mobile_number": PHONE, "otp": otp.clone() })),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let access = body["access_token"].as_str().unwrap().to_string();
    assert!(body["refresh_token"].as_str().is_some());

    // The issued token passes the gate.
    let response = app
        .request(Method::GET, "/shops", None, Some(&access))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The code is cleared; replaying it fails.
    let response = app
        .request(
            Method::POST,
            "/auth/verify-otp",
            Some(json!({ "mobile_number": PHONE, "otp": otp })),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrong_code_is_rejected() {
    let app = TestApp::new().await;

    let body = response_json(
        app.request(
            Method::POST,
            "/auth/send-otp",
            Some(json!({ "mobile_number": PHONE })),
            None,
        )
        .await,
    )
    .await;
    let otp = body["otp"].as_str().unwrap();
    let wrong = if otp == "123456" { "654321" } else { "123456" };

    let response = app
        .request(
            Method::POST,
            "/auth/verify-otp",
            Some(json!({ "mobile_number": PHONE, "otp": wrong })),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn expired_code_never_yields_tokens() {
    let app = TestApp::new().await;

    let body = response_json(
        app.request(
            Method::POST,
            "/auth/send-otp",
            Some(json!({ "mobile_number": PHONE })),
            None,
        )
        .await,
    )
    .await;
    let otp = body["otp"].as_str().unwrap().to_string();

    // Age the code past its expiry.
    let found = UserEntity::find()
        .filter(user::Column::MobileNumber.eq(PHONE))
        .one(&*app.state.db)
        .await
        .expect("query user")
        .expect("user exists");
    let mut active: user::ActiveModel = found.into();
    active.otp_expires_at = Set(Some(Utc::now() - Duration::minutes(1)));
    active.update(&*app.state.db).await.expect("expire otp");

    let response = app
        .request(
            Method::POST,
            "/auth/verify-otp",
            Some(json!({ "mobile_number": PHONE, "otp": otp })),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert!(body.get("access_token").is_none());
    assert!(body["message"].as_str().unwrap().contains("OTP expired"));
}

#[tokio::test]
async fn role_gate_forbids_and_admin_bypasses() {
    let app = TestApp::new().await;

    // No token at all.
    let response = app.request(Method::GET, "/users", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // A shop owner is forbidden from the admin surface.
    let owner = app.owner_token();
    let response = app.request(Method::GET, "/users", None, Some(&owner)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The super administrator passes both gates.
    let admin = app.admin_token();
    let response = app.request(Method::GET, "/users", None, Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.request(Method::GET, "/shops", None, Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn refresh_token_mints_new_pair() {
    let app = TestApp::new().await;

    let body = response_json(
        app.request(
            Method::POST,
            "/auth/send-otp",
            Some(json!({ "mobile_number": PHONE })),
            None,
        )
        .await,
    )
    .await;
    let otp = body["otp"].as_str().unwrap().to_string();

    let body = response_json(
        app.request(
            Method::POST,
            "/auth/verify-otp",
            Some(json!({ "mobile_number": PHONE, "otp": otp })),
            None,
        )
        .await,
    )
    .await;
    let refresh = body["refresh_token"].as_str().unwrap().to_string();

    let response = app
        .request(
            Method::POST,
            "/auth/refresh-token",
            Some(json!({ "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let access = body["access_token"].as_str().unwrap().to_string();
    let response = app
        .request(Method::GET, "/shops", None, Some(&access))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}
