// Contract tests for product and auth payloads.

use rust_decimal_macros::dec;
use serde_json::json;

use billforge::auth::models::{CreateUserRequest, LoginRequest, UserRole};
use billforge::products::models::{CreateProductRequest, ProductSuggestion, UpdateProductRequest};

#[test]
fn create_product_request_shape() {
    let body = json!({
        "name": "Steel pipe",
        "description": "20mm galvanized",
        "current_price": "120.50",
        "unit": "m"
    });

    let request: CreateProductRequest = serde_json::from_value(body).unwrap();
    assert_eq!(request.name, "Steel pipe");
    assert_eq!(request.current_price, dec!(120.50));
    assert_eq!(request.unit, "m");
}

#[test]
fn unit_defaults_to_pcs() {
    let body = json!({ "name": "Elbow joint", "current_price": "15" });
    let request: CreateProductRequest = serde_json::from_value(body).unwrap();
    assert_eq!(request.unit, "pcs");
}

#[test]
fn update_product_request_is_fully_optional() {
    let request: UpdateProductRequest = serde_json::from_value(json!({})).unwrap();
    assert!(request.is_empty());

    let request: UpdateProductRequest =
        serde_json::from_value(json!({ "current_price": "99.99" })).unwrap();
    assert_eq!(request.current_price, Some(dec!(99.99)));
    assert!(request.name.is_none());
}

#[test]
fn suggestion_payload_shape() {
    let suggestion = ProductSuggestion {
        id: "p-1".to_string(),
        name: "Steel pipe".to_string(),
        description: Some("20mm galvanized".to_string()),
        current_price: dec!(120.50),
    };

    let value = serde_json::to_value(&suggestion).unwrap();
    for field in ["id", "name", "description", "current_price"] {
        assert!(value.get(field).is_some(), "missing field {}", field);
    }
}

#[test]
fn login_request_shape() {
    let request: LoginRequest =
        serde_json::from_value(json!({ "username": "admin", "password": "admin123" })).unwrap();
    assert_eq!(request.username, "admin");
    assert_eq!(request.password, "admin123");
}

#[test]
fn create_user_role_values() {
    let body = json!({
        "username": "clerk1",
        "email": "clerk1@example.com",
        "password": "longenough",
        "full_name": "Billing Clerk",
        "role": "admin"
    });

    let request: CreateUserRequest = serde_json::from_value(body).unwrap();
    assert_eq!(request.role, UserRole::Admin);

    assert!(serde_json::from_value::<CreateUserRequest>(json!({
        "username": "clerk2",
        "email": "clerk2@example.com",
        "password": "longenough",
        "full_name": "Clerk",
        "role": "superuser"
    }))
    .is_err());
}
