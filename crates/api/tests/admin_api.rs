//! HTTP round-trips through the admin factories.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, build_test_app, delete, get, post_json, put_json};
use serde_json::{json, Value};
use sqlx::PgPool;

const ADMIN: &str = "/api/v1/admin";

/// POST to `/{entity}/create` and return the created record.
async fn create(app: &Router, entity: &str, payload: Value) -> Value {
    let response = post_json(app.clone(), &format!("{ADMIN}/{entity}/create"), payload).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["record"].clone()
}

async fn create_maker(app: &Router, official: &str) -> i64 {
    let maker = create(app, "makers", json!({"master": {"official": official}})).await;
    maker["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn maker_lifecycle(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app.clone(),
        &format!("{ADMIN}/makers/create"),
        json!({"master": {"official": "  Мебель Плюс "}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let maker = &json["data"]["record"];
    assert_eq!(maker["official"], "Мебель Плюс");
    assert_eq!(maker["name"], "mebel-plyus");
    assert_eq!(json["data"]["redirect"], "/api/v1/admin/makers");
    assert_eq!(json["data"]["section"], "Directories");
    let id = maker["id"].as_i64().unwrap();

    let response = get(app.clone(), &format!("{ADMIN}/makers")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response = put_json(
        app.clone(),
        &format!("{ADMIN}/makers/{id}/update"),
        json!({"master": {"official": "Mebel Plus Group"}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["record"]["official"], "Mebel Plus Group");
    assert_eq!(json["data"]["record"]["name"], "mebel-plyus");

    let response = get(app.clone(), &format!("{ADMIN}/makers/{id}/delete")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Deletion");
    assert_eq!(json["data"]["template"], "admin/confirm_delete");

    let response = delete(app.clone(), &format!("{ADMIN}/makers/{id}/delete")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, &format!("{ADMIN}/makers/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_maker_is_a_conflict(pool: PgPool) {
    let app = build_test_app(pool);
    create_maker(&app, "Acme").await;

    let response = post_json(
        app,
        &format!("{ADMIN}/makers/create"),
        json!({"master": {"official": "ACME"}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_requires_master_data(pool: PgPool) {
    let app = build_test_app(pool);
    let id = create_maker(&app, "Acme").await;

    let response = put_json(
        app,
        &format!("{ADMIN}/makers/{id}/update"),
        json!({"master": {}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Master form data is required");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn filter_type_must_be_known(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app,
        &format!("{ADMIN}/filters/create"),
        json!({"master": {
            "title": "Colour", "name": "colour", "value": "c", "type": "COLOUR", "position": 1
        }}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["fields"]["master.type"].is_array());
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn product_with_slave_rows(pool: PgPool) {
    let app = build_test_app(pool);
    let maker_id = create_maker(&app, "Acme").await;
    let category = create(
        &app,
        "category-xmls",
        json!({"master": {"maker_id": maker_id, "title": "Chairs"}}),
    )
    .await;

    let product = create(
        &app,
        "products",
        json!({
            "master": {
                "maker_id": maker_id,
                "title": "Chair",
                "code": "",
                "price": "49.90",
                "category_xml_ids": [category["id"]]
            },
            "slaves": [
                [{"abbr": "color", "name": "Colour", "value": "Oak"}],
                [],
                [{"geo": "Kyiv", "type": "warehouse", "value": 4}],
                [{"meaning": "image", "image": "chair.jpg", "type": "jpg",
                  "description": "Front", "position": 0}]
            ]
        }),
    )
    .await;

    let code = product["code"].as_str().unwrap();
    assert_eq!(code.len(), 32);
    assert_eq!(product["slug_title"], format!("acme_chair_{code}"));
    assert_eq!(product["params"][0]["abbr"], "color");
    assert_eq!(product["stocks"][0]["value"], 4);
    assert_eq!(product["attachments"][0]["maker_id"], maker_id);
    assert_eq!(product["category_xml_ids"], json!([category["id"]]));
    assert_eq!(product["packs"], json!([]));

    let id = product["id"].as_i64().unwrap();
    let response = put_json(
        app.clone(),
        &format!("{ADMIN}/products/{id}/update"),
        json!({
            "master": {"maker_id": maker_id, "title": "Armchair", "code": "X-1"},
            "slaves": [[
                {"abbr": "width", "name": "Width", "value": "60"},
                {"abbr": "height", "name": "Height", "value": "90"}
            ]]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(app, &format!("{ADMIN}/products/{id}")).await).await;
    let record = &json["data"]["record"];
    assert_eq!(record["title"], "Armchair");
    assert_eq!(record["code"], code);
    assert_eq!(record["params"].as_array().unwrap().len(), 2);
    assert_eq!(record["stocks"].as_array().unwrap().len(), 1);
    assert_eq!(record["category_xml_ids"], json!([category["id"]]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn imported_product_needs_identifiers(pool: PgPool) {
    let app = build_test_app(pool);
    let maker_id = create_maker(&app, "Acme").await;

    let response = post_json(
        app,
        &format!("{ADMIN}/products/create"),
        json!({"master": {"maker_id": maker_id, "title": "Chair", "import_fl": true}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["fields"]["master.code"].is_array());
    assert!(json["fields"]["master.slug_title"].is_array());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_slave_rows_block_the_product(pool: PgPool) {
    let app = build_test_app(pool);
    let maker_id = create_maker(&app, "Acme").await;

    let response = post_json(
        app.clone(),
        &format!("{ADMIN}/products/create"),
        json!({
            "master": {"maker_id": maker_id, "title": "Chair"},
            "slaves": [[], [], [{"geo": "Kyiv", "type": "warehouse", "value": "many"}]]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["fields"]["slaves.2.0.value"].is_array());

    let json = body_json(get(app, &format!("{ADMIN}/products")).await).await;
    assert_eq!(json["data"], json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn conflicting_update_keeps_stored_rows(pool: PgPool) {
    let app = build_test_app(pool);
    let maker_id = create_maker(&app, "Acme").await;
    let product = create(
        &app,
        "products",
        json!({
            "master": {"maker_id": maker_id, "title": "Chair"},
            "slaves": [[{"abbr": "color", "name": "Colour", "value": "Oak"}]]
        }),
    )
    .await;
    let id = product["id"].as_i64().unwrap();

    let response = put_json(
        app.clone(),
        &format!("{ADMIN}/products/{id}/update"),
        json!({
            "master": {"maker_id": maker_id, "title": "Armchair"},
            "slaves": [[
                {"abbr": "width", "name": "Width", "value": "60"},
                {"abbr": "width", "name": "Width", "value": "80"}
            ]]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(get(app, &format!("{ADMIN}/products/{id}")).await).await;
    let record = &json["data"]["record"];
    assert_eq!(record["title"], "Chair");
    let params = record["params"].as_array().unwrap();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0]["abbr"], "color");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn conflicting_create_persists_nothing(pool: PgPool) {
    let app = build_test_app(pool);
    let maker_id = create_maker(&app, "Acme").await;

    let response = post_json(
        app.clone(),
        &format!("{ADMIN}/products/create"),
        json!({
            "master": {"maker_id": maker_id, "title": "Chair"},
            "slaves": [[
                {"abbr": "w", "name": "Width", "value": "60"},
                {"abbr": "w", "name": "Width", "value": "80"}
            ]]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(get(app, &format!("{ADMIN}/products")).await).await;
    assert_eq!(json["data"], json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn blank_price_clears_it_on_update(pool: PgPool) {
    let app = build_test_app(pool);
    let maker_id = create_maker(&app, "Acme").await;
    let product = create(
        &app,
        "products",
        json!({"master": {"maker_id": maker_id, "title": "Chair", "price": "10.50", "stock": 3}}),
    )
    .await;
    let id = product["id"].as_i64().unwrap();

    let response = put_json(
        app.clone(),
        &format!("{ADMIN}/products/{id}/update"),
        json!({"master": {"maker_id": maker_id, "title": "Chair", "price": ""}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(app, &format!("{ADMIN}/products/{id}")).await).await;
    let record = &json["data"]["record"];
    assert!(record["price"].is_null());
    assert_eq!(record["stock"], 3);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn product_for_unknown_maker_is_404(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app,
        &format!("{ADMIN}/products/create"),
        json!({"master": {"maker_id": 999, "title": "Chair"}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Maker with id 999 not found");
}

// ---------------------------------------------------------------------------
// Category trees
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_a_category_removes_its_subtree(pool: PgPool) {
    let app = build_test_app(pool);

    let root = create(&app, "category-sites", json!({"master": {"title": "Мебель"}})).await;
    let child = create(
        &app,
        "category-sites",
        json!({"master": {"title": "Стулья", "parent_id": root["id"]}}),
    )
    .await;
    assert_eq!(child["path"], "00010001");
    assert_eq!(child["slug_title"], "stulya");

    let root_id = root["id"].as_i64().unwrap();
    let response = delete(app.clone(), &format!("{ADMIN}/category-sites/{root_id}/delete")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let child_id = child["id"].as_i64().unwrap();
    let response = get(app, &format!("{ADMIN}/category-sites/{child_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
