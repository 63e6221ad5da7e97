//! Read endpoints under `/api/v1/catalog`.

mod common;

use axum::http::StatusCode;
use axum::Router;
use catalog_core::identity::product_upload_path;
use common::{body_json, build_test_app, get, post_json};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create(app: &Router, entity: &str, master: Value) -> Value {
    create_with_slaves(app, entity, master, json!([])).await
}

async fn create_with_slaves(app: &Router, entity: &str, master: Value, slaves: Value) -> Value {
    let response = post_json(
        app.clone(),
        &format!("/api/v1/admin/{entity}/create"),
        json!({"master": master, "slaves": slaves}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["record"].clone()
}

async fn data(app: &Router, uri: &str) -> Value {
    let response = get(app.clone(), uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].clone()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn visible_categories_with_labels(pool: PgPool) {
    let app = build_test_app(pool);

    let furniture = create(&app, "category-sites", json!({"title": "Мебель"})).await;
    create(&app, "category-sites", json!({"title": "Archive", "show": false})).await;
    create(
        &app,
        "category-sites",
        json!({"title": "Стулья", "parent_id": furniture["id"]}),
    )
    .await;
    create(
        &app,
        "category-sites",
        json!({"title": "Drafts", "parent_id": furniture["id"], "show": false}),
    )
    .await;

    let roots = data(&app, "/api/v1/catalog/categories").await;
    assert_eq!(roots.as_array().unwrap().len(), 1);
    assert_eq!(roots[0]["label"], "mebel");
    assert_eq!(roots[0]["numchild"], 2);

    let id = furniture["id"].as_i64().unwrap();
    let children = data(&app, &format!("/api/v1/catalog/categories/{id}/children")).await;
    assert_eq!(children, json!([{"id": children[0]["id"], "label": "---stulya", "depth": 2, "numchild": 0}]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn children_of_unknown_category_is_404(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(app, "/api/v1/catalog/categories/404/children").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn supplier_children_name_the_maker(pool: PgPool) {
    let app = build_test_app(pool);
    let maker = create(&app, "makers", json!({"official": "Acme"})).await;

    let root = create(
        &app,
        "category-xmls",
        json!({"maker_id": maker["id"], "title": "Furniture"}),
    )
    .await;
    create(
        &app,
        "category-xmls",
        json!({"maker_id": maker["id"], "title": "Stools", "parent_id": root["id"]}),
    )
    .await;

    let id = root["id"].as_i64().unwrap();
    let children = data(&app, &format!("/api/v1/catalog/supplier-categories/{id}/children")).await;
    assert_eq!(children[0]["label"], "---Stools (Acme)");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn product_media_and_variants(pool: PgPool) {
    let app = build_test_app(pool);
    let maker = create(&app, "makers", json!({"official": "Acme"})).await;

    let product = create_with_slaves(
        &app,
        "products",
        json!({"maker_id": maker["id"], "title": "Chair"}),
        json!([[], [], [], [
            {"meaning": "image", "image": "side.jpg", "type": "jpg", "description": "Side", "position": 1},
            {"meaning": "file", "file": "manual.pdf", "type": "pdf", "description": "Manual"},
            {"meaning": "image", "image": "front.jpg", "type": "jpg", "description": "Front", "position": 0}
        ]]),
    )
    .await;
    let variant = create(
        &app,
        "products",
        json!({"maker_id": maker["id"], "title": "Chair, oak", "parent_id": product["id"]}),
    )
    .await;
    let id = product["id"].as_i64().unwrap();

    let photos = data(&app, &format!("/api/v1/catalog/products/{id}/photos")).await;
    let images: Vec<&str> = photos
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["image"].as_str().unwrap())
        .collect();
    assert_eq!(images, vec!["front.jpg", "side.jpg"]);

    let main = data(&app, &format!("/api/v1/catalog/products/{id}/main-image")).await;
    assert_eq!(main["image"], "front.jpg");

    let variants = data(&app, &format!("/api/v1/catalog/products/{id}/variants")).await;
    assert_eq!(variants[0]["id"], variant["id"]);

    let path = data(&app, &format!("/api/v1/catalog/products/{id}/upload-path")).await;
    let relative = product_upload_path("acme", "Chair");
    assert_eq!(path["relative"], relative);
    assert_eq!(path["path"], format!("media/{relative}"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn product_without_images_has_no_main_image(pool: PgPool) {
    let app = build_test_app(pool);
    let maker = create(&app, "makers", json!({"official": "Acme"})).await;
    let product = create(&app, "products", json!({"maker_id": maker["id"], "title": "Lamp"})).await;
    let id = product["id"].as_i64().unwrap();

    let main = data(&app, &format!("/api/v1/catalog/products/{id}/main-image")).await;
    assert!(main.is_null());

    let response = get(app, "/api/v1/catalog/products/999/photos").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
