//! Repository integration tests for identifier derivation, uniqueness and
//! per-product satellite rows.

use assert_matches::assert_matches;
use catalog_core::catalog::AttachmentMeaning;
use catalog_core::error::CoreError;
use catalog_core::hashing::content_hash;
use catalog_core::identity::default_code;
use catalog_db::models::brand_maker::CreateBrandMaker;
use catalog_db::models::lookup::{CreateMaker, UpdateMaker};
use catalog_db::models::product::{CreateProduct, ProductListParams, UpdateProduct};
use catalog_db::models::product_attachment::CreateProductAttachment;
use catalog_db::models::product_params_kv::CreateProductParamsKv;
use catalog_db::models::product_stock::CreateProductStock;
use catalog_db::repositories::{
    BrandMakerRepo, MakerRepo, ProductAttachmentRepo, ProductParamsKvRepo, ProductRepo,
    ProductStockRepo,
};
use catalog_db::DbError;
use rust_decimal::Decimal;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_product(maker_id: i64, title: &str) -> CreateProduct {
    CreateProduct {
        maker_id,
        parent_id: None,
        brand_maker_id: None,
        status_id: None,
        product_type_id: None,
        title: title.to_string(),
        prov_product_id: String::new(),
        prov_main_product_id: String::new(),
        slug_title: String::new(),
        code: String::new(),
        content: String::new(),
        long_content: String::new(),
        price: None,
        stock: None,
        show: None,
        import_fl: false,
    }
}

fn empty_update() -> UpdateProduct {
    UpdateProduct {
        parent_id: None,
        brand_maker_id: None,
        status_id: None,
        product_type_id: None,
        title: None,
        prov_product_id: None,
        prov_main_product_id: None,
        content: None,
        long_content: None,
        price: None,
        stock: None,
        show: None,
    }
}

fn param(abbr: &str, value: &str) -> CreateProductParamsKv {
    CreateProductParamsKv {
        abbr: abbr.to_string(),
        name: abbr.to_string(),
        value: value.to_string(),
        position: None,
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_maker_name_derived_from_official(pool: PgPool) {
    let maker = MakerRepo::create(&pool, &CreateMaker::new("Мебель Плюс"))
        .await
        .unwrap();
    assert_eq!(maker.name, "mebel-plyus");
    assert_eq!(maker.official, "Мебель Плюс");

    let found = MakerRepo::find_by_name(&pool, "mebel-plyus").await.unwrap();
    assert_eq!(found.map(|m| m.id), Some(maker.id));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_maker_update_keeps_name(pool: PgPool) {
    let maker = MakerRepo::create(&pool, &CreateMaker::new("Acme"))
        .await
        .unwrap();
    let update = UpdateMaker {
        official: Some("Acme Corporation".to_string()),
    };
    let updated = MakerRepo::update(&pool, maker.id, &update)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.official, "Acme Corporation");
    assert_eq!(updated.name, "acme");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_maker_name_rejected(pool: PgPool) {
    MakerRepo::create(&pool, &CreateMaker::new("Acme")).await.unwrap();
    let err = MakerRepo::create(&pool, &CreateMaker::new("ACME"))
        .await
        .unwrap_err();
    assert!(is_unique_violation(&err));
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_product_identifiers_derived(pool: PgPool) {
    let maker = MakerRepo::create(&pool, &CreateMaker::new("Acme")).await.unwrap();
    let product = ProductRepo::create(&pool, &new_product(maker.id, "Стул"))
        .await
        .unwrap();

    let code = default_code("Стул");
    assert_eq!(product.code, code);
    assert_eq!(product.slug_title, format!("acme_stul_{code}"));
    assert!(product.show);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_product_update_keeps_identifiers(pool: PgPool) {
    let maker = MakerRepo::create(&pool, &CreateMaker::new("Acme")).await.unwrap();
    let mut input = new_product(maker.id, "Chair");
    input.code = "CH-1".to_string();
    let product = ProductRepo::create(&pool, &input).await.unwrap();

    let update = UpdateProduct {
        parent_id: None,
        brand_maker_id: None,
        status_id: None,
        product_type_id: None,
        title: Some("Armchair".to_string()),
        prov_product_id: None,
        prov_main_product_id: None,
        content: None,
        long_content: None,
        price: Some(Some(Decimal::new(1999, 2))),
        stock: None,
        show: None,
    };
    let updated = ProductRepo::update(&pool, product.id, &update)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, "Armchair");
    assert_eq!(updated.code, "CH-1");
    assert_eq!(updated.slug_title, product.slug_title);
    assert_eq!(updated.price, Some(Decimal::new(1999, 2)));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_product_update_clears_nullable_fields(pool: PgPool) {
    let maker = MakerRepo::create(&pool, &CreateMaker::new("Acme")).await.unwrap();
    let mut input = new_product(maker.id, "Chair");
    input.price = Some(Decimal::new(500, 2));
    input.stock = Some(7);
    let product = ProductRepo::create(&pool, &input).await.unwrap();

    let update = UpdateProduct {
        price: Some(None),
        ..empty_update()
    };
    let updated = ProductRepo::update(&pool, product.id, &update)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.price, None);
    assert_eq!(updated.stock, Some(7));
    assert_eq!(updated.title, "Chair");
}

#[test]
fn test_update_dto_distinguishes_null_from_absent() {
    let update: UpdateProduct =
        serde_json::from_value(serde_json::json!({"price": null, "title": "Chair"})).unwrap();
    assert_eq!(update.price, Some(None));
    assert_eq!(update.stock, None);
    assert_eq!(update.title.as_deref(), Some("Chair"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_product_unknown_maker(pool: PgPool) {
    let err = ProductRepo::create(&pool, &new_product(9999, "Chair"))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        DbError::Core(CoreError::NotFound { entity: "Maker", id: 9999 })
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_imported_product_requires_identifiers(pool: PgPool) {
    let maker = MakerRepo::create(&pool, &CreateMaker::new("Acme")).await.unwrap();
    let mut input = new_product(maker.id, "Chair");
    input.import_fl = true;

    let err = ProductRepo::create(&pool, &input).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));

    input.code = "SUP-1".to_string();
    input.slug_title = "supplier-chair".to_string();
    let product = ProductRepo::create(&pool, &input).await.unwrap();
    assert_eq!(product.code, "SUP-1");
    assert_eq!(product.slug_title, "supplier-chair");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_code_per_maker_rejected(pool: PgPool) {
    let maker = MakerRepo::create(&pool, &CreateMaker::new("Acme")).await.unwrap();
    ProductRepo::create(&pool, &new_product(maker.id, "Chair"))
        .await
        .unwrap();

    let err = ProductRepo::create(&pool, &new_product(maker.id, "Chair"))
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Sqlx(ref e) if is_unique_violation(e));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_product_lookups_scoped_to_maker(pool: PgPool) {
    let acme = MakerRepo::create(&pool, &CreateMaker::new("Acme")).await.unwrap();
    let globex = MakerRepo::create(&pool, &CreateMaker::new("Globex")).await.unwrap();
    let mut chair = new_product(acme.id, "Chair");
    chair.code = "CH-1".to_string();
    let chair = ProductRepo::create(&pool, &chair).await.unwrap();
    ProductRepo::create(&pool, &new_product(acme.id, "Table"))
        .await
        .unwrap();
    let lamp = ProductRepo::create(&pool, &new_product(globex.id, "Lamp"))
        .await
        .unwrap();

    let acme_titles: Vec<String> = ProductRepo::list_by_maker(&pool, acme.id)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(acme_titles, vec!["Chair", "Table"]);
    let globex_ids: Vec<i64> = ProductRepo::list_by_maker(&pool, globex.id)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(globex_ids, vec![lamp.id]);

    let found = ProductRepo::find_by_code(&pool, acme.id, "CH-1").await.unwrap();
    assert_eq!(found.map(|p| p.id), Some(chair.id));
    assert!(ProductRepo::find_by_code(&pool, globex.id, "CH-1")
        .await
        .unwrap()
        .is_none());

    let found = ProductRepo::find_by_slug(&pool, "acme_chair_ch-1").await.unwrap();
    assert_eq!(found.map(|p| p.id), Some(chair.id));
    assert!(ProductRepo::find_by_slug(&pool, "globex_chair_ch-1")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_transaction_rollback_discards_product_writes(pool: PgPool) {
    let maker = MakerRepo::create(&pool, &CreateMaker::new("Acme")).await.unwrap();

    let mut tx = pool.begin().await.unwrap();
    let product = ProductRepo::create_in(&mut tx, &new_product(maker.id, "Chair"))
        .await
        .unwrap();
    ProductParamsKvRepo::create(&mut *tx, product.id, &param("w", "60"))
        .await
        .unwrap();
    let err = ProductParamsKvRepo::create(&mut *tx, product.id, &param("w", "80"))
        .await
        .unwrap_err();
    assert!(is_unique_violation(&err));
    tx.rollback().await.unwrap();

    assert!(ProductRepo::find_by_id(&pool, product.id)
        .await
        .unwrap()
        .is_none());
    assert!(ProductParamsKvRepo::list_for_product(&pool, product.id)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_orders_by_price(pool: PgPool) {
    let maker = MakerRepo::create(&pool, &CreateMaker::new("Acme")).await.unwrap();
    for (title, cents) in [("Sofa", Some(50000)), ("Stool", Some(1500)), ("Lamp", None)] {
        let mut input = new_product(maker.id, title);
        input.price = cents.map(|c| Decimal::new(c, 2));
        ProductRepo::create(&pool, &input).await.unwrap();
    }

    let params = ProductListParams {
        maker_id: Some(maker.id),
        ..Default::default()
    };
    let titles: Vec<String> = ProductRepo::list(&pool, &params)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["Stool", "Sofa", "Lamp"]);
}

// ---------------------------------------------------------------------------
// Satellites
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_attachment_copies_product_maker(pool: PgPool) {
    let maker = MakerRepo::create(&pool, &CreateMaker::new("Acme")).await.unwrap();
    let product = ProductRepo::create(&pool, &new_product(maker.id, "Chair"))
        .await
        .unwrap();

    let input = CreateProductAttachment {
        meaning: AttachmentMeaning::Image,
        file: String::new(),
        image: "chair.jpg".to_string(),
        kind: "jpg".to_string(),
        description: "Front".to_string(),
        position: Some(0),
    };
    let attachment = ProductAttachmentRepo::create(&pool, product.id, &input)
        .await
        .unwrap();
    assert_eq!(attachment.maker_id, maker.id);
    assert_eq!(attachment.meaning().unwrap(), AttachmentMeaning::Image);

    let main = ProductAttachmentRepo::main_image(&pool, product.id)
        .await
        .unwrap();
    assert_eq!(main.map(|a| a.id), Some(attachment.id));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_attachment_upload_path_uses_maker_directory(pool: PgPool) {
    let maker = MakerRepo::create(&pool, &CreateMaker::new("Мебель Плюс")).await.unwrap();
    let product = ProductRepo::create(&pool, &new_product(maker.id, "Chair"))
        .await
        .unwrap();
    let input = CreateProductAttachment {
        meaning: AttachmentMeaning::File,
        file: "manual.pdf".to_string(),
        image: String::new(),
        kind: "pdf".to_string(),
        description: "Assembly manual".to_string(),
        position: None,
    };
    let attachment = ProductAttachmentRepo::create(&pool, product.id, &input)
        .await
        .unwrap();

    let maker_name = ProductRepo::maker_name(&pool, product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        attachment.upload_path(&maker_name),
        format!(
            "upload_attachment/mebel-plyus/{}.jpg",
            content_hash("Assembly manual")
        )
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_photos_exclude_files(pool: PgPool) {
    let maker = MakerRepo::create(&pool, &CreateMaker::new("Acme")).await.unwrap();
    let product = ProductRepo::create(&pool, &new_product(maker.id, "Chair"))
        .await
        .unwrap();

    for (meaning, position) in [
        (AttachmentMeaning::Image, 1),
        (AttachmentMeaning::File, 0),
        (AttachmentMeaning::Image, 0),
    ] {
        let input = CreateProductAttachment {
            meaning,
            file: String::new(),
            image: String::new(),
            kind: "jpg".to_string(),
            description: format!("{meaning:?} {position}"),
            position: Some(position),
        };
        ProductAttachmentRepo::create(&pool, product.id, &input)
            .await
            .unwrap();
    }

    let photos = ProductAttachmentRepo::photos(&pool, product.id).await.unwrap();
    let positions: Vec<Option<i32>> = photos.iter().map(|p| p.position).collect();
    assert_eq!(positions, vec![Some(0), Some(1)]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_stock_for_missing_product(pool: PgPool) {
    let input = CreateProductStock {
        geo: "msk".to_string(),
        kind: "warehouse".to_string(),
        value: 3,
    };
    let err = ProductStockRepo::create(&pool, 9999, &input).await.unwrap_err();
    assert_matches!(err, sqlx::Error::RowNotFound);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_product_delete_cascades_stock(pool: PgPool) {
    let maker = MakerRepo::create(&pool, &CreateMaker::new("Acme")).await.unwrap();
    let product = ProductRepo::create(&pool, &new_product(maker.id, "Chair"))
        .await
        .unwrap();
    let input = CreateProductStock {
        geo: "msk".to_string(),
        kind: "warehouse".to_string(),
        value: 3,
    };
    ProductStockRepo::create(&pool, product.id, &input).await.unwrap();
    assert_eq!(
        ProductStockRepo::total_for_product(&pool, product.id).await.unwrap(),
        3
    );

    assert!(ProductRepo::delete(&pool, product.id).await.unwrap());
    assert!(ProductStockRepo::list_for_product(&pool, product.id)
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// Brand mappings
// ---------------------------------------------------------------------------

fn new_brand_maker(maker_id: i64, title: &str) -> CreateBrandMaker {
    CreateBrandMaker {
        maker_id,
        title: title.to_string(),
        code: String::new(),
        brand_id: None,
        prov_brand_id: String::new(),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_brand_mappings_scoped_to_maker(pool: PgPool) {
    let acme = MakerRepo::create(&pool, &CreateMaker::new("Acme")).await.unwrap();
    let globex = MakerRepo::create(&pool, &CreateMaker::new("Globex")).await.unwrap();
    for title in ["Ikea", "Hoff"] {
        BrandMakerRepo::create(&pool, &new_brand_maker(acme.id, title))
            .await
            .unwrap();
    }
    BrandMakerRepo::create(&pool, &new_brand_maker(globex.id, "Ikea"))
        .await
        .unwrap();

    let acme_titles: Vec<String> = BrandMakerRepo::list_by_maker(&pool, acme.id)
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.title)
        .collect();
    assert_eq!(acme_titles, vec!["Hoff", "Ikea"]);

    let globex_rows = BrandMakerRepo::list_by_maker(&pool, globex.id).await.unwrap();
    assert_eq!(globex_rows.len(), 1);
    assert_eq!(globex_rows[0].maker_id, globex.id);
}
