//! Products with their per-product satellite rows.
//!
//! Slave forms, by position: parameters, pack attributes, stock levels,
//! attachments. A submitted group replaces all rows of that kind; an
//! omitted group leaves them untouched. The product row, its links and its
//! satellite rows are written in one transaction.

use async_trait::async_trait;
use catalog_core::types::DbId;
use catalog_db::models::product::{CreateProduct, Product, ProductListParams, UpdateProduct};
use catalog_db::models::product_attachment::CreateProductAttachment;
use catalog_db::models::product_pack_kv::CreateProductPackKv;
use catalog_db::models::product_params_kv::CreateProductParamsKv;
use catalog_db::models::product_stock::CreateProductStock;
use catalog_db::repositories::{
    ProductAttachmentRepo, ProductPackKvRepo, ProductParamsKvRepo, ProductRepo, ProductStockRepo,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::{PgPool, Postgres, Transaction};
use validator::Validate;

use super::{parse_form, parse_new, to_record};
use crate::error::{AppError, AppResult};
use crate::factory::{EntityStore, FormData, FormErrors, Submission};
use crate::query::PaginationParams;

pub const PARAMS_SLAVE: usize = 0;
pub const PACKS_SLAVE: usize = 1;
pub const STOCKS_SLAVE: usize = 2;
pub const ATTACHMENTS_SLAVE: usize = 3;

/// Remove an id-list field from the master data.
fn take_ids(master: &mut FormData, key: &str) -> AppResult<Option<Vec<DbId>>> {
    match master.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| AppError::BadRequest(format!("Invalid {key}: {e}"))),
    }
}

/// Parse one slave group, collecting errors under `slaves.{index}.{row}`.
fn parse_rows<T: DeserializeOwned + Validate>(
    submission: &Submission,
    index: usize,
) -> AppResult<Option<Vec<T>>> {
    let Some(rows) = submission.slave(index) else {
        return Ok(None);
    };

    let mut errors = FormErrors::default();
    let mut parsed = Vec::with_capacity(rows.len());
    for (row, data) in rows.iter().enumerate() {
        match parse_new::<T>(data.clone()) {
            Ok(input) => parsed.push(input),
            Err(AppError::Form(e)) => errors.extend_prefixed(&format!("slaves.{index}.{row}"), e),
            Err(e) => return Err(e),
        }
    }

    if errors.is_empty() {
        Ok(Some(parsed))
    } else {
        Err(AppError::Form(errors))
    }
}

/// Category and filter links carried on the master form.
struct ProductLinks {
    category_xml_ids: Option<Vec<DbId>>,
    filter_ids: Option<Vec<DbId>>,
}

impl ProductLinks {
    fn take(master: &mut FormData) -> AppResult<Self> {
        Ok(Self {
            category_xml_ids: take_ids(master, "category_xml_ids")?,
            filter_ids: take_ids(master, "filter_ids")?,
        })
    }

    async fn apply(&self, tx: &mut Transaction<'_, Postgres>, product_id: DbId) -> AppResult<()> {
        if let Some(ids) = &self.category_xml_ids {
            ProductRepo::set_categories(tx, product_id, ids).await?;
        }
        if let Some(ids) = &self.filter_ids {
            ProductRepo::set_filters(tx, product_id, ids).await?;
        }
        Ok(())
    }
}

/// Satellite rows parsed from the slave forms.
struct ProductDetails {
    params: Option<Vec<CreateProductParamsKv>>,
    packs: Option<Vec<CreateProductPackKv>>,
    stocks: Option<Vec<CreateProductStock>>,
    attachments: Option<Vec<CreateProductAttachment>>,
}

impl ProductDetails {
    /// Parse every group before anything is written.
    fn parse(submission: &Submission) -> AppResult<Self> {
        Ok(Self {
            params: parse_rows(submission, PARAMS_SLAVE)?,
            packs: parse_rows(submission, PACKS_SLAVE)?,
            stocks: parse_rows(submission, STOCKS_SLAVE)?,
            attachments: parse_rows(submission, ATTACHMENTS_SLAVE)?,
        })
    }

    async fn replace(&self, tx: &mut Transaction<'_, Postgres>, product_id: DbId) -> AppResult<()> {
        if let Some(params) = &self.params {
            ProductParamsKvRepo::delete_for_product(&mut **tx, product_id).await?;
            for input in params {
                ProductParamsKvRepo::create(&mut **tx, product_id, input).await?;
            }
        }
        if let Some(packs) = &self.packs {
            ProductPackKvRepo::delete_for_product(&mut **tx, product_id).await?;
            for input in packs {
                ProductPackKvRepo::create(&mut **tx, product_id, input).await?;
            }
        }
        if let Some(stocks) = &self.stocks {
            ProductStockRepo::delete_for_product(&mut **tx, product_id).await?;
            for input in stocks {
                ProductStockRepo::create(&mut **tx, product_id, input).await?;
            }
        }
        if let Some(attachments) = &self.attachments {
            ProductAttachmentRepo::delete_for_product(&mut **tx, product_id).await?;
            for input in attachments {
                ProductAttachmentRepo::create(&mut **tx, product_id, input).await?;
            }
        }
        Ok(())
    }
}

/// Products; records include their satellite rows and link ids.
pub struct ProductStore;

impl ProductStore {
    async fn record(pool: &PgPool, product: Product) -> AppResult<Value> {
        let id = product.id;
        let mut record = to_record(product)?;
        if let Value::Object(map) = &mut record {
            map.insert(
                "params".into(),
                to_record(ProductParamsKvRepo::list_for_product(pool, id).await?)?,
            );
            map.insert(
                "packs".into(),
                to_record(ProductPackKvRepo::list_for_product(pool, id).await?)?,
            );
            map.insert(
                "stocks".into(),
                to_record(ProductStockRepo::list_for_product(pool, id).await?)?,
            );
            map.insert(
                "attachments".into(),
                to_record(ProductAttachmentRepo::list_for_product(pool, id).await?)?,
            );
            map.insert(
                "category_xml_ids".into(),
                to_record(ProductRepo::category_ids(pool, id).await?)?,
            );
            map.insert(
                "filter_ids".into(),
                to_record(ProductRepo::filter_ids(pool, id).await?)?,
            );
        }
        Ok(record)
    }
}

#[async_trait]
impl EntityStore for ProductStore {
    fn entity(&self) -> &'static str {
        "Product"
    }

    async fn list(&self, pool: &PgPool, page: &PaginationParams) -> AppResult<Vec<Value>> {
        let params = ProductListParams {
            limit: page.limit,
            offset: page.offset,
            ..Default::default()
        };
        ProductRepo::list(pool, &params)
            .await?
            .into_iter()
            .map(to_record)
            .collect()
    }

    async fn fetch(&self, pool: &PgPool, id: DbId) -> AppResult<Option<Value>> {
        match ProductRepo::find_by_id(pool, id).await? {
            Some(product) => Ok(Some(Self::record(pool, product).await?)),
            None => Ok(None),
        }
    }

    async fn create(&self, pool: &PgPool, submission: Submission) -> AppResult<Value> {
        let details = ProductDetails::parse(&submission)?;
        let mut master = submission.master;
        let links = ProductLinks::take(&mut master)?;
        let input: CreateProduct = parse_new(master)?;

        let mut tx = pool.begin().await?;
        let product = ProductRepo::create_in(&mut tx, &input).await?;
        links.apply(&mut tx, product.id).await?;
        details.replace(&mut tx, product.id).await?;
        tx.commit().await?;

        Self::record(pool, product).await
    }

    async fn update(
        &self,
        pool: &PgPool,
        id: DbId,
        submission: Submission,
    ) -> AppResult<Option<Value>> {
        let details = ProductDetails::parse(&submission)?;
        let mut master = submission.master;
        let links = ProductLinks::take(&mut master)?;
        let input: UpdateProduct = parse_form(master)?;

        let mut tx = pool.begin().await?;
        let Some(product) = ProductRepo::update_in(&mut tx, id, &input).await? else {
            return Ok(None);
        };
        links.apply(&mut tx, id).await?;
        details.replace(&mut tx, id).await?;
        tx.commit().await?;

        Ok(Some(Self::record(pool, product).await?))
    }

    async fn delete(&self, pool: &PgPool, id: DbId) -> AppResult<bool> {
        Ok(ProductRepo::delete(pool, id).await?)
    }
}
