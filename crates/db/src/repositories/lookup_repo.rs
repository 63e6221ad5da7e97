//! Repositories for the name/official lookup tables.

use catalog_core::identity::FirstSave;
use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::lookup::{
    Brand, CreateBrand, CreateMaker, CreateProductType, CreateStatus, Maker, ProductType, Status,
    UpdateBrand, UpdateMaker, UpdateProductType, UpdateStatus,
};

/// Column list shared by all lookup tables.
const COLUMNS: &str = "id, name, official, created_at, updated_at";

macro_rules! define_lookup_repo {
    (
        $(#[$meta:meta])*
        $repo:ident, $table:literal, $row:ty, $create:ty, $update:ty
    ) => {
        $(#[$meta])*
        pub struct $repo;

        impl $repo {
            /// Insert a row, deriving `name` from `official`.
            pub async fn create(pool: &PgPool, input: &$create) -> Result<$row, sqlx::Error> {
                let mut draft = input.clone();
                draft.prepare_save();

                let query = format!(
                    "INSERT INTO {} (name, official) VALUES ($1, $2) RETURNING {COLUMNS}",
                    $table
                );
                sqlx::query_as::<_, $row>(&query)
                    .bind(&draft.name)
                    .bind(&draft.official)
                    .fetch_one(pool)
                    .await
            }

            pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<$row>, sqlx::Error> {
                let query = format!("SELECT {COLUMNS} FROM {} WHERE id = $1", $table);
                sqlx::query_as::<_, $row>(&query)
                    .bind(id)
                    .fetch_optional(pool)
                    .await
            }

            /// Find a row by its derived slug name.
            pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<$row>, sqlx::Error> {
                let query = format!("SELECT {COLUMNS} FROM {} WHERE name = $1", $table);
                sqlx::query_as::<_, $row>(&query)
                    .bind(name)
                    .fetch_optional(pool)
                    .await
            }

            /// List all rows ordered by display name.
            pub async fn list(pool: &PgPool) -> Result<Vec<$row>, sqlx::Error> {
                let query = format!("SELECT {COLUMNS} FROM {} ORDER BY official, id", $table);
                sqlx::query_as::<_, $row>(&query).fetch_all(pool).await
            }

            /// Update the display name. `name` keeps the value derived on insert.
            ///
            /// Returns `None` if no row with the given `id` exists.
            pub async fn update(
                pool: &PgPool,
                id: DbId,
                input: &$update,
            ) -> Result<Option<$row>, sqlx::Error> {
                let query = format!(
                    "UPDATE {} SET official = COALESCE($2, official) \
                     WHERE id = $1 RETURNING {COLUMNS}",
                    $table
                );
                sqlx::query_as::<_, $row>(&query)
                    .bind(id)
                    .bind(&input.official)
                    .fetch_optional(pool)
                    .await
            }

            /// Delete a row. Returns `true` if a row was removed.
            pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
                let query = format!("DELETE FROM {} WHERE id = $1", $table);
                let result = sqlx::query(&query).bind(id).execute(pool).await?;
                Ok(result.rows_affected() > 0)
            }
        }
    };
}

define_lookup_repo! {
    /// Provides CRUD operations for makers (suppliers).
    MakerRepo, "makers", Maker, CreateMaker, UpdateMaker
}

define_lookup_repo! {
    /// Provides CRUD operations for site brands.
    BrandRepo, "brands", Brand, CreateBrand, UpdateBrand
}

define_lookup_repo! {
    /// Provides CRUD operations for statuses.
    StatusRepo, "statuses", Status, CreateStatus, UpdateStatus
}

define_lookup_repo! {
    /// Provides CRUD operations for product types.
    ProductTypeRepo, "product_types", ProductType, CreateProductType, UpdateProductType
}
