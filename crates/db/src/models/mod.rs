//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Derived identifier fields never appear in update DTOs. Nullable columns
//! use `Option<Option<T>>` in update DTOs: an absent field keeps the stored
//! value, an explicit `null` clears it.

use serde::{Deserialize, Deserializer};

pub mod brand_maker;
pub mod category_site;
pub mod category_xml;
pub mod filter;
pub mod lookup;
pub mod order_reference;
pub mod product;
pub mod product_attachment;
pub mod product_pack_kv;
pub mod product_params_kv;
pub mod product_stock;
pub mod settings;

/// Deserialize a present field as `Some`, so `null` becomes `Some(None)`.
///
/// Pair with `#[serde(default)]` so a missing field stays `None`.
pub(crate) fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
