//! Identifier derivation performed when a record is saved for the first time.
//!
//! Human-facing identifiers (`name`, `slug_title`, `code`, `cat_id`) are
//! computed from a source field exactly once. Records fed by a supplier
//! import carry `import_fl = true` and keep the identifiers the supplier
//! assigned.

use crate::catalog::MAX_NAME_LEN;
use crate::hashing::content_hash;
use crate::slug::slugify;

/// A record whose identifying fields are derived on first save.
pub trait FirstSave {
    /// Whether the record already exists in storage.
    fn is_persisted(&self) -> bool;

    /// Supplier-imported records keep their supplier identifiers.
    fn is_imported(&self) -> bool {
        false
    }

    /// Fill identifying fields from their source fields.
    fn derive_identity(&mut self);

    /// Run derivation if this is the first save of a locally created record.
    ///
    /// Returns `true` when identifiers were derived.
    fn prepare_save(&mut self) -> bool {
        if self.is_persisted() || self.is_imported() {
            return false;
        }
        self.derive_identity();
        true
    }
}

/// Lookup name for makers, brands, statuses and product types.
pub fn lookup_name(official: &str) -> String {
    slugify(official)
}

/// Slug of a site category.
pub fn category_slug(title: &str) -> String {
    slugify(title)
}

/// Identifier of a locally created supplier category.
pub fn default_cat_id(title: &str) -> String {
    content_hash(title)
}

/// Article number of a locally created product.
pub fn default_code(title: &str) -> String {
    content_hash(title)
}

/// Product slug: `{maker}_{title}_{code}` slugified, at most 255 chars.
///
/// `maker` is the supplier's official (display) name.
pub fn default_product_slug(maker: &str, title: &str, code: &str) -> String {
    slugify(&format!("{maker}_{title}_{code}"))
        .chars()
        .take(MAX_NAME_LEN)
        .collect()
}

/// Keep a supplied code, otherwise derive one from the title.
pub fn code_or_default(code: Option<&str>, title: &str) -> String {
    match code {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => default_code(title),
    }
}

/// Storage path of a product's main picture.
pub fn product_upload_path(maker_name: &str, title: &str) -> String {
    format!("upload_product/{maker_name}/{}.jpg", content_hash(title))
}

/// Storage path of a product attachment.
pub fn attachment_upload_path(maker_name: &str, description: &str) -> String {
    format!("upload_attachment/{maker_name}/{}.jpg", content_hash(description))
}
