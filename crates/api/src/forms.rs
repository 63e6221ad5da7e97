//! Form declarations for the admin factories.

use serde_json::Value;

use crate::factory::{FieldSpec, FormData, FormErrors, StaticForm};

const MEANINGS: &[&str] = &["image", "file"];
const FILTER_TYPES: &[&str] = &["PRICE", "STOCK", "M2M", "FK", "KV"];

const LOOKUP_FIELDS: &[FieldSpec] = &[FieldSpec::text("official", "Name", 255).required()];

pub const MAKER: StaticForm = StaticForm::new("MakerForm", LOOKUP_FIELDS);
pub const BRAND: StaticForm = StaticForm::new("BrandForm", LOOKUP_FIELDS);
pub const STATUS: StaticForm = StaticForm::new("StatusForm", LOOKUP_FIELDS);
pub const PRODUCT_TYPE: StaticForm = StaticForm::new("ProductTypeForm", LOOKUP_FIELDS);

const BRAND_MAKER_FIELDS: &[FieldSpec] = &[
    FieldSpec::reference("maker_id", "Maker", "Maker").required(),
    FieldSpec::text("title", "Title", 255),
    FieldSpec::text("code", "Code", 255),
    FieldSpec::reference("brand_id", "Brand", "Brand"),
    FieldSpec::text("prov_brand_id", "Supplier brand id", 255),
];

pub const BRAND_MAKER: StaticForm = StaticForm::new("BrandMakerForm", BRAND_MAKER_FIELDS);

const CATEGORY_SITE_FIELDS: &[FieldSpec] = &[
    FieldSpec::reference("parent_id", "Parent", "CategorySite"),
    FieldSpec::text("title", "Title", 255).required(),
    FieldSpec::long_text("preview", "Preview"),
    FieldSpec::long_text("content", "Content"),
    FieldSpec::boolean("show", "Show"),
    FieldSpec::text("image", "Image", 255),
    FieldSpec::integer("position", "Position"),
];

pub const CATEGORY_SITE: StaticForm = StaticForm::new("CategorySiteForm", CATEGORY_SITE_FIELDS);

const CATEGORY_XML_FIELDS: &[FieldSpec] = &[
    FieldSpec::reference("parent_id", "Parent", "CategoryXml"),
    FieldSpec::reference("maker_id", "Maker", "Maker").required(),
    FieldSpec::reference("category_site_id", "Site category", "CategorySite"),
    FieldSpec::text("title", "Title", 255).required(),
    FieldSpec::text("cat_id", "Supplier category id", 100),
    FieldSpec::reference("status_id", "Status", "Status"),
    FieldSpec::boolean("import_fl", "Imported"),
];

pub const CATEGORY_XML: StaticForm = StaticForm::new("CategoryXmlForm", CATEGORY_XML_FIELDS)
    .with_clean(clean_imported_category);

const PRODUCT_FIELDS: &[FieldSpec] = &[
    FieldSpec::reference("maker_id", "Maker", "Maker").required(),
    FieldSpec::reference("parent_id", "Main product", "Product"),
    FieldSpec::reference("brand_maker_id", "Brand", "BrandMaker"),
    FieldSpec::reference("status_id", "Status", "Status"),
    FieldSpec::reference("product_type_id", "Product type", "ProductType"),
    FieldSpec::text("title", "Title", 255).required(),
    FieldSpec::text("prov_product_id", "Supplier product id", 50),
    FieldSpec::text("prov_main_product_id", "Supplier main product id", 50),
    FieldSpec::text("slug_title", "Slug", 255),
    FieldSpec::text("code", "Code", 50),
    FieldSpec::long_text("content", "Description"),
    FieldSpec::long_text("long_content", "Full description"),
    FieldSpec::decimal("price", "Price"),
    FieldSpec::integer("stock", "Stock"),
    FieldSpec::boolean("show", "Show"),
    FieldSpec::boolean("import_fl", "Imported"),
    FieldSpec::references("category_xml_ids", "Categories", "CategoryXml"),
    FieldSpec::references("filter_ids", "Filters", "Filter"),
];

pub const PRODUCT: StaticForm = StaticForm::new("ProductForm", PRODUCT_FIELDS)
    .with_clean(clean_imported_product);

const PARAMS_KV_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("abbr", "Key", 255).required(),
    FieldSpec::text("name", "Name", 255).required(),
    FieldSpec::text("value", "Value", catalog_core::catalog::MAX_PARAM_VALUE_LEN),
    FieldSpec::integer("position", "Position"),
];

pub const PARAMS_KV: StaticForm = StaticForm::new("ProductParamsKvForm", PARAMS_KV_FIELDS);

const PACK_KV_FIELDS: &[FieldSpec] = &[
    FieldSpec::integer("pack_id", "Pack"),
    FieldSpec::text("abbr", "Key", 255).required(),
    FieldSpec::text("name", "Name", 255).required(),
    FieldSpec::text("value", "Value", 255),
    FieldSpec::integer("position", "Position"),
];

pub const PACK_KV: StaticForm = StaticForm::new("ProductPackKvForm", PACK_KV_FIELDS);

const STOCK_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("geo", "Location", 100).required(),
    FieldSpec::text("type", "Type", 255).required(),
    FieldSpec::integer("value", "Quantity").required(),
];

pub const STOCK: StaticForm = StaticForm::new("ProductStockForm", STOCK_FIELDS);

const ATTACHMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::choice("meaning", "Meaning", MEANINGS).required(),
    FieldSpec::text("file", "File", 255),
    FieldSpec::text("image", "Image", 255),
    FieldSpec::text("type", "Type", 20).required(),
    FieldSpec::text("description", "Description", 255).required(),
    FieldSpec::integer("position", "Position"),
];

pub const ATTACHMENT: StaticForm = StaticForm::new("ProductAttachmentForm", ATTACHMENT_FIELDS);

const FILTER_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("title", "Title", 255).required(),
    FieldSpec::text("name", "Name", 255).required(),
    FieldSpec::text("value", "Value", 50).required(),
    FieldSpec::choice("type", "Type", FILTER_TYPES).required(),
    FieldSpec::integer("position", "Position").required(),
];

pub const FILTER: StaticForm = StaticForm::new("FilterForm", FILTER_FIELDS);

const ORDER_REFERENCE_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("name", "Name", 255).required(),
    FieldSpec::text("official", "Label", 255).required(),
    FieldSpec::text("field_name", "Field", 30).required(),
    FieldSpec::boolean("field_order", "Descending").required(),
    FieldSpec::integer("position", "Position").required(),
];

pub const ORDER_REFERENCE: StaticForm = StaticForm::new("OrderReferenceForm", ORDER_REFERENCE_FIELDS);

const SETTINGS_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("title", "Title", 128).required(),
    FieldSpec::long_text("content", "Content"),
];

pub const SETTINGS: StaticForm = StaticForm::new("SettingsForm", SETTINGS_FIELDS);

fn is_imported(data: &FormData) -> bool {
    data.get("import_fl").and_then(Value::as_bool) == Some(true)
}

fn is_blank(data: &FormData, field: &str) -> bool {
    !matches!(data.get(field), Some(Value::String(s)) if !s.is_empty())
}

/// Imported categories keep the supplier's id, so it must be given.
fn clean_imported_category(data: &FormData, errors: &mut FormErrors) {
    if is_imported(data) && is_blank(data, "cat_id") {
        errors.add("cat_id", "Imported categories need a supplier category id.");
    }
}

/// Imported products keep the supplier's identifiers.
fn clean_imported_product(data: &FormData, errors: &mut FormErrors) {
    if !is_imported(data) {
        return;
    }
    for field in ["code", "slug_title"] {
        if is_blank(data, field) {
            errors.add(field, "Imported products need this identifier.");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::factory::{ComposedForm, FormLayer};

    fn validate(form: StaticForm, value: Value) -> Result<FormData, FormErrors> {
        let form: Arc<dyn FormLayer> = Arc::new(form);
        let data = value.as_object().cloned().unwrap_or_default();
        ComposedForm::compose(&[], &form).validate(data)
    }

    #[test]
    fn lookup_forms_share_fields() {
        assert_eq!(MAKER.fields, BRAND.fields);
        assert_eq!(STATUS.fields[0].name, "official");
    }

    #[test]
    fn imported_product_requires_identifiers() {
        let errors = validate(
            PRODUCT,
            json!({"maker_id": 1, "title": "Chair", "import_fl": true, "code": "A1"}),
        )
        .unwrap_err();
        assert!(errors.contains("slug_title"));
        assert!(!errors.contains("code"));
    }

    #[test]
    fn local_product_may_omit_identifiers() {
        let cleaned = validate(PRODUCT, json!({"maker_id": 1, "title": "Chair"})).unwrap();
        assert_eq!(cleaned["title"], "Chair");
        assert!(!cleaned.contains_key("code"));
    }

    #[test]
    fn imported_category_requires_cat_id() {
        let errors = validate(
            CATEGORY_XML,
            json!({"maker_id": 1, "title": "Chairs", "import_fl": true}),
        )
        .unwrap_err();
        assert!(errors.contains("cat_id"));
    }

    #[test]
    fn attachment_meaning_is_a_choice() {
        let errors = validate(
            ATTACHMENT,
            json!({"meaning": "video", "type": "jpg", "description": "Front"}),
        )
        .unwrap_err();
        assert!(errors.contains("meaning"));
    }

    #[test]
    fn filter_type_accepts_known_kinds() {
        let cleaned = validate(
            FILTER,
            json!({"title": "Price", "name": "price", "value": "p", "type": "PRICE", "position": 1}),
        )
        .unwrap();
        assert_eq!(cleaned["type"], "PRICE");
    }
}
