use serde::{Deserialize, Serialize};

use super::de;
use crate::schema::{FieldSchema, ObjectSchema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreate {
    pub sku: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(deserialize_with = "de::number")]
    pub unit_price: f64,
    #[serde(default, deserialize_with = "de::opt_number", skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "de::opt_integer", skip_serializing_if = "Option::is_none")]
    pub quantity_available: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number", skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number", skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "de::opt_integer", skip_serializing_if = "Option::is_none")]
    pub quantity_available: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// The stock adjustment dialog: a signed, non-zero number of units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityAdjustmentInput {
    #[serde(deserialize_with = "de::integer")]
    pub adjustment: i64,
}

pub fn product_schema() -> ObjectSchema {
    ObjectSchema::new()
        .field("sku", FieldSchema::text("SKU").required().max_length(100))
        .field("name", FieldSchema::text("Name").required().max_length(255))
        .field("description", FieldSchema::text("Description").max_length(1000))
        .field("category", FieldSchema::text("Category").max_length(100))
        .field("unit_price", FieldSchema::number("Unit price").required().min(0.0))
        .field("tax_rate", FieldSchema::number("Tax rate").min(0.0).max(100.0))
        .field("currency", FieldSchema::text("Currency").length(3))
        .field(
            "quantity_available",
            FieldSchema::integer("Quantity").min(0.0),
        )
        .field("is_active", FieldSchema::boolean("Active"))
}

pub fn product_update_schema() -> ObjectSchema {
    product_schema().partial()
}

pub fn adjust_quantity_schema() -> ObjectSchema {
    ObjectSchema::new().field(
        "adjustment",
        FieldSchema::integer("Adjustment")
            .required()
            .non_zero()
            .message("Adjustment cannot be zero"),
    )
}
