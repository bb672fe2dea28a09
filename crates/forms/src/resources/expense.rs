use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::de;
use crate::schema::{FieldSchema, ObjectSchema};

/// Suggested categories for the category picker.
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "office",
    "travel",
    "utilities",
    "software",
    "hardware",
    "supplies",
    "rent",
    "salaries",
    "marketing",
    "meals",
    "transportation",
    "professional_services",
    "insurance",
    "taxes",
    "maintenance",
    "other",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseCreate {
    pub category: String,
    pub description: String,
    #[serde(deserialize_with = "de::number")]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(deserialize_with = "de::date")]
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number", skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, deserialize_with = "de::opt_date", skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

pub fn expense_schema() -> ObjectSchema {
    ObjectSchema::new()
        .field("category", FieldSchema::text("Category").required().max_length(100))
        .field(
            "description",
            FieldSchema::text("Description").required().max_length(500),
        )
        .field("amount", FieldSchema::number("Amount").required().greater_than(0.0))
        .field("currency", FieldSchema::text("Currency").length(3))
        .field("vendor", FieldSchema::text("Vendor").max_length(255))
        .field("date", FieldSchema::date("Date").required())
        .field("receipt_url", FieldSchema::text("Receipt URL").max_length(500))
        .field("tags", FieldSchema::list("Tags", FieldSchema::text("Tag")))
}

pub fn expense_update_schema() -> ObjectSchema {
    expense_schema().partial()
}
