use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use invoicely_core::ClientId;

use super::de;
use crate::schema::{FieldSchema, ObjectSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 5] = [
        InvoiceStatus::Draft,
        InvoiceStatus::Sent,
        InvoiceStatus::Paid,
        InvoiceStatus::Overdue,
        InvoiceStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }
}

/// A manually entered invoice line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItemInput {
    pub description: String,
    #[serde(deserialize_with = "de::number")]
    pub quantity: f64,
    #[serde(deserialize_with = "de::number")]
    pub unit_price: f64,
    #[serde(default, deserialize_with = "de::opt_number", skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceCreate {
    pub client_id: ClientId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<InvoiceStatus>,
    #[serde(default, deserialize_with = "de::opt_date", skip_serializing_if = "Option::is_none")]
    pub issued_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::opt_date", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_link: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<InvoiceItemInput>,
}

pub fn invoice_item_schema() -> ObjectSchema {
    ObjectSchema::new()
        .field(
            "description",
            FieldSchema::text("Description").required().max_length(500),
        )
        .field("quantity", FieldSchema::number("Quantity").required().greater_than(0.0))
        .field("unit_price", FieldSchema::number("Unit price").required().min(0.0))
        .field("tax_rate", FieldSchema::number("Tax rate").min(0.0).max(100.0))
}

pub fn invoice_schema() -> ObjectSchema {
    ObjectSchema::new()
        .field("client_id", FieldSchema::text("Client").required())
        .field("number", FieldSchema::text("Invoice number").max_length(100))
        .field(
            "status",
            FieldSchema::text("Status").one_of(InvoiceStatus::ALL.map(InvoiceStatus::as_str)),
        )
        .field("issued_date", FieldSchema::date("Issue date"))
        .field("due_date", FieldSchema::date("Due date"))
        .field("currency", FieldSchema::text("Currency").length(3))
        .field("notes", FieldSchema::text("Notes").max_length(1000))
        .field("payment_link", FieldSchema::text("Payment link").max_length(500))
        .field(
            "items",
            FieldSchema::list("Items", FieldSchema::object("Item", invoice_item_schema())),
        )
}
