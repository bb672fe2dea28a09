use serde::{Deserialize, Serialize};

use crate::schema::{FieldSchema, ObjectSchema, Schema, Violation};
use crate::error::SchemaError;
use crate::value::FormData;

const PASSWORD_MIN_LENGTH: usize = 6;

fn password_field(label: &str) -> FieldSchema {
    FieldSchema::text(label)
        .required()
        .min_length(PASSWORD_MIN_LENGTH)
        .message(format!("{label} must be at least {PASSWORD_MIN_LENGTH} characters long"))
        .contains_digit()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub password: String,
}

pub fn register_schema() -> ObjectSchema {
    ObjectSchema::new()
        .field("email", FieldSchema::text("Email").required().email())
        .field("full_name", FieldSchema::text("Full name"))
        .field("password", password_field("Password"))
}

/// Profile and business details shown on invoices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

pub fn profile_schema() -> ObjectSchema {
    ObjectSchema::new()
        .field("full_name", FieldSchema::text("Full name"))
        .field("phone", FieldSchema::text("Phone"))
        .field("avatar_url", FieldSchema::text("Avatar URL"))
        .field("company_name", FieldSchema::text("Company name"))
        .field("company_logo_url", FieldSchema::text("Company logo URL"))
        .field("company_address", FieldSchema::text("Company address"))
        .field("tax_id", FieldSchema::text("Tax ID"))
        .field("website", FieldSchema::text("Website"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

/// Password change form: field rules plus the confirmation match.
#[derive(Debug, Clone)]
pub struct PasswordChangeSchema {
    fields: ObjectSchema,
}

impl Default for PasswordChangeSchema {
    fn default() -> Self {
        Self {
            fields: ObjectSchema::new()
                .field(
                    "current_password",
                    FieldSchema::text("Current password").required(),
                )
                .field("new_password", password_field("New password"))
                .field(
                    "confirm_password",
                    FieldSchema::text("Password confirmation").required(),
                ),
        }
    }
}

impl Schema for PasswordChangeSchema {
    fn violations(&self, data: &FormData) -> Result<Vec<Violation>, SchemaError> {
        let mut violations = self.fields.violations(data)?;

        let new = data.get("new_password").and_then(|v| v.as_text()).map(str::trim);
        let confirm = data.get("confirm_password").and_then(|v| v.as_text()).map(str::trim);
        if let (Some(new), Some(confirm)) = (new, confirm) {
            if !confirm.is_empty() && new != confirm {
                violations.push(Violation::new(
                    vec!["confirm_password".to_string()],
                    "Passwords do not match",
                ));
            }
        }

        Ok(violations)
    }
}
