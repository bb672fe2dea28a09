//! Form validation entry points.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use invoicely_core::DomainError;

use crate::error::FormErrors;
use crate::schema::Schema;
use crate::value::FormData;

/// Message shown when the schema itself cannot be applied.
pub const SCHEMA_FAILURE_MESSAGE: &str = "This form cannot be checked right now. Please try again later.";

/// What to report when a schema fails internally (misconfiguration).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaFailurePolicy {
    /// Report no errors and let the backend decide.
    FailOpen,
    /// Report a single form-level error, blocking submission.
    #[default]
    FailClosed,
}

impl FromStr for SchemaFailurePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" | "fail_open" | "fail-open" => Ok(Self::FailOpen),
            "closed" | "fail_closed" | "fail-closed" => Ok(Self::FailClosed),
            other => Err(DomainError::validation(format!(
                "unknown schema failure policy `{other}` (expected `open` or `closed`)"
            ))),
        }
    }
}

/// Validate `data` against `schema` with the default policy.
pub fn validate_form<S: Schema + ?Sized>(schema: &S, data: &FormData) -> FormErrors {
    validate_form_with(schema, data, SchemaFailurePolicy::default())
}

/// Validate `data`, collecting one message per failing field path.
///
/// Never returns a hard error: a schema failure resolves according to
/// `policy`.
pub fn validate_form_with<S: Schema + ?Sized>(
    schema: &S,
    data: &FormData,
    policy: SchemaFailurePolicy,
) -> FormErrors {
    match schema.violations(data) {
        Ok(violations) => {
            let mut errors = FormErrors::new();
            for violation in violations {
                errors.insert(violation.field_path(), violation.message);
            }
            errors
        }
        Err(err) => {
            tracing::warn!(error = %err, ?policy, "form schema could not be applied");
            match policy {
                SchemaFailurePolicy::FailOpen => FormErrors::new(),
                SchemaFailurePolicy::FailClosed => FormErrors::form_level(SCHEMA_FAILURE_MESSAGE),
            }
        }
    }
}
