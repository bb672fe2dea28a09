//! Form validation and submission pipeline.
//!
//! Screens collect raw values into a [`FormData`], then:
//!
//! 1. [`validate_form`] against a [`Schema`] and stop if [`has_errors`];
//! 2. [`sanitize_form_data`] (trim, blank text becomes absent);
//! 3. [`format_form_data`] (drop absent fields, dates to ISO-8601 text);
//! 4. hand the payload to the API client.
//!
//! [`prepare_submission`] / [`prepare_request`] run those steps in order.
//! Everything here is synchronous and pure (no IO, no shared state).

pub mod config;
pub mod error;
pub mod format;
pub mod pipeline;
pub mod resources;
pub mod sanitize;
pub mod schema;
pub mod validate;
pub mod value;

pub use config::FormsConfig;
pub use error::{FORM_LEVEL_KEY, FormErrors, SchemaError, SubmitError, has_errors};
pub use format::format_form_data;
pub use pipeline::{FormContext, prepare_request, prepare_submission};
pub use sanitize::sanitize_form_data;
pub use schema::{FieldKind, FieldSchema, ObjectSchema, Schema, Violation};
pub use validate::{SchemaFailurePolicy, validate_form, validate_form_with};
pub use value::{FormData, FormValue};
