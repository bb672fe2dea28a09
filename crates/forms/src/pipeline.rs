//! validate -> gate -> sanitize -> format, in the order screens need it.

use serde::de::DeserializeOwned;

use crate::config::FormsConfig;
use crate::error::{FormErrors, SubmitError, has_errors};
use crate::format::format_form_data;
use crate::sanitize::sanitize_form_data;
use crate::schema::Schema;
use crate::validate::{SchemaFailurePolicy, validate_form_with};
use crate::value::FormData;

/// Settings a screen passes into the pipeline explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormContext {
    policy: SchemaFailurePolicy,
}

impl FormContext {
    pub fn new(policy: SchemaFailurePolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &FormsConfig) -> Self {
        Self::new(config.schema_failure_policy)
    }

    pub fn policy(&self) -> SchemaFailurePolicy {
        self.policy
    }
}

/// Validate `data`; if it passes, return the sanitized and formatted payload.
pub fn prepare_submission<S: Schema + ?Sized>(
    ctx: &FormContext,
    schema: &S,
    data: &FormData,
) -> Result<FormData, FormErrors> {
    let errors = validate_form_with(schema, data, ctx.policy());
    if has_errors(&errors) {
        tracing::debug!(invalid_fields = errors.len(), "form submission blocked");
        return Err(errors);
    }

    let payload = format_form_data(&sanitize_form_data(data));
    tracing::debug!(fields = payload.len(), "form ready for submission");
    Ok(payload)
}

/// [`prepare_submission`], then decode the payload into a typed request.
pub fn prepare_request<T, S>(ctx: &FormContext, schema: &S, data: &FormData) -> Result<T, SubmitError>
where
    T: DeserializeOwned,
    S: Schema + ?Sized,
{
    let payload = prepare_submission(ctx, schema, data).map_err(SubmitError::Invalid)?;
    Ok(serde_json::from_value(payload.to_json())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSchema, ObjectSchema};
    use serde::Deserialize;
    use serde_json::json;

    fn schema() -> ObjectSchema {
        ObjectSchema::new()
            .field("name", FieldSchema::text("Name").required().max_length(20))
            .field("email", FieldSchema::text("Email").email())
    }

    #[test]
    fn invalid_form_never_reaches_formatting() {
        let data = FormData::new().with("name", "   ");
        let errors = prepare_submission(&FormContext::default(), &schema(), &data).unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));
    }

    #[test]
    fn valid_form_is_sanitized_then_formatted() {
        let data = FormData::new().with("name", "  Bob  ").with("email", "");
        let payload = prepare_submission(&FormContext::default(), &schema(), &data).unwrap();
        assert_eq!(payload.to_json(), json!({ "name": "Bob" }));
    }

    #[test]
    fn typed_request_decodes_from_payload() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct NewClient {
            name: String,
            email: Option<String>,
        }

        let data = FormData::new().with("name", "Bob").with("email", " bob@example.com ");
        let req: NewClient = prepare_request(&FormContext::default(), &schema(), &data).unwrap();
        assert_eq!(
            req,
            NewClient {
                name: "Bob".into(),
                email: Some("bob@example.com".into())
            }
        );
    }

    #[test]
    fn shape_mismatch_is_a_decode_error() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct NeedsAge {
            age: u32,
        }

        let data = FormData::new().with("name", "Bob");
        let err = prepare_request::<NeedsAge, _>(&FormContext::default(), &schema(), &data).unwrap_err();
        assert!(matches!(err, SubmitError::Decode(_)));
        assert!(err.field_errors().is_none());
    }

    #[test]
    fn context_follows_config() {
        let config = FormsConfig {
            schema_failure_policy: SchemaFailurePolicy::FailOpen,
        };
        assert_eq!(FormContext::from_config(&config).policy(), SchemaFailurePolicy::FailOpen);
    }
}
