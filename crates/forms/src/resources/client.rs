use serde::{Deserialize, Serialize};

use crate::schema::{FieldSchema, ObjectSchema};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCreate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Partial update; only the fields that are present are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

pub fn client_schema() -> ObjectSchema {
    ObjectSchema::new()
        .field("name", FieldSchema::text("Name").required())
        .field("email", FieldSchema::text("Email").email())
        .field("phone", FieldSchema::text("Phone"))
        .field("address", FieldSchema::text("Address"))
}

pub fn client_update_schema() -> ObjectSchema {
    client_schema().partial()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{FormContext, prepare_request};
    use crate::value::FormData;

    #[test]
    fn create_form_decodes_and_omits_blank_fields() {
        let data = FormData::new()
            .with("name", " Acme Ltd ")
            .with("email", "billing@acme.test")
            .with("phone", "")
            .with("address", "   ");
        let req: ClientCreate =
            prepare_request(&FormContext::default(), &client_schema(), &data).unwrap();
        assert_eq!(
            req,
            ClientCreate {
                name: "Acme Ltd".into(),
                email: Some("billing@acme.test".into()),
                phone: None,
                address: None,
            }
        );
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({ "name": "Acme Ltd", "email": "billing@acme.test" })
        );
    }

    #[test]
    fn update_form_allows_missing_name() {
        let data = FormData::new().with("phone", "+234 800 000 0000");
        let req: ClientUpdate =
            prepare_request(&FormContext::default(), &client_update_schema(), &data).unwrap();
        assert_eq!(req.name, None);
        assert_eq!(req.phone.as_deref(), Some("+234 800 000 0000"));
    }
}
