//! Form error model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Key used for errors that belong to the form as a whole.
pub const FORM_LEVEL_KEY: &str = "_form";

/// Field path -> message for every field that currently fails validation.
///
/// Paths are dot-joined (`address.city`, `items.0.quantity`). An empty map
/// means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single error not tied to any field.
    pub fn form_level(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(FORM_LEVEL_KEY, message);
        errors
    }

    /// Record `message` for `path`. The first message recorded for a path wins.
    pub fn insert(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.entry(path.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    /// Clear the error for one field, e.g. once the user edits it.
    pub fn clear(&mut self, path: &str) -> Option<String> {
        self.0.remove(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl core::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for (path, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{path}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// True iff at least one field is invalid. The only gate before submitting.
pub fn has_errors(errors: &FormErrors) -> bool {
    !errors.is_empty()
}

/// A schema that cannot be applied as written.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A rule was attached to a field kind it cannot check.
    #[error("rule `{rule}` cannot apply to {kind} field `{path}`")]
    RuleMismatch {
        path: String,
        rule: &'static str,
        kind: &'static str,
    },

    /// A `one_of` rule with nothing to choose from.
    #[error("field `{path}` has an empty list of allowed values")]
    EmptyOptions { path: String },

    /// The same field name was declared twice in one object.
    #[error("field `{path}` is declared more than once")]
    DuplicateField { path: String },

    /// Failure reported by a caller-supplied schema.
    #[error("schema failure: {0}")]
    Other(String),
}

/// Why a form could not be turned into a request.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("form has invalid fields: {0}")]
    Invalid(FormErrors),

    #[error("formatted form does not match the request shape: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SubmitError {
    /// Field errors to show next to the inputs, if that is what failed.
    pub fn field_errors(&self) -> Option<&FormErrors> {
        match self {
            SubmitError::Invalid(errors) => Some(errors),
            SubmitError::Decode(_) => None,
        }
    }
}
