//! Environment-driven settings for the form pipeline.

use crate::validate::SchemaFailurePolicy;

/// Selects [`SchemaFailurePolicy`]: `open` or `closed`.
pub const SCHEMA_FAILURE_POLICY_VAR: &str = "INVOICELY_SCHEMA_FAILURE_POLICY";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormsConfig {
    pub schema_failure_policy: SchemaFailurePolicy,
}

impl FormsConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the process environment, a settings file, a test map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let schema_failure_policy = match lookup(SCHEMA_FAILURE_POLICY_VAR) {
            None => SchemaFailurePolicy::default(),
            Some(raw) => raw.parse::<SchemaFailurePolicy>().unwrap_or_else(|err| {
                tracing::warn!(
                    var = SCHEMA_FAILURE_POLICY_VAR,
                    value = %raw,
                    error = %err,
                    "ignoring invalid setting; using default"
                );
                SchemaFailurePolicy::default()
            }),
        };

        Self {
            schema_failure_policy,
        }
    }
}
