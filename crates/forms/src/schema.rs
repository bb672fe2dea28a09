//! Declarative form schemas.
//!
//! A [`Schema`] turns a [`FormData`] into the list of rules it violates. The
//! provided [`ObjectSchema`] covers what the resource forms need: required
//! fields, type checks that accept the text produced by input controls, and a
//! small set of rules per field. Callers may plug in their own `Schema`.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate};

use crate::error::SchemaError;
use crate::value::{FormData, FormValue, whole_i64};

static ABSENT: FormValue = FormValue::Absent;

/// One violated rule, located by its nested path segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: Vec<String>,
    pub message: String,
}

impl Violation {
    pub fn new(path: Vec<String>, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }

    /// Dot-joined path, e.g. `items.0.quantity`.
    pub fn field_path(&self) -> String {
        self.path.join(".")
    }
}

/// Validator for a whole form.
pub trait Schema {
    /// Every rule `data` violates. `Err` means the schema itself is unusable.
    fn violations(&self, data: &FormData) -> Result<Vec<Violation>, SchemaError>;
}

impl<S: Schema + ?Sized> Schema for &S {
    fn violations(&self, data: &FormData) -> Result<Vec<Violation>, SchemaError> {
        (**self).violations(data)
    }
}

#[derive(Debug, Clone)]
pub enum FieldKind {
    Text,
    Integer,
    Number,
    Boolean,
    Date,
    Timestamp,
    List(Box<FieldSchema>),
    Object(ObjectSchema),
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Date => "date",
            FieldKind::Timestamp => "timestamp",
            FieldKind::List(_) => "list",
            FieldKind::Object(_) => "object",
        }
    }
}

#[derive(Debug, Clone)]
enum Check {
    MinLength(usize),
    MaxLength(usize),
    ExactLength(usize),
    Min(f64),
    Max(f64),
    GreaterThan(f64),
    NonZero,
    Email,
    ContainsDigit,
    OneOf(Vec<String>),
    Custom {
        name: &'static str,
        test: fn(&FormValue) -> bool,
    },
}

impl Check {
    fn name(&self) -> &'static str {
        match self {
            Check::MinLength(_) => "min_length",
            Check::MaxLength(_) => "max_length",
            Check::ExactLength(_) => "length",
            Check::Min(_) => "min",
            Check::Max(_) => "max",
            Check::GreaterThan(_) => "greater_than",
            Check::NonZero => "non_zero",
            Check::Email => "email",
            Check::ContainsDigit => "contains_digit",
            Check::OneOf(_) => "one_of",
            Check::Custom { name, .. } => *name,
        }
    }

    fn applies_to(&self, kind: &FieldKind) -> bool {
        match self {
            Check::MinLength(_) | Check::MaxLength(_) | Check::ExactLength(_) => {
                matches!(kind, FieldKind::Text | FieldKind::List(_))
            }
            Check::Min(_) | Check::Max(_) | Check::GreaterThan(_) | Check::NonZero => {
                matches!(kind, FieldKind::Integer | FieldKind::Number)
            }
            Check::Email | Check::ContainsDigit | Check::OneOf(_) => {
                matches!(kind, FieldKind::Text)
            }
            Check::Custom { .. } => true,
        }
    }
}

#[derive(Debug, Clone)]
struct Rule {
    check: Check,
    message: Option<String>,
}

/// A value after its kind check passed.
enum Parsed<'a> {
    Text(&'a str),
    Number(f64),
    Count(usize),
    Other,
}

/// Schema of a single field.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    label: String,
    kind: FieldKind,
    required: bool,
    rules: Vec<Rule>,
}

impl FieldSchema {
    fn of(label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            label: label.into(),
            kind,
            required: false,
            rules: Vec::new(),
        }
    }

    pub fn text(label: impl Into<String>) -> Self {
        Self::of(label, FieldKind::Text)
    }

    pub fn integer(label: impl Into<String>) -> Self {
        Self::of(label, FieldKind::Integer)
    }

    pub fn number(label: impl Into<String>) -> Self {
        Self::of(label, FieldKind::Number)
    }

    pub fn boolean(label: impl Into<String>) -> Self {
        Self::of(label, FieldKind::Boolean)
    }

    pub fn date(label: impl Into<String>) -> Self {
        Self::of(label, FieldKind::Date)
    }

    pub fn timestamp(label: impl Into<String>) -> Self {
        Self::of(label, FieldKind::Timestamp)
    }

    pub fn list(label: impl Into<String>, element: FieldSchema) -> Self {
        Self::of(label, FieldKind::List(Box::new(element)))
    }

    pub fn object(label: impl Into<String>, schema: ObjectSchema) -> Self {
        Self::of(label, FieldKind::Object(schema))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    fn rule(mut self, check: Check) -> Self {
        self.rules.push(Rule {
            check,
            message: None,
        });
        self
    }

    pub fn min_length(self, n: usize) -> Self {
        self.rule(Check::MinLength(n))
    }

    pub fn max_length(self, n: usize) -> Self {
        self.rule(Check::MaxLength(n))
    }

    pub fn length(self, n: usize) -> Self {
        self.rule(Check::ExactLength(n))
    }

    pub fn min(self, bound: f64) -> Self {
        self.rule(Check::Min(bound))
    }

    pub fn max(self, bound: f64) -> Self {
        self.rule(Check::Max(bound))
    }

    pub fn greater_than(self, bound: f64) -> Self {
        self.rule(Check::GreaterThan(bound))
    }

    pub fn non_zero(self) -> Self {
        self.rule(Check::NonZero)
    }

    pub fn email(self) -> Self {
        self.rule(Check::Email)
    }

    pub fn contains_digit(self) -> Self {
        self.rule(Check::ContainsDigit)
    }

    pub fn one_of<I, S>(self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rule(Check::OneOf(options.into_iter().map(Into::into).collect()))
    }

    /// Arbitrary predicate; `test` returns true when the value is acceptable.
    pub fn custom(
        self,
        name: &'static str,
        test: fn(&FormValue) -> bool,
        message: impl Into<String>,
    ) -> Self {
        self.rule(Check::Custom { name, test }).message(message)
    }

    /// Override the message of the most recently added rule.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        if let Some(rule) = self.rules.last_mut() {
            rule.message = Some(message.into());
        }
        self
    }

    fn check_config(&self, path: &str) -> Result<(), SchemaError> {
        for rule in &self.rules {
            if !rule.check.applies_to(&self.kind) {
                return Err(SchemaError::RuleMismatch {
                    path: path.to_string(),
                    rule: rule.check.name(),
                    kind: self.kind.name(),
                });
            }
            if let Check::OneOf(options) = &rule.check {
                if options.is_empty() {
                    return Err(SchemaError::EmptyOptions {
                        path: path.to_string(),
                    });
                }
            }
        }
        match &self.kind {
            FieldKind::List(element) => element.check_config(&format!("{path}.*")),
            FieldKind::Object(schema) => schema.check_config(path),
            _ => Ok(()),
        }
    }

    fn collect(&self, value: &FormValue, path: &mut Vec<String>, out: &mut Vec<Violation>) {
        if value.is_blank() {
            if self.required {
                out.push(Violation::new(
                    path.clone(),
                    format!("{} is required", self.label),
                ));
            }
            return;
        }

        let parsed = match self.parse(value) {
            Ok(parsed) => parsed,
            Err(message) => {
                out.push(Violation::new(path.clone(), message));
                return;
            }
        };

        if let Some(message) = self
            .rules
            .iter()
            .find_map(|rule| self.apply(rule, value, &parsed))
        {
            out.push(Violation::new(path.clone(), message));
        }

        match (&self.kind, value) {
            (FieldKind::List(element), FormValue::List(items)) => {
                for (index, item) in items.iter().enumerate() {
                    path.push(index.to_string());
                    element.collect(item, path, out);
                    path.pop();
                }
            }
            (FieldKind::Object(schema), FormValue::Object(data)) => schema.collect(data, path, out),
            _ => {}
        }
    }

    fn parse<'a>(&self, value: &'a FormValue) -> Result<Parsed<'a>, String> {
        let label = &self.label;
        match &self.kind {
            FieldKind::Text => value
                .as_text()
                .map(|s| Parsed::Text(s.trim()))
                .ok_or_else(|| format!("{label} must be text")),
            FieldKind::Integer => as_integer(value)
                .map(|n| Parsed::Number(n as f64))
                .ok_or_else(|| format!("{label} must be a whole number")),
            FieldKind::Number => as_number(value)
                .map(Parsed::Number)
                .ok_or_else(|| format!("{label} must be a number")),
            FieldKind::Boolean => match value {
                FormValue::Bool(_) => Ok(Parsed::Other),
                _ => Err(format!("{label} must be true or false")),
            },
            FieldKind::Date => {
                if is_date(value) {
                    Ok(Parsed::Other)
                } else {
                    Err(format!("{label} must be a valid date"))
                }
            }
            FieldKind::Timestamp => {
                if is_timestamp(value) {
                    Ok(Parsed::Other)
                } else {
                    Err(format!("{label} must be a valid date and time"))
                }
            }
            FieldKind::List(_) => match value {
                FormValue::List(items) => Ok(Parsed::Count(items.len())),
                _ => Err(format!("{label} must be a list")),
            },
            FieldKind::Object(_) => match value {
                FormValue::Object(_) => Ok(Parsed::Other),
                _ => Err(format!("{label} must be a group of fields")),
            },
        }
    }

    /// Message if `rule` fails for this value.
    fn apply(&self, rule: &Rule, value: &FormValue, parsed: &Parsed<'_>) -> Option<String> {
        let failed = match (&rule.check, parsed) {
            (Check::MinLength(n), Parsed::Text(s)) => s.chars().count() < *n,
            (Check::MinLength(n), Parsed::Count(c)) => c < n,
            (Check::MaxLength(n), Parsed::Text(s)) => s.chars().count() > *n,
            (Check::MaxLength(n), Parsed::Count(c)) => c > n,
            (Check::ExactLength(n), Parsed::Text(s)) => s.chars().count() != *n,
            (Check::ExactLength(n), Parsed::Count(c)) => c != n,
            (Check::Min(bound), Parsed::Number(v)) => v < bound,
            (Check::Max(bound), Parsed::Number(v)) => v > bound,
            (Check::GreaterThan(bound), Parsed::Number(v)) => v <= bound,
            (Check::NonZero, Parsed::Number(v)) => *v == 0.0,
            (Check::Email, Parsed::Text(s)) => !is_email(s),
            (Check::ContainsDigit, Parsed::Text(s)) => !s.chars().any(|c| c.is_ascii_digit()),
            (Check::OneOf(options), Parsed::Text(s)) => !options.iter().any(|o| o == s),
            (Check::Custom { test, .. }, _) => !test(value),
            _ => false,
        };

        failed.then(|| {
            rule.message
                .clone()
                .unwrap_or_else(|| self.default_message(&rule.check))
        })
    }

    fn default_message(&self, check: &Check) -> String {
        let label = &self.label;
        let unit = |n: usize| {
            let noun = if matches!(self.kind, FieldKind::List(_)) {
                "item"
            } else {
                "character"
            };
            if n == 1 {
                noun.to_string()
            } else {
                format!("{noun}s")
            }
        };
        match check {
            Check::MinLength(n) => format!("{label} must be at least {n} {}", unit(*n)),
            Check::MaxLength(n) => format!("{label} must be at most {n} {}", unit(*n)),
            Check::ExactLength(n) => format!("{label} must be exactly {n} {}", unit(*n)),
            Check::Min(bound) => format!("{label} must be at least {bound}"),
            Check::Max(bound) => format!("{label} must be at most {bound}"),
            Check::GreaterThan(bound) => format!("{label} must be greater than {bound}"),
            Check::NonZero => format!("{label} cannot be zero"),
            Check::Email => format!("{label} must be a valid email address"),
            Check::ContainsDigit => format!("{label} must contain at least 1 number"),
            Check::OneOf(options) => format!("{label} must be one of: {}", options.join(", ")),
            Check::Custom { .. } => format!("{label} is invalid"),
        }
    }
}

/// Schema of a group of named fields (a form, or a nested group in one).
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    fields: Vec<(String, FieldSchema)>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, schema: FieldSchema) -> Self {
        self.fields.push((name.into(), schema));
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldSchema> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, schema)| schema)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSchema)> {
        self.fields.iter().map(|(name, schema)| (name.as_str(), schema))
    }

    /// Same fields, none required (update forms send only what changed).
    pub fn partial(&self) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .map(|(name, schema)| (name.clone(), schema.clone().optional()))
                .collect(),
        }
    }

    fn check_config(&self, prefix: &str) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for (name, schema) in &self.fields {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}.{name}")
            };
            if !seen.insert(name.as_str()) {
                return Err(SchemaError::DuplicateField { path });
            }
            schema.check_config(&path)?;
        }
        Ok(())
    }

    fn collect(&self, data: &FormData, path: &mut Vec<String>, out: &mut Vec<Violation>) {
        for (name, schema) in &self.fields {
            path.push(name.clone());
            schema.collect(data.get(name).unwrap_or(&ABSENT), path, out);
            path.pop();
        }
    }
}

impl Schema for ObjectSchema {
    fn violations(&self, data: &FormData) -> Result<Vec<Violation>, SchemaError> {
        self.check_config("")?;
        let mut out = Vec::new();
        self.collect(data, &mut Vec::new(), &mut out);
        Ok(out)
    }
}

fn as_integer(value: &FormValue) -> Option<i64> {
    match value {
        FormValue::Int(n) => Some(*n),
        FormValue::Float(f) => whole_i64(*f),
        FormValue::Text(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_number(value: &FormValue) -> Option<f64> {
    let n = match value {
        FormValue::Int(n) => *n as f64,
        FormValue::Float(f) => *f,
        FormValue::Text(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn is_date(value: &FormValue) -> bool {
    match value {
        FormValue::Date(_) | FormValue::Timestamp(_) => true,
        FormValue::Text(s) => {
            let s = s.trim();
            NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
                || DateTime::parse_from_rfc3339(s).is_ok()
        }
        _ => false,
    }
}

fn is_timestamp(value: &FormValue) -> bool {
    match value {
        FormValue::Date(_) | FormValue::Timestamp(_) => true,
        FormValue::Text(s) => DateTime::parse_from_rfc3339(s.trim()).is_ok(),
        _ => false,
    }
}

fn is_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !s.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|part| !part.is_empty())
}
