//! Raw form values as collected from input controls.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};

/// A single form field value.
///
/// `Absent` means "leave this key out of the request"; it is not the same as
/// `Null` (an explicit JSON null) or an empty string.
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Absent,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    List(Vec<FormValue>),
    Object(FormData),
}

impl FormValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, FormValue::Absent)
    }

    /// Nothing was entered: absent, null, or whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            FormValue::Absent | FormValue::Null => true,
            FormValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&FormData> {
        match self {
            FormValue::Object(d) => Some(d),
            _ => None,
        }
    }

    /// JSON rendering. `Absent` inside a list renders as `null`; object
    /// fields holding `Absent` are skipped.
    pub fn to_json(&self) -> Value {
        match self {
            FormValue::Absent | FormValue::Null => Value::Null,
            FormValue::Bool(b) => Value::Bool(*b),
            FormValue::Int(n) => Value::Number(Number::from(*n)),
            FormValue::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            FormValue::Text(s) => Value::String(s.clone()),
            FormValue::Date(d) => Value::String(iso_date(d)),
            FormValue::Timestamp(ts) => Value::String(iso_timestamp(ts)),
            FormValue::List(items) => Value::Array(items.iter().map(FormValue::to_json).collect()),
            FormValue::Object(data) => data.to_json(),
        }
    }
}

/// Canonical timestamp text, e.g. `2024-03-01T09:30:00.000Z`.
pub fn iso_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Calendar date text, e.g. `2024-03-01`.
pub fn iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `f` as an `i64` when it is a whole number inside the `i64` range.
pub(crate) fn whole_i64(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    let in_range = (i64::MIN as f64..i64::MAX as f64).contains(&f);
    (in_range && f.fract() == 0.0).then_some(f as i64)
}

impl From<Value> for FormValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FormValue::Null,
            Value::Bool(b) => FormValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FormValue::Int(i),
                None => n.as_f64().map_or(FormValue::Null, FormValue::Float),
            },
            Value::String(s) => FormValue::Text(s),
            Value::Array(items) => FormValue::List(items.into_iter().map(FormValue::from).collect()),
            Value::Object(map) => FormValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, FormValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        FormValue::Text(value)
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        FormValue::Bool(value)
    }
}

impl From<i64> for FormValue {
    fn from(value: i64) -> Self {
        FormValue::Int(value)
    }
}

impl From<i32> for FormValue {
    fn from(value: i32) -> Self {
        FormValue::Int(i64::from(value))
    }
}

impl From<u32> for FormValue {
    fn from(value: u32) -> Self {
        FormValue::Int(i64::from(value))
    }
}

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        FormValue::Float(value)
    }
}

impl From<NaiveDate> for FormValue {
    fn from(value: NaiveDate) -> Self {
        FormValue::Date(value)
    }
}

impl From<DateTime<Utc>> for FormValue {
    fn from(value: DateTime<Utc>) -> Self {
        FormValue::Timestamp(value)
    }
}

impl From<FormData> for FormValue {
    fn from(value: FormData) -> Self {
        FormValue::Object(value)
    }
}

impl From<Vec<FormValue>> for FormValue {
    fn from(value: Vec<FormValue>) -> Self {
        FormValue::List(value)
    }
}

/// An untouched control is `Absent`.
impl<T: Into<FormValue>> From<Option<T>> for FormValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FormValue::Absent, Into::into)
    }
}

impl Serialize for FormValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Field name -> value mapping for one form session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData(BTreeMap<String, FormValue>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FormValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FormValue>) -> Option<FormValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<FormValue> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&FormValue> {
        self.0.get(key)
    }

    /// Look up a dot-joined path through nested objects (`address.city`).
    pub fn get_path(&self, path: &str) -> Option<&FormValue> {
        let mut segments = path.split('.');
        let mut current = self.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FormValue)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// JSON object for the request body; `Absent` fields are omitted.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .0
            .iter()
            .filter(|(_, v)| !v.is_absent())
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        Value::Object(map)
    }

    /// Prefill a form from a loaded resource (edit screens).
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        match serde_json::to_value(value)? {
            Value::Object(map) => Ok(map
                .into_iter()
                .map(|(k, v)| (k, FormValue::from(v)))
                .collect()),
            other => Err(<serde_json::Error as serde::de::Error>::custom(format!(
                "expected an object to prefill a form, got {other}"
            ))),
        }
    }
}

impl Serialize for FormData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl FromIterator<(String, FormValue)> for FormData {
    fn from_iter<I: IntoIterator<Item = (String, FormValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for FormData {
    type Item = (String, FormValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, FormValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn blank_covers_absent_null_and_whitespace() {
        assert!(FormValue::Absent.is_blank());
        assert!(FormValue::Null.is_blank());
        assert!(FormValue::from("   ").is_blank());
        assert!(!FormValue::from("x").is_blank());
        assert!(!FormValue::Int(0).is_blank());
    }

    #[test]
    fn none_becomes_absent() {
        assert_eq!(FormValue::from(None::<String>), FormValue::Absent);
        assert_eq!(FormValue::from(Some(3)), FormValue::Int(3));
    }

    #[test]
    fn to_json_skips_absent_fields_but_keeps_null() {
        let data = FormData::new()
            .with("name", "Bob")
            .with("email", FormValue::Absent)
            .with("phone", FormValue::Null);
        assert_eq!(data.to_json(), json!({ "name": "Bob", "phone": null }));
    }

    #[test]
    fn dates_render_as_iso_text() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(FormValue::from(ts).to_json(), json!("2024-03-01T09:30:00.000Z"));
        assert_eq!(FormValue::from(day).to_json(), json!("2024-03-01"));
    }

    #[test]
    fn get_path_walks_nested_objects() {
        let data = FormData::new().with("address", FormData::new().with("city", "Lagos"));
        assert_eq!(data.get_path("address.city"), Some(&FormValue::from("Lagos")));
        assert_eq!(data.get_path("address.street"), None);
        assert_eq!(data.get_path("address.city.zip"), None);
    }

    #[test]
    fn whole_i64_refuses_fractions_and_out_of_range_values() {
        assert_eq!(whole_i64(3.0), Some(3));
        assert_eq!(whole_i64(-2.0), Some(-2));
        assert_eq!(whole_i64(i64::MIN as f64), Some(i64::MIN));
        assert_eq!(whole_i64(2.5), None);
        assert_eq!(whole_i64(1e30), None);
        assert_eq!(whole_i64(i64::MAX as f64), None);
        assert_eq!(whole_i64(f64::NAN), None);
        assert_eq!(whole_i64(f64::INFINITY), None);
    }

    #[test]
    fn from_json_prefers_integers() {
        assert_eq!(FormValue::from(json!(4)), FormValue::Int(4));
        assert_eq!(FormValue::from(json!(4.5)), FormValue::Float(4.5));
        assert_eq!(
            FormValue::from(json!({ "a": [1, "x"] })),
            FormValue::Object(FormData::new().with("a", vec![FormValue::Int(1), FormValue::from("x")]))
        );
    }

    #[test]
    fn from_serializable_prefills_edit_forms() {
        #[derive(Serialize)]
        struct Client {
            name: String,
            email: Option<String>,
        }

        let data = FormData::from_serializable(&Client {
            name: "Ada".into(),
            email: None,
        })
        .unwrap();
        assert_eq!(data.get("name"), Some(&FormValue::from("Ada")));
        assert_eq!(data.get("email"), Some(&FormValue::Null));
    }

    #[test]
    fn from_serializable_rejects_non_objects() {
        assert!(FormData::from_serializable(&vec![1, 2]).is_err());
    }
}
