//! Formatting sanitized data for the request body.

use crate::value::{FormData, FormValue, iso_date, iso_timestamp};

/// Drop absent fields, render dates as ISO-8601 text and recurse into nested
/// objects. Lists and remaining scalars are copied unchanged.
pub fn format_form_data(data: &FormData) -> FormData {
    data.iter()
        .filter_map(|(key, value)| format_value(value).map(|v| (key.clone(), v)))
        .collect()
}

fn format_value(value: &FormValue) -> Option<FormValue> {
    match value {
        FormValue::Absent => None,
        FormValue::Timestamp(ts) => Some(FormValue::Text(iso_timestamp(ts))),
        FormValue::Date(date) => Some(FormValue::Text(iso_date(date))),
        FormValue::Object(nested) => Some(FormValue::Object(format_form_data(nested))),
        other => Some(other.clone()),
    }
}
