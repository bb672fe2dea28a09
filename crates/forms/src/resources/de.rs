//! Lenient decoding for values that may still be control text.
//!
//! Numbers typed into a text input reach the payload as strings; these
//! helpers accept either form. Blank text decodes to `None` for optional
//! fields (list elements are not sanitized, so blanks can survive there).

use chrono::{DateTime, NaiveDate};
use serde::de::Error;
use serde::{Deserialize, Deserializer};

use crate::value::whole_i64;

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Int(i64),
    Float(f64),
    Text(String),
}

fn raw_number<E: Error>(raw: Raw) -> Result<f64, E> {
    match raw {
        Raw::Int(n) => Ok(n as f64),
        Raw::Float(f) => Ok(f),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| E::custom(format!("`{s}` is not a number"))),
    }
}

fn raw_integer<E: Error>(raw: Raw) -> Result<i64, E> {
    match raw {
        Raw::Int(n) => Ok(n),
        Raw::Float(f) => {
            whole_i64(f).ok_or_else(|| E::custom(format!("`{f}` is not a whole number")))
        }
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| E::custom(format!("`{s}` is not a whole number"))),
    }
}

fn parse_date<E: Error>(s: &str) -> Result<NaiveDate, E> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.date_naive()))
        .map_err(|_| E::custom(format!("`{s}` is not a date")))
}

fn non_blank(raw: Option<Raw>) -> Option<Raw> {
    match raw {
        Some(Raw::Text(s)) if s.trim().is_empty() => None,
        other => other,
    }
}

pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    raw_number(Raw::deserialize(d)?)
}

pub fn opt_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    non_blank(Option::<Raw>::deserialize(d)?)
        .map(raw_number)
        .transpose()
}

pub fn opt_integer<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    non_blank(Option::<Raw>::deserialize(d)?)
        .map(raw_integer)
        .transpose()
}

pub fn integer<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    raw_integer(Raw::deserialize(d)?)
}

pub fn date<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
    parse_date(&String::deserialize(d)?)
}

pub fn opt_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
    match Option::<String>::deserialize(d)? {
        Some(s) if !s.trim().is_empty() => parse_date(&s).map(Some),
        _ => Ok(None),
    }
}
