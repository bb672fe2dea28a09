//! Input normalization before formatting.

use crate::value::{FormData, FormValue};

/// Trim every text field and turn blank text into [`FormValue::Absent`],
/// recursing into nested objects. Lists and other scalars are copied as-is.
///
/// Returns a new mapping; `data` is left untouched.
pub fn sanitize_form_data(data: &FormData) -> FormData {
    data.iter()
        .map(|(key, value)| (key.clone(), sanitize_value(value)))
        .collect()
}

fn sanitize_value(value: &FormValue) -> FormValue {
    match value {
        FormValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                FormValue::Absent
            } else {
                FormValue::Text(trimmed.to_string())
            }
        }
        FormValue::Object(nested) => FormValue::Object(sanitize_form_data(nested)),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_drops_blank_text() {
        let data = FormData::new().with("name", "  Bob  ").with("email", "");
        let clean = sanitize_form_data(&data);
        assert_eq!(clean.get("name"), Some(&FormValue::from("Bob")));
        assert_eq!(clean.get("email"), Some(&FormValue::Absent));
    }

    #[test]
    fn recurses_into_nested_objects() {
        let data = FormData::new().with(
            "address",
            FormData::new().with("street", " Main St ").with("city", ""),
        );
        let clean = sanitize_form_data(&data);
        assert_eq!(clean.get_path("address.street"), Some(&FormValue::from("Main St")));
        assert_eq!(clean.get_path("address.city"), Some(&FormValue::Absent));
    }

    #[test]
    fn lists_and_scalars_pass_through() {
        let tags = vec![FormValue::from(" travel "), FormValue::from("")];
        let data = FormData::new()
            .with("tags", tags.clone())
            .with("qty", 0)
            .with("active", false)
            .with("note", FormValue::Null);
        let clean = sanitize_form_data(&data);
        assert_eq!(clean.get("tags"), Some(&FormValue::List(tags)));
        assert_eq!(clean.get("qty"), Some(&FormValue::Int(0)));
        assert_eq!(clean.get("active"), Some(&FormValue::Bool(false)));
        assert_eq!(clean.get("note"), Some(&FormValue::Null));
    }

    #[test]
    fn input_is_not_mutated() {
        let data = FormData::new().with("name", "  Bob  ");
        let before = data.clone();
        let _ = sanitize_form_data(&data);
        assert_eq!(data, before);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn leaf() -> impl Strategy<Value = FormValue> {
            prop_oneof![
                Just(FormValue::Absent),
                Just(FormValue::Null),
                any::<bool>().prop_map(FormValue::Bool),
                any::<i64>().prop_map(FormValue::Int),
                "[ \t]{0,3}[a-z ]{0,8}[ \t]{0,3}".prop_map(FormValue::Text),
            ]
        }

        fn value() -> impl Strategy<Value = FormValue> {
            leaf().prop_recursive(3, 24, 4, |inner| {
                prop_oneof![
                    prop::collection::vec(inner.clone(), 0..4).prop_map(FormValue::List),
                    prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                        .prop_map(|m| FormValue::Object(m.into_iter().collect::<FormData>())),
                ]
            })
        }

        fn form() -> impl Strategy<Value = FormData> {
            prop::collection::btree_map("[a-z]{1,6}", value(), 0..6)
                .prop_map(|m| m.into_iter().collect::<FormData>())
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: sanitizing twice equals sanitizing once.
            #[test]
            fn sanitize_is_idempotent(data in form()) {
                let once = sanitize_form_data(&data);
                prop_assert_eq!(sanitize_form_data(&once), once);
            }

            /// Property: same input, same output, input untouched.
            #[test]
            fn sanitize_is_pure(data in form()) {
                let before = data.clone();
                let first = sanitize_form_data(&data);
                let second = sanitize_form_data(&data);
                prop_assert_eq!(first, second);
                prop_assert_eq!(data, before);
            }

            /// Property: top-level keys are preserved; only values change.
            #[test]
            fn sanitize_keeps_shape(data in form()) {
                let clean = sanitize_form_data(&data);
                prop_assert!(clean.keys().eq(data.keys()));
            }
        }
    }
}
