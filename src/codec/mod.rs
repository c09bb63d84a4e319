//! Polymorphic payload codec.
//!
//! `unmarshal_any` decodes a type-tagged wire value into the closed sum type
//! for its field, checking the `"@type"` discriminator against the startup
//! registry first so unknown or misplaced tags produce a precise bind error
//! instead of an opaque deserialization failure. `marshal_any` is the
//! inverse: it re-injects the discriminator so the outbound wire format is
//! self-describing.

pub mod registry;
pub mod types;

pub use registry::{registry, VariantRegistry, REGISTRY};
pub use types::{ChoiceOption, QuestionSettings, Recurrence, Variant, VariantFamily};

use serde_json::Value;
use thiserror::Error;

/// Wire key carrying the variant discriminator.
pub const DISCRIMINATOR_KEY: &str = "@type";

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("field {field}: expected a tagged object")]
    NotAnObject { field: String },

    #[error("field {field}: missing \"@type\" discriminator")]
    MissingDiscriminator { field: String },

    #[error("field {field}: unknown variant type {discriminator:?}")]
    UnknownDiscriminator { field: String, discriminator: String },

    #[error("field {field}: variant type {discriminator:?} is not valid for this field")]
    ForeignDiscriminator { field: String, discriminator: String },

    #[error("field {field}: invalid {discriminator} payload: {source}")]
    Payload {
        field: String,
        discriminator: String,
        source: serde_json::Error,
    },

    #[error("failed to encode {discriminator}: {source}")]
    Marshal {
        discriminator: &'static str,
        source: serde_json::Error,
    },
}

/// Decode one variant field. `field` names the location in the request body
/// (e.g. `question.settings`) and only appears in error messages.
pub fn unmarshal_any<T: Variant>(field: &str, value: &Value) -> Result<T, CodecError> {
    let obj = value
        .as_object()
        .ok_or_else(|| CodecError::NotAnObject { field: field.to_string() })?;

    let discriminator = obj
        .get(DISCRIMINATOR_KEY)
        .and_then(Value::as_str)
        .ok_or_else(|| CodecError::MissingDiscriminator { field: field.to_string() })?;

    match registry().family_of(discriminator) {
        None => {
            return Err(CodecError::UnknownDiscriminator {
                field: field.to_string(),
                discriminator: discriminator.to_string(),
            })
        }
        Some(family) if family != T::FAMILY => {
            return Err(CodecError::ForeignDiscriminator {
                field: field.to_string(),
                discriminator: discriminator.to_string(),
            })
        }
        Some(_) => {}
    }

    let discriminator = discriminator.to_string();
    serde_json::from_value(value.clone()).map_err(|source| CodecError::Payload {
        field: field.to_string(),
        discriminator,
        source,
    })
}

/// Decode an optional variant field; `None` stays `None`.
pub fn unmarshal_any_opt<T: Variant>(
    field: &str,
    value: Option<&Value>,
) -> Result<Option<T>, CodecError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => unmarshal_any(field, v).map(Some),
    }
}

/// Decode a list of tagged objects element-wise, indexing the field path in
/// errors (`questions[2].settings`).
pub fn unmarshal_any_list<T: Variant>(field: &str, values: &[Value]) -> Result<Vec<T>, CodecError> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| unmarshal_any(&format!("{}[{}]", field, i), v))
        .collect()
}

/// Encode a variant value with its discriminator re-injected.
pub fn marshal_any<T: Variant>(value: &T) -> Result<Value, CodecError> {
    debug_assert!(
        registry().contains(value.discriminator()),
        "variant {} missing from registry",
        value.discriminator()
    );
    serde_json::to_value(value).map_err(|source| CodecError::Marshal {
        discriminator: value.discriminator(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn question_settings_samples() -> Vec<QuestionSettings> {
        vec![
            QuestionSettings::Binary {
                positive_label: "Yes".into(),
                negative_label: "No".into(),
            },
            QuestionSettings::MultipleChoice {
                options: vec![
                    ChoiceOption { id: "a".into(), label: "Often".into() },
                    ChoiceOption { id: "b".into(), label: "Rarely".into() },
                ],
                allow_multiple: true,
            },
            QuestionSettings::FreeText { max_length: Some(500), placeholder: None },
            QuestionSettings::Scale { min: 1, max: 10, step: 1 },
        ]
    }

    fn recurrence_samples() -> Vec<Recurrence> {
        vec![
            Recurrence::Daily { every_days: 1 },
            Recurrence::Weekly { every_weeks: 2, weekdays: vec![1, 3, 5] },
            Recurrence::Monthly { day_of_month: 28 },
        ]
    }

    #[test]
    fn question_settings_round_trip() {
        for original in question_settings_samples() {
            let encoded = marshal_any(&original).unwrap();
            assert_eq!(
                encoded[DISCRIMINATOR_KEY].as_str().unwrap(),
                original.discriminator(),
                "encoded tag must equal the registry key"
            );
            let decoded: QuestionSettings = unmarshal_any("question.settings", &encoded).unwrap();
            assert_eq!(decoded, original);
        }
    }

    #[test]
    fn recurrence_round_trip() {
        for original in recurrence_samples() {
            let encoded = marshal_any(&original).unwrap();
            assert_eq!(encoded[DISCRIMINATOR_KEY].as_str().unwrap(), original.discriminator());
            let decoded: Recurrence = unmarshal_any("target.recurrence", &encoded).unwrap();
            assert_eq!(decoded, original);
        }
    }

    #[test]
    fn unknown_discriminator_is_a_bind_error() {
        let value = json!({"@type": "pulse.types.HologramQuestionSettings", "depth": 3});
        let err = unmarshal_any::<QuestionSettings>("question.settings", &value).unwrap_err();
        assert!(
            matches!(err, CodecError::UnknownDiscriminator { ref discriminator, .. }
                if discriminator == "pulse.types.HologramQuestionSettings")
        );
    }

    #[test]
    fn missing_discriminator_is_a_bind_error() {
        let value = json!({"positive_label": "Yes", "negative_label": "No"});
        let err = unmarshal_any::<QuestionSettings>("question.settings", &value).unwrap_err();
        assert!(matches!(err, CodecError::MissingDiscriminator { .. }));
    }

    #[test]
    fn discriminator_from_another_family_is_rejected() {
        let value = json!({"@type": "pulse.types.DailyRecurrence", "every_days": 1});
        let err = unmarshal_any::<QuestionSettings>("question.settings", &value).unwrap_err();
        assert!(matches!(err, CodecError::ForeignDiscriminator { .. }));
    }

    #[test]
    fn malformed_payload_reports_the_field_and_tag() {
        let value = json!({"@type": "pulse.types.ScaleQuestionSettings", "min": "one"});
        let err = unmarshal_any::<QuestionSettings>("question.settings", &value).unwrap_err();
        match err {
            CodecError::Payload { field, discriminator, .. } => {
                assert_eq!(field, "question.settings");
                assert_eq!(discriminator, "pulse.types.ScaleQuestionSettings");
            }
            other => panic!("expected payload error, got {other:?}"),
        }
    }

    #[test]
    fn list_decoding_indexes_the_failing_element() {
        let values = vec![
            json!({"@type": "pulse.types.BinaryQuestionSettings", "positive_label": "Y", "negative_label": "N"}),
            json!({"@type": "pulse.types.NopeSettings"}),
        ];
        let err = unmarshal_any_list::<QuestionSettings>("questions", &values).unwrap_err();
        match err {
            CodecError::UnknownDiscriminator { field, .. } => assert_eq!(field, "questions[1]"),
            other => panic!("expected unknown discriminator, got {other:?}"),
        }
    }

    #[test]
    fn optional_field_absent_stays_absent() {
        assert_eq!(unmarshal_any_opt::<Recurrence>("target.recurrence", None).unwrap(), None);
        assert_eq!(
            unmarshal_any_opt::<Recurrence>("target.recurrence", Some(&Value::Null)).unwrap(),
            None
        );
    }
}
