//! Closed variant families carried in type-tagged wire fields.
//!
//! Each family is a tagged union: the `"@type"` discriminator selects the
//! concrete shape, and the payload fields sit inline next to the tag
//! (protobuf `Any` wire style). New variants are added here and registered
//! in [`super::registry`]; nothing else in the gateway inspects the tag.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Which extensible field a discriminator belongs to. A discriminator from
/// one family appearing in another family's field is a bind error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantFamily {
    QuestionSettings,
    Recurrence,
}

/// A value that can live inside a variant field.
pub trait Variant: Serialize + DeserializeOwned {
    const FAMILY: VariantFamily;

    /// The registry key this value serializes under.
    fn discriminator(&self) -> &'static str;
}

/// Per-type settings of a survey question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "@type")]
pub enum QuestionSettings {
    #[serde(rename = "pulse.types.BinaryQuestionSettings")]
    Binary {
        positive_label: String,
        negative_label: String,
    },
    #[serde(rename = "pulse.types.MultipleChoiceQuestionSettings")]
    MultipleChoice {
        options: Vec<ChoiceOption>,
        allow_multiple: bool,
    },
    #[serde(rename = "pulse.types.FreeTextQuestionSettings")]
    FreeText {
        max_length: Option<u32>,
        placeholder: Option<String>,
    },
    #[serde(rename = "pulse.types.ScaleQuestionSettings")]
    Scale { min: i32, max: i32, step: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    pub label: String,
}

impl Variant for QuestionSettings {
    const FAMILY: VariantFamily = VariantFamily::QuestionSettings;

    fn discriminator(&self) -> &'static str {
        match self {
            QuestionSettings::Binary { .. } => "pulse.types.BinaryQuestionSettings",
            QuestionSettings::MultipleChoice { .. } => "pulse.types.MultipleChoiceQuestionSettings",
            QuestionSettings::FreeText { .. } => "pulse.types.FreeTextQuestionSettings",
            QuestionSettings::Scale { .. } => "pulse.types.ScaleQuestionSettings",
        }
    }
}

/// Recurrence of a goal/challenge/habit target.
///
/// Weekdays are ISO numbering, 1 = Monday through 7 = Sunday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "@type")]
pub enum Recurrence {
    #[serde(rename = "pulse.types.DailyRecurrence")]
    Daily { every_days: u32 },
    #[serde(rename = "pulse.types.WeeklyRecurrence")]
    Weekly { every_weeks: u32, weekdays: Vec<u8> },
    #[serde(rename = "pulse.types.MonthlyRecurrence")]
    Monthly { day_of_month: u8 },
}

impl Variant for Recurrence {
    const FAMILY: VariantFamily = VariantFamily::Recurrence;

    fn discriminator(&self) -> &'static str {
        match self {
            Recurrence::Daily { .. } => "pulse.types.DailyRecurrence",
            Recurrence::Weekly { .. } => "pulse.types.WeeklyRecurrence",
            Recurrence::Monthly { .. } => "pulse.types.MonthlyRecurrence",
        }
    }
}
