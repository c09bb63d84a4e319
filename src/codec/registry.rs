//! Discriminator registry.
//!
//! Maps every known `"@type"` string to its variant family. Built once at
//! startup and immutable thereafter, so the set of accepted variants is
//! closed and explicit.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::types::VariantFamily;

pub struct VariantRegistry {
    entries: HashMap<&'static str, VariantFamily>,
}

impl VariantRegistry {
    fn builtin() -> Self {
        let mut entries = HashMap::new();

        entries.insert("pulse.types.BinaryQuestionSettings", VariantFamily::QuestionSettings);
        entries.insert("pulse.types.MultipleChoiceQuestionSettings", VariantFamily::QuestionSettings);
        entries.insert("pulse.types.FreeTextQuestionSettings", VariantFamily::QuestionSettings);
        entries.insert("pulse.types.ScaleQuestionSettings", VariantFamily::QuestionSettings);

        entries.insert("pulse.types.DailyRecurrence", VariantFamily::Recurrence);
        entries.insert("pulse.types.WeeklyRecurrence", VariantFamily::Recurrence);
        entries.insert("pulse.types.MonthlyRecurrence", VariantFamily::Recurrence);

        Self { entries }
    }

    pub fn family_of(&self, discriminator: &str) -> Option<VariantFamily> {
        self.entries.get(discriminator).copied()
    }

    pub fn contains(&self, discriminator: &str) -> bool {
        self.entries.contains_key(discriminator)
    }

    /// All registered discriminators of one family, sorted for stable output.
    pub fn discriminators(&self, family: VariantFamily) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = self
            .entries
            .iter()
            .filter(|(_, f)| **f == family)
            .map(|(d, _)| *d)
            .collect();
        out.sort_unstable();
        out
    }
}

pub static REGISTRY: Lazy<VariantRegistry> = Lazy::new(VariantRegistry::builtin);

pub fn registry() -> &'static VariantRegistry {
    &REGISTRY
}
