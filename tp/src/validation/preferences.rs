//! Trip preferences validator
//!
//! Every rule runs independently so the form can show all field errors at
//! once. An empty [`ValidationErrors`] means the preferences may be
//! submitted.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::domain::{Language, TripPreferences};
use crate::locale::Messages;

/// Budgets at or below this value are rejected
pub const DEFAULT_BUDGET_MIN: f64 = 10.0;

/// Form field an error is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Destination,
    Duration,
    Budget,
    OtherInterest,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Destination => "destination",
            Self::Duration => "duration",
            Self::Budget => "budget",
            Self::OtherInterest => "otherInterest",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The rule a field failed
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "rule")]
pub enum ValidationRule {
    Required,
    PositiveNumber,
    BudgetMin { min: f64 },
}

impl ValidationRule {
    /// Inline message shown next to the field
    pub fn message(&self, lang: Language) -> String {
        let msgs = Messages::for_language(lang);
        match self {
            Self::Required => msgs.required.to_string(),
            Self::PositiveNumber => msgs.positive_number.to_string(),
            Self::BudgetMin { min } => format!("{} {}", msgs.budget_min, min),
        }
    }
}

/// Field errors, ordered by field
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationErrors(BTreeMap<Field, ValidationRule>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&ValidationRule> {
        self.0.get(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Field, &ValidationRule)> {
        self.0.iter()
    }

    /// Localized messages keyed by field name
    pub fn messages(&self, lang: Language) -> BTreeMap<&'static str, String> {
        self.0.iter().map(|(f, r)| (f.name(), r.message(lang))).collect()
    }

    fn insert(&mut self, field: Field, rule: ValidationRule) {
        self.0.insert(field, rule);
    }
}

/// Validator with a configurable budget threshold
#[derive(Debug, Clone, Copy)]
pub struct PreferencesValidator {
    budget_min: f64,
}

impl Default for PreferencesValidator {
    fn default() -> Self {
        Self::new(DEFAULT_BUDGET_MIN)
    }
}

impl PreferencesValidator {
    pub fn new(budget_min: f64) -> Self {
        Self { budget_min }
    }

    pub fn validate(&self, prefs: &TripPreferences) -> ValidationErrors {
        debug!(?prefs, "PreferencesValidator::validate: called");
        let mut errors = ValidationErrors::default();

        if prefs.destination.trim().is_empty() {
            errors.insert(Field::Destination, ValidationRule::Required);
        }

        if !matches!(prefs.duration, Some(d) if d > 0) {
            errors.insert(Field::Duration, ValidationRule::PositiveNumber);
        }

        let budget = prefs.budget.trim();
        if budget.is_empty() {
            errors.insert(Field::Budget, ValidationRule::Required);
        } else if !parse_budget(budget).is_some_and(|b| b > self.budget_min) {
            errors.insert(Field::Budget, ValidationRule::BudgetMin { min: self.budget_min });
        }

        let other_missing = prefs
            .other_interest
            .as_deref()
            .is_none_or(|s| s.trim().is_empty());
        if prefs.wants_other() && other_missing {
            errors.insert(Field::OtherInterest, ValidationRule::Required);
        }

        debug!(error_count = errors.len(), "PreferencesValidator::validate: done");
        errors
    }
}

/// Validate with the default budget threshold
pub fn validate(prefs: &TripPreferences) -> ValidationErrors {
    PreferencesValidator::default().validate(prefs)
}

fn parse_budget(budget: &str) -> Option<f64> {
    budget.parse::<f64>().ok().filter(|b| b.is_finite())
}
