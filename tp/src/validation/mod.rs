//! Input validation
//!
//! Field-level checks on trip preferences, run before anything is sent to
//! the model.

mod preferences;

pub use preferences::{
    DEFAULT_BUDGET_MIN, Field, PreferencesValidator, ValidationErrors, ValidationRule, validate,
};
