//! Typed item configuration, materialised from the variable store.
//!
//! `prepare` runs the backend gate and then builds a [`Config`] once, with
//! all type and range checks up front, so the run loop works from plain
//! typed fields instead of re-reading loose variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts;
use crate::vars::{Var, VarStore};

/// Why `prepare` refused the current experiment state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// The host is not running the legacy mouse and canvas backends.
    #[error("unsupported backend: mouse_backend={mouse}, canvas_backend={canvas} (legacy required)")]
    UnsupportedBackend { mouse: String, canvas: String },
    /// A configuration variable is unset, mistyped, or out of range.
    #[error("invalid {name}: {reason}")]
    InvalidVariable { name: &'static str, reason: String },
}

/// Check that both host backends are the supported legacy mode.
///
/// The questionnaire widgets draw through the legacy canvas and read the
/// legacy mouse, so any other backend pairing is rejected before the run.
///
/// # Errors
/// [`ConfigurationError::UnsupportedBackend`] naming both backend values.
pub fn check_backends(vars: &VarStore) -> Result<(), ConfigurationError> {
    let mouse = backend_value(vars, consts::MOUSE_BACKEND_VAR);
    let canvas = backend_value(vars, consts::CANVAS_BACKEND_VAR);
    if mouse == consts::LEGACY_BACKEND && canvas == consts::LEGACY_BACKEND {
        return Ok(());
    }
    Err(ConfigurationError::UnsupportedBackend { mouse, canvas })
}

/// Backend variable as a display string, `<unset>` when absent.
fn backend_value(vars: &VarStore, name: &str) -> String {
    match vars.get(name) {
        None | Some(Var::None) => "<unset>".to_owned(),
        Some(Var::Str(value)) => value.clone(),
        Some(other) => format!("<{}>", other.type_name()),
    }
}

/// Item configuration, immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Question text in sanitised form, exactly as stored.
    pub question: String,
    /// Label on the accept button.
    pub accept_text: String,
    /// Number of rating icons, `2..=100`.
    pub maximum_rating: u8,
    /// Whether the editor offered "allow empty response".
    ///
    /// Parsed and surfaced in the property editor, but the run loop never
    /// consults it: an empty accept always re-presents the form.
    pub allow_empty: bool,
}

impl Config {
    /// Build a configuration from the store's current values.
    ///
    /// # Errors
    /// [`ConfigurationError::InvalidVariable`] when a variable is unset,
    /// `maximum_rating` is not an integer in range, or `allow_empty` is not
    /// the literal `yes` or `no`.
    pub fn from_store(vars: &VarStore) -> Result<Self, ConfigurationError> {
        Ok(Self {
            question: text_var(vars, consts::QUESTION_VAR)?,
            accept_text: text_var(vars, consts::ACCEPT_TEXT_VAR)?,
            maximum_rating: rating_var(vars)?,
            allow_empty: yes_no_var(vars, consts::ALLOW_EMPTY_VAR)?,
        })
    }
}

/// A text variable; numeric values read back in display form.
fn text_var(vars: &VarStore, name: &'static str) -> Result<String, ConfigurationError> {
    match vars.get(name) {
        None | Some(Var::None) => Err(unset(name)),
        Some(Var::Str(value)) => Ok(value.clone()),
        Some(Var::Int(value)) => Ok(value.to_string()),
        Some(Var::Real(value)) => Ok(value.to_string()),
    }
}

/// The `maximum_rating` variable: an integer in `2..=100`.
fn rating_var(vars: &VarStore) -> Result<u8, ConfigurationError> {
    let name = consts::MAXIMUM_RATING_VAR;
    let value = match vars.get(name) {
        None | Some(Var::None) => return Err(unset(name)),
        Some(value) => value,
    };
    let Some(int) = value.as_int() else {
        return Err(ConfigurationError::InvalidVariable {
            name,
            reason: format!("expected an integer, got {}", value.type_name()),
        });
    };
    u8::try_from(int)
        .map_err(|_| out_of_range(name, int))
        .and_then(|rating| {
            if (consts::MIN_MAXIMUM_RATING..=consts::MAX_MAXIMUM_RATING).contains(&rating) {
                Ok(rating)
            } else {
                Err(out_of_range(name, int))
            }
        })
}

/// A `yes`/`no` combobox variable.
fn yes_no_var(vars: &VarStore, name: &'static str) -> Result<bool, ConfigurationError> {
    match vars.get(name) {
        None | Some(Var::None) => Err(unset(name)),
        Some(Var::Str(value)) if value == "yes" => Ok(true),
        Some(Var::Str(value)) if value == "no" => Ok(false),
        Some(other) => Err(ConfigurationError::InvalidVariable {
            name,
            reason: format!("expected yes or no, got {other:?}"),
        }),
    }
}

fn unset(name: &'static str) -> ConfigurationError {
    ConfigurationError::InvalidVariable { name, reason: "not set".to_owned() }
}

fn out_of_range(name: &'static str, int: i64) -> ConfigurationError {
    ConfigurationError::InvalidVariable {
        name,
        reason: format!(
            "{int} is outside {}..={}",
            consts::MIN_MAXIMUM_RATING,
            consts::MAX_MAXIMUM_RATING
        ),
    }
}
