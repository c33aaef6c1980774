//! Experiment variables: the typed value enum, the shared store, and the
//! host's text-escaping convention.
//!
//! Items communicate with the host exclusively through named variables:
//! configuration is read from them, trial results are written back into them.
//! The store is a plain keyed map; single-threaded access is guaranteed by
//! the host, so no synchronisation lives here. Multi-line text is stored in
//! its sanitised (escaped) form and unsanitised at the point of use.

#[cfg(test)]
#[path = "vars_test.rs"]
mod vars_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single experiment variable value.
///
/// `None` is a real value, not an absence: resetting a variable at trial
/// onset writes `None` so downstream readers see "no response yet" rather
/// than a stale result from the previous trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Var {
    /// Explicitly unset. Serialises as JSON `null`.
    None,
    /// Text value, possibly in sanitised (escaped) form.
    Str(String),
    /// Integer value.
    Int(i64),
    /// Floating-point value (timestamps and durations, in milliseconds).
    Real(f64),
}

impl Var {
    /// Text content, if this is a `Str`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Integer content, if this is an `Int`.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Float content. Integers widen, matching the host's loose numeric
    /// coercion for duration and timestamp variables.
    #[must_use]
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Self::Real(r) => Some(*r),
            #[allow(clippy::cast_precision_loss)]
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Whether this value is the explicit `None`.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Short type label used in error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Str(_) => "string",
            Self::Int(_) => "integer",
            Self::Real(_) => "real",
        }
    }
}

/// Shared store of experiment variables.
///
/// Keys are stored sorted so snapshots and iteration are deterministic.
#[derive(Debug, Clone, Default)]
pub struct VarStore {
    vars: BTreeMap<String, Var>,
}

impl VarStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { vars: BTreeMap::new() }
    }

    /// Set a variable, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: Var) {
        self.vars.insert(name.into(), value);
    }

    /// Return a variable's value, if the name has ever been set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Var> {
        self.vars.get(name)
    }

    /// Whether the variable currently holds a usable value.
    ///
    /// A name that was never set and a name explicitly set to [`Var::None`]
    /// both read as unset.
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.vars.get(name).is_some_and(|v| !v.is_none())
    }

    /// Text content of a variable, or `None` for missing/non-text values.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.vars.get(name).and_then(Var::as_str)
    }

    /// Integer content of a variable, or `None` for missing/non-integer values.
    #[must_use]
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.vars.get(name).and_then(Var::as_int)
    }

    /// Float content of a variable, or `None` for missing/non-numeric values.
    /// Integers widen, per [`Var::as_real`].
    #[must_use]
    pub fn get_real(&self, name: &str) -> Option<f64> {
        self.vars.get(name).and_then(Var::as_real)
    }

    /// Number of variables in the store (including explicit `None`s).
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` if no variable has ever been set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// All variables as a JSON object, in sorted key order.
    ///
    /// Unset variables appear as `null`, matching the host's convention of
    /// logging every declared variable for every trial.
    #[must_use]
    pub fn snapshot(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .vars
            .iter()
            .map(|(name, value)| {
                let json = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
                (name.clone(), json)
            })
            .collect();
        serde_json::Value::Object(map)
    }
}

/// Escape text into the host's single-line definition form.
///
/// Backslash, double quote, and newline become `\\`, `\"`, and `\n` so the
/// value survives inside a quoted `set` directive.
#[must_use]
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

/// Reverse [`sanitize`]: decode the host's escapes back into plain text.
///
/// Unknown escape sequences are kept verbatim rather than rejected; the
/// definition format is host-owned and parsed leniently.
#[must_use]
pub fn unsanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
