//! Property-editor surface: the rows the host's form framework renders for
//! this item, and the protocol for applying the changes they produce.
//!
//! The widgets themselves live in the host. This module describes them as
//! data ([`Control`]), hands back current values for repopulation, and
//! validates incoming changes. Repopulating controls makes them fire the
//! same change notifications a user edit would; the [`RefreshGuard`]
//! returned by `refresh_widget` travels with those notifications so
//! `apply_edit` can tell the two apart and drop the echoes.

#[cfg(test)]
#[path = "edit_test.rs"]
mod edit_test;

use crate::consts;
use crate::item::RatingScaleItem;
use crate::vars::{Var, VarStore, sanitize};

/// What kind of widget edits a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ControlKind {
    /// Single-line text input.
    LineEdit,
    /// Two-option combobox, `yes` or `no`.
    YesNo,
    /// Bounded integer spinner.
    Spinbox { min: u8, max: u8 },
    /// Multi-line text editor.
    Editor,
}

/// One row of the item's property editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Control {
    /// Variable the control edits.
    pub var: &'static str,
    pub label: &'static str,
    pub tooltip: &'static str,
    #[serde(flatten)]
    pub kind: ControlKind,
}

/// Current value for one control, used to repopulate the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlValue {
    pub var: &'static str,
    pub value: Var,
}

/// Token marking a programmatic repopulation as in progress.
///
/// Only `refresh_widget` creates one. Change notifications fired while the
/// host holds the guard are echoes of the repopulation, not user edits, and
/// `apply_edit` suppresses them when the guard is passed along.
#[derive(Debug)]
pub struct RefreshGuard(());

/// Host-visible follow-up to an applied change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    /// Redraw the named item's entry in the experiment overview.
    RefreshItemDisplay { item: String },
}

/// What became of one change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The change was written; the host should perform the action.
    Applied(EditAction),
    /// A refresh guard was live; nothing was written.
    Suppressed,
    /// The change failed validation; nothing was written.
    Rejected { reason: String },
}

/// A change notification from one control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlChange {
    /// New accept-button text.
    AcceptText(String),
    /// New allow-empty choice, `yes` or `no`.
    AllowEmpty(String),
    /// New maximum rating from the spinbox.
    MaximumRating(i64),
    /// New question text, possibly multi-line.
    Question(String),
}

/// Capability of items that expose a property editor.
pub trait ConfigurableWidget {
    /// Describe the editor rows, in display order.
    fn edit_controls(&self) -> Vec<Control>;

    /// Current control values, plus the guard covering the repopulation
    /// they are about to cause.
    fn refresh_widget(&self, vars: &VarStore) -> (Vec<ControlValue>, RefreshGuard);

    /// Apply one change notification against the store.
    fn apply_edit(
        &mut self,
        vars: &mut VarStore,
        change: ControlChange,
        guard: Option<&RefreshGuard>,
    ) -> ApplyOutcome;
}

impl ConfigurableWidget for RatingScaleItem {
    fn edit_controls(&self) -> Vec<Control> {
        vec![
            Control {
                var: consts::ACCEPT_TEXT_VAR,
                label: "Text on accept button",
                tooltip: "The text that appears on the accept button",
                kind: ControlKind::LineEdit,
            },
            Control {
                var: consts::ALLOW_EMPTY_VAR,
                label: "Allow empty response",
                tooltip: "Indicates whether an empty response is allowed",
                kind: ControlKind::YesNo,
            },
            Control {
                var: consts::MAXIMUM_RATING_VAR,
                label: "Maximum rating",
                tooltip: "The highest possible rating",
                kind: ControlKind::Spinbox {
                    min: consts::MIN_MAXIMUM_RATING,
                    max: consts::MAX_MAXIMUM_RATING,
                },
            },
            Control {
                var: consts::QUESTION_VAR,
                label: "Question",
                tooltip: "The question that you want to ask",
                kind: ControlKind::Editor,
            },
        ]
    }

    fn refresh_widget(&self, vars: &VarStore) -> (Vec<ControlValue>, RefreshGuard) {
        let values = self
            .edit_controls()
            .iter()
            .map(|control| ControlValue {
                var: control.var,
                value: vars.get(control.var).cloned().unwrap_or(Var::None),
            })
            .collect();
        (values, RefreshGuard(()))
    }

    fn apply_edit(
        &mut self,
        vars: &mut VarStore,
        change: ControlChange,
        guard: Option<&RefreshGuard>,
    ) -> ApplyOutcome {
        if guard.is_some() {
            tracing::debug!(change = ?change, "change during refresh, suppressed");
            return ApplyOutcome::Suppressed;
        }
        match change {
            ControlChange::AcceptText(text) => {
                vars.set(consts::ACCEPT_TEXT_VAR, Var::Str(sanitize(&text)));
            }
            ControlChange::AllowEmpty(choice) => {
                if choice != "yes" && choice != "no" {
                    return ApplyOutcome::Rejected {
                        reason: format!("allow_empty must be yes or no, got {choice}"),
                    };
                }
                vars.set(consts::ALLOW_EMPTY_VAR, Var::Str(choice));
            }
            ControlChange::MaximumRating(rating) => {
                let in_range = u8::try_from(rating).map_or(false, |value| {
                    (consts::MIN_MAXIMUM_RATING..=consts::MAX_MAXIMUM_RATING).contains(&value)
                });
                if !in_range {
                    return ApplyOutcome::Rejected {
                        reason: format!(
                            "maximum_rating must be {}..={}, got {rating}",
                            consts::MIN_MAXIMUM_RATING,
                            consts::MAX_MAXIMUM_RATING
                        ),
                    };
                }
                vars.set(consts::MAXIMUM_RATING_VAR, Var::Int(rating));
            }
            ControlChange::Question(text) => {
                vars.set(consts::QUESTION_VAR, Var::Str(sanitize(&text)));
            }
        }
        ApplyOutcome::Applied(EditAction::RefreshItemDisplay { item: self.name().to_owned() })
    }
}
