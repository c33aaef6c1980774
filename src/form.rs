//! The on-screen form model: question labels, the icon row, the accept
//! button, and the repaint instructions a run emits against them.
//!
//! Widgets here are plain data. Drawing belongs to a [`FormView`]
//! implementation outside the core (terminal view in the demo harness,
//! recording views in tests), which receives the whole form on present and
//! per-icon updates afterwards.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use crate::config::Config;
use crate::consts;
use crate::vars;

/// Visual state of one rating icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconState {
    /// Not part of the current selection.
    #[default]
    Inactive,
    /// Part of the current selection (index at or below the clicked one).
    Active,
}

/// One rating icon, identified by its 0-based position in the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icon {
    pub index: u8,
    pub state: IconState,
}

impl Icon {
    /// A not-yet-selected icon at the given position.
    #[must_use]
    pub fn inactive(index: u8) -> Self {
        Self { index, state: IconState::Inactive }
    }

    /// Resource filename for this icon's current image.
    #[must_use]
    pub fn resource(&self) -> &'static str {
        match self.state {
            IconState::Active => consts::ACTIVE_ICON_RESOURCE,
            IconState::Inactive => consts::INACTIVE_ICON_RESOURCE,
        }
    }
}

/// One line of question text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub text: String,
}

/// The accept button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
}

/// The complete rating form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    /// Question text, one label per line.
    pub question: Vec<Label>,
    /// The rating icons, in index order.
    pub icons: Vec<Icon>,
    pub accept: Button,
}

impl Form {
    /// Build the form for a configuration: unsanitised question lines above
    /// a row of inactive icons above the accept button.
    #[must_use]
    pub fn build(config: &Config) -> Self {
        let question = vars::unsanitize(&config.question)
            .split('\n')
            .map(|line| Label { text: line.to_owned() })
            .collect();
        let icons = (0..config.maximum_rating).map(Icon::inactive).collect();
        Self { question, icons, accept: Button { label: config.accept_text.clone() } }
    }

    /// Apply a selection: every icon at or below `selected` becomes active,
    /// every icon above it inactive. The whole row is repainted on every
    /// click, in index order, not just the icons that changed state.
    pub fn select(&mut self, selected: u8) -> Vec<FormUpdate> {
        let mut updates = Vec::with_capacity(self.icons.len());
        for icon in &mut self.icons {
            icon.state =
                if icon.index <= selected { IconState::Active } else { IconState::Inactive };
            updates.push(FormUpdate::RepaintIcon { index: icon.index, state: icon.state });
        }
        updates
    }

    /// Number of icons currently active.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.icons.iter().filter(|icon| icon.state == IconState::Active).count()
    }

    /// Footprint under the legacy layout: 64 px icon cells in a single row,
    /// 32 px rows for the question lines and the accept button.
    #[must_use]
    pub fn size_px(&self) -> (u32, u32) {
        let cols = u32::try_from(self.icons.len()).unwrap_or(u32::MAX);
        let rows = u32::try_from(self.question.len()).unwrap_or(u32::MAX);
        let width = cols * consts::ICON_CELL_PX;
        let height = rows * consts::ACCEPT_ROW_PX + consts::ICON_CELL_PX + consts::ACCEPT_ROW_PX;
        (width, height)
    }
}

/// Instruction to the hosting view, produced by the run core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormUpdate {
    /// Show (or re-show) the whole form.
    Present,
    /// Redraw one icon in the given state.
    RepaintIcon { index: u8, state: IconState },
}

/// Where the form gets drawn.
///
/// `present` hands over the whole form (first show and every re-show after
/// an empty accept); `repaint_icon` follows selection changes one icon at a
/// time.
pub trait FormView {
    fn present(&mut self, form: &Form);
    fn repaint_icon(&mut self, index: u8, state: IconState);
}
