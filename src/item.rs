//! The rating-scale item: host lifecycle, the per-run state machine, and
//! the run loop that connects them.
//!
//! `RunState` is the pure core. It owns the form, the phase machine, and
//! every store write, and its handlers return [`FormUpdate`]s instead of
//! touching a view, so the per-click invariants are assertable in unit
//! tests with nothing but a variable store. [`RunnableItem::run`] on
//! [`RatingScaleItem`] is the thin shell: it pulls events from the source,
//! feeds the core, and forwards the resulting updates to the view.

#[cfg(test)]
#[path = "item_test.rs"]
mod item_test;

use crate::config::{self, Config, ConfigurationError};
use crate::consts;
use crate::events::{EventSource, FormEvent, RunPhase};
use crate::form::{Form, FormUpdate, FormView};
use crate::host::{ExperimentContext, PluginAssets, apply_definition};
use crate::vars::{Var, VarStore};

/// Why a run could not complete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunError {
    /// `run` was called before a successful `prepare`.
    #[error("item {0} has not been prepared")]
    NotPrepared(String),
    /// The event source closed before a response was accepted.
    #[error("event source closed before a response was accepted")]
    EventsClosed,
}

/// The host lifecycle contract: construct, `prepare` once, `run` per trial.
pub trait RunnableItem {
    /// Item type keyword, as used in experiment definitions.
    fn item_type(&self) -> &'static str;

    /// One-line description shown in the item toolbar.
    fn description(&self) -> &'static str;

    /// Validate host assumptions and materialise the typed configuration.
    ///
    /// # Errors
    /// [`ConfigurationError`] when the backends are not legacy or a
    /// configuration variable fails validation.
    fn prepare(&mut self, ctx: &ExperimentContext) -> Result<(), ConfigurationError>;

    /// Present the form and block until a response is accepted.
    ///
    /// # Errors
    /// [`RunError`] when the item was never prepared or the event source
    /// closes mid-run.
    fn run(
        &mut self,
        ctx: &mut ExperimentContext,
        events: &mut dyn EventSource,
        view: &mut dyn FormView,
    ) -> Result<(), RunError>;
}

// =============================================================
// Run core
// =============================================================

/// Per-run state machine, one instance per `run` call.
///
/// All store writes happen here: `response_time` at most once per run, on
/// the first selection; `response` on every selection, overwritten freely
/// until accept.
#[derive(Debug)]
pub struct RunState {
    form: Form,
    phase: RunPhase,
    selected: Option<u8>,
    onset_ms: f64,
    presentations: u32,
}

impl RunState {
    /// Fresh state: form built from the configuration, nothing selected.
    #[must_use]
    pub fn new(config: &Config, onset_ms: f64) -> Self {
        Self {
            form: Form::build(config),
            phase: RunPhase::Idle,
            selected: None,
            onset_ms,
            presentations: 0,
        }
    }

    #[must_use]
    pub fn form(&self) -> &Form {
        &self.form
    }

    #[must_use]
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// 0-based index of the most recent selection, if any.
    #[must_use]
    pub fn selected(&self) -> Option<u8> {
        self.selected
    }

    /// How many times the form has been shown this run.
    #[must_use]
    pub fn presentations(&self) -> u32 {
        self.presentations
    }

    #[must_use]
    pub fn onset_ms(&self) -> f64 {
        self.onset_ms
    }

    /// Start the run: clear any previous trial's response variables and
    /// request the first presentation.
    pub fn begin(&mut self, vars: &mut VarStore) -> Vec<FormUpdate> {
        vars.set(consts::RESPONSE_VAR, Var::None);
        vars.set(consts::RESPONSE_TIME_VAR, Var::None);
        self.phase = RunPhase::AwaitingResponse;
        self.presentations = 1;
        vec![FormUpdate::Present]
    }

    /// Handle a click on icon `index` at time `now_ms`.
    ///
    /// Writes `response_time` only when the store holds none yet, then
    /// unconditionally writes the 1-based `response`. Clicks outside the
    /// icon row, or outside `AwaitingResponse`, are ignored.
    pub fn icon_clicked(&mut self, index: u8, now_ms: f64, vars: &mut VarStore) -> Vec<FormUpdate> {
        if self.phase != RunPhase::AwaitingResponse {
            tracing::debug!(index, phase = ?self.phase, "icon click outside run, ignored");
            return Vec::new();
        }
        if usize::from(index) >= self.form.icons.len() {
            tracing::debug!(index, icons = self.form.icons.len(), "icon click out of range");
            return Vec::new();
        }
        if !vars.is_set(consts::RESPONSE_TIME_VAR) {
            vars.set(consts::RESPONSE_TIME_VAR, Var::Real(now_ms - self.onset_ms));
        }
        vars.set(consts::RESPONSE_VAR, Var::Int(i64::from(index) + 1));
        self.selected = Some(index);
        tracing::debug!(index, "rating selected");
        self.form.select(index)
    }

    /// Handle a click on the accept button: move to evaluation, nothing
    /// else. Whether the run actually ends is [`RunState::evaluate`]'s call.
    pub fn accept_clicked(&mut self) -> Vec<FormUpdate> {
        if self.phase == RunPhase::AwaitingResponse {
            self.phase = RunPhase::Evaluating;
        }
        Vec::new()
    }

    /// Decide whether the accepted state ends the run.
    ///
    /// A response in the store finishes the run. Without one the form is
    /// requested again and the run resumes waiting; an empty response is
    /// never finalised through this path.
    pub fn evaluate(&mut self, vars: &VarStore) -> Vec<FormUpdate> {
        if self.phase != RunPhase::Evaluating {
            return Vec::new();
        }
        if vars.is_set(consts::RESPONSE_VAR) {
            self.phase = RunPhase::Done;
            return Vec::new();
        }
        self.phase = RunPhase::AwaitingResponse;
        self.presentations += 1;
        tracing::debug!(presentations = self.presentations, "empty response, re-presenting form");
        vec![FormUpdate::Present]
    }
}

// =============================================================
// Item
// =============================================================

/// The rating-scale plugin item.
pub struct RatingScaleItem {
    name: String,
    config: Option<Config>,
}

impl RatingScaleItem {
    /// Construct the item: seed the configuration variables with their
    /// defaults, apply the host's definition string on top, and register
    /// the plugin's bundled files with the host.
    pub fn new(
        name: impl Into<String>,
        definition: &str,
        assets: &PluginAssets,
        ctx: &mut ExperimentContext,
    ) -> Self {
        let name = name.into();
        seed_defaults(&mut ctx.vars);
        apply_definition(&mut ctx.vars, definition);
        register_resources(assets, ctx);
        tracing::debug!(name = %name, "rating scale item constructed");
        Self { name, config: None }
    }

    /// Item name, as given by the host.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Typed configuration, present after a successful `prepare`.
    #[must_use]
    pub fn config(&self) -> Option<&Config> {
        self.config.as_ref()
    }
}

impl RunnableItem for RatingScaleItem {
    fn item_type(&self) -> &'static str {
        consts::ITEM_TYPE
    }

    fn description(&self) -> &'static str {
        consts::ITEM_DESCRIPTION
    }

    fn prepare(&mut self, ctx: &ExperimentContext) -> Result<(), ConfigurationError> {
        config::check_backends(&ctx.vars)?;
        let config = Config::from_store(&ctx.vars)?;
        tracing::debug!(
            name = %self.name,
            maximum_rating = config.maximum_rating,
            "rating scale prepared"
        );
        self.config = Some(config);
        Ok(())
    }

    fn run(
        &mut self,
        ctx: &mut ExperimentContext,
        events: &mut dyn EventSource,
        view: &mut dyn FormView,
    ) -> Result<(), RunError> {
        let config = self.config.clone().ok_or_else(|| RunError::NotPrepared(self.name.clone()))?;
        let onset_ms = ctx.now_ms();
        ctx.vars.set(format!("time_{}", self.name), Var::Real(onset_ms));
        tracing::debug!(name = %self.name, onset_ms, "rating scale run started");

        let mut run = RunState::new(&config, onset_ms);
        let updates = run.begin(&mut ctx.vars);
        apply_updates(view, &run, &updates);

        while run.phase() != RunPhase::Done {
            let Some(event) = events.next_event() else {
                return Err(RunError::EventsClosed);
            };
            let updates = match event {
                FormEvent::IconClicked(index) => {
                    let now_ms = ctx.now_ms();
                    run.icon_clicked(index, now_ms, &mut ctx.vars)
                }
                FormEvent::AcceptClicked => {
                    let mut updates = run.accept_clicked();
                    updates.extend(run.evaluate(&ctx.vars));
                    updates
                }
            };
            apply_updates(view, &run, &updates);
        }

        tracing::debug!(
            name = %self.name,
            response = ctx.vars.get_int(consts::RESPONSE_VAR),
            "rating scale run complete"
        );
        Ok(())
    }
}

/// Forward core updates to the hosting view.
fn apply_updates(view: &mut dyn FormView, run: &RunState, updates: &[FormUpdate]) {
    for update in updates {
        match *update {
            FormUpdate::Present => view.present(run.form()),
            FormUpdate::RepaintIcon { index, state } => view.repaint_icon(index, state),
        }
    }
}

/// Reset the four configuration variables to their defaults.
fn seed_defaults(vars: &mut VarStore) {
    vars.set(consts::QUESTION_VAR, Var::Str(consts::DEFAULT_QUESTION.to_owned()));
    vars.set(consts::ACCEPT_TEXT_VAR, Var::Str(consts::DEFAULT_ACCEPT_TEXT.to_owned()));
    vars.set(consts::MAXIMUM_RATING_VAR, Var::Int(i64::from(consts::DEFAULT_MAXIMUM_RATING)));
    vars.set(consts::ALLOW_EMPTY_VAR, Var::Str(consts::DEFAULT_ALLOW_EMPTY.to_owned()));
}

/// Register the plugin's bundled files, keyed by filename.
///
/// Icons ship with the plugin; the help document and the pointer cursor
/// come from the shared questionnaire directory.
fn register_resources(assets: &PluginAssets, ctx: &mut ExperimentContext) {
    for name in [
        consts::ACTIVE_ICON_RESOURCE,
        consts::INACTIVE_ICON_RESOURCE,
        consts::PLUGIN_ICON_RESOURCE,
        consts::PLUGIN_ICON_LARGE_RESOURCE,
    ] {
        ctx.resources.register(name, assets.plugin_file(name));
    }
    for name in [consts::HELP_RESOURCE, consts::CURSOR_RESOURCE] {
        ctx.resources.register(name, assets.shared_file(name));
    }
}
