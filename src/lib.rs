//! Rating-scale item for a desktop experiment builder.
//!
//! One plugin item: a question above a row of selectable rating icons and
//! an accept button. While the participant clicks, the item tracks the
//! current selection; on accept it writes the 1-based rating and the
//! response time into the host's shared variable store and returns control
//! to the host. The experiment runtime, the drawing toolkit, and the
//! property-editor framework stay external; this crate defines the
//! contracts it needs from them ([`events::EventSource`], [`form::FormView`],
//! [`host::ExperimentContext`]) together with scripted and in-memory
//! implementations driven by the tests and the demo harness.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`item`] | Item lifecycle, testable [`item::RunState`] core, run loop |
//! | [`form`] | Form widget model and repaint instructions |
//! | [`events`] | Form events, event sources, the run-phase machine |
//! | [`config`] | Typed configuration materialised from the store |
//! | [`edit`] | Property-editor surface: controls, refresh guard, apply |
//! | [`host`] | Experiment context, resources, clock, definition parsing |
//! | [`vars`] | Variable store and the sanitise/unsanitise convention |
//! | [`consts`] | Defaults, bounds, variable names, resource filenames |

pub mod config;
pub mod consts;
pub mod edit;
pub mod events;
pub mod form;
pub mod host;
pub mod item;
pub mod vars;
