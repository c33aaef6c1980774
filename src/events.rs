//! Form events and the run-phase state machine.
//!
//! A run is a plain iteration over an [`EventSource`]: the source blocks
//! until the participant does something and yields one [`FormEvent`] per
//! interaction. Which events matter, and when the loop ends, is decided by
//! the [`RunPhase`] machine in the item module.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::collections::VecDeque;

/// One participant interaction with the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    /// A rating icon was clicked, identified by its 0-based index.
    IconClicked(u8),
    /// The accept button was clicked.
    AcceptClicked,
}

/// Blocking stream of form events.
///
/// `next_event` suspends the run until the next interaction. `None` means
/// the source is gone for good (window closed, script exhausted); a run
/// cannot finish normally after that.
pub trait EventSource {
    fn next_event(&mut self) -> Option<FormEvent>;
}

/// Replays a fixed sequence of events, then reports closure.
///
/// Drives every scenario in the tests and the demo harness's `--script`
/// mode.
#[derive(Debug, Clone, Default)]
pub struct Script {
    queue: VecDeque<FormEvent>,
}

impl Script {
    /// Create a script from events in playback order.
    #[must_use]
    pub fn new(events: impl IntoIterator<Item = FormEvent>) -> Self {
        Self { queue: events.into_iter().collect() }
    }
}

impl EventSource for Script {
    fn next_event(&mut self) -> Option<FormEvent> {
        self.queue.pop_front()
    }
}

/// Where a run currently stands.
///
/// A run starts in `AwaitingResponse`, loops there across icon clicks,
/// moves to `Evaluating` on accept, and from there either finishes in
/// `Done` (a response exists) or drops back to `AwaitingResponse` with the
/// form re-presented (no response yet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunPhase {
    /// No run in progress.
    #[default]
    Idle,
    /// Form is up; icon clicks update the selection.
    AwaitingResponse,
    /// Accept was clicked; the response is being checked.
    Evaluating,
    /// A response was accepted; the run is over.
    Done,
}
