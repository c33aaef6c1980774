//! Shared constants for the rating-scale item.

// ── Rating bounds ───────────────────────────────────────────────

/// Smallest usable maximum rating; a scale needs at least two points.
pub const MIN_MAXIMUM_RATING: u8 = 2;

/// Largest maximum rating the property editor's spinbox offers.
pub const MAX_MAXIMUM_RATING: u8 = 100;

// ── Form geometry ───────────────────────────────────────────────

/// Width and height of one icon cell in the legacy table layout, in pixels.
pub const ICON_CELL_PX: u32 = 64;

/// Height of the accept-button row, in pixels.
pub const ACCEPT_ROW_PX: u32 = 32;

// ── Configuration defaults ──────────────────────────────────────

/// Placeholder question shown until the user edits the item.
pub const DEFAULT_QUESTION: &str = "Put your question here";

/// Default label on the accept button.
pub const DEFAULT_ACCEPT_TEXT: &str = "Accept";

/// Default number of rating icons.
pub const DEFAULT_MAXIMUM_RATING: u8 = 5;

/// Default for the allow-empty option, as stored (`yes` / `no`).
pub const DEFAULT_ALLOW_EMPTY: &str = "no";

// ── Item metadata ───────────────────────────────────────────────

/// Item type under which the host registers this plugin.
pub const ITEM_TYPE: &str = "rating_scale";

/// One-line description shown in the host's item list.
pub const ITEM_DESCRIPTION: &str = "Presents a rating scale form";

// ── Variable names ──────────────────────────────────────────────

/// Store variable holding the question text, sanitised.
pub const QUESTION_VAR: &str = "question";

/// Store variable holding the accept-button label.
pub const ACCEPT_TEXT_VAR: &str = "accept_text";

/// Store variable holding the number of rating icons.
pub const MAXIMUM_RATING_VAR: &str = "maximum_rating";

/// Store variable holding the allow-empty flag, `yes` or `no`.
pub const ALLOW_EMPTY_VAR: &str = "allow_empty";

/// Store variable holding the accepted 1-based rating.
pub const RESPONSE_VAR: &str = "response";

/// Store variable holding the elapsed time from onset to first selection.
pub const RESPONSE_TIME_VAR: &str = "response_time";

/// Store variable naming the host's pointer-input backend.
pub const MOUSE_BACKEND_VAR: &str = "mouse_backend";

/// Store variable naming the host's drawing backend.
pub const CANVAS_BACKEND_VAR: &str = "canvas_backend";

/// The only backend mode the questionnaire items render under.
pub const LEGACY_BACKEND: &str = "legacy";

// ── Resource filenames ──────────────────────────────────────────

/// Icon image for selections at or below the current rating.
pub const ACTIVE_ICON_RESOURCE: &str = "rating_active.png";

/// Icon image for positions above the current rating.
pub const INACTIVE_ICON_RESOURCE: &str = "rating_inactive.png";

/// Small plugin icon shown in the host's item toolbar.
pub const PLUGIN_ICON_RESOURCE: &str = "rating_scale.png";

/// Large plugin icon shown in the host's item dialogs.
pub const PLUGIN_ICON_LARGE_RESOURCE: &str = "rating_scale_large.png";

/// Help document shared by the questionnaire plugins.
pub const HELP_RESOURCE: &str = "questionnaire_plugins.html";

/// Pointer cursor image shared by the questionnaire plugins.
pub const CURSOR_RESOURCE: &str = "mouse_cursor.png";
