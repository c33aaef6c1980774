//! Host contracts: the experiment context an item runs inside, the
//! filename-keyed resource registry, explicit plugin asset lookup, the
//! millisecond clock, and the host-owned item-definition format.
//!
//! The real experiment runtime lives outside this crate. What lives here is
//! the narrow surface an item actually touches (shared variables, resource
//! registration, time), small enough to stand in for the host in tests and
//! in the demo harness.

#[cfg(test)]
#[path = "host_test.rs"]
mod host_test;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::vars::{Var, VarStore};

// =============================================================
// Clock
// =============================================================

/// Millisecond clock used to timestamp run onsets and responses.
///
/// [`SystemClock`] implements it over wall time; tests implement it over a
/// manual counter.
pub trait Clock {
    /// Milliseconds elapsed since the clock's origin.
    fn now_ms(&self) -> f64;
}

/// Wall clock backed by a monotonic [`Instant`] taken at construction.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose origin is now.
    #[must_use]
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

// =============================================================
// Resources
// =============================================================

/// Filename-keyed registry of files an item needs at run time.
///
/// Items register everything they may load during their constructor so the
/// host can locate, bundle, and ship those files with the experiment.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    entries: BTreeMap<String, PathBuf>,
}

impl ResourceRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { entries: BTreeMap::new() }
    }

    /// Register a resource under its filename, replacing any previous path.
    pub fn register(&mut self, name: impl Into<String>, path: PathBuf) {
        self.entries.insert(name.into(), path);
    }

    /// Path registered for a filename, if any.
    #[must_use]
    pub fn path(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(PathBuf::as_path)
    }

    /// Whether a filename has been registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered filenames in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Number of registered resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================
// Plugin assets
// =============================================================

/// Where a plugin's bundled files live on disk.
///
/// Injected into item constructors; resource paths resolve against these
/// two directories and nothing else, with no global search path involved.
#[derive(Debug, Clone)]
pub struct PluginAssets {
    plugin_dir: PathBuf,
    shared_dir: PathBuf,
}

impl PluginAssets {
    /// Describe a plugin's own directory and the shared questionnaire
    /// asset directory it borrows the help file and cursor from.
    #[must_use]
    pub fn new(plugin_dir: impl Into<PathBuf>, shared_dir: impl Into<PathBuf>) -> Self {
        Self { plugin_dir: plugin_dir.into(), shared_dir: shared_dir.into() }
    }

    /// Full path of a file bundled with the plugin itself.
    #[must_use]
    pub fn plugin_file(&self, name: &str) -> PathBuf {
        self.plugin_dir.join(name)
    }

    /// Full path of a file from the shared questionnaire directory.
    #[must_use]
    pub fn shared_file(&self, name: &str) -> PathBuf {
        self.shared_dir.join(name)
    }
}

// =============================================================
// Experiment context
// =============================================================

/// Everything the host hands an item: shared variables, the resource
/// registry, and the clock.
pub struct ExperimentContext {
    /// Shared variable store, read and written by items and host alike.
    pub vars: VarStore,
    /// Files registered by items, keyed by filename.
    pub resources: ResourceRegistry,
    clock: Box<dyn Clock>,
}

impl ExperimentContext {
    /// Create a context around an injected clock.
    #[must_use]
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self { vars: VarStore::new(), resources: ResourceRegistry::new(), clock }
    }

    /// Create a context timed by the wall clock.
    #[must_use]
    pub fn with_system_clock() -> Self {
        Self::new(Box::new(SystemClock::new()))
    }

    /// Current time in milliseconds since the context's clock origin.
    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }
}

impl Default for ExperimentContext {
    fn default() -> Self {
        Self::with_system_clock()
    }
}

// =============================================================
// Definition format
// =============================================================

/// Apply a host item-definition string to the variable store.
///
/// The format is owned by the host: one directive per line,
/// `set <variable> <value>`, where the value is either a double-quoted
/// string (kept in sanitised form, see [`crate::vars::sanitize`]) or a bare
/// token read as integer, real, the literal `None`, or plain text, in that
/// order. Anything else (blank lines, unknown directives, malformed
/// quoting) is skipped, the way the host treats definition lines it does
/// not understand.
pub fn apply_definition(vars: &mut VarStore, definition: &str) {
    for line in definition.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_set(line) {
            Some((name, value)) => vars.set(name, value),
            None => tracing::debug!(line, "skipping definition line"),
        }
    }
}

/// Parse one `set <variable> <value>` directive.
fn parse_set(line: &str) -> Option<(String, Var)> {
    let rest = line.strip_prefix("set ")?;
    let (name, raw) = rest.trim_start().split_once(char::is_whitespace)?;
    if name.is_empty() {
        return None;
    }
    let value = parse_value(raw.trim())?;
    Some((name.to_owned(), value))
}

/// Parse a directive value: quoted string, integer, real, `None`, or bare text.
fn parse_value(raw: &str) -> Option<Var> {
    if raw.is_empty() {
        return None;
    }
    if raw.starts_with('"') {
        return parse_quoted(raw).map(Var::Str);
    }
    if raw == "None" {
        return Some(Var::None);
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Some(Var::Int(int));
    }
    if let Ok(real) = raw.parse::<f64>() {
        return Some(Var::Real(real));
    }
    Some(Var::Str(raw.to_owned()))
}

/// Extract the inside of a double-quoted value, escapes intact.
///
/// Returns `None` when the closing quote is missing or when content trails
/// after it; the caller skips the line either way.
fn parse_quoted(raw: &str) -> Option<String> {
    let inner = raw.strip_prefix('"')?;
    let mut escaped = false;
    for (idx, ch) in inner.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' => {
                if inner[idx + 1..].trim().is_empty() {
                    return Some(inner[..idx].to_owned());
                }
                return None;
            }
            _ => {}
        }
    }
    None
}
