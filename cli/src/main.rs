use std::io;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rating_scale::consts;
use rating_scale::edit::ConfigurableWidget;
use rating_scale::events::{EventSource, FormEvent, Script};
use rating_scale::form::{Form, FormView, IconState};
use rating_scale::host::{ExperimentContext, PluginAssets};
use rating_scale::item::{RatingScaleItem, RunError, RunnableItem};
use rating_scale::vars::{Var, sanitize};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid script token `{0}`; expected an icon number or `accept`")]
    BadScriptToken(String),
    #[error("prepare failed: {0}")]
    Prepare(#[from] rating_scale::config::ConfigurationError),
    #[error("run failed: {0}")]
    Run(#[from] RunError),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "rating-cli", about = "Rating scale item demo harness")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one trial: present the form, feed it events, print the results.
    Run(RunArgs),
    /// Print the property-editor controls as JSON.
    Controls,
    /// Print the resources the item registers, with resolved paths.
    Resources(AssetArgs),
}

#[derive(Args, Debug)]
struct AssetArgs {
    /// Directory holding the plugin's own files.
    #[arg(long, default_value = "plugins/rating_scale")]
    plugin_dir: PathBuf,

    /// Shared questionnaire asset directory.
    #[arg(long, default_value = "shared/questionnaire")]
    shared_dir: PathBuf,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Item name; the onset lands in `time_<name>`.
    #[arg(long, default_value = "rating")]
    name: String,

    /// Question text; a literal \n starts a new line.
    #[arg(long)]
    question: Option<String>,

    /// Accept-button label.
    #[arg(long)]
    accept_text: Option<String>,

    /// Number of rating icons, 2..=100.
    #[arg(long)]
    maximum_rating: Option<u8>,

    /// Whether the editor allows empty responses, `yes` or `no`.
    #[arg(long)]
    allow_empty: Option<String>,

    /// Comma-separated events (icon numbers or `accept`) instead of stdin.
    #[arg(long)]
    script: Option<String>,

    #[command(flatten)]
    assets: AssetArgs,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => run_trial(&args),
        Command::Controls => print_controls(),
        Command::Resources(assets) => print_resources(&assets),
    }
}

fn run_trial(args: &RunArgs) -> Result<(), CliError> {
    let mut ctx = ExperimentContext::with_system_clock();
    ctx.vars.set(consts::MOUSE_BACKEND_VAR, Var::Str(consts::LEGACY_BACKEND.into()));
    ctx.vars.set(consts::CANVAS_BACKEND_VAR, Var::Str(consts::LEGACY_BACKEND.into()));

    let assets = PluginAssets::new(&args.assets.plugin_dir, &args.assets.shared_dir);
    let definition = build_definition(args);
    let mut item = RatingScaleItem::new(args.name.as_str(), &definition, &assets, &mut ctx);
    item.prepare(&ctx)?;

    let mut view = TerminalView::default();
    match &args.script {
        Some(script) => {
            let mut events = parse_script(script)?;
            item.run(&mut ctx, &mut events, &mut view)?;
        }
        None => {
            let mut events = StdinEvents::new();
            item.run(&mut ctx, &mut events, &mut view)?;
        }
    }

    print_json(&trial_report(&ctx, &args.name))
}

fn print_controls() -> Result<(), CliError> {
    let mut ctx = ExperimentContext::with_system_clock();
    let assets = PluginAssets::new("plugins/rating_scale", "shared/questionnaire");
    let item = RatingScaleItem::new("rating", "", &assets, &mut ctx);
    print_json(&serde_json::to_value(item.edit_controls())?)
}

fn print_resources(assets: &AssetArgs) -> Result<(), CliError> {
    let mut ctx = ExperimentContext::with_system_clock();
    let assets = PluginAssets::new(&assets.plugin_dir, &assets.shared_dir);
    let _item = RatingScaleItem::new("rating", "", &assets, &mut ctx);
    let listing: Vec<Value> = ctx
        .resources
        .names()
        .iter()
        .map(|name| {
            serde_json::json!({
                "name": name,
                "path": ctx.resources.path(name),
            })
        })
        .collect();
    print_json(&Value::Array(listing))
}

/// Render the command-line overrides as a host definition string.
fn build_definition(args: &RunArgs) -> String {
    let mut lines = Vec::new();
    if let Some(question) = &args.question {
        let text = question.replace("\\n", "\n");
        lines.push(format!("set question \"{}\"", sanitize(&text)));
    }
    if let Some(accept_text) = &args.accept_text {
        lines.push(format!("set accept_text \"{}\"", sanitize(accept_text)));
    }
    if let Some(rating) = args.maximum_rating {
        lines.push(format!("set maximum_rating {rating}"));
    }
    if let Some(allow_empty) = &args.allow_empty {
        lines.push(format!("set allow_empty {allow_empty}"));
    }
    lines.join("\n")
}

/// One event per input token: a 1-based icon number or `accept`.
fn parse_event(token: &str) -> Option<FormEvent> {
    if token.eq_ignore_ascii_case("accept") || token.eq_ignore_ascii_case("a") {
        return Some(FormEvent::AcceptClicked);
    }
    match token.parse::<u8>() {
        Ok(number) if number >= 1 => Some(FormEvent::IconClicked(number - 1)),
        _ => None,
    }
}

/// Parse a comma-separated script into a replayable event source.
fn parse_script(script: &str) -> Result<Script, CliError> {
    let mut events = Vec::new();
    for token in script.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let event = parse_event(token).ok_or_else(|| CliError::BadScriptToken(token.to_owned()))?;
        events.push(event);
    }
    Ok(Script::new(events))
}

/// Blocking event source reading one token per stdin line.
struct StdinEvents {
    lines: io::Lines<io::StdinLock<'static>>,
}

impl StdinEvents {
    fn new() -> Self {
        Self { lines: io::stdin().lines() }
    }
}

impl EventSource for StdinEvents {
    fn next_event(&mut self) -> Option<FormEvent> {
        loop {
            let Ok(line) = self.lines.next()? else {
                return None;
            };
            let token = line.trim();
            if token.is_empty() {
                continue;
            }
            match parse_event(token) {
                Some(event) => return Some(event),
                None => eprintln!("unrecognised input `{token}`; type an icon number or `accept`"),
            }
        }
    }
}

/// Draws the form as text. Active icons render as `[n]`, inactive as `(n)`.
#[derive(Default)]
struct TerminalView {
    icons: Vec<IconState>,
}

impl TerminalView {
    fn print_icon_row(&self) {
        let row: Vec<String> = self
            .icons
            .iter()
            .enumerate()
            .map(|(position, state)| match state {
                IconState::Active => format!("[{}]", position + 1),
                IconState::Inactive => format!("({})", position + 1),
            })
            .collect();
        println!("  {}", row.join(" "));
    }
}

impl FormView for TerminalView {
    fn present(&mut self, form: &Form) {
        self.icons = form.icons.iter().map(|icon| icon.state).collect();
        let (width, height) = form.size_px();
        tracing::debug!(width, height, "form presented");
        println!();
        for label in &form.question {
            println!("{}", label.text);
        }
        self.print_icon_row();
        println!("  [ {} ]", form.accept.label);
    }

    fn repaint_icon(&mut self, index: u8, state: IconState) {
        if let Some(slot) = self.icons.get_mut(usize::from(index)) {
            *slot = state;
        }
        // The core repaints the whole row in index order, so the last
        // icon's repaint marks the end of a batch.
        if usize::from(index) + 1 == self.icons.len() {
            self.print_icon_row();
        }
    }
}

/// Result summary: the response variables plus a full store snapshot.
fn trial_report(ctx: &ExperimentContext, name: &str) -> Value {
    serde_json::json!({
        "item": name,
        "response": ctx.vars.get(consts::RESPONSE_VAR),
        "response_time_ms": ctx.vars.get(consts::RESPONSE_TIME_VAR),
        "onset_ms": ctx.vars.get(&format!("time_{name}")),
        "vars": ctx.vars.snapshot(),
    })
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
