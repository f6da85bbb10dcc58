//! Colorful console output for search progress.
//!
//! Provides a custom `tracing` layer that formats search events with colors,
//! and text renderings of the distance table.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (search start/end, rounds, checkpoints)
//! - **DEBUG**: Rounds cut short once every shape is resolved

mod render;

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub use render::{render_heatmap, render_table};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SEARCH_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "slotsearch_solver=info";

/// Initializes console output with the default filter.
///
/// Safe to call multiple times - only the first call has effect.
pub fn init() {
    init_with_directive(DEFAULT_DIRECTIVE);
}

/// Initializes console output, using `directive` unless `RUST_LOG` is set.
///
/// Prints the banner and installs the console layer behind an `EnvFilter`.
/// Only the first call has effect.
pub fn init_with_directive(directive: &str) {
    INIT.get_or_init(|| {
        print_banner();

        let default = directive
            .parse::<Directive>()
            .unwrap_or_else(|_| LevelFilter::INFO.into());
        let filter = EnvFilter::builder()
            .with_default_directive(default)
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SearchConsoleLayer)
            .try_init();
    });
}

fn mark_search_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SEARCH_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SEARCH_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
     _       _                         _
 ___| | ___ | |_ ___  ___  __ _ _ __ ___| |__
/ __| |/ _ \| __/ __|/ _ \/ _` | '__/ __| '_ \
\__ \ | (_) | |_\__ \  __/ (_| | | | (__| | | |
|___/_|\___/ \__|___/\___|\__,_|_|  \___|_| |_|
"#;

    let version_line = format!("          v{VERSION} - Breadth-First Inventory Search\n");

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats search events with colors.
pub struct SearchConsoleLayer;

impl<S: Subscriber> Layer<S> for SearchConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let target = event.metadata().target();
        if !target.starts_with("slotsearch") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{output}");
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    reason: Option<String>,
    occupancy: Option<String>,
    expansion: Option<String>,
    dir: Option<String>,
    slot_count: Option<u64>,
    capacity: Option<u64>,
    total: Option<u64>,
    round: Option<u64>,
    rounds: Option<u64>,
    feasible: Option<u64>,
    expanded: Option<u64>,
    moves: Option<u64>,
    new_states: Option<u64>,
    resolved: Option<u64>,
    remaining: Option<u64>,
    unresolved: Option<u64>,
    explored: Option<u64>,
    frontier: Option<u64>,
    speed: Option<u64>,
    duration_ms: Option<u64>,
    stopped_early: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.record_str(field, format!("{value:?}").trim_matches('"'));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        let slot = match field.name() {
            "slot_count" => &mut self.slot_count,
            "capacity" => &mut self.capacity,
            "total" => &mut self.total,
            "round" => &mut self.round,
            "rounds" => &mut self.rounds,
            "feasible" => &mut self.feasible,
            "expanded" => &mut self.expanded,
            "moves" => &mut self.moves,
            "new_states" => &mut self.new_states,
            "resolved" => &mut self.resolved,
            "remaining" => &mut self.remaining,
            "unresolved" => &mut self.unresolved,
            "explored" => &mut self.explored,
            "frontier" => &mut self.frontier,
            "speed" => &mut self.speed,
            "duration_ms" => &mut self.duration_ms,
            _ => return,
        };
        *slot = Some(value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "stopped_early" {
            self.stopped_early = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        let slot = match field.name() {
            "event" => &mut self.event,
            "reason" => &mut self.reason,
            "occupancy" => &mut self.occupancy,
            "expansion" => &mut self.expansion,
            "dir" => &mut self.dir,
            _ => return,
        };
        *slot = Some(value.to_string());
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "search_start" => format_search_start(v),
        "round_end" => format_round_end(v),
        "checkpoint_saved" => format_checkpoint_saved(v),
        "checkpoint_loaded" => format_checkpoint_loaded(v),
        "checkpoint_reset" => format_checkpoint_reset(v),
        "round_stopped_early" => format_stopped_early(v),
        "search_end" => format_search_end(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn num(n: Option<u64>) -> String {
    n.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_search_start(v: &EventVisitor) -> String {
    mark_search_start();
    format!(
        "{} {} Searching │ {} slots │ capacity {} │ {} items │ {} │ {} shapes open │ from round {} │ {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        num(v.slot_count).bright_yellow(),
        num(v.capacity).bright_yellow(),
        num(v.total).bright_yellow(),
        v.occupancy.as_deref().unwrap_or("exact").white(),
        num(v.feasible).bright_magenta(),
        num(v.round).white(),
        v.expansion.as_deref().unwrap_or("serial").bright_black(),
    )
}

fn format_round_end(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} Round {:>3} │ {:>12} new │ {:>12} moves │ {:>12}/s │ {} resolved │ {} open │ {}",
        format_elapsed(),
        "●".bright_blue(),
        num(v.round).white().bold(),
        num(v.new_states).white(),
        num(v.moves).white(),
        num(v.speed).bright_magenta().bold(),
        num(v.resolved).bright_green(),
        num(v.remaining).bright_yellow(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
    );
    if v.stopped_early == Some(true) {
        output.push_str(&format!(" │ {}", "stopped early".bright_cyan()));
    }
    output
}

fn format_checkpoint_saved(v: &EventVisitor) -> String {
    format!(
        "{} {} Checkpoint round {} → {} ({})",
        format_elapsed(),
        "⤓".bright_black(),
        num(v.round),
        v.dir.as_deref().unwrap_or("?"),
        format_duration_ms(v.duration_ms.unwrap_or(0)),
    )
    .bright_black()
    .to_string()
}

fn format_checkpoint_loaded(v: &EventVisitor) -> String {
    format!(
        "{} {} Resuming at round {} │ {} resolved │ {} inventories explored",
        format_elapsed(),
        "⤒".bright_cyan(),
        num(v.round).white().bold(),
        num(v.resolved).bright_green(),
        num(v.explored).white(),
    )
}

fn format_checkpoint_reset(v: &EventVisitor) -> String {
    format!(
        "{} {} Checkpoint reset in {}",
        format_elapsed(),
        "↺".bright_cyan(),
        v.dir.as_deref().unwrap_or("?").white(),
    )
}

fn format_stopped_early(v: &EventVisitor) -> String {
    format!(
        "{} {} Round {} stopped after {} inventories: nothing left to resolve",
        format_elapsed(),
        "…".bright_black(),
        num(v.round),
        num(v.frontier),
    )
    .bright_black()
    .to_string()
}

fn format_search_end(v: &EventVisitor) -> String {
    let reason = v.reason.as_deref().unwrap_or("unknown");
    let status = match reason {
        "feasibility_exhausted" => "COMPLETE".bright_green().bold().to_string(),
        "frontier_exhausted" => "COMPLETE (unreachable shapes remain)"
            .bright_green()
            .bold()
            .to_string(),
        _ => "ROUND LIMIT".bright_yellow().bold().to_string(),
    };

    let mut output = format!(
        "{} {} Search ended │ {} │ {} rounds │ {} resolved │ {} open │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        status,
        num(v.rounds).white(),
        num(v.resolved).bright_green(),
        num(v.unresolved).bright_yellow(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
    );

    output.push_str("\n\n");
    output.push_str(&summary_box(&[
        ("Stopped by:", reason.to_string()),
        ("Rounds:", num(v.rounds)),
        ("Inventories explored:", num(v.explored)),
        ("Shapes resolved:", num(v.resolved)),
    ]));
    output
}

fn summary_box(rows: &[(&str, String)]) -> String {
    const INNER_WIDTH: usize = 58;
    let border = "═".repeat(INNER_WIDTH);
    let mut output = format!("╔{border}╗").bright_cyan().to_string();
    output.push('\n');
    for (label, value) in rows {
        output.push_str(&format!(
            "{}  {:<24}{:>30}  {}",
            "║".bright_cyan(),
            label,
            value,
            "║".bright_cyan()
        ));
        output.push('\n');
    }
    output.push_str(&format!("╚{border}╝").bright_cyan().to_string());
    output.push('\n');
    output
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{ms}ms")
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{mins}m {secs}s")
    }
}
