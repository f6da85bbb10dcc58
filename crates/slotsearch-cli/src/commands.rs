//! Subcommand implementations.

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use owo_colors::OwoColorize;
use slotsearch_config::SearchConfig;
use slotsearch_console::{render_heatmap, render_table};
use slotsearch_core::OccupancyMode;
use slotsearch_solver::{
    verify_witnesses, RoundListener, RoundStatistics, SearchBuilder, SearchError, SearchResult,
    SearchState, TerminationReason,
};

/// Looked up in the working directory when `--config` is not given.
const DEFAULT_CONFIG: &str = "slotsearch.toml";

/// Loads `path`, or the default file if present, or built-in defaults.
pub fn load_config(path: Option<&Path>) -> SearchResult<SearchConfig> {
    let config = match path {
        Some(path) => SearchConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG).is_file() => SearchConfig::load(DEFAULT_CONFIG)?,
        None => SearchConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

/// Prints the heatmap after every round.
#[derive(Debug)]
struct HeatmapListener {
    mode: OccupancyMode,
}

impl RoundListener for HeatmapListener {
    fn on_round_end(&self, state: &SearchState, round: &RoundStatistics) {
        println!(
            "\nAfter {} moves, {} inventories to expand next:\n",
            round.round,
            state.frontier().len()
        );
        println!("{}", render_heatmap(state.table(), self.mode));
    }
}

pub fn run(config: Option<&Path>, reset: bool, quiet: bool) -> SearchResult<ExitCode> {
    let config = load_config(config)?;
    init_console(quiet);

    let state = if reset {
        SearchBuilder::reset(&config)?
    } else {
        SearchBuilder::resume_state(&config)?
    };
    search(&config, state, quiet)
}

pub fn reset(config: Option<&Path>, then_run: bool) -> SearchResult<ExitCode> {
    let config = load_config(config)?;
    init_console(false);

    let state = SearchBuilder::reset(&config)?;
    if !then_run {
        println!("Checkpoint reset in {}.", config.checkpoint.directory.display());
        return Ok(ExitCode::SUCCESS);
    }
    search(&config, state, false)
}

pub fn show(config: Option<&Path>, heatmap: bool) -> SearchResult<ExitCode> {
    let config = load_config(config)?;
    let tables = SearchBuilder::store(&config).load_tables()?;

    println!("{}", tables.manifest.instance);
    if let Some(round) = tables.round {
        println!("{round} rounds completed");
    }
    println!(
        "{} of {} shapes resolved\n",
        tables.table.resolved_count(),
        tables.table.len()
    );
    if heatmap {
        println!("{}", render_heatmap(&tables.table, tables.manifest.occupancy));
    } else {
        println!("{}", render_table(&tables.table));
    }
    Ok(ExitCode::SUCCESS)
}

pub fn verify(config: Option<&Path>) -> SearchResult<ExitCode> {
    let config = load_config(config)?;
    if checkpoint_mismatches(&config)? == 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Replays the checkpoint's witnesses, printing each mismatch.
fn checkpoint_mismatches(config: &SearchConfig) -> SearchResult<usize> {
    let tables = SearchBuilder::store(config).load_tables()?;
    let manifest = &tables.manifest;

    let mismatches = verify_witnesses(&tables.table, &manifest.start, manifest.occupancy);
    if mismatches.is_empty() {
        println!(
            "{} {} witnesses replay correctly",
            "✓".bright_green().bold(),
            tables.table.resolved_count()
        );
    } else {
        for mismatch in &mismatches {
            println!("{} {mismatch}", "✗".bright_red().bold());
        }
        println!("{} mismatched witnesses", mismatches.len());
    }
    Ok(mismatches.len())
}

fn search(config: &SearchConfig, mut state: SearchState, quiet: bool) -> SearchResult<ExitCode> {
    let mut engine = SearchBuilder::engine(config)?;
    if !quiet {
        engine.add_listener(Arc::new(HeatmapListener {
            mode: config.instance.occupancy,
        }));
    }

    let outcome = engine.run(&mut state)?;
    if quiet || outcome.statistics.round_count() == 0 {
        println!("{}", render_heatmap(state.table(), state.mode()));
    }

    if outcome.reason == TerminationReason::RoundLimit {
        println!(
            "Stopped at the round limit of {}; {} shapes remain unknown.",
            config.termination.round_limit,
            state.feasible().len()
        );
    } else {
        println!(
            "Finished in {} moves after searching {} inventories.",
            state.round(),
            state.explored_count()
        );
    }

    let mismatches = verify_witnesses(state.table(), state.start(), state.mode());
    if !mismatches.is_empty() {
        return Err(SearchError::Core(slotsearch_core::SlotSearchError::Internal(
            format!("{} witnesses failed to replay", mismatches.len()),
        )));
    }
    Ok(ExitCode::SUCCESS)
}

fn init_console(quiet: bool) {
    if quiet {
        slotsearch_console::init_with_directive("slotsearch_solver=warn");
    } else {
        slotsearch_console::init();
    }
}
