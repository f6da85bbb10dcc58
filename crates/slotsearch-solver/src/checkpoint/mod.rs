//! Checkpoint persistence.
//!
//! A checkpoint directory holds numbered generation directories and a
//! `current` file naming the committed one:
//!
//! ```text
//! checkpoint/
//!   current          -> "gen-3"
//!   gen-3/
//!     manifest.json
//!     distances.txt
//!     ...
//! ```
//!
//! Each generation holds one file per artifact:
//!
//! | file            | content                                              |
//! |-----------------|------------------------------------------------------|
//! | `manifest.json` | instance, occupancy mode, sentinel, start inventory  |
//! | `distances.txt` | one distance per line, table order                   |
//! | `witnesses.txt` | one JSON move array per line, table order            |
//! | `round.txt`     | completed round count                                |
//! | `frontier.json` | every round's frontier                               |
//! | `visited.json`  | visited signatures, sorted                           |
//!
//! The last three are only written in [`CheckpointMode::Full`]. A save
//! writes a fresh generation, then replaces `current` through a rename.
//! Readers only follow `current`, so an interrupted save leaves the
//! previous generation in effect.

use std::collections::HashSet;
use std::fs;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use slotsearch_config::CheckpointMode;
use slotsearch_core::{Instance, Inventory, Move, OccupancyMode, Signature};
use tracing::{debug, warn};

use crate::error::CheckpointError;
use crate::scope::{Round, SearchState};
use crate::table::DistanceTable;

pub const CURRENT_FILE: &str = "current";
pub const MANIFEST_FILE: &str = "manifest.json";
pub const ROUND_FILE: &str = "round.txt";
pub const DISTANCES_FILE: &str = "distances.txt";
pub const WITNESSES_FILE: &str = "witnesses.txt";
pub const FRONTIER_FILE: &str = "frontier.json";
pub const VISITED_FILE: &str = "visited.json";

const GENERATION_PREFIX: &str = "gen-";

/// Describes what a checkpoint directory was computed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub instance: Instance,
    pub occupancy: OccupancyMode,
    /// Value written in `distances.txt` for unresolved shapes.
    pub sentinel: u32,
    pub start: Inventory,
}

/// The tables of a checkpoint, without the search frontier.
#[derive(Debug, Clone)]
pub struct CheckpointTables {
    pub manifest: Manifest,
    pub table: DistanceTable,
    /// Completed rounds, when the checkpoint is resumable.
    pub round: Option<u32>,
}

/// Reads and writes one checkpoint directory.
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    dir: PathBuf,
    mode: CheckpointMode,
}

impl CheckpointStore {
    pub fn new(dir: impl Into<PathBuf>, mode: CheckpointMode) -> Self {
        Self {
            dir: dir.into(),
            mode,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn mode(&self) -> CheckpointMode {
        self.mode
    }

    /// Whether the directory holds a committed checkpoint at all.
    pub fn exists(&self) -> bool {
        self.generation_dir()
            .is_ok_and(|generation| generation.join(MANIFEST_FILE).is_file())
    }

    /// Whether the committed checkpoint can be resumed.
    pub fn is_resumable(&self) -> bool {
        self.generation_dir().is_ok_and(|generation| {
            generation.join(MANIFEST_FILE).is_file() && generation.join(ROUND_FILE).is_file()
        })
    }

    /// The committed generation directory named by `current`.
    pub fn generation_dir(&self) -> Result<PathBuf, CheckpointError> {
        let pointer = self.dir.join(CURRENT_FILE);
        let text = fs::read_to_string(&pointer).map_err(read_err(&pointer))?;
        let name = text.trim();
        if generation_number(name).is_none() {
            return Err(CheckpointError::Inconsistent(format!(
                "{} names no generation: {name:?}",
                pointer.display()
            )));
        }
        Ok(self.dir.join(name))
    }

    /// Writes every artifact for `state` and commits them together.
    pub fn save(&self, state: &SearchState) -> Result<(), CheckpointError> {
        let staged = self.stage(state)?;
        self.commit(&staged)
    }

    /// Writes every artifact for `state` into a new, uncommitted generation.
    pub(crate) fn stage(&self, state: &SearchState) -> Result<PathBuf, CheckpointError> {
        fs::create_dir_all(&self.dir).map_err(io_err(&self.dir))?;
        let next = self
            .generations()?
            .into_iter()
            .map(|(number, _)| number)
            .max()
            .map_or(1, |number| number + 1);
        let generation = self.dir.join(format!("{GENERATION_PREFIX}{next}"));
        fs::create_dir(&generation).map_err(io_err(&generation))?;

        let table = state.table();
        let sentinel = table.sentinel();
        let manifest = Manifest {
            instance: *state.instance(),
            occupancy: state.mode(),
            sentinel,
            start: state.start().clone(),
        };

        write_json(&generation.join(MANIFEST_FILE), &manifest, true)?;
        write_atomic(&generation.join(DISTANCES_FILE), |out| {
            for d in table.encoded_distances(sentinel) {
                writeln!(out, "{d}")?;
            }
            Ok(())
        })?;
        write_atomic(&generation.join(WITNESSES_FILE), |out| {
            for path in table.witnesses() {
                serde_json::to_writer(&mut *out, path)?;
                writeln!(out)?;
            }
            Ok(())
        })?;

        if self.mode == CheckpointMode::Full {
            write_json(&generation.join(FRONTIER_FILE), state.history(), false)?;
            let mut visited: Vec<&Signature> = state.visited().iter().collect();
            visited.sort_unstable();
            write_json(&generation.join(VISITED_FILE), &visited, false)?;
            write_atomic(&generation.join(ROUND_FILE), |out| {
                writeln!(out, "{}", state.round())?;
                Ok(())
            })?;
        }
        Ok(generation)
    }

    /// Points `current` at `generation` and removes every other generation.
    fn commit(&self, generation: &Path) -> Result<(), CheckpointError> {
        let name = generation
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        write_atomic(&self.dir.join(CURRENT_FILE), |out| writeln!(out, "{name}"))?;
        debug!(event = "checkpoint_committed", generation = %name);

        for (_, stale) in self.generations()? {
            if stale.as_path() == generation {
                continue;
            }
            // The commit already happened; a leftover generation is only clutter.
            if let Err(e) = fs::remove_dir_all(&stale) {
                warn!(
                    event = "checkpoint_cleanup_failed",
                    path = %stale.display(),
                    error = %e,
                );
            }
        }
        Ok(())
    }

    /// Every generation directory, committed or not.
    fn generations(&self) -> Result<Vec<(u64, PathBuf)>, CheckpointError> {
        let entries = fs::read_dir(&self.dir).map_err(io_err(&self.dir))?;
        let mut generations = Vec::new();
        for entry in entries {
            let entry = entry.map_err(io_err(&self.dir))?;
            let name = entry.file_name();
            let Some(number) = name.to_str().and_then(generation_number) else {
                continue;
            };
            let path = entry.path();
            if path.is_dir() {
                generations.push((number, path));
            }
        }
        Ok(generations)
    }

    /// Loads a resumable state, checking it was computed for `instance` and `mode`.
    pub fn load(
        &self,
        instance: &Instance,
        mode: OccupancyMode,
    ) -> Result<SearchState, CheckpointError> {
        let generation = self.generation_dir()?;
        let tables = load_tables_in(&generation)?;
        let manifest = &tables.manifest;
        if manifest.instance != *instance {
            return Err(CheckpointError::Inconsistent(format!(
                "checkpoint is for {}, configured instance is {instance}",
                manifest.instance
            )));
        }
        if manifest.occupancy != mode {
            return Err(CheckpointError::Inconsistent(format!(
                "checkpoint uses {} occupancy, configured {mode}",
                manifest.occupancy
            )));
        }
        let Some(round) = tables.round else {
            return Err(CheckpointError::Missing(generation.join(ROUND_FILE)));
        };

        let history: Vec<Round> = read_json(&generation.join(FRONTIER_FILE))?;
        let visited_list: Vec<Signature> = read_json(&generation.join(VISITED_FILE))?;
        let visited_len = visited_list.len();
        let visited: HashSet<Signature> = visited_list.into_iter().collect();
        if visited.len() != visited_len {
            return Err(CheckpointError::Inconsistent(
                "visited set contains duplicate signatures".into(),
            ));
        }

        SearchState::from_parts(
            mode,
            tables.manifest.start,
            round,
            tables.table,
            history,
            visited,
        )
        .map_err(CheckpointError::Inconsistent)
    }

    /// Loads the manifest and the distance/witness tables.
    pub fn load_tables(&self) -> Result<CheckpointTables, CheckpointError> {
        load_tables_in(&self.generation_dir()?)
    }
}

fn load_tables_in(generation: &Path) -> Result<CheckpointTables, CheckpointError> {
    let manifest: Manifest = read_json(&generation.join(MANIFEST_FILE))?;
    if !manifest.instance.admits(&manifest.start) {
        return Err(CheckpointError::Inconsistent(format!(
            "start inventory {} does not fit {}",
            manifest.start, manifest.instance
        )));
    }

    let distances_path = generation.join(DISTANCES_FILE);
    let mut distances = Vec::new();
    for_each_line(&distances_path, |line_no, line| {
        let d = line.trim().parse::<u32>().map_err(|e| CheckpointError::Parse {
            path: distances_path.clone(),
            line: line_no,
            message: e.to_string(),
        })?;
        distances.push(d);
        Ok(())
    })?;

    let witnesses_path = generation.join(WITNESSES_FILE);
    let mut witnesses = Vec::new();
    for_each_line(&witnesses_path, |line_no, line| {
        let path: Vec<Move> =
            serde_json::from_str(line).map_err(|e| CheckpointError::Parse {
                path: witnesses_path.clone(),
                line: line_no,
                message: e.to_string(),
            })?;
        witnesses.push(path);
        Ok(())
    })?;

    let table =
        DistanceTable::from_encoded(manifest.instance, distances, witnesses, manifest.sentinel)
            .map_err(CheckpointError::Inconsistent)?;

    let round_path = generation.join(ROUND_FILE);
    let round = if round_path.is_file() {
        let text = fs::read_to_string(&round_path).map_err(io_err(&round_path))?;
        let round = text.trim().parse::<u32>().map_err(|e| CheckpointError::Parse {
            path: round_path.clone(),
            line: 1,
            message: e.to_string(),
        })?;
        Some(round)
    } else {
        None
    };

    Ok(CheckpointTables {
        manifest,
        table,
        round,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CheckpointError> {
    let file = open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CheckpointError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
    pretty: bool,
) -> Result<(), CheckpointError> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(value)
    } else {
        serde_json::to_vec(value)
    }
    .map_err(|source| CheckpointError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    write_atomic(path, |out| out.write_all(&bytes))
}

/// Parses `gen-<n>`.
fn generation_number(name: &str) -> Option<u64> {
    name.strip_prefix(GENERATION_PREFIX)?.parse().ok()
}

fn write_atomic<F>(path: &Path, body: F) -> Result<(), CheckpointError>
where
    F: FnOnce(&mut BufWriter<fs::File>) -> io::Result<()>,
{
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!("{file_name}.tmp"));

    let file = fs::File::create(&tmp).map_err(io_err(&tmp))?;
    let mut out = BufWriter::new(file);
    body(&mut out).map_err(io_err(&tmp))?;
    out.flush().map_err(io_err(&tmp))?;
    out.get_ref().sync_all().map_err(io_err(&tmp))?;
    drop(out);
    fs::rename(&tmp, path).map_err(io_err(path))
}

fn for_each_line<F>(path: &Path, mut f: F) -> Result<(), CheckpointError>
where
    F: FnMut(usize, &str) -> Result<(), CheckpointError>,
{
    let reader = BufReader::new(open(path)?);
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(io_err(path))?;
        if line.trim().is_empty() {
            continue;
        }
        f(idx + 1, &line)?;
    }
    Ok(())
}

fn open(path: &Path) -> Result<fs::File, CheckpointError> {
    fs::File::open(path).map_err(read_err(path))
}

fn read_err(path: &Path) -> impl FnOnce(io::Error) -> CheckpointError + '_ {
    move |source| {
        if source.kind() == io::ErrorKind::NotFound {
            CheckpointError::Missing(path.to_path_buf())
        } else {
            CheckpointError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> CheckpointError + '_ {
    move |source| CheckpointError::Io {
        path: path.to_path_buf(),
        source,
    }
}
