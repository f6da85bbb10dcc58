//! Configuration system for slotsearch.
//!
//! Load search configuration from TOML or YAML files to choose the instance,
//! the round safety limit and the checkpoint location without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use slotsearch_config::SearchConfig;
//!
//! let config = SearchConfig::from_toml_str(r#"
//!     [instance]
//!     slot_count = 9
//!     capacity = 16
//!
//!     [termination]
//!     round_limit = 12
//!
//!     [checkpoint]
//!     directory = "runs/nine"
//! "#).unwrap();
//!
//! assert_eq!(config.termination.round_limit, 12);
//! assert_eq!(config.instance().unwrap().total(), 16);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use slotsearch_config::SearchConfig;
//!
//! let config = SearchConfig::load("slotsearch.toml").unwrap_or_default();
//! // Proceeds with a 36-slot, capacity-64 inventory if the file doesn't exist
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use slotsearch_core::{Instance, Inventory, OccupancyMode, Quantity, SlotSearchError};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Instance(#[from] SlotSearchError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main search configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Number of threads for parallel frontier expansion.
    #[serde(default)]
    pub move_thread_count: MoveThreadCount,

    /// Inventory being searched.
    #[serde(default)]
    pub instance: InstanceConfig,

    /// Round safety limit.
    #[serde(default)]
    pub termination: TerminationConfig,

    /// Where and how progress is persisted.
    #[serde(default)]
    pub checkpoint: CheckpointConfig,
}

impl SearchConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, YAML for `.yaml`/`.yml`, TOML otherwise.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or can't be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the round safety limit.
    pub fn with_round_limit(mut self, round_limit: u32) -> Self {
        self.termination.round_limit = round_limit;
        self
    }

    /// Sets the slot count and capacity, resetting the start to one full slot.
    pub fn with_inventory(mut self, slot_count: usize, capacity: Quantity) -> Self {
        self.instance.slot_count = slot_count;
        self.instance.capacity = capacity;
        self.instance.start_slots = None;
        self.instance.start_cursor = 0;
        self
    }

    /// Sets an explicit start inventory.
    pub fn with_start(mut self, slots: Vec<Quantity>, cursor: Quantity) -> Self {
        self.instance.slot_count = slots.len();
        self.instance.start_slots = Some(slots);
        self.instance.start_cursor = cursor;
        self
    }

    /// Sets the checkpoint directory.
    pub fn with_checkpoint_dir(mut self, directory: impl Into<PathBuf>) -> Self {
        self.checkpoint.directory = directory.into();
        self
    }

    /// Sets which artifacts are written after each round.
    pub fn with_checkpoint_mode(mut self, mode: CheckpointMode) -> Self {
        self.checkpoint.mode = mode;
        self
    }

    /// Sets the occupancy mode.
    pub fn with_occupancy(mut self, occupancy: OccupancyMode) -> Self {
        self.instance.occupancy = occupancy;
        self
    }

    /// Sets the move thread count.
    pub fn with_move_thread_count(mut self, count: MoveThreadCount) -> Self {
        self.move_thread_count = count;
        self
    }

    /// Builds the (possibly trimmed) start inventory.
    pub fn start_inventory(&self) -> Result<Inventory, ConfigError> {
        self.instance.start_inventory()
    }

    /// Builds the instance described by this configuration.
    pub fn instance(&self) -> Result<Instance, ConfigError> {
        let start = self.start_inventory()?;
        Ok(Instance::for_start(&start, self.instance.capacity)?)
    }

    /// Checks every setting that can be checked without touching disk.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.termination.round_limit == 0 {
            return Err(ConfigError::Invalid(
                "termination.round_limit must be at least 1".into(),
            ));
        }
        if let MoveThreadCount::Count(0) = self.move_thread_count {
            return Err(ConfigError::Invalid(
                "move_thread_count must be at least 1".into(),
            ));
        }
        self.instance()?;
        Ok(())
    }
}

/// Move thread count configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveThreadCount {
    /// Use the global rayon pool.
    #[default]
    Auto,

    /// Expand the frontier on the calling thread.
    None,

    /// Specific number of threads.
    Count(usize),
}

/// Inventory configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InstanceConfig {
    /// Number of slots.
    #[serde(default = "default_slot_count")]
    pub slot_count: usize,

    /// Maximum stack size per slot (and on the cursor).
    #[serde(default = "default_capacity")]
    pub capacity: Quantity,

    /// Explicit start slots; defaults to one full slot followed by empties.
    #[serde(default)]
    pub start_slots: Option<Vec<Quantity>>,

    /// Items on the cursor at the start.
    #[serde(default)]
    pub start_cursor: Quantity,

    /// Drop trailing empty slots that could never be occupied.
    #[serde(default = "default_trim_slots")]
    pub trim_slots: bool,

    /// How discovered inventories resolve shape coordinates.
    #[serde(default)]
    pub occupancy: OccupancyMode,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            slot_count: default_slot_count(),
            capacity: default_capacity(),
            start_slots: None,
            start_cursor: 0,
            trim_slots: default_trim_slots(),
            occupancy: OccupancyMode::default(),
        }
    }
}

impl InstanceConfig {
    /// Builds the start inventory, trimming unusable slots if enabled.
    ///
    /// At most `total` slots can ever be occupied at once, so with
    /// `trim_slots` the inventory keeps no more than `total` slots.
    pub fn start_inventory(&self) -> Result<Inventory, ConfigError> {
        let mut start = match &self.start_slots {
            Some(slots) => {
                if slots.len() != self.slot_count {
                    return Err(ConfigError::Invalid(format!(
                        "instance.start_slots has {} entries but slot_count is {}",
                        slots.len(),
                        self.slot_count
                    )));
                }
                Inventory::new(slots.clone(), self.start_cursor)
            }
            None => {
                let slot_count = if self.trim_slots {
                    let total = usize::from(self.capacity) + usize::from(self.start_cursor);
                    self.slot_count.min(total.max(1))
                } else {
                    Instance::check_dimensions(self.slot_count, self.capacity)?;
                    self.slot_count
                };
                let mut inv = Inventory::with_full_slot(slot_count, self.capacity);
                if self.start_cursor > 0 {
                    inv = Inventory::new(inv.slots().to_vec(), self.start_cursor);
                }
                inv
            }
        };
        if self.trim_slots {
            let total = start.total() as usize;
            start.trim_empty_to(total.max(1));
        }
        Ok(start)
    }
}

fn default_slot_count() -> usize {
    36
}

fn default_capacity() -> Quantity {
    64
}

fn default_trim_slots() -> bool {
    true
}

/// Termination configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum number of completed rounds (operations per witness).
    #[serde(default = "default_round_limit")]
    pub round_limit: u32,
}

impl Default for TerminationConfig {
    fn default() -> Self {
        Self {
            round_limit: default_round_limit(),
        }
    }
}

fn default_round_limit() -> u32 {
    20
}

/// Checkpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CheckpointConfig {
    /// Directory holding the checkpoint artifacts.
    #[serde(default = "default_checkpoint_dir")]
    pub directory: PathBuf,

    /// Which artifacts are written after each round.
    #[serde(default)]
    pub mode: CheckpointMode,
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            directory: default_checkpoint_dir(),
            mode: CheckpointMode::default(),
        }
    }
}

fn default_checkpoint_dir() -> PathBuf {
    PathBuf::from("checkpoint")
}

/// Checkpoint artifact selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckpointMode {
    /// Round counter, tables, frontier history and visited set; resumable.
    #[default]
    Full,

    /// Distance and witness tables only; cannot be resumed.
    TablesOnly,
}

#[cfg(test)]
mod tests;
