//! Where frontier successors are computed.

use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use slotsearch_config::MoveThreadCount;

use crate::error::{SearchError, SearchResult};

/// Threading strategy for successor generation.
///
/// Only successor computation is parallel; merging is always serial.
#[derive(Clone, Default)]
pub enum Expansion {
    /// On the calling thread.
    #[default]
    Serial,
    /// On rayon's global pool.
    Global,
    /// On a dedicated pool.
    Pool(Arc<ThreadPool>),
}

impl Expansion {
    /// Builds the strategy selected by `count`.
    pub fn from_thread_count(count: &MoveThreadCount) -> SearchResult<Self> {
        match count {
            MoveThreadCount::None => Ok(Expansion::Serial),
            MoveThreadCount::Auto => Ok(Expansion::Global),
            MoveThreadCount::Count(n) => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(*n)
                    .thread_name(|i| format!("slotsearch-expand-{i}"))
                    .build()
                    .map_err(|e| SearchError::ThreadPool(e.to_string()))?;
                Ok(Expansion::Pool(Arc::new(pool)))
            }
        }
    }

    /// Maps `f` over `items`, preserving order.
    pub fn map<I, O, F>(&self, items: &[I], f: F) -> Vec<O>
    where
        I: Sync,
        O: Send,
        F: Fn(&I) -> O + Sync + Send,
    {
        match self {
            Expansion::Serial => items.iter().map(f).collect(),
            Expansion::Global => items.par_iter().map(f).collect(),
            Expansion::Pool(pool) => pool.install(|| items.par_iter().map(f).collect()),
        }
    }

    pub fn is_parallel(&self) -> bool {
        !matches!(self, Expansion::Serial)
    }
}

impl fmt::Debug for Expansion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expansion::Serial => write!(f, "Serial"),
            Expansion::Global => write!(f, "Global"),
            Expansion::Pool(pool) => f
                .debug_tuple("Pool")
                .field(&pool.current_num_threads())
                .finish(),
        }
    }
}

impl fmt::Display for Expansion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expansion::Serial => write!(f, "serial"),
            Expansion::Global => write!(f, "global pool"),
            Expansion::Pool(pool) => write!(f, "{} threads", pool.current_num_threads()),
        }
    }
}
