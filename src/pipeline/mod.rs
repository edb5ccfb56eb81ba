// src/pipeline/mod.rs

//! Pipeline stages for one statistics run.
//!
//! Strictly sequential: load -> resolve -> aggregate -> render -> publish.

pub mod aggregate;
pub mod embed;
pub mod load;
pub mod publish;
pub mod report;
pub mod resolve;
pub mod run;

pub use run::run_pipeline;

use std::collections::HashMap;

use crate::models::{Index, ServerDirectory};

use aggregate::RegionStats;

/// Everything the renderers consume, keyed by resolved folder name.
///
/// Both renderers are pure functions of this context; neither mutates it.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    /// Global snapshot index (last update, grand total)
    pub index: &'a Index,

    /// Static server metadata
    pub servers: &'a ServerDirectory,

    /// Declared account totals per resolved folder
    pub totals: &'a HashMap<String, u64>,

    /// Computed statistics per resolved folder
    pub stats: &'a HashMap<String, RegionStats>,
}
