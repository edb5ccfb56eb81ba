// src/lib.rs

//! Game Manager database statistics generator.
//!
//! Reads pre-collected account snapshots, computes per-region statistics,
//! writes a Markdown report and optionally notifies a webhook. One
//! sequential pass: load -> resolve -> aggregate -> render -> publish.

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod utils;
