// src/models/mod.rs

//! Domain models for the statistics generator.
//!
//! All inputs are read-only snapshots produced by the upstream collector;
//! nothing here mutates after loading.

mod account;
mod index;
mod server;

// Re-export all public types
pub use account::{Account, AccountsFile};
pub use index::{Index, RegionInfo};
pub use server::{ServerDirectory, ServerInfo, display_name, region_key};
