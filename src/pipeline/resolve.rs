// src/pipeline/resolve.rs

//! Region key reconciliation.
//!
//! Index keys and on-disk folder names drifted apart historically (legacy
//! short keys, encoding damage from the collector). This is the only place
//! allowed to guess: everything downstream works on resolved, folder-backed
//! regions only.

use std::collections::HashMap;

use crate::config::RegionAlias;

/// Result of reconciling index keys against on-disk folders.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// region key -> folder name
    pub mapping: HashMap<String, String>,
    /// Keys with no matching folder, excluded from aggregation
    pub dropped: Vec<String>,
    /// One warning per dropped key
    pub warnings: Vec<String>,
}

/// Map each declared region key to at most one folder name.
///
/// Priority per key, first match wins:
/// 1. exact folder match
/// 2. alias table lookup (the target folder must actually exist)
/// 3. case-insensitive folder match, folders scanned in sorted order
/// 4. drop the key with a warning
///
/// Deterministic: the same keys, folders, and aliases always produce the
/// same mapping.
pub fn resolve_regions(keys: &[String], folders: &[String], aliases: &[RegionAlias]) -> Resolution {
    let mut sorted_folders: Vec<&String> = folders.iter().collect();
    sorted_folders.sort();

    let alias_map: HashMap<&str, &str> = aliases
        .iter()
        .map(|a| (a.key.as_str(), a.folder.as_str()))
        .collect();

    let mut resolution = Resolution::default();

    let mut sorted_keys: Vec<&String> = keys.iter().collect();
    sorted_keys.sort();

    for key in sorted_keys {
        if let Some(folder) = resolve_one(key, &sorted_folders, &alias_map) {
            resolution.mapping.insert(key.clone(), folder);
        } else {
            resolution.warnings.push(format!(
                "Region key '{}' matches no accounts folder - dropping from aggregation",
                key
            ));
            resolution.dropped.push(key.clone());
        }
    }

    resolution
}

fn resolve_one(key: &str, folders: &[&String], aliases: &HashMap<&str, &str>) -> Option<String> {
    // 1. Exact match
    if folders.iter().any(|f| f.as_str() == key) {
        return Some(key.to_string());
    }

    // 2. Alias table
    if let Some(&target) = aliases.get(key) {
        if folders.iter().any(|f| f.as_str() == target) {
            return Some(target.to_string());
        }
    }

    // 3. Case-insensitive match
    let lowered = key.to_lowercase();
    if let Some(folder) = folders.iter().find(|f| f.to_lowercase() == lowered) {
        return Some(folder.to_string());
    }

    None
}
