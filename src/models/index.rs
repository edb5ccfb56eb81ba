//! Global snapshot index structures.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Global snapshot index written by the collector (`index.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Index {
    /// Unix timestamp of the last collector run
    #[serde(default)]
    pub last_update: i64,

    /// Total accounts tracked across all regions
    #[serde(default)]
    pub total_accounts: u64,

    /// Per-region summaries keyed by region key.
    ///
    /// Keys may not match on-disk folder names verbatim; the resolver
    /// reconciles them before anything downstream looks at accounts.
    #[serde(default)]
    pub regions: HashMap<String, RegionInfo>,
}

/// Per-region summary inside the index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionInfo {
    /// Accounts the collector counted for this region
    #[serde(default)]
    pub total_accounts: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index() {
        let json = r#"{
            "last_update": 1735689600,
            "total_accounts": 12345,
            "regions": {
                "asia_pacific": {"total_accounts": 6000},
                "europe": {"total_accounts": 6345}
            }
        }"#;

        let index: Index = serde_json::from_str(json).unwrap();
        assert_eq!(index.last_update, 1735689600);
        assert_eq!(index.total_accounts, 12345);
        assert_eq!(index.regions.len(), 2);
        assert_eq!(index.regions["asia_pacific"].total_accounts, 6000);
    }

    #[test]
    fn test_missing_fields_default() {
        let index: Index = serde_json::from_str("{}").unwrap();
        assert_eq!(index.last_update, 0);
        assert_eq!(index.total_accounts, 0);
        assert!(index.regions.is_empty());
    }
}
