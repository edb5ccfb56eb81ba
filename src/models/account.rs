//! Account data structures.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One player profile from a per-region `accounts.json`.
///
/// The collector writes more fields than these; everything the aggregator
/// does not need is ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    /// Player display name
    pub name: String,

    /// Crew affiliation, absent for crewless players
    #[serde(default)]
    pub crew: Option<String>,

    /// Registration timestamp as the collector recorded it.
    ///
    /// Text in one of several known formats; parsing lives in the
    /// aggregator, the raw string is kept for display.
    #[serde(default)]
    pub registered: String,
}

/// Per-region account file (`accounts/{region}/accounts.json`).
///
/// A `BTreeMap` keeps account IDs in sorted order so that the encounter
/// order seen by the aggregator is deterministic across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountsFile {
    #[serde(default)]
    pub accounts: BTreeMap<String, Account>,
}

impl AccountsFile {
    /// Flatten into an account list in ID order.
    pub fn into_accounts(self) -> Vec<Account> {
        self.accounts.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accounts_file() {
        let json = r#"{
            "accounts": {
                "1002": {"name": "Beta", "crew": "Night Owls", "registered": "Feb 2, 2023, 3:15:00 PM", "uid": "x"},
                "1001": {"name": "Alpha", "registered": "Jan 1, 2020, 1:00:00 PM"}
            }
        }"#;

        let file: AccountsFile = serde_json::from_str(json).unwrap();
        let accounts = file.into_accounts();

        assert_eq!(accounts.len(), 2);
        // BTreeMap order: "1001" before "1002"
        assert_eq!(accounts[0].name, "Alpha");
        assert_eq!(accounts[0].crew, None);
        assert_eq!(accounts[1].crew.as_deref(), Some("Night Owls"));
    }

    #[test]
    fn test_empty_file_defaults() {
        let file: AccountsFile = serde_json::from_str("{}").unwrap();
        assert!(file.into_accounts().is_empty());
    }
}
