// src/pipeline/load.rs

//! Data loading with best-effort degradation.
//!
//! Every loader returns a [`LoadOutcome`]: the payload plus any non-fatal
//! warnings collected along the way. A missing or corrupt file degrades to
//! a well-defined empty value; it never aborts the run.

use std::fs;
use std::path::Path;

use encoding_rs::WINDOWS_1252;
use serde::de::DeserializeOwned;

use crate::models::{Account, AccountsFile, Index, ServerDirectory};

/// A loaded value plus the non-fatal issues hit while producing it.
#[derive(Debug, Clone)]
pub struct LoadOutcome<T> {
    pub value: T,
    pub warnings: Vec<String>,
}

impl<T> LoadOutcome<T> {
    fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    fn degraded(value: T, warning: String) -> Self {
        Self {
            value,
            warnings: vec![warning],
        }
    }
}

/// Read a text file, falling back from UTF-8 to WINDOWS-1252.
///
/// The collector has produced mixed-encoding files in the past; a lossy
/// secondary decode keeps those loadable. Returns the text and an optional
/// warning describing the fallback.
fn read_text_lossy(path: &Path) -> std::io::Result<(String, Option<String>)> {
    let bytes = fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok((text, None)),
        Err(e) => {
            let (text, _, _) = WINDOWS_1252.decode(e.as_bytes());
            let warning = format!(
                "{} is not valid UTF-8; decoded as WINDOWS-1252",
                path.display()
            );
            Ok((text.into_owned(), Some(warning)))
        }
    }
}

/// Load and parse one JSON file, degrading to `default` on any failure.
fn load_json_or<T: DeserializeOwned>(path: &Path, default: T) -> LoadOutcome<T> {
    let (text, encoding_warning) = match read_text_lossy(path) {
        Ok(pair) => pair,
        Err(e) => {
            return LoadOutcome::degraded(
                default,
                format!("Error loading {}: {}", path.display(), e),
            );
        }
    };

    match serde_json::from_str(&text) {
        Ok(value) => LoadOutcome {
            value,
            warnings: encoding_warning.into_iter().collect(),
        },
        Err(e) => {
            let mut warnings: Vec<String> = encoding_warning.into_iter().collect();
            warnings.push(format!("Error parsing {}: {}", path.display(), e));
            LoadOutcome { value: default, warnings }
        }
    }
}

/// Load the global snapshot index, or an empty one on failure.
pub fn load_index(path: impl AsRef<Path>) -> LoadOutcome<Index> {
    load_json_or(path.as_ref(), Index::default())
}

/// Load the static server metadata table, or an empty one on failure.
pub fn load_servers(path: impl AsRef<Path>) -> LoadOutcome<ServerDirectory> {
    load_json_or(path.as_ref(), ServerDirectory::default())
}

/// Load the account list for one region folder, or an empty list on failure.
///
/// Accounts come back in ID order (see [`AccountsFile`]) so downstream
/// tie-breaks are deterministic.
pub fn load_accounts(accounts_dir: impl AsRef<Path>, folder: &str) -> LoadOutcome<Vec<Account>> {
    let path = accounts_dir.as_ref().join(folder).join("accounts.json");
    let outcome = load_json_or(&path, AccountsFile::default());
    LoadOutcome {
        value: outcome.value.into_accounts(),
        warnings: outcome.warnings,
    }
}

/// List region folder names under the accounts root, sorted.
pub fn list_region_folders(accounts_dir: impl AsRef<Path>) -> LoadOutcome<Vec<String>> {
    let dir = accounts_dir.as_ref();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            return LoadOutcome::degraded(
                Vec::new(),
                format!("Error listing {}: {}", dir.display(), e),
            );
        }
    };

    let mut folders: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    folders.sort();

    LoadOutcome::clean(folders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_index_missing_file() {
        let tmp = TempDir::new().unwrap();
        let outcome = load_index(tmp.path().join("index.json"));

        assert_eq!(outcome.value.total_accounts, 0);
        assert!(outcome.value.regions.is_empty());
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn test_load_index_malformed_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.json");
        fs::write(&path, "{not json").unwrap();

        let outcome = load_index(&path);
        assert_eq!(outcome.value.total_accounts, 0);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("Error parsing"));
    }

    #[test]
    fn test_load_index_valid() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.json");
        fs::write(
            &path,
            r#"{"last_update": 100, "total_accounts": 2, "regions": {"r1": {"total_accounts": 2}}}"#,
        )
        .unwrap();

        let outcome = load_index(&path);
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.value.total_accounts, 2);
        assert!(outcome.value.regions.contains_key("r1"));
    }

    #[test]
    fn test_encoding_fallback() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("servers.json");
        // 0xE9 is 'é' in WINDOWS-1252 but invalid UTF-8
        let mut bytes = br#"{"os": {"Europe": {"City": "Qu"#.to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(br#"bec"}}}"#);
        fs::write(&path, bytes).unwrap();

        let outcome = load_servers(&path);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("WINDOWS-1252"));
        assert_eq!(outcome.value.os["Europe"].city.as_deref(), Some("Québec"));
    }

    #[test]
    fn test_load_accounts_missing_folder() {
        let tmp = TempDir::new().unwrap();
        let outcome = load_accounts(tmp.path(), "nowhere");

        assert!(outcome.value.is_empty());
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn test_load_accounts_id_order() {
        let tmp = TempDir::new().unwrap();
        let region = tmp.path().join("asia_pacific");
        fs::create_dir_all(&region).unwrap();
        fs::write(
            region.join("accounts.json"),
            r#"{"accounts": {
                "b": {"name": "Second", "registered": "Jan 2, 2021, 1:00:00 PM"},
                "a": {"name": "First", "registered": "Jan 1, 2021, 1:00:00 PM"}
            }}"#,
        )
        .unwrap();

        let outcome = load_accounts(tmp.path(), "asia_pacific");
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.value[0].name, "First");
        assert_eq!(outcome.value[1].name, "Second");
    }

    #[test]
    fn test_list_region_folders() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("europe")).unwrap();
        fs::create_dir_all(tmp.path().join("asia_pacific")).unwrap();
        fs::write(tmp.path().join("stray.json"), "{}").unwrap();

        let outcome = list_region_folders(tmp.path());
        assert_eq!(outcome.value, ["asia_pacific", "europe"]);
    }

    #[test]
    fn test_list_region_folders_missing_root() {
        let tmp = TempDir::new().unwrap();
        let outcome = list_region_folders(tmp.path().join("accounts"));
        assert!(outcome.value.is_empty());
        assert_eq!(outcome.warnings.len(), 1);
    }
}
