//! Static server metadata structures.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Server metadata file (`servers/servers.json`), keyed by platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerDirectory {
    /// Overseas servers, keyed by region display name (e.g. "Asia Pacific")
    #[serde(default)]
    pub os: BTreeMap<String, ServerInfo>,

    /// Chinese servers
    #[serde(default)]
    pub cn: BTreeMap<String, ServerInfo>,
}

impl ServerDirectory {
    /// Overseas region display names sorted case-insensitively.
    ///
    /// Both renderers iterate regions in this order so the report and the
    /// notification stay in sync.
    pub fn sorted_os_regions(&self) -> Vec<&String> {
        let mut names: Vec<&String> = self.os.keys().collect();
        names.sort_by_key(|n| n.to_lowercase());
        names
    }
}

/// Descriptive record for one server region. Read-only, supplied externally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerInfo {
    #[serde(default, rename = "City")]
    pub city: Option<String>,

    #[serde(default, rename = "Country")]
    pub country: Option<String>,

    #[serde(default, rename = "IP Address")]
    pub ip_address: Option<String>,

    #[serde(default, rename = "Hostname")]
    pub hostname: Option<String>,

    #[serde(default, rename = "ISP")]
    pub isp: Option<String>,

    #[serde(default, rename = "ASN")]
    pub asn: Option<String>,
}

/// Derive the region key for a display name ("Asia Pacific" -> "asia_pacific").
pub fn region_key(display: &str) -> String {
    display.to_lowercase().replace(' ', "_")
}

/// Human-readable form of a region key ("asia_pacific" -> "Asia Pacific").
pub fn display_name(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
