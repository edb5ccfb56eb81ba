// src/pipeline/report.rs

//! Markdown report renderer.
//!
//! Renders the database README: a header with snapshot totals, fixed
//! descriptive prose, then one section per overseas server region. Output
//! is byte-identical for identical inputs.

use chrono::DateTime;

use crate::models::{ServerInfo, display_name, region_key};
use crate::utils::format_thousands;

use super::ReportContext;
use super::aggregate::RegionStats;

/// Format a snapshot Unix timestamp for display.
pub fn format_last_update(last_update: i64) -> String {
    DateTime::from_timestamp(last_update, 0)
        .unwrap_or_default()
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

fn field<'a>(value: &'a Option<String>) -> &'a str {
    value.as_deref().unwrap_or("unknown")
}

/// Render the full README document.
pub fn render_readme(ctx: &ReportContext) -> String {
    format!(
        "<h1 align='center'>Tower of Fantasy | Game Manager Database</h1>\n\n\
         **Last Updated**: `{last_update}`  \n\
         **Total Accounts Tracked**: `{total}`  \n\n\
         {about}\
         {collection}\
         ## Current Statistics\n\n\
         {stats}\n\n\
         *Auto-updated hourly* | [View Raw Data](https://github.com/soevielofficial/tofgm-database)",
        last_update = format_last_update(ctx.index.last_update),
        total = format_thousands(ctx.index.total_accounts),
        about = about_section(),
        collection = collection_section(),
        stats = region_sections(ctx),
    )
}

/// Fixed prose: what the database is.
fn about_section() -> &'static str {
    "## About This Database\n\n\
     > **Important Notice**: This semi-automated tracking system requires the third-party program to collect player data and manual login and map traversal across all server regions is necessary for complete data collection.\n\n\
     ### Data Structure\n\
     - **Player names** and role identifiers  \n\
     - **Server region** classifications  \n\
     - **Crew** affiliations  \n\
     - **Account creation** timestamps  \n\
     - **Last-seen** activity dates  \n\n"
}

/// Fixed prose: how the data gets collected.
fn collection_section() -> &'static str {
    "## Data Collection System\n\n\
     > **Data Collection Warning**:  \n\
     - Requires running third-party program  \n\
     - Involves logging into each server region  \n\
     - Needs manual map traversal for full coverage  \n\n\
     ### Technical Implementation\n\
     - `Memory scanner` (third-party program)  \n\
     - `Multi-threaded C++` data processor  \n\
     - `JSON output` generator  \n\n\
     ### Collection Workflow\n\
     1. **Manual Setup**:  \n\
     \x20  - Log into target server region  \n\
     \x20  - Launch third-party program  \n\
     \x20  - Start map traversal  \n\
     \x20  - Ensure all players are loaded in memory  \n\
     2. **Automated Scanning**:  \n\
     \x20  - Process memory reading  \n\
     \x20  - Player structure detection  \n\
     \x20  - Data extraction (UIDs, positions, timestamps)  \n\
     3. **Manual Verification**:  \n\
     \x20  - Walk through key map areas  \n\
     \x20  - Spot-check player concentrations  \n\
     \x20  - Validate scanner accuracy  \n\n\
     ## Key Features\n\
     - **Regional Data Files**: `accounts/[region]/accounts.json`  \n\
     - **Centralized Index**: `index.json` for global stats  \n\
     - **Version Control**: Automated Git synchronization  \n\
     - **Data Safety**: Failed scans preserved for retry  \n\n\
     > **Usage Disclaimer**:  \n\
     This system is not affiliated with Hotta Studio or Tower of Fantasy official services.  \n\
     Data collection depends on third-party programs and manual verification.\n\n"
}

/// One `###` subsection per overseas region, sorted case-insensitively by
/// display name.
fn region_sections(ctx: &ReportContext) -> String {
    let mut sections = Vec::new();

    for display in ctx.servers.sorted_os_regions() {
        let info = &ctx.servers.os[display];
        let folder = region_key(display);
        let total = ctx.totals.get(&folder).copied().unwrap_or(0);
        let stats = ctx.stats.get(&folder);

        // Header comes from the normalized key, not the raw table key,
        // so inconsistently cased table entries still render uniformly.
        sections.push(region_section(&display_name(&folder), info, total, stats));
    }

    sections.join("\n")
}

fn region_section(
    display: &str,
    info: &ServerInfo,
    total: u64,
    stats: Option<&RegionStats>,
) -> String {
    let mut section = format!("### {}\n\n", display);

    section += &format!(
        "- **Location**: `{}, {}`  \n",
        field(&info.city),
        field(&info.country)
    );
    section += &format!(
        "- **Network**: `{}` (`{}`)  \n",
        field(&info.ip_address),
        field(&info.hostname)
    );
    section += &format!(
        "- **Provider**: `{}` (ASN{})  \n\n",
        field(&info.isp),
        field(&info.asn)
    );

    section += &format!("- **Total Accounts**: `{}`  \n", format_thousands(total));

    if let Some(extremes) = stats.and_then(|s| s.extremes.as_ref()) {
        section += &format!(
            "- **Tracked Latest Registered Account**: `{}`  \n",
            extremes.newest.name
        );
        section += &format!("  - Date: `{}`  \n", extremes.newest.registered);
        section += &format!(
            "- **Tracked Earliest Registered Account**: `{}`  \n",
            extremes.oldest.name
        );
        section += &format!("  - Date: `{}`  \n", extremes.oldest.registered);
    }

    section
}
