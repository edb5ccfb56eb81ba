// src/pipeline/run.rs

//! Full pipeline orchestration for one statistics run.

use std::collections::HashMap;

use chrono::Utc;
use rand::Rng;

use crate::config::Config;
use crate::error::Result;
use crate::models::{Account, region_key};

use super::ReportContext;
use super::aggregate::aggregate_regions;
use super::embed::build_webhook_payload;
use super::load::{list_region_folders, load_accounts, load_index, load_servers};
use super::publish::{NotifyStatus, send_webhook, write_document};
use super::report::render_readme;
use super::resolve::resolve_regions;

fn log_warnings(warnings: &[String]) {
    for warning in warnings {
        log::warn!("{}", warning);
    }
}

/// Run the full pipeline: load, resolve, aggregate, render, publish.
///
/// Each step degrades independently; only unexpected failures (e.g. the
/// report target being unwritable) surface as errors.
pub fn run_pipeline(config: &Config) -> Result<()> {
    // 1. Load inputs
    let index = load_index(&config.paths.index);
    log_warnings(&index.warnings);
    let index = index.value;

    let servers = load_servers(&config.paths.servers);
    log_warnings(&servers.warnings);
    let servers = servers.value;

    let folders = list_region_folders(&config.paths.accounts_dir);
    log_warnings(&folders.warnings);
    let folders = folders.value;

    log::info!(
        "Loaded index: {} accounts across {} regions, {} folders on disk",
        index.total_accounts,
        index.regions.len(),
        folders.len()
    );

    // 2. Resolve region keys to folders
    let keys: Vec<String> = index.regions.keys().cloned().collect();
    let resolution = resolve_regions(&keys, &folders, &config.aliases);
    log_warnings(&resolution.warnings);

    // 3. Load accounts per resolved region.
    //
    // Maps are keyed by the canonical region key derived from the folder
    // name, which is exactly what the renderers derive from server display
    // names - a case-variant folder must land under the same key.
    let mut region_accounts: HashMap<String, Vec<Account>> = HashMap::new();
    let mut totals: HashMap<String, u64> = HashMap::new();
    for (key, folder) in &resolution.mapping {
        let accounts = load_accounts(&config.paths.accounts_dir, folder);
        log_warnings(&accounts.warnings);
        let canonical = region_key(folder);
        region_accounts.insert(canonical.clone(), accounts.value);

        if let Some(info) = index.regions.get(key) {
            totals.insert(canonical, info.total_accounts);
        }
    }
    let accounts_seen: usize = region_accounts.values().map(Vec::len).sum();

    // 4. Aggregate
    let stats = aggregate_regions(&region_accounts);

    let ctx = ReportContext {
        index: &index,
        servers: &servers,
        totals: &totals,
        stats: &stats,
    };

    // 5. Render and write the report
    let readme = render_readme(&ctx);
    write_document(&config.paths.readme, &readme)?;
    log::info!("Updated {}", config.paths.readme);

    // 6. Build and deliver the notification
    let color: u32 = rand::thread_rng().gen_range(0..=0xFFFFFF);
    let payload = build_webhook_payload(&ctx, &config.notify.bot_name, color, Utc::now());
    let notify_status = send_webhook(&config.notify, payload);
    if notify_status == NotifyStatus::Sent {
        log::info!("Sent webhook notification");
    }

    log::info!(
        "Run complete: {} regions resolved, {} dropped, {} accounts seen, notification {:?}",
        resolution.mapping.len(),
        resolution.dropped.len(),
        accounts_seen,
        notify_status
    );

    Ok(())
}
