// src/pipeline/aggregate.rs

//! Per-region statistics: registration extremes and crew rankings.

use std::collections::HashMap;

use chrono::{NaiveDateTime, Utc};

use crate::models::Account;

/// Placeholder registration prefix the game reports for accounts whose
/// creation date was never recorded ("Jan 1, 1, 12:00:00 AM").
const SENTINEL_PREFIX: &str = "Jan 1, 1,";

/// Canonical label for crewless accounts.
pub const NO_CREW: &str = "No Crew";

/// Primary registration format, 12-hour clock.
const FORMAT_12H: &str = "%b %d, %Y, %I:%M:%S %p";

/// Secondary registration format, 24-hour clock.
const FORMAT_24H: &str = "%b %d, %Y, %H:%M:%S";

/// Aggregated statistics for one region.
#[derive(Debug, Clone, Default)]
pub struct RegionStats {
    /// Oldest/newest registered accounts; `None` when the region has no
    /// tracked accounts.
    pub extremes: Option<RegionExtremes>,

    /// Full crew ranking, descending by member count.
    pub crews: Vec<CrewCount>,
}

/// Oldest and newest account by registration time. With a single account
/// both point at the same record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionExtremes {
    pub oldest: Account,
    pub newest: Account,
}

/// One entry of a crew ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrewCount {
    pub name: String,
    pub count: usize,
}

/// Parse a registration timestamp.
///
/// Sentinel dates map to `NaiveDateTime::MAX` so they sort last and can be
/// told apart from real registrations. Anything unparseable degrades to the
/// current time with a warning rather than aborting the run.
pub fn parse_registered(raw: &str) -> NaiveDateTime {
    if raw.starts_with(SENTINEL_PREFIX) {
        return NaiveDateTime::MAX;
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, FORMAT_12H) {
        return parsed;
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, FORMAT_24H) {
        return parsed;
    }
    log::warn!("Could not parse date '{}' - using current time", raw);
    Utc::now().naive_utc()
}

/// Re-render a registration string in the canonical zero-padded 12-hour
/// form ("Jan 01, 2020, 01:00:00 PM"), falling back to the raw text when
/// it does not parse. The notification channel displays dates this way;
/// the document keeps the raw strings.
pub fn format_registered(raw: &str) -> String {
    match NaiveDateTime::parse_from_str(raw, FORMAT_12H) {
        Ok(parsed) => parsed.format(FORMAT_12H).to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Find the oldest and newest registered accounts in a region.
///
/// Sentinel-dated accounts are excluded whenever at least one real
/// registration exists. If every account is sentinel-dated, the sentinel
/// set itself is used so a non-empty region always yields a result.
pub fn region_extremes(accounts: &[Account]) -> Option<RegionExtremes> {
    if accounts.is_empty() {
        return None;
    }

    let mut dated: Vec<(NaiveDateTime, &Account)> = accounts
        .iter()
        .map(|a| (parse_registered(&a.registered), a))
        .collect();

    let any_real = dated.iter().any(|(ts, _)| *ts != NaiveDateTime::MAX);
    if any_real {
        dated.retain(|(ts, _)| *ts != NaiveDateTime::MAX);
    }

    // Stable sort keeps encounter order among equal timestamps.
    dated.sort_by_key(|(ts, _)| *ts);

    let oldest = dated.first()?.1.clone();
    let newest = dated.last()?.1.clone();
    Some(RegionExtremes { oldest, newest })
}

/// Canonicalize a crew affiliation for counting.
///
/// Missing, blank, and explicit "no crew" markers all collapse to
/// [`NO_CREW`]; everything else is trimmed.
pub fn normalize_crew(crew: Option<&str>) -> String {
    let trimmed = crew.unwrap_or("").trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NO_CREW) {
        NO_CREW.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Count crew memberships, descending by count.
///
/// Ties keep first-encounter order, so the ranking is stable across runs
/// given the same account order. The counts always sum to the number of
/// accounts.
pub fn crew_ranking(accounts: &[Account]) -> Vec<CrewCount> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for account in accounts {
        let name = normalize_crew(account.crew.as_deref());
        if !counts.contains_key(&name) {
            order.push(name.clone());
        }
        *counts.entry(name).or_insert(0) += 1;
    }

    let mut ranking: Vec<CrewCount> = order
        .into_iter()
        .map(|name| {
            let count = counts[&name];
            CrewCount { name, count }
        })
        .collect();

    // Stable sort: equal counts keep first-encounter order.
    ranking.sort_by(|a, b| b.count.cmp(&a.count));
    ranking
}

/// A top-K prefix of a crew ranking plus how many entries were omitted.
pub fn top_crews(crews: &[CrewCount], k: usize) -> (&[CrewCount], usize) {
    let take = k.min(crews.len());
    (&crews[..take], crews.len() - take)
}

/// Compute stats for every resolved region. Regions with no accounts get
/// no entry rather than fabricated zeros.
pub fn aggregate_regions(
    region_accounts: &HashMap<String, Vec<Account>>,
) -> HashMap<String, RegionStats> {
    let mut stats = HashMap::new();
    for (folder, accounts) in region_accounts {
        if accounts.is_empty() {
            continue;
        }
        stats.insert(
            folder.clone(),
            RegionStats {
                extremes: region_extremes(accounts),
                crews: crew_ranking(accounts),
            },
        );
    }
    stats
}
