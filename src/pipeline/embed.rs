// src/pipeline/embed.rs

//! Webhook embed renderer.
//!
//! Builds the Discord-style notification payload from the same aggregate
//! data the report uses, field-oriented instead of document-oriented.
//! Display names are reduced to printable ASCII for this channel only, and
//! crew names are cut to the embed display budget.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::region_key;
use crate::utils::{clean_ascii, ellipsize, format_thousands};

use super::ReportContext;
use super::aggregate::{RegionStats, format_registered, top_crews};
use super::report::format_last_update;

/// Crew names longer than this get cut to 17 characters plus "...".
const CREW_NAME_BUDGET: usize = 20;

/// Crews shown per region before the "+N more" suffix.
const TOP_CREWS: usize = 3;

const EMBED_TITLE: &str = "Game Manager Report";

const EMBED_DESCRIPTION: &str = "⚠️ This semi-automated tracking system requires the third-party program to collect player data and manual login and map traversal across all server regions is necessary for complete data collection.";

const EMBED_IMAGE_URL: &str = "https://shared.fastly.steamstatic.com/store_item_assets/steam/apps/2064650/4f85fcd20b06b23e471198ed937521c251688172/library_hero.jpg";

const RAW_DATA_LINK: &str =
    "[View Raw Data on GitHub](https://github.com/soevielofficial/tofgm-database)";

/// Top-level webhook payload.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookPayload {
    pub username: String,
    pub embeds: Vec<Embed>,
}

/// One embed of the payload.
#[derive(Debug, Clone, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub timestamp: String,
    pub image: EmbedImage,
    pub footer: EmbedFooter,
    pub fields: Vec<EmbedField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedImage {
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    fn inline(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: true,
        }
    }

    fn block(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: false,
        }
    }
}

/// Build the notification payload.
///
/// `color` and `now` are injected by the caller so the renderer itself is a
/// pure function of its arguments.
pub fn build_webhook_payload(
    ctx: &ReportContext,
    bot_name: &str,
    color: u32,
    now: DateTime<Utc>,
) -> WebhookPayload {
    let mut fields = vec![
        EmbedField::inline(
            "Total Tracked Accounts:",
            format!("```{}```", format_thousands(ctx.index.total_accounts)),
        ),
        EmbedField::inline(
            "Server Regions Tracked:",
            format!("```{}```", ctx.index.regions.len()),
        ),
        EmbedField::block("Server Details:", ""),
    ];

    for display in ctx.servers.sorted_os_regions() {
        let info = &ctx.servers.os[display];
        let folder = region_key(display);
        let total = ctx.totals.get(&folder).copied().unwrap_or(0);
        let stats = ctx.stats.get(&folder);

        let mut lines = vec![
            format!(
                "• **IP**: `{}`",
                info.ip_address.as_deref().unwrap_or("Unknown")
            ),
            format!(
                "• **Location**: `{}, {}`",
                info.city.as_deref().unwrap_or("?"),
                info.country.as_deref().unwrap_or("?")
            ),
            format!("• **ISP**: `{}`", info.isp.as_deref().unwrap_or("Unknown")),
            format!(
                "• **Total Tracked Accounts**: `{}`",
                format_thousands(total)
            ),
        ];

        if let Some(stats) = stats {
            lines.extend(region_lines(stats));
        }

        fields.push(EmbedField::block(display.clone(), lines.join("\n")));
    }

    fields.push(EmbedField::block("\u{200b}", RAW_DATA_LINK));

    WebhookPayload {
        username: bot_name.to_string(),
        embeds: vec![Embed {
            title: EMBED_TITLE.to_string(),
            description: EMBED_DESCRIPTION.to_string(),
            color,
            timestamp: now.to_rfc3339(),
            image: EmbedImage {
                url: EMBED_IMAGE_URL.to_string(),
            },
            footer: EmbedFooter {
                text: format!("Last update: {}", format_last_update(ctx.index.last_update)),
            },
            fields,
        }],
    }
}

/// Extremes and crew lines for one region field.
fn region_lines(stats: &RegionStats) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(extremes) = &stats.extremes {
        lines.push(format!(
            "• **Tracked Earliest Registered Account**: `{} on {}`",
            clean_ascii(&extremes.oldest.name),
            format_registered(&extremes.oldest.registered)
        ));

        // A single tracked account makes both extremes the same record;
        // repeating it adds nothing.
        if extremes.newest.name != extremes.oldest.name {
            lines.push(format!(
                "• **Tracked Latest Registered Account**: `{} on {}`",
                clean_ascii(&extremes.newest.name),
                format_registered(&extremes.newest.registered)
            ));
        }
    }

    if !stats.crews.is_empty() {
        let (top, omitted) = top_crews(&stats.crews, TOP_CREWS);
        let mut summary = top
            .iter()
            .map(|crew| {
                format!(
                    "{} ({})",
                    ellipsize(&clean_ascii(&crew.name), CREW_NAME_BUDGET),
                    crew.count
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        if omitted > 0 {
            summary += &format!(" +{} more", omitted);
        }
        lines.push(format!("• **Top Crews**: `{}`", summary));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::models::{Account, Index, RegionInfo, ServerDirectory};
    use crate::pipeline::aggregate::aggregate_regions;

    fn account(name: &str, crew: Option<&str>, registered: &str) -> Account {
        Account {
            name: name.to_string(),
            crew: crew.map(String::from),
            registered: registered.to_string(),
        }
    }

    fn sample_servers() -> ServerDirectory {
        serde_json::from_str(
            r#"{
                "os": {
                    "Europe": {
                        "City": "Frankfurt",
                        "Country": "Germany",
                        "IP Address": "198.51.100.7",
                        "ISP": "ExampleNet"
                    }
                }
            }"#,
        )
        .unwrap()
    }

    fn sample_index() -> Index {
        let mut index = Index {
            last_update: 1735689600,
            total_accounts: 3,
            ..Default::default()
        };
        index
            .regions
            .insert("europe".to_string(), RegionInfo { total_accounts: 3 });
        index
    }

    fn build(accounts: Vec<Account>) -> WebhookPayload {
        let index = sample_index();
        let servers = sample_servers();
        let mut region_accounts = HashMap::new();
        region_accounts.insert("europe".to_string(), accounts);
        let stats = aggregate_regions(&region_accounts);
        let totals: HashMap<String, u64> = [("europe".to_string(), 3)].into();

        let ctx = ReportContext {
            index: &index,
            servers: &servers,
            totals: &totals,
            stats: &stats,
        };
        build_webhook_payload(&ctx, "Test Bot", 0x336699, Utc::now())
    }

    #[test]
    fn test_payload_structure() {
        let payload = build(vec![
            account("Old", Some("Alpha"), "Jan 1, 2020, 1:00:00 PM"),
            account("New", Some("Alpha"), "Feb 2, 2023, 3:15:00 PM"),
        ]);

        assert_eq!(payload.username, "Test Bot");
        assert_eq!(payload.embeds.len(), 1);

        let embed = &payload.embeds[0];
        assert_eq!(embed.title, "Game Manager Report");
        assert_eq!(embed.color, 0x336699);
        assert!(embed.footer.text.starts_with("Last update: 2025-01-01"));

        // Totals, region count, divider, one region, raw data link
        assert_eq!(embed.fields.len(), 5);
        assert!(embed.fields[0].inline);
        assert_eq!(embed.fields[3].name, "Europe");
        assert!(!embed.fields[3].inline);
        assert!(embed.fields[3].value.contains("`Old on Jan 01, 2020, 01:00:00 PM`"));
        assert!(embed.fields[3].value.contains("`New on Feb 02, 2023, 03:15:00 PM`"));
    }

    #[test]
    fn test_latest_suppressed_for_single_account() {
        let payload = build(vec![account("Solo", None, "Jan 1, 2020, 1:00:00 PM")]);
        let value = &payload.embeds[0].fields[3].value;

        assert!(value.contains("Tracked Earliest Registered Account"));
        assert!(!value.contains("Tracked Latest Registered Account"));
    }

    #[test]
    fn test_dates_rendered_zero_padded() {
        // The embed re-renders registrations in the canonical padded form;
        // an unparseable string passes through raw.
        let payload = build(vec![
            account("Old", None, "Jan 1, 2020, 1:00:00 PM"),
            account("New", None, "sometime in 2023"),
        ]);
        let value = &payload.embeds[0].fields[3].value;

        assert!(value.contains("on Jan 01, 2020, 01:00:00 PM"));
        assert!(value.contains("on sometime in 2023"));
    }

    #[test]
    fn test_names_are_ascii_cleaned() {
        let payload = build(vec![account("Åsa★Nine", None, "Jan 1, 2020, 1:00:00 PM")]);
        let value = &payload.embeds[0].fields[3].value;

        assert!(value.contains("`saNine on"));
        assert!(!value.contains('★'));
    }

    #[test]
    fn test_crew_names_truncated_and_counted() {
        let long_crew = "The Extraordinarily Long Crew Name";
        let payload = build(vec![
            account("A", Some(long_crew), "Jan 1, 2020, 1:00:00 PM"),
            account("B", Some(long_crew), "Jan 2, 2020, 1:00:00 PM"),
            account("C", Some("Shorts"), "Jan 3, 2020, 1:00:00 PM"),
        ]);
        let value = &payload.embeds[0].fields[3].value;

        assert!(value.contains("The Extraordinari... (2)"));
        assert!(value.contains("Shorts (1)"));
    }

    #[test]
    fn test_crew_overflow_marker() {
        let payload = build(vec![
            account("A", Some("C1"), "Jan 1, 2020, 1:00:00 PM"),
            account("B", Some("C2"), "Jan 1, 2020, 1:00:00 PM"),
            account("C", Some("C3"), "Jan 1, 2020, 1:00:00 PM"),
            account("D", Some("C4"), "Jan 1, 2020, 1:00:00 PM"),
            account("E", Some("C5"), "Jan 1, 2020, 1:00:00 PM"),
        ]);
        let value = &payload.embeds[0].fields[3].value;

        assert!(value.contains("+2 more"));
    }

    #[test]
    fn test_payload_serializes_to_json() {
        let payload = build(vec![account("Solo", None, "Jan 1, 2020, 1:00:00 PM")]);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["username"], "Test Bot");
        assert!(json["embeds"][0]["fields"].is_array());
        assert_eq!(json["embeds"][0]["image"]["url"], EMBED_IMAGE_URL);
    }
}
