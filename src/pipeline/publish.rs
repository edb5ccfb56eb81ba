// src/pipeline/publish.rs

//! Output publishing: README overwrite and webhook delivery.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::config::NotifyConfig;
use crate::error::Result;

use super::embed::WebhookPayload;

/// Outcome of the notification step. Delivery problems are reported here,
/// never as an `Err` - a failed notification must not sink the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyStatus {
    /// No webhook configured
    Skipped,
    /// Endpoint accepted the payload (204)
    Sent,
    /// Transport error or non-success status, already logged
    Failed,
}

/// Overwrite the report document atomically (temp file + rename), so a
/// crash mid-write never leaves a truncated README behind.
pub fn write_document(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp = path.with_extension("tmp");
    let mut file = fs::File::create(&tmp)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    drop(file);

    fs::rename(&tmp, path)?;
    Ok(())
}

/// Trim the field list when the summed field text exceeds the budget.
///
/// Discord rejects embeds past 6000 characters; keeping the first few
/// fields preserves the global totals at the cost of per-region detail.
pub fn trim_oversized_fields(payload: &mut WebhookPayload, max_chars: usize, keep: usize) -> bool {
    let Some(embed) = payload.embeds.first_mut() else {
        return false;
    };

    let total_chars: usize = embed.fields.iter().map(|f| f.value.chars().count()).sum();
    if total_chars <= max_chars {
        return false;
    }

    embed.fields.truncate(keep);
    true
}

/// Deliver the notification payload, if an endpoint is configured.
pub fn send_webhook(notify: &NotifyConfig, mut payload: WebhookPayload) -> NotifyStatus {
    let Some(url) = notify.webhook_url.as_deref() else {
        log::info!("No webhook configured - skipping notification");
        return NotifyStatus::Skipped;
    };

    if trim_oversized_fields(
        &mut payload,
        notify.max_embed_chars,
        notify.trimmed_field_count,
    ) {
        log::warn!(
            "Embed too large - trimming to first {} fields",
            notify.trimmed_field_count
        );
    }

    let client = match reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(notify.timeout_secs))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            log::error!("Webhook client setup failed: {}", e);
            return NotifyStatus::Failed;
        }
    };

    let response = match client.post(url).json(&payload).send() {
        Ok(response) => response,
        Err(e) => {
            log::error!("Webhook notification failed: {}", e);
            return NotifyStatus::Failed;
        }
    };

    let status = response.status();
    if status.as_u16() != 204 {
        let body = response.text().unwrap_or_default();
        log::error!("Webhook API error: {} - {}", status, body);
        return NotifyStatus::Failed;
    }

    NotifyStatus::Sent
}
