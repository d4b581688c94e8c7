//! Discord webhook notifier.
//!
//! Sends the end-of-run summary as a single embed. Delivery problems are the
//! caller's to log; they never affect the outcome of a run.

use crate::models::tally::RunTally;
use crate::Result;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

const EMBED_TITLE: &str = "Asset Assistant";
const EMBED_COLOR: u32 = 0x9E9E9E;
const THUMBNAIL_URL: &str = "https://raw.githubusercontent.com/mikenobbs/AssetAssistant/main/logo/logomark.png";

/// Summary of one run, handed to the notifier.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub tally: RunTally,
    pub backup_enabled: bool,
    /// Total run time in seconds.
    pub runtime_secs: f64,
    pub version: String,
}

/// Webhook request body.
#[derive(Debug, Serialize)]
pub struct WebhookPayload {
    pub embeds: Vec<Embed>,
}

/// Discord embed.
#[derive(Debug, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub thumbnail: EmbedImage,
    pub footer: EmbedFooter,
    pub color: u32,
}

/// Embed image reference.
#[derive(Debug, Serialize)]
pub struct EmbedImage {
    pub url: String,
}

/// Embed footer.
#[derive(Debug, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// Error body Discord returns for a rejected webhook call.
#[derive(Debug, Deserialize)]
struct DiscordErrorBody {
    message: String,
    #[serde(default)]
    code: Option<u64>,
}

/// Describe a failed webhook call, using Discord's error message when the body carries one.
fn describe_failure(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<DiscordErrorBody>(body) {
        Ok(DiscordErrorBody { message, code: Some(code) }) => {
            format!("Discord webhook returned {}: {} (code {})", status, message, code)
        }
        Ok(DiscordErrorBody { message, code: None }) => {
            format!("Discord webhook returned {}: {}", status, message)
        }
        Err(_) => format!("Discord webhook returned {}", status),
    }
}

/// Markdown body of the notification.
pub fn generate_summary(summary: &RunSummary) -> String {
    let tally = &summary.tally;
    let mut text = format!("**Movie Assets:**\n {}\n", tally.movie);
    text += &format!("**Show Assets:**\n {}\n", tally.show);
    text += &format!("**Season Assets:**\n {}\n", tally.season);
    text += &format!("**Episode Assets:**\n {}\n", tally.episode);
    text += &format!("**Collection Assets:**\n {}\n", tally.collection);
    text += &format!("**Failures:**\n {}\n", tally.failed);
    text += &format!(
        "**Backup Enabled?**\n {}\n",
        if summary.backup_enabled { "Yes" } else { "No" }
    );
    text += &format!("**Total Run Time:**\n {:.2} seconds\n", summary.runtime_secs);
    text
}

/// Build the webhook payload for a summary.
pub fn build_payload(summary: &RunSummary, now: DateTime<Local>) -> WebhookPayload {
    WebhookPayload {
        embeds: vec![Embed {
            title: EMBED_TITLE.to_string(),
            description: generate_summary(summary),
            thumbnail: EmbedImage {
                url: THUMBNAIL_URL.to_string(),
            },
            footer: EmbedFooter {
                text: format!(
                    "Asset Assistant [v{}] | {}",
                    summary.version,
                    now.format("%d/%m/%Y %H:%M")
                ),
            },
            color: EMBED_COLOR,
        }],
    }
}

/// Discord notifier configuration.
#[derive(Debug, Clone)]
pub struct DiscordConfig {
    pub webhook_url: String,
    pub timeout_secs: u64,
}

impl DiscordConfig {
    /// Configuration for a webhook URL.
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            timeout_secs: 30,
        }
    }
}

/// Discord webhook client.
pub struct DiscordNotifier {
    config: DiscordConfig,
    client: reqwest::Client,
}

impl DiscordNotifier {
    /// Create a notifier.
    pub fn with_config(config: DiscordConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Post the summary to the webhook.
    pub async fn send(&self, summary: &RunSummary) -> Result<()> {
        let payload = build_payload(summary, Local::now());
        let resp = self
            .client
            .post(&self.config.webhook_url)
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(crate::Error::other(describe_failure(status, &body)));
        }

        tracing::info!("Discord notification sent");
        Ok(())
    }
}
