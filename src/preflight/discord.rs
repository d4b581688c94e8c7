//! Discord webhook preflight check.

use super::CheckResult;

/// Check that the webhook looks usable. Never fatal.
pub fn check(webhook: Option<&str>) -> CheckResult {
    match webhook {
        Some(url) if url.starts_with("https://") || url.starts_with("http://") => {
            CheckResult::ok("Discord webhook", "configured")
        }
        Some(_) => CheckResult::warn(
            "Discord webhook",
            "not an http(s) URL",
            "Notifications will likely fail; check 'discord_webhook'",
        ),
        None => CheckResult::warn(
            "Discord webhook",
            "notifications enabled but no webhook set",
            "Set 'discord_webhook' or disable notifications",
        ),
    }
}
