//! Preflight checks module.
//!
//! Run once, before staging is touched.

mod directories;
mod discord;

pub use directories::validate_distinct_paths;

use crate::models::config::Config;
use colored::Colorize;

/// Result of a preflight check.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub success: bool,
    /// Passed, but with something worth pointing out.
    pub warning: bool,
    pub message: String,
    pub hint: Option<String>,
}

impl CheckResult {
    pub fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            success: true,
            warning: false,
            message: message.to_string(),
            hint: None,
        }
    }

    pub fn warn(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            success: true,
            warning: true,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    pub fn fail(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            success: false,
            warning: false,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }
}

/// Run all preflight checks.
pub fn run_preflight_checks(config: &Config) -> Vec<CheckResult> {
    let mut results = Vec::new();

    // Staging and library roots
    results.push(directories::check_directory("Process directory", &config.process));
    results.push(directories::check_directory("Movies library", &config.movies));
    results.push(directories::check_directory("Shows library", &config.shows));
    results.push(directories::check_directory("Collections library", &config.collections));

    // Path invariants
    results.push(directories::check_distinct(config));
    results.push(directories::check_failed_dir(config));

    // Notifications
    if config.discord_enabled {
        results.push(discord::check(config.discord_webhook.as_deref()));
    }

    results
}

/// Print preflight check results.
pub fn print_results(results: &[CheckResult]) {
    for result in results {
        if !result.success {
            println!(
                "{} {}: {}",
                "[FAIL]".red(),
                result.name.bold(),
                result.message
            );
        } else if result.warning {
            println!(
                "{} {}: {}",
                "[WARN]".yellow(),
                result.name.bold(),
                result.message
            );
        } else {
            println!(
                "{} {}: {}",
                "[OK]".green(),
                result.name.bold(),
                result.message
            );
        }
        if let Some(ref hint) = result.hint {
            println!("  {} {}", "->".yellow(), hint);
        }
    }
}

/// Check if all preflight checks passed.
pub fn all_passed(results: &[CheckResult]) -> bool {
    results.iter().all(|r| r.success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings_still_pass() {
        let results = vec![
            CheckResult::ok("a", "fine"),
            CheckResult::warn("b", "odd", "look at it"),
        ];
        assert!(all_passed(&results));

        let results = vec![CheckResult::fail("c", "broken", "fix it")];
        assert!(!all_passed(&results));
    }
}
