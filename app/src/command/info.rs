use placers_config::{BackendKind, Config};
use placers_core::{Collection, SnapshotCache};
use placers_store::SqliteSnapshotCache;
use tracing::{info, warn};

/// Strategy for displaying configuration and local cache status.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("=== placers Configuration ===\n");

        println!("Backend:");
        match config.backend.kind {
            BackendKind::Offline => println!("  Kind: offline"),
            BackendKind::Http => println!("  Kind: http"),
        }
        if let Some(url) = &config.backend.base_url {
            println!("  Base URL: {url}");
        }
        println!(
            "  API Key: {}",
            config.backend.api_key.as_deref().map_or_else(|| "(not set)".to_string(), mask)
        );
        println!("  Poll Interval: {}s", config.backend.poll_interval_secs);
        println!("  Snapshot Timeout: {}s", config.backend.snapshot_timeout_secs);
        println!();

        println!("Dashboard:");
        println!("  Branches: {}", config.dashboard.branches.join(", "));
        println!("  Display Cap: {}", config.dashboard.display_cap);
        let criteria = &config.dashboard.default_criteria;
        println!(
            "  Default Criteria: CGPA >= {}, backlogs <= {}, branch {}",
            criteria.min_cgpa, criteria.max_backlogs, criteria.branch
        );
        println!(
            "  Referral Deadline: {} days",
            config.dashboard.referral_deadline_days
        );
        println!();

        println!("PlacementBot:");
        println!("  Reply Delay: {}ms", config.bot.reply_delay_ms);
        println!("  Extra Entries: {}", config.bot.entries.len());
        println!();

        println!("Resume:");
        println!("  Output Dir: {}", config.resume.output_dir.display());
        println!();

        let path = config.cache.resolve_path()?;
        println!("Local Cache:");
        println!("  Path: {}", path.display());

        info!("Opening local cache");
        match SqliteSnapshotCache::open(&path).await {
            Ok(cache) => {
                for collection in Collection::ALL {
                    match cache.load(collection.as_str()).await {
                        Ok(Some(value)) => {
                            let count = value.as_array().map_or(0, Vec::len);
                            println!("  {collection}: {count} cached");
                        }
                        Ok(None) => println!("  {collection}: (empty)"),
                        Err(e) => warn!("Failed to read cached {}: {}", collection, e),
                    }
                }
            }
            Err(e) => {
                println!("  Status: unavailable");
                println!("  Error: {e}");
            }
        }

        Ok(())
    }
}

fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::mask;

    #[test]
    fn masks_keys() {
        assert_eq!(mask("abcd1234efgh"), "abcd...efgh");
        assert_eq!(mask("short"), "***");
    }
}
