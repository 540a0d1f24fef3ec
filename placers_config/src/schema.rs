use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

// Shared with the crates that consume these sections
use placers_bot::QaEntry;
use placers_core::EligibilityCriteria;
use placers_core::eligibility::DEFAULT_DISPLAY_CAP;

const APP_DIR: &str = "placers";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub resume: ResumeConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// No remote; everything is served from and written to the local cache.
    #[default]
    Offline,
    Http,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BackendConfig {
    #[serde(default)]
    pub kind: BackendKind,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "BackendConfig::default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "BackendConfig::default_snapshot_timeout_secs")]
    pub snapshot_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            base_url: None,
            api_key: None,
            poll_interval_secs: Self::default_poll_interval_secs(),
            snapshot_timeout_secs: Self::default_snapshot_timeout_secs(),
        }
    }
}

impl BackendConfig {
    const fn default_poll_interval_secs() -> u64 {
        5
    }

    const fn default_snapshot_timeout_secs() -> u64 {
        5
    }

    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    #[must_use]
    pub const fn snapshot_timeout(&self) -> Duration {
        Duration::from_secs(self.snapshot_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CacheConfig {
    /// SQLite file; `~/placers/cache.db` when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl CacheConfig {
    pub fn resolve_path(&self) -> anyhow::Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Ok(Config::config_dir()?.join("cache.db")),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DashboardConfig {
    #[serde(default = "DashboardConfig::default_branches")]
    pub branches: Vec<String>,
    #[serde(default = "DashboardConfig::default_display_cap")]
    pub display_cap: usize,
    #[serde(default)]
    pub default_criteria: EligibilityCriteria,
    #[serde(default = "DashboardConfig::default_referral_deadline_days")]
    pub referral_deadline_days: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            branches: Self::default_branches(),
            display_cap: Self::default_display_cap(),
            default_criteria: EligibilityCriteria::default(),
            referral_deadline_days: Self::default_referral_deadline_days(),
        }
    }
}

impl DashboardConfig {
    fn default_branches() -> Vec<String> {
        vec!["CSE".to_string(), "MCA".to_string(), "IT".to_string()]
    }

    const fn default_display_cap() -> usize {
        DEFAULT_DISPLAY_CAP
    }

    const fn default_referral_deadline_days() -> u64 {
        30
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BotConfig {
    #[serde(default = "BotConfig::default_reply_delay_ms")]
    pub reply_delay_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    #[serde(default)]
    pub entries: Vec<QaEntry>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: Self::default_reply_delay_ms(),
            fallback: None,
            entries: Vec::new(),
        }
    }
}

impl BotConfig {
    const fn default_reply_delay_ms() -> u64 {
        600
    }

    #[must_use]
    pub const fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ResumeConfig {
    #[serde(default = "ResumeConfig::default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "ResumeConfig::default_footer")]
    pub footer: String,
}

impl Default for ResumeConfig {
    fn default() -> Self {
        Self {
            output_dir: Self::default_output_dir(),
            footer: Self::default_footer(),
        }
    }
}

impl ResumeConfig {
    fn default_output_dir() -> PathBuf {
        PathBuf::from(".")
    }

    fn default_footer() -> String {
        "Generated by PlacementPro - Intelligent Campus Recruitment Ecosystem".to_string()
    }
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(APP_DIR))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'placers init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, CONFIG_TEMPLATE)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Keep backend.kind = \"offline\" to work from the local cache only,");
        println!("      or set it to \"http\" and fill in backend.base_url");
        println!("   2. Run 'placers import drives drives.json' to load data");
        println!("   3. Run 'placers stats' to see the dashboard summary");
        println!();
        println!("🔧 Configuration options:");
        println!("   - dashboard.display_cap: Eligible students shown in the table");
        println!("   - dashboard.referral_deadline_days: Days until a referral closes");
        println!("   - bot.reply_delay_ms: Delay before PlacementBot answers");
        println!();
        Ok(())
    }
}

const CONFIG_TEMPLATE: &str = r#"{
  "backend": {
    "kind": "offline",
    "base_url": "http://localhost:8080/api",
    "poll_interval_secs": 5,
    "snapshot_timeout_secs": 5
  },
  "cache": {},
  "dashboard": {
    "branches": ["CSE", "MCA", "IT"],
    "display_cap": 10,
    "default_criteria": {
      "minCgpa": 6.0,
      "maxBacklogs": 0,
      "branch": "All"
    },
    "referral_deadline_days": 30
  },
  "bot": {
    "reply_delay_ms": 600,
    "entries": []
  },
  "resume": {
    "output_dir": ".",
    "footer": "Generated by PlacementPro - Intelligent Campus Recruitment Ecosystem"
  }
}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use placers_core::BranchFilter;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn template_parses_with_defaults() {
        let config: Config = serde_json::from_str(CONFIG_TEMPLATE).expect("template parses");
        assert_eq!(config.backend.kind, BackendKind::Offline);
        assert_eq!(config.dashboard.display_cap, 10);
        assert_eq!(config.dashboard.default_criteria.branch, BranchFilter::All);
        assert_eq!(config.bot.reply_delay(), Duration::from_millis(600));
        assert!(config.cache.path.is_none());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn partial_file_fills_defaults() {
        let config: Config = serde_json::from_str(
            r#"{"backend": {"kind": "http", "base_url": "https://db.example.edu"},
                "bot": {"entries": [{"keywords": ["stipend"], "answer": "Varies."}]}}"#,
        )
        .expect("partial config parses");
        assert_eq!(config.backend.kind, BackendKind::Http);
        assert_eq!(config.backend.snapshot_timeout(), Duration::from_secs(5));
        assert_eq!(config.dashboard.branches, vec!["CSE", "MCA", "IT"]);
        assert_eq!(config.dashboard.referral_deadline_days, 30);
        assert_eq!(config.bot.entries.len(), 1);
        assert_eq!(config.resume.output_dir, PathBuf::from("."));

        let empty: Config = serde_json::from_str("{}").expect("empty config parses");
        assert_eq!(empty.bot.reply_delay_ms, 600);
    }
}
