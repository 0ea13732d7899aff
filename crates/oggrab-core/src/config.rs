use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::FetchPolicies;
use crate::retry::{Backoff, RetryPolicy};

/// Desktop browser User-Agent; some wikis refuse the libcurl default.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/129.0.0.0 Safari/537.36";

/// Default note log file, relative to the working directory.
pub const DEFAULT_NOTES_FILE: &str = "output_notes.txt";

/// Request header policy and timeouts (`[http]` in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub connect_timeout_secs: u64,
    /// Upper bound for one whole request, download included.
    pub timeout_secs: u64,
    /// Extra request headers sent with every request.
    pub extra_headers: HashMap<String, String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout_secs: 30,
            timeout_secs: 3600,
            extra_headers: HashMap::new(),
        }
    }
}

/// Backoff shape as written in config.toml.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackoffKind {
    #[default]
    Fixed,
    Exponential,
}

/// Retry policy parameters (`[retry]` in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Attempts for the listing page (1 = no retry).
    pub listing_attempts: u32,
    /// Attempts for each File: subpage.
    pub page_attempts: u32,
    /// Attempts for each audio download.
    pub download_attempts: u32,
    /// Delay in seconds between attempts (base delay when exponential).
    pub delay_secs: f64,
    pub backoff: BackoffKind,
    /// Maximum delay in seconds.
    pub max_delay_secs: u64,
    /// End the run when a File: subpage answers with a non-2xx status.
    /// When false the error page is parsed like any other page.
    pub require_page_success: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            listing_attempts: 1,
            page_attempts: 10,
            download_attempts: 10,
            delay_secs: 1.0,
            backoff: BackoffKind::Fixed,
            max_delay_secs: 30,
            require_page_success: true,
        }
    }
}

impl RetryConfig {
    fn policy(&self, attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts: attempts.max(1),
            delay: Duration::from_secs_f64(self.delay_secs.clamp(0.0, 3600.0)),
            max_delay: Duration::from_secs(self.max_delay_secs),
            backoff: match self.backoff {
                BackoffKind::Fixed => Backoff::Fixed,
                BackoffKind::Exponential => Backoff::Exponential,
            },
        }
    }

    /// Per-call-site policies for the fetcher.
    pub fn fetch_policies(&self) -> FetchPolicies {
        FetchPolicies {
            listing: self.policy(self.listing_attempts),
            page: self.policy(self.page_attempts),
            download: self.policy(self.download_attempts),
            require_page_success: self.require_page_success,
        }
    }
}

/// Transcoder settings (`[transcode]` in config.toml).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscodeConfig {
    /// Explicit ffmpeg binary; looked up on PATH when absent.
    pub ffmpeg_path: Option<PathBuf>,
    /// Constant bitrate in kbit/s; VBR quality 2 when absent.
    pub bitrate_kbps: Option<u32>,
}

/// Global configuration loaded from `~/.config/oggrab/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OggrabConfig {
    /// Append-only note log, relative to the working directory.
    pub notes_file: PathBuf,
    pub http: HttpConfig,
    pub retry: RetryConfig,
    pub transcode: TranscodeConfig,
}

impl Default for OggrabConfig {
    fn default() -> Self {
        Self {
            notes_file: PathBuf::from(DEFAULT_NOTES_FILE),
            http: HttpConfig::default(),
            retry: RetryConfig::default(),
            transcode: TranscodeConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("oggrab")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from the default path, creating a default file if none exists.
pub fn load_or_init() -> Result<OggrabConfig> {
    load_or_init_at(&config_path()?)
}

/// Load configuration from `path`, creating it with defaults if missing.
pub fn load_or_init_at(path: &Path) -> Result<OggrabConfig> {
    if !path.exists() {
        let default_cfg = OggrabConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: OggrabConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
