use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_LOG_FILE: &str = "./contacts-debug.log";
pub const API_URL_ENV: &str = "CONTACTS_API_URL";
pub const CONFIG_PATH_ENV: &str = "CONTACTS_CONFIG";
pub const PROJECT_CONFIG_DIR: &str = ".contacts";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub theme: String,
    pub log_level: String,
    pub log_file: PathBuf,
    pub no_tui: bool,
    pub http: HttpConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            theme: "dark".to_string(),
            log_level: "info".to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            no_tui: false,
            http: HttpConfig::default(),
        }
    }
}

/// Transport settings. Unset timeouts leave the network stack defaults alone.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct HttpConfig {
    pub connect_timeout_ms: Option<u64>,
    pub request_timeout_ms: Option<u64>,
}

impl HttpConfig {
    /// Fill unset values from `fallback`.
    fn or(self, fallback: HttpConfig) -> HttpConfig {
        HttpConfig {
            connect_timeout_ms: self.connect_timeout_ms.or(fallback.connect_timeout_ms),
            request_timeout_ms: self.request_timeout_ms.or(fallback.request_timeout_ms),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub theme: Option<String>,
    pub log_file: Option<PathBuf>,
    pub http: Option<HttpConfig>,
}

/// Command-line overrides; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub api_url: Option<String>,
    pub theme: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub no_tui: bool,
}

impl AppConfig {
    /// Resolve from the environment and config files. The report says which
    /// files were used or skipped; nothing is logged here.
    pub fn from_cli(cli: CliOverrides) -> Result<(Self, ConfigReport)> {
        let project_root = std::env::current_dir().context("resolve current dir")?;
        let mut report = ConfigReport::default();
        let project_cfg = load_project_config(&project_root, &mut report);
        let file_cfg = load_file_config(&mut report);
        let env_url = std::env::var(API_URL_ENV).ok().filter(|s| !s.trim().is_empty());
        Ok((Self::resolve(cli, env_url, project_cfg, file_cfg), report))
    }

    /// Merge sources: CLI, then environment, then project file, then global
    /// file, then defaults.
    pub fn resolve(
        cli: CliOverrides,
        env_url: Option<String>,
        project_cfg: FileConfig,
        file_cfg: FileConfig,
    ) -> Self {
        let defaults = AppConfig::default();

        let api_url = cli
            .api_url
            .or(env_url)
            .or(project_cfg.api_url)
            .or(file_cfg.api_url)
            .unwrap_or(defaults.api_url);

        let theme = cli
            .theme
            .or(project_cfg.theme)
            .or(file_cfg.theme)
            .unwrap_or(defaults.theme);

        let log_file = cli
            .log_file
            .or(project_cfg.log_file)
            .or(file_cfg.log_file)
            .unwrap_or(defaults.log_file);

        let http = project_cfg
            .http
            .unwrap_or_default()
            .or(file_cfg.http.unwrap_or_default());

        Self {
            api_url,
            theme,
            log_level: cli.log_level.unwrap_or(defaults.log_level),
            log_file,
            no_tui: cli.no_tui,
            http,
        }
    }
}

/// What happened to each config file found on disk. Collected while the
/// config is resolved and logged once a subscriber is installed.
#[derive(Debug, Default)]
pub struct ConfigReport {
    pub loaded: Vec<PathBuf>,
    pub skipped: Vec<(PathBuf, String)>,
}

impl ConfigReport {
    pub fn log(&self) {
        for path in &self.loaded {
            info!(path=%path.display(), "loaded config file");
        }
        for (path, error) in &self.skipped {
            warn!(path=%path.display(), %error, "parse config failed");
        }
    }

    fn take(&mut self, path: &Path, parsed: Result<FileConfig>) -> Option<FileConfig> {
        match parsed {
            Ok(cfg) => {
                self.loaded.push(path.to_path_buf());
                Some(cfg)
            }
            Err(e) => {
                self.skipped.push((path.to_path_buf(), format!("{e:#}")));
                None
            }
        }
    }
}

fn parse_config_file(path: &Path) -> Result<FileConfig> {
    let s = fs::read_to_string(path)
        .with_context(|| format!("read config file: {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse config file: {}", path.display()))
}

pub fn global_config_candidates() -> Vec<PathBuf> {
    let mut v = Vec::new();
    if let Ok(p) = std::env::var(CONFIG_PATH_ENV) {
        v.push(PathBuf::from(p));
    }
    if let Some(dir) = dirs::config_dir() {
        v.push(dir.join("contact-list").join("config.toml"));
    }
    v
}

/// First usable global config file, or defaults.
pub fn load_file_config(report: &mut ConfigReport) -> FileConfig {
    for p in global_config_candidates() {
        if !p.exists() {
            continue;
        }
        if let Some(cfg) = report.take(&p, parse_config_file(&p)) {
            return cfg;
        }
    }
    FileConfig::default()
}

/// Load project-specific configuration from .contacts/config.toml
pub fn load_project_config(project_root: &Path, report: &mut ConfigReport) -> FileConfig {
    let path = project_root.join(PROJECT_CONFIG_DIR).join("config.toml");
    if !path.exists() {
        return FileConfig::default();
    }
    report.take(&path, parse_config_file(&path)).unwrap_or_default()
}
