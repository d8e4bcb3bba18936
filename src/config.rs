//! Configuration module - Environment-based configuration
//!
//! Every value has a development default so the client works against a
//! backend started locally with no environment at all.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::guard::{Navigator, View};
use crate::pagination::PAGE_SIZE_CHOICES;
use crate::session::Session;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_PER_PAGE: u32 = 10;
pub const DEFAULT_DASHBOARD_SQUADS: [&str; 2] = ["Auditoria", "Recodificação"];

/// Client configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the REST backend, including the `/api` prefix
    pub api_url: String,
    /// File holding the persisted token and user profile
    pub session_file: PathBuf,
    pub timeout: Duration,
    /// Initial page size of every list view
    pub per_page: u32,
    /// Squad names rendered as dashboard sections, matched by exact name
    pub dashboard_squads: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_file: default_session_file(),
            timeout: Duration::from_secs(30),
            per_page: DEFAULT_PER_PAGE,
            dashboard_squads: DEFAULT_DASHBOARD_SQUADS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_url = env::var("OP_MONITOR_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);

        let session_file = env::var("OP_MONITOR_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.session_file);

        let timeout = env::var("OP_MONITOR_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let per_page = env::var("OP_MONITOR_PER_PAGE")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|n: &u32| PAGE_SIZE_CHOICES.contains(n))
            .unwrap_or(defaults.per_page);

        let dashboard_squads = env::var("OP_MONITOR_DASHBOARD_SQUADS")
            .map(|v| parse_squad_list(&v))
            .unwrap_or(defaults.dashboard_squads);

        Self {
            api_url,
            session_file,
            timeout,
            per_page,
            dashboard_squads,
        }
    }
}

/// Shared client state: configuration, HTTP client, session and navigator
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http_client: reqwest::Client,
    pub session: Arc<Session>,
    pub navigator: Arc<Navigator>,
}

impl AppState {
    /// Starts on the dashboard when the hydrated session is already
    /// authenticated, on the login view otherwise.
    pub fn new(config: Config, session: Arc<Session>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client")?;

        let navigator = Navigator::new(View::Login);
        navigator.navigate(View::Dashboard, &session);

        Ok(Self {
            config: Arc::new(config),
            http_client,
            session,
            navigator: Arc::new(navigator),
        })
    }
}

fn default_session_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".op-monitor")
        .join("session.json")
}

fn parse_squad_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
