//! Application configuration. Backend URL, timeouts, camera frame source.

use serde::Deserialize;

/// Default HTTP timeout in seconds. The original web client had none, which
/// left the submit control stuck on a hanging backend.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Backend base URL. Read from REGDESK_API_BASE_URL.
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Per-request timeout in seconds. Read from REGDESK_HTTP_TIMEOUT_SECS.
    #[serde(default)]
    pub http_timeout_secs: Option<u64>,

    /// Directory with per-facing camera frames (front.jpg / rear.jpg) for
    /// the file-backed camera. Read from REGDESK_FRAMES_DIR. When unset the
    /// mock camera is wired instead.
    #[serde(default)]
    pub frames_dir: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("REGDESK"));
        if let Ok(path) = std::env::var("REGDESK_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the backend base URL. Defaults to a local development server.
    pub fn api_base_url_or_default(&self) -> String {
        self.api_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    /// Returns the request timeout in seconds. Defaults to 30 if unset.
    pub fn http_timeout_secs_or_default(&self) -> u64 {
        self.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS)
    }
}
