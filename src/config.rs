use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_DIRECTORY_API_URL: &str = "http://localhost:3000";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    /// Local proxy that serves `/api/directory-structure`.
    pub directory_api_url: String,
    pub api_token: Option<String>,
    pub health_interval: Duration,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            directory_api_url: DEFAULT_DIRECTORY_API_URL.to_string(),
            api_token: None,
            health_interval: Duration::from_secs(15),
            request_timeout: Duration::from_secs(600),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let d = Self::default();
        let non_empty = |k: &str| get(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            api_base_url: non_empty("API_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(d.api_base_url),
            directory_api_url: non_empty("DIRECTORY_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(d.directory_api_url),
            api_token: non_empty("ANALYZER_API_TOKEN"),
            health_interval: secs_or(non_empty("HEALTH_POLL_SECS"), "HEALTH_POLL_SECS", d.health_interval),
            request_timeout: secs_or(
                non_empty("ANALYZER_TIMEOUT_SECS"),
                "ANALYZER_TIMEOUT_SECS",
                d.request_timeout,
            ),
        }
    }
}

fn secs_or(raw: Option<String>, key: &str, fallback: Duration) -> Duration {
    let Some(raw) = raw else {
        return fallback;
    };
    match raw.parse::<u64>() {
        Ok(n) if n > 0 => Duration::from_secs(n),
        _ => {
            tracing::warn!(%key, value = %raw, "ignoring invalid duration, using default");
            fallback
        }
    }
}
