use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Gemini API key
    pub gemini_api_key: String,

    /// Gemini text generation endpoint
    #[serde(default = "default_gemini_api_url")]
    pub gemini_api_url: String,

    /// Per-attempt timeout for the completion endpoint
    #[serde(default = "default_completion_timeout_secs")]
    pub completion_timeout_secs: u64,

    /// Total completion attempts (clamped to 1..=3)
    #[serde(default = "default_completion_max_attempts")]
    pub completion_max_attempts: u32,

    /// Travel cost service base URL
    #[serde(default = "default_travel_cost_url")]
    pub travel_cost_url: String,

    /// Per-request timeout for the travel cost service
    #[serde(default = "default_cost_timeout_secs")]
    pub cost_timeout_secs: u64,

    /// Whether recommendations are enriched with travel cost service figures
    #[serde(default = "default_cost_enrichment_enabled")]
    pub cost_enrichment_enabled: bool,

    /// YouTube Data API key
    #[serde(default)]
    pub youtube_api_key: Option<String>,

    /// YouTube search endpoint
    #[serde(default = "default_youtube_api_url")]
    pub youtube_api_url: String,

    #[serde(default)]
    pub smtp_host: Option<String>,

    #[serde(default)]
    pub smtp_port: Option<u16>,

    #[serde(default)]
    pub smtp_user: Option<String>,

    #[serde(default)]
    pub smtp_password: Option<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Comma separated CORS origins; any origin when unset
    #[serde(default)]
    pub allowed_origins: Option<String>,
}

fn default_gemini_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        .to_string()
}

fn default_completion_timeout_secs() -> u64 {
    30
}

fn default_completion_max_attempts() -> u32 {
    3
}

fn default_travel_cost_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_cost_timeout_secs() -> u64 {
    10
}

fn default_cost_enrichment_enabled() -> bool {
    true
}

fn default_youtube_api_url() -> String {
    "https://www.googleapis.com/youtube/v3/search".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5005
}

/// SMTP settings, present only when every SMTP variable is set
#[derive(Debug, Clone, PartialEq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// SMTP settings if the configuration is complete
    pub fn smtp(&self) -> Option<SmtpSettings> {
        Some(SmtpSettings {
            host: self.smtp_host.clone().filter(|h| !h.trim().is_empty())?,
            port: self.smtp_port?,
            user: self.smtp_user.clone().filter(|u| !u.trim().is_empty())?,
            password: self.smtp_password.clone().filter(|p| !p.is_empty())?,
        })
    }

    /// Parsed CORS origin list, empty when any origin is allowed
    pub fn cors_origins(&self) -> Vec<String> {
        self.allowed_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Logs which credentials were loaded without revealing them
    pub fn log_status(&self) {
        tracing::info!(
            gemini_api_key = !self.gemini_api_key.is_empty(),
            youtube_api_key = self.youtube_api_key.is_some(),
            smtp_configured = self.smtp().is_some(),
            smtp_host = self.smtp_host.as_deref().unwrap_or("-"),
            travel_cost_url = %self.travel_cost_url,
            cost_enrichment = self.cost_enrichment_enabled,
            "Configuration loaded"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        serde_json::from_value(serde_json::json!({ "gemini_api_key": "k" })).unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let config = base_config();
        assert_eq!(config.port, 5005);
        assert_eq!(config.completion_timeout_secs, 30);
        assert_eq!(config.completion_max_attempts, 3);
        assert_eq!(config.travel_cost_url, "http://localhost:3001");
        assert!(config.cost_enrichment_enabled);
        assert!(config.youtube_api_key.is_none());
    }

    #[test]
    fn test_smtp_requires_all_fields() {
        let mut config = base_config();
        config.smtp_host = Some("smtp.example.com".to_string());
        config.smtp_port = Some(587);
        config.smtp_user = Some("me@example.com".to_string());
        assert_eq!(config.smtp(), None);

        config.smtp_password = Some("secret".to_string());
        let smtp = config.smtp().unwrap();
        assert_eq!(smtp.host, "smtp.example.com");
        assert_eq!(smtp.port, 587);
    }

    #[test]
    fn test_cors_origins_parsing() {
        let mut config = base_config();
        assert!(config.cors_origins().is_empty());

        config.allowed_origins = Some("http://localhost:3000, https://tripto.app ,".to_string());
        assert_eq!(
            config.cors_origins(),
            vec!["http://localhost:3000", "https://tripto.app"]
        );
    }
}
