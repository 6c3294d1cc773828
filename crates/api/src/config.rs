/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Webhook URL triggered by `POST /refresh`. Optional; without it the
    /// refresh endpoint is a no-op acknowledgement.
    pub refresh_webhook_url: Option<String>,
    /// Actor recorded in the audit trail when a request omits
    /// `performed_by`.
    pub default_actor: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3001`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `REFRESH_WEBHOOK_URL`  | unset                      |
    /// | `DEFAULT_ACTOR`        | `dashboard`                |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3001".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let refresh_webhook_url = std::env::var("REFRESH_WEBHOOK_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let default_actor =
            std::env::var("DEFAULT_ACTOR").unwrap_or_else(|_| "dashboard".into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            refresh_webhook_url,
            default_actor,
        }
    }
}
