use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `300`). A sync request walks
    /// the whole catalog, so this must cover a full run.
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, issuer, audience, expiry).
    pub jwt: JwtConfig,
    /// The single account accepted by `POST /auth/login`.
    pub login: LoginConfig,
    /// External catalog client settings.
    pub catalog: CatalogConfig,
}

/// Credentials accepted by the login endpoint.
#[derive(Debug, Clone)]
pub struct LoginConfig {
    pub username: String,
    pub password: String,
}

/// Where and how the synchronizer reaches the external catalog.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    /// Items requested per listing page.
    pub page_limit: u32,
    /// Per-request timeout for catalog calls, in seconds.
    pub timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                            |
    /// |------------------------|------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                          |
    /// | `PORT`                 | `3000`                             |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`            |
    /// | `REQUEST_TIMEOUT_SECS` | `300`                              |
    /// | `AUTH_USERNAME`        | `testuser`                         |
    /// | `AUTH_PASSWORD`        | `Pa$$w0rd`                         |
    /// | `CATALOG_BASE_URL`     | `https://dragonball-api.com/api/`  |
    /// | `CATALOG_PAGE_LIMIT`   | `50`                               |
    /// | `CATALOG_TIMEOUT_SECS` | `30`                               |
    ///
    /// See [`JwtConfig::from_env`] for the JWT variables.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let login = LoginConfig {
            username: std::env::var("AUTH_USERNAME").unwrap_or_else(|_| "testuser".into()),
            password: std::env::var("AUTH_PASSWORD").unwrap_or_else(|_| "Pa$$w0rd".into()),
        };

        let catalog = CatalogConfig {
            base_url: std::env::var("CATALOG_BASE_URL")
                .unwrap_or_else(|_| "https://dragonball-api.com/api/".into()),
            page_limit: std::env::var("CATALOG_PAGE_LIMIT")
                .unwrap_or_else(|_| dbz_sync::DEFAULT_PAGE_LIMIT.to_string())
                .parse()
                .expect("CATALOG_PAGE_LIMIT must be a valid u32"),
            timeout_secs: std::env::var("CATALOG_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .expect("CATALOG_TIMEOUT_SECS must be a valid u64"),
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            login,
            catalog,
        }
    }
}
