use std::path::PathBuf;

use dealership_core::geo::Coordinates;
use dealership_notify::EmailConfig;

use crate::storage::StorageConfig;

/// Default upload size cap: 10 MiB.
pub const DEFAULT_UPLOAD_MAX_BYTES: usize = 10 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// Most fields have defaults suitable for local development. The admin
/// password and the session secret have no default and must be provided.
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
    /// Public base URL of the storefront, used in email links.
    pub site_url: String,
    /// Fallback admin password used until one is stored in the database.
    pub admin_password: String,
    /// Key for the session cookie HMAC.
    pub session_secret: String,
    /// Session cookie lifetime in hours (default: `168`).
    pub session_ttl_hours: u64,
    /// Add the `Secure` attribute to the session cookie.
    pub cookie_secure: bool,
    /// Address receiving order and lead notifications.
    pub merchant_email: String,
    pub email: EmailConfig,
    pub storage: StorageConfig,
    /// Maximum accepted upload size in bytes (default: 10 MiB).
    pub upload_max_bytes: usize,
    /// Dealership location for travel estimates.
    pub dealership_location: Coordinates,
    /// Optional directory with a built front end to serve at `/`.
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SITE_URL`             | `http://localhost:3000`    |
    /// | `ADMIN_PASSWORD`       | required                   |
    /// | `SESSION_SECRET`       | required                   |
    /// | `SESSION_TTL_HOURS`    | `168`                      |
    /// | `COOKIE_SECURE`        | `false`                    |
    /// | `MERCHANT_EMAIL`       | `contact@localhost`        |
    /// | `UPLOAD_MAX_BYTES`     | `10485760`                 |
    /// | `DEALERSHIP_LAT`       | `48.8566`                  |
    /// | `DEALERSHIP_LNG`       | `2.3522`                   |
    /// | `STATIC_DIR`           | unset                      |
    ///
    /// Email and storage variables are documented on [`EmailConfig::from_env`]
    /// and [`StorageConfig::from_env`].
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
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let site_url = std::env::var("SITE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        let admin_password = std::env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD must be set");
        let session_secret = std::env::var("SESSION_SECRET").expect("SESSION_SECRET must be set");

        let session_ttl_hours: u64 = std::env::var("SESSION_TTL_HOURS")
            .unwrap_or_else(|_| "168".into())
            .parse()
            .expect("SESSION_TTL_HOURS must be a valid u64");

        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let merchant_email =
            std::env::var("MERCHANT_EMAIL").unwrap_or_else(|_| "contact@localhost".into());

        let upload_max_bytes: usize = std::env::var("UPLOAD_MAX_BYTES")
            .map(|v| v.parse().expect("UPLOAD_MAX_BYTES must be a valid usize"))
            .unwrap_or(DEFAULT_UPLOAD_MAX_BYTES);

        let lat: f64 = std::env::var("DEALERSHIP_LAT")
            .unwrap_or_else(|_| "48.8566".into())
            .parse()
            .expect("DEALERSHIP_LAT must be a number");
        let lng: f64 = std::env::var("DEALERSHIP_LNG")
            .unwrap_or_else(|_| "2.3522".into())
            .parse()
            .expect("DEALERSHIP_LNG must be a number");
        let dealership_location = Coordinates::new(lat, lng)
            .unwrap_or_else(|e| panic!("Invalid dealership coordinates: {e}"));

        let static_dir = std::env::var("STATIC_DIR").ok().map(PathBuf::from);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            site_url,
            admin_password,
            session_secret,
            session_ttl_hours,
            cookie_secure,
            merchant_email,
            email: EmailConfig::from_env(),
            storage: StorageConfig::from_env(),
            upload_max_bytes,
            dealership_location,
            static_dir,
        }
    }

    pub fn session_ttl_secs(&self) -> u64 {
        self.session_ttl_hours * 3600
    }
}
