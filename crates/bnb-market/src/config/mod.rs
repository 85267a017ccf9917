use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_REDIRECT_DELAY_MS: u64 = 1_000;
const DEFAULT_NOTICE_TTL_SECS: i64 = 5;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the marketplace service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub marketplace: MarketplaceConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let redirect_delay = match env::var("BNB_REDIRECT_DELAY_MS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidRedirectDelay)?,
            Err(_) => Duration::from_millis(DEFAULT_REDIRECT_DELAY_MS),
        };

        let notice_ttl_secs = match env::var("BNB_NOTICE_TTL_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidNoticeTtl)?,
            Err(_) => DEFAULT_NOTICE_TTL_SECS,
        };

        let listings_csv = env::var("BNB_LISTINGS_CSV")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            marketplace: MarketplaceConfig {
                redirect_delay,
                notice_ttl_secs,
                listings_csv,
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Marketplace timing and data-source knobs.
#[derive(Debug, Clone)]
pub struct MarketplaceConfig {
    /// Cosmetic pause before the role router hands off to a dashboard.
    pub redirect_delay: Duration,
    /// How long a form notice stays visible.
    pub notice_ttl_secs: i64,
    /// Optional CSV catalogue replacing the seeded listings.
    pub listings_csv: Option<PathBuf>,
}

impl MarketplaceConfig {
    pub fn notice_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.notice_ttl_secs)
    }
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            redirect_delay: Duration::from_millis(DEFAULT_REDIRECT_DELAY_MS),
            notice_ttl_secs: DEFAULT_NOTICE_TTL_SECS,
            listings_csv: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidRedirectDelay,
    InvalidNoticeTtl,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidRedirectDelay => {
                write!(f, "BNB_REDIRECT_DELAY_MS must be a whole number of milliseconds")
            }
            ConfigError::InvalidNoticeTtl => {
                write!(f, "BNB_NOTICE_TTL_SECS must be a positive number of seconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidRedirectDelay
            | ConfigError::InvalidNoticeTtl => None,
        }
    }
}
