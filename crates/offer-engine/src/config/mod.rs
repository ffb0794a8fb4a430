use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::offers::{EvaluationConfig, NameMatching, UncappedPercentage};

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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub evaluation: EvaluationConfig,
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

        let uncapped_percentage = match env::var("OFFERS_UNCAPPED_PERCENTAGE") {
            Ok(value) => parse_uncapped_percentage(&value)?,
            Err(_) => UncappedPercentage::default(),
        };
        let name_matching = match env::var("OFFERS_NAME_MATCHING") {
            Ok(value) => parse_name_matching(&value)?,
            Err(_) => NameMatching::default(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
            },
            evaluation: EvaluationConfig {
                uncapped_percentage,
                name_matching,
            },
        })
    }
}

fn parse_uncapped_percentage(value: &str) -> Result<UncappedPercentage, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "cap_at_zero" | "zero" => Ok(UncappedPercentage::CapAtZero),
        "unbounded" | "none" => Ok(UncappedPercentage::Unbounded),
        _ => Err(ConfigError::InvalidUncappedPercentage(value.to_string())),
    }
}

fn parse_name_matching(value: &str) -> Result<NameMatching, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "exact" => Ok(NameMatching::Exact),
        "case_insensitive" | "insensitive" => Ok(NameMatching::CaseInsensitive),
        _ => Err(ConfigError::InvalidNameMatching(value.to_string())),
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
    /// Colored output; only enabled for local development.
    pub ansi: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidUncappedPercentage(String),
    InvalidNameMatching(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidUncappedPercentage(value) => write!(
                f,
                "OFFERS_UNCAPPED_PERCENTAGE must be 'cap_at_zero' or 'unbounded', got '{}'",
                value
            ),
            ConfigError::InvalidNameMatching(value) => write!(
                f,
                "OFFERS_NAME_MATCHING must be 'exact' or 'case_insensitive', got '{}'",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidUncappedPercentage(_)
            | ConfigError::InvalidNameMatching(_) => None,
        }
    }
}
