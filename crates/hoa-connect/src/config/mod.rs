use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Administrator inbox used when `HOA_ADMIN_EMAIL` is unset.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@hoaconnect.com";

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
    pub notifications: NotificationConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            notifications: NotificationConfig::from_env()?,
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Static delivery settings resolved once at startup: transport
/// credentials, one template id per dispatch operation, and the
/// administrator inbox submission notifications land in.
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    pub public_key: String,
    pub service_id: String,
    pub complaint_template_id: String,
    pub complaint_reply_template_id: String,
    pub contact_template_id: String,
    pub contact_reply_template_id: String,
    pub admin_email: String,
}

impl NotificationConfig {
    /// Reads delivery settings from the environment.
    ///
    /// Reply template ids are optional and fall back to the same-family
    /// notification template, matching the provider setup the site
    /// launched with. The admin inbox falls back to
    /// [`DEFAULT_ADMIN_EMAIL`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let public_key = require_var("EMAILJS_PUBLIC_KEY")?;
        let service_id = require_var("EMAILJS_SERVICE_ID")?;
        let complaint_template_id = require_var("EMAILJS_COMPLAINT_TEMPLATE_ID")?;
        let contact_template_id = require_var("EMAILJS_CONTACT_TEMPLATE_ID")?;

        let complaint_reply_template_id = env::var("EMAILJS_COMPLAINT_REPLY_TEMPLATE_ID")
            .unwrap_or_else(|_| complaint_template_id.clone());
        let contact_reply_template_id = env::var("EMAILJS_CONTACT_REPLY_TEMPLATE_ID")
            .unwrap_or_else(|_| contact_template_id.clone());

        let admin_email =
            env::var("HOA_ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string());

        Ok(Self {
            public_key,
            service_id,
            complaint_template_id,
            complaint_reply_template_id,
            contact_template_id,
            contact_reply_template_id,
            admin_email,
        })
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar { name }),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    MissingVar { name: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::MissingVar { name } => {
                write!(f, "required environment variable {name} is not set")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::MissingVar { .. } => None,
        }
    }
}
