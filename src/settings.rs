use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr, time::Duration};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

/// Where experience and project records are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Static,
    Postgres,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Static => write!(f, "static"),
            DataSource::Postgres => write!(f, "postgres"),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    /// Absent means the embedded static dataset is served.
    #[serde(default)]
    pub database_url: Option<String>,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,

    #[serde(default = "default_database_timeout")]
    pub database_timeout_secs: u64,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default)]
    pub mail_relay_url: Option<String>,

    #[serde(default)]
    pub mail_api_key: Option<String>,

    #[serde(default)]
    pub mail_sender: Option<String>,

    #[serde(default)]
    pub contact_recipient: Option<String>,

    #[serde(default)]
    pub chat_service_url: Option<String>,

    #[serde(default = "default_chat_timeout")]
    pub chat_timeout_secs: u64,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "NextMile-Portfolio-API".to_string()
}
fn default_port() -> u16 {
    5000
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_max_connections() -> u32 {
    10
}
fn default_database_timeout() -> u64 {
    5
}
fn default_request_timeout() -> u64 {
    30
}
fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}
fn default_chat_timeout() -> u64 {
    20
}

/// Everything the HTTP mail relay needs; only built when fully configured.
#[derive(Clone)]
pub struct MailSettings {
    pub relay_url: String,
    pub api_key: String,
    pub sender: String,
    pub recipient: String,
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins")
                    .ignore_empty(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Conventional unprefixed variables used by hosting platforms
        config.database_url = fill_from_env(config.database_url, "DATABASE_URL");
        if env::var("APP_CORS_ALLOWED_ORIGINS").is_err() {
            if let Some(frontend) = fill_from_env(None, "FRONTEND_URL") {
                config.cors_allowed_origins = vec![frontend];
            }
        }
        if env::var("APP_PORT").is_err() {
            if let Some(port) = env::var("PORT").ok().and_then(|p| p.parse().ok()) {
                config.port = port;
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.database_url.as_deref().is_some_and(|url| url.trim().is_empty()) {
            errors.push("DATABASE_URL cannot be blank; unset it to serve static data");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }
        if self.worker_count == 0 {
            errors.push("WORKER_COUNT must be at least 1");
        }
        if self.database_timeout_secs == 0 || self.request_timeout_secs == 0 {
            errors.push("Timeouts must be at least one second");
        }

        let mail_parts = [&self.mail_relay_url, &self.mail_api_key, &self.mail_sender];
        let configured = mail_parts.iter().filter(|p| p.is_some()).count();
        if configured != 0 && configured != mail_parts.len() {
            errors.push("MAIL_RELAY_URL, MAIL_API_KEY and MAIL_SENDER must be set together");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn data_source(&self) -> DataSource {
        match self.database_url {
            Some(_) => DataSource::Postgres,
            None => DataSource::Static,
        }
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn database_timeout(&self) -> Duration {
        Duration::from_secs(self.database_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn chat_timeout(&self) -> Duration {
        Duration::from_secs(self.chat_timeout_secs)
    }

    /// Mail relay settings; the recipient falls back to the sender address.
    pub fn mail_settings(&self) -> Option<MailSettings> {
        let relay_url = self.mail_relay_url.clone()?;
        let api_key = self.mail_api_key.clone()?;
        let sender = self.mail_sender.clone()?;
        let recipient = self.contact_recipient.clone().unwrap_or_else(|| sender.clone());

        Some(MailSettings {
            relay_url,
            api_key,
            sender,
            recipient,
        })
    }
}

fn fill_from_env(current: Option<String>, env_key: &str) -> Option<String> {
    current.or_else(|| env::var(env_key).ok().filter(|v| !v.trim().is_empty()))
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for Option<String> {
    fn redact(&self) -> &str {
        match self {
            None => "[NOT SET]",
            Some(value) if value.is_empty() => "[EMPTY]",
            Some(_) => "[REDACTED]",
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("data_source", &self.data_source())
            .field("database_url", &self.database_url.redact())
            .field("database_max_connections", &self.database_max_connections)
            .field("database_timeout_secs", &self.database_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("mail_relay_url", &self.mail_relay_url)
            .field("mail_api_key", &self.mail_api_key.redact())
            .field("mail_sender", &self.mail_sender)
            .field("contact_recipient", &self.contact_recipient)
            .field("chat_service_url", &self.chat_service_url)
            .field("chat_timeout_secs", &self.chat_timeout_secs)
            .finish()
    }
}

impl fmt::Debug for MailSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailSettings")
            .field("relay_url", &self.relay_url)
            .field("api_key", &"[REDACTED]")
            .field("sender", &self.sender)
            .field("recipient", &self.recipient)
            .finish()
    }
}
