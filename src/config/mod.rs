use std::env;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::Invalid {
                key: "STORE_BACKEND",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    /// Full connection URI; takes precedence over the credential fields
    pub url: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub host: String,
    pub name: String,
    pub operation_timeout_secs: u64,
    /// STORE_BACKEND value that named no known backend
    pub rejected_backend: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub password_hash_cost: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_overrides(lookup)
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // API overrides
        if let Some(v) = lookup("PORT") {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Some(v) = lookup("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        // Database overrides
        if let Some(v) = lookup("STORE_BACKEND") {
            match v.parse() {
                Ok(backend) => self.database.backend = backend,
                Err(_) => self.database.rejected_backend = Some(v),
            }
        }
        self.database.url = lookup("DATABASE_URL").or(self.database.url);
        self.database.user = lookup("DB_USER").or(self.database.user);
        self.database.password = lookup("DB_PASS").or(self.database.password);
        if let Some(v) = lookup("DB_HOST") {
            self.database.host = v;
        }
        if let Some(v) = lookup("DB_NAME") {
            self.database.name = v;
        }
        if let Some(v) = lookup("DATABASE_OPERATION_TIMEOUT_SECS") {
            self.database.operation_timeout_secs =
                v.parse().unwrap_or(self.database.operation_timeout_secs);
        }

        // Security overrides
        if let Some(v) = lookup("ACCESS_TOKEN_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Some(v) = lookup("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Some(v) = lookup("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Some(v) = lookup("SECURITY_PASSWORD_HASH_COST") {
            self.security.password_hash_cost = v.parse().unwrap_or(self.security.password_hash_cost);
        }

        self
    }

    /// Checks settings that have no usable default
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(value) = &self.database.rejected_backend {
            return Err(ConfigError::Invalid {
                key: "STORE_BACKEND",
                value: value.clone(),
            });
        }
        if self.security.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Missing("ACCESS_TOKEN_SECRET"));
        }
        if self.database.backend == StoreBackend::Mongo && self.database.url.is_none() {
            if self.database.user.is_none() {
                return Err(ConfigError::Missing("DB_USER"));
            }
            if self.database.password.is_none() {
                return Err(ConfigError::Missing("DB_PASS"));
            }
        }
        Ok(())
    }

    /// Default `tracing` directive when RUST_LOG is unset
    pub fn default_log_filter(&self) -> &'static str {
        match self.environment {
            Environment::Development => "info,tower_http=debug",
            Environment::Staging | Environment::Production => "info",
        }
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                backend: StoreBackend::Mongo,
                url: None,
                user: None,
                password: None,
                host: "cluster0.wtas1.mongodb.net".to_string(),
                name: "modernTools".to_string(),
                operation_timeout_secs: 30,
                rejected_backend: None,
            },
            api: ApiConfig {
                port: 5000,
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
            },
            security: SecurityConfig {
                enable_cors: true,
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                password_hash_cost: 10,
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                operation_timeout_secs: 10,
                ..Self::development().database
            },
            api: ApiConfig {
                port: 5000,
                max_request_size_bytes: 5 * 1024 * 1024, // 5MB
            },
            security: SecurityConfig {
                enable_cors: true,
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                password_hash_cost: bcrypt::DEFAULT_COST,
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                operation_timeout_secs: 5,
                ..Self::development().database
            },
            api: ApiConfig {
                port: 5000,
                max_request_size_bytes: 2 * 1024 * 1024, // 2MB
            },
            security: SecurityConfig {
                enable_cors: true,
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                password_hash_cost: bcrypt::DEFAULT_COST,
            },
        }
    }
}
