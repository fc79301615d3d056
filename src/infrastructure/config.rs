use std::path::PathBuf;
use std::str::FromStr;

use crate::infrastructure::external_services::GeminiClientConfig;
use crate::infrastructure::external_services::gemini_client::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL,
};

pub mod defaults {
    pub const DB_POOL_SIZE: u32 = 10;
    pub const UPLOAD_DIR: &str = "./uploads";
    pub const GEMINI_TIMEOUT_SECS: u64 = 120;
    pub const GEMINI_MAX_RETRIES: u32 = 1;
    pub const GEMINI_MAX_INLINE_BYTES: usize = 20 * 1024 * 1024;
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: u16 = 8001;
    pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value, reason } => {
                write!(f, "Invalid value '{}' for {}: {}", value, key, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Allowed CORS origins. `*` in the environment means any origin.
#[derive(Debug, Clone, PartialEq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            CorsOrigins::Any
        } else {
            CorsOrigins::List(origins)
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Without a database URL the service keeps records in memory only.
    pub database_url: Option<String>,
    pub db_pool_size: u32,
    pub upload_dir: PathBuf,
    pub gemini: GeminiClientConfig,
    pub host: String,
    pub port: u16,
    pub cors_origins: CorsOrigins,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    /// Reads `DATABASE_URL`, `DB_POOL_SIZE`, `UPLOAD_DIR`, `GEMINI_API_KEY`,
    /// `GEMINI_MODEL`, `GEMINI_BASE_URL`, `GEMINI_TIMEOUT_SECS`,
    /// `GEMINI_MAX_RETRIES`, `GEMINI_MAX_INLINE_BYTES`, `HOST`, `PORT`,
    /// `CORS_ORIGINS` and `MAX_UPLOAD_BYTES`. Unset or blank variables take
    /// their defaults; malformed numbers are an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let gemini = GeminiClientConfig {
            api_key: get("GEMINI_API_KEY"),
            model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            base_url: get("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            timeout_secs: parse_or(
                "GEMINI_TIMEOUT_SECS",
                get("GEMINI_TIMEOUT_SECS"),
                defaults::GEMINI_TIMEOUT_SECS,
            )?,
            max_retries: parse_or(
                "GEMINI_MAX_RETRIES",
                get("GEMINI_MAX_RETRIES"),
                defaults::GEMINI_MAX_RETRIES,
            )?,
            max_inline_bytes: parse_or(
                "GEMINI_MAX_INLINE_BYTES",
                get("GEMINI_MAX_INLINE_BYTES"),
                defaults::GEMINI_MAX_INLINE_BYTES,
            )?,
            ..GeminiClientConfig::default()
        };

        let db_pool_size = parse_or("DB_POOL_SIZE", get("DB_POOL_SIZE"), defaults::DB_POOL_SIZE)?;
        if db_pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "DB_POOL_SIZE",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            database_url: get("DATABASE_URL"),
            db_pool_size,
            upload_dir: PathBuf::from(get("UPLOAD_DIR").unwrap_or_else(|| defaults::UPLOAD_DIR.to_string())),
            gemini,
            host: get("HOST").unwrap_or_else(|| defaults::HOST.to_string()),
            port: parse_or("PORT", get("PORT"), defaults::PORT)?,
            cors_origins: CorsOrigins::parse(&get("CORS_ORIGINS").unwrap_or_else(|| "*".to_string())),
            max_upload_bytes: parse_or(
                "MAX_UPLOAD_BYTES",
                get("MAX_UPLOAD_BYTES"),
                defaults::MAX_UPLOAD_BYTES,
            )?,
        })
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value.parse::<T>().map_err(|e| ConfigError::InvalidValue {
            key,
            reason: e.to_string(),
            value,
        }),
        None => Ok(default),
    }
}
