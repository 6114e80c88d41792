use std::env;

use auth::Authenticator;
use auth::PasswordError;
use auth::PasswordHasher;
use auth::SecretKey;
use auth::TokenError;
use auth::TokenManager;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use config::FileFormat;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub token: TokenConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    #[serde(default = "PasswordConfig::default_memory_cost_kib")]
    pub memory_cost_kib: u32,
    #[serde(default = "PasswordConfig::default_time_cost")]
    pub time_cost: u32,
    #[serde(default = "PasswordConfig::default_parallelism")]
    pub parallelism: u32,
}

/// Errors raised while turning configuration into authentication components.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid token configuration: {0}")]
    Token(#[from] TokenError),

    #[error("Invalid password configuration: {0}")]
    Password(#[from] PasswordError),
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (TOKEN__SECRET, TOKEN__EXPIRATION_HOURS, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: TOKEN__SECRET=... overrides token.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }

    /// Parse configuration from TOML text, without files or environment.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        ConfigBuilder::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Build the authenticator described by this configuration.
    pub fn authenticator(&self) -> Result<Authenticator, SetupError> {
        Ok(Authenticator::from_parts(
            self.password.hasher()?,
            self.token.token_manager()?,
        ))
    }
}

impl TokenConfig {
    pub fn secret_key(&self) -> Result<SecretKey, TokenError> {
        SecretKey::new(self.secret.as_bytes())
    }

    /// Token lifetime; an out-of-range value yields a zero duration, which
    /// `TokenManager::new` rejects.
    pub fn token_duration(&self) -> Duration {
        Duration::try_hours(self.expiration_hours).unwrap_or_else(Duration::zero)
    }

    pub fn token_manager(&self) -> Result<TokenManager, TokenError> {
        TokenManager::new(&self.secret_key()?, self.token_duration())
    }
}

impl PasswordConfig {
    fn default_memory_cost_kib() -> u32 {
        auth::password::MEMORY_COST_KIB
    }

    fn default_time_cost() -> u32 {
        auth::password::TIME_COST
    }

    fn default_parallelism() -> u32 {
        auth::password::PARALLELISM
    }

    pub fn hasher(&self) -> Result<PasswordHasher, PasswordError> {
        PasswordHasher::with_params(self.memory_cost_kib, self.time_cost, self.parallelism)
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_cost_kib: Self::default_memory_cost_kib(),
            time_cost: Self::default_time_cost(),
            parallelism: Self::default_parallelism(),
        }
    }
}
