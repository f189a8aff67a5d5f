use anyhow::Context;
use serde::Deserialize;

/// One year; longer token lifetimes are refused at startup.
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

/// Argon2 cost parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: argon2::Params::DEFAULT_M_COST,
            iterations: argon2::Params::DEFAULT_T_COST,
            parallelism: argon2::Params::DEFAULT_P_COST,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateConfig {
    /// Every document link must start with this prefix.
    pub document_link_prefix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub candidates: CandidateConfig,
}

fn check_ttl_minutes(minutes: i64) -> anyhow::Result<i64> {
    anyhow::ensure!(
        (1..=MAX_TTL_MINUTES).contains(&minutes),
        "JWT_TTL_MINUTES must be between 1 and {MAX_TTL_MINUTES}, got {minutes}"
    );
    Ok(minutes)
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;

        let secret = std::env::var("JWT_SECRET").context("JWT_SECRET is not set")?;
        anyhow::ensure!(!secret.trim().is_empty(), "JWT_SECRET must not be empty");

        let jwt = JwtConfig {
            secret,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "candidate-registry".into()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "candidate-registry-users".into()),
            ttl_minutes: check_ttl_minutes(env_or("JWT_TTL_MINUTES", 60 * 24))?,
        };

        let defaults = PasswordConfig::default();
        let password = PasswordConfig {
            memory_kib: env_or("PASSWORD_MEMORY_KIB", defaults.memory_kib),
            iterations: env_or("PASSWORD_ITERATIONS", defaults.iterations),
            parallelism: env_or("PASSWORD_PARALLELISM", defaults.parallelism),
        };

        let candidates = CandidateConfig {
            document_link_prefix: std::env::var("DOCUMENT_LINK_PREFIX")
                .unwrap_or_else(|_| "https://drive.google.com/".into()),
        };

        Ok(Self {
            database_url,
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", 10),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_or("APP_PORT", 8080),
            jwt,
            password,
            candidates,
        })
    }
}
