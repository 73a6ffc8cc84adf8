//! Environment configuration for the backend

use anyhow::{bail, Context};

/// Server settings read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    /// Easing factor given to newly registered study items.
    pub default_easing_factor: f64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_var("PORT", 3000)?;
        let max_connections = parse_var("DATABASE_MAX_CONNECTIONS", 10)?;
        let default_easing_factor = parse_var("DEFAULT_EASING_FACTOR", 2.5)?;

        Self::new(database_url, host, port, max_connections, default_easing_factor)
    }

    pub fn new(
        database_url: String,
        host: String,
        port: u16,
        max_connections: u32,
        default_easing_factor: f64,
    ) -> anyhow::Result<Self> {
        if !(default_easing_factor > 1.0) {
            bail!("DEFAULT_EASING_FACTOR must be greater than 1, got {default_easing_factor}");
        }

        Ok(Self {
            database_url,
            host,
            port,
            max_connections,
            default_easing_factor,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("{name} has an invalid value: {value}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = Config::new("postgres://localhost/kaki".into(), "127.0.0.1".into(), 8080, 5, 2.5).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_easing_factor_must_exceed_one() {
        let result = Config::new("postgres://localhost/kaki".into(), "0.0.0.0".into(), 3000, 10, 1.0);
        assert!(result.is_err());
    }

    #[test]
    fn test_nan_easing_factor_rejected() {
        let result = Config::new("postgres://localhost/kaki".into(), "0.0.0.0".into(), 3000, 10, f64::NAN);
        assert!(result.is_err());
    }
}
