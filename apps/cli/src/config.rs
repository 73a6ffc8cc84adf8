//! Environment configuration for the terminal host.

use anyhow::Context;

use crate::messages::Lang;

/// Host settings read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    /// Absent means an anonymous session.
    pub username: Option<String>,
    pub lang: Lang,
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let backend_url = std::env::var("KAKI_BACKEND_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());
        let username = std::env::var("KAKI_USERNAME").ok();
        let lang = std::env::var("KAKI_LANG").ok();
        let seed = match std::env::var("KAKI_SEED") {
            Ok(value) => Some(
                value
                    .parse()
                    .with_context(|| format!("KAKI_SEED has an invalid value: {value}"))?,
            ),
            Err(_) => None,
        };

        Self::new(backend_url, username, lang.as_deref(), seed)
    }

    pub fn new(
        backend_url: String,
        username: Option<String>,
        lang: Option<&str>,
        seed: Option<u64>,
    ) -> anyhow::Result<Self> {
        let lang = match lang {
            Some(value) => value.parse()?,
            None => Lang::En,
        };

        Ok(Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            username: username
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            lang,
            seed,
        })
    }
}
