use std::net::SocketAddr;

use anyhow::Context;

/// `cookie::Key::derive_from` needs at least this much key material.
pub const MIN_SECRET_KEY_LEN: usize = 32;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub secret_key: String,
    pub tmdb_access_token: String,
    pub tmdb_base_url: String,
    pub tmdb_image_base_url: String,
    pub tmdb_language: String,
    pub tmdb_timeout_secs: u64,
    pub csrf_ttl_secs: i64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 =
            lookup("PORT").unwrap_or_else(|| "3000".to_string()).parse().context("PORT")?;

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://movies.db?mode=rwc".to_string());

        let secret_key = lookup("SECRET_KEY").context("SECRET_KEY must be set")?;
        if secret_key.len() < MIN_SECRET_KEY_LEN {
            anyhow::bail!("SECRET_KEY must be at least {MIN_SECRET_KEY_LEN} bytes");
        }

        let tmdb_access_token = lookup("TMDB_ACCESS_TOKEN").unwrap_or_default();
        let tmdb_base_url =
            lookup("TMDB_BASE_URL").unwrap_or_else(|| "https://api.themoviedb.org/3".to_string());
        let tmdb_image_base_url = lookup("TMDB_IMAGE_BASE_URL")
            .unwrap_or_else(|| "https://image.tmdb.org/t/p/w500".to_string());
        let tmdb_language = lookup("TMDB_LANGUAGE").unwrap_or_else(|| "en-US".to_string());

        let tmdb_timeout_secs: u64 =
            lookup("TMDB_TIMEOUT_SECS").and_then(|s| s.parse().ok()).unwrap_or(30);

        let csrf_ttl_secs: i64 =
            lookup("CSRF_TTL_SECS").and_then(|s| s.parse().ok()).unwrap_or(3600);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            secret_key,
            tmdb_access_token,
            tmdb_base_url,
            tmdb_image_base_url,
            tmdb_language,
            tmdb_timeout_secs,
            csrf_ttl_secs,
        })
    }
}
