use anyhow::{bail, Context, Result};

use crate::enrichment::parser::ParsePolicy;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub ollama_url: String,
    pub ollama_model: String,
    /// Bounds the batch to the N most recently added listings. Unset = all.
    pub listing_limit: Option<i64>,
    pub parse_policy: ParsePolicy,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let listing_limit = match std::env::var("LISTING_LIMIT") {
            Ok(raw) => {
                let limit = raw
                    .parse::<i64>()
                    .context("LISTING_LIMIT must be an integer")?;
                if limit <= 0 {
                    bail!("LISTING_LIMIT must be positive, got {limit}");
                }
                Some(limit)
            }
            Err(_) => None,
        };

        let parse_policy = match std::env::var("PARSE_POLICY").as_deref() {
            Ok("strict") => ParsePolicy::Strict,
            Ok("lenient") | Err(_) => ParsePolicy::Lenient,
            Ok(other) => bail!("PARSE_POLICY must be 'lenient' or 'strict', got '{other}'"),
        };

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            ollama_url: std::env::var("OLLAMA_URL")
                .unwrap_or_else(|_| "http://ollama:11434".to_string()),
            ollama_model: std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.2".to_string()),
            listing_limit,
            parse_policy,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
