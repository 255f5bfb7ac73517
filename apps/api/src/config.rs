use anyhow::{bail, Context, Result};

const DEFAULT_IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Application configuration loaded from environment variables.
/// Optional collaborators (Postgres, identity provider) degrade with a warning when unset.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub firebase_web_api_key: Option<String>,
    pub identity_toolkit_url: String,
    pub catalog_dir: String,
    pub college_match_limit: usize,
    pub enable_test_login: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let college_match_limit = std::env::var("COLLEGE_MATCH_LIMIT")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<usize>()
            .context("COLLEGE_MATCH_LIMIT must be a positive integer")?;
        if college_match_limit == 0 {
            bail!("COLLEGE_MATCH_LIMIT must be at least 1");
        }

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            firebase_web_api_key: optional_env("FIREBASE_WEB_API_KEY"),
            identity_toolkit_url: optional_env("IDENTITY_TOOLKIT_URL")
                .unwrap_or_else(|| DEFAULT_IDENTITY_TOOLKIT_URL.to_string()),
            catalog_dir: optional_env("CATALOG_DIR").unwrap_or_else(|| "data".to_string()),
            college_match_limit,
            enable_test_login: parse_flag(
                "ENABLE_TEST_LOGIN",
                optional_env("ENABLE_TEST_LOGIN").as_deref(),
            )?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an env var, treating empty values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(key: &str, raw: Option<&str>) -> Result<bool> {
    match raw.map(|v| v.to_ascii_lowercase()) {
        None => Ok(false),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => bail!("{key} must be a boolean flag, got '{other}'"),
        },
    }
}
