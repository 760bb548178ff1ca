use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

const DEFAULT_TOKEN_PATH: &str = ".placement-session.json";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub token_path: PathBuf,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            api_base_url: get_env("API_BASE_URL")?,
            token_path: env::var("TOKEN_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_TOKEN_PATH)),
            request_timeout_secs: match env::var("REQUEST_TIMEOUT_SECS") {
                Ok(raw) => raw.parse().map_err(|e| {
                    Error::Config(format!("Invalid value for REQUEST_TIMEOUT_SECS: {}", e))
                })?,
                Err(_) => DEFAULT_TIMEOUT_SECS,
            },
        })
    }

    pub fn new(api_base_url: impl Into<String>, token_path: impl Into<PathBuf>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            token_path: token_path.into(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}
