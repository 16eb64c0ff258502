use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use tracing::{info, warn};

const NEWS_API_URL: &str = "https://newsapi.org/v2/everything";

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub news_url: String,
    pub news_api_key: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("RUST_PORT", "1111"),
            news_url: try_load("NEWS_API_URL", NEWS_API_URL),
            news_api_key: load_secret("NEWS_API_KEY"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

// Env var wins so local runs don't need a secrets mount.
fn load_secret(secret_name: &str) -> String {
    if let Ok(value) = env::var(secret_name) {
        return value.trim().to_string();
    }

    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            warn!("Failed to read {secret_name} from env or file: {e}");
        })
        .expect("Secrets misconfigured!")
}
