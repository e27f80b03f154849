use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";
pub const DEFAULT_STATE_DIR: &str = ".campusd";

/// Process-level settings. Read once at startup from the environment; the
/// `configure` request can replace either value afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub state_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        resolve(
            env::var("CAMPUSD_API_URL").ok(),
            env::var("CAMPUSD_STATE_DIR").ok(),
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        resolve(None, None)
    }
}

fn resolve(api_url: Option<String>, state_dir: Option<String>) -> Config {
    Config {
        api_url: api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        state_dir: state_dir
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR)),
    }
}
