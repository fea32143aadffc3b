use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ChronosError, Result};
use crate::models::{ChronosConfig, ClockifyConfig, GitlabConfig, LinearConfig};

const CONFIG_DIRNAME: &str = ".chronos";
const CONFIG_FILENAME: &str = ".env";

const DEFAULT_CLOCKIFY_USER_URL: &str = "https://api.clockify.me/api/v1/user";
const DEFAULT_LINEAR_BASE_URL: &str = "https://api.linear.app/graphql";
const DEFAULT_GITLAB_BASE_URL: &str = "https://gitlab.com/api/v4/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Keys that may be overridden from the process environment.
const KNOWN_KEYS: &[&str] = &[
    "CLOCKIFY_API_KEY",
    "CLOCKIFY_BASE_URL",
    "CLOCKIFY_USER_URL",
    "CLOCKIFY_USER_ID",
    "CLOCKIFY_DEFAULT_PROJECT",
    "LINEAR_API_KEY",
    "LINEAR_BASE_URL",
    "GITLAB_API_KEY",
    "GITLAB_BASE_URL",
    "GITLAB_USER_ID",
    "CHRONOS_REQUEST_TIMEOUT_SECS",
];

/// `~/.chronos`, falling back to `./.chronos` when no home directory is known.
pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIRNAME)
}

/// Load `<dir>/.env`, letting process environment variables win.
pub fn load(config_dir: &Path) -> Result<ChronosConfig> {
    let mut vars = read_env_file(config_dir)?;
    for key in KNOWN_KEYS {
        if let Ok(value) = std::env::var(key) {
            vars.insert((*key).to_string(), value);
        }
    }
    from_vars(&vars)
}

/// Parse the dotenv file without touching the process environment.
pub fn read_env_file(config_dir: &Path) -> Result<HashMap<String, String>> {
    let path = config_dir.join(CONFIG_FILENAME);
    if !path.exists() {
        return Err(ChronosError::ConfigNotFound(path));
    }
    let iter = dotenvy::from_path_iter(&path)
        .map_err(|e| ChronosError::InvalidConfig(format!("{}: {e}", path.display())))?;
    let mut vars = HashMap::new();
    for item in iter {
        let (key, value) = item.map_err(|e| ChronosError::InvalidConfig(e.to_string()))?;
        vars.insert(key, value);
    }
    Ok(vars)
}

/// Build the config from a key/value map.
pub fn from_vars(vars: &HashMap<String, String>) -> Result<ChronosConfig> {
    let get = |key: &str| {
        vars.get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };
    let require = |key: &str| {
        get(key).ok_or_else(|| ChronosError::InvalidConfig(format!("{key} is required")))
    };

    let clockify = ClockifyConfig {
        api_key: require("CLOCKIFY_API_KEY")?,
        base_url: require("CLOCKIFY_BASE_URL")?,
        user_url: get("CLOCKIFY_USER_URL").unwrap_or_else(|| DEFAULT_CLOCKIFY_USER_URL.into()),
        user_id: require("CLOCKIFY_USER_ID")?,
    };
    let default_project = require("CLOCKIFY_DEFAULT_PROJECT")?;

    let linear = get("LINEAR_API_KEY").map(|api_key| LinearConfig {
        api_key,
        base_url: get("LINEAR_BASE_URL").unwrap_or_else(|| DEFAULT_LINEAR_BASE_URL.into()),
    });

    let gitlab = match (get("GITLAB_API_KEY"), get("GITLAB_USER_ID")) {
        (Some(api_key), Some(user_id)) => Some(GitlabConfig {
            api_key,
            base_url: get("GITLAB_BASE_URL").unwrap_or_else(|| DEFAULT_GITLAB_BASE_URL.into()),
            user_id,
        }),
        _ => None,
    };

    let timeout_secs = match get("CHRONOS_REQUEST_TIMEOUT_SECS") {
        Some(raw) => raw.parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
            ChronosError::InvalidConfig(format!(
                "CHRONOS_REQUEST_TIMEOUT_SECS must be a positive integer, got '{raw}'"
            ))
        })?,
        None => DEFAULT_TIMEOUT_SECS,
    };

    Ok(ChronosConfig {
        clockify,
        default_project,
        linear,
        gitlab,
        request_timeout: Duration::from_secs(timeout_secs),
    })
}
