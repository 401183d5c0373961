use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_DELIMITER: &str = "/ 80";
pub const DEFAULT_CORRECT_MARKER: &str = "Correct";

const CONFIG_FILE: &str = "config.json";
const STATE_FILE: &str = "state.json";
const QUESTIONS_FILE: &str = "questions.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub questions_path: PathBuf,
    pub delimiter: String,
    pub correct_marker: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            questions_path: get_app_dir().join(QUESTIONS_FILE),
            delimiter: DEFAULT_DELIMITER.to_string(),
            correct_marker: DEFAULT_CORRECT_MARKER.to_string(),
        }
    }
}

pub fn get_app_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".config").join("mockexam")
}

pub fn get_config_path() -> PathBuf {
    get_app_dir().join(CONFIG_FILE)
}

pub fn get_state_path() -> PathBuf {
    get_app_dir().join(STATE_FILE)
}

pub fn load_config() -> AppConfig {
    let path = get_config_path();
    if !path.exists() {
        return AppConfig::default();
    }

    match fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
            log::warn!("ignoring unreadable {}: {}", path.display(), e);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

pub fn save_config(config: &AppConfig) -> Result<(), std::io::Error> {
    let path = get_config_path();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = serde_json::to_string_pretty(config)?;
    fs::write(path, contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.delimiter, "/ 80");
        assert_eq!(config.correct_marker, "Correct");
        assert!(config.questions_path.ends_with("mockexam/questions.json"));
    }

    #[test]
    fn test_paths_share_app_dir() {
        assert_eq!(get_config_path().parent(), Some(get_app_dir().as_path()));
        assert_eq!(get_state_path().parent(), Some(get_app_dir().as_path()));
    }
}
