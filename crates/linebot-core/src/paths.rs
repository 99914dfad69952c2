//! Path resolution utilities.

use crate::env;
use crate::error::ConfigError;
use std::path::PathBuf;

/// Get the linebot base directory (~/.linebot).
pub fn base_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or_else(|| {
        ConfigError::Validation("Could not determine home directory".to_string())
    })?;
    Ok(home.join(".linebot"))
}

/// Get the config file path.
///
/// `LINEBOT_CONFIG` wins over the default `~/.linebot/linebot.json5`.
pub fn config_file() -> Result<PathBuf, ConfigError> {
    if let Some(path) = env::get_var(env::vars::LINEBOT_CONFIG) {
        return Ok(PathBuf::from(path));
    }
    Ok(base_dir()?.join("linebot.json5"))
}

/// Directory where downloaded content is written by default.
pub fn downloads_dir() -> Result<PathBuf, ConfigError> {
    Ok(base_dir()?.join("downloads"))
}

/// Ensure the base directories exist.
pub fn ensure_dirs() -> Result<(), ConfigError> {
    for dir in [base_dir()?, downloads_dir()?] {
        if !dir.exists() {
            std::fs::create_dir_all(&dir)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let base = base_dir().unwrap();
        assert!(base.ends_with(".linebot"));
        assert!(downloads_dir().unwrap().starts_with(&base));
    }
}
