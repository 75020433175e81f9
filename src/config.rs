use crate::errors::{WayfinderError, WayfinderResult};
use crate::resources::WayfinderConfig;
use bevy::log::warn;
use std::fs;
use std::path::{Path, PathBuf};

pub mod range_types;

pub fn get_config_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push("wayfinder");
    fs::create_dir_all(&path).ok()?;
    path.push("config.toml");
    Some(path)
}

/// Load the user config, falling back to defaults when it is missing or unreadable
pub fn load_config() -> WayfinderConfig {
    let Some(config_path) = get_config_path() else {
        return WayfinderConfig::default();
    };
    if !config_path.exists() {
        return WayfinderConfig::default();
    }

    match load_config_from(&config_path) {
        Ok(config) => config,
        Err(err) => {
            warn!("Ignoring config at {}: {err}", config_path.display());
            WayfinderConfig::default()
        }
    }
}

/// Load and validate a config file at an explicit path
pub fn load_config_from(path: &Path) -> WayfinderResult<WayfinderConfig> {
    let contents = fs::read_to_string(path)?;
    let config = toml::from_str::<WayfinderConfig>(&contents)?;
    config.settings.check()?;
    Ok(config)
}

pub fn save_config(config: &WayfinderConfig) -> WayfinderResult<()> {
    let config_path = get_config_path().ok_or(WayfinderError::ConfigDirNotFound)?;
    save_config_to(config, &config_path)
}

pub fn save_config_to(config: &WayfinderConfig, path: &Path) -> WayfinderResult<()> {
    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::coordinates::GridCoord;

    fn scratch_file(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("wayfinder-{}-{name}", std::process::id()));
        path
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = scratch_file("round_trip.toml");
        let mut config = WayfinderConfig::default();
        config.settings.seed = 4242;
        config.settings.agent_start = GridCoord::new(10, 20);

        save_config_to(&config, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded, config);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_invalid_settings_are_rejected_on_load() {
        let path = scratch_file("invalid.toml");
        fs::write(&path, "[settings]\nwidth = 0\n").unwrap();

        let result = load_config_from(&path);
        assert!(matches!(result, Err(WayfinderError::InvalidConfig { .. })));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_malformed_toml_is_reported() {
        let path = scratch_file("malformed.toml");
        fs::write(&path, "[settings\nseed = ").unwrap();

        let result = load_config_from(&path);
        assert!(matches!(result, Err(WayfinderError::DeserializationFailed(_))));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_config_from(&scratch_file("does-not-exist.toml"));
        assert!(matches!(result, Err(WayfinderError::Io(_))));
    }
}
