#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use tempfile::tempdir;

    use crate::app::SessionSettings;
    use crate::config::Config;
    use crate::config::loader::{ConfigError, load_config_from_path, save_config_to_path};
    use crate::game::{MAX_FALL_SPEED_MS, MAX_GRID_SIZE, MAX_LOOKAHEAD, MAX_SPEED_MULTIPLIER};
    use std::time::Duration;

    // Helper function to create a test config path
    fn create_test_config_path() -> (tempfile::TempDir, PathBuf) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("nested").join("config.toml");
        (temp_dir, config_path)
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.grid.width, 10);
        assert_eq!(config.grid.height, 20);
        assert_eq!(config.timing.base_fall_speed_ms, 1000);
        assert_eq!(config.timing.speed_multiplier, 5);
        assert_eq!(config.gameplay.lookahead, 4);
        assert_eq!(config.gameplay.combo_bonus, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_nonexistent_config_writes_default() {
        let (_temp_dir, config_path) = create_test_config_path();

        let config = load_config_from_path(&config_path).expect("Failed to load default config");

        assert!(config_path.exists(), "Config file should have been created");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (_temp_dir, config_path) = create_test_config_path();

        let mut config = Config::default();
        config.grid.width = 12;
        config.timing.fps = 30;
        config.audio.soundtrack = 2;
        config.keymap.hold = "x".into();
        config.window.background = [0, 0, 0];
        save_config_to_path(&config, &config_path).expect("Failed to save config");

        let loaded = load_config_from_path(&config_path).expect("Failed to load config");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let (temp_dir, _) = create_test_config_path();
        let config_path = temp_dir.path().join("partial.toml");
        fs::write(&config_path, "[grid]\nwidth = 8\n").unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.grid.width, 8);
        assert_eq!(config.grid.height, 20);
        assert_eq!(config.keymap.pause, "p");
    }

    #[test]
    fn test_malformed_config_is_rejected() {
        let (temp_dir, _) = create_test_config_path();
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "[grid\nwidth = ").unwrap();

        assert!(matches!(
            load_config_from_path(&config_path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut config = Config::default();
        config.grid.width = 3;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.timing.fps = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.audio.soundtrack = 3;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.audio.effects_volume = 129;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.keymap.quit = "Left".into();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_oversized_values_are_rejected() {
        let mut config = Config::default();
        config.timing.base_fall_speed_ms = u64::MAX;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.timing.speed_multiplier = 4000;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.grid.width = 1_000_000;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.grid.height = usize::MAX;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.gameplay.lookahead = usize::MAX;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        // Upper bounds themselves are accepted
        let mut config = Config::default();
        config.timing.base_fall_speed_ms = MAX_FALL_SPEED_MS;
        config.timing.speed_multiplier = MAX_SPEED_MULTIPLIER;
        config.grid.width = MAX_GRID_SIZE;
        config.gameplay.lookahead = MAX_LOOKAHEAD;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_file_is_rejected_on_load() {
        let (temp_dir, _) = create_test_config_path();
        let config_path = temp_dir.path().join("zero.toml");
        fs::write(&config_path, "[timing]\nlogic_tick_ms = 0\n").unwrap();

        assert!(matches!(
            load_config_from_path(&config_path),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_session_settings_from_config() {
        let mut config = Config::default();
        config.timing.base_fall_speed_ms = 800;
        config.gameplay.combo_bonus = 75;

        let settings = SessionSettings::from(&config);
        assert_eq!(settings.base_fall_speed, Duration::from_millis(800));
        assert_eq!(settings.rules.combo_bonus, 75);
        assert_eq!(settings.width, 10);
        assert_eq!(config.timing.frame_interval(), Duration::from_secs(1) / 60);
    }
}
