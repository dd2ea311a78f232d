use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::games::snake::{AutopilotKind, SnakeSettings, TimingSettings};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "snake_game_server_config.yaml";

pub fn default_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn get_config_manager(
    path: &str,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize, Clone)]
pub struct SessionConfig {
    pub autopilot: Option<AutopilotKind>,
    #[serde(default)]
    pub auto_restart: bool,
    pub seed: Option<u64>,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    pub prefix: Option<String>,
    #[serde(default)]
    pub verbose: bool,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub snake: SnakeSettings,
    pub timing: TimingSettings,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.snake.validate()?;
        self.timing.validate()?;
        if let Some(prefix) = &self.logging.prefix
            && prefix.trim().is_empty()
        {
            return Err("logging prefix must not be blank".to_string());
        }
        Ok(())
    }
}
