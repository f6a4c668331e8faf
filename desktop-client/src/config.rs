use serde::{Deserialize, Serialize};
use std::time::Duration;
use tictactoe_common::Mark;
use tictactoe_common::config::{
    ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer,
    config_path_next_to_exe,
};

const CONFIG_FILE_NAME: &str = "tictactoe_desktop_config.yaml";
const MAX_AI_DELAY_MS: u64 = 5000;

pub fn get_config_manager(
    path_override: Option<&str>,
) -> ConfigManager<FileContentConfigProvider, DesktopConfig, YamlConfigSerializer> {
    match path_override {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(config_path_next_to_exe(CONFIG_FILE_NAME)),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct DesktopConfig {
    pub human_mark: Mark,
    pub ai_delay_ms: u64,
    pub randomize_opening: bool,
}

impl DesktopConfig {
    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
    }
}

impl Validate for DesktopConfig {
    fn validate(&self) -> Result<(), String> {
        if self.human_mark == Mark::Empty {
            return Err("human_mark must be X or O".to_string());
        }
        if self.ai_delay_ms > MAX_AI_DELAY_MS {
            return Err(format!(
                "ai_delay_ms must not exceed {} ms",
                MAX_AI_DELAY_MS
            ));
        }
        Ok(())
    }
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            human_mark: Mark::X,
            ai_delay_ms: 500,
            randomize_opening: true,
        }
    }
}
