use serde::{Deserialize, Serialize};
use tictactoe_common::Mark;
use tictactoe_common::config::{
    ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer,
    config_path_next_to_exe,
};

const CONFIG_FILE_NAME: &str = "tictactoe_console_config.yaml";

pub fn get_config_manager(
    path_override: Option<&str>,
) -> ConfigManager<FileContentConfigProvider, ConsoleConfig, YamlConfigSerializer> {
    match path_override {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(config_path_next_to_exe(CONFIG_FILE_NAME)),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ConsoleConfig {
    pub human_mark: Mark,
    #[serde(default = "default_randomize_opening")]
    pub randomize_opening: bool,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_randomize_opening() -> bool {
    true
}

impl Validate for ConsoleConfig {
    fn validate(&self) -> Result<(), String> {
        if self.human_mark == Mark::Empty {
            return Err("human_mark must be X or O".to_string());
        }
        Ok(())
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            human_mark: Mark::X,
            randomize_opening: true,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_common::config::{ConfigContentProvider, ConfigSerializer};

    fn get_temp_file_path() -> String {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_tictactoe_console_config_{}.yaml", random_number));
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = ConsoleConfig::default();
        let serializer = YamlConfigSerializer::new();
        let serialized_string = serializer.serialize(&default_config).unwrap();
        let deserialized_config: ConsoleConfig = serializer.deserialize(&serialized_string).unwrap();
        assert_eq!(default_config, deserialized_config);
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_file() {
        let default_config = ConsoleConfig::default();
        let serializer = YamlConfigSerializer::new();
        let file_path = get_temp_file_path();
        let content_provider = FileContentConfigProvider::new(file_path.clone());

        let serialized_string = serializer.serialize(&default_config).unwrap();
        content_provider.set_config_content(&serialized_string).unwrap();

        let read_string = content_provider.get_config_content().unwrap().unwrap();
        let deserialized_config: ConsoleConfig = serializer.deserialize(&read_string).unwrap();
        assert_eq!(default_config, deserialized_config);

        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_partial_file_uses_field_defaults() {
        let serializer = YamlConfigSerializer::new();
        let config: ConsoleConfig = serializer.deserialize("human_mark: O\n").unwrap();
        assert_eq!(config.human_mark, Mark::O);
        assert!(config.randomize_opening);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_empty_human_mark_is_invalid() {
        let config = ConsoleConfig {
            human_mark: Mark::Empty,
            ..ConsoleConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
