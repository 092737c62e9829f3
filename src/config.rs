use config::{Config, ConfigError, Environment, File, FileFormat};
use pindrive_gpio::MotorPins;
use serde::Deserialize;
use tracing::{error, info};

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
const ENV_PREFIX: &str = "PINDRIVE";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub motor: MotorSettings,
    #[serde(default)]
    pub run: RunSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MotorSettings {
    #[serde(default = "default_motor_name")]
    pub name: String,
    #[serde(default)]
    pub pins: MotorPins,
}

/// How the demo sequence is played back.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Delay between two commands, in milliseconds.
    pub step_ms: u64,
    /// Commands in the text form accepted by `Command::from_str`.
    pub sequence: Vec<String>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            step_ms: 250,
            sequence: Vec::new(),
        }
    }
}

fn default_motor_name() -> String {
    "motor".to_string()
}

/// Load settings from `config/default.toml`, overridden by `PINDRIVE__*`
/// environment variables (e.g. `PINDRIVE__MOTOR__PINS__SPEED=5`).
pub fn load_config() -> Result<Settings, ConfigError> {
    info!("Attempting to load configuration from {}", DEFAULT_CONFIG_PATH);

    let settings = Config::builder()
        .add_source(File::new(DEFAULT_CONFIG_PATH, FileFormat::Toml).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()
        .and_then(|config| config.try_deserialize::<Settings>());

    match settings {
        Ok(settings) => {
            info!("Successfully loaded configuration: {:?}", settings);
            Ok(settings)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(text: &str) -> Result<Settings, ConfigError> {
        Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_full_settings() {
        let settings = from_toml(
            r#"
            [motor]
            name = "pump"
            [motor.pins]
            speed = "3"
            direction = "5"
            [run]
            step_ms = 10
            sequence = ["on", "speed 40"]
            "#,
        )
        .unwrap();

        assert_eq!(settings.motor.name, "pump");
        assert_eq!(settings.motor.pins, MotorPins::new().with_speed("3").with_direction("5"));
        assert_eq!(settings.run.step_ms, 10);
        assert_eq!(settings.run.sequence, vec!["on", "speed 40"]);
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let settings = from_toml("[motor.pins]\nspeed = \"3\"\n").unwrap();
        assert_eq!(settings.motor.name, "motor");
        assert_eq!(settings.motor.pins, MotorPins::new().with_speed("3"));
        assert_eq!(settings.run.step_ms, 250);
        assert!(settings.run.sequence.is_empty());
    }

    #[test]
    fn test_missing_motor_section_is_an_error() {
        assert!(from_toml("[run]\nstep_ms = 5\n").is_err());
    }
}
