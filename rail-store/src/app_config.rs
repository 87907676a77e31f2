use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use rail_shared::Section;
use serde::Deserialize;
use std::collections::HashSet;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub booking: BookingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 50051 }

#[derive(Debug, Deserialize, Clone)]
pub struct BookingConfig {
    #[serde(default = "default_seats_per_section")]
    pub seats_per_section: u32,
    #[serde(default = "default_sections")]
    pub sections: Vec<String>,
    #[serde(default = "default_ticket_price")]
    pub ticket_price: f64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            seats_per_section: default_seats_per_section(),
            sections: default_sections(),
            ticket_price: default_ticket_price(),
        }
    }
}

fn default_seats_per_section() -> u32 { 50 }
fn default_sections() -> Vec<String> { vec!["A".to_string(), "B".to_string()] }
fn default_ticket_price() -> f64 { 20.0 }

impl BookingConfig {
    pub fn sections(&self) -> Vec<Section> {
        self.sections.iter().map(|name| Section::new(name.as_str())).collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seats_per_section == 0 {
            return Err(ConfigError::Message("booking.seats_per_section must be greater than zero".into()));
        }
        if self.sections.is_empty() {
            return Err(ConfigError::Message("booking.sections must name at least one section".into()));
        }

        let mut seen = HashSet::new();
        for name in &self.sections {
            if name.trim().is_empty() {
                return Err(ConfigError::Message("booking.sections contains an empty name".into()));
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::Message(format!("booking.sections lists {} twice", name)));
            }
        }

        if !self.ticket_price.is_finite() || self.ticket_price < 0.0 {
            return Err(ConfigError::Message("booking.ticket_price must be a non-negative amount".into()));
        }

        Ok(())
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_dir("config")
    }

    pub fn load_from_dir(dir: &str) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = config::Config::builder()
            // Every key has a default, so even the base file is optional
            .add_source(config::File::with_name(&format!("{}/default", dir)).required(false))
            .add_source(config::File::with_name(&format!("{}/{}", dir, run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name(&format!("{}/local", dir)).required(false))
            // Eg. `RAIL__BOOKING__SEATS_PER_SECTION=80` or `RAIL__BOOKING__SECTIONS=A,B,C`
            .add_source(
                config::Environment::with_prefix("RAIL")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("booking.sections")
                    .try_parsing(true),
            );

        Self::finish(builder)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.booking.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn from_toml(toml: &str) -> Result<Config, ConfigError> {
        Config::finish(config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    #[test]
    fn test_defaults_without_files() {
        let config = from_toml("").unwrap();
        assert_eq!(config.server.port, 50051);
        assert_eq!(config.booking.seats_per_section, 50);
        assert_eq!(config.booking.sections, vec!["A", "B"]);
        assert_eq!(config.booking.ticket_price, 20.0);
    }

    #[test]
    fn test_overrides_from_file() {
        let config = from_toml(
            r#"
            [server]
            port = 6000

            [booking]
            seats_per_section = 4
            sections = ["A", "B", "C"]
            "#,
        )
        .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 6000);
        assert_eq!(config.booking.sections().len(), 3);
        assert_eq!(config.booking.seats_per_section, 4);
    }

    #[test]
    fn test_environment_overrides() {
        env::set_var("RAIL__BOOKING__SECTIONS", "A,B,C");
        env::set_var("RAIL__BOOKING__SEATS_PER_SECTION", "7");
        let loaded = Config::load_from_dir("does-not-exist");
        env::remove_var("RAIL__BOOKING__SECTIONS");
        env::remove_var("RAIL__BOOKING__SEATS_PER_SECTION");

        let config = loaded.unwrap();
        assert_eq!(config.booking.sections, vec!["A", "B", "C"]);
        assert_eq!(config.booking.seats_per_section, 7);
        assert_eq!(config.server.port, 50051);
    }

    #[test]
    fn test_override_to_zero_seats_fails_validation() {
        let mut config = from_toml("").unwrap();
        config.booking.seats_per_section = 0;
        assert!(config.booking.validate().is_err());
    }

    #[test]
    fn test_rejects_invalid_booking_rules() {
        assert!(from_toml("[booking]\nseats_per_section = 0").is_err());
        assert!(from_toml("[booking]\nsections = []").is_err());
        assert!(from_toml("[booking]\nsections = [\"A\", \"A\"]").is_err());
        assert!(from_toml("[booking]\nticket_price = -1.0").is_err());
    }
}
