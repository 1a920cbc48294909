//! Configuration management for parking-system
//!
//! Config stored at: ~/.config/parking-system/config.json

use std::path::{Path, PathBuf};

use parking_domain::service::FareSchedule;
use parking_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file override
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Hourly rate charged for car spots
    #[serde(default = "default_car_rate")]
    pub car_rate_per_hour: f64,

    /// Hourly rate charged for bike spots
    #[serde(default = "default_bike_rate")]
    pub bike_rate_per_hour: f64,

    /// Free parking period in minutes
    #[serde(default = "default_free_minutes")]
    pub free_minutes: u32,

    /// Multiplier applied to recurring users' fares
    #[serde(default = "default_discount_factor")]
    pub discount_factor: f64,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,
}

fn default_car_rate() -> f64 {
    parking_domain::service::fare_calculator::CAR_RATE_PER_HOUR
}

fn default_bike_rate() -> f64 {
    parking_domain::service::fare_calculator::BIKE_RATE_PER_HOUR
}

fn default_free_minutes() -> u32 {
    30
}

fn default_discount_factor() -> f64 {
    parking_domain::service::fare_calculator::RECURRING_DISCOUNT_FACTOR
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            car_rate_per_hour: default_car_rate(),
            bike_rate_per_hour: default_bike_rate(),
            free_minutes: default_free_minutes(),
            discount_factor: default_discount_factor(),
            output_format: default_output_format(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("parking-system");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the database file path
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.database_path {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join("parking-system");
        Ok(data_dir.join("parking.db"))
    }

    /// Build the fare schedule, rejecting nonsensical values
    pub fn fare_schedule(&self) -> Result<FareSchedule> {
        for (name, rate) in [
            ("car_rate_per_hour", self.car_rate_per_hour),
            ("bike_rate_per_hour", self.bike_rate_per_hour),
        ] {
            if !rate.is_finite() || rate < 0.0 {
                return Err(ConfigError::InvalidValue(format!("{} = {}", name, rate)).into());
            }
        }
        if !self.discount_factor.is_finite()
            || self.discount_factor <= 0.0
            || self.discount_factor > 1.0
        {
            return Err(ConfigError::InvalidValue(format!(
                "discount_factor = {} (expected 0 < factor <= 1)",
                self.discount_factor
            ))
            .into());
        }

        Ok(FareSchedule {
            car_rate_per_hour: self.car_rate_per_hour,
            bike_rate_per_hour: self.bike_rate_per_hour,
            free_period_hours: f64::from(self.free_minutes) / 60.0,
            discount_factor: self.discount_factor,
        })
    }

    /// Load config from the default location, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from a file, or default if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save config to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Parking System Configuration")?;
        writeln!(f, "============================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Database:        {}",
            self.database_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Car rate:        {:.2} / hour", self.car_rate_per_hour)?;
        writeln!(f, "Bike rate:       {:.2} / hour", self.bike_rate_per_hour)?;
        writeln!(f, "Free period:     {} min", self.free_minutes)?;
        writeln!(f, "Discount factor: {}", self.discount_factor)?;
        writeln!(f, "Output format:   {}", self.output_format)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:     {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_types::Error;
    use tempfile::tempdir;

    #[test]
    fn test_default_schedule_matches_constants() {
        let schedule = Config::default().fare_schedule().unwrap();
        assert_eq!(schedule, FareSchedule::default());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = serde_json::from_str(r#"{"car_rate_per_hour": 2.0}"#).unwrap();
        assert_eq!(config.car_rate_per_hour, 2.0);
        assert_eq!(config.free_minutes, 30);
        assert_eq!(config.output_format, OutputFormat::Table);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("conf").join("config.json");
        let config = Config {
            database_path: Some(dir.path().join("lot.db")),
            bike_rate_per_hour: 0.5,
            output_format: OutputFormat::Json,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.database_path().unwrap(), dir.path().join("lot.db"));
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(Error::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_invalid_rates_rejected() {
        let config = Config {
            car_rate_per_hour: -1.0,
            ..Config::default()
        };
        assert!(config.fare_schedule().is_err());

        let config = Config {
            discount_factor: 1.5,
            ..Config::default()
        };
        assert!(config.fare_schedule().is_err());
    }

    #[test]
    fn test_free_minutes_to_hours() {
        let config = Config {
            free_minutes: 45,
            ..Config::default()
        };
        assert!((config.fare_schedule().unwrap().free_period_hours - 0.75).abs() < f64::EPSILON);
    }
}
