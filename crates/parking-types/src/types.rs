//! Shared value types

use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Output format for results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Vehicle category a parking spot accepts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParkingType {
    Car,
    Bike,
}

impl ParkingType {
    /// Map an operator menu selection (1 = car, 2 = bike)
    pub fn from_selection(selection: i32) -> Option<Self> {
        match selection {
            1 => Some(ParkingType::Car),
            2 => Some(ParkingType::Bike),
            _ => None,
        }
    }

    /// Menu code for this type
    pub fn selection(self) -> i32 {
        match self {
            ParkingType::Car => 1,
            ParkingType::Bike => 2,
        }
    }

    /// Column value stored in `parking_spot.type`
    pub fn as_str(self) -> &'static str {
        match self {
            ParkingType::Car => "CAR",
            ParkingType::Bike => "BIKE",
        }
    }
}

impl std::fmt::Display for ParkingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParkingType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CAR" => Ok(ParkingType::Car),
            "BIKE" => Ok(ParkingType::Bike),
            _ => Err(Error::UnknownParkingType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_codes() {
        assert_eq!(ParkingType::from_selection(1), Some(ParkingType::Car));
        assert_eq!(ParkingType::from_selection(2), Some(ParkingType::Bike));
        assert_eq!(ParkingType::from_selection(3), None);
        assert_eq!(ParkingType::from_selection(-1), None);
        assert_eq!(ParkingType::Bike.selection(), 2);
    }

    #[test]
    fn test_parse_column_value() {
        assert_eq!("CAR".parse::<ParkingType>().unwrap(), ParkingType::Car);
        assert_eq!("bike".parse::<ParkingType>().unwrap(), ParkingType::Bike);
    }

    #[test]
    fn test_parse_unknown_type() {
        let err = "SPACESHIP".parse::<ParkingType>().unwrap_err();
        assert!(matches!(err, Error::UnknownParkingType(ref s) if s == "SPACESHIP"));
    }

    #[test]
    fn test_serde_uses_column_names() {
        let json = serde_json::to_string(&ParkingType::Car).unwrap();
        assert_eq!(json, "\"CAR\"");
    }
}
