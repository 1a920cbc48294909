//! Parking lot layout loader from TOML
//!
//! ```toml
//! [[spot]]
//! id = 1
//! type = "CAR"
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use parking_domain::model::ParkingSpot;
use parking_types::{ConfigError, Error, ParkingType, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct LayoutFile {
    #[serde(rename = "spot", default)]
    spots: Vec<SpotEntry>,
}

#[derive(Debug, Deserialize)]
struct SpotEntry {
    id: i32,
    #[serde(rename = "type")]
    parking_type: ParkingType,
}

/// Fixed spot inventory of a parking lot
#[derive(Debug, Clone, PartialEq)]
pub struct SpotLayout {
    spots: Vec<ParkingSpot>,
}

impl Default for SpotLayout {
    /// Three car spots followed by two bike spots
    fn default() -> Self {
        Self::from_counts(3, 2)
    }
}

impl SpotLayout {
    /// `cars` car spots numbered from 1, then `bikes` bike spots
    pub fn from_counts(cars: u16, bikes: u16) -> Self {
        let last_car = i32::from(cars);
        let last_bike = last_car + i32::from(bikes);
        let cars = (1..=last_car).map(|id| ParkingSpot::new(id, ParkingType::Car, true));
        let bikes =
            (last_car + 1..=last_bike).map(|id| ParkingSpot::new(id, ParkingType::Bike, true));
        let spots = cars.chain(bikes).collect();
        Self { spots }
    }

    /// Load a layout from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to read layout file {}: {}",
                path.display(),
                e
            )))
        })?;

        Self::load_from_str(&content)
    }

    /// Load a layout from a TOML string
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let file: LayoutFile = toml::from_str(toml_content)?;

        if file.spots.is_empty() {
            return Err(Error::InvalidLayout("layout has no spots".to_string()));
        }

        let mut seen = HashSet::new();
        for entry in &file.spots {
            if entry.id <= 0 {
                return Err(Error::InvalidLayout(format!(
                    "spot id must be positive, got {}",
                    entry.id
                )));
            }
            if !seen.insert(entry.id) {
                return Err(Error::InvalidLayout(format!("duplicate spot id {}", entry.id)));
            }
        }

        let mut spots: Vec<ParkingSpot> = file
            .spots
            .into_iter()
            .map(|e| ParkingSpot::new(e.id, e.parking_type, true))
            .collect();
        spots.sort_by_key(|s| s.id);

        Ok(Self { spots })
    }

    pub fn spots(&self) -> &[ParkingSpot] {
        &self.spots
    }

    pub fn count(&self, parking_type: ParkingType) -> usize {
        self.spots
            .iter()
            .filter(|s| s.parking_type == parking_type)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_TOML: &str = r#"
[[spot]]
id = 2
type = "BIKE"

[[spot]]
id = 1
type = "CAR"

[[spot]]
id = 3
type = "CAR"
"#;

    #[test]
    fn test_default_layout() {
        let layout = SpotLayout::default();
        assert_eq!(layout.spots().len(), 5);
        assert_eq!(layout.count(ParkingType::Car), 3);
        assert_eq!(layout.count(ParkingType::Bike), 2);
        assert_eq!(layout.spots()[3], ParkingSpot::new(4, ParkingType::Bike, true));
    }

    #[test]
    fn test_from_counts_numbers_past_u16() {
        let layout = SpotLayout::from_counts(u16::MAX, u16::MAX);
        let spots = layout.spots();
        assert_eq!(spots.len(), 2 * usize::from(u16::MAX));
        let first_bike = &spots[usize::from(u16::MAX)];
        assert_eq!(*first_bike, ParkingSpot::new(65_536, ParkingType::Bike, true));
        assert_eq!(spots.last().unwrap().id, 131_070);
    }

    #[test]
    fn test_load_from_str_sorts_by_id() {
        let layout = SpotLayout::load_from_str(TEST_TOML).unwrap();
        let ids: Vec<i32> = layout.spots().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(layout.count(ParkingType::Car), 2);
        assert!(layout.spots().iter().all(|s| s.available));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let toml = "[[spot]]\nid = 1\ntype = \"CAR\"\n[[spot]]\nid = 1\ntype = \"BIKE\"\n";
        let err = SpotLayout::load_from_str(toml).unwrap_err();
        assert!(matches!(err, Error::InvalidLayout(_)));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let toml = "[[spot]]\nid = 1\ntype = \"TRUCK\"\n";
        assert!(matches!(SpotLayout::load_from_str(toml), Err(Error::Toml(_))));
    }

    #[test]
    fn test_empty_layout_rejected() {
        assert!(matches!(SpotLayout::load_from_str(""), Err(Error::InvalidLayout(_))));
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = SpotLayout::load_from_file(Path::new("/nonexistent/layout.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ParseError(_))));
    }
}
