// Runtime configuration and room catalog seeding

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    date_range::DEFAULT_DATE_FORMAT,
    model::{Room, RoomType},
    reservation_store::ReservationError,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Invalid room in catalog: {0}")]
    InvalidRoom(#[from] ReservationError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotelConfig {
    // chrono format the menu layer parses dates with
    pub date_format: String,
    // how far forward to look when the requested dates have nothing free
    pub recommendation_offset_days: i64,
}

impl Default for HotelConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            recommendation_offset_days: 7,
        }
    }
}

impl HotelConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: HotelConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.date_format.trim().is_empty() {
            return Err(ConfigError::Invalid("date_format must not be empty".into()));
        }

        if self.recommendation_offset_days == 0 {
            return Err(ConfigError::Invalid(
                "recommendation_offset_days must be non-zero".into(),
            ));
        }

        Ok(())
    }
}

// One catalog entry as it appears in a seed file
#[derive(Debug, Clone, Deserialize)]
pub struct RoomSeed {
    pub number: String,
    #[serde(default)]
    pub price: f64,
    pub room_type: RoomType,
}

impl TryFrom<RoomSeed> for Room {
    type Error = ReservationError;

    fn try_from(seed: RoomSeed) -> Result<Self, Self::Error> {
        Room::new(seed.number, seed.price, seed.room_type)
    }
}

/// Parses a JSON array of rooms, e.g.
/// `[{"number": "100", "price": 120.0, "room_type": "SINGLE"}]`.
/// A missing price means a free room.
pub fn load_room_catalog(json: &str) -> Result<Vec<Room>, ConfigError> {
    let seeds: Vec<RoomSeed> = serde_json::from_str(json)?;

    seeds
        .into_iter()
        .map(|seed| Room::try_from(seed).map_err(ConfigError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HotelConfig::default();
        assert_eq!(config.date_format, "%Y/%m/%d");
        assert_eq!(config.recommendation_offset_days, 7);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = HotelConfig::from_json(r#"{"recommendation_offset_days": 3}"#).unwrap();
        assert_eq!(config.recommendation_offset_days, 3);
        assert_eq!(config.date_format, DEFAULT_DATE_FORMAT);

        assert!(matches!(
            HotelConfig::from_json(r#"{"recommendation_offset_days": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            HotelConfig::from_json("{not json"),
            Err(ConfigError::JsonParseError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let res = HotelConfig::from_file("/definitely/not/here/hotel.json");
        assert!(matches!(res, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_load_room_catalog() {
        let rooms = load_room_catalog(
            r#"[
                {"number": "100", "price": 120.0, "room_type": "SINGLE"},
                {"number": "200", "room_type": "DOUBLE"}
            ]"#,
        )
        .unwrap();

        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].price(), 120.0);
        assert!(rooms[1].is_free());
        assert_eq!(rooms[1].room_type(), RoomType::Double);

        let negative = load_room_catalog(r#"[{"number": "1", "price": -5.0, "room_type": "SINGLE"}]"#);
        assert!(matches!(
            negative,
            Err(ConfigError::InvalidRoom(ReservationError::InvalidPrice(_)))
        ));
    }
}
