//! Error taxonomy
//!
//! Every failure is terminal to the current attempt: configuration and asset
//! errors are raised before a session is built, store errors when the
//! leaderboard is read or written.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid user choices or an unusable asset set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Car doesn't exist. Here is the list of cars: {}", .available.join(", "))]
    UnknownCar { name: String, available: Vec<String> },

    #[error("Map doesn't exist. Here is the list of map names: {}", .available.join(", "))]
    UnknownMap { name: String, available: Vec<String> },

    #[error("Level doesn't exist. Here is the list of levels: {}", .available.join(", "))]
    UnknownDifficulty { name: String, available: Vec<String> },

    #[error("no obstacle images configured")]
    NoObstacleKinds,

    #[error("obstacle '{name}' ({width}px) does not fit in a {lane_width}px lane")]
    ObstacleTooWide {
        name: String,
        width: u32,
        lane_width: i32,
    },

    #[error("map {width}x{height} is too small for a {car_width}x{car_height} car")]
    MapTooSmall {
        width: u32,
        height: u32,
        car_width: u32,
        car_height: u32,
    },
}

/// Image files that are missing or not in a supported format
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("The file '{}' does not exist.", .0.display())]
    Missing(PathBuf),

    #[error("Incorrect image format: '{}'", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("'{}' is not a valid PNG image", .0.display())]
    NotPng(PathBuf),

    #[error("'{}' has a truncated or malformed header", .0.display())]
    MalformedHeader(PathBuf),

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Leaderboard store failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store I/O error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("record store '{}' is corrupt: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level error for the library
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_car_lists_choices() {
        let err = ConfigError::UnknownCar {
            name: "lada".into(),
            available: vec!["audi".into(), "bmw".into()],
        };
        assert_eq!(
            err.to_string(),
            "Car doesn't exist. Here is the list of cars: audi, bmw"
        );
    }

    #[test]
    fn test_config_error_converts_to_error() {
        let err: Error = ConfigError::NoObstacleKinds.into();
        assert!(matches!(err, Error::Config(ConfigError::NoObstacleKinds)));
    }
}
