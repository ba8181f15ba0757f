//! Player choices and the validated game configuration
//!
//! Everything the user picks on the command line is checked here, before
//! any game state exists.

use crate::assets::{AssetCatalog, AssetKind, LoadedAsset};
use crate::error::{ConfigError, Result};
use crate::sim::{ObstacleKind, ObstacleKinds, Sprite, WorldSpec};
use crate::tuning::Tuning;

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Multiplier applied to speed; spawn interval divides by it
    pub fn speed_modifier(&self) -> f32 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.5,
            Difficulty::Hard => 3.0,
        }
    }

    /// Parse a user-supplied name, listing the valid levels on failure
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        Self::from_str(name).ok_or_else(|| ConfigError::UnknownDifficulty {
            name: name.to_string(),
            available: Self::ALL.iter().map(|d| d.as_str().to_string()).collect(),
        })
    }
}

/// Score text color, chosen to contrast with the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontColor {
    Black,
    White,
}

impl FontColor {
    pub fn for_map(map: &str) -> Self {
        match map {
            "winter" | "desert" => FontColor::Black,
            _ => FontColor::White,
        }
    }
}

/// Raw user choices, before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choices {
    pub nickname: String,
    pub difficulty: String,
    pub car: String,
    pub map: String,
}

impl Default for Choices {
    fn default() -> Self {
        Self {
            nickname: "User".to_string(),
            difficulty: Difficulty::Easy.as_str().to_string(),
            car: "bmw".to_string(),
            map: "winter".to_string(),
        }
    }
}

/// A fully validated session configuration
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub nickname: String,
    pub difficulty: Difficulty,
    pub car: LoadedAsset,
    pub map: LoadedAsset,
    pub obstacles: Vec<LoadedAsset>,
    pub font_color: FontColor,
    pub tuning: Tuning,
    /// Road, car and obstacle layout derived from the above
    pub world: WorldSpec,
}

impl GameConfig {
    /// Validate choices against the catalog and load every needed image
    ///
    /// Names are checked in order car, map, difficulty; the first bad one
    /// is reported.
    pub fn build(choices: &Choices, catalog: &mut AssetCatalog, tuning: Tuning) -> Result<Self> {
        if !catalog.cars.contains(&choices.car) {
            return Err(ConfigError::UnknownCar {
                name: choices.car.clone(),
                available: catalog.cars.clone(),
            }
            .into());
        }
        if !catalog.maps.contains(&choices.map) {
            return Err(ConfigError::UnknownMap {
                name: choices.map.clone(),
                available: catalog.maps.clone(),
            }
            .into());
        }
        let difficulty = Difficulty::parse(&choices.difficulty)?;

        let car = catalog.load(AssetKind::Car, &choices.car)?;
        let map = catalog.load(AssetKind::Map, &choices.map)?;
        let obstacle_names = catalog.obstacles.clone();
        let obstacles = obstacle_names
            .iter()
            .map(|name| catalog.load(AssetKind::Obstacle, name))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let kinds = ObstacleKinds::new(
            obstacles
                .iter()
                .map(|asset| ObstacleKind {
                    name: asset.name.clone(),
                    sprite: sprite_of(asset),
                })
                .collect(),
        )?;

        let world = WorldSpec::build(
            map.width,
            map.height,
            sprite_of(&car),
            kinds,
            difficulty.speed_modifier(),
            &tuning,
        )?;

        log::info!(
            "Configured {}: car={} map={} ({}x{}) difficulty={} obstacles={}",
            choices.nickname,
            car.name,
            map.name,
            map.width,
            map.height,
            difficulty.as_str(),
            obstacles.len()
        );

        Ok(Self {
            nickname: choices.nickname.clone(),
            difficulty,
            font_color: FontColor::for_map(&map.name),
            car,
            map,
            obstacles,
            tuning,
            world,
        })
    }
}

fn sprite_of(asset: &LoadedAsset) -> Sprite {
    Sprite {
        handle: asset.handle,
        width: asset.width,
        height: asset.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::TempAssets;
    use crate::error::{AssetError, Error};

    fn choices(car: &str, map: &str, difficulty: &str) -> Choices {
        Choices {
            nickname: "tester".to_string(),
            difficulty: difficulty.to_string(),
            car: car.to_string(),
            map: map.to_string(),
        }
    }

    #[test]
    fn test_difficulty_parsing() {
        assert_eq!(Difficulty::from_str("EASY"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("Medium"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("insane"), None);
    }

    #[test]
    fn test_unknown_difficulty_lists_levels() {
        let err = Difficulty::parse("insane").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Level doesn't exist. Here is the list of levels: easy, medium, hard"
        );
    }

    #[test]
    fn test_speed_modifiers() {
        let mods: Vec<f32> = Difficulty::ALL.iter().map(|d| d.speed_modifier()).collect();
        assert_eq!(mods, vec![1.0, 1.5, 3.0]);
    }

    #[test]
    fn test_font_color_by_map() {
        assert_eq!(FontColor::for_map("winter"), FontColor::Black);
        assert_eq!(FontColor::for_map("desert"), FontColor::Black);
        assert_eq!(FontColor::for_map("summer"), FontColor::White);
        assert_eq!(FontColor::for_map("spring"), FontColor::White);
        assert_eq!(FontColor::for_map("mars"), FontColor::White);
    }

    #[test]
    fn test_default_choices() {
        let c = Choices::default();
        assert_eq!(
            (c.nickname.as_str(), c.difficulty.as_str(), c.car.as_str(), c.map.as_str()),
            ("User", "easy", "bmw", "winter")
        );
    }

    #[test]
    fn test_build_valid_config() {
        let assets = TempAssets::standard("config-ok");
        let mut catalog = AssetCatalog::scan(&assets.root);
        let config =
            GameConfig::build(&choices("bmw", "winter", "medium"), &mut catalog, Tuning::default())
                .unwrap();

        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.font_color, FontColor::Black);
        assert_eq!(config.obstacles.len(), 2);
        assert_eq!((config.world.screen_width, config.world.screen_height), (800, 600));
        assert_eq!(config.world.car.velocity, 7.5);
        assert_eq!(config.world.spawn_threshold, 40);
        assert_eq!(config.world.car.pos.y, 450.0);
        assert_eq!(config.world.car.pos.x, 375.0);
    }

    #[test]
    fn test_unknown_car_lists_choices() {
        let assets = TempAssets::standard("config-car");
        let mut catalog = AssetCatalog::scan(&assets.root);
        let err = GameConfig::build(&choices("tesla", "winter", "easy"), &mut catalog, Tuning::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Car doesn't exist. Here is the list of cars: audi, bmw"
        );
    }

    #[test]
    fn test_unknown_map_checked_before_difficulty() {
        let assets = TempAssets::standard("config-map");
        let mut catalog = AssetCatalog::scan(&assets.root);
        let err = GameConfig::build(&choices("bmw", "moon", "insane"), &mut catalog, Tuning::default())
            .unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::UnknownMap { .. })));
    }

    #[test]
    fn test_no_obstacles_rejected() {
        let assets = TempAssets::new("config-empty");
        assets.add_png(AssetKind::Car, "bmw", 50, 100);
        assets.add_png(AssetKind::Map, "winter", 800, 600);
        let mut catalog = AssetCatalog::scan(&assets.root);
        let err = GameConfig::build(&Choices::default(), &mut catalog, Tuning::default()).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::NoObstacleKinds)));
    }

    #[test]
    fn test_corrupt_image_rejected() {
        let assets = TempAssets::standard("config-corrupt");
        assets.add_file(AssetKind::Obstacle, "rock.png", b"definitely not a png");
        let mut catalog = AssetCatalog::scan(&assets.root);
        let err = GameConfig::build(&Choices::default(), &mut catalog, Tuning::default()).unwrap_err();
        assert!(matches!(err, Error::Asset(AssetError::NotPng(_))));
    }

    #[test]
    fn test_oversized_obstacle_rejected() {
        let assets = TempAssets::standard("config-wide");
        assets.add_png(AssetKind::Obstacle, "bus", 300, 80);
        let mut catalog = AssetCatalog::scan(&assets.root);
        let err = GameConfig::build(&Choices::default(), &mut catalog, Tuning::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::ObstacleTooWide { ref name, .. }) if name == "bus"
        ));
    }
}
