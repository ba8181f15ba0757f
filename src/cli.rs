//! Command line interface

use std::path::PathBuf;

use clap::Parser;

use crate::settings::Choices;

/// Dodge the obstacles on a two-lane road
#[derive(Debug, Clone, Parser)]
#[command(name = "car-racing", version, about)]
pub struct Args {
    /// Name the score is recorded under
    #[arg(short = 'n', long, default_value = "User")]
    pub nickname: String,

    /// Difficulty level: easy, medium or hard
    #[arg(short = 'd', long, default_value = "easy")]
    pub difficulty: String,

    /// Car image name (from <assets>/images/cars)
    #[arg(short = 'c', long, default_value = "bmw")]
    pub car: String,

    /// Map image name (from <assets>/images/maps)
    #[arg(short = 'm', long, default_value = "winter")]
    pub map: String,

    /// Asset root directory
    #[arg(long, default_value = "resources")]
    pub assets: PathBuf,

    /// Leaderboard file
    #[arg(long, default_value = "records.json")]
    pub records: PathBuf,

    /// Optional JSON file overriding balance values
    #[arg(long)]
    pub tuning: Option<PathBuf>,

    /// Seed for obstacle placement; random when absent
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where log output goes while the terminal is in use
    #[arg(long, default_value = "car-racing.log")]
    pub log_file: PathBuf,
}

impl Args {
    /// The player choices validated by `GameConfig::build`
    pub fn choices(&self) -> Choices {
        Choices {
            nickname: self.nickname.clone(),
            difficulty: self.difficulty.clone(),
            car: self.car.clone(),
            map: self.map.clone(),
        }
    }
}
