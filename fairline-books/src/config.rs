//! Engine configuration. Every field has a documented default, so a configuration file need only
//! name the fields it overrides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bookmakers ranked ahead of all others when prices tie, best first.
pub const DEFAULT_PRIORITY: [&str; 12] = [
    "pinnacle",
    "draftkings",
    "fanduel",
    "betmgm",
    "williamhill_us",
    "espnbet",
    "betrivers",
    "fanatics",
    "bovada",
    "betonlineag",
    "mybookieag",
    "lowvig",
];

/// A fair estimate requires strictly more contributing bookmakers than this.
pub const DEFAULT_MIN_SAMPLE_SIZE: usize = 4;

/// Lines closer than this are treated as the same line.
pub const DEFAULT_POINT_TOLERANCE: f64 = 0.051;

/// Arbitrage is reported only when the total implied probability is below `1 - margin`.
pub const DEFAULT_ARBITRAGE_MARGIN: f64 = 0.02;

pub const DEFAULT_ARBITRAGE_STAKE: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bookmaker keys in descending priority.
    pub priority: Vec<String>,
    pub min_sample_size: usize,
    pub point_tolerance: f64,
    pub arbitrage_margin: f64,
    /// Total stake split across the two legs of an arbitrage.
    pub arbitrage_stake: f64,
    /// If set, only quotes from these bookmakers are considered.
    pub bookmakers: Option<Vec<String>>,
    /// If set, only these market keys are evaluated.
    pub markets: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            priority: DEFAULT_PRIORITY.iter().map(|&key| key.into()).collect(),
            min_sample_size: DEFAULT_MIN_SAMPLE_SIZE,
            point_tolerance: DEFAULT_POINT_TOLERANCE,
            arbitrage_margin: DEFAULT_ARBITRAGE_MARGIN,
            arbitrage_stake: DEFAULT_ARBITRAGE_STAKE,
            bookmakers: None,
            markets: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidConfig {
    #[error("point tolerance {0} must be a positive number")]
    PointTolerance(f64),

    #[error("arbitrage margin {0} must lie in [0, 1)")]
    ArbitrageMargin(f64),

    #[error("arbitrage stake {0} must be a positive number")]
    ArbitrageStake(f64),

    #[error("bookmaker '{0}' appears more than once in the priority list")]
    DuplicatePriority(String),
}

impl Config {
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if !self.point_tolerance.is_finite() || self.point_tolerance <= 0.0 {
            return Err(InvalidConfig::PointTolerance(self.point_tolerance));
        }
        if !(0.0..1.0).contains(&self.arbitrage_margin) {
            return Err(InvalidConfig::ArbitrageMargin(self.arbitrage_margin));
        }
        if !self.arbitrage_stake.is_finite() || self.arbitrage_stake <= 0.0 {
            return Err(InvalidConfig::ArbitrageStake(self.arbitrage_stake));
        }
        Ok(())
    }

    pub fn includes_bookmaker(&self, key: &str) -> bool {
        includes(&self.bookmakers, key)
    }

    pub fn includes_market(&self, key: &str) -> bool {
        includes(&self.markets, key)
    }
}

fn includes(filter: &Option<Vec<String>>, key: &str) -> bool {
    filter
        .as_ref()
        .map(|keys| keys.iter().any(|included| included == key))
        .unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(4, config.min_sample_size);
        assert_eq!(0.051, config.point_tolerance);
        assert_eq!(0.02, config.arbitrage_margin);
        assert_eq!("pinnacle", config.priority[0]);
        config.validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: Config = serde_json::from_str(
            r#"{ "priority": ["fanduel", "draftkings"], "min_sample_size": 2 }"#,
        )
        .unwrap();
        assert_eq!(vec!["fanduel", "draftkings"], config.priority);
        assert_eq!(2, config.min_sample_size);
        assert_eq!(DEFAULT_POINT_TOLERANCE, config.point_tolerance);
        assert_eq!(None, config.bookmakers);
    }

    #[test]
    fn invalid_values() {
        let config = Config {
            point_tolerance: 0.0,
            ..Config::default()
        };
        assert_eq!(
            "point tolerance 0 must be a positive number",
            config.validate().unwrap_err().to_string()
        );

        let config = Config {
            arbitrage_margin: -0.01,
            ..Config::default()
        };
        assert_eq!(
            Err(InvalidConfig::ArbitrageMargin(-0.01)),
            config.validate()
        );

        let config = Config {
            arbitrage_stake: f64::NAN,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(InvalidConfig::ArbitrageStake(_))
        ));
    }

    #[test]
    fn filters() {
        let config = Config {
            bookmakers: Some(vec!["fanduel".into()]),
            ..Config::default()
        };
        assert!(config.includes_bookmaker("fanduel"));
        assert!(!config.includes_bookmaker("draftkings"));
        assert!(config.includes_market("totals"));
    }
}
