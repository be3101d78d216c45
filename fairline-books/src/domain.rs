use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fairline::market::MarketPrice;
use fairline::odds;
use fairline::odds::InvalidOdds;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub sport: String,
    pub home: String,
    pub away: String,
    pub commence_time: Option<DateTime<Utc>>,
}
impl Event {
    /// The other participant of a head-to-head event.
    pub fn opponent(&self, participant: &str) -> Option<&str> {
        if participant == self.home {
            Some(&self.away)
        } else if participant == self.away {
            Some(&self.home)
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MarketType {
    Moneyline,
    Spread,
    Total,
    PlayerProp(String),
    Other(String),
}
impl MarketType {
    pub fn from_key(key: &str) -> Self {
        match key {
            "h2h" => MarketType::Moneyline,
            "spreads" => MarketType::Spread,
            "totals" => MarketType::Total,
            _ if key.starts_with("player_") => MarketType::PlayerProp(key.into()),
            _ => MarketType::Other(key.into()),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            MarketType::Moneyline => "h2h",
            MarketType::Spread => "spreads",
            MarketType::Total => "totals",
            MarketType::PlayerProp(key) | MarketType::Other(key) => key,
        }
    }

    /// Whether every outcome of this market must carry a line.
    pub fn requires_line(&self) -> bool {
        matches!(
            self,
            MarketType::Spread | MarketType::Total | MarketType::PlayerProp(_)
        )
    }

    /// The line at which the complementary outcome is quoted, if this market pairs its outcomes.
    pub fn complement_line(&self, line: Option<f64>) -> Option<Option<f64>> {
        match self {
            MarketType::Moneyline => Some(None),
            MarketType::Spread => line.map(|line| Some(-line)),
            MarketType::Total | MarketType::PlayerProp(_) => line.map(Some),
            MarketType::Other(_) => None,
        }
    }
}

impl Display for MarketType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MarketType::Moneyline => write!(f, "Moneyline"),
            MarketType::Spread => write!(f, "Spread"),
            MarketType::Total => write!(f, "Total"),
            MarketType::PlayerProp(key) => write!(f, "Player prop ({key})"),
            MarketType::Other(key) => write!(f, "Other ({key})"),
        }
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Over,
    Under,
}
impl Side {
    pub fn parse(label: &str) -> Option<Side> {
        if label.eq_ignore_ascii_case("over") {
            Some(Side::Over)
        } else if label.eq_ignore_ascii_case("under") {
            Some(Side::Under)
        } else {
            None
        }
    }

    pub fn flip(&self) -> Side {
        match self {
            Side::Over => Side::Under,
            Side::Under => Side::Over,
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Over => write!(f, "Over"),
            Side::Under => write!(f, "Under"),
        }
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Outcome {
    /// A participant, or any other named outcome such as a draw.
    Named(String),
    Total(Side),
    Player(String, Side),
}
impl Outcome {
    /// Classifies an outcome label. `description` carries the player's name in prop markets.
    pub fn parse(name: &str, description: Option<&str>) -> Self {
        let description = description.map(str::trim).filter(|description| !description.is_empty());
        match (Side::parse(name.trim()), description) {
            (Some(side), Some(player)) => Outcome::Player(player.into(), side),
            (Some(side), None) => Outcome::Total(side),
            (None, _) => Outcome::Named(name.trim().into()),
        }
    }

    /// The opposite side of a two-way proposition.
    pub fn complement(&self, event: &Event) -> Option<Outcome> {
        match self {
            Outcome::Named(name) => event
                .opponent(name)
                .map(|opponent| Outcome::Named(opponent.into())),
            Outcome::Total(side) => Some(Outcome::Total(side.flip())),
            Outcome::Player(player, side) => Some(Outcome::Player(player.clone(), side.flip())),
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Named(name) => write!(f, "{name}"),
            Outcome::Total(side) => write!(f, "{side}"),
            Outcome::Player(player, side) => write!(f, "{player} {side}"),
        }
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmaker {
    pub key: String,
    pub title: String,
}

/// A single price offered by one bookmaker on one outcome. Constructed through
/// [BookmakerQuote::try_new], which rejects zero prices and those closer to zero than +/-100.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BookmakerQuote {
    pub bookmaker: Bookmaker,
    pub market: MarketType,
    pub outcome: Outcome,
    pub line: Option<f64>,
    /// American odds.
    pub price: i32,
    decimal: f64,
}
impl BookmakerQuote {
    pub fn try_new(
        bookmaker: Bookmaker,
        market: MarketType,
        outcome: Outcome,
        line: Option<f64>,
        price: i32,
    ) -> Result<Self, InvalidOdds> {
        let decimal = odds::american_to_decimal(odds::check_american_price(price as f64)?)?;
        Ok(Self {
            bookmaker,
            market,
            outcome,
            line,
            price,
            decimal,
        })
    }

    /// Implied probability of the quoted price, bookmaker margin included.
    pub fn implied_probability(&self) -> f64 {
        1.0 / self.decimal
    }
}

impl MarketPrice for BookmakerQuote {
    fn decimal(&self) -> f64 {
        self.decimal
    }
}
