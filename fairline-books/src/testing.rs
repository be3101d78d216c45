//! Fixtures shared by the unit tests.

use crate::domain::{Bookmaker, BookmakerQuote, Event, MarketType, Outcome, Side};
use crate::feed::{BookmakerRecord, EventRecord, MarketRecord, OutcomeRecord};

pub const HOME: &str = "Kansas City Chiefs";
pub const AWAY: &str = "Buffalo Bills";
pub const TOLERANCE: f64 = 0.051;

pub fn event() -> Event {
    Event {
        id: "evt-1".into(),
        sport: "americanfootball_nfl".into(),
        home: HOME.into(),
        away: AWAY.into(),
        commence_time: None,
    }
}

pub fn named(name: &str) -> Outcome {
    Outcome::Named(name.into())
}

pub fn over() -> Outcome {
    Outcome::Total(Side::Over)
}

pub fn under() -> Outcome {
    Outcome::Total(Side::Under)
}

pub fn quote(
    bookmaker: &str,
    market: MarketType,
    outcome: Outcome,
    line: Option<f64>,
    price: i32,
) -> BookmakerQuote {
    BookmakerQuote::try_new(
        Bookmaker {
            key: bookmaker.into(),
            title: bookmaker.to_uppercase(),
        },
        market,
        outcome,
        line,
        price,
    )
    .unwrap()
}

pub fn moneyline(bookmaker: &str, home_price: i32, away_price: i32) -> [BookmakerQuote; 2] {
    [
        quote(bookmaker, MarketType::Moneyline, named(HOME), None, home_price),
        quote(bookmaker, MarketType::Moneyline, named(AWAY), None, away_price),
    ]
}

pub fn total(bookmaker: &str, line: f64, over_price: i32, under_price: i32) -> [BookmakerQuote; 2] {
    [
        quote(bookmaker, MarketType::Total, over(), Some(line), over_price),
        quote(bookmaker, MarketType::Total, under(), Some(line), under_price),
    ]
}

pub fn record(bookmakers: Vec<BookmakerRecord>) -> EventRecord {
    EventRecord {
        id: "evt-1".into(),
        sport_key: "americanfootball_nfl".into(),
        commence_time: None,
        home_team: HOME.into(),
        away_team: AWAY.into(),
        bookmakers,
    }
}

pub fn book(key: &str, markets: Vec<MarketRecord>) -> BookmakerRecord {
    BookmakerRecord {
        key: key.into(),
        title: key.to_uppercase(),
        markets,
    }
}

/// A market of `(name, price, point)` outcomes.
pub fn market(key: &str, outcomes: &[(&str, f64, Option<f64>)]) -> MarketRecord {
    MarketRecord {
        key: key.into(),
        outcomes: outcomes
            .iter()
            .map(|&(name, price, point)| OutcomeRecord {
                name: name.into(),
                description: None,
                price: Some(price.into()),
                point: point.map(Into::into),
            })
            .collect(),
    }
}

pub fn h2h(home_price: f64, away_price: f64) -> MarketRecord {
    market("h2h", &[(HOME, home_price, None), (AWAY, away_price, None)])
}
