//! Event records as delivered by an odds feed: events carry bookmakers, bookmakers carry markets
//! and markets carry outcomes. Records are deserialised leniently; anything that cannot be turned
//! into a [BookmakerQuote] is skipped when quotes are extracted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::trace;

use crate::domain::{Bookmaker, BookmakerQuote, Event, MarketType, Outcome};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sport_key: String,
    #[serde(default)]
    pub commence_time: Option<String>,
    pub home_team: String,
    pub away_team: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bookmakers: Vec<BookmakerRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmakerRecord {
    pub key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub markets: Vec<MarketRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    pub key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub outcomes: Vec<OutcomeRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<LenientNumber>,
    #[serde(default)]
    pub point: Option<LenientNumber>,
}

/// Treats an explicit `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A number that some feeds send as a string, and occasionally as garbage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LenientNumber {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}
impl LenientNumber {
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            LenientNumber::Number(number) => Some(*number),
            LenientNumber::Text(text) => text.trim().parse().ok(),
            LenientNumber::Other(_) => None,
        };
        value.filter(|value| value.is_finite())
    }
}

impl From<f64> for LenientNumber {
    fn from(number: f64) -> Self {
        LenientNumber::Number(number)
    }
}

impl EventRecord {
    pub fn event(&self) -> Event {
        let commence_time = self.commence_time.as_deref().and_then(|time| {
            match DateTime::parse_from_rfc3339(time) {
                Ok(time) => Some(time.with_timezone(&Utc)),
                Err(err) => {
                    trace!("event {}: ignoring commence_time '{time}': {err}", self.id);
                    None
                }
            }
        });
        Event {
            id: self.id.clone(),
            sport: self.sport_key.clone(),
            home: self.home_team.clone(),
            away: self.away_team.clone(),
            commence_time,
        }
    }

    /// Extracts every valid quote, in feed order. Outcomes without a usable price, and line-bearing
    /// outcomes without a usable point, contribute nothing.
    pub fn quotes(&self) -> Vec<BookmakerQuote> {
        let mut quotes = vec![];
        for bookmaker_record in &self.bookmakers {
            if bookmaker_record.markets.is_empty() {
                trace!("event {}: {} has no markets", self.id, bookmaker_record.key);
                continue;
            }
            let bookmaker = Bookmaker {
                key: bookmaker_record.key.clone(),
                title: if bookmaker_record.title.is_empty() {
                    bookmaker_record.key.clone()
                } else {
                    bookmaker_record.title.clone()
                },
            };
            for market_record in &bookmaker_record.markets {
                let market = MarketType::from_key(&market_record.key);
                for outcome_record in &market_record.outcomes {
                    if let Some(quote) =
                        self.to_quote(&bookmaker, &market, outcome_record)
                    {
                        quotes.push(quote);
                    }
                }
            }
        }
        quotes
    }

    fn to_quote(
        &self,
        bookmaker: &Bookmaker,
        market: &MarketType,
        record: &OutcomeRecord,
    ) -> Option<BookmakerQuote> {
        if record.name.trim().is_empty() {
            trace!(
                "event {}: {} {} has an unnamed outcome",
                self.id,
                bookmaker.key,
                market.key()
            );
            return None;
        }

        let price = match record.price.as_ref().and_then(LenientNumber::value) {
            Some(price) if price.abs() < i32::MAX as f64 => price.round() as i32,
            _ => {
                trace!(
                    "event {}: {} {} '{}' has no usable price: {:?}",
                    self.id,
                    bookmaker.key,
                    market.key(),
                    record.name,
                    record.price
                );
                return None;
            }
        };

        let line = match (market, &record.point) {
            (MarketType::Moneyline, _) | (_, None) => None,
            (_, Some(point)) => match point.value() {
                Some(point) => Some(point),
                None => {
                    trace!(
                        "event {}: {} {} '{}' has a malformed point: {point:?}",
                        self.id,
                        bookmaker.key,
                        market.key(),
                        record.name
                    );
                    return None;
                }
            },
        };
        if line.is_none() && market.requires_line() {
            trace!(
                "event {}: {} {} '{}' is missing its line",
                self.id,
                bookmaker.key,
                market.key(),
                record.name
            );
            return None;
        }

        let outcome = Outcome::parse(&record.name, record.description.as_deref());
        match BookmakerQuote::try_new(bookmaker.clone(), market.clone(), outcome, line, price) {
            Ok(quote) => Some(quote),
            Err(err) => {
                trace!(
                    "event {}: {} {} '{}' excluded: {err}",
                    self.id,
                    bookmaker.key,
                    market.key(),
                    record.name
                );
                None
            }
        }
    }
}
