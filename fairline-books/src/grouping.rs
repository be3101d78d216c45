//! Matches quotes from different bookmakers that refer to the same bettable proposition.
//!
//! Two quotes belong to the same [OutcomeGroup] when they are in the same market, name the same
//! outcome and, where the market carries lines, quote lines within the point tolerance of each
//! other. The first line seen anchors the group.

use std::fmt::{Display, Formatter};

use serde::Serialize;
use tracing::{debug, trace};

use crate::domain::{BookmakerQuote, Event, MarketType, Outcome};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupKey {
    pub outcome: Outcome,
    pub line: Option<f64>,
}
impl GroupKey {
    fn matches(&self, outcome: &Outcome, line: Option<f64>, tolerance: f64) -> bool {
        self.outcome == *outcome && lines_match(self.line, line, tolerance)
    }
}

impl Display for GroupKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.line {
            None => write!(f, "{}", self.outcome),
            Some(line) => match self.outcome {
                Outcome::Named(_) => write!(f, "{} {line:+}", self.outcome),
                _ => write!(f, "{} {line}", self.outcome),
            },
        }
    }
}

pub fn lines_match(a: Option<f64>, b: Option<f64>, tolerance: f64) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => (a - b).abs() < tolerance,
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeGroup {
    pub market: MarketType,
    pub key: GroupKey,
    /// At most one quote per bookmaker, in the order first seen.
    pub quotes: Vec<BookmakerQuote>,
}
impl OutcomeGroup {
    pub fn num_bookmakers(&self) -> usize {
        self.quotes.len()
    }

    pub fn quote_for(&self, bookmaker_key: &str) -> Option<&BookmakerQuote> {
        self.quotes
            .iter()
            .find(|quote| quote.bookmaker.key == bookmaker_key)
    }
}

/// Partitions `quotes` into outcome groups, preserving the order in which each group was first
/// seen. A repeated quote from a bookmaker already present in a group is dropped.
pub fn group_quotes(
    quotes: impl IntoIterator<Item = BookmakerQuote>,
    tolerance: f64,
) -> Vec<OutcomeGroup> {
    let mut groups: Vec<OutcomeGroup> = vec![];
    for quote in quotes {
        let existing = groups.iter().position(|group| {
            group.market == quote.market && group.key.matches(&quote.outcome, quote.line, tolerance)
        });
        match existing {
            Some(index) => {
                let group = &mut groups[index];
                if group.quote_for(&quote.bookmaker.key).is_some() {
                    trace!(
                        "dropping repeated {} quote from {} for {}",
                        quote.market,
                        quote.bookmaker.key,
                        group.key
                    );
                } else {
                    group.quotes.push(quote);
                }
            }
            None => groups.push(OutcomeGroup {
                market: quote.market.clone(),
                key: GroupKey {
                    outcome: quote.outcome.clone(),
                    line: quote.line,
                },
                quotes: vec![quote],
            }),
        }
    }
    debug!("formed {} outcome groups", groups.len());
    groups
}

/// Locates the group holding the opposite side of `group`: the other participant of a moneyline
/// (at the negated line for a spread), or the flipped Over/Under side at the same line.
///
/// A moneyline in which any third outcome is quoted, such as a draw, has no complement.
pub fn find_complement<'a>(
    groups: &'a [OutcomeGroup],
    group: &OutcomeGroup,
    event: &Event,
    tolerance: f64,
) -> Option<&'a OutcomeGroup> {
    let complement_outcome = group.key.outcome.complement(event)?;
    let complement_line = group.market.complement_line(group.key.line)?;
    if group.market == MarketType::Moneyline {
        let three_way = groups.iter().any(|other| {
            other.market == group.market
                && other.key.outcome != group.key.outcome
                && other.key.outcome != complement_outcome
        });
        if three_way {
            return None;
        }
    }
    groups.iter().find(|other| {
        other.market == group.market
            && other.key.matches(&complement_outcome, complement_line, tolerance)
    })
}
