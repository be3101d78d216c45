//! Best-price selection within an outcome group, and the ordering of picks across groups.

use std::cmp::Ordering;

use serde::Serialize;

use crate::consensus::Consensus;
use crate::domain::{MarketType, Outcome};
use crate::grouping::{GroupKey, OutcomeGroup};
use crate::priority::BookmakerPriority;
use crate::scoring::{compare_ev, score, ScoredQuote};

/// Orders American prices from most to least favourable to the bettor. Any positive price beats
/// any negative one, and a negative price closer to zero beats one further away.
pub fn compare_prices(a: i32, b: i32) -> Ordering {
    b.cmp(&a)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestPick {
    pub market: MarketType,
    pub key: GroupKey,
    pub consensus: Consensus,
    pub best: ScoredQuote,
    /// Every quote in the group, ranked the same way as `best` was chosen.
    pub breakdown: Vec<ScoredQuote>,
}
impl BestPick {
    pub fn outcome(&self) -> &Outcome {
        &self.key.outcome
    }

    pub fn line(&self) -> Option<f64> {
        self.key.line
    }

    pub fn ev(&self) -> Option<f64> {
        self.best.ev
    }

    /// The fair price in American odds, if a consensus was reached.
    pub fn fair_price(&self) -> Option<f64> {
        self.consensus.estimate()?.fair_american().ok()
    }

    pub fn best_bookmaker(&self) -> &str {
        &self.best.quote.bookmaker.title
    }

    pub fn best_price(&self) -> i32 {
        self.best.quote.price
    }
}

/// Scores every quote in `group` and selects the most favourable price, breaking ties by bookmaker
/// priority. Returns [None] for an empty group.
pub fn select(
    group: &OutcomeGroup,
    consensus: Consensus,
    priority: &BookmakerPriority,
) -> Option<BestPick> {
    let mut breakdown = group
        .quotes
        .iter()
        .map(|quote| score(quote.clone(), consensus.estimate()))
        .collect::<Vec<_>>();
    breakdown.sort_by(|a, b| {
        compare_prices(a.quote.price, b.quote.price)
            .then_with(|| priority.compare(&a.quote.bookmaker.key, &b.quote.bookmaker.key))
    });
    let best = breakdown.first()?.clone();
    Some(BestPick {
        market: group.market.clone(),
        key: group.key.clone(),
        consensus,
        best,
        breakdown,
    })
}

/// Orders picks by EV (absent last), then best price, then the priority of the best bookmaker.
/// Picks that compare equal keep their input order under a stable sort.
pub fn compare_picks(a: &BestPick, b: &BestPick, priority: &BookmakerPriority) -> Ordering {
    compare_ev(a.ev(), b.ev())
        .then_with(|| compare_prices(a.best_price(), b.best_price()))
        .then_with(|| {
            priority.compare(&a.best.quote.bookmaker.key, &b.best.quote.bookmaker.key)
        })
}
