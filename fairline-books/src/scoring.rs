//! Scores individual quotes against a fair estimate.

use std::cmp::Ordering;

use serde::Serialize;

use fairline::ev;
use fairline::market::MarketPrice;

use crate::consensus::FairEstimate;
use crate::domain::BookmakerQuote;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredQuote {
    pub quote: BookmakerQuote,
    pub implied_probability: f64,
    /// Expected value in percent. Absent when there is no fair estimate to score against.
    pub ev: Option<f64>,
}

pub fn score(quote: BookmakerQuote, fair: Option<&FairEstimate>) -> ScoredQuote {
    let ev = fair.and_then(|fair| ev::expected_value(quote.decimal(), fair.probability));
    ScoredQuote {
        implied_probability: quote.implied_probability(),
        ev,
        quote,
    }
}

/// Orders expected values from best to worst. An absent EV sorts after every defined one.
pub fn compare_ev(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
