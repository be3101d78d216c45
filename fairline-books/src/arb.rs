//! Arbitrage across the best quotes on complementary outcome groups.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use fairline::arbitrage;
use fairline::arbitrage::{Assessment, InvalidArbitrage};

use crate::grouping::GroupKey;
use crate::scoring::ScoredQuote;
use crate::selection::BestPick;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("no complementary outcome for {0}")]
pub struct NoComplementaryOutcome(pub String);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArbitrageError {
    #[error("{0}")]
    NoComplementaryOutcome(#[from] NoComplementaryOutcome),

    #[error("{0}")]
    InvalidArbitrage(#[from] InvalidArbitrage),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArbitragePair {
    pub keys: [GroupKey; 2],
    /// The best quote on either side; stakes in the assessment are in the same order.
    pub legs: [ScoredQuote; 2],
    pub assessment: Assessment,
}
impl ArbitragePair {
    pub fn is_arbitrage(&self) -> bool {
        self.assessment.is_arbitrage()
    }
}

/// Assesses the best quotes of `pick` and its `complement` for a guaranteed profit on a total
/// `stake`.
pub fn evaluate(
    pick: &BestPick,
    complement: Option<&BestPick>,
    stake: f64,
    margin: f64,
) -> Result<ArbitragePair, ArbitrageError> {
    let complement =
        complement.ok_or_else(|| NoComplementaryOutcome(format!("{} {}", pick.market, pick.key)))?;
    let assessment = arbitrage::assess(
        [&pick.best.quote, &complement.best.quote],
        stake,
        margin,
    )?;
    if let Some(opportunity) = &assessment.opportunity {
        debug!(
            "arbitrage on {}: {} {} at {} / {} {} at {}, roi {:.2}%",
            pick.market,
            pick.key,
            pick.best.quote.bookmaker.key,
            pick.best_price(),
            complement.key,
            complement.best.quote.bookmaker.key,
            complement.best_price(),
            opportunity.roi
        );
    }
    Ok(ArbitragePair {
        keys: [pick.key.clone(), complement.key.clone()],
        legs: [pick.best.clone(), complement.best.clone()],
        assessment,
    })
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;

    use super::*;
    use crate::consensus::Consensus;
    use crate::domain::MarketType;
    use crate::grouping::group_quotes;
    use crate::priority::BookmakerPriority;
    use crate::selection::select;
    use crate::testing::*;

    const STAKE: f64 = 1000.0;
    const MARGIN: f64 = 0.02;

    fn picks(quotes: Vec<crate::domain::BookmakerQuote>) -> Vec<BestPick> {
        group_quotes(quotes, TOLERANCE)
            .iter()
            .map(|group| {
                select(
                    group,
                    Consensus::InsufficientSample { sample_size: 0 },
                    &BookmakerPriority::default(),
                )
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn cross_book_arbitrage() {
        let picks = picks(
            [moneyline("a", 150, -200), moneyline("b", -180, -120)].concat(),
        );
        let pair = evaluate(&picks[0], Some(&picks[1]), STAKE, MARGIN).unwrap();
        assert!(pair.is_arbitrage());
        assert_eq!("a", pair.legs[0].quote.bookmaker.key);
        assert_eq!("b", pair.legs[1].quote.bookmaker.key);
        assert_eq!(named(AWAY), pair.keys[1].outcome);
        assert_float_absolute_eq!(0.945454, pair.assessment.total_implied, 1e-6);
        let opportunity = pair.assessment.opportunity.unwrap();
        assert_float_absolute_eq!(423.076923, opportunity.stakes[0], 1e-6);
        assert_float_absolute_eq!(57.692307, opportunity.profit, 1e-6);
    }

    #[test]
    fn vigged_market_is_not_arbitrage() {
        let picks = picks(total("a", 47.5, -110, -110).to_vec());
        let pair = evaluate(&picks[0], Some(&picks[1]), STAKE, MARGIN).unwrap();
        assert!(!pair.is_arbitrage());
    }

    #[test]
    fn missing_complement() {
        let picks = picks(vec![quote("a", MarketType::Total, over(), Some(47.5), -110)]);
        let err = evaluate(&picks[0], None, STAKE, MARGIN).unwrap_err();
        assert_eq!("no complementary outcome for Total Over 47.5", err.to_string());
    }

    #[test]
    fn invalid_stake() {
        let picks = picks(total("a", 47.5, -110, -110).to_vec());
        assert_eq!(
            Err(ArbitrageError::InvalidArbitrage(InvalidArbitrage::InvalidStake(-1.0))),
            evaluate(&picks[0], Some(&picks[1]), -1.0, MARGIN)
        );
    }
}
