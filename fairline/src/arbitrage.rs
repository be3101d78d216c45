//! Two-way arbitrage: backing both sides of a binary market across different bookmakers such
//! that the payout is guaranteed to exceed the total stake.

use serde::Serialize;
use thiserror::Error;

use crate::market::MarketPrice;
use crate::odds;
use crate::odds::InvalidOdds;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidArbitrage {
    #[error("{0}")]
    InvalidOdds(#[from] InvalidOdds),

    #[error("stake {0} must be positive")]
    InvalidStake(f64),

    #[error("margin {0} must lie in [0, 1)")]
    InvalidMargin(f64),
}

/// Proportional stakes that equalise the payout on either side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Opportunity {
    pub stakes: [f64; 2],
    pub payout: f64,
    pub profit: f64,
    /// Return on the total stake, in percent.
    pub roi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    /// Sum of the implied probabilities of both prices.
    pub total_implied: f64,
    pub opportunity: Option<Opportunity>,
}
impl Assessment {
    pub fn is_arbitrage(&self) -> bool {
        self.opportunity.is_some()
    }
}

/// Assesses a pair of complementary prices. An opportunity exists only when the total implied
/// probability is below `1 - margin`; the stake split is then computed for a total `stake`.
pub fn assess<P: MarketPrice>(
    prices: [&P; 2],
    stake: f64,
    margin: f64,
) -> Result<Assessment, InvalidArbitrage> {
    if !stake.is_finite() || stake <= 0.0 {
        return Err(InvalidArbitrage::InvalidStake(stake));
    }
    if !(0.0..1.0).contains(&margin) {
        return Err(InvalidArbitrage::InvalidMargin(margin));
    }
    let decimals = [prices[0].decimal(), prices[1].decimal()];
    let implied = [
        odds::decimal_to_probability(decimals[0])?,
        odds::decimal_to_probability(decimals[1])?,
    ];
    let total_implied = implied[0] + implied[1];
    if total_implied >= 1.0 - margin {
        return Ok(Assessment {
            total_implied,
            opportunity: None,
        });
    }

    let stakes = [
        stake * implied[0] / total_implied,
        stake * implied[1] / total_implied,
    ];
    let payout = f64::min(stakes[0] * decimals[0], stakes[1] * decimals[1]);
    let profit = payout - stake;
    Ok(Assessment {
        total_implied,
        opportunity: Some(Opportunity {
            stakes,
            payout,
            profit,
            roi: profit / stake * 100.0,
        }),
    })
}
