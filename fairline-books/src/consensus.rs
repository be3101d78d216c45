//! Consensus fair probabilities, estimated across bookmakers with their margins removed.

use serde::Serialize;
use strum_macros::Display;
use tracing::{debug, trace};

use fairline::market::{Market, MarketPrice};
use fairline::odds;
use fairline::odds::InvalidOdds;
use fairline::probs::SliceExt;

use crate::grouping::OutcomeGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum DevigMethod {
    /// Each bookmaker's two-way market is normalised before taking the median.
    Paired,
    /// The median of the raw implied probabilities, margins included.
    Median,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FairEstimate {
    /// Strictly within (0, 1).
    pub probability: f64,
    pub sample_size: usize,
    pub method: DevigMethod,
}
impl FairEstimate {
    pub fn fair_decimal(&self) -> f64 {
        1.0 / self.probability
    }

    pub fn fair_american(&self) -> Result<f64, InvalidOdds> {
        odds::probability_to_american(self.probability)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Consensus {
    Fair(FairEstimate),
    /// Too few bookmakers contributed; carries the largest sample that was available.
    InsufficientSample { sample_size: usize },
}
impl Consensus {
    pub fn estimate(&self) -> Option<&FairEstimate> {
        match self {
            Consensus::Fair(estimate) => Some(estimate),
            Consensus::InsufficientSample { .. } => None,
        }
    }

    pub fn sample_size(&self) -> usize {
        match self {
            Consensus::Fair(estimate) => estimate.sample_size,
            Consensus::InsufficientSample { sample_size } => *sample_size,
        }
    }
}

/// De-vigged probability of `group` from every bookmaker that also quotes the `complement`.
pub fn paired(group: &OutcomeGroup, complement: &OutcomeGroup) -> Option<FairEstimate> {
    let probs = group
        .quotes
        .iter()
        .filter_map(|quote| {
            let other = complement.quote_for(&quote.bookmaker.key)?;
            match Market::fit(vec![quote.decimal(), other.decimal()], 1.0) {
                Ok(market) => Some(market.probs[0]),
                Err(err) => {
                    trace!("skipping {} pair: {err}", quote.bookmaker.key);
                    None
                }
            }
        })
        .filter(|&prob| in_unit_interval(prob))
        .collect::<Vec<_>>();
    estimate(&probs, DevigMethod::Paired)
}

/// Median of the implied probabilities quoted on `group` alone.
pub fn unpaired(group: &OutcomeGroup) -> Option<FairEstimate> {
    let probs = group
        .quotes
        .iter()
        .map(|quote| quote.implied_probability())
        .filter(|&prob| in_unit_interval(prob))
        .collect::<Vec<_>>();
    estimate(&probs, DevigMethod::Median)
}

/// Estimates the fair probability of `group`. Paired de-vig is preferred; the unpaired median is
/// used when there is no complement or too few bookmakers quote both sides. Either estimate counts
/// only if more than `min_sample_size` bookmakers contributed to it.
pub fn estimate_group(
    group: &OutcomeGroup,
    complement: Option<&OutcomeGroup>,
    min_sample_size: usize,
) -> Consensus {
    let mut largest_sample = 0;
    let candidates = complement
        .and_then(|complement| paired(group, complement))
        .into_iter()
        .chain(unpaired(group));
    for candidate in candidates {
        if candidate.sample_size > min_sample_size {
            return Consensus::Fair(candidate);
        }
        largest_sample = largest_sample.max(candidate.sample_size);
    }
    debug!(
        "no consensus for {} {}: {largest_sample} bookmakers, need more than {min_sample_size}",
        group.market, group.key
    );
    Consensus::InsufficientSample {
        sample_size: largest_sample,
    }
}

fn estimate(probs: &[f64], method: DevigMethod) -> Option<FairEstimate> {
    let probability = probs.median()?;
    in_unit_interval(probability).then_some(FairEstimate {
        probability,
        sample_size: probs.len(),
        method,
    })
}

fn in_unit_interval(prob: f64) -> bool {
    prob > 0.0 && prob < 1.0
}
