//! Conversions between American, decimal and fractional odds, and the implied probabilities
//! they carry.
//!
//! American odds are signed: a positive value is the profit on a 100-unit stake; a negative value
//! is the stake required to profit 100 units. Decimal odds include the returned stake, so they are
//! always greater than 1. Fractional odds express the profit per unit staked as a ratio.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

/// Denominator bound used when approximating decimal odds as a fraction.
pub const DEFAULT_MAX_DENOMINATOR: u64 = 100;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidOdds {
    #[error("American odds cannot be zero")]
    ZeroAmerican,

    #[error("decimal odds {0} must exceed 1")]
    Decimal(f64),

    #[error("probability {0} must lie strictly between 0 and 1")]
    Probability(f64),

    #[error("odds {0} are not finite")]
    NonFinite(f64),

    #[error("American odds {0} must be at least 100 in magnitude")]
    AmericanRange(f64),
}

fn check_american(odds: f64) -> Result<f64, InvalidOdds> {
    if !odds.is_finite() {
        Err(InvalidOdds::NonFinite(odds))
    } else if odds == 0.0 {
        Err(InvalidOdds::ZeroAmerican)
    } else {
        Ok(odds)
    }
}

/// Verifies that `odds` is a well-formed American price: finite, and no closer to zero than
/// +/-100. The conversions alone accept smaller magnitudes.
pub fn check_american_price(odds: f64) -> Result<f64, InvalidOdds> {
    let odds = check_american(odds)?;
    if odds.abs() < 100.0 {
        Err(InvalidOdds::AmericanRange(odds))
    } else {
        Ok(odds)
    }
}

fn check_decimal(decimal: f64) -> Result<f64, InvalidOdds> {
    if !decimal.is_finite() {
        Err(InvalidOdds::NonFinite(decimal))
    } else if decimal <= 1.0 {
        Err(InvalidOdds::Decimal(decimal))
    } else {
        Ok(decimal)
    }
}

/// Verifies that `probability` lies in the open interval (0, 1).
pub fn check_probability(probability: f64) -> Result<f64, InvalidOdds> {
    if probability > 0.0 && probability < 1.0 {
        Ok(probability)
    } else {
        Err(InvalidOdds::Probability(probability))
    }
}

/// The implied probability of an American price, margin included.
pub fn american_to_probability(odds: f64) -> Result<f64, InvalidOdds> {
    let odds = check_american(odds)?;
    if odds > 0.0 {
        Ok(100.0 / (odds + 100.0))
    } else {
        Ok(-odds / (-odds + 100.0))
    }
}

pub fn american_to_decimal(odds: f64) -> Result<f64, InvalidOdds> {
    let odds = check_american(odds)?;
    if odds > 0.0 {
        Ok(odds / 100.0 + 1.0)
    } else {
        Ok(100.0 / odds.abs() + 1.0)
    }
}

/// Even money (decimal 2.0) maps to +100.
pub fn decimal_to_american(decimal: f64) -> Result<f64, InvalidOdds> {
    let decimal = check_decimal(decimal)?;
    if decimal >= 2.0 {
        Ok((decimal - 1.0) * 100.0)
    } else {
        Ok(-100.0 / (decimal - 1.0))
    }
}

pub fn decimal_to_probability(decimal: f64) -> Result<f64, InvalidOdds> {
    Ok(1.0 / check_decimal(decimal)?)
}

pub fn probability_to_decimal(probability: f64) -> Result<f64, InvalidOdds> {
    Ok(1.0 / check_probability(probability)?)
}

/// The fair American price of an outcome with the given `probability`.
pub fn probability_to_american(probability: f64) -> Result<f64, InvalidOdds> {
    decimal_to_american(probability_to_decimal(probability)?)
}

pub fn american_to_fraction(odds: f64) -> Result<Fraction, InvalidOdds> {
    Fraction::from_decimal(american_to_decimal(odds)?, DEFAULT_MAX_DENOMINATOR)
}

/// Fractional odds, e.g. `5/2`: profit of `numerator` for every `denominator` staked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fraction {
    pub numerator: u64,
    pub denominator: u64,
}
impl Fraction {
    pub fn quotient(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    pub fn decimal(&self) -> f64 {
        self.quotient() + 1.0
    }

    /// Approximates `decimal` odds by the last continued-fraction convergent whose denominator does
    /// not exceed `max_denominator`.
    pub fn from_decimal(decimal: f64, max_denominator: u64) -> Result<Self, InvalidOdds> {
        const MAX_TERMS: usize = 32;
        const RESIDUAL: f64 = 1e-9;

        let mut remainder = check_decimal(decimal)? - 1.0;
        let (mut num_prev, mut num) = (0_u64, 1_u64);
        let (mut den_prev, mut den) = (1_u64, 0_u64);
        for _ in 0..MAX_TERMS {
            let term = remainder.floor();
            if term > u32::MAX as f64 {
                break;
            }
            let term = term as u64;
            let next_num = term.checked_mul(num).and_then(|v| v.checked_add(num_prev));
            let next_den = term.checked_mul(den).and_then(|v| v.checked_add(den_prev));
            let (next_num, next_den) = match (next_num, next_den) {
                (Some(next_num), Some(next_den)) if next_den <= max_denominator => {
                    (next_num, next_den)
                }
                _ => break,
            };
            (num_prev, num) = (num, next_num);
            (den_prev, den) = (den, next_den);

            let fractional = remainder - term as f64;
            if fractional < RESIDUAL {
                break;
            }
            remainder = 1.0 / fractional;
        }

        if den == 0 {
            // only reachable when max_denominator is zero
            Err(InvalidOdds::Decimal(decimal))
        } else {
            Ok(Self {
                numerator: num,
                denominator: den,
            })
        }
    }
}

impl Display for Fraction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// The format in which a price is presented to the caller.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OddsFormat {
    #[default]
    American,
    Decimal,
    Fractional,
    Probability,
}
impl OddsFormat {
    /// Renders an American price in this format.
    pub fn format(&self, american: f64) -> Result<String, InvalidOdds> {
        match self {
            OddsFormat::American => {
                let american = check_american(american)?;
                Ok(format!("{:+}", american.round() as i64))
            }
            OddsFormat::Decimal => Ok(format!("{:.2}", american_to_decimal(american)?)),
            OddsFormat::Fractional => Ok(american_to_fraction(american)?.to_string()),
            OddsFormat::Probability => {
                Ok(format!("{:.1}%", american_to_probability(american)? * 100.0))
            }
        }
    }
}
