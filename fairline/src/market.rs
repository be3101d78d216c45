//! A [Market] is a set of mutually exclusive outcomes priced by a single bookmaker. Fitting a
//! market strips the bookmaker's overround multiplicatively, recovering probabilities that sum to
//! the fair booksum.

use std::ops::RangeInclusive;

use crate::odds;
use crate::odds::InvalidOdds;
use crate::probs::SliceExt;

pub type PriceBounds = RangeInclusive<f64>;

pub trait MarketPrice {
    fn decimal(&self) -> f64;
}

impl MarketPrice for f64 {
    fn decimal(&self) -> f64 {
        *self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overround {
    pub value: f64,
}
impl Overround {
    pub fn fair() -> Self {
        Self { value: 1.0 }
    }

    /// The bookmaker's margin, i.e. the overround in excess of a fair book.
    pub fn margin(&self) -> f64 {
        self.value - 1.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Market {
    pub probs: Vec<f64>,
    pub prices: Vec<f64>,
    pub overround: Overround,
}
impl Market {
    /// Fits a market to the given decimal `prices`, scaling the implied probabilities so that they
    /// sum to `fair_sum`.
    pub fn fit(prices: Vec<f64>, fair_sum: f64) -> Result<Self, InvalidOdds> {
        let mut probs = prices
            .iter()
            .map(|&price| odds::decimal_to_probability(price))
            .collect::<Result<Vec<_>, _>>()?;
        let overround = probs.normalise(fair_sum) / fair_sum;
        Ok(Self {
            probs,
            prices,
            overround: Overround { value: overround },
        })
    }

    /// Frames a market around fair `probs`, applying the `overround` multiplicatively and capping
    /// each price within `bounds`.
    pub fn frame(overround: &Overround, probs: Vec<f64>, bounds: &PriceBounds) -> Self {
        let prices = probs
            .iter()
            .map(|prob| multiply_capped(1.0 / prob, overround.value, bounds))
            .collect();
        Self {
            probs,
            prices,
            overround: overround.clone(),
        }
    }

    pub fn fair_booksum(&self) -> f64 {
        self.probs.sum()
    }

    pub fn fair_prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.probs.iter().map(|prob| 1.0 / prob)
    }
}

pub fn multiply_capped(fair_price: f64, overround: f64, bounds: &PriceBounds) -> f64 {
    let quotient = fair_price / overround;
    if quotient.is_finite() {
        f64::min(f64::max(*bounds.start(), quotient), *bounds.end())
    } else {
        quotient
    }
}
