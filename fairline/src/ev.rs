//! Expected value of a price relative to a fair probability.

use crate::odds;

/// The expected value, in percent, of backing an outcome at `decimal` odds when its fair
/// probability is `fair_probability`.
///
/// Returns [None] rather than zero when either input is outside its domain; a missing EV must
/// never be mistaken for a break-even one.
pub fn expected_value(decimal: f64, fair_probability: f64) -> Option<f64> {
    if !decimal.is_finite() || decimal <= 1.0 {
        return None;
    }
    let fair_decimal = odds::probability_to_decimal(fair_probability).ok()?;
    Some((decimal / fair_decimal - 1.0) * 100.0)
}

/// As [expected_value], for an American price.
pub fn expected_value_american(american: f64, fair_probability: f64) -> Option<f64> {
    let decimal = odds::american_to_decimal(american).ok()?;
    expected_value(decimal, fair_probability)
}
