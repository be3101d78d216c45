//! Domain-agnostic numerics for working with bookmaker prices: conversions between odds formats,
//! probability slice utilities, multiplicative removal of the overround, expected value and
//! two-way arbitrage.

pub mod arbitrage;
pub mod ev;
pub mod file;
pub mod market;
pub mod odds;
pub mod probs;

#[doc = include_str!("../../README.md")]
#[cfg(doc)]
fn readme() {}
