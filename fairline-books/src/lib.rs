//! Consensus fair prices, expected value and arbitrage across bookmakers quoting the same event.

pub mod arb;
pub mod cache;
pub mod config;
pub mod consensus;
pub mod domain;
pub mod engine;
pub mod feed;
pub mod grouping;
pub mod print;
pub mod priority;
pub mod scoring;
pub mod selection;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
