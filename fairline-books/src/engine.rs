//! The end-to-end pipeline: feed records in, ranked picks and arbitrages out, per market.

use serde::Serialize;
use tracing::{debug, trace};

use crate::arb;
use crate::arb::{ArbitrageError, ArbitragePair};
use crate::config::{Config, InvalidConfig};
use crate::consensus;
use crate::domain::{BookmakerQuote, Event, MarketType};
use crate::feed::EventRecord;
use crate::grouping::{find_complement, group_quotes, OutcomeGroup};
use crate::priority::BookmakerPriority;
use crate::selection;
use crate::selection::BestPick;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketPicks {
    pub market: MarketType,
    /// Ordered by EV descending, then best price, then bookmaker priority, then first appearance.
    pub picks: Vec<BestPick>,
    /// Complementary pairs whose best quotes guarantee a profit.
    pub arbitrages: Vec<ArbitragePair>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventPicks {
    pub event: Event,
    /// In the order each market first appears in the feed.
    pub markets: Vec<MarketPicks>,
}
impl EventPicks {
    pub fn market(&self, market: &MarketType) -> Option<&MarketPicks> {
        self.markets.iter().find(|picks| picks.market == *market)
    }
}

#[derive(Debug, Clone)]
pub struct Engine {
    config: Config,
    priority: BookmakerPriority,
}
impl Engine {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn evaluate(&self, record: &EventRecord) -> EventPicks {
        let event = record.event();
        let mut by_market: Vec<(MarketType, Vec<BookmakerQuote>)> = vec![];
        for quote in record.quotes() {
            if !self.config.includes_bookmaker(&quote.bookmaker.key)
                || !self.config.includes_market(quote.market.key())
            {
                trace!(
                    "filtered {} quote from {}",
                    quote.market.key(),
                    quote.bookmaker.key
                );
                continue;
            }
            match by_market
                .iter()
                .position(|(market, _)| *market == quote.market)
            {
                Some(index) => by_market[index].1.push(quote),
                None => by_market.push((quote.market.clone(), vec![quote])),
            }
        }

        let markets = by_market
            .into_iter()
            .map(|(market, quotes)| self.evaluate_market(&event, market, quotes))
            .collect::<Vec<_>>();
        debug!(
            "evaluated event {} ({} v {}): {} markets",
            event.id,
            event.home,
            event.away,
            markets.len()
        );
        EventPicks { event, markets }
    }

    /// Evaluates the `quotes` of a single `market` of `event`.
    pub fn evaluate_market(
        &self,
        event: &Event,
        market: MarketType,
        quotes: Vec<BookmakerQuote>,
    ) -> MarketPicks {
        let tolerance = self.config.point_tolerance;
        let groups = group_quotes(quotes, tolerance);
        let complements = groups
            .iter()
            .map(|group| {
                find_complement(&groups, group, event, tolerance).and_then(|complement| {
                    groups
                        .iter()
                        .position(|other| std::ptr::eq(other, complement))
                })
            })
            .collect::<Vec<_>>();

        let picks = groups
            .iter()
            .zip(&complements)
            .map(|(group, &complement)| self.pick(group, complement.map(|index| &groups[index])))
            .collect::<Vec<_>>();

        let mut arbitrages = vec![];
        for (index, pick) in picks.iter().enumerate() {
            let Some(pick) = pick else {
                continue;
            };
            // a mutual pair is evaluated once, from its lower index
            let complement = match complements[index] {
                Some(complement)
                    if complement < index && complements[complement] == Some(index) =>
                {
                    continue
                }
                Some(complement) => picks[complement].as_ref(),
                None => None,
            };
            match arb::evaluate(
                pick,
                complement,
                self.config.arbitrage_stake,
                self.config.arbitrage_margin,
            ) {
                Ok(pair) if pair.is_arbitrage() => arbitrages.push(pair),
                Ok(_) => {}
                Err(ArbitrageError::NoComplementaryOutcome(err)) => trace!("{err}"),
                Err(err) => debug!("arbitrage not evaluated: {err}"),
            }
        }

        let mut picks = picks.into_iter().flatten().collect::<Vec<_>>();
        picks.sort_by(|a, b| selection::compare_picks(a, b, &self.priority));
        MarketPicks {
            market,
            picks,
            arbitrages,
        }
    }

    fn pick(&self, group: &OutcomeGroup, complement: Option<&OutcomeGroup>) -> Option<BestPick> {
        let consensus =
            consensus::estimate_group(group, complement, self.config.min_sample_size);
        selection::select(group, consensus, &self.priority)
    }
}

impl TryFrom<Config> for Engine {
    type Error = InvalidConfig;

    fn try_from(config: Config) -> Result<Self, Self::Error> {
        config.validate()?;
        let priority = BookmakerPriority::try_from(config.priority.clone())?;
        Ok(Self { config, priority })
    }
}
