use std::env;
use std::path::{Path, PathBuf};

use anyhow::bail;
use clap::Parser;
use serde::Deserialize;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use fairline::file;
use fairline::file::ReadJsonFile;
use fairline::odds::OddsFormat;
use fairline_books::cache::CachingEngine;
use fairline_books::config::Config;
use fairline_books::engine::{Engine, EventPicks, MarketPicks};
use fairline_books::feed::EventRecord;
use fairline_books::print;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// file or directory to source the event records from
    #[clap(short = 'f', long)]
    file: PathBuf,

    /// engine configuration file
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// odds format for printed prices
    #[clap(long, default_value = "american")]
    format: OddsFormat,

    /// total stake split across the legs of an arbitrage
    #[clap(long)]
    stake: Option<f64>,

    /// only print picks with at least this EV percentage
    #[clap(long = "min-ev", allow_hyphen_values = true)]
    min_ev: Option<f64>,

    /// write the evaluated picks to a JSON file
    #[clap(short = 'o', long)]
    output: Option<PathBuf>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if let Some(stake) = self.stake {
            if !stake.is_finite() || stake <= 0.0 {
                bail!("stake must be a positive number");
            }
        }
        if let Some(min_ev) = self.min_ev {
            if !min_ev.is_finite() {
                bail!("minimum EV must be a finite number");
            }
        }
        Ok(())
    }
}

/// A feed file holds either a single event record or a list of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Records {
    Many(Vec<EventRecord>),
    One(EventRecord),
}
impl From<Records> for Vec<EventRecord> {
    fn from(records: Records) -> Self {
        match records {
            Records::Many(records) => records,
            Records::One(record) => vec![record],
        }
    }
}

fn main() -> anyhow::Result<()> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let mut config = match &args.config {
        None => Config::default(),
        Some(path) => Config::read_json_file(path)?,
    };
    if let Some(stake) = args.stake {
        config.arbitrage_stake = stake;
    }
    debug!("config: {config:?}");
    let mut engine = CachingEngine::from(Engine::try_from(config)?);

    let mut files = vec![];
    file::recurse_dir(args.file.clone(), &mut files, &mut |ext| ext == "json")?;
    if files.is_empty() {
        bail!("no JSON files found under {}", args.file.display());
    }

    let mut evaluated = vec![];
    for path in files {
        for record in read_records(&path)? {
            let event_picks = engine.evaluate(&record)?;
            print_event(event_picks, &args);
            evaluated.push(event_picks.clone());
        }
    }
    info!(
        "evaluated {} events, cache stats: {:?}",
        evaluated.len(),
        engine.stats()
    );

    if let Some(output) = &args.output {
        file::write_json(output, &evaluated)?;
        info!("wrote {}", output.display());
    }
    Ok(())
}

fn read_records(path: &Path) -> anyhow::Result<Vec<EventRecord>> {
    let records = Records::read_json_file(path)?;
    Ok(records.into())
}

fn print_event(event_picks: &EventPicks, args: &Args) {
    let event = &event_picks.event;
    let commence_time = event
        .commence_time
        .map(|time| time.to_rfc3339())
        .unwrap_or_default();
    info!(
        "{} v {} ({}, {commence_time})",
        event.home, event.away, event.sport
    );
    for market_picks in &event_picks.markets {
        let market_picks = filter_by_ev(market_picks, args.min_ev);
        if !market_picks.picks.is_empty() {
            info!(
                "{}:\n{}",
                market_picks.market,
                Console::default().render(&print::tabulate_picks(&market_picks, args.format))
            );
        }
        if !market_picks.arbitrages.is_empty() {
            info!(
                "{} arbitrage:\n{}",
                market_picks.market,
                Console::default().render(&print::tabulate_arbitrages(&market_picks, args.format))
            );
        }
    }
}

fn filter_by_ev(market_picks: &MarketPicks, min_ev: Option<f64>) -> MarketPicks {
    let mut filtered = market_picks.clone();
    if let Some(min_ev) = min_ev {
        filtered
            .picks
            .retain(|pick| pick.ev().map(|ev| ev >= min_ev).unwrap_or(false));
    }
    filtered
}
