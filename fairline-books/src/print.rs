use stanza::style::HAlign::Left;
use stanza::style::{HAlign, Header, MinWidth, Styles};
use stanza::table::{Col, Row, Table};

use fairline::odds::OddsFormat;

use crate::domain::MarketType;
use crate::engine::MarketPicks;

const ABSENT: &str = "n/a";

pub fn tabulate_picks(market_picks: &MarketPicks, format: OddsFormat) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(20)).with(Left)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(12)).with(Left)),
            Col::new(Styles::default().with(MinWidth(7)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(7)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Outcome".into(),
                "Line".into(),
                "Best book".into(),
                "Price".into(),
                "Fair".into(),
                "EV %".into(),
                "Books".into(),
            ],
        ));
    for pick in &market_picks.picks {
        let fair = pick
            .fair_price()
            .and_then(|fair| format.format(fair).ok())
            .unwrap_or_else(|| ABSENT.into());
        let ev = pick
            .ev()
            .map(|ev| format!("{ev:+.2}"))
            .unwrap_or_else(|| ABSENT.into());
        table.push_row(Row::new(
            Styles::default(),
            vec![
                pick.outcome().to_string().into(),
                format_line(&market_picks.market, pick.line()).into(),
                pick.best_bookmaker().to_owned().into(),
                format_price(pick.best_price(), format).into(),
                fair.into(),
                ev.into(),
                format!("{}", pick.consensus.sample_size()).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_arbitrages(market_picks: &MarketPicks, format: OddsFormat) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(20)).with(Left)),
            Col::new(Styles::default().with(MinWidth(12)).with(Left)),
            Col::new(Styles::default().with(MinWidth(7)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Outcome".into(),
                "Book".into(),
                "Price".into(),
                "Stake".into(),
                "Profit".into(),
                "ROI %".into(),
            ],
        ));
    for pair in &market_picks.arbitrages {
        let Some(opportunity) = &pair.assessment.opportunity else {
            continue;
        };
        for (index, (key, leg)) in pair.keys.iter().zip(&pair.legs).enumerate() {
            let (profit, roi) = if index == 0 {
                (
                    format!("{:.2}", opportunity.profit),
                    format!("{:.2}", opportunity.roi),
                )
            } else {
                (String::new(), String::new())
            };
            table.push_row(Row::new(
                Styles::default(),
                vec![
                    key.to_string().into(),
                    leg.quote.bookmaker.title.clone().into(),
                    format_price(leg.quote.price, format).into(),
                    format!("{:.2}", opportunity.stakes[index]).into(),
                    profit.into(),
                    roi.into(),
                ],
            ));
        }
    }
    table
}

fn format_price(american: i32, format: OddsFormat) -> String {
    format
        .format(american as f64)
        .unwrap_or_else(|_| ABSENT.into())
}

fn format_line(market: &MarketType, line: Option<f64>) -> String {
    match (market, line) {
        (_, None) => String::new(),
        (MarketType::Spread, Some(line)) => format!("{line:+}"),
        (_, Some(line)) => format!("{line}"),
    }
}

#[cfg(test)]
mod tests {
    use stanza::renderer::console::Console;
    use stanza::renderer::Renderer;
    use strum::IntoEnumIterator;

    use super::*;
    use crate::config::Config;
    use crate::engine::Engine;
    use crate::testing::*;

    fn render(table: &Table) -> String {
        Console::default().render(table).to_string()
    }

    #[test]
    fn picks_table() {
        let record = record(vec![
            book("a", vec![h2h(150.0, -200.0)]),
            book("b", vec![h2h(-180.0, -120.0)]),
        ]);
        let event_picks = Engine::try_from(Config::default()).unwrap().evaluate(&record);
        let market_picks = &event_picks.markets[0];

        let rendered = render(&tabulate_picks(market_picks, OddsFormat::American));
        assert!(rendered.contains("Best book"));
        assert!(rendered.contains(HOME));
        assert!(rendered.contains("+150"));
        assert!(rendered.contains(ABSENT));

        let rendered = render(&tabulate_picks(market_picks, OddsFormat::Decimal));
        assert!(rendered.contains("2.50"));
        assert!(rendered.contains("1.83"));

        let rendered = render(&tabulate_arbitrages(market_picks, OddsFormat::Fractional));
        assert!(rendered.contains("3/2"));
        assert!(rendered.contains("5.77"));
        assert!(rendered.contains("42.31"));
        assert!(rendered.contains("57.69"));

        for format in OddsFormat::iter() {
            assert!(!render(&tabulate_picks(market_picks, format)).is_empty());
        }
    }

    #[test]
    fn line_formatting() {
        assert_eq!("-3.5", format_line(&MarketType::Spread, Some(-3.5)));
        assert_eq!("+3.5", format_line(&MarketType::Spread, Some(3.5)));
        assert_eq!("47.5", format_line(&MarketType::Total, Some(47.5)));
        assert_eq!("", format_line(&MarketType::Moneyline, None));
    }
}
