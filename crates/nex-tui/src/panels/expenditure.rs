//! CAPEX / OPEX panels.
//!
//! Expenditure totals are carrier-independent: the carrier checklist is
//! ignored here and only the country filter applies.

use crate::filter::resolve_country_filter;
use crate::models::FilterSelection;
use crate::panel::{Bar, Figure, FigureBody, PanelItem, PanelState, Placeholder};
use crate::panels::{carrier_color, countries_suffix, row_label};
use crate::theme::ChartTemplate;
use nex_core::{Network, StatQuery, Statistics};
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpenditureKind {
    Capex,
    Opex,
}

impl ExpenditureKind {
    fn title(&self) -> &'static str {
        match self {
            ExpenditureKind::Capex => "Capital Expenditure Totals",
            ExpenditureKind::Opex => "Operational Expenditure Totals",
        }
    }

    fn context(&self) -> &'static str {
        match self {
            ExpenditureKind::Capex => "CAPEX chart",
            ExpenditureKind::Opex => "OPEX chart",
        }
    }
}

pub fn render_expenditure(
    n: &Network,
    stats: &dyn Statistics,
    filter: &FilterSelection,
    kind: ExpenditureKind,
) -> PanelState {
    let country = resolve_country_filter(filter.country_mode, &filter.selected_countries);
    if let Some(placeholder) = country.blocking {
        return PanelState::Placeholder(placeholder);
    }

    let query = StatQuery {
        bus_carrier: None,
        countries: country.countries.clone(),
        facet: country.facet,
    };
    let result = match kind {
        ExpenditureKind::Capex => stats.capex(n, &query),
        ExpenditureKind::Opex => stats.opex(n, &query),
    };

    let table = match result {
        Ok(table) => table,
        Err(err) => {
            warn!(kind = ?kind, error = %err, "expenditure statistic failed");
            return PanelState::Rendered(vec![PanelItem::Error {
                context: kind.context().to_string(),
                message: err.to_string(),
            }]);
        }
    };
    if table.is_empty() {
        return PanelState::Placeholder(Placeholder::NoData);
    }

    let template = ChartTemplate::for_dark(filter.dark_mode);
    let suffix = countries_suffix(country.countries.as_deref());
    let bars = table
        .rows
        .iter()
        .map(|row| Bar {
            label: row_label(n, row),
            color: carrier_color(n, &row.carrier, &template),
            value: row.value,
        })
        .collect();
    PanelState::Rendered(vec![PanelItem::Figure(Figure {
        title: format!("{}{suffix}", kind.title()),
        template,
        body: FigureBody::Bars(bars),
    })])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CountryMode, TabId};
    use nex_core::{BalanceTable, NexError, NexResult, StatRow, StatTable, Statistics as StatsTrait};

    struct SplitStats;

    impl StatsTrait for SplitStats {
        fn energy_balance(&self, _: &Network, _: &StatQuery) -> NexResult<BalanceTable> {
            Ok(BalanceTable::default())
        }

        fn energy_balance_aggregated(&self, _: &Network, _: &StatQuery) -> NexResult<StatTable> {
            Ok(StatTable::default())
        }

        fn optimal_capacity(&self, _: &Network, _: &StatQuery) -> NexResult<StatTable> {
            Ok(StatTable::default())
        }

        fn capex(&self, _: &Network, q: &StatQuery) -> NexResult<StatTable> {
            assert_eq!(q.bus_carrier, None);
            Ok(StatTable {
                rows: vec![StatRow {
                    carrier: "wind".into(),
                    country: None,
                    value: 1000.0,
                }],
            })
        }

        fn opex(&self, _: &Network, _: &StatQuery) -> NexResult<StatTable> {
            Err(NexError::Stats("opex unavailable".into()))
        }
    }

    fn filter() -> FilterSelection {
        FilterSelection {
            active_network: "n".into(),
            selected_carriers: Vec::new(),
            country_mode: CountryMode::All,
            selected_countries: Vec::new(),
            active_tab: TabId::Capex,
            dark_mode: false,
        }
    }

    #[test]
    fn capex_renders_without_carrier_selection() {
        let state = render_expenditure(
            &Network::default(),
            &SplitStats,
            &filter(),
            ExpenditureKind::Capex,
        );
        assert_eq!(state.figure_count(), 1);
        match state {
            PanelState::Rendered(items) => match &items[0] {
                PanelItem::Figure(fig) => {
                    assert_eq!(fig.title, "Capital Expenditure Totals");
                }
                other => panic!("unexpected item: {other:?}"),
            },
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[test]
    fn opex_failure_is_a_single_error_item() {
        let state = render_expenditure(
            &Network::default(),
            &SplitStats,
            &filter(),
            ExpenditureKind::Opex,
        );
        assert!(state.fully_failed());
        match state {
            PanelState::Rendered(items) => match &items[0] {
                PanelItem::Error { context, message } => {
                    assert_eq!(context, "OPEX chart");
                    assert!(message.contains("opex unavailable"));
                }
                other => panic!("unexpected item: {other:?}"),
            },
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[test]
    fn specific_mode_without_countries_blocks() {
        let mut f = filter();
        f.country_mode = CountryMode::Specific;
        let state = render_expenditure(
            &Network::default(),
            &SplitStats,
            &f,
            ExpenditureKind::Capex,
        );
        assert_eq!(state, PanelState::Placeholder(Placeholder::SelectCountry));
    }
}
