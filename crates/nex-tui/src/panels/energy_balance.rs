//! Energy-balance panels (per-snapshot and aggregated).

use crate::filter::resolve_country_filter;
use crate::models::FilterSelection;
use crate::panel::{Bar, Figure, FigureBody, PanelItem, PanelState, Placeholder, Series};
use crate::panels::{carrier_color, countries_suffix, row_label};
use crate::theme::ChartTemplate;
use nex_core::{carrier_nice_name, Network, StatQuery, Statistics};
use tracing::warn;

/// Render the timeseries balance (one stacked-area figure per selected
/// carrier) or, with `aggregated`, one bar figure per carrier.
///
/// Failures are isolated per carrier: a failing statistic becomes an
/// inline error item and the remaining carriers still render.
pub fn render_energy_balance(
    n: &Network,
    stats: &dyn Statistics,
    filter: &FilterSelection,
    aggregated: bool,
) -> PanelState {
    if filter.selected_carriers.is_empty() {
        return PanelState::Placeholder(Placeholder::SelectCarrier);
    }
    let country = resolve_country_filter(filter.country_mode, &filter.selected_countries);
    if let Some(placeholder) = country.blocking {
        return PanelState::Placeholder(placeholder);
    }

    let template = ChartTemplate::for_dark(filter.dark_mode);
    let suffix = countries_suffix(country.countries.as_deref());
    let mut items = Vec::new();

    for carrier in &filter.selected_carriers {
        let query = StatQuery {
            bus_carrier: Some(carrier.clone()),
            countries: country.countries.clone(),
            facet: country.facet,
        };
        let nice = carrier_nice_name(n, carrier);

        let item = if aggregated {
            stats.energy_balance_aggregated(n, &query).map(|table| {
                if table.is_empty() {
                    return None;
                }
                let bars = table
                    .rows
                    .iter()
                    .map(|row| Bar {
                        label: row_label(n, row),
                        color: carrier_color(n, &row.carrier, &template),
                        value: row.value,
                    })
                    .collect();
                Some(Figure {
                    title: format!("Aggregated Balance for {nice}{suffix}"),
                    template,
                    body: FigureBody::Bars(bars),
                })
            })
        } else {
            stats.energy_balance(n, &query).map(|table| {
                if table.is_empty() {
                    return None;
                }
                let series = table
                    .rows
                    .iter()
                    .map(|row| Series {
                        name: {
                            let name = carrier_nice_name(n, &row.carrier);
                            match &row.country {
                                Some(country) => format!("{name} ({country})"),
                                None => name,
                            }
                        },
                        color: carrier_color(n, &row.carrier, &template),
                        points: row
                            .values
                            .iter()
                            .enumerate()
                            .map(|(i, v)| (i as f64, *v))
                            .collect(),
                    })
                    .collect();
                Some(Figure {
                    title: format!("Energy Balance for {nice}{suffix}"),
                    template,
                    body: FigureBody::Area {
                        snapshots: table.snapshots.clone(),
                        series,
                    },
                })
            })
        };

        match item {
            Ok(Some(figure)) => items.push(PanelItem::Figure(figure)),
            Ok(None) => {}
            Err(err) => {
                warn!(carrier = %carrier, error = %err, "energy balance failed");
                items.push(PanelItem::Error {
                    context: format!("carrier '{carrier}'"),
                    message: err.to_string(),
                });
            }
        }
    }

    if items.is_empty() {
        PanelState::Placeholder(Placeholder::NoData)
    } else {
        PanelState::Rendered(items)
    }
}
