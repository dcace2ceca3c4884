//! Optimal-capacity panel.

use crate::filter::resolve_country_filter;
use crate::models::FilterSelection;
use crate::panel::{Bar, Figure, FigureBody, PanelItem, PanelState, Placeholder};
use crate::panels::{carrier_color, countries_suffix, row_label};
use crate::theme::ChartTemplate;
use nex_core::{carrier_nice_name, Network, StatQuery, Statistics};
use tracing::warn;

/// One bar figure per selected carrier, isolated failures like the
/// balance panels.
pub fn render_capacity(
    n: &Network,
    stats: &dyn Statistics,
    filter: &FilterSelection,
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
        match stats.optimal_capacity(n, &query) {
            Ok(table) if table.is_empty() => {}
            Ok(table) => {
                let nice = carrier_nice_name(n, carrier);
                let bars = table
                    .rows
                    .iter()
                    .map(|row| Bar {
                        label: row_label(n, row),
                        color: carrier_color(n, &row.carrier, &template),
                        value: row.value,
                    })
                    .collect();
                items.push(PanelItem::Figure(Figure {
                    title: format!("Optimal Capacity for {nice}{suffix}"),
                    template,
                    body: FigureBody::Bars(bars),
                }));
            }
            Err(err) => {
                warn!(carrier = %carrier, error = %err, "capacity statistic failed");
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
