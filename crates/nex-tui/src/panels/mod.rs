//! Panel renderers.
//!
//! Each renderer is a pure function from (network, statistics, filter
//! selection) to a [`PanelState`]. Renderers never touch terminal
//! output; the view draws whatever state they produced last.

mod capacity;
mod energy_balance;
mod expenditure;
mod map;
mod metadata;

pub use capacity::render_capacity;
pub use energy_balance::render_energy_balance;
pub use expenditure::{render_expenditure, ExpenditureKind};
pub use map::render_network_map;
pub use metadata::render_metadata;

use crate::theme::{parse_hex_color, ChartTemplate};
use nex_core::{carrier_nice_name, Network, StatRow};
use ratatui::style::Color;

/// Carrier color from the network's carrier table, falling back to the
/// template text color.
pub(crate) fn carrier_color(n: &Network, carrier: &str, template: &ChartTemplate) -> Color {
    n.carriers
        .get(carrier)
        .and_then(|c| parse_hex_color(&c.color))
        .unwrap_or(template.text)
}

/// Figure-title suffix naming the active country restriction.
pub(crate) fn countries_suffix(countries: Option<&[String]>) -> String {
    match countries {
        Some(list) if !list.is_empty() => format!(" (Countries: {})", list.join(", ")),
        _ => String::new(),
    }
}

/// Display label for a grouped statistic row.
pub(crate) fn row_label(n: &Network, row: &StatRow) -> String {
    let name = carrier_nice_name(n, &row.carrier);
    match &row.country {
        Some(country) => format!("{name} ({country})"),
        None => name,
    }
}
