//! Network-topology map panel.
//!
//! A scatter of bus coordinates, one series per bus carrier. Drawn from
//! the static tables only; there is no statistics call to fail, so the
//! only degenerate case is a network without buses.

use crate::panel::{Figure, FigureBody, PanelItem, PanelState, Placeholder, Series};
use crate::panels::carrier_color;
use crate::theme::ChartTemplate;
use nex_core::{carrier_nice_name, Network};
use std::collections::BTreeMap;

pub fn render_network_map(n: &Network, dark_mode: bool) -> PanelState {
    if n.buses.is_empty() {
        return PanelState::Placeholder(Placeholder::NoData);
    }

    let template = ChartTemplate::for_dark(dark_mode);
    let mut groups: BTreeMap<&str, Vec<(f64, f64)>> = BTreeMap::new();
    for bus in &n.buses {
        groups.entry(bus.carrier.as_str()).or_default().push((bus.x, bus.y));
    }

    let series = groups
        .into_iter()
        .map(|(carrier, points)| Series {
            name: carrier_nice_name(n, carrier),
            color: carrier_color(n, carrier, &template),
            points,
        })
        .collect();

    PanelState::Rendered(vec![PanelItem::Figure(Figure {
        title: "Network Topology".to_string(),
        template,
        body: FigureBody::Scatter(series),
    })])
}
