//! Message dispatch and panel refresh.
//!
//! `update` applies a message to the state and reports which panels went
//! stale; `refresh_panels` recomputes exactly those. Staleness is gated
//! to the active tab: a filter change while another tab is showing
//! refreshes nothing now, and the panel recomputes when its tab is next
//! activated (every tab switch refreshes the incoming tab's panels).

use crate::explorer::ExplorerState;
use crate::message::Message;
use crate::models::{AppState, CountryMode, Focus, HeaderStats, PanelId, Screen};
use crate::panels::{
    render_capacity, render_energy_balance, render_expenditure, render_metadata,
    render_network_map, ExpenditureKind,
};
use nex_core::{carrier_options, country_options};
use tracing::debug;

/// Outcome of one message.
///
/// `None` means the message was a no-op against the current state; the
/// state is bit-for-bit unchanged. `Panels(vec![])` means state changed
/// but no panel output depends on it.
#[derive(Clone, Debug, PartialEq)]
pub enum Update {
    Panels(Vec<PanelId>),
    None,
}

/// Apply `msg` and recompute whatever it made stale.
pub fn dispatch(state: &mut AppState, msg: Message) -> Update {
    let outcome = update(state, msg);
    if let Update::Panels(panels) = &outcome {
        refresh_panels(state, panels);
    }
    outcome
}

/// Pure state transition. Callers must follow up with [`refresh_panels`]
/// for the returned list ([`dispatch`] does both).
pub fn update(state: &mut AppState, msg: Message) -> Update {
    match msg {
        Message::EnterDashboard => {
            if state.screen == Screen::Dashboard {
                return Update::None;
            }
            state.screen = Screen::Dashboard;
            let mut stale = vec![PanelId::Header];
            stale.extend_from_slice(state.filter.active_tab.panels());
            Update::Panels(stale)
        }
        Message::SwitchNetwork(label) => {
            if label == state.filter.active_network || state.registry.get(&label).is_none() {
                return Update::None;
            }
            debug!(network = %label, "switching network");
            state.filter.active_network = label;
            sync_network_options(state);
            // Header is always on screen; everything else is tab-gated
            // and recomputes when its tab is next activated.
            let mut stale = vec![PanelId::Header];
            stale.extend_from_slice(state.filter.active_tab.panels());
            Update::Panels(stale)
        }
        Message::NextNetwork => {
            if state.registry.len() <= 1 {
                return Update::None;
            }
            let next = state
                .registry
                .next_label(&state.filter.active_network)
                .to_string();
            update(state, Message::SwitchNetwork(next))
        }
        Message::ToggleCarrier(carrier) => {
            toggle(&mut state.filter.selected_carriers, carrier);
            Update::Panels(gated(state, &PanelId::CARRIER_PANELS))
        }
        Message::SetCarriers(carriers) => {
            if carriers == state.filter.selected_carriers {
                return Update::None;
            }
            state.filter.selected_carriers = carriers;
            Update::Panels(gated(state, &PanelId::CARRIER_PANELS))
        }
        Message::SetCountryMode(mode) => {
            if mode == state.filter.country_mode {
                return Update::None;
            }
            set_country_mode(state, mode);
            Update::Panels(gated(state, &PanelId::COUNTRY_PANELS))
        }
        Message::ToggleCountryMode => {
            let next = match state.filter.country_mode {
                CountryMode::All => CountryMode::Specific,
                CountryMode::Specific => CountryMode::All,
            };
            set_country_mode(state, next);
            Update::Panels(gated(state, &PanelId::COUNTRY_PANELS))
        }
        Message::ToggleCountry(country) => {
            // The checklist is disabled in All mode; keyboard focus can
            // still reach it, so the guard lives here, not in the view.
            if state.filter.country_mode != CountryMode::Specific {
                return Update::None;
            }
            toggle(&mut state.filter.selected_countries, country);
            Update::Panels(gated(state, &PanelId::COUNTRY_PANELS))
        }
        Message::SetCountries(countries) => {
            if countries == state.filter.selected_countries {
                return Update::None;
            }
            state.filter.selected_countries = countries;
            Update::Panels(gated(state, &PanelId::COUNTRY_PANELS))
        }
        Message::SwitchTab(tab) => {
            if tab == state.filter.active_tab {
                return Update::None;
            }
            state.filter.active_tab = tab;
            Update::Panels(tab.panels().to_vec())
        }
        Message::ToggleDarkMode => {
            state.filter.dark_mode = !state.filter.dark_mode;
            Update::Panels(state.filter.active_tab.panels().to_vec())
        }
        Message::OpenExplorer(class) => {
            let registry = state.registry.clone();
            let Some(n) = registry.get(&state.filter.active_network) else {
                return Update::None;
            };
            state.explorer = Some(ExplorerState::open(n, class));
            Update::Panels(Vec::new())
        }
        Message::CloseExplorer => {
            if state.explorer.take().is_none() {
                return Update::None;
            }
            Update::Panels(Vec::new())
        }
        Message::SelectSeriesAttr(attr) => with_explorer(state, |explorer, n| {
            if explorer.series_attrs.contains(&attr)
                && explorer.selected_attr.as_ref() != Some(&attr)
            {
                explorer.load_series(n, &attr);
                true
            } else {
                false
            }
        }),
        Message::NextSeriesAttr => with_explorer(state, |explorer, n| {
            if explorer.series_attrs.len() < 2 {
                return false;
            }
            explorer.cycle_attr(n, 1);
            true
        }),
        Message::PrevSeriesAttr => with_explorer(state, |explorer, n| {
            if explorer.series_attrs.len() < 2 {
                return false;
            }
            explorer.cycle_attr(n, -1);
            true
        }),
        Message::FocusNext => {
            state.focus = match state.focus {
                Focus::Carriers => Focus::Countries,
                Focus::Countries => Focus::Carriers,
            };
            Update::Panels(Vec::new())
        }
        Message::CursorUp => move_cursor(state, -1),
        Message::CursorDown => move_cursor(state, 1),
        Message::ToggleSelected => {
            let msg = match state.focus {
                Focus::Carriers => state
                    .carrier_options
                    .get(state.carrier_cursor)
                    .map(|o| Message::ToggleCarrier(o.id.clone())),
                Focus::Countries => state
                    .country_options
                    .get(state.country_cursor)
                    .map(|o| Message::ToggleCountry(o.id.clone())),
            };
            match msg {
                Some(msg) => update(state, msg),
                None => Update::None,
            }
        }
        Message::ScrollUp => scroll_explorer(state, -1),
        Message::ScrollDown => scroll_explorer(state, 1),
        Message::Resize(w, h) => {
            if (w, h) == (state.terminal_width, state.terminal_height) {
                return Update::None;
            }
            state.terminal_width = w;
            state.terminal_height = h;
            Update::Panels(Vec::new())
        }
        Message::Quit => {
            state.should_quit = true;
            Update::Panels(Vec::new())
        }
    }
}

/// Render everything visible at startup: the header cards and the
/// panels of the initial tab plus the network-config pair, so a first
/// tab switch shows content immediately.
pub fn bootstrap(state: &mut AppState) {
    let mut panels = vec![PanelId::Header, PanelId::NetworkMap, PanelId::Metadata];
    for &id in state.filter.active_tab.panels() {
        if !panels.contains(&id) {
            panels.push(id);
        }
    }
    refresh_panels(state, &panels);
}

/// Recompute the listed panels against the active network.
pub fn refresh_panels(state: &mut AppState, panels: &[PanelId]) {
    let registry = state.registry.clone();
    let stats = state.stats.clone();
    let Some(n) = registry.get(&state.filter.active_network) else {
        return;
    };
    let filter = state.filter.clone();

    for &id in panels {
        match id {
            PanelId::Header => {
                state.header = HeaderStats::for_network(n);
            }
            PanelId::EnergyBalance => {
                let out = render_energy_balance(n, stats.as_ref(), &filter, false);
                state.panels.insert(id, out);
            }
            PanelId::EnergyBalanceAggregated => {
                let out = render_energy_balance(n, stats.as_ref(), &filter, true);
                state.panels.insert(id, out);
            }
            PanelId::Capacity => {
                let out = render_capacity(n, stats.as_ref(), &filter);
                state.panels.insert(id, out);
            }
            PanelId::Capex => {
                let out = render_expenditure(n, stats.as_ref(), &filter, ExpenditureKind::Capex);
                state.panels.insert(id, out);
            }
            PanelId::Opex => {
                let out = render_expenditure(n, stats.as_ref(), &filter, ExpenditureKind::Opex);
                state.panels.insert(id, out);
            }
            PanelId::NetworkMap => {
                let out = render_network_map(n, filter.dark_mode);
                state.panels.insert(id, out);
            }
            PanelId::Metadata => {
                state.metadata = render_metadata(n);
            }
        }
    }
}

/// After a network switch: rebuild the filter options, drop selections
/// the new network cannot satisfy, and re-key an open explorer.
fn sync_network_options(state: &mut AppState) {
    let registry = state.registry.clone();
    let Some(n) = registry.get(&state.filter.active_network) else {
        return;
    };
    state.carrier_options = carrier_options(n);
    state.country_options = country_options(n);
    state
        .filter
        .selected_carriers
        .retain(|c| state.carrier_options.iter().any(|o| &o.id == c));
    if state.filter.selected_carriers.is_empty() {
        state.filter.selected_carriers = crate::models::default_carriers(&state.carrier_options);
    }
    state
        .filter
        .selected_countries
        .retain(|c| state.country_options.iter().any(|o| &o.id == c));
    state.carrier_cursor = state
        .carrier_cursor
        .min(state.carrier_options.len().saturating_sub(1));
    state.country_cursor = state
        .country_cursor
        .min(state.country_options.len().saturating_sub(1));

    if let Some(explorer) = state.explorer.take() {
        state.explorer = Some(explorer.rekey(n));
    }
}

/// Every mode change resets the country selection. Entering Specific
/// therefore starts empty, forcing the select-countries placeholder
/// until the user picks at least one.
fn set_country_mode(state: &mut AppState, mode: CountryMode) {
    state.filter.country_mode = mode;
    state.filter.selected_countries.clear();
}

fn toggle(list: &mut Vec<String>, item: String) {
    match list.iter().position(|x| x == &item) {
        Some(idx) => {
            list.remove(idx);
        }
        None => list.push(item),
    }
}

/// Stale set for a filter change: the affected chart panels that are
/// actually on screen.
fn gated(state: &AppState, affected: &[PanelId]) -> Vec<PanelId> {
    let visible = state.filter.active_tab.panels();
    affected
        .iter()
        .copied()
        .filter(|id| visible.contains(id))
        .collect()
}

fn with_explorer<F>(state: &mut AppState, f: F) -> Update
where
    F: FnOnce(&mut ExplorerState, &nex_core::Network) -> bool,
{
    let registry = state.registry.clone();
    let Some(n) = registry.get(&state.filter.active_network) else {
        return Update::None;
    };
    match state.explorer.as_mut() {
        Some(explorer) if explorer.visible => {
            if f(explorer, n) {
                Update::Panels(Vec::new())
            } else {
                Update::None
            }
        }
        _ => Update::None,
    }
}

fn move_cursor(state: &mut AppState, delta: isize) -> Update {
    let (cursor, len) = match state.focus {
        Focus::Carriers => (&mut state.carrier_cursor, state.carrier_options.len()),
        Focus::Countries => (&mut state.country_cursor, state.country_options.len()),
    };
    if len == 0 {
        return Update::None;
    }
    let next = (*cursor as isize + delta).clamp(0, len as isize - 1) as usize;
    if next == *cursor {
        return Update::None;
    }
    *cursor = next;
    Update::Panels(Vec::new())
}

fn scroll_explorer(state: &mut AppState, delta: isize) -> Update {
    let Some(explorer) = state.explorer.as_mut() else {
        return Update::None;
    };
    let next = (explorer.scroll as isize + delta).max(0) as usize;
    if next == explorer.scroll {
        return Update::None;
    }
    explorer.scroll = next;
    Update::Panels(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DashboardOptions, TabId};
    use crate::registry::NetworkRegistry;
    use nex_core::{Bus, Network, NetworkStatistics};
    use std::sync::Arc;

    fn network(carriers: &[&str], countries: &[&str]) -> Network {
        let mut n = Network::default();
        for (i, c) in carriers.iter().enumerate() {
            n.buses.push(Bus {
                name: format!("b{i}"),
                carrier: c.to_string(),
                country: countries.get(i % countries.len().max(1)).unwrap_or(&"DE").to_string(),
                ..Bus::default()
            });
        }
        n
    }

    fn two_network_state() -> AppState {
        let registry = NetworkRegistry::new(vec![
            ("First".into(), network(&["AC", "gas"], &["DE", "FR"])),
            ("Second".into(), network(&["AC"], &["ES"])),
        ])
        .unwrap();
        AppState::new(
            Arc::new(registry),
            Arc::new(NetworkStatistics),
            &DashboardOptions::default(),
        )
    }

    #[test]
    fn identical_selection_is_a_noop() {
        let mut state = two_network_state();
        let current = state.filter.selected_carriers.clone();
        assert_eq!(update(&mut state, Message::SetCarriers(current)), Update::None);
        assert_eq!(
            update(&mut state, Message::SetCountryMode(CountryMode::All)),
            Update::None
        );
        assert_eq!(
            update(&mut state, Message::SwitchTab(TabId::EnergyBalance)),
            Update::None
        );
        assert_eq!(
            update(&mut state, Message::SwitchNetwork("First".into())),
            Update::None
        );
    }

    #[test]
    fn carrier_change_is_gated_to_active_tab() {
        let mut state = two_network_state();
        assert_eq!(
            update(&mut state, Message::ToggleCarrier("gas".into())),
            Update::Panels(vec![PanelId::EnergyBalance])
        );

        state.filter.active_tab = TabId::Capex;
        assert_eq!(
            update(&mut state, Message::ToggleCarrier("gas".into())),
            Update::Panels(Vec::new())
        );
    }

    #[test]
    fn country_change_reaches_expenditure_tabs() {
        let mut state = two_network_state();
        state.filter.active_tab = TabId::Opex;
        update(&mut state, Message::SetCountryMode(CountryMode::Specific));
        assert_eq!(
            update(&mut state, Message::ToggleCountry("DE".into())),
            Update::Panels(vec![PanelId::Opex])
        );
    }

    #[test]
    fn leaving_specific_mode_clears_country_selection() {
        let mut state = two_network_state();
        update(&mut state, Message::ToggleCountryMode);
        update(&mut state, Message::ToggleCountry("DE".into()));
        assert_eq!(state.filter.selected_countries, vec!["DE".to_string()]);

        update(&mut state, Message::ToggleCountryMode);
        assert_eq!(state.filter.country_mode, CountryMode::All);
        assert!(state.filter.selected_countries.is_empty());
    }

    #[test]
    fn network_switch_drops_unknown_selections() {
        let mut state = two_network_state();
        state.filter.selected_carriers = vec!["AC".into(), "gas".into()];
        state.filter.selected_countries = vec!["DE".into()];

        let outcome = update(&mut state, Message::SwitchNetwork("Second".into()));
        assert!(matches!(outcome, Update::Panels(_)));
        assert_eq!(state.filter.selected_carriers, vec!["AC".to_string()]);
        assert!(state.filter.selected_countries.is_empty());
        let ids: Vec<&str> = state.country_options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["ES"]);
    }

    #[test]
    fn network_switch_refreshes_only_visible_panels() {
        let mut state = two_network_state();
        assert_eq!(
            update(&mut state, Message::SwitchNetwork("Second".into())),
            Update::Panels(vec![PanelId::Header, PanelId::EnergyBalance])
        );
    }

    #[test]
    fn tab_switch_refreshes_incoming_panels() {
        let mut state = two_network_state();
        assert_eq!(
            update(&mut state, Message::SwitchTab(TabId::NetworkConfig)),
            Update::Panels(vec![PanelId::NetworkMap, PanelId::Metadata])
        );
    }

    #[test]
    fn toggle_selected_follows_focus() {
        let mut state = two_network_state();
        state.carrier_cursor = 1; // "gas"
        update(&mut state, Message::ToggleSelected);
        assert!(state.filter.selected_carriers.contains(&"gas".to_string()));

        update(&mut state, Message::ToggleCountryMode);
        update(&mut state, Message::FocusNext);
        assert_eq!(state.focus, Focus::Countries);
        update(&mut state, Message::ToggleSelected);
        assert_eq!(state.filter.selected_countries, vec!["DE".to_string()]);
    }

    #[test]
    fn disabled_country_list_ignores_toggles_in_all_mode() {
        let mut state = two_network_state();
        update(&mut state, Message::FocusNext);
        assert_eq!(state.focus, Focus::Countries);
        assert_eq!(update(&mut state, Message::ToggleSelected), Update::None);
        assert_eq!(
            update(&mut state, Message::ToggleCountry("DE".into())),
            Update::None
        );
        assert!(state.filter.selected_countries.is_empty());

        // Entering Specific always starts with an empty selection.
        state.filter.selected_countries = vec!["DE".into()];
        update(&mut state, Message::SetCountryMode(CountryMode::Specific));
        assert!(state.filter.selected_countries.is_empty());
    }

    #[test]
    fn bootstrap_fills_header_and_initial_tab() {
        let mut state = two_network_state();
        bootstrap(&mut state);
        assert_eq!(state.header.counts.len(), 6);
        assert_ne!(
            state.panel(PanelId::EnergyBalance),
            &crate::panel::PanelState::NotRendered
        );
        assert_ne!(state.metadata, crate::panel::MetadataPanel::NotRendered);
    }
}
