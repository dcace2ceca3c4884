//! Global application state (Elm-style model).

use crate::explorer::ExplorerState;
use crate::panel::{MetadataPanel, PanelState};
use crate::registry::NetworkRegistry;
use nex_core::{carrier_options, country_options, ComponentClass, Network, SelectOption, Statistics};
use std::collections::HashMap;
use std::sync::Arc;

/// Carriers pre-selected at startup when the first network carries them.
pub const DEFAULT_CARRIERS: [&str; 3] = ["AC", "Hydrogen Storage", "Low Voltage"];

/// Visualization tabs.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum TabId {
    EnergyBalance,
    EnergyBalanceAggregated,
    Capacity,
    Capex,
    Opex,
    NetworkConfig,
}

impl TabId {
    pub const ALL: [TabId; 6] = [
        TabId::EnergyBalance,
        TabId::EnergyBalanceAggregated,
        TabId::Capacity,
        TabId::Capex,
        TabId::Opex,
        TabId::NetworkConfig,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TabId::EnergyBalance => "Energy Balance",
            TabId::EnergyBalanceAggregated => "Aggregated Balance",
            TabId::Capacity => "Capacity",
            TabId::Capex => "CAPEX",
            TabId::Opex => "OPEX",
            TabId::NetworkConfig => "Network Config",
        }
    }

    pub fn hotkey(&self) -> char {
        match self {
            TabId::EnergyBalance => '1',
            TabId::EnergyBalanceAggregated => '2',
            TabId::Capacity => '3',
            TabId::Capex => '4',
            TabId::Opex => '5',
            TabId::NetworkConfig => '6',
        }
    }

    /// Panels living on this tab.
    pub fn panels(&self) -> &'static [PanelId] {
        match self {
            TabId::EnergyBalance => &[PanelId::EnergyBalance],
            TabId::EnergyBalanceAggregated => &[PanelId::EnergyBalanceAggregated],
            TabId::Capacity => &[PanelId::Capacity],
            TabId::Capex => &[PanelId::Capex],
            TabId::Opex => &[PanelId::Opex],
            TabId::NetworkConfig => &[PanelId::NetworkMap, PanelId::Metadata],
        }
    }

    /// Whether the carrier checklist applies on this tab (capex/opex are
    /// carrier-independent aggregates).
    pub fn carrier_dependent(&self) -> bool {
        matches!(
            self,
            TabId::EnergyBalance | TabId::EnergyBalanceAggregated | TabId::Capacity
        )
    }
}

/// Identity of one renderable panel.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum PanelId {
    EnergyBalance,
    EnergyBalanceAggregated,
    Capacity,
    Capex,
    Opex,
    NetworkMap,
    Metadata,
    Header,
}

impl PanelId {
    /// The tab hosting this panel; `None` for the always-visible header.
    pub fn tab(&self) -> Option<TabId> {
        match self {
            PanelId::EnergyBalance => Some(TabId::EnergyBalance),
            PanelId::EnergyBalanceAggregated => Some(TabId::EnergyBalanceAggregated),
            PanelId::Capacity => Some(TabId::Capacity),
            PanelId::Capex => Some(TabId::Capex),
            PanelId::Opex => Some(TabId::Opex),
            PanelId::NetworkMap | PanelId::Metadata => Some(TabId::NetworkConfig),
            PanelId::Header => None,
        }
    }

    /// Chart panels affected by a carrier-selection change.
    pub const CARRIER_PANELS: [PanelId; 3] = [
        PanelId::EnergyBalance,
        PanelId::EnergyBalanceAggregated,
        PanelId::Capacity,
    ];

    /// Chart panels affected by a country-filter change.
    pub const COUNTRY_PANELS: [PanelId; 5] = [
        PanelId::EnergyBalance,
        PanelId::EnergyBalanceAggregated,
        PanelId::Capacity,
        PanelId::Capex,
        PanelId::Opex,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountryMode {
    All,
    Specific,
}

/// The user-controlled selection every panel renders from.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterSelection {
    pub active_network: String,
    pub selected_carriers: Vec<String>,
    pub country_mode: CountryMode,
    pub selected_countries: Vec<String>,
    pub active_tab: TabId,
    pub dark_mode: bool,
}

/// Top-level page: the landing screen listing loaded networks, or the
/// dashboard proper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Dashboard,
}

/// Which filter checklist keyboard input addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Carriers,
    Countries,
}

/// Summary-card counts shown in the header; each card opens the data
/// explorer for its component class.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeaderStats {
    pub counts: Vec<(ComponentClass, usize)>,
}

impl HeaderStats {
    pub fn for_network(n: &Network) -> Self {
        HeaderStats {
            counts: ComponentClass::ALL
                .iter()
                .map(|&class| (class, n.component_count(class)))
                .collect(),
        }
    }
}

/// Launch options for the programmatic entry point.
pub struct DashboardOptions {
    pub title: String,
    /// Overrides the persisted dark-mode preference when set.
    pub dark_mode: Option<bool>,
    /// Persist the dark-mode flag across sessions.
    pub persist_prefs: bool,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        DashboardOptions {
            title: "Energy Network Explorer".to_string(),
            dark_mode: None,
            persist_prefs: true,
        }
    }
}

pub struct AppState {
    pub registry: Arc<NetworkRegistry>,
    pub stats: Arc<dyn Statistics>,
    pub title: String,
    pub screen: Screen,
    pub filter: FilterSelection,
    pub carrier_options: Vec<SelectOption>,
    pub country_options: Vec<SelectOption>,
    pub panels: HashMap<PanelId, PanelState>,
    pub metadata: MetadataPanel,
    pub header: HeaderStats,
    pub explorer: Option<ExplorerState>,
    pub focus: Focus,
    pub carrier_cursor: usize,
    pub country_cursor: usize,
    pub should_quit: bool,
    pub terminal_width: u16,
    pub terminal_height: u16,
}

impl AppState {
    pub fn new(
        registry: Arc<NetworkRegistry>,
        stats: Arc<dyn Statistics>,
        opts: &DashboardOptions,
    ) -> Self {
        let active = registry.first_label().to_string();
        let (carrier_opts, country_opts) = match registry.get(&active) {
            Some(n) => (carrier_options(n), country_options(n)),
            None => (Vec::new(), Vec::new()),
        };
        let selected_carriers = default_carriers(&carrier_opts);

        AppState {
            registry,
            stats,
            title: opts.title.clone(),
            screen: Screen::Welcome,
            filter: FilterSelection {
                active_network: active,
                selected_carriers,
                country_mode: CountryMode::All,
                selected_countries: Vec::new(),
                active_tab: TabId::EnergyBalance,
                dark_mode: opts.dark_mode.unwrap_or(false),
            },
            carrier_options: carrier_opts,
            country_options: country_opts,
            panels: HashMap::new(),
            metadata: MetadataPanel::NotRendered,
            header: HeaderStats::default(),
            explorer: None,
            focus: Focus::Carriers,
            carrier_cursor: 0,
            country_cursor: 0,
            should_quit: false,
            terminal_width: 80,
            terminal_height: 24,
        }
    }

    pub fn active_network(&self) -> Option<&Network> {
        self.registry.get(&self.filter.active_network)
    }

    pub fn panel(&self, id: PanelId) -> &PanelState {
        static NOT_RENDERED: PanelState = PanelState::NotRendered;
        self.panels.get(&id).unwrap_or(&NOT_RENDERED)
    }
}

/// Initial carrier selection: the fixed defaults the network actually
/// carries, else the first available option. Also applied after a
/// network switch leaves the retained selection empty.
pub(crate) fn default_carriers(options: &[SelectOption]) -> Vec<String> {
    let preset: Vec<String> = DEFAULT_CARRIERS
        .iter()
        .filter(|c| options.iter().any(|o| &o.id == *c))
        .map(|c| c.to_string())
        .collect();
    if !preset.is_empty() {
        return preset;
    }
    options.first().map(|o| vec![o.id.clone()]).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nex_core::{Bus, NetworkStatistics};

    fn network(carriers: &[&str]) -> Network {
        let mut n = Network::default();
        for (i, c) in carriers.iter().enumerate() {
            n.buses.push(Bus {
                name: format!("b{i}"),
                carrier: c.to_string(),
                country: "DE".into(),
                ..Bus::default()
            });
        }
        n
    }

    fn state_for(carriers: &[&str]) -> AppState {
        let registry = Arc::new(
            NetworkRegistry::new(vec![("Base".into(), network(carriers))]).unwrap(),
        );
        AppState::new(registry, Arc::new(NetworkStatistics), &DashboardOptions::default())
    }

    #[test]
    fn defaults_pick_known_carriers() {
        let state = state_for(&["AC", "Low Voltage", "gas"]);
        assert_eq!(
            state.filter.selected_carriers,
            vec!["AC".to_string(), "Low Voltage".to_string()]
        );
    }

    #[test]
    fn defaults_fall_back_to_first_option() {
        let state = state_for(&["wind", "solar"]);
        assert_eq!(state.filter.selected_carriers, vec!["solar".to_string()]);
    }

    #[test]
    fn initial_tab_and_mode() {
        let state = state_for(&["AC"]);
        assert_eq!(state.screen, Screen::Welcome);
        assert_eq!(state.filter.active_tab, TabId::EnergyBalance);
        assert_eq!(state.filter.country_mode, CountryMode::All);
        assert!(state.filter.selected_countries.is_empty());
        assert!(!state.filter.dark_mode);
    }

    #[test]
    fn panel_ids_map_to_tabs() {
        assert_eq!(PanelId::Capex.tab(), Some(TabId::Capex));
        assert_eq!(PanelId::Header.tab(), None);
        assert!(!TabId::Capex.carrier_dependent());
        assert!(TabId::Capacity.carrier_dependent());
    }
}
