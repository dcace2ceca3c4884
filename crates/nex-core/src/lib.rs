//! # nex-core: Energy Network Model Core
//!
//! Provides the data structures backing the network explorer dashboard:
//! component tables, carrier metadata, snapshot-aligned time series, and
//! the statistics accessor used by every chart panel.
//!
//! ## Design
//!
//! Networks are plain, serde-derived component tables rather than a live
//! simulation object: the dashboard only reads them. A network is loaded
//! once, normalized (see [`carriers::ensure_carriers_defined`]) and then
//! treated as immutable for the lifetime of the process. Derived numbers
//! (energy balance, capacities, expenditure) are produced on demand by a
//! [`Statistics`] implementation, never cached.
//!
//! ## Modules
//!
//! - [`carriers`] - Carrier normalization, display names, filter options
//! - [`error`] - Unified error type for the explorer ecosystem
//! - [`statistics`] - Aggregate tables behind the chart panels
//! - [`table`] - Row-oriented display tables with uniform downsampling

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod carriers;
pub mod error;
pub mod statistics;
pub mod table;

pub use carriers::{
    carrier_nice_name, carrier_options, country_options, ensure_carriers_defined,
    title_except_multi_caps, SelectOption,
};
pub use error::{NexError, NexResult};
pub use statistics::{
    BalanceRow, BalanceTable, NetworkStatistics, StatQuery, StatRow, StatTable, Statistics,
};
pub use table::{SampleInfo, Table, MAX_DISPLAY_ROWS};

/// Sentinel carrier excluded from every filter widget.
pub const NONE_CARRIER: &str = "none";

/// An energy carrier's display metadata.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Carrier {
    pub nice_name: String,
    pub color: String,
}

/// A network node. Components attach to buses; the bus determines the
/// country and bus-carrier used for filtering.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Bus {
    pub name: String,
    pub carrier: String,
    pub country: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Generator {
    pub name: String,
    pub bus: String,
    pub carrier: String,
    pub p_nom: f64,
    pub p_nom_opt: f64,
    pub capital_cost: f64,
    pub marginal_cost: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Line {
    pub name: String,
    pub bus0: String,
    pub bus1: String,
    pub carrier: String,
    pub s_nom: f64,
    pub s_nom_opt: f64,
    pub capital_cost: f64,
    pub length: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub name: String,
    pub bus0: String,
    pub bus1: String,
    pub carrier: String,
    pub p_nom: f64,
    pub p_nom_opt: f64,
    pub capital_cost: f64,
    pub marginal_cost: f64,
    pub efficiency: f64,
}

impl Default for Link {
    fn default() -> Self {
        Link {
            name: String::new(),
            bus0: String::new(),
            bus1: String::new(),
            carrier: String::new(),
            p_nom: 0.0,
            p_nom_opt: 0.0,
            capital_cost: 0.0,
            marginal_cost: 0.0,
            efficiency: 1.0,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageUnit {
    pub name: String,
    pub bus: String,
    pub carrier: String,
    pub p_nom: f64,
    pub p_nom_opt: f64,
    pub capital_cost: f64,
    pub marginal_cost: f64,
    pub max_hours: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Store {
    pub name: String,
    pub bus: String,
    pub carrier: String,
    pub e_nom: f64,
    pub e_nom_opt: f64,
    pub capital_cost: f64,
    pub marginal_cost: f64,
}

/// One time-varying attribute: a matrix of values with one row per
/// snapshot and one column per component.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesFrame {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl SeriesFrame {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.values.is_empty()
    }

    /// Per-snapshot values for a named component, if the frame carries it.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(
            self.values
                .iter()
                .map(|row| row.get(idx).copied().unwrap_or(0.0))
                .collect(),
        )
    }
}

/// The time-indexed companion of a component table, keyed by attribute
/// name (e.g. `"p"` for active power).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesStore(BTreeMap<String, SeriesFrame>);

impl SeriesStore {
    pub fn insert(&mut self, attr: impl Into<String>, frame: SeriesFrame) {
        self.0.insert(attr.into(), frame);
    }

    pub fn get(&self, attr: &str) -> Option<&SeriesFrame> {
        self.0.get(attr)
    }

    /// Attributes that actually hold tabular data. This is a capability
    /// check over the stored frames, not a hardcoded attribute list.
    pub fn attrs(&self) -> Vec<String> {
        self.0
            .iter()
            .filter(|(_, frame)| !frame.is_empty())
            .map(|(attr, _)| attr.clone())
            .collect()
    }
}

/// The six component classes the dashboard exposes directly.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ComponentClass {
    Buses,
    Generators,
    Lines,
    Links,
    StorageUnits,
    Stores,
}

impl ComponentClass {
    pub const ALL: [ComponentClass; 6] = [
        ComponentClass::Buses,
        ComponentClass::Generators,
        ComponentClass::Lines,
        ComponentClass::Links,
        ComponentClass::StorageUnits,
        ComponentClass::Stores,
    ];

    /// Human-readable label shown on summary cards and the explorer title.
    pub fn label(&self) -> &'static str {
        match self {
            ComponentClass::Buses => "Nodes",
            ComponentClass::Generators => "Generators",
            ComponentClass::Lines => "Lines",
            ComponentClass::Links => "Links",
            ComponentClass::StorageUnits => "Storage Units",
            ComponentClass::Stores => "Stores",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ComponentClass::Buses => "buses",
            ComponentClass::Generators => "generators",
            ComponentClass::Lines => "lines",
            ComponentClass::Links => "links",
            ComponentClass::StorageUnits => "storage_units",
            ComponentClass::Stores => "stores",
        }
    }
}

/// A loaded network scenario: component tables, carrier metadata,
/// snapshots and the time-indexed companion stores.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Network {
    pub name: String,
    pub snapshots: Vec<String>,
    pub buses: Vec<Bus>,
    pub generators: Vec<Generator>,
    pub lines: Vec<Line>,
    pub links: Vec<Link>,
    pub storage_units: Vec<StorageUnit>,
    pub stores: Vec<Store>,
    pub carriers: BTreeMap<String, Carrier>,
    pub meta: serde_json::Value,
    pub generators_t: SeriesStore,
    pub lines_t: SeriesStore,
    pub links_t: SeriesStore,
    pub storage_units_t: SeriesStore,
    pub stores_t: SeriesStore,
    pub buses_t: SeriesStore,
}

impl Network {
    pub fn bus(&self, name: &str) -> Option<&Bus> {
        self.buses.iter().find(|b| b.name == name)
    }

    pub fn component_count(&self, class: ComponentClass) -> usize {
        match class {
            ComponentClass::Buses => self.buses.len(),
            ComponentClass::Generators => self.generators.len(),
            ComponentClass::Lines => self.lines.len(),
            ComponentClass::Links => self.links.len(),
            ComponentClass::StorageUnits => self.storage_units.len(),
            ComponentClass::Stores => self.stores.len(),
        }
    }

    pub fn series_store(&self, class: ComponentClass) -> &SeriesStore {
        match class {
            ComponentClass::Buses => &self.buses_t,
            ComponentClass::Generators => &self.generators_t,
            ComponentClass::Lines => &self.lines_t,
            ComponentClass::Links => &self.links_t,
            ComponentClass::StorageUnits => &self.storage_units_t,
            ComponentClass::Stores => &self.stores_t,
        }
    }

    /// Static component table in display form.
    pub fn static_table(&self, class: ComponentClass) -> Table {
        fn fmt(v: f64) -> String {
            if v == v.trunc() && v.abs() < 1e12 {
                format!("{v:.0}")
            } else {
                format!("{v:.4}")
            }
        }

        match class {
            ComponentClass::Buses => Table::new(
                ["name", "carrier", "country", "x", "y"],
                self.buses
                    .iter()
                    .map(|b| {
                        vec![
                            b.name.clone(),
                            b.carrier.clone(),
                            b.country.clone(),
                            fmt(b.x),
                            fmt(b.y),
                        ]
                    })
                    .collect(),
            ),
            ComponentClass::Generators => Table::new(
                [
                    "name",
                    "bus",
                    "carrier",
                    "p_nom",
                    "p_nom_opt",
                    "capital_cost",
                    "marginal_cost",
                ],
                self.generators
                    .iter()
                    .map(|g| {
                        vec![
                            g.name.clone(),
                            g.bus.clone(),
                            g.carrier.clone(),
                            fmt(g.p_nom),
                            fmt(g.p_nom_opt),
                            fmt(g.capital_cost),
                            fmt(g.marginal_cost),
                        ]
                    })
                    .collect(),
            ),
            ComponentClass::Lines => Table::new(
                [
                    "name",
                    "bus0",
                    "bus1",
                    "carrier",
                    "s_nom",
                    "s_nom_opt",
                    "capital_cost",
                    "length",
                ],
                self.lines
                    .iter()
                    .map(|l| {
                        vec![
                            l.name.clone(),
                            l.bus0.clone(),
                            l.bus1.clone(),
                            l.carrier.clone(),
                            fmt(l.s_nom),
                            fmt(l.s_nom_opt),
                            fmt(l.capital_cost),
                            fmt(l.length),
                        ]
                    })
                    .collect(),
            ),
            ComponentClass::Links => Table::new(
                [
                    "name",
                    "bus0",
                    "bus1",
                    "carrier",
                    "p_nom",
                    "p_nom_opt",
                    "capital_cost",
                    "marginal_cost",
                    "efficiency",
                ],
                self.links
                    .iter()
                    .map(|l| {
                        vec![
                            l.name.clone(),
                            l.bus0.clone(),
                            l.bus1.clone(),
                            l.carrier.clone(),
                            fmt(l.p_nom),
                            fmt(l.p_nom_opt),
                            fmt(l.capital_cost),
                            fmt(l.marginal_cost),
                            fmt(l.efficiency),
                        ]
                    })
                    .collect(),
            ),
            ComponentClass::StorageUnits => Table::new(
                [
                    "name",
                    "bus",
                    "carrier",
                    "p_nom",
                    "p_nom_opt",
                    "capital_cost",
                    "marginal_cost",
                    "max_hours",
                ],
                self.storage_units
                    .iter()
                    .map(|s| {
                        vec![
                            s.name.clone(),
                            s.bus.clone(),
                            s.carrier.clone(),
                            fmt(s.p_nom),
                            fmt(s.p_nom_opt),
                            fmt(s.capital_cost),
                            fmt(s.marginal_cost),
                            fmt(s.max_hours),
                        ]
                    })
                    .collect(),
            ),
            ComponentClass::Stores => Table::new(
                [
                    "name",
                    "bus",
                    "carrier",
                    "e_nom",
                    "e_nom_opt",
                    "capital_cost",
                    "marginal_cost",
                ],
                self.stores
                    .iter()
                    .map(|s| {
                        vec![
                            s.name.clone(),
                            s.bus.clone(),
                            s.carrier.clone(),
                            fmt(s.e_nom),
                            fmt(s.e_nom_opt),
                            fmt(s.capital_cost),
                            fmt(s.marginal_cost),
                        ]
                    })
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_store_attrs_skips_empty_frames() {
        let mut store = SeriesStore::default();
        store.insert("p", SeriesFrame {
            columns: vec!["g1".into()],
            values: vec![vec![1.0]],
        });
        store.insert("q", SeriesFrame::default());
        assert_eq!(store.attrs(), vec!["p".to_string()]);
    }

    #[test]
    fn series_frame_column_lookup() {
        let frame = SeriesFrame {
            columns: vec!["a".into(), "b".into()],
            values: vec![vec![1.0, 2.0], vec![3.0, 4.0]],
        };
        assert_eq!(frame.column("b"), Some(vec![2.0, 4.0]));
        assert_eq!(frame.column("c"), None);
    }

    #[test]
    fn network_roundtrips_through_json() {
        let mut n = Network {
            name: "demo".into(),
            snapshots: vec!["t0".into()],
            ..Network::default()
        };
        n.buses.push(Bus {
            name: "b1".into(),
            carrier: "AC".into(),
            country: "DE".into(),
            ..Bus::default()
        });
        let text = serde_json::to_string(&n).unwrap();
        let back: Network = serde_json::from_str(&text).unwrap();
        assert_eq!(back.buses.len(), 1);
        assert_eq!(back.buses[0].country, "DE");
    }

    #[test]
    fn link_efficiency_defaults_to_one() {
        let link: Link = serde_json::from_str(r#"{"name": "l1"}"#).unwrap();
        assert_eq!(link.efficiency, 1.0);
    }

    #[test]
    fn static_table_has_row_per_component() {
        let mut n = Network::default();
        n.generators.push(Generator {
            name: "g1".into(),
            bus: "b1".into(),
            carrier: "wind".into(),
            p_nom: 10.0,
            ..Generator::default()
        });
        let table = n.static_table(ComponentClass::Generators);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.columns[0], "name");
        assert_eq!(table.rows[0][0], "g1");
    }
}
