//! Data-explorer modal: raw component tables with time-series paging.
//!
//! Opening the explorer snapshots the active network's tables into the
//! modal state; it does not keep a network handle. Switching networks
//! while the modal is open rebuilds it against the new network (see the
//! update dispatcher), dropping the attribute selection if the new
//! network lacks it.

use nex_core::{ComponentClass, Network, SampleInfo, Table, MAX_DISPLAY_ROWS};

#[derive(Clone, Debug, PartialEq)]
pub struct ExplorerState {
    pub class: ComponentClass,
    pub title: String,
    pub static_table: Table,
    /// Time-series attributes the component class actually carries.
    pub series_attrs: Vec<String>,
    pub selected_attr: Option<String>,
    pub series_table: Option<Table>,
    pub series_sampling: Option<SampleInfo>,
    pub visible: bool,
    pub scroll: usize,
}

impl ExplorerState {
    /// Build the modal for one component class of `network`.
    pub fn open(network: &Network, class: ComponentClass) -> Self {
        let static_table = network.static_table(class);
        let title = format!("{} Data ({} records)", class.label(), static_table.rows.len());
        let series_attrs = network.series_store(class).attrs();

        let mut state = ExplorerState {
            class,
            title,
            static_table,
            series_attrs,
            selected_attr: None,
            series_table: None,
            series_sampling: None,
            visible: true,
            scroll: 0,
        };
        if let Some(attr) = state.series_attrs.first().cloned() {
            state.load_series(network, &attr);
        }
        state
    }

    /// Rebuild against another network, keeping the attribute selection
    /// when the new network still carries it.
    pub fn rekey(&self, network: &Network) -> Self {
        let mut next = ExplorerState::open(network, self.class);
        if let Some(attr) = &self.selected_attr {
            if next.series_attrs.contains(attr) {
                next.load_series(network, &attr.clone());
            }
        }
        next.visible = self.visible;
        next
    }

    /// Load one time-series attribute as a display table, snapshot
    /// labels first, downsampled to the display cap.
    pub fn load_series(&mut self, network: &Network, attr: &str) {
        let store = network.series_store(self.class);
        let Some(frame) = store.get(attr) else {
            self.selected_attr = None;
            self.series_table = None;
            self.series_sampling = None;
            return;
        };

        let mut columns = vec!["snapshot".to_string()];
        columns.extend(frame.columns.iter().cloned());
        let rows: Vec<Vec<String>> = frame
            .values
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let label = network
                    .snapshots
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| i.to_string());
                let mut out = Vec::with_capacity(row.len() + 1);
                out.push(label);
                out.extend(row.iter().map(|v| format!("{v:.4}")));
                out
            })
            .collect();

        let (table, sampling) = Table::new(columns, rows).downsample(MAX_DISPLAY_ROWS);
        self.selected_attr = Some(attr.to_string());
        self.series_table = Some(table);
        self.series_sampling = sampling;
        self.scroll = 0;
    }

    /// Cycle the attribute selection by `delta` (+1/-1), wrapping.
    pub fn cycle_attr(&mut self, network: &Network, delta: isize) {
        if self.series_attrs.is_empty() {
            return;
        }
        let len = self.series_attrs.len() as isize;
        let current = self
            .selected_attr
            .as_ref()
            .and_then(|a| self.series_attrs.iter().position(|x| x == a))
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        let attr = self.series_attrs[next].clone();
        self.load_series(network, &attr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nex_core::{Bus, Generator, SeriesFrame};

    fn network(snapshots: usize) -> Network {
        let mut n = Network::default();
        n.snapshots = (0..snapshots).map(|i| format!("t{i}")).collect();
        n.buses.push(Bus {
            name: "b1".into(),
            carrier: "AC".into(),
            ..Bus::default()
        });
        n.generators.push(Generator {
            name: "g1".into(),
            bus: "b1".into(),
            carrier: "wind".into(),
            ..Generator::default()
        });
        n.generators_t.insert(
            "p",
            SeriesFrame {
                columns: vec!["g1".into()],
                values: (0..snapshots).map(|i| vec![i as f64]).collect(),
            },
        );
        n
    }

    #[test]
    fn title_counts_records() {
        let n = network(4);
        let state = ExplorerState::open(&n, ComponentClass::Buses);
        assert_eq!(state.title, "Nodes Data (1 records)");
        assert!(state.series_attrs.is_empty());
        assert!(state.series_table.is_none());
    }

    #[test]
    fn first_series_attr_loads_on_open() {
        let n = network(4);
        let state = ExplorerState::open(&n, ComponentClass::Generators);
        assert_eq!(state.selected_attr.as_deref(), Some("p"));
        let table = state.series_table.unwrap();
        assert_eq!(table.columns, vec!["snapshot".to_string(), "g1".to_string()]);
        assert_eq!(table.rows[0][0], "t0");
        assert!(state.series_sampling.is_none());
    }

    #[test]
    fn long_series_get_sampled() {
        let n = network(12_000);
        let state = ExplorerState::open(&n, ComponentClass::Generators);
        let info = state.series_sampling.expect("sampling expected");
        assert_eq!(info.total, 12_000);
        assert!(state.series_table.unwrap().rows.len() <= MAX_DISPLAY_ROWS);
    }

    #[test]
    fn cycle_wraps_around() {
        let mut n = network(2);
        n.generators_t.insert(
            "q",
            SeriesFrame {
                columns: vec!["g1".into()],
                values: vec![vec![0.0], vec![0.0]],
            },
        );
        let mut state = ExplorerState::open(&n, ComponentClass::Generators);
        assert_eq!(state.selected_attr.as_deref(), Some("p"));
        state.cycle_attr(&n, 1);
        assert_eq!(state.selected_attr.as_deref(), Some("q"));
        state.cycle_attr(&n, 1);
        assert_eq!(state.selected_attr.as_deref(), Some("p"));
        state.cycle_attr(&n, -1);
        assert_eq!(state.selected_attr.as_deref(), Some("q"));
    }

    #[test]
    fn rekey_keeps_attr_when_present() {
        let n = network(2);
        let state = ExplorerState::open(&n, ComponentClass::Generators);
        let other = network(3);
        let rekeyed = state.rekey(&other);
        assert_eq!(rekeyed.selected_attr.as_deref(), Some("p"));
        assert_eq!(rekeyed.series_table.unwrap().rows.len(), 3);
    }
}
