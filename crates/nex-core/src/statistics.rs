//! Aggregate statistics behind the chart panels.
//!
//! The dashboard never computes chart data itself; every panel renderer
//! asks a [`Statistics`] implementation for a table. [`NetworkStatistics`]
//! is the in-crate implementation computing from the component tables;
//! tests substitute doubles to exercise failure isolation and call
//! counting.

use crate::{Bus, Network, NexError, NexResult, SeriesStore};
use std::collections::{BTreeMap, HashMap};

/// Filter parameters shared by every statistic.
///
/// `bus_carrier` restricts the computation to components attached to
/// buses of that carrier (ignored by capex/opex, which aggregate over
/// the whole network). `countries` is the resolved membership query;
/// `facet` splits results per attachment-bus country.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatQuery {
    pub bus_carrier: Option<String>,
    pub countries: Option<Vec<String>>,
    pub facet: bool,
}

/// One aggregate value, grouped by component carrier and optional facet
/// country.
#[derive(Clone, Debug, PartialEq)]
pub struct StatRow {
    pub carrier: String,
    pub country: Option<String>,
    pub value: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatTable {
    pub rows: Vec<StatRow>,
}

impl StatTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One per-snapshot series, grouped like [`StatRow`].
#[derive(Clone, Debug, PartialEq)]
pub struct BalanceRow {
    pub carrier: String,
    pub country: Option<String>,
    pub values: Vec<f64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BalanceTable {
    pub snapshots: Vec<String>,
    pub rows: Vec<BalanceRow>,
}

impl BalanceTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The statistics collaborator every chart panel talks to.
pub trait Statistics: Send + Sync {
    /// Per-snapshot energy balance at buses of the queried carrier.
    fn energy_balance(&self, n: &Network, q: &StatQuery) -> NexResult<BalanceTable>;

    /// Energy balance summed over all snapshots.
    fn energy_balance_aggregated(&self, n: &Network, q: &StatQuery) -> NexResult<StatTable>;

    /// Optimal (post-expansion) capacity attached to the queried buses.
    fn optimal_capacity(&self, n: &Network, q: &StatQuery) -> NexResult<StatTable>;

    /// Capital expenditure totals; carrier-independent.
    fn capex(&self, n: &Network, q: &StatQuery) -> NexResult<StatTable>;

    /// Operational expenditure totals; carrier-independent.
    fn opex(&self, n: &Network, q: &StatQuery) -> NexResult<StatTable>;
}

/// Default implementation computing directly from the component tables.
#[derive(Clone, Copy, Debug, Default)]
pub struct NetworkStatistics;

type GroupKey = (String, Option<String>);

fn eligible_buses<'a>(n: &'a Network, q: &StatQuery) -> HashMap<&'a str, &'a Bus> {
    n.buses
        .iter()
        .filter(|b| match &q.bus_carrier {
            Some(carrier) => &b.carrier == carrier,
            None => true,
        })
        .filter(|b| match &q.countries {
            Some(countries) => countries.iter().any(|c| c == &b.country),
            None => true,
        })
        .map(|b| (b.name.as_str(), b))
        .collect()
}

fn facet_key(bus: &Bus, q: &StatQuery) -> Option<String> {
    q.facet.then(|| bus.country.clone())
}

/// Per-snapshot column for a named component, validated against the
/// snapshot index. A missing frame or column contributes nothing.
fn series_column(
    store: &SeriesStore,
    attr: &str,
    name: &str,
    n_snapshots: usize,
) -> NexResult<Option<Vec<f64>>> {
    let Some(frame) = store.get(attr) else {
        return Ok(None);
    };
    if frame.is_empty() {
        return Ok(None);
    }
    if frame.values.len() != n_snapshots {
        return Err(NexError::Stats(format!(
            "series '{attr}' has {} rows, expected {} snapshots",
            frame.values.len(),
            n_snapshots
        )));
    }
    Ok(frame.column(name))
}

fn accumulate(groups: &mut BTreeMap<GroupKey, Vec<f64>>, key: GroupKey, scale: f64, col: &[f64]) {
    let entry = groups.entry(key).or_insert_with(|| vec![0.0; col.len()]);
    for (acc, v) in entry.iter_mut().zip(col) {
        *acc += scale * v;
    }
}

impl NetworkStatistics {
    fn balance_groups(&self, n: &Network, q: &StatQuery) -> NexResult<BTreeMap<GroupKey, Vec<f64>>> {
        let buses = eligible_buses(n, q);
        let nt = n.snapshots.len();
        let mut groups: BTreeMap<GroupKey, Vec<f64>> = BTreeMap::new();

        for g in &n.generators {
            if let Some(bus) = buses.get(g.bus.as_str()) {
                if let Some(col) = series_column(&n.generators_t, "p", &g.name, nt)? {
                    accumulate(&mut groups, (g.carrier.clone(), facet_key(bus, q)), 1.0, &col);
                }
            }
        }
        for s in &n.storage_units {
            if let Some(bus) = buses.get(s.bus.as_str()) {
                if let Some(col) = series_column(&n.storage_units_t, "p", &s.name, nt)? {
                    accumulate(&mut groups, (s.carrier.clone(), facet_key(bus, q)), 1.0, &col);
                }
            }
        }
        for s in &n.stores {
            if let Some(bus) = buses.get(s.bus.as_str()) {
                if let Some(col) = series_column(&n.stores_t, "p", &s.name, nt)? {
                    accumulate(&mut groups, (s.carrier.clone(), facet_key(bus, q)), 1.0, &col);
                }
            }
        }
        // Links withdraw p0 at bus0 and inject efficiency * p0 at bus1.
        for l in &n.links {
            let col = series_column(&n.links_t, "p0", &l.name, nt)?;
            let Some(col) = col else { continue };
            if let Some(bus) = buses.get(l.bus0.as_str()) {
                accumulate(&mut groups, (l.carrier.clone(), facet_key(bus, q)), -1.0, &col);
            }
            if let Some(bus) = buses.get(l.bus1.as_str()) {
                accumulate(
                    &mut groups,
                    (l.carrier.clone(), facet_key(bus, q)),
                    l.efficiency,
                    &col,
                );
            }
        }
        Ok(groups)
    }
}

fn stat_rows(groups: BTreeMap<GroupKey, f64>) -> Vec<StatRow> {
    groups
        .into_iter()
        .filter(|(_, value)| *value != 0.0)
        .map(|((carrier, country), value)| StatRow {
            carrier,
            country,
            value,
        })
        .collect()
}

impl Statistics for NetworkStatistics {
    fn energy_balance(&self, n: &Network, q: &StatQuery) -> NexResult<BalanceTable> {
        let groups = self.balance_groups(n, q)?;
        let rows = groups
            .into_iter()
            .filter(|(_, values)| values.iter().any(|v| *v != 0.0))
            .map(|((carrier, country), values)| BalanceRow {
                carrier,
                country,
                values,
            })
            .collect();
        Ok(BalanceTable {
            snapshots: n.snapshots.clone(),
            rows,
        })
    }

    fn energy_balance_aggregated(&self, n: &Network, q: &StatQuery) -> NexResult<StatTable> {
        let groups = self.balance_groups(n, q)?;
        let summed = groups
            .into_iter()
            .map(|(key, values)| (key, values.iter().sum()))
            .collect();
        Ok(StatTable {
            rows: stat_rows(summed),
        })
    }

    fn optimal_capacity(&self, n: &Network, q: &StatQuery) -> NexResult<StatTable> {
        let buses = eligible_buses(n, q);
        let mut groups: BTreeMap<GroupKey, f64> = BTreeMap::new();
        let mut add = |carrier: &str, bus: &Bus, value: f64| {
            *groups
                .entry((carrier.to_string(), facet_key(bus, q)))
                .or_insert(0.0) += value;
        };

        for g in &n.generators {
            if let Some(bus) = buses.get(g.bus.as_str()) {
                add(&g.carrier, bus, g.p_nom_opt);
            }
        }
        for s in &n.storage_units {
            if let Some(bus) = buses.get(s.bus.as_str()) {
                add(&s.carrier, bus, s.p_nom_opt);
            }
        }
        for s in &n.stores {
            if let Some(bus) = buses.get(s.bus.as_str()) {
                add(&s.carrier, bus, s.e_nom_opt);
            }
        }
        // Branches count once, attributed to the first eligible endpoint.
        for l in &n.lines {
            if let Some(bus) = buses.get(l.bus0.as_str()).or_else(|| buses.get(l.bus1.as_str())) {
                add(&l.carrier, bus, l.s_nom_opt);
            }
        }
        for l in &n.links {
            if let Some(bus) = buses.get(l.bus0.as_str()).or_else(|| buses.get(l.bus1.as_str())) {
                add(&l.carrier, bus, l.p_nom_opt);
            }
        }
        Ok(StatTable {
            rows: stat_rows(groups),
        })
    }

    fn capex(&self, n: &Network, q: &StatQuery) -> NexResult<StatTable> {
        // Carrier-independent: only the country filter applies.
        let q = StatQuery {
            bus_carrier: None,
            countries: q.countries.clone(),
            facet: q.facet,
        };
        let buses = eligible_buses(n, &q);
        let mut groups: BTreeMap<GroupKey, f64> = BTreeMap::new();
        let mut add = |carrier: &str, bus: &Bus, value: f64| {
            *groups
                .entry((carrier.to_string(), facet_key(bus, &q)))
                .or_insert(0.0) += value;
        };

        for g in &n.generators {
            if let Some(bus) = buses.get(g.bus.as_str()) {
                add(&g.carrier, bus, g.capital_cost * g.p_nom_opt);
            }
        }
        for s in &n.storage_units {
            if let Some(bus) = buses.get(s.bus.as_str()) {
                add(&s.carrier, bus, s.capital_cost * s.p_nom_opt);
            }
        }
        for s in &n.stores {
            if let Some(bus) = buses.get(s.bus.as_str()) {
                add(&s.carrier, bus, s.capital_cost * s.e_nom_opt);
            }
        }
        for l in &n.lines {
            if let Some(bus) = buses.get(l.bus0.as_str()).or_else(|| buses.get(l.bus1.as_str())) {
                add(&l.carrier, bus, l.capital_cost * l.s_nom_opt);
            }
        }
        for l in &n.links {
            if let Some(bus) = buses.get(l.bus0.as_str()).or_else(|| buses.get(l.bus1.as_str())) {
                add(&l.carrier, bus, l.capital_cost * l.p_nom_opt);
            }
        }
        Ok(StatTable {
            rows: stat_rows(groups),
        })
    }

    fn opex(&self, n: &Network, q: &StatQuery) -> NexResult<StatTable> {
        let q = StatQuery {
            bus_carrier: None,
            countries: q.countries.clone(),
            facet: q.facet,
        };
        let buses = eligible_buses(n, &q);
        let nt = n.snapshots.len();
        let mut groups: BTreeMap<GroupKey, f64> = BTreeMap::new();

        let produced = |col: &[f64]| -> f64 { col.iter().filter(|v| **v > 0.0).sum() };

        for g in &n.generators {
            if let Some(bus) = buses.get(g.bus.as_str()) {
                if let Some(col) = series_column(&n.generators_t, "p", &g.name, nt)? {
                    *groups
                        .entry((g.carrier.clone(), facet_key(bus, &q)))
                        .or_insert(0.0) += g.marginal_cost * produced(&col);
                }
            }
        }
        for s in &n.storage_units {
            if let Some(bus) = buses.get(s.bus.as_str()) {
                if let Some(col) = series_column(&n.storage_units_t, "p", &s.name, nt)? {
                    *groups
                        .entry((s.carrier.clone(), facet_key(bus, &q)))
                        .or_insert(0.0) += s.marginal_cost * produced(&col);
                }
            }
        }
        for s in &n.stores {
            if let Some(bus) = buses.get(s.bus.as_str()) {
                if let Some(col) = series_column(&n.stores_t, "p", &s.name, nt)? {
                    *groups
                        .entry((s.carrier.clone(), facet_key(bus, &q)))
                        .or_insert(0.0) += s.marginal_cost * produced(&col);
                }
            }
        }
        for l in &n.links {
            if let Some(bus) = buses.get(l.bus0.as_str()) {
                if let Some(col) = series_column(&n.links_t, "p0", &l.name, nt)? {
                    *groups
                        .entry((l.carrier.clone(), facet_key(bus, &q)))
                        .or_insert(0.0) += l.marginal_cost * produced(&col);
                }
            }
        }
        Ok(StatTable {
            rows: stat_rows(groups),
        })
    }
}
