//! Carrier normalization and filter-option derivation.
//!
//! Every chart keys its colors and legends off the network's carrier
//! table, so a network referencing carriers it never defines would break
//! rendering. [`ensure_carriers_defined`] runs once at load time and
//! synthesizes the missing entries with deterministic palette colors.

use crate::{Network, NONE_CARRIER};
use std::collections::BTreeSet;
use tracing::info;

/// Fixed assignment palette (tab10). Cycled when exhausted.
pub const CARRIER_PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// One entry of a dropdown/checklist widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub id: String,
    pub label: String,
}

/// All carrier values referenced by any component of the network.
pub fn referenced_carriers(n: &Network) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    let mut add = |carrier: &str| {
        if !carrier.is_empty() {
            out.insert(carrier.to_string());
        }
    };
    for b in &n.buses {
        add(&b.carrier);
    }
    for g in &n.generators {
        add(&g.carrier);
    }
    for l in &n.lines {
        add(&l.carrier);
    }
    for l in &n.links {
        add(&l.carrier);
    }
    for s in &n.storage_units {
        add(&s.carrier);
    }
    for s in &n.stores {
        add(&s.carrier);
    }
    out
}

/// Guarantee that every referenced carrier exists in the carrier table
/// and has a color. Missing carriers are synthesized; carriers without a
/// color get one from [`CARRIER_PALETTE`] in sorted order, cycling when
/// the palette runs out.
pub fn ensure_carriers_defined(n: &mut Network) {
    let referenced = referenced_carriers(n);
    let missing: Vec<String> = referenced
        .iter()
        .filter(|c| !n.carriers.contains_key(*c))
        .cloned()
        .collect();
    if !missing.is_empty() {
        info!(count = missing.len(), carriers = ?missing, "adding missing carriers");
        for carrier in &missing {
            n.carriers.insert(carrier.clone(), Default::default());
        }
    }

    let needing_color: Vec<String> = n
        .carriers
        .iter()
        .filter(|(_, c)| c.color.trim().is_empty())
        .map(|(id, _)| id.clone())
        .collect();
    if needing_color.is_empty() {
        return;
    }
    for (i, id) in needing_color.iter().enumerate() {
        let color = CARRIER_PALETTE[i % CARRIER_PALETTE.len()];
        if let Some(carrier) = n.carriers.get_mut(id) {
            carrier.color = color.to_string();
        }
    }
    info!(count = needing_color.len(), "assigned palette colors to carriers");
}

/// Title-case each word, except words containing two or more uppercase
/// characters (preserves acronyms and unit strings like "AC" or "MWh").
pub fn title_except_multi_caps(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let uppercase = word.chars().filter(|c| c.is_uppercase()).count();
            if uppercase > 1 {
                word.to_string()
            } else {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Display name for a carrier: nice name if set, else the id, title-cased
/// with acronyms preserved.
pub fn carrier_nice_name(n: &Network, carrier: &str) -> String {
    let raw = n
        .carriers
        .get(carrier)
        .filter(|c| !c.nice_name.is_empty())
        .map(|c| c.nice_name.as_str())
        .unwrap_or(carrier);
    title_except_multi_caps(raw)
}

/// Checklist options for the carrier filter: distinct bus carriers minus
/// the `"none"` sentinel, sorted by id.
pub fn carrier_options(n: &Network) -> Vec<SelectOption> {
    let distinct: BTreeSet<&str> = n
        .buses
        .iter()
        .map(|b| b.carrier.as_str())
        .filter(|c| !c.is_empty() && *c != NONE_CARRIER)
        .collect();
    distinct
        .into_iter()
        .map(|id| SelectOption {
            id: id.to_string(),
            label: carrier_nice_name(n, id),
        })
        .collect()
}

/// Dropdown options for the country filter, sorted by label.
pub fn country_options(n: &Network) -> Vec<SelectOption> {
    let distinct: BTreeSet<&str> = n
        .buses
        .iter()
        .map(|b| b.country.as_str())
        .filter(|c| !c.is_empty())
        .collect();
    distinct
        .into_iter()
        .map(|id| SelectOption {
            id: id.to_string(),
            label: id.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bus, Carrier, Generator};

    fn network_with_buses(carriers: &[&str]) -> Network {
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

    #[test]
    fn missing_carrier_is_synthesized_with_color() {
        let mut n = Network::default();
        n.generators.push(Generator {
            name: "g1".into(),
            bus: "b1".into(),
            carrier: "biomass".into(),
            ..Generator::default()
        });
        ensure_carriers_defined(&mut n);
        let carrier = n.carriers.get("biomass").expect("carrier added");
        assert!(carrier.color.starts_with('#'));
        assert_eq!(carrier.color.len(), 7);
    }

    #[test]
    fn palette_cycles_when_exhausted() {
        let mut n = Network::default();
        for i in 0..12 {
            n.generators.push(Generator {
                name: format!("g{i}"),
                bus: "b".into(),
                carrier: format!("carrier{i:02}"),
                ..Generator::default()
            });
        }
        ensure_carriers_defined(&mut n);
        assert_eq!(n.carriers.len(), 12);
        let colors: Vec<&str> = n.carriers.values().map(|c| c.color.as_str()).collect();
        assert_eq!(colors[10], colors[0]);
    }

    #[test]
    fn existing_colors_are_preserved() {
        let mut n = Network::default();
        n.carriers.insert(
            "wind".into(),
            Carrier {
                nice_name: String::new(),
                color: "#123456".into(),
            },
        );
        n.generators.push(Generator {
            name: "g1".into(),
            carrier: "wind".into(),
            ..Generator::default()
        });
        ensure_carriers_defined(&mut n);
        assert_eq!(n.carriers["wind"].color, "#123456");
    }

    #[test]
    fn title_case_preserves_multi_caps() {
        assert_eq!(title_except_multi_caps("hydrogen storage"), "Hydrogen Storage");
        assert_eq!(title_except_multi_caps("AC"), "AC");
        assert_eq!(title_except_multi_caps("low voltage DC"), "Low Voltage DC");
    }

    #[test]
    fn nice_name_falls_back_to_id() {
        let mut n = network_with_buses(&["wind"]);
        n.carriers.insert("wind".into(), Carrier::default());
        assert_eq!(carrier_nice_name(&n, "wind"), "Wind");
        n.carriers.insert(
            "wind".into(),
            Carrier {
                nice_name: "onshore wind".into(),
                color: String::new(),
            },
        );
        assert_eq!(carrier_nice_name(&n, "wind"), "Onshore Wind");
    }

    #[test]
    fn carrier_options_exclude_sentinel_and_sort() {
        let n = network_with_buses(&["solar", "none", "AC", "solar"]);
        let opts = carrier_options(&n);
        let ids: Vec<&str> = opts.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["AC", "solar"]);
    }

    #[test]
    fn country_options_sorted_and_distinct() {
        let mut n = network_with_buses(&["AC", "AC", "AC"]);
        n.buses[0].country = "FR".into();
        n.buses[1].country = "DE".into();
        n.buses[2].country = "FR".into();
        let opts = country_options(&n);
        let ids: Vec<&str> = opts.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["DE", "FR"]);
    }
}
