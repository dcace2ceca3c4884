//! Network loading for the explorer dashboard.
//!
//! Accepts the three input shapes the dashboard supports: nothing (load
//! the built-in demo network), a single file path, or an ordered label
//! mapping whose entries may be file paths or already-built in-memory
//! networks. Every loaded network is normalized with
//! [`ensure_carriers_defined`] before it reaches the registry.

use nex_core::{ensure_carriers_defined, Network, NexError, NexResult};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default network file used when no input is given.
pub const DEFAULT_NETWORK_PATH: &str = "demo-network.json";

/// Label used for single-path input.
const GENERIC_LABEL: &str = "Network";

/// One entry of a labeled network mapping.
pub enum NetworkSource {
    Path(PathBuf),
    InMemory(Box<Network>),
}

/// The three accepted input shapes.
pub enum NetworkInput {
    /// Load the built-in demo network.
    Default,
    /// One network file, labeled generically.
    Single(PathBuf),
    /// Ordered label -> source mapping; the first entry becomes the
    /// initially active network.
    Many(Vec<(String, NetworkSource)>),
}

/// Deserialize a network from a JSON file.
pub fn read_network(path: &Path) -> NexResult<Network> {
    let text = std::fs::read_to_string(path)?;
    let network: Network = serde_json::from_str(&text)?;
    Ok(network)
}

fn load_path(path: &Path) -> NexResult<Network> {
    if !path.exists() {
        return Err(NexError::NotFound(path.display().to_string()));
    }
    let mut network = read_network(path)?;
    ensure_carriers_defined(&mut network);
    info!(path = %path.display(), buses = network.buses.len(), "loaded network");
    Ok(network)
}

/// Load networks per the input shape.
///
/// A missing file inside a `Many` mapping is skipped with a warning;
/// everything else that fails is fatal. An empty result is
/// [`NexError::EmptyInput`].
pub fn load_networks(input: NetworkInput) -> NexResult<Vec<(String, Network)>> {
    let mut networks: Vec<(String, Network)> = Vec::new();

    match input {
        NetworkInput::Default => {
            let path = Path::new(DEFAULT_NETWORK_PATH);
            networks.push((GENERIC_LABEL.to_string(), load_path(path)?));
        }
        NetworkInput::Single(path) => {
            networks.push((GENERIC_LABEL.to_string(), load_path(&path)?));
        }
        NetworkInput::Many(entries) => {
            for (label, source) in entries {
                match source {
                    NetworkSource::Path(path) => {
                        if !path.exists() {
                            warn!(label = %label, path = %path.display(), "network file not found, skipping");
                            continue;
                        }
                        networks.push((label, load_path(&path)?));
                    }
                    NetworkSource::InMemory(mut network) => {
                        ensure_carriers_defined(&mut network);
                        networks.push((label, *network));
                    }
                }
            }
        }
    }

    if networks.is_empty() {
        return Err(NexError::EmptyInput);
    }
    Ok(networks)
}

/// Parse CLI network arguments of the form `path` or `path:label`. A
/// bare path derives its label from the file stem.
pub fn parse_network_args(args: &[String]) -> Vec<(String, PathBuf)> {
    args.iter()
        .map(|arg| match arg.split_once(':') {
            Some((path, label)) if !label.is_empty() => (label.to_string(), PathBuf::from(path)),
            _ => {
                let path = PathBuf::from(arg);
                let label = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| arg.clone());
                (label, path)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nex_core::{Bus, Generator};
    use std::io::Write;

    fn demo_network() -> Network {
        let mut n = Network::default();
        n.buses.push(Bus {
            name: "b1".into(),
            carrier: "AC".into(),
            country: "DE".into(),
            ..Bus::default()
        });
        n.generators.push(Generator {
            name: "g1".into(),
            bus: "b1".into(),
            carrier: "biomass".into(),
            ..Generator::default()
        });
        n
    }

    fn write_network(dir: &Path, name: &str, n: &Network) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(serde_json::to_string(n).unwrap().as_bytes())
            .unwrap();
        path
    }

    #[test]
    fn single_path_loads_with_generic_label() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_network(dir.path(), "net.json", &demo_network());
        let loaded = load_networks(NetworkInput::Single(path)).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].0, "Network");
        // Normalization ran: the referenced carrier gained a color.
        assert!(!loaded[0].1.carriers["biomass"].color.is_empty());
    }

    #[test]
    fn missing_single_path_is_fatal() {
        let err = load_networks(NetworkInput::Single(PathBuf::from("/no/such/net.json")))
            .unwrap_err();
        assert!(matches!(err, NexError::NotFound(_)));
    }

    #[test]
    fn missing_mapped_path_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_network(dir.path(), "good.json", &demo_network());
        let loaded = load_networks(NetworkInput::Many(vec![
            ("Missing".into(), NetworkSource::Path(dir.path().join("gone.json"))),
            ("Good".into(), NetworkSource::Path(good)),
        ]))
        .unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].0, "Good");
    }

    #[test]
    fn all_missing_is_empty_input() {
        let err = load_networks(NetworkInput::Many(vec![(
            "Missing".into(),
            NetworkSource::Path(PathBuf::from("/no/such/net.json")),
        )]))
        .unwrap_err();
        assert!(matches!(err, NexError::EmptyInput));
    }

    #[test]
    fn in_memory_networks_pass_through_normalized() {
        let loaded = load_networks(NetworkInput::Many(vec![(
            "Live".into(),
            NetworkSource::InMemory(Box::new(demo_network())),
        )]))
        .unwrap();
        assert_eq!(loaded[0].0, "Live");
        assert!(loaded[0].1.carriers.contains_key("biomass"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = load_networks(NetworkInput::Single(path)).unwrap_err();
        assert!(matches!(err, NexError::Parse(_)));
    }

    #[test]
    fn network_args_parse_labels() {
        let args = vec![
            "scenarios/base.json".to_string(),
            "scenarios/high.json:High RES".to_string(),
        ];
        let parsed = parse_network_args(&args);
        assert_eq!(parsed[0].0, "base");
        assert_eq!(parsed[0].1, PathBuf::from("scenarios/base.json"));
        assert_eq!(parsed[1].0, "High RES");
        assert_eq!(parsed[1].1, PathBuf::from("scenarios/high.json"));
    }
}
