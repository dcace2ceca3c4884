//! Network metadata panel.

use crate::panel::MetadataPanel;
use nex_core::Network;
use tracing::warn;

/// Pretty-print the network's metadata document as YAML.
pub fn render_metadata(n: &Network) -> MetadataPanel {
    if n.meta.is_null() {
        return MetadataPanel::Text("No metadata available for this network.".to_string());
    }
    match serde_yaml::to_string(&n.meta) {
        Ok(text) => MetadataPanel::Text(text),
        Err(err) => {
            warn!(error = %err, "metadata serialization failed");
            MetadataPanel::Unavailable(format!("Metadata unavailable: {err}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_metadata_gets_a_note() {
        let n = Network::default();
        assert_eq!(
            render_metadata(&n),
            MetadataPanel::Text("No metadata available for this network.".to_string())
        );
    }

    #[test]
    fn metadata_renders_as_yaml() {
        let n = Network {
            meta: json!({"scenario": "base", "year": 2030}),
            ..Network::default()
        };
        match render_metadata(&n) {
            MetadataPanel::Text(text) => {
                assert!(text.contains("scenario: base"));
                assert!(text.contains("year: 2030"));
            }
            other => panic!("unexpected panel: {other:?}"),
        }
    }
}
