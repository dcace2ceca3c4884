//! The label -> network registry.
//!
//! Built once at startup from `nex-io` output and shared read-only
//! behind an `Arc`; the *active* label lives in the filter selection and
//! is resolved fresh on every render, so no renderer ever holds a stale
//! network handle.

use nex_core::{Network, NexError, NexResult};

pub struct NetworkRegistry {
    entries: Vec<(String, Network)>,
}

impl NetworkRegistry {
    /// Order is preserved; the first entry is the initial active network.
    pub fn new(entries: Vec<(String, Network)>) -> NexResult<Self> {
        if entries.is_empty() {
            return Err(NexError::EmptyInput);
        }
        Ok(NetworkRegistry { entries })
    }

    pub fn get(&self, label: &str) -> Option<&Network> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, n)| n)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(l, _)| l.as_str()).collect()
    }

    pub fn first_label(&self) -> &str {
        &self.entries[0].0
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Label following `label` in registry order, wrapping around.
    pub fn next_label(&self, label: &str) -> &str {
        let idx = self
            .entries
            .iter()
            .position(|(l, _)| l == label)
            .unwrap_or(0);
        &self.entries[(idx + 1) % self.entries.len()].0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry_is_rejected() {
        assert!(matches!(
            NetworkRegistry::new(Vec::new()),
            Err(NexError::EmptyInput)
        ));
    }

    #[test]
    fn order_and_cycling() {
        let reg = NetworkRegistry::new(vec![
            ("A".into(), Network::default()),
            ("B".into(), Network::default()),
        ])
        .unwrap();
        assert_eq!(reg.first_label(), "A");
        assert_eq!(reg.next_label("A"), "B");
        assert_eq!(reg.next_label("B"), "A");
        assert_eq!(reg.next_label("missing"), "B");
    }
}
