//! Registration inventory
//!
//! The live store is a single map keyed by `(PluginId, CapabilityKind)`. Reads go
//! through [`FeatureInventory::snapshot`], which copies it into the nested
//! plugin -> capability -> handle shape used for reporting.
//!
//! Entries are only ever inserted or overwritten. There is no removal path, so
//! the store grows with the number of distinct plugins seen by the process.

use crate::capability::{CapabilityKind, Handle, PluginId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

type Entries = HashMap<(PluginId, CapabilityKind), Handle>;

/// Shared, cloneable handle to the live registration store
///
/// Clones observe the same entries, which lets the reporter read what the
/// tracker writes.
#[derive(Debug, Clone, Default)]
pub struct FeatureInventory {
    entries: Arc<RwLock<Entries>>,
}

impl FeatureInventory {
    /// Create an empty inventory
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `handle` for `(plugin_id, kind)`, replacing any earlier handle.
    ///
    /// Total over its inputs: a poisoned lock is recovered rather than reported.
    pub fn record(&self, plugin_id: PluginId, kind: CapabilityKind, handle: Handle) {
        debug!(
            plugin = %plugin_id,
            capability = %kind,
            handle,
            "Recording capability registration"
        );

        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((plugin_id, kind), handle);
    }

    /// Copy the current entries into a nested [`Inventory`]
    pub fn snapshot(&self) -> Inventory {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);

        let mut plugins: BTreeMap<PluginId, BTreeMap<CapabilityKind, Handle>> = BTreeMap::new();
        for ((plugin_id, kind), handle) in entries.iter() {
            plugins
                .entry(plugin_id.clone())
                .or_default()
                .insert(*kind, *handle);
        }

        Inventory { plugins }
    }

    /// Look up the handle currently stored for a plugin and capability
    pub fn handle(&self, plugin_id: &str, kind: CapabilityKind) -> Option<Handle> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(&(PluginId::from(plugin_id), kind)).copied()
    }

    /// Number of `(plugin, capability)` entries
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of distinct plugins with at least one registration
    pub fn plugin_count(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .keys()
            .map(|(plugin_id, _)| plugin_id)
            .collect::<HashSet<_>>()
            .len()
    }
}

/// Point-in-time view of the inventory: plugin -> capability -> handle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    plugins: BTreeMap<PluginId, BTreeMap<CapabilityKind, Handle>>,
}

impl Inventory {
    /// Capabilities registered by a plugin, if it registered any
    pub fn get(&self, plugin_id: &str) -> Option<&BTreeMap<CapabilityKind, Handle>> {
        self.plugins.get(plugin_id)
    }

    pub fn handle(&self, plugin_id: &str, kind: CapabilityKind) -> Option<Handle> {
        self.get(plugin_id)
            .and_then(|capabilities| capabilities.get(&kind))
            .copied()
    }

    pub fn plugins(&self) -> impl Iterator<Item = &PluginId> {
        self.plugins.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PluginId, &BTreeMap<CapabilityKind, Handle>)> {
        self.plugins.iter()
    }

    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    /// Total number of `(plugin, capability)` entries
    pub fn registration_count(&self) -> usize {
        self.plugins.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Aggregate counts for report headers
    pub fn summary(&self) -> InventorySummary {
        let mut by_capability: BTreeMap<CapabilityKind, usize> = BTreeMap::new();
        for kind in self.plugins.values().flat_map(BTreeMap::keys) {
            *by_capability.entry(*kind).or_default() += 1;
        }

        InventorySummary {
            plugin_count: self.plugin_count(),
            registration_count: self.registration_count(),
            by_capability,
        }
    }
}

/// Counts derived from an [`Inventory`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    /// Distinct plugins with at least one registration
    pub plugin_count: usize,
    /// Total `(plugin, capability)` entries
    pub registration_count: usize,
    /// Number of plugins providing each capability
    pub by_capability: BTreeMap<CapabilityKind, usize>,
}
