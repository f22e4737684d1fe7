use std::collections::HashMap;

use slotmap::{SlotMap, new_key_type};

use crate::domain::request::request::Request;
use crate::domain::resource::node_resource::NodeResource;
use crate::domain::resource::reservation::Reservation;
use crate::domain::simulator::clock::Tick;
use crate::domain::utils::id::NodeId;
use crate::error::ReserveError;

new_key_type! {
    pub struct NodeResourceKey;
}

/// Whether [`ResourceSet::upsert`] created a node or changed an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Updated,
}

/// All nodes of the cluster, keyed by [`NodeId`].
///
/// Nodes are stored in a `SlotMap` and never removed, so iteration follows
/// insertion order and first-fit tie-breaking is deterministic.
#[derive(Debug, Clone, Default)]
pub struct ResourceSet {
    nodes: SlotMap<NodeResourceKey, NodeResource>,

    /// Index lookup NodeResourceKey using the external node name.
    name_index: HashMap<NodeId, NodeResourceKey>,
}

impl ResourceSet {
    pub fn new() -> Self {
        Self { nodes: SlotMap::with_key(), name_index: HashMap::new() }
    }

    pub fn get(&self, node_id: &NodeId) -> Option<&NodeResource> {
        let key = self.name_index.get(node_id)?;
        self.nodes.get(*key)
    }

    fn get_mut(&mut self, node_id: &NodeId) -> Option<&mut NodeResource> {
        let key = self.name_index.get(node_id)?;
        self.nodes.get_mut(*key)
    }

    /// Inserts a new node without reservations, or updates only the capacity
    /// of an existing one.
    pub fn upsert(&mut self, node_id: NodeId, units: u64) -> Upsert {
        if let Some(node) = self.get_mut(&node_id) {
            node.set_capacity(units);
            return Upsert::Updated;
        }

        let key = self.nodes.insert(NodeResource::new(node_id.clone(), units));
        self.name_index.insert(node_id, key);
        Upsert::Inserted
    }

    /// Reserves capacity for `request` on `node_id` starting at `now`.
    pub fn reserve(&mut self, node_id: &NodeId, request: &Request, now: Tick) -> Result<Reservation, ReserveError> {
        match self.get_mut(node_id) {
            Some(node) => node.reserve(request, now),
            None => Err(ReserveError::NotFound(node_id.clone())),
        }
    }

    /// Nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeResource> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn total_capacity(&self) -> u64 {
        self.nodes.values().map(|node| node.capacity()).sum()
    }

    pub fn total_spare_units(&self, now: Tick) -> u64 {
        self.nodes.values().map(|node| node.spare_units(now)).sum()
    }

    pub fn total_reserved_units(&self, now: Tick) -> u64 {
        self.nodes.values().map(|node| node.reserved_units(now)).sum()
    }

    /// Reserved over total capacity at `now`, clamped to `1.0` like
    /// [`NodeResource::utilization`]. Zero when the cluster has no capacity.
    pub fn utilization(&self, now: Tick) -> f64 {
        let total = self.total_capacity();
        if total == 0 {
            return 0.0;
        }

        (self.total_reserved_units(now) as f64 / total as f64).min(1.0)
    }

    /// Nodes whose capacity was shrunk below the load they already hold.
    pub fn oversubscribed_nodes(&self, now: Tick) -> Vec<NodeId> {
        self.nodes.values().filter(|node| node.is_oversubscribed(now)).map(|node| node.id().clone()).collect()
    }

    pub fn prune_expired(&mut self, now: Tick) -> usize {
        self.nodes.values_mut().map(|node| node.prune_expired(now)).sum()
    }
}
