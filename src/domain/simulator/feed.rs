use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::request::request::Request;
use crate::domain::request::request_queue::RequestQueue;
use crate::domain::resource::resource_set::{ResourceSet, Upsert};
use crate::domain::simulator::clock::Tick;
use crate::domain::utils::id::{NodeId, RequestId};
use crate::error::Result;

/// Source of node capacity changes, applied before each scheduling pass.
pub trait CapacityFeed: std::fmt::Debug {
    fn update(&mut self, now: Tick, resources: &mut ResourceSet) -> Result<()>;
}

/// Source of newly arrived requests, appended before each scheduling pass.
pub trait RequestFeed: std::fmt::Debug {
    /// Pushes this tick's arrivals to the back of `queue` and returns how many arrived.
    fn update(&mut self, now: Tick, queue: &mut RequestQueue) -> Result<usize>;
}

/// Hands out `Request-0001`, `Request-0002`, ... in arrival order.
#[derive(Debug, Clone, Default)]
struct RequestNamer {
    next: u64,
}

impl RequestNamer {
    fn next_id(&mut self) -> RequestId {
        self.next += 1;
        RequestId::new(format!("Request-{:04}", self.next))
    }
}

/// Registers a fixed node list the first time it is asked for an update.
#[derive(Debug, Clone)]
pub struct StaticCapacityFeed {
    nodes: Vec<(NodeId, u64)>,
    applied: bool,
}

impl StaticCapacityFeed {
    pub fn new(nodes: Vec<(NodeId, u64)>) -> Self {
        Self { nodes, applied: false }
    }

    /// `count` nodes named `Node-001`.. where node `i` has `base_units + i` units.
    pub fn numbered(count: u64, base_units: u64) -> Self {
        Self::new((1..=count).map(|i| (NodeId::numbered("Node", i), base_units + i)).collect())
    }
}

impl CapacityFeed for StaticCapacityFeed {
    fn update(&mut self, now: Tick, resources: &mut ResourceSet) -> Result<()> {
        if self.applied {
            return Ok(());
        }

        for (node_id, units) in &self.nodes {
            resources.upsert(node_id.clone(), *units);
        }
        self.applied = true;

        log::info!("Tick {}: registered {} nodes with {} units in total.", now, self.nodes.len(), resources.total_capacity());
        Ok(())
    }
}

/// Redraws the capacity of every node from `[min_units, max_units]` every
/// `interval` ticks, starting with the first update.
#[derive(Debug)]
pub struct RandomCapacityFeed {
    nodes: Vec<NodeId>,
    min_units: u64,
    max_units: u64,
    interval: Tick,
    last_update: Option<Tick>,
    rng: StdRng,
}

impl RandomCapacityFeed {
    pub fn new(nodes: Vec<NodeId>, min_units: u64, max_units: u64, interval: Tick, seed: u64) -> Self {
        Self { nodes, min_units, max_units, interval: interval.max(1), last_update: None, rng: StdRng::seed_from_u64(seed) }
    }
}

impl CapacityFeed for RandomCapacityFeed {
    fn update(&mut self, now: Tick, resources: &mut ResourceSet) -> Result<()> {
        if let Some(last) = self.last_update {
            if now < last.saturating_add(self.interval) {
                return Ok(());
            }
        }

        for node_id in &self.nodes {
            let units = self.rng.random_range(self.min_units..=self.max_units);
            if resources.upsert(node_id.clone(), units) == Upsert::Inserted {
                log::debug!("Tick {}: node {} joined with {} units.", now, node_id, units);
            }
        }
        self.last_update = Some(now);

        Ok(())
    }
}

/// Pushes `per_tick` requests every tick. Request `i` of tick `t` asks for
/// `t + i + 1` units for `duration` ticks.
#[derive(Debug, Clone)]
pub struct FixedRequestFeed {
    per_tick: u64,
    duration: Tick,
    namer: RequestNamer,
}

impl FixedRequestFeed {
    pub fn new(per_tick: u64, duration: Tick) -> Self {
        Self { per_tick, duration, namer: RequestNamer::default() }
    }
}

impl RequestFeed for FixedRequestFeed {
    fn update(&mut self, now: Tick, queue: &mut RequestQueue) -> Result<usize> {
        for i in 0..self.per_tick {
            let request = Request::new(self.namer.next_id(), now + i + 1, self.duration, now)?;
            queue.push_back(request);
        }

        Ok(self.per_tick as usize)
    }
}

/// Seeded random arrivals. Count, units and duration are drawn uniformly
/// from their inclusive ranges.
#[derive(Debug)]
pub struct RandomRequestFeed {
    per_tick: (u64, u64),
    units: (u64, u64),
    duration: (Tick, Tick),
    namer: RequestNamer,
    rng: StdRng,
}

impl RandomRequestFeed {
    pub fn new(per_tick: (u64, u64), units: (u64, u64), duration: (Tick, Tick), seed: u64) -> Self {
        Self { per_tick, units, duration, namer: RequestNamer::default(), rng: StdRng::seed_from_u64(seed) }
    }
}

impl RequestFeed for RandomRequestFeed {
    fn update(&mut self, now: Tick, queue: &mut RequestQueue) -> Result<usize> {
        let count = self.rng.random_range(self.per_tick.0..=self.per_tick.1);

        for _ in 0..count {
            let units = self.rng.random_range(self.units.0..=self.units.1);
            let duration = self.rng.random_range(self.duration.0..=self.duration.1);
            queue.push_back(Request::new(self.namer.next_id(), units, duration, now)?);
        }

        Ok(count as usize)
    }
}
