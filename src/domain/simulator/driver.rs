use std::collections::HashMap;

use serde::Serialize;

use crate::domain::scheduler::assignment::PassSummary;
use crate::domain::scheduler::scheduler::Scheduler;
use crate::domain::simulator::clock::{Clock, Tick};
use crate::domain::simulator::feed::{CapacityFeed, RequestFeed};
use crate::domain::utils::id::NodeId;
use crate::domain::utils::statistics::{StatParameter, StatisticEvent, StatsRecorder};
use crate::error::Result;

/// Final state of a node at the end of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeReport {
    pub id: NodeId,
    pub capacity: u64,

    /// Sum of `units * duration` over all reservations ever placed on the node.
    pub reserved_workload: u64,
    pub placed_requests: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub start_tick: Tick,
    pub end_tick: Tick,
    pub ticks_simulated: u64,
    pub requests_arrived: usize,
    pub requests_placed: usize,
    pub requests_queued: usize,
    pub blocked_passes: u64,
    pub mean_queue_length: f64,

    /// Mean ticks between arrival and placement over all placed requests.
    pub mean_wait_ticks: f64,
    pub nodes: Vec<NodeReport>,
}

/// Advances the clock and runs one scheduling pass per tick.
#[derive(Debug)]
pub struct SimulationDriver {
    clock: Clock,
    scheduler: Scheduler,
    capacity_feed: Box<dyn CapacityFeed>,
    request_feed: Box<dyn RequestFeed>,
    stats: Option<StatsRecorder>,
    prune_expired: bool,

    start_tick: Tick,
    arrived: usize,
    blocked_passes: u64,
    queue_length_sum: u64,
}

impl SimulationDriver {
    pub fn new(clock: Clock, scheduler: Scheduler, capacity_feed: Box<dyn CapacityFeed>, request_feed: Box<dyn RequestFeed>) -> Self {
        Self {
            start_tick: clock.now(),
            clock,
            scheduler,
            capacity_feed,
            request_feed,
            stats: None,
            prune_expired: false,
            arrived: 0,
            blocked_passes: 0,
            queue_length_sum: 0,
        }
    }

    pub fn with_stats(mut self, stats: StatsRecorder) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Drops finished reservations after every pass.
    pub fn with_pruning(mut self, prune_expired: bool) -> Self {
        self.prune_expired = prune_expired;
        self
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Runs a single tick without advancing the clock.
    pub fn step(&mut self) -> Result<PassSummary> {
        let now = self.clock.now();

        self.capacity_feed.update(now, self.scheduler.resource_set_mut())?;
        for node in self.scheduler.resource_set().oversubscribed_nodes(now) {
            log::warn!("Tick {}: capacity of node {} is below its reserved load.", now, node);
        }

        let arrived = self.request_feed.update(now, self.scheduler.request_queue_mut())?;
        self.arrived += arrived;

        let summary = self.scheduler.run_pass(now)?;
        if summary.blocked {
            self.blocked_passes += 1;
        }
        self.queue_length_sum += summary.queue_len as u64;

        log::info!(
            "Tick {}: {} arrived, {} placed, {} queued{}.",
            now,
            arrived,
            summary.placed.len(),
            summary.queue_len,
            if summary.blocked { ", pass blocked" } else { "" }
        );

        if let Some(stats) = self.stats.as_mut() {
            let resources = self.scheduler.resource_set();
            let total = resources.total_capacity();

            let mut event = StatisticEvent::new();
            event
                .set(StatParameter::Tick, now)
                .set(StatParameter::QueueLength, summary.queue_len)
                .set(StatParameter::Arrived, arrived)
                .set(StatParameter::Placed, summary.placed.len())
                .set(StatParameter::Blocked, summary.blocked)
                .set(StatParameter::TotalCapacity, total)
                .set(StatParameter::SpareUnits, resources.total_spare_units(now))
                .set(StatParameter::Utilization, resources.utilization(now));
            stats.record(&event)?;
        }

        if self.prune_expired {
            let pruned = self.scheduler.resource_set_mut().prune_expired(now + 1);
            if pruned > 0 {
                log::debug!("Tick {}: pruned {} reservations ending by tick {}.", now, pruned, now + 1);
            }
        }

        Ok(summary)
    }

    /// Runs until the clock reaches its end tick.
    pub fn run(&mut self) -> Result<SimulationReport> {
        log::info!("Simulation from tick {} to {} started.", self.clock.now(), self.clock.end());

        while !self.clock.is_end() {
            self.step()?;
            self.clock.advance();
        }

        if let Some(stats) = self.stats.as_mut() {
            stats.flush()?;
        }

        let report = self.report();
        log::info!(
            "Simulation ended: {} of {} requests placed, {} still queued.",
            report.requests_placed,
            report.requests_arrived,
            report.requests_queued
        );
        Ok(report)
    }

    pub fn report(&self) -> SimulationReport {
        let mut per_node: HashMap<&NodeId, (u64, usize)> = HashMap::new();
        let mut wait_sum = 0u64;
        for assignment in self.scheduler.assignments() {
            let entry = per_node.entry(&assignment.node_id).or_default();
            entry.0 = entry.0.saturating_add(assignment.workload());
            entry.1 += 1;
            wait_sum = wait_sum.saturating_add(assignment.wait());
        }

        let nodes = self
            .scheduler
            .resource_set()
            .iter()
            .map(|node| {
                let (reserved_workload, placed_requests) = per_node.get(node.id()).copied().unwrap_or_default();
                NodeReport { id: node.id().clone(), capacity: node.capacity(), reserved_workload, placed_requests }
            })
            .collect();

        let ticks_simulated = self.clock.now().saturating_sub(self.start_tick);
        let mean_queue_length = if ticks_simulated == 0 { 0.0 } else { self.queue_length_sum as f64 / ticks_simulated as f64 };
        let placed = self.scheduler.assignments().len();
        let mean_wait_ticks = if placed == 0 { 0.0 } else { wait_sum as f64 / placed as f64 };

        SimulationReport {
            start_tick: self.start_tick,
            end_tick: self.clock.end(),
            ticks_simulated,
            requests_arrived: self.arrived,
            requests_placed: placed,
            requests_queued: self.scheduler.request_queue().len(),
            blocked_passes: self.blocked_passes,
            mean_queue_length,
            mean_wait_ticks,
            nodes,
        }
    }
}
