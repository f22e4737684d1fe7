use serde::Serialize;

use crate::domain::resource::reservation::{self, Reservation};
use crate::domain::simulator::clock::Tick;
use crate::domain::utils::id::{NodeId, RequestId};

/// Record of a request placed on a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub request_id: RequestId,
    pub node_id: NodeId,

    /// Tick at which the request entered the queue.
    pub arrival: Tick,
    pub start: Tick,
    pub end: Tick,
    pub units: u64,
}

impl Assignment {
    pub fn new(node_id: NodeId, arrival: Tick, reservation: &Reservation) -> Self {
        Assignment {
            request_id: reservation.request_id().clone(),
            node_id,
            arrival,
            start: reservation.start(),
            end: reservation.end(),
            units: reservation.units(),
        }
    }

    /// Ticks the request spent in the queue before it was placed.
    pub fn wait(&self) -> Tick {
        self.start.saturating_sub(self.arrival)
    }

    pub fn workload(&self) -> u64 {
        reservation::workload(self.units, self.start, self.end)
    }
}

/// Result of a single [`Scheduler::schedule_next`](crate::domain::scheduler::scheduler::Scheduler::schedule_next) call.
///
/// `NoJob` and `NoResource` are normal outcomes that end a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleOutcome {
    /// The head request was reserved on a node.
    Placed(Assignment),

    /// The queue was empty.
    NoJob,

    /// No node can hold the head request; it stays at the front of the queue.
    NoResource,
}

/// Summary of all match attempts made during one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassSummary {
    pub tick: Tick,
    pub placed: Vec<Assignment>,

    /// `true` if the pass stopped at an unplaceable head request.
    pub blocked: bool,

    /// Requests still waiting after the pass.
    pub queue_len: usize,
}
