use crate::domain::request::request::Request;
use crate::domain::request::request_queue::RequestQueue;
use crate::domain::resource::resource_set::ResourceSet;
use crate::domain::scheduler::assignment::{Assignment, PassSummary, ScheduleOutcome};
use crate::domain::simulator::clock::Tick;
use crate::domain::utils::id::NodeId;
use crate::error::{Error, ReserveError, Result};

/// First-fit, head-blocking scheduler over a single request queue and resource set.
///
/// The scheduler owns both containers exclusively. Collaborators reach them
/// through the accessor methods between passes.
#[derive(Debug, Default)]
pub struct Scheduler {
    requests: RequestQueue,
    resources: ResourceSet,

    /// Append-only log of every successful placement.
    assignments: Vec<Assignment>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_queue(&self) -> &RequestQueue {
        &self.requests
    }

    pub fn request_queue_mut(&mut self) -> &mut RequestQueue {
        &mut self.requests
    }

    pub fn resource_set(&self) -> &ResourceSet {
        &self.resources
    }

    pub fn resource_set_mut(&mut self) -> &mut ResourceSet {
        &mut self.resources
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Returns the first node, in resource set order, with enough spare units at `now`.
    pub fn best_node(&self, request: &Request, now: Tick) -> Option<NodeId> {
        self.resources.iter().find(|node| node.spare_units(now) >= request.units()).map(|node| node.id().clone())
    }

    /// Performs one match attempt for the head of the queue.
    ///
    /// # Returns
    /// `NoJob` if the queue is empty, `NoResource` if the head fits nowhere
    /// (the head is restored to the front), otherwise the new assignment.
    ///
    /// # Errors
    /// `Error::Internal` if the resource set rejects a node that `best_node`
    /// just selected. The request is restored to the queue front first.
    pub fn schedule_next(&mut self, now: Tick) -> Result<ScheduleOutcome> {
        let Some(request) = self.requests.pop_front() else {
            return Ok(ScheduleOutcome::NoJob);
        };

        let Some(node_id) = self.best_node(&request, now) else {
            log::debug!("Tick {}: no node can hold {} ({} units), pass blocked.", now, request.id(), request.units());
            self.requests.push_front(request);
            return Ok(ScheduleOutcome::NoResource);
        };

        self.place(request, node_id, now)
    }

    /// Reserves `request` on `node_id` and logs the assignment. On failure the
    /// request goes back to the queue front.
    fn place(&mut self, request: Request, node_id: NodeId, now: Tick) -> Result<ScheduleOutcome> {
        match self.resources.reserve(&node_id, &request, now) {
            Ok(reservation) => {
                let assignment = Assignment::new(node_id, request.arrival(), &reservation);
                log::debug!(
                    "Tick {}: placed {} ({} units) on {} until tick {}.",
                    now,
                    assignment.request_id,
                    assignment.units,
                    assignment.node_id,
                    assignment.end
                );
                self.assignments.push(assignment.clone());
                Ok(ScheduleOutcome::Placed(assignment))
            }
            Err(err) => {
                log::error!("Tick {}: reservation of {} on selected node failed: {}", now, request.id(), err);
                let message = match &err {
                    ReserveError::NotFound(node) => format!("selected node {} vanished from the resource set", node),
                    ReserveError::NoResource { .. } => format!("selected node lost its spare capacity: {}", err),
                };
                self.requests.push_front(request);
                Err(Error::Internal(message))
            }
        }
    }

    /// Drains the queue at `now` until it is empty or the head request cannot be placed.
    pub fn run_pass(&mut self, now: Tick) -> Result<PassSummary> {
        let mut placed = Vec::new();

        let outcome = loop {
            match self.schedule_next(now)? {
                ScheduleOutcome::Placed(assignment) => placed.push(assignment),
                other => break other,
            }
        };

        Ok(PassSummary { tick: now, placed, blocked: outcome == ScheduleOutcome::NoResource, queue_len: self.requests.len() })
    }
}
