use serde::Serialize;

use crate::domain::simulator::clock::Tick;
use crate::domain::utils::id::RequestId;

/// A time-bounded claim on a node's units, covering ticks `[start, end)`.
///
/// Created by [`NodeResource::reserve`](crate::domain::resource::node_resource::NodeResource::reserve)
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    request_id: RequestId,
    start: Tick,
    end: Tick,
    units: u64,
}

impl Reservation {
    pub(crate) fn new(request_id: RequestId, start: Tick, end: Tick, units: u64) -> Self {
        Reservation { request_id, start, end, units }
    }

    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    pub fn start(&self) -> Tick {
        self.start
    }

    pub fn end(&self) -> Tick {
        self.end
    }

    pub fn units(&self) -> u64 {
        self.units
    }

    pub fn is_active(&self, now: Tick) -> bool {
        self.start <= now && now < self.end
    }

    pub fn is_expired(&self, now: Tick) -> bool {
        now >= self.end
    }

    /// Reserved units multiplied by the reserved interval length.
    pub fn workload(&self) -> u64 {
        workload(self.units, self.start, self.end)
    }
}

/// `units * (end - start)`, saturating at `u64::MAX`.
pub fn workload(units: u64, start: Tick, end: Tick) -> u64 {
    units.saturating_mul(end.saturating_sub(start))
}
