use crate::domain::simulator::clock::Tick;
use crate::domain::utils::id::RequestId;
use crate::error::{Error, Result};

/// A demand for `units` resource units held for `duration` ticks.
///
/// Requests are immutable once built; the queue may hand the same value out
/// and take it back unchanged when it cannot be placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    id: RequestId,
    units: u64,
    duration: Tick,
    arrival: Tick,
}

impl Request {
    /// Validates and builds a request. Zero units or a zero duration is rejected.
    pub fn new(id: RequestId, units: u64, duration: Tick, arrival: Tick) -> Result<Self> {
        if units == 0 || duration == 0 {
            return Err(Error::InvalidRequest { id, units, duration });
        }

        Ok(Request { id, units, duration, arrival })
    }

    pub fn id(&self) -> &RequestId {
        &self.id
    }

    pub fn units(&self) -> u64 {
        self.units
    }

    pub fn duration(&self) -> Tick {
        self.duration
    }

    /// Tick at which the request entered the queue.
    pub fn arrival(&self) -> Tick {
        self.arrival
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_units() {
        let err = Request::new(RequestId::new("r"), 0, 3, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest { units: 0, duration: 3, .. }));
    }

    #[test]
    fn rejects_zero_duration() {
        let err = Request::new(RequestId::new("r"), 4, 0, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest { units: 4, duration: 0, .. }));
    }

    #[test]
    fn keeps_fields() {
        let req = Request::new(RequestId::new("r-1"), 5, 3, 2).unwrap();
        assert_eq!(req.id().as_str(), "r-1");
        assert_eq!(req.units(), 5);
        assert_eq!(req.duration(), 3);
        assert_eq!(req.arrival(), 2);
    }
}
