use crate::domain::request::request::Request;
use crate::domain::resource::reservation::Reservation;
use crate::domain::simulator::clock::Tick;
use crate::domain::utils::id::NodeId;
use crate::error::ReserveError;

/// A named pool of fungible units together with the reservations held on it.
#[derive(Debug, Clone)]
pub struct NodeResource {
    id: NodeId,
    capacity: u64,
    reservations: Vec<Reservation>,
}

impl NodeResource {
    pub fn new(id: NodeId, capacity: u64) -> Self {
        Self { id, capacity, reservations: Vec::new() }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    /// Units held by reservations that are active at `now`.
    pub fn reserved_units(&self, now: Tick) -> u64 {
        self.reservations.iter().filter(|r| r.is_active(now)).map(|r| r.units()).sum()
    }

    /// Capacity not claimed by an active reservation at `now`, clamped at zero.
    pub fn spare_units(&self, now: Tick) -> u64 {
        self.capacity.saturating_sub(self.reserved_units(now))
    }

    /// Reserves `request.units()` for ticks `[now, now + duration)`.
    ///
    /// An end tick past `Tick::MAX` is clamped, so the reservation never expires.
    /// Assumes no reservation on this node starts after `now`.
    pub fn reserve(&mut self, request: &Request, now: Tick) -> Result<Reservation, ReserveError> {
        let spare = self.spare_units(now);

        if spare < request.units() {
            return Err(ReserveError::NoResource { node: self.id.clone(), requested: request.units(), spare });
        }

        let reservation = Reservation::new(request.id().clone(), now, now.saturating_add(request.duration()), request.units());
        self.reservations.push(reservation.clone());

        Ok(reservation)
    }

    /// Replaces the total capacity. Existing reservations are kept even when
    /// the new capacity is below the load they already hold.
    pub fn set_capacity(&mut self, capacity: u64) {
        self.capacity = capacity;
    }

    pub fn is_oversubscribed(&self, now: Tick) -> bool {
        self.reserved_units(now) > self.capacity
    }

    /// Drops reservations that ended at or before `now`. Returns how many were removed.
    pub fn prune_expired(&mut self, now: Tick) -> usize {
        let before = self.reservations.len();
        self.reservations.retain(|r| !r.is_expired(now));
        before - self.reservations.len()
    }

    pub fn utilization(&self, now: Tick) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }

        (self.reserved_units(now) as f64 / self.capacity as f64).min(1.0)
    }
}
