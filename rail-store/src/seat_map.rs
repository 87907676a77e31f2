use std::collections::{HashMap, HashSet};

use rail_core::{ReservationError, ReservationResult};
use rail_shared::{SeatId, Section, SectionOccupancy};

/// Seats of one section, split by how far the claim has progressed
#[derive(Debug, Default)]
struct SectionSeats {
    /// Claimed by an in-flight operation, not yet bound to a reservation
    held: HashSet<SeatId>,
    /// Bound to exactly one live reservation
    assigned: HashSet<SeatId>,
}

impl SectionSeats {
    fn is_taken(&self, seat: &SeatId) -> bool {
        self.held.contains(seat) || self.assigned.contains(seat)
    }

    fn taken(&self) -> usize {
        self.held.len() + self.assigned.len()
    }
}

/// Per-section seat occupancy with a fixed capacity shared by every section.
///
/// Not synchronized; the owning store serializes access.
#[derive(Debug)]
pub struct SeatMap {
    seats_per_section: u32,
    order: Vec<Section>,
    sections: HashMap<Section, SectionSeats>,
}

impl SeatMap {
    pub fn new(sections: &[Section], seats_per_section: u32) -> Self {
        let mut order = Vec::with_capacity(sections.len());
        let mut map = HashMap::with_capacity(sections.len());
        for section in sections {
            if map.insert(section.clone(), SectionSeats::default()).is_none() {
                order.push(section.clone());
            }
        }

        Self {
            seats_per_section,
            order,
            sections: map,
        }
    }

    pub fn contains_section(&self, section: &Section) -> bool {
        self.sections.contains_key(section)
    }

    pub fn sections(&self) -> &[Section] {
        &self.order
    }

    pub fn seats_per_section(&self) -> u32 {
        self.seats_per_section
    }

    /// Hold the lowest-numbered seat that is neither held nor assigned
    pub fn hold_lowest(&mut self, section: &Section) -> ReservationResult<SeatId> {
        let seats_per_section = self.seats_per_section;
        let seats = self.sections.get_mut(section)
            .ok_or_else(|| ReservationError::InvalidSection(section.to_string()))?;

        if seats.taken() >= seats_per_section as usize {
            return Err(ReservationError::SectionFull(section.to_string()));
        }

        for slot in 1..=seats_per_section {
            let seat = SeatId::new(section, slot);
            if !seats.is_taken(&seat) {
                seats.held.insert(seat.clone());
                return Ok(seat);
            }
        }

        Err(ReservationError::SectionFull(section.to_string()))
    }

    /// Bind a held seat to its reservation. Returns false if the seat was not held.
    pub fn assign(&mut self, section: &Section, seat: &SeatId) -> bool {
        let Some(seats) = self.sections.get_mut(section) else {
            return false;
        };
        if !seats.held.remove(seat) {
            return false;
        }
        seats.assigned.insert(seat.clone());
        true
    }

    /// Free a seat whether held or assigned. Returns false if it was free already.
    pub fn release(&mut self, section: &Section, seat: &SeatId) -> bool {
        match self.sections.get_mut(section) {
            Some(seats) => seats.held.remove(seat) | seats.assigned.remove(seat),
            None => false,
        }
    }

    pub fn is_assigned(&self, section: &Section, seat: &SeatId) -> bool {
        self.sections
            .get(section)
            .is_some_and(|seats| seats.assigned.contains(seat))
    }

    pub fn assigned_count(&self, section: &Section) -> u32 {
        self.sections
            .get(section)
            .map_or(0, |seats| seats.assigned.len() as u32)
    }

    pub fn total_assigned(&self) -> u32 {
        self.sections.values().map(|s| s.assigned.len() as u32).sum()
    }

    pub fn total_held(&self) -> u32 {
        self.sections.values().map(|s| s.held.len() as u32).sum()
    }

    /// Capacity summed over every configured section
    pub fn total_capacity(&self) -> u32 {
        self.seats_per_section.saturating_mul(self.order.len() as u32)
    }

    /// Assigned seats per section, in configuration order
    pub fn occupancy(&self) -> Vec<SectionOccupancy> {
        self.order
            .iter()
            .map(|section| SectionOccupancy {
                section: section.clone(),
                occupied: self.assigned_count(section),
                capacity: self.seats_per_section,
            })
            .collect()
    }
}
