use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rail_core::{ReservationError, ReservationRepository, ReservationResult};
use rail_shared::{
    OccupancySnapshot, PassengerSeat, ReceiptId, Reservation, SeatId, Section, TicketRequest,
};
use tracing::{debug, info, warn};

use crate::app_config::BookingConfig;
use crate::seat_map::SeatMap;

/// Reservations, seat occupancy and the receipt counter form one
/// consistency domain and always move together.
#[derive(Debug)]
struct StoreState {
    reservations: HashMap<ReceiptId, Reservation>,
    seats: SeatMap,
    receipt_counter: u64,
}

impl StoreState {
    /// Turn a held seat into a recorded reservation
    fn commit_purchase(&mut self, request: TicketRequest, seat: SeatId, price: f64) -> Reservation {
        self.receipt_counter += 1;
        let receipt_id = ReceiptId::from_sequence(self.receipt_counter);

        let bound = self.seats.assign(&request.section, &seat);
        debug_assert!(bound, "purchased seat {} was not held", seat);
        let reservation = Reservation::new(receipt_id.clone(), request, seat, price);
        self.reservations.insert(receipt_id, reservation.clone());
        reservation
    }
}

/// In-memory reservation manager shared by every request handler.
///
/// All state sits behind a single mutex. Each operation is made of short
/// critical sections and never holds the lock while acquiring it again.
#[derive(Debug)]
pub struct ReservationStore {
    state: Mutex<StoreState>,
    ticket_price: f64,
}

impl ReservationStore {
    pub fn new(booking: &BookingConfig) -> Self {
        Self {
            state: Mutex::new(StoreState {
                reservations: HashMap::new(),
                seats: SeatMap::new(&booking.sections(), booking.seats_per_section),
                receipt_counter: 0,
            }),
            ticket_price: booking.ticket_price,
        }
    }

    /// Default sections and price with the given capacity per section
    pub fn with_capacity(seats_per_section: u32) -> Self {
        Self::new(&BookingConfig {
            seats_per_section,
            ..BookingConfig::default()
        })
    }

    pub fn ticket_price(&self) -> f64 {
        self.ticket_price
    }

    // Every critical section leaves the state consistent before anything
    // that could panic, so a poisoned lock still guards valid data.
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claim the lowest free seat in `section` as its own critical section
    fn allocate_seat(&self, section: &Section) -> ReservationResult<SeatId> {
        self.lock().seats.hold_lowest(section)
    }

    pub fn purchase_ticket(&self, request: TicketRequest) -> ReservationResult<Reservation> {
        let mut state = self.lock();

        let seat = state.seats.hold_lowest(&request.section).inspect_err(|err| {
            warn!("Purchase rejected for section {}: {}", request.section, err);
        })?;
        let reservation = state.commit_purchase(request, seat, self.ticket_price);

        info!(
            receipt_id = %reservation.receipt_id,
            seat = %reservation.seat,
            email = %reservation.email,
            "Ticket purchased: {} -> {}",
            reservation.origin,
            reservation.destination
        );
        Ok(reservation)
    }

    pub fn get_receipt(&self, receipt_id: &ReceiptId) -> ReservationResult<Reservation> {
        debug!("Receipt lookup: {}", receipt_id);
        self.lock()
            .reservations
            .get(receipt_id)
            .cloned()
            .ok_or_else(|| ReservationError::NotFound(receipt_id.to_string()))
    }

    pub fn view_users_by_section(&self, section: &Section) -> Vec<PassengerSeat> {
        let state = self.lock();

        let mut seated: Vec<&Reservation> = state
            .reservations
            .values()
            .filter(|r| &r.section == section)
            .collect();
        seated.sort_by_key(|r| r.receipt_id.sequence().unwrap_or(u64::MAX));

        let passengers: Vec<PassengerSeat> = seated
            .into_iter()
            .map(Reservation::passenger_seat)
            .collect();
        debug!("Section {} has {} passengers", section, passengers.len());
        passengers
    }

    /// Move a reservation to the lowest free seat of `new_section`.
    ///
    /// Runs as lookup, allocation and commit, each under its own lock. The new
    /// seat is claimed while the old one is still held, so a failed
    /// allocation leaves the reservation untouched. Commit re-checks that the
    /// reservation survived and frees whatever seat it holds at that moment.
    pub fn modify_seat(
        &self,
        receipt_id: &ReceiptId,
        new_section: &Section,
    ) -> ReservationResult<Reservation> {
        if !self.lock().reservations.contains_key(receipt_id) {
            warn!("Seat change for unknown receipt {}", receipt_id);
            return Err(ReservationError::NotFound(receipt_id.to_string()));
        }

        let new_seat = self.allocate_seat(new_section).inspect_err(|err| {
            warn!("Seat change for {} rejected: {}", receipt_id, err);
        })?;

        self.commit_seat_change(receipt_id, new_section, new_seat)
    }

    /// Bind an already held seat to the reservation, or give it back
    fn commit_seat_change(
        &self,
        receipt_id: &ReceiptId,
        new_section: &Section,
        new_seat: SeatId,
    ) -> ReservationResult<Reservation> {
        let mut state = self.lock();
        let StoreState { reservations, seats, .. } = &mut *state;

        let Some(reservation) = reservations.get_mut(receipt_id) else {
            // Removed while the new seat was being allocated
            seats.release(new_section, &new_seat);
            warn!("Receipt {} removed during seat change, released {}", receipt_id, new_seat);
            return Err(ReservationError::NotFound(receipt_id.to_string()));
        };

        let old_seat = reservation.seat.clone();
        seats.release(&reservation.section, &old_seat);
        let bound = seats.assign(new_section, &new_seat);
        debug_assert!(bound, "new seat {} was not held", new_seat);
        reservation.reassign(new_section.clone(), new_seat);

        info!("Seat changed for {}: {} -> {}", receipt_id, old_seat, reservation.seat);
        Ok(reservation.clone())
    }

    pub fn remove_user(&self, receipt_id: &ReceiptId) -> ReservationResult<Reservation> {
        let mut state = self.lock();

        let Some(reservation) = state.reservations.remove(receipt_id) else {
            warn!("Removal of unknown receipt {}", receipt_id);
            return Err(ReservationError::NotFound(receipt_id.to_string()));
        };
        state.seats.release(&reservation.section, &reservation.seat);

        info!("Reservation {} removed, seat {} released", receipt_id, reservation.seat);
        Ok(reservation)
    }

    pub fn get_analytics(&self) -> OccupancySnapshot {
        let state = self.lock();

        let total_tickets = state.seats.total_capacity();
        let total_tickets_sold = state.reservations.len() as u32;
        // Seats held by an in-flight seat change still count as available
        let occupied = state.seats.total_assigned();
        let sections = state.seats.occupancy();

        OccupancySnapshot {
            total_tickets,
            total_tickets_sold,
            total_tickets_available: total_tickets.saturating_sub(occupied),
            // Derived from the sale count, never tracked separately
            total_revenue: f64::from(total_tickets_sold) * self.ticket_price,
            sections,
        }
    }
}

impl ReservationRepository for ReservationStore {
    fn purchase_ticket(&self, request: TicketRequest) -> ReservationResult<Reservation> {
        ReservationStore::purchase_ticket(self, request)
    }

    fn get_receipt(&self, receipt_id: &ReceiptId) -> ReservationResult<Reservation> {
        ReservationStore::get_receipt(self, receipt_id)
    }

    fn view_users_by_section(&self, section: &Section) -> Vec<PassengerSeat> {
        ReservationStore::view_users_by_section(self, section)
    }

    fn modify_seat(
        &self,
        receipt_id: &ReceiptId,
        new_section: &Section,
    ) -> ReservationResult<Reservation> {
        ReservationStore::modify_seat(self, receipt_id, new_section)
    }

    fn remove_user(&self, receipt_id: &ReceiptId) -> ReservationResult<Reservation> {
        ReservationStore::remove_user(self, receipt_id)
    }

    fn get_analytics(&self) -> OccupancySnapshot {
        ReservationStore::get_analytics(self)
    }
}
