use rail_shared::{OccupancySnapshot, PassengerSeat, ReceiptId, Reservation, Section, TicketRequest};

use crate::ReservationResult;

/// Reservation state access used by the transport layer.
///
/// Implementations must make every call appear atomic to concurrent callers.
pub trait ReservationRepository: Send + Sync {
    fn purchase_ticket(&self, request: TicketRequest) -> ReservationResult<Reservation>;

    fn get_receipt(&self, receipt_id: &ReceiptId) -> ReservationResult<Reservation>;

    /// Passengers seated in `section`, ordered by receipt number
    fn view_users_by_section(&self, section: &Section) -> Vec<PassengerSeat>;

    /// Returns the reservation as it stands after the move
    fn modify_seat(&self, receipt_id: &ReceiptId, new_section: &Section) -> ReservationResult<Reservation>;

    /// Returns the reservation that was removed
    fn remove_user(&self, receipt_id: &ReceiptId) -> ReservationResult<Reservation>;

    fn get_analytics(&self) -> OccupancySnapshot;
}
