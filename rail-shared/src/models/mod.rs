pub mod reservation;
pub mod analytics;

pub use reservation::{PassengerSeat, ReceiptId, Reservation, SeatId, Section, TicketRequest};
pub use analytics::{OccupancySnapshot, SectionOccupancy};
