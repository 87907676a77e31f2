pub mod models;
pub mod pii;

pub use models::{
    OccupancySnapshot, PassengerSeat, ReceiptId, Reservation, SeatId, Section, SectionOccupancy,
    TicketRequest,
};
pub use pii::Masked;
