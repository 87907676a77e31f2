pub mod app_config;
pub mod seat_map;
pub mod reservation_store;

pub use app_config::{BookingConfig, Config};
pub use reservation_store::ReservationStore;
pub use seat_map::SeatMap;
