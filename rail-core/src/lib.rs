pub mod repository;

pub use repository::ReservationRepository;

/// Failures a reservation operation reports back to its caller.
///
/// None of these are fatal and none leave partial state behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReservationError {
    #[error("Invalid section: {0}")]
    InvalidSection(String),
    #[error("No seats available in section {0}")]
    SectionFull(String),
    #[error("Receipt not found: {0}")]
    NotFound(String),
}

pub type ReservationResult<T> = Result<T, ReservationError>;
