use rail_core::ReservationError;
use tonic::Status;

/// Map a store failure onto the gRPC status the client sees
pub fn to_status(err: ReservationError) -> Status {
    match err {
        ReservationError::InvalidSection(_) => Status::invalid_argument(err.to_string()),
        ReservationError::SectionFull(_) => Status::resource_exhausted(err.to_string()),
        ReservationError::NotFound(_) => Status::not_found(err.to_string()),
    }
}
