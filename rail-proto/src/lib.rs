//! Wire contract of the train ticket service.

pub mod ticketing {
    tonic::include_proto!("ticketing");
}

pub use ticketing::train_ticket_service_client::TrainTicketServiceClient;
pub use ticketing::train_ticket_service_server::{TrainTicketService, TrainTicketServiceServer};
