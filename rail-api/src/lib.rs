use rail_proto::TrainTicketServiceServer;

pub mod error;
pub mod service;
pub mod state;

pub use service::TicketService;
pub use state::AppState;

/// gRPC service wired to the shared reservation state
pub fn app(state: AppState) -> TrainTicketServiceServer<TicketService> {
    TrainTicketServiceServer::new(TicketService::new(state))
}
