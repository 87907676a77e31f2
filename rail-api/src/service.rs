use rail_proto::ticketing::{
    GetAnalyticsRequest, GetAnalyticsResponse, GetReceiptRequest, GetReceiptResponse,
    ModifySeatRequest, ModifySeatResponse, PurchaseTicketRequest, PurchaseTicketResponse, Receipt,
    RemoveUserRequest, RemoveUserResponse, SectionOccupancy, UserSeatAllocation,
    ViewUsersBySectionRequest, ViewUsersBySectionResponse,
};
use rail_proto::TrainTicketService;
use rail_shared::{Masked, OccupancySnapshot, PassengerSeat, ReceiptId, Reservation, Section, TicketRequest};
use tonic::{Request, Response, Status};
use tracing::instrument;

use crate::error::to_status;
use crate::state::AppState;

/// gRPC front of the reservation store
#[derive(Clone)]
pub struct TicketService {
    state: AppState,
}

impl TicketService {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

fn ticket_request(req: PurchaseTicketRequest) -> TicketRequest {
    TicketRequest {
        origin: req.from,
        destination: req.to,
        first_name: req.first_name,
        last_name: req.last_name,
        email: Masked(req.email),
        section: Section::new(req.section),
    }
}

fn receipt(reservation: Reservation) -> Receipt {
    Receipt {
        receipt_id: reservation.receipt_id.to_string(),
        from: reservation.origin,
        to: reservation.destination,
        first_name: reservation.first_name,
        last_name: reservation.last_name,
        email: reservation.email.into_inner(),
        price_paid: reservation.price_paid,
        seat: reservation.seat.to_string(),
        section: reservation.section.to_string(),
        purchased_at: reservation.purchased_at.timestamp(),
        updated_at: reservation.updated_at.timestamp(),
    }
}

fn seat_allocation(passenger: PassengerSeat) -> UserSeatAllocation {
    UserSeatAllocation {
        first_name: passenger.first_name,
        last_name: passenger.last_name,
        email: passenger.email.into_inner(),
        seat: passenger.seat.to_string(),
    }
}

fn analytics(snapshot: OccupancySnapshot) -> GetAnalyticsResponse {
    GetAnalyticsResponse {
        total_tickets: snapshot.total_tickets,
        total_tickets_sold: snapshot.total_tickets_sold,
        total_tickets_available: snapshot.total_tickets_available,
        total_revenue: snapshot.total_revenue,
        sections: snapshot
            .sections
            .into_iter()
            .map(|s| SectionOccupancy {
                section: s.section.to_string(),
                occupied: s.occupied,
                capacity: s.capacity,
            })
            .collect(),
    }
}

#[tonic::async_trait]
impl TrainTicketService for TicketService {
    #[instrument(skip_all, fields(section = %request.get_ref().section))]
    async fn purchase_ticket(
        &self,
        request: Request<PurchaseTicketRequest>,
    ) -> Result<Response<PurchaseTicketResponse>, Status> {
        let reservation = self
            .state
            .reservations
            .purchase_ticket(ticket_request(request.into_inner()))
            .map_err(to_status)?;

        Ok(Response::new(PurchaseTicketResponse {
            receipt: Some(receipt(reservation)),
        }))
    }

    #[instrument(skip_all, fields(receipt_id = %request.get_ref().receipt_id))]
    async fn get_receipt(
        &self,
        request: Request<GetReceiptRequest>,
    ) -> Result<Response<GetReceiptResponse>, Status> {
        let receipt_id = ReceiptId::from(request.into_inner().receipt_id);
        let reservation = self
            .state
            .reservations
            .get_receipt(&receipt_id)
            .map_err(to_status)?;

        Ok(Response::new(GetReceiptResponse {
            receipt: Some(receipt(reservation)),
        }))
    }

    #[instrument(skip_all, fields(section = %request.get_ref().section))]
    async fn view_users_by_section(
        &self,
        request: Request<ViewUsersBySectionRequest>,
    ) -> Result<Response<ViewUsersBySectionResponse>, Status> {
        let section = Section::new(request.into_inner().section);
        let users = self
            .state
            .reservations
            .view_users_by_section(&section)
            .into_iter()
            .map(seat_allocation)
            .collect();

        Ok(Response::new(ViewUsersBySectionResponse { users }))
    }

    #[instrument(skip_all, fields(receipt_id = %request.get_ref().receipt_id))]
    async fn modify_seat(
        &self,
        request: Request<ModifySeatRequest>,
    ) -> Result<Response<ModifySeatResponse>, Status> {
        let req = request.into_inner();
        let reservation = self
            .state
            .reservations
            .modify_seat(&ReceiptId::from(req.receipt_id), &Section::new(req.new_section))
            .map_err(to_status)?;

        Ok(Response::new(ModifySeatResponse {
            success: true,
            seat: reservation.seat.to_string(),
            section: reservation.section.to_string(),
        }))
    }

    #[instrument(skip_all, fields(receipt_id = %request.get_ref().receipt_id))]
    async fn remove_user(
        &self,
        request: Request<RemoveUserRequest>,
    ) -> Result<Response<RemoveUserResponse>, Status> {
        let receipt_id = ReceiptId::from(request.into_inner().receipt_id);
        self.state
            .reservations
            .remove_user(&receipt_id)
            .map_err(to_status)?;

        Ok(Response::new(RemoveUserResponse { success: true }))
    }

    #[instrument(skip_all)]
    async fn get_analytics(
        &self,
        _request: Request<GetAnalyticsRequest>,
    ) -> Result<Response<GetAnalyticsResponse>, Status> {
        Ok(Response::new(analytics(self.state.reservations.get_analytics())))
    }
}
