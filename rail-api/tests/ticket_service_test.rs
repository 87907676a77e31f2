use std::sync::Arc;

use rail_api::{app, AppState, TicketService};
use rail_proto::ticketing::{
    GetAnalyticsRequest, GetReceiptRequest, ModifySeatRequest, PurchaseTicketRequest,
    RemoveUserRequest, ViewUsersBySectionRequest,
};
use rail_proto::{TrainTicketService, TrainTicketServiceClient};
use rail_store::ReservationStore;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::{Code, Request};

fn service(seats_per_section: u32) -> TicketService {
    TicketService::new(AppState::new(Arc::new(ReservationStore::with_capacity(seats_per_section))))
}

fn purchase(first_name: &str, section: &str) -> Request<PurchaseTicketRequest> {
    Request::new(PurchaseTicketRequest {
        from: "London".to_string(),
        to: "France".to_string(),
        first_name: first_name.to_string(),
        last_name: "Smith".to_string(),
        email: format!("{}.smith@example.com", first_name.to_lowercase()),
        section: section.to_string(),
    })
}

#[tokio::test]
async fn test_purchase_and_get_receipt() {
    let svc = service(50);

    let receipt = svc
        .purchase_ticket(purchase("Alice", "A"))
        .await
        .unwrap()
        .into_inner()
        .receipt
        .unwrap();
    assert_eq!(receipt.receipt_id, "R-1");
    assert_eq!(receipt.seat, "A-1");
    assert_eq!(receipt.price_paid, 20.0);

    let fetched = svc
        .get_receipt(Request::new(GetReceiptRequest { receipt_id: receipt.receipt_id.clone() }))
        .await
        .unwrap()
        .into_inner()
        .receipt
        .unwrap();
    assert_eq!(fetched.from, "London");
    assert_eq!(fetched.to, "France");
    assert_eq!(fetched.first_name, "Alice");
    assert_eq!(fetched.last_name, "Smith");
    assert_eq!(fetched.email, "alice.smith@example.com");
    assert_eq!(fetched.section, "A");
    assert_eq!(fetched.seat, "A-1");
}

#[tokio::test]
async fn test_error_statuses() {
    let svc = service(1);

    let status = svc.purchase_ticket(purchase("Alice", "C")).await.unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);

    svc.purchase_ticket(purchase("Alice", "A")).await.unwrap();
    let status = svc.purchase_ticket(purchase("Bob", "A")).await.unwrap_err();
    assert_eq!(status.code(), Code::ResourceExhausted);

    let status = svc
        .get_receipt(Request::new(GetReceiptRequest { receipt_id: "R-9".to_string() }))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);

    let status = svc
        .remove_user(Request::new(RemoveUserRequest { receipt_id: "R-9".to_string() }))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
}

#[tokio::test]
async fn test_view_users_by_section() {
    let svc = service(50);
    svc.purchase_ticket(purchase("Charlie", "A")).await.unwrap();
    svc.purchase_ticket(purchase("Dana", "B")).await.unwrap();
    svc.purchase_ticket(purchase("Eve", "A")).await.unwrap();

    let users = svc
        .view_users_by_section(Request::new(ViewUsersBySectionRequest { section: "A".to_string() }))
        .await
        .unwrap()
        .into_inner()
        .users;
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].first_name, "Charlie");
    assert_eq!(users[0].seat, "A-1");
    assert_eq!(users[1].first_name, "Eve");
    assert_eq!(users[1].email, "eve.smith@example.com");

    let empty = svc
        .view_users_by_section(Request::new(ViewUsersBySectionRequest { section: "X".to_string() }))
        .await
        .unwrap()
        .into_inner()
        .users;
    assert!(empty.is_empty());
}

#[tokio::test]
async fn test_modify_seat_and_analytics() {
    let svc = service(50);
    let receipt = svc
        .purchase_ticket(purchase("Alice", "A"))
        .await
        .unwrap()
        .into_inner()
        .receipt
        .unwrap();

    let modified = svc
        .modify_seat(Request::new(ModifySeatRequest {
            receipt_id: receipt.receipt_id.clone(),
            new_section: "B".to_string(),
        }))
        .await
        .unwrap()
        .into_inner();
    assert!(modified.success);
    assert_eq!(modified.seat, "B-1");
    assert_eq!(modified.section, "B");

    let analytics = svc
        .get_analytics(Request::new(GetAnalyticsRequest {}))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(analytics.total_tickets, 100);
    assert_eq!(analytics.total_tickets_sold, 1);
    assert_eq!(analytics.total_tickets_available, 99);
    assert_eq!(analytics.total_revenue, 20.0);
    assert_eq!(analytics.sections.len(), 2);
    assert_eq!(analytics.sections[0].section, "A");
    assert_eq!(analytics.sections[0].occupied, 0);
    assert_eq!(analytics.sections[1].section, "B");
    assert_eq!(analytics.sections[1].occupied, 1);
}

#[tokio::test]
async fn test_modify_seat_to_full_section() {
    let svc = service(1);
    let alice = svc
        .purchase_ticket(purchase("Alice", "A"))
        .await
        .unwrap()
        .into_inner()
        .receipt
        .unwrap();
    svc.purchase_ticket(purchase("Bob", "B")).await.unwrap();

    let status = svc
        .modify_seat(Request::new(ModifySeatRequest {
            receipt_id: alice.receipt_id.clone(),
            new_section: "B".to_string(),
        }))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::ResourceExhausted);

    let receipt = svc
        .get_receipt(Request::new(GetReceiptRequest { receipt_id: alice.receipt_id }))
        .await
        .unwrap()
        .into_inner()
        .receipt
        .unwrap();
    assert_eq!(receipt.section, "A");
    assert_eq!(receipt.seat, "A-1");
}

#[tokio::test]
async fn test_lifecycle_over_grpc() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = AppState::new(Arc::new(ReservationStore::with_capacity(2)));

    tokio::spawn(async move {
        tonic::transport::Server::builder()
            .add_service(app(state))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .unwrap();
    });

    let mut client = TrainTicketServiceClient::connect(format!("http://{}", addr))
        .await
        .unwrap();

    let receipt = client
        .purchase_ticket(purchase("John", "A"))
        .await
        .unwrap()
        .into_inner()
        .receipt
        .unwrap();
    assert_eq!(receipt.seat, "A-1");

    let modified = client
        .modify_seat(ModifySeatRequest {
            receipt_id: receipt.receipt_id.clone(),
            new_section: "B".to_string(),
        })
        .await
        .unwrap()
        .into_inner();
    assert!(modified.success);

    let removed = client
        .remove_user(RemoveUserRequest { receipt_id: receipt.receipt_id.clone() })
        .await
        .unwrap()
        .into_inner();
    assert!(removed.success);

    let status = client
        .get_receipt(GetReceiptRequest { receipt_id: receipt.receipt_id })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);

    let analytics = client
        .get_analytics(GetAnalyticsRequest {})
        .await
        .unwrap()
        .into_inner();
    assert_eq!(analytics.total_tickets, 4);
    assert_eq!(analytics.total_tickets_sold, 0);
    assert_eq!(analytics.total_tickets_available, 4);
}
