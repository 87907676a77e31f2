//! Walks one ticket through its whole lifecycle against a running server.

use anyhow::Context;
use clap::Parser;
use rail_proto::ticketing::{
    GetAnalyticsRequest, GetReceiptRequest, ModifySeatRequest, PurchaseTicketRequest,
    RemoveUserRequest, ViewUsersBySectionRequest,
};
use rail_proto::TrainTicketServiceClient;
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(about = "Demo client for the train ticket service")]
struct Args {
    /// gRPC server URL
    #[arg(long, default_value = "http://localhost:50051")]
    server: String,
}

fn print_json<T: Serialize>(label: &str, value: &T) -> anyhow::Result<()> {
    println!("{}: {}", label, serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut client = TrainTicketServiceClient::connect(args.server.clone())
        .await
        .with_context(|| format!("Failed to connect to {}", args.server))?;

    let purchase = client
        .purchase_ticket(PurchaseTicketRequest {
            from: "London".to_string(),
            to: "France".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            section: "A".to_string(),
        })
        .await
        .context("Error purchasing ticket")?
        .into_inner();
    print_json("Ticket Purchased", &purchase)?;

    let receipt_id = purchase
        .receipt
        .map(|r| r.receipt_id)
        .context("Purchase response carried no receipt")?;

    let receipt = client
        .get_receipt(GetReceiptRequest { receipt_id: receipt_id.clone() })
        .await
        .context("Error getting receipt")?
        .into_inner();
    print_json("Receipt Details", &receipt)?;

    let analytics = client
        .get_analytics(GetAnalyticsRequest {})
        .await
        .context("Error fetching analytics")?
        .into_inner();
    print_json("Analytics", &analytics)?;

    let users = client
        .view_users_by_section(ViewUsersBySectionRequest { section: "A".to_string() })
        .await
        .context("Error viewing users by section")?
        .into_inner();
    print_json("Users in Section A", &users.users)?;

    let modified = client
        .modify_seat(ModifySeatRequest {
            receipt_id: receipt_id.clone(),
            new_section: "B".to_string(),
        })
        .await
        .context("Error modifying seat")?
        .into_inner();
    print_json("Seat Modification", &modified)?;

    let removed = client
        .remove_user(RemoveUserRequest { receipt_id })
        .await
        .context("Error removing user")?
        .into_inner();
    print_json("User Removal", &removed)?;

    Ok(())
}
