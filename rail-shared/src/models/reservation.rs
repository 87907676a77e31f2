use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::fmt;

use crate::pii::Masked;

/// Named partition of the train's seating, e.g. "A"
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Section(String);

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Section {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Seat identifier of the form `<section>-<slot>`, slot is 1-based
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatId(String);

impl SeatId {
    pub fn new(section: &Section, slot: u32) -> Self {
        Self(format!("{}-{}", section, slot))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Receipt identifier of the form `R-<n>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(String);

impl ReceiptId {
    const PREFIX: &'static str = "R-";

    pub fn from_sequence(sequence: u64) -> Self {
        Self(format!("{}{}", Self::PREFIX, sequence))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric part of the id, `None` for ids the store never issued
    pub fn sequence(&self) -> Option<u64> {
        self.0.strip_prefix(Self::PREFIX)?.parse().ok()
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReceiptId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ReceiptId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Passenger and journey details supplied with a purchase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketRequest {
    pub origin: String,
    pub destination: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Masked<String>,
    pub section: Section,
}

/// A live ticket reservation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub receipt_id: ReceiptId,
    pub origin: String,
    pub destination: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Masked<String>,
    pub price_paid: f64,
    pub seat: SeatId,
    pub section: Section,
    pub purchased_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    pub fn new(receipt_id: ReceiptId, request: TicketRequest, seat: SeatId, price_paid: f64) -> Self {
        let now = Utc::now();
        Self {
            receipt_id,
            origin: request.origin,
            destination: request.destination,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            price_paid,
            seat,
            section: request.section,
            purchased_at: now,
            updated_at: now,
        }
    }

    /// Move the reservation to another seat; identity and price stay
    pub fn reassign(&mut self, section: Section, seat: SeatId) {
        self.section = section;
        self.seat = seat;
        self.updated_at = Utc::now();
    }

    pub fn passenger_seat(&self) -> PassengerSeat {
        PassengerSeat {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            seat: self.seat.clone(),
        }
    }
}

/// Who sits where, as listed per section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerSeat {
    pub first_name: String,
    pub last_name: String,
    pub email: Masked<String>,
    pub seat: SeatId,
}
