//! Domain DTOs for the booking API.
//!
//! # Design
//! These types mirror the wire schema of the booking service but are defined
//! independently from the mock-server crate; integration tests catch any
//! schema drift between the two. Decoded bodies become typed values with
//! compile-time-checked field access instead of untyped maps.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stay dates for a booking, serialized as `YYYY-MM-DD`.
///
/// The API does not enforce `checkin <= checkout`; neither does this type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingDates {
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
}

/// A booking record as accepted and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Booking {
    pub firstname: String,
    pub lastname: String,
    pub totalprice: i64,
    pub depositpaid: bool,
    pub bookingdates: BookingDates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additionalneeds: Option<String>,
}

/// The envelope returned by the create operation: the server-assigned id
/// plus an echo of the stored booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingResponse {
    pub bookingid: i64,
    pub booking: Booking,
}

/// Partial-update payload. Only the fields present in the JSON are applied;
/// omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totalprice: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depositpaid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookingdates: Option<BookingDates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additionalneeds: Option<String>,
}

/// One element of the list endpoint's response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingId {
    pub bookingid: i64,
}

/// Optional query filters for the list endpoint.
#[derive(Debug, Clone, Default)]
pub struct BookingFilters {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub checkin: Option<NaiveDate>,
    pub checkout: Option<NaiveDate>,
}

impl BookingFilters {
    /// The filters as query pairs, in endpoint parameter order. Unset
    /// filters produce no pair.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(firstname) = &self.firstname {
            pairs.push(("firstname", firstname.clone()));
        }
        if let Some(lastname) = &self.lastname {
            pairs.push(("lastname", lastname.clone()));
        }
        if let Some(checkin) = self.checkin {
            pairs.push(("checkin", checkin.format("%Y-%m-%d").to_string()));
        }
        if let Some(checkout) = self.checkout {
            pairs.push(("checkout", checkout.format("%Y-%m-%d").to_string()));
        }
        pairs
    }
}

/// Credentials payload for the auth endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

/// Body of a successful auth call. The reference API answers 200 with a
/// `reason` field instead of `token` on bad credentials, so `token` is
/// optional here and its absence is surfaced by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: Option<String>,
}
