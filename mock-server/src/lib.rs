use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

// The reference API's fixed credential pair.
const USERNAME: &str = "admin";
const PASSWORD: &str = "password123";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingDates {
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Booking {
    pub firstname: String,
    pub lastname: String,
    pub totalprice: i64,
    pub depositpaid: bool,
    pub bookingdates: BookingDates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additionalneeds: Option<String>,
}

#[derive(Deserialize)]
pub struct BookingPatch {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub totalprice: Option<i64>,
    pub depositpaid: Option<bool>,
    pub bookingdates: Option<BookingDates>,
    pub additionalneeds: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BookingResponse {
    pub bookingid: i64,
    pub booking: Booking,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BookingId {
    pub bookingid: i64,
}

#[derive(Deserialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, Default)]
pub struct BookingQuery {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub checkin: Option<NaiveDate>,
    pub checkout: Option<NaiveDate>,
}

pub struct AppState {
    bookings: RwLock<HashMap<i64, Booking>>,
    next_id: AtomicI64,
}

pub type Db = Arc<AppState>;

pub fn app() -> Router {
    let db: Db = Arc::new(AppState {
        bookings: RwLock::new(HashMap::new()),
        next_id: AtomicI64::new(1),
    });
    Router::new()
        .route("/ping", get(ping))
        .route("/auth", post(auth))
        .route("/booking", get(list_bookings).post(create_booking))
        .route(
            "/booking/{id}",
            get(get_booking)
                .put(update_booking)
                .patch(patch_booking)
                .delete(delete_booking),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// The reference API answers 201 on a healthy backend, not 200.
async fn ping() -> StatusCode {
    StatusCode::CREATED
}

// Always 200; bad credentials get a `reason` body instead of an error
// status, exactly as the reference API behaves.
async fn auth(Json(input): Json<AuthRequest>) -> Json<serde_json::Value> {
    if input.username == USERNAME && input.password == PASSWORD {
        let token = format!("{:016x}", rand::random::<u64>());
        Json(serde_json::json!({ "token": token }))
    } else {
        Json(serde_json::json!({ "reason": "Bad credentials" }))
    }
}

async fn list_bookings(
    State(db): State<Db>,
    Query(query): Query<BookingQuery>,
) -> Json<Vec<BookingId>> {
    let bookings = db.bookings.read().await;
    let mut ids: Vec<BookingId> = bookings
        .iter()
        .filter(|(_, b)| query.firstname.as_ref().is_none_or(|f| &b.firstname == f))
        .filter(|(_, b)| query.lastname.as_ref().is_none_or(|l| &b.lastname == l))
        .filter(|(_, b)| query.checkin.is_none_or(|d| b.bookingdates.checkin >= d))
        .filter(|(_, b)| query.checkout.is_none_or(|d| b.bookingdates.checkout <= d))
        .map(|(id, _)| BookingId { bookingid: *id })
        .collect();
    ids.sort_by_key(|b| b.bookingid);
    Json(ids)
}

// 200, not 201, despite being a creation endpoint — observed contract.
async fn create_booking(
    State(db): State<Db>,
    Json(input): Json<Booking>,
) -> Json<BookingResponse> {
    let id = db.next_id.fetch_add(1, Ordering::SeqCst);
    db.bookings.write().await.insert(id, input.clone());
    Json(BookingResponse {
        bookingid: id,
        booking: input,
    })
}

async fn get_booking(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Booking>, StatusCode> {
    let bookings = db.bookings.read().await;
    bookings.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_booking(
    State(db): State<Db>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(input): Json<Booking>,
) -> Result<Json<Booking>, StatusCode> {
    if !authorized(&headers) {
        return Err(StatusCode::FORBIDDEN);
    }
    let mut bookings = db.bookings.write().await;
    let booking = bookings.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    *booking = input;
    Ok(Json(booking.clone()))
}

async fn patch_booking(
    State(db): State<Db>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(input): Json<BookingPatch>,
) -> Result<Json<Booking>, StatusCode> {
    if !authorized(&headers) {
        return Err(StatusCode::FORBIDDEN);
    }
    let mut bookings = db.bookings.write().await;
    let booking = bookings.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(firstname) = input.firstname {
        booking.firstname = firstname;
    }
    if let Some(lastname) = input.lastname {
        booking.lastname = lastname;
    }
    if let Some(totalprice) = input.totalprice {
        booking.totalprice = totalprice;
    }
    if let Some(depositpaid) = input.depositpaid {
        booking.depositpaid = depositpaid;
    }
    if let Some(bookingdates) = input.bookingdates {
        booking.bookingdates = bookingdates;
    }
    if let Some(additionalneeds) = input.additionalneeds {
        booking.additionalneeds = Some(additionalneeds);
    }
    Ok(Json(booking.clone()))
}

// 201 on success, not 204 — observed contract.
async fn delete_booking(
    State(db): State<Db>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<StatusCode, StatusCode> {
    if !authorized(&headers) {
        return Err(StatusCode::FORBIDDEN);
    }
    let mut bookings = db.bookings.write().await;
    bookings
        .remove(&id)
        .map(|_| StatusCode::CREATED)
        .ok_or(StatusCode::NOT_FOUND)
}

fn authorized(headers: &HeaderMap) -> bool {
    headers.contains_key(header::AUTHORIZATION)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates() -> BookingDates {
        BookingDates {
            checkin: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            checkout: NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
        }
    }

    #[test]
    fn booking_serializes_to_json() {
        let booking = Booking {
            firstname: "Jim".to_string(),
            lastname: "Brown".to_string(),
            totalprice: 111,
            depositpaid: true,
            bookingdates: dates(),
            additionalneeds: Some("Breakfast".to_string()),
        };
        let json = serde_json::to_value(&booking).unwrap();
        assert_eq!(json["firstname"], "Jim");
        assert_eq!(json["bookingdates"]["checkin"], "2025-02-01");
        assert_eq!(json["additionalneeds"], "Breakfast");
    }

    #[test]
    fn booking_roundtrips_through_json() {
        let booking = Booking {
            firstname: "Sally".to_string(),
            lastname: "Jones".to_string(),
            totalprice: 250,
            depositpaid: false,
            bookingdates: dates(),
            additionalneeds: None,
        };
        let json = serde_json::to_string(&booking).unwrap();
        let back: Booking = serde_json::from_str(&json).unwrap();
        assert_eq!(back, booking);
    }

    #[test]
    fn booking_rejects_missing_required_field() {
        let result: Result<Booking, _> = serde_json::from_str(
            r#"{"firstname":"Jim","totalprice":1,"depositpaid":true,
                "bookingdates":{"checkin":"2025-02-01","checkout":"2025-02-10"}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn patch_all_fields_optional() {
        let input: BookingPatch = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.firstname.is_none());
        assert!(input.bookingdates.is_none());
    }

    #[test]
    fn patch_partial_fields() {
        let input: BookingPatch =
            serde_json::from_str(r#"{"lastname":"Updated","totalprice":99}"#).unwrap();
        assert_eq!(input.lastname.as_deref(), Some("Updated"));
        assert_eq!(input.totalprice, Some(99));
        assert!(input.firstname.is_none());
    }
}
