//! Blocking API client and response-contract validation for the booking
//! service.
//!
//! # Overview
//! One `BookingClient` per run holds the configured base URL and a
//! persistent header set that gains a bearer token after `authenticate`.
//! Each endpoint gets one typed, synchronous operation; decoded bodies are
//! typed DTOs except for the create envelope, which callers validate
//! structurally through the contract module.
//!
//! # Design
//! - Configuration resolves exactly two environments (`test`, `prod`) to
//!   base URLs before any network activity; anything else is fatal.
//! - Expected status codes follow the observed contract of the reference
//!   API (201 for ping and delete, 200 for create and update), not REST
//!   convention — compatibility over elegance.
//! - Transport failures propagate from ureq unmodified; no retries.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod contract;
pub mod error;
pub mod types;

pub use client::BookingClient;
pub use config::{Config, Environment};
pub use contract::{
    validate_booking, validate_booking_dates, validate_booking_response, ContractError,
};
pub use error::ApiError;
pub use types::{
    AuthRequest, AuthResponse, Booking, BookingDates, BookingFilters, BookingId, BookingPatch,
    BookingResponse,
};
