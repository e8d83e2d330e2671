//! Ticket purchasing - validation and pricing of ticket orders
//!
//! A purchase is one batch of `(category, quantity)` requests for an account.
//! The crate decides whether the batch is admissible, prices it, and only then
//! hands the totals to two external collaborators:
//!
//! - **Payment gateway**: charges the total amount to the account
//! - **Seat reservation gateway**: reserves the adult + child seats
//!
//! # Rules
//!
//! ```text
//! ADULT  = 20   seated, required in every order
//! CHILD  = 10   seated, needs an adult
//! INFANT =  0   on an adult's lap, at most one per adult
//!
//! adult + child <= 20 per order
//! ```
//!
//! Any broken rule surfaces as [`InvalidPurchase`], with the cause available
//! through [`InvalidPurchase::reason`]. A rejected purchase never reaches a
//! collaborator.
//!
//! # Usage
//!
//! ```
//! use ticketing::{
//!     AccountId, LoggingPaymentGateway, LoggingSeatReservationGateway, PricingPolicy,
//!     PurchaseEnvironment, TicketRequest, TicketService,
//! };
//!
//! let service = TicketService::new(
//!     PurchaseEnvironment::new(
//!         LoggingPaymentGateway::shared(),
//!         LoggingSeatReservationGateway::shared(),
//!     ),
//!     PricingPolicy::standard(),
//! );
//!
//! service
//!     .purchase_tickets(AccountId::new(1), &[TicketRequest::adult(2), TicketRequest::infant(1)])
//!     .unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod payment_gateway;
pub mod pricing;
pub mod seat_reservation;
pub mod service;
pub mod types;

pub use config::Config;
pub use error::{InvalidPurchase, RejectionReason, Result};
pub use payment_gateway::{LoggingPaymentGateway, PaymentGateway};
pub use pricing::{PricingPolicy, TicketTally, evaluate};
pub use seat_reservation::{LoggingSeatReservationGateway, SeatReservationGateway};
pub use service::{PurchaseEnvironment, TicketService};
pub use types::*;
