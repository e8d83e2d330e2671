//! # Ticketing Testing
//!
//! Testing utilities for the `ticketing` crate.
//!
//! This crate provides:
//! - Recording implementations of the collaborator traits
//! - Request builders for common test scenarios
//! - Property-based testing strategies
//!
//! ## Example
//!
//! ```
//! use ticketing::{AccountId, Money, PricingPolicy, TicketRequest, TicketService};
//! use ticketing_testing::mocks::{GatewayCall, RecordingGateways};
//!
//! let gateways = RecordingGateways::new();
//! let service = TicketService::new(gateways.environment(), PricingPolicy::standard());
//!
//! service.purchase_tickets(AccountId::new(7), &[TicketRequest::adult(2)]).unwrap();
//!
//! assert_eq!(
//!     gateways.calls(),
//!     vec![
//!         GatewayCall::Payment { account_id: AccountId::new(7), amount: Money::from_units(40) },
//!         GatewayCall::Reservation { account_id: AccountId::new(7), seats: 2 },
//!     ]
//! );
//! ```

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Only panics on a poisoned lock

/// Recording collaborators for testing.
pub mod mocks {
    use std::sync::{Arc, Mutex};
    use ticketing::{AccountId, Money, PaymentGateway, PurchaseEnvironment, SeatReservationGateway};

    /// One call received by a recording collaborator
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum GatewayCall {
        /// `make_payment` was called
        Payment {
            /// Charged account
            account_id: AccountId,
            /// Charged amount
            amount: Money,
        },
        /// `reserve_seat` was called
        Reservation {
            /// Account the seats are for
            account_id: AccountId,
            /// Reserved seats
            seats: u32,
        },
    }

    /// Shared, ordered log of collaborator calls
    pub type CallLog = Arc<Mutex<Vec<GatewayCall>>>;

    /// Payment gateway that appends every charge to a call log
    #[derive(Debug, Clone, Default)]
    pub struct RecordingPaymentGateway {
        log: CallLog,
    }

    impl RecordingPaymentGateway {
        /// Create a gateway with its own log
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a gateway writing to an existing log
        #[must_use]
        pub const fn with_log(log: CallLog) -> Self {
            Self { log }
        }

        /// Charges received so far, oldest first
        #[must_use]
        pub fn payments(&self) -> Vec<(AccountId, Money)> {
            self.log
                .lock()
                .unwrap()
                .iter()
                .filter_map(|call| match *call {
                    GatewayCall::Payment { account_id, amount } => Some((account_id, amount)),
                    GatewayCall::Reservation { .. } => None,
                })
                .collect()
        }
    }

    impl PaymentGateway for RecordingPaymentGateway {
        fn make_payment(&self, account_id: AccountId, amount: Money) {
            self.log
                .lock()
                .unwrap()
                .push(GatewayCall::Payment { account_id, amount });
        }
    }

    /// Reservation gateway that appends every booking to a call log
    #[derive(Debug, Clone, Default)]
    pub struct RecordingSeatReservationGateway {
        log: CallLog,
    }

    impl RecordingSeatReservationGateway {
        /// Create a gateway with its own log
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a gateway writing to an existing log
        #[must_use]
        pub const fn with_log(log: CallLog) -> Self {
            Self { log }
        }

        /// Bookings received so far, oldest first
        #[must_use]
        pub fn reservations(&self) -> Vec<(AccountId, u32)> {
            self.log
                .lock()
                .unwrap()
                .iter()
                .filter_map(|call| match *call {
                    GatewayCall::Reservation { account_id, seats } => Some((account_id, seats)),
                    GatewayCall::Payment { .. } => None,
                })
                .collect()
        }
    }

    impl SeatReservationGateway for RecordingSeatReservationGateway {
        fn reserve_seat(&self, account_id: AccountId, seats: u32) {
            self.log
                .lock()
                .unwrap()
                .push(GatewayCall::Reservation { account_id, seats });
        }
    }

    /// Both recording collaborators sharing one call log
    #[derive(Debug, Clone)]
    pub struct RecordingGateways {
        log: CallLog,
        /// Payment side
        pub payments: RecordingPaymentGateway,
        /// Reservation side
        pub reservations: RecordingSeatReservationGateway,
    }

    impl RecordingGateways {
        /// Create a fresh pair with an empty log
        #[must_use]
        pub fn new() -> Self {
            let log = CallLog::default();
            Self {
                payments: RecordingPaymentGateway::with_log(Arc::clone(&log)),
                reservations: RecordingSeatReservationGateway::with_log(Arc::clone(&log)),
                log,
            }
        }

        /// Environment wired to these gateways
        #[must_use]
        pub fn environment(&self) -> PurchaseEnvironment {
            PurchaseEnvironment::new(
                Arc::new(self.payments.clone()),
                Arc::new(self.reservations.clone()),
            )
        }

        /// Every call, in the order received
        #[must_use]
        pub fn calls(&self) -> Vec<GatewayCall> {
            self.log.lock().unwrap().clone()
        }

        /// Whether no collaborator has been called
        #[must_use]
        pub fn is_untouched(&self) -> bool {
            self.log.lock().unwrap().is_empty()
        }

        /// Forget every recorded call
        pub fn clear(&self) {
            self.log.lock().unwrap().clear();
        }
    }

    impl Default for RecordingGateways {
        fn default() -> Self {
            Self::new()
        }
    }
}

/// Test helpers and utilities.
pub mod helpers {
    use crate::mocks::RecordingGateways;
    use ticketing::{PricingPolicy, TicketCategory, TicketRequest, TicketService};

    /// Service over fresh recording gateways and the standard policy
    #[must_use]
    pub fn recording_service() -> (TicketService, RecordingGateways) {
        let gateways = RecordingGateways::new();
        let service = TicketService::new(gateways.environment(), PricingPolicy::standard());
        (service, gateways)
    }

    /// One request per category, skipping zero counts
    #[must_use]
    pub fn family(adults: i32, children: i32, infants: i32) -> Vec<TicketRequest> {
        [
            (TicketCategory::Adult, adults),
            (TicketCategory::Child, children),
            (TicketCategory::Infant, infants),
        ]
        .into_iter()
        .filter(|(_, quantity)| *quantity != 0)
        .map(|(category, quantity)| TicketRequest::new(category, quantity))
        .collect()
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use proptest::prelude::*;
    use ticketing::{TicketCategory, TicketRequest};

    /// Any category
    pub fn category() -> impl Strategy<Value = TicketCategory> {
        prop::sample::select(TicketCategory::ALL.to_vec())
    }

    /// A request with a quantity in `quantities`
    pub fn request(
        quantities: impl Strategy<Value = i32>,
    ) -> impl Strategy<Value = TicketRequest> {
        (category(), quantities).prop_map(|(category, quantity)| TicketRequest::new(category, quantity))
    }

    /// Batches of non-negative requests
    pub fn non_negative_batch() -> impl Strategy<Value = Vec<TicketRequest>> {
        prop::collection::vec(request(0..=12_i32), 0..8)
    }

    /// Batches holding at least one negative quantity, anywhere in the batch
    pub fn batch_with_negative() -> impl Strategy<Value = Vec<TicketRequest>> {
        (
            prop::collection::vec(request(-5..=25_i32), 0..6),
            request(i32::MIN..0),
            any::<prop::sample::Index>(),
        )
            .prop_map(|(mut batch, negative, index)| {
                let at = index.index(batch.len() + 1);
                batch.insert(at, negative);
                batch
            })
    }
}

// Re-export commonly used items
pub use helpers::{family, recording_service};
pub use mocks::{GatewayCall, RecordingGateways};
