//! Seat reservation collaborator.

use crate::types::AccountId;
use std::sync::Arc;

/// Reserves a number of seats for an account.
///
/// Abstraction over the external seat-booking service. Like the payment
/// gateway it has no failure contract.
pub trait SeatReservationGateway: Send + Sync {
    /// Reserve `seats` seats for `account_id`
    fn reserve_seat(&self, account_id: AccountId, seats: u32);
}

/// Development reservation gateway that only logs the booking.
#[derive(Clone, Debug, Default)]
pub struct LoggingSeatReservationGateway;

impl LoggingSeatReservationGateway {
    /// Creates a new logging reservation gateway
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared() -> Arc<dyn SeatReservationGateway> {
        Arc::new(Self::new())
    }
}

impl SeatReservationGateway for LoggingSeatReservationGateway {
    fn reserve_seat(&self, account_id: AccountId, seats: u32) {
        tracing::info!(account_id = account_id.value(), seats, "Seats reserved");
    }
}
