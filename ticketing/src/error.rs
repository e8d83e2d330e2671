//! Error types for purchase validation.
//!
//! Callers see a single failure kind, [`InvalidPurchase`], whose message is the
//! human-readable explanation. The cause is carried as a [`RejectionReason`]
//! so tests and logs can match on it without parsing text.

use crate::types::TicketCategory;
use thiserror::Error;

/// Result type alias for purchase operations.
pub type Result<T> = std::result::Result<T, InvalidPurchase>;

/// The purchase was rejected. Nothing was charged and no seat was reserved.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct InvalidPurchase {
    reason: RejectionReason,
}

impl InvalidPurchase {
    /// Why the purchase was rejected
    #[must_use]
    pub const fn reason(&self) -> &RejectionReason {
        &self.reason
    }

    /// Consumes the error, returning the cause
    #[must_use]
    pub fn into_reason(self) -> RejectionReason {
        self.reason
    }
}

impl From<RejectionReason> for InvalidPurchase {
    fn from(reason: RejectionReason) -> Self {
        Self { reason }
    }
}

/// Distinct causes of a rejected purchase, in the order they are checked.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// One or more requests carried a negative quantity.
    #[error("invalid ticket quantity for type: {}", join_categories(.categories))]
    NegativeQuantity {
        /// Offending categories, first appearance first
        categories: Vec<TicketCategory>,
    },

    /// Adult plus child tickets exceed the per-order seat limit.
    #[error("maximum of {limit} tickets allowed, exceeded by {exceeded_by}")]
    SeatLimitExceeded {
        /// Configured seat limit
        limit: u32,
        /// Requested seats minus the limit
        exceeded_by: u64,
    },

    /// No adult ticket is actually being bought.
    #[error("at least one adult ticket required")]
    AdultRequired,

    /// Child or infant tickets were requested with no adult request at all.
    #[error("infant/child cannot purchase without adult")]
    AdultMissing,

    /// Adult, child and infant were all requested with fewer adults than infants.
    #[error("infant and adult count mismatch")]
    InfantAdultMismatch,

    /// More infants than adults, each infant needs an adult lap.
    #[error("must add {additional} more adult tickets")]
    MoreAdultsRequired {
        /// Adult tickets missing
        additional: u64,
    },

    /// The order total does not fit in the supported amount range.
    #[error("total amount exceeds the supported range")]
    AmountOverflow,

    /// The account identifier is zero or negative.
    #[error("Invalid account number")]
    InvalidAccount,
}

fn join_categories(categories: &[TicketCategory]) -> String {
    categories
        .iter()
        .map(TicketCategory::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
