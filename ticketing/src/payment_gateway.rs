//! Payment collaborator.
//!
//! The purchase flow charges an account through [`PaymentGateway`] once the
//! order has been validated and priced. The call is treated as always
//! succeeding: nothing is returned and nothing is retried.

use crate::types::{AccountId, Money};
use std::sync::Arc;

/// Charges an amount to an account.
///
/// Abstraction over the external payment processor.
pub trait PaymentGateway: Send + Sync {
    /// Charge `amount` to `account_id`
    fn make_payment(&self, account_id: AccountId, amount: Money);
}

/// Development payment gateway that only logs the charge.
#[derive(Clone, Debug, Default)]
pub struct LoggingPaymentGateway;

impl LoggingPaymentGateway {
    /// Creates a new logging payment gateway
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared() -> Arc<dyn PaymentGateway> {
        Arc::new(Self::new())
    }
}

impl PaymentGateway for LoggingPaymentGateway {
    fn make_payment(&self, account_id: AccountId, amount: Money) {
        tracing::info!(
            account_id = account_id.value(),
            amount = amount.units(),
            "Payment taken"
        );
    }
}
