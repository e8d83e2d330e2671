//! Purchase service: validates, prices, then hands off to the collaborators.

use crate::error::{InvalidPurchase, Result};
use crate::payment_gateway::PaymentGateway;
use crate::pricing::{self, PricingPolicy};
use crate::seat_reservation::SeatReservationGateway;
use crate::types::{AccountId, PurchaseOrder, PurchaseQuote, TicketRequest};
use std::sync::Arc;

/// Dependencies injected into the purchase service
#[derive(Clone)]
pub struct PurchaseEnvironment {
    /// Payment collaborator
    pub payments: Arc<dyn PaymentGateway>,
    /// Seat reservation collaborator
    pub reservations: Arc<dyn SeatReservationGateway>,
}

impl PurchaseEnvironment {
    /// Creates a new `PurchaseEnvironment`
    #[must_use]
    pub fn new(
        payments: Arc<dyn PaymentGateway>,
        reservations: Arc<dyn SeatReservationGateway>,
    ) -> Self {
        Self {
            payments,
            reservations,
        }
    }
}

impl std::fmt::Debug for PurchaseEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PurchaseEnvironment").finish_non_exhaustive()
    }
}

/// Entry point for ticket purchases.
///
/// Holds no per-purchase state: every call builds its own tally, so one
/// service can be shared across any number of purchases.
#[derive(Clone, Debug)]
pub struct TicketService {
    environment: PurchaseEnvironment,
    policy: PricingPolicy,
}

impl TicketService {
    /// Creates a service over the given collaborators and policy
    #[must_use]
    pub const fn new(environment: PurchaseEnvironment, policy: PricingPolicy) -> Self {
        Self {
            environment,
            policy,
        }
    }

    /// Policy applied to every order
    #[must_use]
    pub const fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Validates and prices an order without charging or reserving anything.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPurchase`] if the order is not admissible.
    pub fn quote(&self, account_id: AccountId, requests: &[TicketRequest]) -> Result<PurchaseQuote> {
        pricing::evaluate(account_id, requests, &self.policy)
    }

    /// Purchases the requested tickets.
    ///
    /// On success the payment gateway is called once with the total amount,
    /// then the reservation gateway once with the seat count. On failure
    /// neither is called.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPurchase`] naming the first rule the order breaks.
    pub fn purchase_tickets(&self, account_id: AccountId, requests: &[TicketRequest]) -> Result<()> {
        self.execute(account_id, requests).map(|_| ())
    }

    /// Purchases a whole [`PurchaseOrder`] and returns what was charged.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPurchase`] naming the first rule the order breaks.
    pub fn purchase_order(&self, order: &PurchaseOrder) -> Result<PurchaseQuote> {
        self.execute(order.account_id, &order.requests)
    }

    #[tracing::instrument(skip_all, fields(account_id = account_id.value(), requests = requests.len()))]
    fn execute(&self, account_id: AccountId, requests: &[TicketRequest]) -> Result<PurchaseQuote> {
        let quote = self.quote(account_id, requests).inspect_err(|err: &InvalidPurchase| {
            tracing::warn!(reason = ?err.reason(), "Purchase rejected: {err}");
        })?;

        tracing::debug!(
            adults = quote.adults,
            children = quote.children,
            infants = quote.infants,
            "Order validated"
        );

        // No compensation if the reservation fails after the charge.
        self.environment
            .payments
            .make_payment(account_id, quote.total_amount);
        self.environment
            .reservations
            .reserve_seat(account_id, quote.total_seats);

        tracing::info!(
            amount = quote.total_amount.units(),
            seats = quote.total_seats,
            "Purchase completed"
        );
        Ok(quote)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::payment_gateway::LoggingPaymentGateway;
    use crate::seat_reservation::LoggingSeatReservationGateway;
    use crate::types::Money;

    fn create_test_service() -> TicketService {
        TicketService::new(
            PurchaseEnvironment::new(
                LoggingPaymentGateway::shared(),
                LoggingSeatReservationGateway::shared(),
            ),
            PricingPolicy::standard(),
        )
    }

    #[test]
    fn test_quote_prices_family_order() {
        let service = create_test_service();
        let quote = service
            .quote(
                AccountId::new(5),
                &[
                    TicketRequest::adult(1),
                    TicketRequest::child(1),
                    TicketRequest::infant(1),
                ],
            )
            .unwrap();
        assert_eq!(quote.total_amount, Money::from_units(30));
        assert_eq!(quote.total_seats, 2);
    }

    #[test]
    fn test_purchase_order_returns_quote() {
        let service = create_test_service();
        let order = PurchaseOrder::new(AccountId::new(3), vec![TicketRequest::adult(2)]);
        let quote = service.purchase_order(&order).unwrap();
        assert_eq!(quote.total_amount, Money::from_units(40));
        assert_eq!(quote.total_seats, 2);
    }

    #[test]
    fn test_purchase_rejects_invalid_account() {
        let service = create_test_service();
        let err = service
            .purchase_tickets(AccountId::new(0), &[TicketRequest::adult(1)])
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid account number");
    }
}
