//! Domain types for ticket purchases.
//!
//! A purchase is a transient value: an account plus an ordered batch of
//! `(category, quantity)` requests. Nothing here is persisted; every type is
//! built per call and dropped when the call returns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Identifiers
// ============================================================================

/// Account the purchase is charged to and the seats are reserved for.
///
/// The raw value is kept as received. Only strictly positive values are
/// accepted by the purchase flow, see [`AccountId::is_valid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(i64);

impl AccountId {
    /// Creates an `AccountId` from its raw value
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw value
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }

    /// Whether the account can be charged (strictly positive)
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

impl From<i64> for AccountId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Money Value Object (whole currency units)
// ============================================================================

/// An amount in whole currency units
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Zero units
    pub const ZERO: Self = Self(0);

    /// Creates a `Money` value from whole units
    #[must_use]
    pub const fn from_units(units: u64) -> Self {
        Self(units)
    }

    /// Returns the amount in whole units
    #[must_use]
    pub const fn units(&self) -> u64 {
        self.0
    }

    /// Checks if the amount is zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds two amounts, `None` on overflow
    #[must_use]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(units) => Some(Self(units)),
            None => None,
        }
    }

    /// Multiplies by a ticket count, `None` on overflow
    #[must_use]
    pub const fn checked_mul(self, count: u64) -> Option<Self> {
        match self.0.checked_mul(count) {
            Some(units) => Some(Self(units)),
            None => None,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Ticket categories and requests
// ============================================================================

/// Ticket category. The set is closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketCategory {
    /// Adult ticket, charged and seated
    Adult,
    /// Child ticket, charged and seated, needs an adult
    Child,
    /// Infant ticket, free and sits on an adult's lap
    Infant,
}

impl TicketCategory {
    /// Every category, in declaration order
    pub const ALL: [Self; 3] = [Self::Adult, Self::Child, Self::Infant];

    /// Upper-case name used in messages and on the command line
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Adult => "ADULT",
            Self::Child => "CHILD",
            Self::Infant => "INFANT",
        }
    }

    /// Whether tickets of this category occupy a reservable seat
    #[must_use]
    pub const fn is_seated(&self) -> bool {
        matches!(self, Self::Adult | Self::Child)
    }
}

impl fmt::Display for TicketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a category or request from text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseRequestError {
    /// Unknown category name
    #[error("unknown ticket category: {0}")]
    UnknownCategory(String),
    /// Missing `=` (or `:`) between category and quantity
    #[error("expected CATEGORY=QUANTITY, got: {0}")]
    MissingSeparator(String),
    /// Quantity is not an integer
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),
}

impl FromStr for TicketCategory {
    type Err = ParseRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADULT" => Ok(Self::Adult),
            "CHILD" => Ok(Self::Child),
            "INFANT" => Ok(Self::Infant),
            _ => Err(ParseRequestError::UnknownCategory(s.to_string())),
        }
    }
}

/// One element of a purchase batch.
///
/// The quantity is signed because it is taken as received; negative values
/// are rejected by the purchase flow rather than at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketRequest {
    /// Requested category
    pub category: TicketCategory,
    /// Requested number of tickets
    pub quantity: i32,
}

impl TicketRequest {
    /// Creates a request
    #[must_use]
    pub const fn new(category: TicketCategory, quantity: i32) -> Self {
        Self { category, quantity }
    }

    /// Shorthand for an adult request
    #[must_use]
    pub const fn adult(quantity: i32) -> Self {
        Self::new(TicketCategory::Adult, quantity)
    }

    /// Shorthand for a child request
    #[must_use]
    pub const fn child(quantity: i32) -> Self {
        Self::new(TicketCategory::Child, quantity)
    }

    /// Shorthand for an infant request
    #[must_use]
    pub const fn infant(quantity: i32) -> Self {
        Self::new(TicketCategory::Infant, quantity)
    }
}

impl FromStr for TicketRequest {
    type Err = ParseRequestError;

    /// Parses `CATEGORY=QUANTITY` or `CATEGORY:QUANTITY`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (category, quantity) = s
            .split_once(['=', ':'])
            .ok_or_else(|| ParseRequestError::MissingSeparator(s.to_string()))?;
        let category = category.parse()?;
        let quantity = quantity
            .trim()
            .parse()
            .map_err(|_| ParseRequestError::InvalidQuantity(quantity.to_string()))?;
        Ok(Self::new(category, quantity))
    }
}

impl fmt::Display for TicketRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.category, self.quantity)
    }
}

// ============================================================================
// Purchase order and quote
// ============================================================================

/// Full input of one purchase call
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// Account to charge
    pub account_id: AccountId,
    /// Requests in the order they were submitted
    #[serde(default)]
    pub requests: Vec<TicketRequest>,
}

impl PurchaseOrder {
    /// Creates an order
    #[must_use]
    pub const fn new(account_id: AccountId, requests: Vec<TicketRequest>) -> Self {
        Self {
            account_id,
            requests,
        }
    }
}

/// Priced outcome of an admissible order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseQuote {
    /// Amount passed to the payment gateway
    pub total_amount: Money,
    /// Seats passed to the reservation gateway (adults + children)
    pub total_seats: u32,
    /// Adult tickets across the whole order
    pub adults: u32,
    /// Child tickets across the whole order
    pub children: u32,
    /// Infant tickets across the whole order
    pub infants: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_account_validity() {
        assert!(AccountId::new(1).is_valid());
        assert!(!AccountId::new(0).is_valid());
        assert!(!AccountId::new(-7).is_valid());
    }

    #[test]
    fn test_category_parsing_ignores_case() {
        assert_eq!("adult".parse::<TicketCategory>().unwrap(), TicketCategory::Adult);
        assert_eq!(" Infant ".parse::<TicketCategory>().unwrap(), TicketCategory::Infant);
        assert!(matches!(
            "senior".parse::<TicketCategory>(),
            Err(ParseRequestError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_request_parsing() {
        assert_eq!("CHILD=3".parse::<TicketRequest>().unwrap(), TicketRequest::child(3));
        assert_eq!("adult:-1".parse::<TicketRequest>().unwrap(), TicketRequest::adult(-1));
        assert!(matches!(
            "ADULT".parse::<TicketRequest>(),
            Err(ParseRequestError::MissingSeparator(_))
        ));
        assert!(matches!(
            "ADULT=two".parse::<TicketRequest>(),
            Err(ParseRequestError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn test_order_deserializes_from_json() {
        let json = r#"{"account_id": 42, "requests": [{"category": "ADULT", "quantity": 2}]}"#;
        let order: PurchaseOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.account_id, AccountId::new(42));
        assert_eq!(order.requests, vec![TicketRequest::adult(2)]);
    }

    #[test]
    fn test_money_arithmetic() {
        let total = Money::from_units(20)
            .checked_mul(2)
            .and_then(|m| m.checked_add(Money::from_units(10)))
            .unwrap();
        assert_eq!(total.units(), 50);
        assert_eq!(Money::from_units(u64::MAX).checked_mul(2), None);
        assert_eq!(Money::from_units(u64::MAX).checked_add(Money::from_units(1)), None);
        assert!(Money::ZERO.is_zero());
    }
}
