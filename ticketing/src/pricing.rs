//! Validation and pricing of a purchase batch.
//!
//! Everything in this module is pure: [`evaluate`] takes the requests and a
//! [`PricingPolicy`] and returns either a [`PurchaseQuote`] or the first rule
//! the order breaks. The running totals live in a [`TicketTally`] built fresh
//! for every call.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! ```text
//! 1. negative quantities     -> NegativeQuantity
//! 2. adult + child > limit   -> SeatLimitExceeded
//! 3. composition rules       -> AdultRequired | AdultMissing
//!                               | InfantAdultMismatch | MoreAdultsRequired
//! 4. price the order         -> AmountOverflow
//! 5. account id <= 0         -> InvalidAccount
//! ```

use crate::error::{InvalidPurchase, RejectionReason, Result};
use crate::types::{AccountId, Money, PurchaseQuote, TicketCategory, TicketRequest};
use serde::{Deserialize, Serialize};

/// Price of an adult ticket
pub const ADULT_PRICE: Money = Money::from_units(20);

/// Price of a child ticket
pub const CHILD_PRICE: Money = Money::from_units(10);

/// Price of an infant ticket
pub const INFANT_PRICE: Money = Money::ZERO;

/// Maximum adult + child tickets in one order
pub const MAX_CHARGEABLE_SEATS: u32 = 20;

/// Prices and limits applied to an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Price per adult ticket
    pub adult_price: Money,
    /// Price per child ticket
    pub child_price: Money,
    /// Price per infant ticket
    pub infant_price: Money,
    /// Maximum adult + child tickets per order
    pub max_chargeable_seats: u32,
}

impl PricingPolicy {
    /// The fixed price table and seat limit
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            adult_price: ADULT_PRICE,
            child_price: CHILD_PRICE,
            infant_price: INFANT_PRICE,
            max_chargeable_seats: MAX_CHARGEABLE_SEATS,
        }
    }

    /// Unit price of a category
    #[must_use]
    pub const fn price_of(&self, category: TicketCategory) -> Money {
        match category {
            TicketCategory::Adult => self.adult_price,
            TicketCategory::Child => self.child_price,
            TicketCategory::Infant => self.infant_price,
        }
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

/// Per-call aggregate of a request batch.
///
/// Presence is tracked apart from counts: a category is present as soon as
/// one request names it, even with quantity 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TicketTally {
    adults: u64,
    children: u64,
    infants: u64,
    adult_present: bool,
    child_present: bool,
    infant_present: bool,
    seats: u64,
}

impl TicketTally {
    /// Aggregates the batch in one pass.
    ///
    /// Only positive quantities are counted, so the tally of a batch that
    /// still holds negative quantities is meaningless. Run
    /// [`reject_negative_quantities`] first.
    #[must_use]
    pub fn from_requests(requests: &[TicketRequest]) -> Self {
        requests.iter().fold(Self::default(), |mut tally, request| {
            let quantity = u64::try_from(request.quantity).unwrap_or(0);
            match request.category {
                TicketCategory::Adult => {
                    tally.adults += quantity;
                    tally.adult_present = true;
                }
                TicketCategory::Child => {
                    tally.children += quantity;
                    tally.child_present = true;
                }
                TicketCategory::Infant => {
                    tally.infants += quantity;
                    tally.infant_present = true;
                }
            }
            if request.category.is_seated() {
                tally.seats += quantity;
            }
            tally
        })
    }

    /// Adult tickets across the batch
    #[must_use]
    pub const fn adults(&self) -> u64 {
        self.adults
    }

    /// Child tickets across the batch
    #[must_use]
    pub const fn children(&self) -> u64 {
        self.children
    }

    /// Infant tickets across the batch
    #[must_use]
    pub const fn infants(&self) -> u64 {
        self.infants
    }

    /// Seats to reserve: adults plus children
    #[must_use]
    pub const fn seats(&self) -> u64 {
        self.seats
    }

    /// Whether any request named the category
    #[must_use]
    pub const fn is_present(&self, category: TicketCategory) -> bool {
        match category {
            TicketCategory::Adult => self.adult_present,
            TicketCategory::Child => self.child_present,
            TicketCategory::Infant => self.infant_present,
        }
    }

    /// Fails when the seated tickets exceed `limit`, otherwise returns the seat count.
    ///
    /// # Errors
    ///
    /// Returns [`RejectionReason::SeatLimitExceeded`] with the excess.
    pub fn check_seat_limit(&self, limit: u32) -> Result<u32> {
        let limit_wide = u64::from(limit);
        if self.seats > limit_wide {
            return Err(RejectionReason::SeatLimitExceeded {
                limit,
                exceeded_by: self.seats - limit_wide,
            }
            .into());
        }
        // Bounded by `limit` above.
        Ok(u32::try_from(self.seats).unwrap_or(limit))
    }

    /// Applies the adult/child/infant co-occurrence rules. First match wins.
    ///
    /// # Errors
    ///
    /// Returns the reason of the first rule the batch breaks.
    pub fn check_composition(&self) -> Result<()> {
        let (adult, child, infant) = (self.adult_present, self.child_present, self.infant_present);

        let reason = if adult && self.adults == 0 && !child && !infant {
            Some(RejectionReason::AdultRequired)
        } else if !adult && (child || infant) {
            Some(RejectionReason::AdultMissing)
        } else if adult && child && infant && self.adults < self.infants {
            Some(RejectionReason::InfantAdultMismatch)
        } else if adult && infant && self.infants > self.adults {
            Some(RejectionReason::MoreAdultsRequired {
                additional: self.infants - self.adults,
            })
        } else if self.adults == 0 {
            // Empty batches and batches of zero quantities buy nothing.
            Some(RejectionReason::AdultRequired)
        } else {
            None
        };

        reason.map_or(Ok(()), |reason| Err(reason.into()))
    }

    /// Total price of the batch under `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`RejectionReason::AmountOverflow`] if the total does not fit
    /// in a [`Money`] value.
    pub fn amount(&self, policy: &PricingPolicy) -> Result<Money> {
        policy
            .adult_price
            .checked_mul(self.adults)
            .zip(policy.child_price.checked_mul(self.children))
            .zip(policy.infant_price.checked_mul(self.infants))
            .and_then(|((adults, children), infants)| {
                adults.checked_add(children)?.checked_add(infants)
            })
            .ok_or_else(|| RejectionReason::AmountOverflow.into())
    }
}

/// Fails if any request has a negative quantity.
///
/// # Errors
///
/// Returns [`RejectionReason::NegativeQuantity`] naming every offending
/// category once, in order of first appearance.
pub fn reject_negative_quantities(requests: &[TicketRequest]) -> Result<()> {
    let mut categories: Vec<TicketCategory> = Vec::new();
    for request in requests.iter().filter(|r| r.quantity < 0) {
        if !categories.contains(&request.category) {
            categories.push(request.category);
        }
    }

    if categories.is_empty() {
        Ok(())
    } else {
        Err(RejectionReason::NegativeQuantity { categories }.into())
    }
}

/// Validates and prices a batch without touching any collaborator.
///
/// # Errors
///
/// Returns [`InvalidPurchase`] carrying the first rule the order breaks.
/// The account is checked last, only once the batch itself is admissible.
pub fn evaluate(
    account_id: AccountId,
    requests: &[TicketRequest],
    policy: &PricingPolicy,
) -> Result<PurchaseQuote> {
    reject_negative_quantities(requests)?;

    let tally = TicketTally::from_requests(requests);
    let total_seats = tally.check_seat_limit(policy.max_chargeable_seats)?;
    tally.check_composition()?;
    let total_amount = tally.amount(policy)?;

    if !account_id.is_valid() {
        return Err(InvalidPurchase::from(RejectionReason::InvalidAccount));
    }

    Ok(PurchaseQuote {
        total_amount,
        total_seats,
        adults: narrow(tally.adults),
        children: narrow(tally.children),
        infants: narrow(tally.infants),
    })
}

// Counts that passed the seat and composition checks fit in u32.
fn narrow(count: u64) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
