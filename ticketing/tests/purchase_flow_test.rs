//! End-to-end purchase tests against recording collaborators.
//!
//! Every test checks both the outcome and what reached the payment and
//! reservation gateways.
//!
//! Run with: `cargo test --test purchase_flow_test`

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use ticketing::{AccountId, Config, Money, RejectionReason, TicketRequest, TicketService};
use ticketing_testing::{GatewayCall, RecordingGateways, family, recording_service};

#[test]
fn test_adult_only_purchase() {
    let (service, gateways) = recording_service();

    service
        .purchase_tickets(AccountId::new(11), &[TicketRequest::adult(2)])
        .expect("two adults should be accepted");

    assert_eq!(
        gateways.calls(),
        vec![
            GatewayCall::Payment {
                account_id: AccountId::new(11),
                amount: Money::from_units(40),
            },
            GatewayCall::Reservation {
                account_id: AccountId::new(11),
                seats: 2,
            },
        ]
    );
}

#[test]
fn test_family_purchase_excludes_infant_seat_and_price() {
    let (service, gateways) = recording_service();

    service
        .purchase_tickets(AccountId::new(3), &family(1, 1, 1))
        .unwrap();

    assert_eq!(
        gateways.payments.payments(),
        vec![(AccountId::new(3), Money::from_units(30))]
    );
    assert_eq!(gateways.reservations.reservations(), vec![(AccountId::new(3), 2)]);
}

#[test]
fn test_split_requests_are_summed() {
    let (service, gateways) = recording_service();

    service
        .purchase_tickets(
            AccountId::new(8),
            &[
                TicketRequest::adult(1),
                TicketRequest::child(2),
                TicketRequest::adult(1),
                TicketRequest::infant(1),
                TicketRequest::infant(1),
            ],
        )
        .unwrap();

    assert_eq!(
        gateways.payments.payments(),
        vec![(AccountId::new(8), Money::from_units(60))]
    );
    assert_eq!(gateways.reservations.reservations(), vec![(AccountId::new(8), 4)]);
}

#[test]
fn test_exactly_at_seat_limit_is_accepted() {
    let (service, gateways) = recording_service();

    service
        .purchase_tickets(AccountId::new(1), &family(12, 8, 0))
        .unwrap();

    assert_eq!(gateways.reservations.reservations(), vec![(AccountId::new(1), 20)]);
}

#[test]
fn test_seat_limit_exceeded() {
    let (service, gateways) = recording_service();

    let err = service
        .purchase_tickets(AccountId::new(1), &family(15, 6, 0))
        .unwrap_err();

    assert_eq!(
        err.reason(),
        &RejectionReason::SeatLimitExceeded {
            limit: 20,
            exceeded_by: 1,
        }
    );
    assert!(gateways.is_untouched());
}

#[test]
fn test_negative_quantity_rejected() {
    let (service, gateways) = recording_service();

    let err = service
        .purchase_tickets(
            AccountId::new(1),
            &[TicketRequest::adult(2), TicketRequest::child(-1)],
        )
        .unwrap_err();

    assert_eq!(err.to_string(), "invalid ticket quantity for type: CHILD");
    assert!(gateways.is_untouched());
}

#[test]
fn test_child_without_adult_rejected() {
    let (service, gateways) = recording_service();

    let err = service
        .purchase_tickets(AccountId::new(1), &[TicketRequest::child(1)])
        .unwrap_err();

    assert_eq!(err.reason(), &RejectionReason::AdultMissing);
    assert_eq!(err.to_string(), "infant/child cannot purchase without adult");
    assert!(gateways.is_untouched());
}

#[test]
fn test_more_infants_than_adults_rejected() {
    let (service, gateways) = recording_service();

    let err = service
        .purchase_tickets(AccountId::new(1), &family(1, 0, 2))
        .unwrap_err();

    assert_eq!(
        err.reason(),
        &RejectionReason::MoreAdultsRequired { additional: 1 }
    );
    assert_eq!(err.to_string(), "must add 1 more adult tickets");
    assert!(gateways.is_untouched());
}

#[test]
fn test_infant_mismatch_with_children_present() {
    let (service, gateways) = recording_service();

    let err = service
        .purchase_tickets(AccountId::new(1), &family(2, 1, 3))
        .unwrap_err();

    assert_eq!(err.reason(), &RejectionReason::InfantAdultMismatch);
    assert!(gateways.is_untouched());
}

#[test]
fn test_explicit_zero_adults_rejected() {
    let (service, gateways) = recording_service();

    let err = service
        .purchase_tickets(AccountId::new(1), &[TicketRequest::adult(0)])
        .unwrap_err();

    assert_eq!(err.to_string(), "at least one adult ticket required");
    assert!(gateways.is_untouched());
}

#[test]
fn test_empty_order_rejected() {
    let (service, gateways) = recording_service();

    let err = service.purchase_tickets(AccountId::new(1), &[]).unwrap_err();

    assert_eq!(err.reason(), &RejectionReason::AdultRequired);
    assert!(gateways.is_untouched());
}

#[test]
fn test_invalid_account_rejected_after_order_checks() {
    let (service, gateways) = recording_service();

    for account in [0, -1, i64::MIN] {
        let err = service
            .purchase_tickets(AccountId::new(account), &[TicketRequest::adult(1)])
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid account number");
    }

    // A broken composition wins over a broken account.
    let err = service
        .purchase_tickets(AccountId::new(0), &[TicketRequest::infant(1)])
        .unwrap_err();
    assert_eq!(err.reason(), &RejectionReason::AdultMissing);

    assert!(gateways.is_untouched());
}

#[test]
fn test_service_reuse_does_not_leak_seat_totals() {
    let (service, gateways) = recording_service();

    for _ in 0..5 {
        service
            .purchase_tickets(AccountId::new(2), &family(10, 5, 0))
            .expect("15 seats stays under the limit on every call");
    }

    assert_eq!(
        gateways.reservations.reservations(),
        vec![(AccountId::new(2), 15); 5]
    );
}

#[test]
fn test_zero_adults_with_infants_rejected_as_missing_adults() {
    let (service, gateways) = recording_service();

    let err = service
        .purchase_tickets(
            AccountId::new(1),
            &[TicketRequest::adult(0), TicketRequest::infant(2)],
        )
        .unwrap_err();

    assert_eq!(
        err.reason(),
        &RejectionReason::MoreAdultsRequired { additional: 2 }
    );
    assert!(gateways.is_untouched());
}

#[test]
fn test_seat_limit_checked_before_composition_and_account() {
    let (service, gateways) = recording_service();

    let err = service
        .purchase_tickets(AccountId::new(-1), &[TicketRequest::child(25)])
        .unwrap_err();

    assert_eq!(
        err.reason(),
        &RejectionReason::SeatLimitExceeded {
            limit: 20,
            exceeded_by: 5,
        }
    );
    assert_eq!(err.to_string(), "maximum of 20 tickets allowed, exceeded by 5");
    assert!(gateways.is_untouched());
}

#[test]
fn test_oversized_configured_price_is_rejected() {
    let config = Config::from_lookup(|key| {
        (key == "TICKET_ADULT_PRICE").then(|| u64::MAX.to_string())
    });
    let gateways = RecordingGateways::new();
    let service = TicketService::new(gateways.environment(), config.policy());

    let err = service
        .purchase_tickets(AccountId::new(1), &[TicketRequest::adult(2)])
        .unwrap_err();

    assert_eq!(err.reason(), &RejectionReason::AmountOverflow);
    assert!(gateways.is_untouched());

    // A single ticket at the maximum price still fits.
    service
        .purchase_tickets(AccountId::new(1), &[TicketRequest::adult(1)])
        .unwrap();
    assert_eq!(
        gateways.payments.payments(),
        vec![(AccountId::new(1), Money::from_units(u64::MAX))]
    );
}
