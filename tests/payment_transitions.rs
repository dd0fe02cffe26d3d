use pos_payments::domain::payment::PaymentStatus;
use pos_payments::domain::transition::{
    on_payment_failed, on_payment_paid, on_source_chargeable, to_minor_units, ChargeAction,
    ConfirmAction, FailAction,
};
use rust_decimal::Decimal;

fn pesos(minor: i64) -> Decimal {
    Decimal::new(minor, 2)
}

#[test]
fn settles_pending_payment_on_exact_amount() {
    // order total 250.00, provider reports 25000 centavos
    let action = on_payment_paid(PaymentStatus::Pending, pesos(25000), 25000);
    assert_eq!(action, ConfirmAction::Settle);
}

#[test]
fn settles_processing_payment() {
    let action = on_payment_paid(PaymentStatus::Processing, pesos(25000), 25000);
    assert_eq!(action, ConfirmAction::Settle);
}

#[test]
fn one_centavo_short_is_a_mismatch() {
    let action = on_payment_paid(PaymentStatus::Pending, pesos(25000), 24999);
    assert_eq!(
        action,
        ConfirmAction::AmountMismatch {
            expected_minor: 25000,
            received_minor: 24999,
        }
    );
}

#[test]
fn replayed_confirmation_is_a_noop() {
    let action = on_payment_paid(PaymentStatus::Success, pesos(25000), 25000);
    assert_eq!(action, ConfirmAction::Skip);
}

#[test]
fn failed_payment_cannot_be_settled() {
    let action = on_payment_paid(PaymentStatus::Failed, pesos(25000), 25000);
    assert_eq!(action, ConfirmAction::Skip);
}

#[test]
fn pending_payment_can_fail() {
    assert_eq!(on_payment_failed(PaymentStatus::Pending), FailAction::MarkFailed);
    assert_eq!(on_payment_failed(PaymentStatus::Processing), FailAction::MarkFailed);
}

#[test]
fn failure_after_settlement_is_a_noop() {
    assert_eq!(on_payment_failed(PaymentStatus::Success), FailAction::Skip);
    assert_eq!(on_payment_failed(PaymentStatus::Failed), FailAction::Skip);
}

#[test]
fn refunded_payment_is_untouchable() {
    assert_eq!(
        on_payment_paid(PaymentStatus::Refunded, pesos(25000), 25000),
        ConfirmAction::Skip
    );
    assert_eq!(on_payment_failed(PaymentStatus::Refunded), FailAction::Skip);
    assert_eq!(on_source_chargeable(PaymentStatus::Refunded), ChargeAction::Skip);
}

#[test]
fn chargeable_source_charges_open_payment() {
    assert_eq!(on_source_chargeable(PaymentStatus::Pending), ChargeAction::Charge);
    assert_eq!(on_source_chargeable(PaymentStatus::Processing), ChargeAction::Charge);
}

#[test]
fn chargeable_source_skips_settled_payment() {
    assert_eq!(on_source_chargeable(PaymentStatus::Success), ChargeAction::Skip);
    assert_eq!(on_source_chargeable(PaymentStatus::Failed), ChargeAction::Skip);
}

#[test]
fn rounds_to_nearest_minor_unit() {
    assert_eq!(to_minor_units(pesos(25000)), 25000);
    assert_eq!(to_minor_units(pesos(9999)), 9999);
    assert_eq!(to_minor_units(Decimal::new(105, 1)), 1050);
    assert_eq!(to_minor_units(Decimal::new(1, 2)), 1);
    assert_eq!(to_minor_units(Decimal::ZERO), 0);
    // sub-centavo amounts round away from zero at the midpoint
    assert_eq!(to_minor_units(Decimal::new(2505, 3)), 251);
    assert_eq!(to_minor_units(Decimal::new(2504, 3)), 250);
}

#[test]
fn status_strings_round_trip() {
    for status in [
        PaymentStatus::Pending,
        PaymentStatus::Processing,
        PaymentStatus::Success,
        PaymentStatus::Failed,
        PaymentStatus::Refunded,
    ] {
        assert_eq!(PaymentStatus::parse(status.as_str()), Some(status));
    }
    assert_eq!(PaymentStatus::parse("cancelled"), None);
}

#[test]
fn terminal_statuses_are_success_and_failed() {
    assert!(PaymentStatus::Success.is_terminal());
    assert!(PaymentStatus::Failed.is_terminal());
    assert!(!PaymentStatus::Pending.is_terminal());
    assert!(!PaymentStatus::Processing.is_terminal());
    assert!(!PaymentStatus::Refunded.is_terminal());
}
