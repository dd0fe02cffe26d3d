use crate::domain::payment::PaymentStatus;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal amount to the nearest whole minor currency unit
/// (centavos), matching how the provider reports amounts.
pub fn to_minor_units(amount: Decimal) -> i64 {
    (amount * Decimal::from(100))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        // unrepresentable amounts can never match a provider amount
        .unwrap_or(i64::MIN)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    Settle,
    Skip,
    AmountMismatch {
        expected_minor: i64,
        received_minor: i64,
    },
}

pub fn on_payment_paid(
    current: PaymentStatus,
    expected_amount: Decimal,
    received_minor: i64,
) -> ConfirmAction {
    if !current.can_transition() {
        return ConfirmAction::Skip;
    }

    let expected_minor = to_minor_units(expected_amount);
    if expected_minor != received_minor {
        return ConfirmAction::AmountMismatch {
            expected_minor,
            received_minor,
        };
    }

    ConfirmAction::Settle
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAction {
    MarkFailed,
    Skip,
}

pub fn on_payment_failed(current: PaymentStatus) -> FailAction {
    if current.can_transition() {
        FailAction::MarkFailed
    } else {
        FailAction::Skip
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeAction {
    Charge,
    Skip,
}

pub fn on_source_chargeable(current: PaymentStatus) -> ChargeAction {
    if current.can_transition() {
        ChargeAction::Charge
    } else {
        ChargeAction::Skip
    }
}
