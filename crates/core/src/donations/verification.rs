//! Donation verification rules.
//!
//! Storage implementations call [`plan_transition`] inside the same
//! transaction that writes the new status, then apply the returned
//! [`LedgerAdjustment`] to the campaign's running total.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::donations_model::DonationStatus;
use crate::errors::{Error, Result, ValidationError};

/// Change to a campaign's running total caused by a status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "camelCase")]
pub enum LedgerAdjustment {
    None,
    Credit(Decimal),
    Debit(Decimal),
}

impl LedgerAdjustment {
    /// Signed change to the running total.
    pub fn delta(&self) -> Decimal {
        match self {
            LedgerAdjustment::None => Decimal::ZERO,
            LedgerAdjustment::Credit(amount) => *amount,
            LedgerAdjustment::Debit(amount) => -*amount,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, LedgerAdjustment::None)
    }

    /// New running total after this adjustment. A total below zero, or one
    /// outside the decimal range, is refused.
    pub fn apply(&self, running_total: Decimal) -> Result<Decimal> {
        let updated = running_total.checked_add(self.delta()).ok_or_else(|| {
            Error::ConstraintViolation(format!(
                "Running total {} cannot absorb an adjustment of {}",
                running_total,
                self.delta()
            ))
        })?;
        if updated < Decimal::ZERO {
            return Err(Error::ConstraintViolation(format!(
                "Running total {} cannot absorb a debit of {}",
                running_total,
                -self.delta()
            )));
        }
        Ok(updated)
    }
}

/// Decides whether `current -> target` is allowed and what it does to the ledger.
///
/// | from \ to | pending | verified | rejected |
/// |-----------|---------|----------|----------|
/// | pending   | no-op   | credit   | none     |
/// | verified  | invalid | no-op    | debit    |
/// | rejected  | invalid | invalid  | no-op    |
pub fn plan_transition(
    current: DonationStatus,
    target: DonationStatus,
    amount: Decimal,
) -> Result<LedgerAdjustment> {
    use DonationStatus::*;

    match (current, target) {
        (from, to) if from == to => Ok(LedgerAdjustment::None),
        (Pending, Verified) => Ok(LedgerAdjustment::Credit(amount)),
        (Pending, Rejected) => Ok(LedgerAdjustment::None),
        (Verified, Rejected) => Ok(LedgerAdjustment::Debit(amount)),
        (from, to) => Err(Error::Validation(ValidationError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        })),
    }
}
