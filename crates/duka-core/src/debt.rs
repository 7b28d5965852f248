//! # Debt Rules
//!
//! Status derivation and payment validation for customer debts.
//!
//! ## Status Derivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  Debt Status State Machine                      │
//! │                                                                 │
//! │        time passes due date                                     │
//! │  Open ───────────────────────► Overdue                          │
//! │    │                              │                             │
//! │    │ paid in full                 │ paid in full                │
//! │    └──────────────┬───────────────┘                             │
//! │                   ▼                                             │
//! │                 Paid  (terminal, absorbing regardless of date)  │
//! │                                                                 │
//! │  The status is NOT a column. It is recomputed on every read     │
//! │  from (amount, paid, due_date, today), so the open → overdue    │
//! │  transition happens by the clock alone, with nothing to go      │
//! │  stale.                                                         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::types::DebtStatus;

/// Derives the status of a debt as of `today`.
///
/// ## Rules (in priority order)
/// 1. `Paid` when paid ≥ amount - absorbing, the due date is irrelevant
/// 2. `Overdue` when unpaid and due_date < today
/// 3. `Open` otherwise
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use duka_core::debt::derive_status;
/// use duka_core::types::DebtStatus;
///
/// let due = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let today = NaiveDate::from_ymd_opt(2026, 1, 16).unwrap();
///
/// assert_eq!(derive_status(10_000, 0, due, today), DebtStatus::Overdue);
/// assert_eq!(derive_status(10_000, 10_000, due, today), DebtStatus::Paid);
/// ```
pub fn derive_status(
    amount_cents: i64,
    paid_cents: i64,
    due_date: NaiveDate,
    today: NaiveDate,
) -> DebtStatus {
    if paid_cents >= amount_cents {
        DebtStatus::Paid
    } else if due_date < today {
        DebtStatus::Overdue
    } else {
        DebtStatus::Open
    }
}

/// Validates a payment against the outstanding balance.
///
/// ## Rules
/// - Amount must be positive
/// - Amount must not exceed the remaining balance (no overpayment;
///   change is the cashier's problem, not the ledger's)
pub fn validate_payment(
    requested_cents: i64,
    remaining_cents: i64,
) -> Result<(), ValidationError> {
    if requested_cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "payment amount".to_string(),
        });
    }

    if requested_cents > remaining_cents {
        return Err(ValidationError::Overpayment {
            remaining_cents,
            requested_cents,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_open_before_due_date() {
        assert_eq!(
            derive_status(10_000, 0, d(2026, 2, 1), d(2026, 1, 15)),
            DebtStatus::Open
        );
        // Due today is not overdue yet.
        assert_eq!(
            derive_status(10_000, 5_000, d(2026, 1, 15), d(2026, 1, 15)),
            DebtStatus::Open
        );
    }

    #[test]
    fn test_overdue_after_due_date() {
        // Due yesterday, nothing paid.
        assert_eq!(
            derive_status(10_000, 0, d(2026, 1, 14), d(2026, 1, 15)),
            DebtStatus::Overdue
        );
        // Partially paid debts still go overdue.
        assert_eq!(
            derive_status(10_000, 9_999, d(2026, 1, 14), d(2026, 1, 15)),
            DebtStatus::Overdue
        );
    }

    #[test]
    fn test_paid_wins_regardless_of_date() {
        // Exactly paid, long past due: still Paid.
        assert_eq!(
            derive_status(10_000, 10_000, d(2020, 1, 1), d(2026, 1, 15)),
            DebtStatus::Paid
        );
        // A later overdue check no longer changes the status.
        assert_eq!(
            derive_status(10_000, 10_000, d(2020, 1, 1), d(2030, 6, 1)),
            DebtStatus::Paid
        );
    }

    #[test]
    fn test_validate_payment_rejects_non_positive() {
        assert!(validate_payment(0, 10_000).is_err());
        assert!(validate_payment(-100, 10_000).is_err());
    }

    #[test]
    fn test_validate_payment_rejects_overpayment() {
        let err = validate_payment(900, 500).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Overpayment {
                remaining_cents: 500,
                requested_cents: 900,
            }
        ));
    }

    #[test]
    fn test_validate_payment_accepts_exact_and_partial() {
        assert!(validate_payment(500, 500).is_ok());
        assert!(validate_payment(1, 500).is_ok());
    }
}
