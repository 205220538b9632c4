//! Unix-second timestamp helpers (UTC, `i64` as reported by the Clock sysvar).

use crate::constants::SECONDS_PER_DAY;
use crate::error::PurchaseError;

/// `ts + delay`, failing on overflow.
pub fn offset(ts: i64, delay: i64) -> Result<i64, PurchaseError> {
    ts.checked_add(delay).ok_or(PurchaseError::MathOverflow)
}

/// True once `now` has reached `deadline` (inclusive).
pub fn reached(now: i64, deadline: i64) -> bool {
    now >= deadline
}

/// Whole days in `secs`, for log lines.
pub fn whole_days(secs: i64) -> i64 {
    secs.div_euclid(SECONDS_PER_DAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_adds_and_detects_overflow() {
        assert_eq!(offset(1_700_000_000, 30 * SECONDS_PER_DAY).unwrap(), 1_702_592_000);
        assert!(matches!(offset(i64::MAX, 1), Err(PurchaseError::MathOverflow)));
    }

    #[test]
    fn deadline_is_inclusive() {
        let deadline = 1_000;
        assert!(!reached(deadline - 1, deadline));
        assert!(reached(deadline, deadline));
        assert!(reached(deadline + 1, deadline));
    }

    #[test]
    fn whole_days_floors() {
        assert_eq!(whole_days(30 * SECONDS_PER_DAY), 30);
        assert_eq!(whole_days(SECONDS_PER_DAY - 1), 0);
    }
}
