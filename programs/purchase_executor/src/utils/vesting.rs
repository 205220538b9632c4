//! Release schedules for delivered LDO.
//!
//! Grants are never liquid on delivery. Whether a withdrawal from a grant is
//! allowed is answered by a [`TransferGate`]; the program only ever talks to
//! the trait, so the all-or-nothing lock-up and the linear vesting schedule
//! are interchangeable.

use crate::error::PurchaseError;

pub trait TransferGate {
    /// Total amount unlocked at `now`, ignoring prior withdrawals.
    fn unlocked(&self, now: i64) -> Result<u64, PurchaseError>;

    /// Amount that may still be moved at `now` given `released` already moved.
    fn transferable(&self, released: u64, now: i64) -> Result<u64, PurchaseError> {
        Ok(self.unlocked(now)?.saturating_sub(released))
    }
}

/// Nothing moves before `unlock_at`; everything moves from it on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LockUp {
    amount: u64,
    unlock_at: i64,
}

impl LockUp {
    pub fn new(amount: u64, unlock_at: i64) -> Self {
        Self { amount, unlock_at }
    }

    pub fn unlock_at(&self) -> i64 {
        self.unlock_at
    }
}

impl TransferGate for LockUp {
    fn unlocked(&self, now: i64) -> Result<u64, PurchaseError> {
        Ok(if now >= self.unlock_at { self.amount } else { 0 })
    }
}

/// Zero before `cliff`, the full amount at and after `end`, and in between
/// `amount * (now - start) / (end - start)`, floored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinearVesting {
    amount: u64,
    start: i64,
    cliff: i64,
    end: i64,
}

impl LinearVesting {
    pub fn new(amount: u64, start: i64, cliff: i64, end: i64) -> Result<Self, PurchaseError> {
        if !(start <= cliff && cliff <= end) {
            return Err(PurchaseError::InvalidVestingDelays);
        }
        Ok(Self {
            amount,
            start,
            cliff,
            end,
        })
    }
}

impl TransferGate for LinearVesting {
    fn unlocked(&self, now: i64) -> Result<u64, PurchaseError> {
        if now < self.cliff {
            return Ok(0);
        }
        if now >= self.end {
            return Ok(self.amount);
        }
        // start <= cliff <= now < end, so both spans are positive.
        let elapsed = (now - self.start) as u128;
        let duration = (self.end - self.start) as u128;
        let vested = (self.amount as u128)
            .checked_mul(elapsed)
            .ok_or(PurchaseError::MathOverflow)?
            / duration;
        u64::try_from(vested).map_err(|_| PurchaseError::MathOverflow)
    }
}

/// Schedule attached to a grant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseSchedule {
    LockUp(LockUp),
    Linear(LinearVesting),
}

impl ReleaseSchedule {
    /// A grant whose vesting window is empty degenerates to a lock-up ending at `end`.
    pub fn for_grant(amount: u64, start: i64, cliff: i64, end: i64) -> Result<Self, PurchaseError> {
        if start == end {
            if cliff != end {
                return Err(PurchaseError::InvalidVestingDelays);
            }
            return Ok(Self::LockUp(LockUp::new(amount, end)));
        }
        Ok(Self::Linear(LinearVesting::new(amount, start, cliff, end)?))
    }
}

impl TransferGate for ReleaseSchedule {
    fn unlocked(&self, now: i64) -> Result<u64, PurchaseError> {
        match self {
            Self::LockUp(s) => s.unlocked(now),
            Self::Linear(s) => s.unlocked(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: i64 = 365 * 86_400;
    const T0: i64 = 1_700_000_000;

    #[test]
    fn lock_up_is_all_or_nothing() {
        let s = ReleaseSchedule::for_grant(1_000, T0 + YEAR, T0 + YEAR, T0 + YEAR).unwrap();
        match s {
            ReleaseSchedule::LockUp(l) => assert_eq!(l.unlock_at(), T0 + YEAR),
            other => panic!("expected lock-up, got {:?}", other),
        }

        assert_eq!(s.unlocked(T0).unwrap(), 0);
        assert_eq!(s.unlocked(T0 + YEAR / 2).unwrap(), 0);
        assert_eq!(s.unlocked(T0 + YEAR - 1).unwrap(), 0);
        assert_eq!(s.unlocked(T0 + YEAR).unwrap(), 1_000);
        assert_eq!(s.unlocked(T0 + 10 * YEAR).unwrap(), 1_000);
    }

    #[test]
    fn linear_vesting_thirds() {
        let start = T0 + YEAR;
        let end = T0 + 2 * YEAR;
        let s = ReleaseSchedule::for_grant(3_000_000, start, start, end).unwrap();
        assert!(matches!(s, ReleaseSchedule::Linear(_)));

        assert_eq!(s.unlocked(start - 1).unwrap(), 0);
        assert_eq!(s.unlocked(start).unwrap(), 0);
        assert_eq!(s.unlocked(start + YEAR / 3).unwrap(), 1_000_000);
        assert_eq!(s.unlocked(start + YEAR / 3 - 1).unwrap(), 999_999);
        assert_eq!(s.unlocked(start + YEAR / 2).unwrap(), 1_500_000);
        assert_eq!(s.unlocked(end - 1).unwrap(), 2_999_999);
        assert_eq!(s.unlocked(end).unwrap(), 3_000_000);
        assert_eq!(s.unlocked(end + YEAR).unwrap(), 3_000_000);
    }

    #[test]
    fn linear_vesting_is_monotone() {
        let start = T0;
        let end = T0 + 1_000;
        let s = LinearVesting::new(999_983, start, start, end).unwrap();

        let mut prev = 0;
        for now in (start - 10)..=(end + 10) {
            let v = s.unlocked(now).unwrap();
            assert!(v >= prev, "decreased at {}", now);
            prev = v;
        }
        assert_eq!(prev, 999_983);
        assert!(s.unlocked(start + 501).unwrap() > s.unlocked(start + 500).unwrap());
    }

    #[test]
    fn cliff_after_start_withholds_until_cliff() {
        let s = LinearVesting::new(1_000, T0, T0 + 250, T0 + 1_000).unwrap();
        assert_eq!(s.unlocked(T0 + 249).unwrap(), 0);
        assert_eq!(s.unlocked(T0 + 250).unwrap(), 250);
    }

    #[test]
    fn transferable_subtracts_released() {
        let s = ReleaseSchedule::for_grant(1_000, T0, T0, T0 + 100).unwrap();
        assert_eq!(s.transferable(0, T0 + 50).unwrap(), 500);
        assert_eq!(s.transferable(400, T0 + 50).unwrap(), 100);
        assert_eq!(s.transferable(500, T0 + 50).unwrap(), 0);
        assert_eq!(s.transferable(500, T0 + 100).unwrap(), 500);
    }

    #[test]
    fn unordered_window_rejected() {
        assert!(matches!(
            LinearVesting::new(1, T0, T0 - 1, T0 + 10),
            Err(PurchaseError::InvalidVestingDelays)
        ));
        assert!(matches!(
            ReleaseSchedule::for_grant(1, T0 + 10, T0 + 10, T0),
            Err(PurchaseError::InvalidVestingDelays)
        ));
    }
}
