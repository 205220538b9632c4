use anchor_lang::prelude::*;

use crate::error::PurchaseError;
use crate::utils::vesting::{ReleaseSchedule, TransferGate};

/// Vesting grant PDA; one per buyer. Holds the delivered LDO's release terms,
/// the tokens themselves sit in the grant vault.
#[account]
pub struct VestingGrant {
    pub executor: Pubkey,
    pub beneficiary: Pubkey,
    pub vesting_id: u64,
    /// Delivered LDO.
    pub amount: u64,
    /// Already transferred out to the beneficiary.
    pub released: u64,
    pub start: i64,
    pub cliff: i64,
    pub end: i64,
    /// Always false for purchased grants.
    pub revocable: bool,
    pub bump: u8,
}

impl VestingGrant {
    pub const SIZE: usize =
        32 + // executor
        32 + // beneficiary
        8 +  // vesting_id
        8 +  // amount
        8 +  // released
        8 +  // start
        8 +  // cliff
        8 +  // end
        1 +  // revocable
        1;   // bump

    pub fn schedule(&self) -> Result<ReleaseSchedule> {
        Ok(ReleaseSchedule::for_grant(
            self.amount,
            self.start,
            self.cliff,
            self.end,
        )?)
    }

    pub fn unlocked(&self, now: i64) -> Result<u64> {
        Ok(self.schedule()?.unlocked(now)?)
    }

    pub fn transferable(&self, now: i64) -> Result<u64> {
        Ok(self.schedule()?.transferable(self.released, now)?)
    }

    /// Books a withdrawal of `amount`; fails if more than the unlocked remainder.
    pub fn release(&mut self, amount: u64, now: i64) -> Result<()> {
        require!(amount > 0, PurchaseError::ZeroTransferAmount);
        require!(
            amount <= self.transferable(now)?,
            PurchaseError::TransferExceedsVested
        );
        self.released = self
            .released
            .checked_add(amount)
            .ok_or(PurchaseError::MathOverflow)?;
        Ok(())
    }
}
