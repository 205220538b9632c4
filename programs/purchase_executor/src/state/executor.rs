use anchor_lang::prelude::*;

use crate::error::PurchaseError;
use crate::state::Allocations;
use crate::utils::{rate, time};

/// Immutable deploy-time parameters of the executor.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// LDO per DAI, scaled by `RATE_PRECISION`.
    pub dai_to_ldo_rate: u128,
    pub vesting_start_delay: i64,
    pub vesting_end_delay: i64,
    pub offer_expiration_delay: i64,
    pub ldo_allocations_total: u64,
    /// Receives DAI proceeds and recovered tokens.
    pub treasury: Pubkey,
}

impl ExecutorConfig {
    pub fn validate(&self) -> Result<()> {
        require!(self.dai_to_ldo_rate > 0, PurchaseError::InvalidRate);
        require!(
            self.vesting_start_delay >= 0 && self.vesting_end_delay >= self.vesting_start_delay,
            PurchaseError::InvalidVestingDelays
        );
        require!(
            self.offer_expiration_delay > 0,
            PurchaseError::InvalidExpirationDelay
        );
        require!(
            self.treasury != Pubkey::default(),
            PurchaseError::InvalidPubkey
        );
        Ok(())
    }
}

/// Offer window, fixed when the offer starts.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct OfferWindow {
    pub started_at: i64,
    pub expires_at: i64,
}

/// Outcome of a validated purchase; the caller moves the tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PurchaseSettlement {
    /// Set when this purchase opened the offer.
    pub offer_started: Option<OfferWindow>,
    pub ldo_amount: u64,
    pub dai_cost: u64,
    pub vesting_id: u64,
    pub vesting_start: i64,
    pub vesting_cliff: i64,
    pub vesting_end: i64,
}

/// Executor state PDA.
#[account]
pub struct PurchaseExecutor {
    /// Sold asset.
    pub ldo_mint: Pubkey,
    /// Payment asset.
    pub dai_mint: Pubkey,
    /// LDO held for sale (authority = this PDA).
    pub ldo_vault: Pubkey,
    pub treasury: Pubkey,
    pub dai_to_ldo_rate: u128,
    pub vesting_start_delay: i64,
    pub vesting_end_delay: i64,
    pub offer_expiration_delay: i64,
    /// Declared total of all allocations; also the funding threshold.
    pub ldo_allocations_total: u64,
    pub purchaser_count: u8,
    /// `None` until the offer starts.
    pub offer: Option<OfferWindow>,
    /// Next vesting grant id.
    pub grants_issued: u64,
    pub allocations_digest: [u8; 32],
    pub bump: u8,
}

impl PurchaseExecutor {
    pub const SIZE: usize =
        32 + // ldo_mint
        32 + // dai_mint
        32 + // ldo_vault
        32 + // treasury
        16 + // dai_to_ldo_rate
        8 +  // vesting_start_delay
        8 +  // vesting_end_delay
        8 +  // offer_expiration_delay
        8 +  // ldo_allocations_total
        1 +  // purchaser_count
        1 + 16 + // offer
        8 +  // grants_issued
        32 + // allocations_digest
        1;   // bump

    pub fn new(
        config: &ExecutorConfig,
        ldo_mint: Pubkey,
        dai_mint: Pubkey,
        ldo_vault: Pubkey,
        purchaser_count: u8,
        allocations_digest: [u8; 32],
        bump: u8,
    ) -> Self {
        Self {
            ldo_mint,
            dai_mint,
            ldo_vault,
            treasury: config.treasury,
            dai_to_ldo_rate: config.dai_to_ldo_rate,
            vesting_start_delay: config.vesting_start_delay,
            vesting_end_delay: config.vesting_end_delay,
            offer_expiration_delay: config.offer_expiration_delay,
            ldo_allocations_total: config.ldo_allocations_total,
            purchaser_count,
            offer: None,
            grants_issued: 0,
            allocations_digest,
            bump,
        }
    }

    pub fn offer_started(&self) -> bool {
        self.offer.is_some()
    }

    pub fn offer_started_at(&self) -> Option<i64> {
        self.offer.map(|w| w.started_at)
    }

    pub fn offer_expires_at(&self) -> Option<i64> {
        self.offer.map(|w| w.expires_at)
    }

    /// Derived state: started and past the expiry instant. Never stored.
    pub fn offer_expired(&self, now: i64) -> bool {
        self.offer_expires_at()
            .map(|expires_at| time::reached(now, expires_at))
            .unwrap_or(false)
    }

    pub fn required_payment(&self, ldo_amount: u64) -> Result<u64> {
        Ok(rate::required_payment(ldo_amount, self.dai_to_ldo_rate)?)
    }

    /// Window the offer would get if it started at `now` with `held_ldo` in the vault.
    fn open_window(&self, held_ldo: u64, now: i64) -> Result<OfferWindow> {
        require!(
            held_ldo >= self.ldo_allocations_total,
            PurchaseError::NotFunded
        );
        Ok(OfferWindow {
            started_at: now,
            expires_at: time::offset(now, self.offer_expiration_delay)?,
        })
    }

    /// Explicit NotStarted -> Started transition.
    pub fn start(&mut self, held_ldo: u64, now: i64) -> Result<OfferWindow> {
        require!(self.offer.is_none(), PurchaseError::AlreadyStarted);
        let window = self.open_window(held_ldo, now)?;
        self.offer = Some(window);
        Ok(window)
    }

    pub fn require_expired(&self, now: i64) -> Result<()> {
        require!(self.offer_expired(now), PurchaseError::OfferNotExpired);
        Ok(())
    }

    /// Amount `recover_unsold_tokens` moves: the whole vault, possibly zero.
    pub fn unsold_sweep(&self, vault_balance: u64, now: i64) -> Result<u64> {
        self.require_expired(now)?;
        Ok(vault_balance)
    }

    /// Amount `recover_erc20` moves out of an account holding `balance`.
    pub fn recovery_amount(&self, requested: u64, balance: u64, now: i64) -> Result<u64> {
        self.require_expired(now)?;
        require!(requested <= balance, PurchaseError::InsufficientBalance);
        Ok(requested)
    }

    /// Vesting (start, cliff, end) for a purchase executed at `now`.
    pub fn grant_window(&self, now: i64) -> Result<(i64, i64, i64)> {
        let start = time::offset(now, self.vesting_start_delay)?;
        let end = time::offset(now, self.vesting_end_delay)?;
        Ok((start, start, end))
    }

    /// Runs the ordered purchase checks for `buyer` and, only if all pass,
    /// commits the ledger effects: implicit offer start, allocation zeroing
    /// and grant id assignment.
    pub fn settle_purchase(
        &mut self,
        allocations: &mut Allocations,
        buyer: &Pubkey,
        allowance: u64,
        held_ldo: u64,
        now: i64,
    ) -> Result<PurchaseSettlement> {
        let (window, opened_now) = match self.offer {
            Some(window) => (window, false),
            None => (self.open_window(held_ldo, now)?, true),
        };
        require!(
            !time::reached(now, window.expires_at),
            PurchaseError::OfferExpired
        );

        let ldo_amount = allocations.allocation_of(buyer);
        require!(ldo_amount > 0, PurchaseError::NoAllocation);

        let dai_cost = self.required_payment(ldo_amount)?;
        require!(allowance == dai_cost, PurchaseError::InvalidAmount);

        let (vesting_start, vesting_cliff, vesting_end) = self.grant_window(now)?;
        let vesting_id = self.grants_issued;
        let next_grant = vesting_id
            .checked_add(1)
            .ok_or(PurchaseError::MathOverflow)?;

        allocations.settle(buyer)?;
        self.grants_issued = next_grant;
        if opened_now {
            self.offer = Some(window);
        }

        Ok(PurchaseSettlement {
            offer_started: opened_now.then_some(window),
            ldo_amount,
            dai_cost,
            vesting_id,
            vesting_start,
            vesting_cliff,
            vesting_end,
        })
    }
}
