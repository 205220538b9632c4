#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

pub use instructions::*;
pub use state::{AllocationEntry, ExecutorConfig};

use error::PurchaseError;

declare_id!("623V1L7F7QW2vA9trcbFXCxEiD26gtj4i5F4E239eTVV");

/// Fixed-price LDO sale to a pre-enumerated set of purchasers, paid in DAI,
/// with the purchased LDO delivered under a vesting schedule.
#[program]
pub mod purchase_executor {
    use super::*;

    pub fn stage_purchasers(ctx: Context<StagePurchasers>, batch: Vec<AllocationEntry>) -> Result<()> {
        instructions::stage_purchasers::stage_purchasers(ctx, batch)
    }

    pub fn reset_purchasers(ctx: Context<ResetPurchasers>) -> Result<()> {
        instructions::reset_purchasers::reset_purchasers(ctx)
    }

    pub fn initialize_executor(ctx: Context<InitializeExecutor>, config: ExecutorConfig) -> Result<()> {
        instructions::initialize_executor::initialize_executor(ctx, config)
    }

    pub fn start_offer(ctx: Context<StartOffer>) -> Result<()> {
        instructions::start_offer::start_offer(ctx)
    }

    pub fn execute_purchase(ctx: Context<ExecutePurchase>, buyer: Pubkey) -> Result<()> {
        instructions::execute_purchase::execute_purchase(ctx, buyer)
    }

    pub fn recover_unsold_tokens(ctx: Context<RecoverUnsoldTokens>) -> Result<()> {
        instructions::recover_unsold_tokens::recover_unsold_tokens(ctx)
    }

    pub fn recover_erc20(ctx: Context<RecoverErc20>, amount: u64) -> Result<()> {
        instructions::recover_erc20::recover_erc20(ctx, amount)
    }

    pub fn transfer_vested(ctx: Context<TransferVested>, amount: u64) -> Result<()> {
        instructions::transfer_vested::transfer_vested(ctx, amount)
    }

    pub fn quote_allocation(ctx: Context<QuoteAllocation>, buyer: Pubkey) -> Result<AllocationQuote> {
        instructions::quote_allocation::quote_allocation(ctx, buyer)
    }

    pub fn offer_status(ctx: Context<GetOfferStatus>) -> Result<OfferStatusView> {
        instructions::offer_status::offer_status(ctx)
    }

    pub fn quote_vesting(ctx: Context<QuoteVesting>, beneficiary: Pubkey) -> Result<VestingQuote> {
        instructions::quote_vesting::quote_vesting(ctx, beneficiary)
    }

    /// Unknown instructions are refused. Token transfers into accounts the
    /// executor owns cannot be stopped here; `recover_erc20` sweeps them.
    pub fn fallback<'info>(
        _program_id: &Pubkey,
        _accounts: &'info [AccountInfo<'info>],
        _data: &[u8],
    ) -> Result<()> {
        err!(PurchaseError::NotAllowed)
    }
}
