use anchor_lang::prelude::*;

use crate::constants::{ALLOCATIONS_SEED, EXECUTOR_SEED};
use crate::state::{Allocations, PurchaseExecutor};

/// Read-only: remaining allocation of `buyer` and the DAI it currently costs.
pub fn quote_allocation(ctx: Context<QuoteAllocation>, buyer: Pubkey) -> Result<AllocationQuote> {
    let ldo_amount = ctx.accounts.allocations.allocation_of(&buyer);
    let dai_cost = ctx.accounts.executor.required_payment(ldo_amount)?;

    emit!(AllocationQuoted {
        buyer,
        ldo_amount,
        dai_cost,
    });

    Ok(AllocationQuote {
        ldo_amount,
        dai_cost,
    })
}

#[derive(Accounts)]
pub struct QuoteAllocation<'info> {
    #[account(seeds = [EXECUTOR_SEED], bump = executor.bump)]
    pub executor: Account<'info, PurchaseExecutor>,

    #[account(
        seeds = [ALLOCATIONS_SEED, executor.key().as_ref()],
        bump
    )]
    pub allocations: Box<Account<'info, Allocations>>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AllocationQuote {
    pub ldo_amount: u64,
    pub dai_cost: u64,
}

#[event]
pub struct AllocationQuoted {
    pub buyer: Pubkey,
    pub ldo_amount: u64,
    pub dai_cost: u64,
}
