use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::constants::{EXECUTOR_SEED, LDO_VAULT_SEED};
use crate::state::PurchaseExecutor;

/// Opens the offer once the vault holds the full allocation total. Anyone may call.
pub fn start_offer(ctx: Context<StartOffer>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let held = ctx.accounts.ldo_vault.amount;

    let executor = &mut ctx.accounts.executor;
    let window = executor.start(held, now)?;

    msg!("offer started at {}, expires at {}", window.started_at, window.expires_at);
    emit!(OfferStarted {
        started_at: window.started_at,
        expires_at: window.expires_at,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct StartOffer<'info> {
    #[account(mut, seeds = [EXECUTOR_SEED], bump = executor.bump)]
    pub executor: Account<'info, PurchaseExecutor>,

    #[account(
        seeds = [LDO_VAULT_SEED, executor.key().as_ref()],
        bump,
    )]
    pub ldo_vault: Account<'info, TokenAccount>,
}

#[event]
pub struct OfferStarted {
    pub started_at: i64,
    pub expires_at: i64,
}
