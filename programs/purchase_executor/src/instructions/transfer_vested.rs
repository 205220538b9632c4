use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{GRANT_SEED, GRANT_VAULT_SEED};
use crate::error::PurchaseError;
use crate::state::VestingGrant;

/// Moves `amount` of unlocked LDO out of the beneficiary's grant vault.
pub fn transfer_vested(ctx: Context<TransferVested>, amount: u64) -> Result<()> {
    let grant_ai = ctx.accounts.grant.to_account_info();
    let now = Clock::get()?.unix_timestamp;

    let grant = &mut ctx.accounts.grant;
    grant.release(amount, now)?;

    let executor = grant.executor;
    let beneficiary = grant.beneficiary;
    let signer_seeds: &[&[&[u8]]] = &[&[
        GRANT_SEED,
        executor.as_ref(),
        beneficiary.as_ref(),
        &[grant.bump],
    ]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.grant_vault.to_account_info(),
                to: ctx.accounts.destination.to_account_info(),
                authority: grant_ai,
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(VestedTokensTransferred {
        beneficiary,
        vesting_id: grant.vesting_id,
        amount,
        released_total: grant.released,
        locked: grant.amount.saturating_sub(grant.unlocked(now)?),
    });
    Ok(())
}

#[derive(Accounts)]
pub struct TransferVested<'info> {
    #[account(
        mut,
        seeds = [GRANT_SEED, grant.executor.as_ref(), beneficiary.key().as_ref()],
        bump = grant.bump,
        has_one = beneficiary,
    )]
    pub grant: Account<'info, VestingGrant>,

    #[account(
        mut,
        seeds = [GRANT_VAULT_SEED, grant.key().as_ref()],
        bump,
    )]
    pub grant_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = destination.mint == grant_vault.mint @ PurchaseError::InvalidTokenMint,
    )]
    pub destination: Account<'info, TokenAccount>,

    pub beneficiary: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct VestedTokensTransferred {
    pub beneficiary: Pubkey,
    pub vesting_id: u64,
    pub amount: u64,
    pub released_total: u64,
    pub locked: u64,
}
