use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{EXECUTOR_SEED, LDO_VAULT_SEED};
use crate::error::PurchaseError;
use crate::state::PurchaseExecutor;

/// Returns whatever LDO is left in the vault to the treasury after expiry.
pub fn recover_unsold_tokens(ctx: Context<RecoverUnsoldTokens>) -> Result<()> {
    let ex = &ctx.accounts.executor;
    let now = Clock::get()?.unix_timestamp;
    let amount = ex.unsold_sweep(ctx.accounts.ldo_vault.amount, now)?;
    if amount == 0 {
        emit!(UnsoldTokensRecovered {
            treasury: ex.treasury,
            amount: 0,
        });
        return Ok(());
    }

    let signer_seeds: &[&[&[u8]]] = &[&[EXECUTOR_SEED, &[ex.bump]]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.ldo_vault.to_account_info(),
                to: ctx.accounts.treasury_ldo.to_account_info(),
                authority: ctx.accounts.executor.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    msg!("recovered {} unsold LDO", amount);
    emit!(UnsoldTokensRecovered {
        treasury: ex.treasury,
        amount,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct RecoverUnsoldTokens<'info> {
    #[account(seeds = [EXECUTOR_SEED], bump = executor.bump)]
    pub executor: Account<'info, PurchaseExecutor>,

    #[account(
        mut,
        seeds = [LDO_VAULT_SEED, executor.key().as_ref()],
        bump,
    )]
    pub ldo_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = treasury_ldo.mint == executor.ldo_mint @ PurchaseError::InvalidTokenMint,
        constraint = treasury_ldo.owner == executor.treasury @ PurchaseError::InvalidTreasuryAccount,
    )]
    pub treasury_ldo: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct UnsoldTokensRecovered {
    pub treasury: Pubkey,
    pub amount: u64,
}
