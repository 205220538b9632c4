use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::EXECUTOR_SEED;
use crate::error::PurchaseError;
use crate::state::PurchaseExecutor;

/// Sends `amount` of any token held by the executor to the treasury's account
/// of the same mint. Only after the offer has expired.
pub fn recover_erc20(ctx: Context<RecoverErc20>, amount: u64) -> Result<()> {
    let ex = &ctx.accounts.executor;
    let now = Clock::get()?.unix_timestamp;
    let amount = ex.recovery_amount(amount, ctx.accounts.source.amount, now)?;

    if amount > 0 {
        let signer_seeds: &[&[&[u8]]] = &[&[EXECUTOR_SEED, &[ex.bump]]];
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.source.to_account_info(),
                    to: ctx.accounts.treasury_destination.to_account_info(),
                    authority: ctx.accounts.executor.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
        )?;
    }

    emit!(TokensRecovered {
        mint: ctx.accounts.mint.key(),
        source: ctx.accounts.source.key(),
        treasury: ex.treasury,
        amount,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct RecoverErc20<'info> {
    #[account(seeds = [EXECUTOR_SEED], bump = executor.bump)]
    pub executor: Account<'info, PurchaseExecutor>,

    #[account(
        mut,
        constraint = source.owner == executor.key() @ PurchaseError::InvalidTokenAccount,
        constraint = source.mint == mint.key() @ PurchaseError::InvalidTokenMint,
    )]
    pub source: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = treasury_destination.mint == mint.key() @ PurchaseError::InvalidTokenMint,
        constraint = treasury_destination.owner == executor.treasury @ PurchaseError::InvalidTreasuryAccount,
    )]
    pub treasury_destination: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct TokensRecovered {
    pub mint: Pubkey,
    pub source: Pubkey,
    pub treasury: Pubkey,
    pub amount: u64,
}
