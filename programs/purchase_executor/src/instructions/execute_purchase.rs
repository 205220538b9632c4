use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{ALLOCATIONS_SEED, EXECUTOR_SEED, GRANT_SEED, GRANT_VAULT_SEED, LDO_VAULT_SEED};
use crate::error::PurchaseError;
use crate::instructions::start_offer::OfferStarted;
use crate::state::{Allocations, PurchaseExecutor, VestingGrant};

/// Sells `buyer` their whole allocation. The caller pays the DAI from an
/// account that has approved the executor for exactly the required amount.
/// Delivered LDO lands in the buyer's grant vault under the vesting schedule.
pub fn execute_purchase(ctx: Context<ExecutePurchase>, buyer: Pubkey) -> Result<()> {
    let executor_ai = ctx.accounts.executor.to_account_info();
    let executor_key = ctx.accounts.executor.key();
    let bump = ctx.accounts.executor.bump;

    let now = Clock::get()?.unix_timestamp;
    let held = ctx.accounts.ldo_vault.amount;
    let allowance = effective_allowance(
        ctx.accounts.payer_dai.delegate.into(),
        ctx.accounts.payer_dai.delegated_amount,
        &executor_key,
    );

    let executor = &mut ctx.accounts.executor;
    let settlement =
        executor.settle_purchase(&mut ctx.accounts.allocations, &buyer, allowance, held, now)?;

    if let Some(window) = settlement.offer_started {
        msg!("offer started by first purchase, expires at {}", window.expires_at);
        emit!(OfferStarted {
            started_at: window.started_at,
            expires_at: window.expires_at,
        });
    }

    let signer_seeds: &[&[&[u8]]] = &[&[EXECUTOR_SEED, &[bump]]];

    if settlement.dai_cost > 0 {
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.payer_dai.to_account_info(),
                    to: ctx.accounts.treasury_dai.to_account_info(),
                    authority: executor_ai.clone(),
                },
                signer_seeds,
            ),
            settlement.dai_cost,
        )?;
    }

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.ldo_vault.to_account_info(),
                to: ctx.accounts.grant_vault.to_account_info(),
                authority: executor_ai,
            },
            signer_seeds,
        ),
        settlement.ldo_amount,
    )?;

    ctx.accounts.grant.set_inner(VestingGrant {
        executor: executor_key,
        beneficiary: buyer,
        vesting_id: settlement.vesting_id,
        amount: settlement.ldo_amount,
        released: 0,
        start: settlement.vesting_start,
        cliff: settlement.vesting_cliff,
        end: settlement.vesting_end,
        revocable: false,
        bump: ctx.bumps.grant,
    });

    msg!(
        "purchase #{}: {} LDO for {} DAI",
        settlement.vesting_id,
        settlement.ldo_amount,
        settlement.dai_cost
    );
    emit!(PurchaseExecuted {
        ldo_receiver: buyer,
        ldo_allocation: settlement.ldo_amount,
        dai_cost: settlement.dai_cost,
        vesting_id: settlement.vesting_id,
    });

    Ok(())
}

/// DAI the payer has approved the executor to pull. An approval to any other
/// delegate counts as none.
pub(crate) fn effective_allowance(
    delegate: Option<Pubkey>,
    delegated_amount: u64,
    executor: &Pubkey,
) -> u64 {
    match delegate {
        Some(d) if d == *executor => delegated_amount,
        _ => 0,
    }
}

#[derive(Accounts)]
#[instruction(buyer: Pubkey)]
pub struct ExecutePurchase<'info> {
    #[account(mut, seeds = [EXECUTOR_SEED], bump = executor.bump)]
    pub executor: Account<'info, PurchaseExecutor>,

    #[account(
        mut,
        seeds = [ALLOCATIONS_SEED, executor.key().as_ref()],
        bump
    )]
    pub allocations: Box<Account<'info, Allocations>>,

    #[account(
        mut,
        seeds = [LDO_VAULT_SEED, executor.key().as_ref()],
        bump,
    )]
    pub ldo_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + VestingGrant::SIZE,
        seeds = [GRANT_SEED, executor.key().as_ref(), buyer.as_ref()],
        bump
    )]
    pub grant: Box<Account<'info, VestingGrant>>,

    #[account(
        init_if_needed,
        payer = payer,
        token::mint = ldo_mint,
        token::authority = grant,
        seeds = [GRANT_VAULT_SEED, grant.key().as_ref()],
        bump
    )]
    pub grant_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = payer_dai.mint == executor.dai_mint @ PurchaseError::InvalidTokenMint,
        constraint = payer_dai.owner == payer.key() @ PurchaseError::InvalidTokenAccount,
    )]
    pub payer_dai: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = treasury_dai.mint == executor.dai_mint @ PurchaseError::InvalidTokenMint,
        constraint = treasury_dai.owner == executor.treasury @ PurchaseError::InvalidTreasuryAccount,
    )]
    pub treasury_dai: Box<Account<'info, TokenAccount>>,

    #[account(address = executor.ldo_mint @ PurchaseError::InvalidTokenMint)]
    pub ldo_mint: Account<'info, Mint>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct PurchaseExecuted {
    pub ldo_receiver: Pubkey,
    pub ldo_allocation: u64,
    pub dai_cost: u64,
    pub vesting_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowance_counts_only_for_the_executor() {
        let executor = Pubkey::new_unique();
        assert_eq!(effective_allowance(Some(executor), 10, &executor), 10);
        assert_eq!(effective_allowance(Some(Pubkey::new_unique()), 10, &executor), 0);
        assert_eq!(effective_allowance(None, 10, &executor), 0);
        assert_eq!(effective_allowance(Some(executor), 0, &executor), 0);
    }
}
