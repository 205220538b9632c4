use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{ALLOCATIONS_SEED, DRAFT_SEED, EXECUTOR_SEED, LDO_VAULT_SEED};
use crate::error::PurchaseError;
use crate::state::{Allocations, ExecutorConfig, PurchaseExecutor, PurchasersDraft};
use crate::utils::digest::allocations_digest;
use crate::utils::time;

/// Builds the executor from the staged purchaser list in one step. Any
/// validation failure aborts the whole instruction, so no executor exists.
pub fn initialize_executor(ctx: Context<InitializeExecutor>, config: ExecutorConfig) -> Result<()> {
    config.validate()?;
    require_keys_neq!(
        ctx.accounts.ldo_mint.key(),
        ctx.accounts.dai_mint.key(),
        PurchaseError::InvalidTokenMint
    );

    let allocations = &mut ctx.accounts.allocations;
    let purchaser_count =
        allocations.populate(ctx.accounts.draft.staged(), config.ldo_allocations_total)?;
    let digest = allocations_digest(&allocations.entries[..purchaser_count as usize]);

    let executor = &mut ctx.accounts.executor;
    executor.set_inner(PurchaseExecutor::new(
        &config,
        ctx.accounts.ldo_mint.key(),
        ctx.accounts.dai_mint.key(),
        ctx.accounts.ldo_vault.key(),
        purchaser_count,
        digest,
        ctx.bumps.executor,
    ));

    msg!(
        "executor ready: {} purchasers, offer open {} days once started",
        purchaser_count,
        time::whole_days(config.offer_expiration_delay)
    );

    emit!(ExecutorInitialized {
        ldo_mint: executor.ldo_mint,
        dai_mint: executor.dai_mint,
        treasury: executor.treasury,
        dai_to_ldo_rate: executor.dai_to_ldo_rate,
        ldo_allocations_total: executor.ldo_allocations_total,
        purchaser_count,
        vesting_start_delay: executor.vesting_start_delay,
        vesting_end_delay: executor.vesting_end_delay,
        offer_expiration_delay: executor.offer_expiration_delay,
        allocations_digest: digest,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeExecutor<'info> {
    #[account(
        init,
        payer = deployer,
        space = 8 + PurchaseExecutor::SIZE,
        seeds = [EXECUTOR_SEED],
        bump
    )]
    pub executor: Account<'info, PurchaseExecutor>,

    #[account(
        init,
        payer = deployer,
        space = Allocations::space(),
        seeds = [ALLOCATIONS_SEED, executor.key().as_ref()],
        bump
    )]
    pub allocations: Box<Account<'info, Allocations>>,

    #[account(
        init,
        payer = deployer,
        token::mint = ldo_mint,
        token::authority = executor,
        seeds = [LDO_VAULT_SEED, executor.key().as_ref()],
        bump
    )]
    pub ldo_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [DRAFT_SEED, deployer.key().as_ref()],
        bump,
        has_one = deployer @ PurchaseError::UnauthorizedDeployer,
        close = deployer
    )]
    pub draft: Box<Account<'info, PurchasersDraft>>,

    pub ldo_mint: Account<'info, Mint>,

    pub dai_mint: Account<'info, Mint>,

    #[account(mut)]
    pub deployer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct ExecutorInitialized {
    pub ldo_mint: Pubkey,
    pub dai_mint: Pubkey,
    pub treasury: Pubkey,
    pub dai_to_ldo_rate: u128,
    pub ldo_allocations_total: u64,
    pub purchaser_count: u8,
    pub vesting_start_delay: i64,
    pub vesting_end_delay: i64,
    pub offer_expiration_delay: i64,
    pub allocations_digest: [u8; 32],
}
