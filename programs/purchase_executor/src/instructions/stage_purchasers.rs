use anchor_lang::prelude::*;

use crate::constants::DRAFT_SEED;
use crate::error::PurchaseError;
use crate::state::{AllocationEntry, PurchasersDraft};

/// Appends a batch of `(buyer, amount)` slots to the deployer's draft. Slots are
/// only validated as a whole by `initialize_executor`.
pub fn stage_purchasers(ctx: Context<StagePurchasers>, batch: Vec<AllocationEntry>) -> Result<()> {
    let deployer = ctx.accounts.deployer.key();
    let draft = &mut ctx.accounts.draft;
    if draft.deployer == Pubkey::default() {
        draft.deployer = deployer;
    }
    require_keys_eq!(draft.deployer, deployer, PurchaseError::UnauthorizedDeployer);

    draft.append(&batch)?;

    emit!(PurchasersStaged {
        deployer,
        count_added: batch.len() as u8,
        staged_total: draft.count,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct StagePurchasers<'info> {
    #[account(
        init_if_needed,
        payer = deployer,
        space = PurchasersDraft::space(),
        seeds = [DRAFT_SEED, deployer.key().as_ref()],
        bump
    )]
    pub draft: Box<Account<'info, PurchasersDraft>>,

    #[account(mut)]
    pub deployer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct PurchasersStaged {
    pub deployer: Pubkey,
    pub count_added: u8,
    pub staged_total: u8,
}
