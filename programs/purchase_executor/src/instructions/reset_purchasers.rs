use anchor_lang::prelude::*;

use crate::constants::DRAFT_SEED;
use crate::error::PurchaseError;
use crate::state::PurchasersDraft;

/// Empties the deployer's draft so a mistaken upload can be staged again.
pub fn reset_purchasers(ctx: Context<ResetPurchasers>) -> Result<()> {
    let draft = &mut ctx.accounts.draft;
    let dropped = draft.count;
    draft.clear();

    msg!("dropped {} staged purchasers", dropped);
    emit!(PurchasersReset {
        deployer: draft.deployer,
        dropped,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct ResetPurchasers<'info> {
    #[account(
        mut,
        seeds = [DRAFT_SEED, deployer.key().as_ref()],
        bump,
        has_one = deployer @ PurchaseError::UnauthorizedDeployer,
    )]
    pub draft: Box<Account<'info, PurchasersDraft>>,

    pub deployer: Signer<'info>,
}

#[event]
pub struct PurchasersReset {
    pub deployer: Pubkey,
    pub dropped: u8,
}
