use anchor_lang::prelude::*;

use crate::constants::EXECUTOR_SEED;
use crate::state::PurchaseExecutor;

pub fn offer_status(ctx: Context<GetOfferStatus>) -> Result<OfferStatusView> {
    let ex = &ctx.accounts.executor;
    let now = Clock::get()?.unix_timestamp;

    Ok(OfferStatusView {
        started: ex.offer_started(),
        started_at: ex.offer_started_at(),
        expires_at: ex.offer_expires_at(),
        expired: ex.offer_expired(now),
    })
}

#[derive(Accounts)]
pub struct GetOfferStatus<'info> {
    #[account(seeds = [EXECUTOR_SEED], bump = executor.bump)]
    pub executor: Account<'info, PurchaseExecutor>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct OfferStatusView {
    pub started: bool,
    pub started_at: Option<i64>,
    pub expires_at: Option<i64>,
    /// Evaluated against the clock of the calling transaction.
    pub expired: bool,
}
