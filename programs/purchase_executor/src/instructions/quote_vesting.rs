use anchor_lang::prelude::*;

use crate::constants::GRANT_SEED;
use crate::state::VestingGrant;

/// Read-only: where `beneficiary`'s grant stands right now.
pub fn quote_vesting(ctx: Context<QuoteVesting>, beneficiary: Pubkey) -> Result<VestingQuote> {
    let grant = &ctx.accounts.grant;
    let now = Clock::get()?.unix_timestamp;

    let quote = VestingQuote {
        vesting_id: grant.vesting_id,
        amount: grant.amount,
        unlocked: grant.unlocked(now)?,
        released: grant.released,
        transferable: grant.transferable(now)?,
        start: grant.start,
        end: grant.end,
    };

    emit!(VestingQuoted {
        beneficiary,
        vesting_id: quote.vesting_id,
        unlocked: quote.unlocked,
        released: quote.released,
        transferable: quote.transferable,
    });

    Ok(quote)
}

#[derive(Accounts)]
#[instruction(beneficiary: Pubkey)]
pub struct QuoteVesting<'info> {
    #[account(
        seeds = [GRANT_SEED, grant.executor.as_ref(), beneficiary.as_ref()],
        bump = grant.bump,
    )]
    pub grant: Account<'info, VestingGrant>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct VestingQuote {
    pub vesting_id: u64,
    pub amount: u64,
    pub unlocked: u64,
    pub released: u64,
    pub transferable: u64,
    pub start: i64,
    pub end: i64,
}

#[event]
pub struct VestingQuoted {
    pub beneficiary: Pubkey,
    pub vesting_id: u64,
    pub unlocked: u64,
    pub released: u64,
    pub transferable: u64,
}
