//! Program-wide constants.

/// Max purchasers stored in the allocation table.
pub const MAX_PURCHASERS: usize = 50;

/// Max purchasers uploaded per `stage_purchasers` call (transaction size bound).
pub const MAX_STAGE_BATCH: usize = 20;

/// Fixed-point precision of the DAI→LDO exchange rate.
pub const RATE_PRECISION: u128 = 1_000_000_000_000_000_000;

/// Seconds per day (UTC).
pub const SECONDS_PER_DAY: i64 = 86_400;

pub const EXECUTOR_SEED: &[u8] = b"executor";
pub const ALLOCATIONS_SEED: &[u8] = b"allocations";
pub const LDO_VAULT_SEED: &[u8] = b"ldo_vault";
pub const DRAFT_SEED: &[u8] = b"purchasers_draft";
pub const GRANT_SEED: &[u8] = b"grant";
pub const GRANT_VAULT_SEED: &[u8] = b"grant_vault";
