use anchor_lang::prelude::*;

/// Error codes for the purchase executor program.
#[error_code]
pub enum PurchaseError {
    #[msg("Exchange rate must be nonzero")]
    InvalidRate,

    #[msg("Vesting end delay must not precede vesting start delay")]
    InvalidVestingDelays,

    #[msg("Offer expiration delay must be positive")]
    InvalidExpirationDelay,

    #[msg("Invalid public key")]
    InvalidPubkey,

    #[msg("Too many purchasers")]
    TooManyPurchasers,

    #[msg("Empty purchaser batch")]
    EmptyBatch,

    #[msg("Invalid allocation entry")]
    InvalidAllocation,

    #[msg("Duplicate purchaser")]
    DuplicatePurchaser,

    #[msg("Allocation sum does not equal the declared total")]
    AllocationSumMismatch,

    #[msg("Unauthorized: deployer signature required")]
    UnauthorizedDeployer,

    #[msg("not funded")]
    NotFunded,

    #[msg("Offer already started")]
    AlreadyStarted,

    #[msg("offer expired")]
    OfferExpired,

    #[msg("no allocation")]
    NoAllocation,

    #[msg("invalid amount")]
    InvalidAmount,

    #[msg("offer not expired")]
    OfferNotExpired,

    #[msg("Insufficient token balance")]
    InsufficientBalance,

    #[msg("not allowed")]
    NotAllowed,

    #[msg("Transfer exceeds the vested balance")]
    TransferExceedsVested,

    #[msg("Transfer amount must be nonzero")]
    ZeroTransferAmount,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Token account is not owned by the treasury")]
    InvalidTreasuryAccount,

    #[msg("Math overflow")]
    MathOverflow,
}

/// Asserts that `result` failed with the given program error.
#[cfg(test)]
pub(crate) fn assert_fails<T: core::fmt::Debug>(result: Result<T>, expected: PurchaseError) {
    match result {
        Err(anchor_lang::error::Error::AnchorError(e)) => {
            assert_eq!(e.error_code_number, u32::from(expected), "{}", e.error_msg)
        }
        other => panic!("expected {}, got {:?}", expected, other),
    }
}
