//! BLAKE3 fingerprint of the allocation table, so a deployed executor can be
//! checked against the intended purchaser list off-chain.

use crate::state::AllocationEntry;

const DOMAIN: &[u8] = b"purchase_executor/allocations/v1";

pub fn allocations_digest(entries: &[AllocationEntry]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(DOMAIN);
    hasher.update(bytemuck::cast_slice(entries));
    *hasher.finalize().as_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::prelude::Pubkey;

    #[test]
    fn digest_covers_buyers_amounts_and_order() {
        let a = AllocationEntry::new(Pubkey::new_unique(), 1_000);
        let b = AllocationEntry::new(Pubkey::new_unique(), 2_000);

        let base = allocations_digest(&[a, b]);
        assert_eq!(base, allocations_digest(&[a, b]));
        assert_ne!(base, allocations_digest(&[b, a]));
        assert_ne!(
            base,
            allocations_digest(&[a, AllocationEntry::new(b.buyer, 2_001)])
        );
    }

    #[test]
    fn digest_hashes_raw_entry_bytes() {
        let a = AllocationEntry::new(Pubkey::new_unique(), 7);
        let mut expected = blake3::Hasher::new();
        expected.update(DOMAIN);
        expected.update(a.buyer.as_ref());
        expected.update(&7u64.to_le_bytes());
        assert_eq!(allocations_digest(&[a]), *expected.finalize().as_bytes());
    }
}
