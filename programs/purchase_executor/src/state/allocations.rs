use anchor_lang::prelude::*;
use bytemuck::{Pod, Zeroable};

use crate::constants::{MAX_PURCHASERS, MAX_STAGE_BATCH};
use crate::error::PurchaseError;

/// A single slot of the allocation table. An all-zero slot is padding.
#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable,
)]
#[repr(C)]
pub struct AllocationEntry {
    pub buyer: Pubkey,
    pub ldo_amount: u64,
}

impl AllocationEntry {
    pub const SIZE: usize = core::mem::size_of::<AllocationEntry>();

    pub fn new(buyer: Pubkey, ldo_amount: u64) -> Self {
        Self { buyer, ldo_amount }
    }

    /// Padding slots carry neither a buyer nor an amount.
    pub fn is_padding(&self) -> bool {
        self.buyer == Pubkey::default() && self.ldo_amount == 0
    }
}

/// PDA holding the fixed allocation table (<= 50 purchasers).
#[account]
pub struct Allocations {
    /// Purchasers in input order, followed by padding.
    pub entries: [AllocationEntry; MAX_PURCHASERS],
}

impl Allocations {
    /// Space for discriminator + fixed entries array (no vec header).
    pub const fn space() -> usize {
        8 + AllocationEntry::SIZE * MAX_PURCHASERS
    }

    #[cfg(test)]
    pub fn empty() -> Self {
        Self {
            entries: [AllocationEntry::zeroed(); MAX_PURCHASERS],
        }
    }

    /// Validates the padded purchaser list and writes it into the table.
    /// Nothing is written unless every check passes. Returns the purchaser count.
    pub fn populate(&mut self, slots: &[AllocationEntry], declared_total: u64) -> Result<u8> {
        let count = validate_slots(slots, declared_total)?;

        self.entries.fill(AllocationEntry::zeroed());
        for (dst, src) in self
            .entries
            .iter_mut()
            .zip(slots.iter().filter(|s| !s.is_padding()))
        {
            *dst = *src;
        }

        Ok(count)
    }

    fn position(&self, buyer: &Pubkey) -> Option<usize> {
        if *buyer == Pubkey::default() {
            return None;
        }
        self.entries.iter().position(|e| e.buyer == *buyer)
    }

    /// Remaining LDO entitlement of `buyer`; zero for unknown or settled buyers.
    pub fn allocation_of(&self, buyer: &Pubkey) -> u64 {
        self.position(buyer)
            .map(|i| self.entries[i].ldo_amount)
            .unwrap_or(0)
    }

    /// Zeroes the buyer's entry and returns the amount it held.
    pub fn settle(&mut self, buyer: &Pubkey) -> Result<u64> {
        let idx = self.position(buyer).ok_or(PurchaseError::NoAllocation)?;
        let entry = &mut self.entries[idx];
        require!(entry.ldo_amount > 0, PurchaseError::NoAllocation);

        let amount = entry.ldo_amount;
        entry.ldo_amount = 0;
        Ok(amount)
    }

    /// Sum of allocations not yet purchased.
    pub fn unsold_total(&self) -> Result<u64> {
        let mut sum: u64 = 0;
        for e in self.entries.iter() {
            sum = sum
                .checked_add(e.ldo_amount)
                .ok_or(PurchaseError::MathOverflow)?;
        }
        Ok(sum)
    }
}

/// Checks a padded purchaser list against the construction rules and returns
/// the number of real purchasers.
pub fn validate_slots(slots: &[AllocationEntry], declared_total: u64) -> Result<u8> {
    require!(slots.len() <= MAX_PURCHASERS, PurchaseError::TooManyPurchasers);

    let mut count: u8 = 0;
    let mut sum: u128 = 0;

    for (i, slot) in slots.iter().enumerate() {
        if slot.is_padding() {
            continue;
        }
        require!(
            slot.buyer != Pubkey::default() && slot.ldo_amount > 0,
            PurchaseError::InvalidAllocation
        );
        require!(
            !slots[..i].iter().any(|prev| prev.buyer == slot.buyer),
            PurchaseError::DuplicatePurchaser
        );

        sum = sum
            .checked_add(slot.ldo_amount as u128)
            .ok_or(PurchaseError::MathOverflow)?;
        count = count.checked_add(1).ok_or(PurchaseError::MathOverflow)?;
    }

    require!(
        sum == declared_total as u128,
        PurchaseError::AllocationSumMismatch
    );
    Ok(count)
}

/// Deployer-owned upload buffer for the purchaser list. Consumed (and closed)
/// by `initialize_executor`.
#[account]
pub struct PurchasersDraft {
    pub deployer: Pubkey,
    pub count: u8,
    pub slots: [AllocationEntry; MAX_PURCHASERS],
}

impl PurchasersDraft {
    pub const fn space() -> usize {
        8 + 32 + 1 + AllocationEntry::SIZE * MAX_PURCHASERS
    }

    pub fn append(&mut self, batch: &[AllocationEntry]) -> Result<()> {
        require!(!batch.is_empty(), PurchaseError::EmptyBatch);
        require!(batch.len() <= MAX_STAGE_BATCH, PurchaseError::TooManyPurchasers);

        let start = self.count as usize;
        let end = start
            .checked_add(batch.len())
            .ok_or(PurchaseError::MathOverflow)?;
        require!(end <= MAX_PURCHASERS, PurchaseError::TooManyPurchasers);

        self.slots[start..end].copy_from_slice(batch);
        self.count = end as u8;
        Ok(())
    }

    /// Drops every staged slot; the deployer starts over.
    pub fn clear(&mut self) {
        self.slots.fill(AllocationEntry::zeroed());
        self.count = 0;
    }

    pub fn staged(&self) -> &[AllocationEntry] {
        &self.slots[..self.count as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::assert_fails;

    const LDO: u64 = 1_000_000_000;

    fn purchasers(amounts: &[u64]) -> Vec<AllocationEntry> {
        amounts
            .iter()
            .map(|a| AllocationEntry::new(Pubkey::new_unique(), *a))
            .collect()
    }

    fn table(slots: &[AllocationEntry], total: u64) -> Allocations {
        let mut t = Allocations::empty();
        t.populate(slots, total).unwrap();
        t
    }

    #[test]
    fn entry_layout_has_no_padding() {
        assert_eq!(AllocationEntry::SIZE, 40);
        assert_eq!(Allocations::space(), 8 + 40 * MAX_PURCHASERS);
    }

    #[test]
    fn populate_skips_padding_and_counts_purchasers() {
        let mut slots = purchasers(&[1_000 * LDO, 3_000 * LDO]);
        slots.extend(std::iter::repeat(AllocationEntry::zeroed()).take(10));
        slots.push(AllocationEntry::new(Pubkey::new_unique(), 6_000 * LDO));

        let mut t = Allocations::empty();
        let count = t.populate(&slots, 10_000 * LDO).unwrap();

        assert_eq!(count, 3);
        assert_eq!(t.entries[2], slots[12]);
        assert!(t.entries[3].is_padding());
        assert_eq!(t.unsold_total().unwrap(), 10_000 * LDO);
    }

    #[test]
    fn sum_must_match_declared_total() {
        let slots = purchasers(&[1, 2, 3]);
        let mut t = Allocations::empty();

        assert_fails(t.populate(&slots, 7), PurchaseError::AllocationSumMismatch);
        assert_fails(t.populate(&slots, 5), PurchaseError::AllocationSumMismatch);
        // Rejected input leaves the table untouched.
        assert!(t.entries.iter().all(|e| e.is_padding()));
    }

    #[test]
    fn duplicate_purchasers_rejected() {
        let buyer = Pubkey::new_unique();
        let slots = vec![
            AllocationEntry::new(buyer, 10),
            AllocationEntry::new(Pubkey::new_unique(), 10),
            AllocationEntry::new(buyer, 10),
        ];
        assert_fails(validate_slots(&slots, 30), PurchaseError::DuplicatePurchaser);
    }

    #[test]
    fn half_padding_slots_rejected() {
        let no_buyer = vec![AllocationEntry::new(Pubkey::default(), 10)];
        assert_fails(validate_slots(&no_buyer, 10), PurchaseError::InvalidAllocation);

        let no_amount = vec![AllocationEntry::new(Pubkey::new_unique(), 0)];
        assert_fails(validate_slots(&no_amount, 0), PurchaseError::InvalidAllocation);
    }

    #[test]
    fn more_than_fifty_slots_rejected() {
        let slots = purchasers(&[1; MAX_PURCHASERS + 1]);
        assert_fails(
            validate_slots(&slots, (MAX_PURCHASERS + 1) as u64),
            PurchaseError::TooManyPurchasers,
        );

        let full = purchasers(&[1; MAX_PURCHASERS]);
        assert_eq!(
            validate_slots(&full, MAX_PURCHASERS as u64).unwrap(),
            MAX_PURCHASERS as u8
        );
    }

    #[test]
    fn settle_zeroes_entry_once() {
        let slots = purchasers(&[500, 700]);
        let mut t = table(&slots, 1_200);
        let buyer = slots[0].buyer;

        assert_eq!(t.allocation_of(&buyer), 500);
        assert_eq!(t.settle(&buyer).unwrap(), 500);
        assert_eq!(t.allocation_of(&buyer), 0);
        assert_fails(t.settle(&buyer), PurchaseError::NoAllocation);
        assert_eq!(t.unsold_total().unwrap(), 700);
    }

    #[test]
    fn unknown_and_default_buyers_have_no_allocation() {
        let slots = purchasers(&[500]);
        let mut t = table(&slots, 500);

        assert_eq!(t.allocation_of(&Pubkey::new_unique()), 0);
        assert_eq!(t.allocation_of(&Pubkey::default()), 0);
        assert_fails(t.settle(&Pubkey::default()), PurchaseError::NoAllocation);
    }

    fn empty_draft() -> PurchasersDraft {
        PurchasersDraft {
            deployer: Pubkey::new_unique(),
            count: 0,
            slots: [AllocationEntry::zeroed(); MAX_PURCHASERS],
        }
    }

    #[test]
    fn draft_appends_batches_up_to_capacity() {
        let mut draft = empty_draft();

        let first = purchasers(&[1; MAX_STAGE_BATCH]);
        let second = purchasers(&[2; MAX_STAGE_BATCH]);
        let third = purchasers(&[3; MAX_PURCHASERS - 2 * MAX_STAGE_BATCH]);
        draft.append(&first).unwrap();
        draft.append(&second).unwrap();
        draft.append(&third).unwrap();
        assert_eq!(draft.staged().len(), MAX_PURCHASERS);
        assert_eq!(draft.staged()[MAX_STAGE_BATCH], second[0]);

        assert_fails(draft.append(&purchasers(&[4])), PurchaseError::TooManyPurchasers);
        assert_fails(draft.append(&[]), PurchaseError::EmptyBatch);
    }

    #[test]
    fn oversized_batch_rejected() {
        let mut draft = empty_draft();
        assert_fails(
            draft.append(&purchasers(&[1; MAX_STAGE_BATCH + 1])),
            PurchaseError::TooManyPurchasers,
        );
        assert_eq!(draft.count, 0);
    }

    #[test]
    fn cleared_draft_accepts_a_corrected_list() {
        let mut draft = empty_draft();
        let dup = Pubkey::new_unique();
        draft
            .append(&[AllocationEntry::new(dup, 10), AllocationEntry::new(dup, 10)])
            .unwrap();
        draft
            .append(&[AllocationEntry::new(Pubkey::new_unique(), 5)])
            .unwrap();
        assert_fails(
            validate_slots(draft.staged(), 25),
            PurchaseError::DuplicatePurchaser,
        );

        draft.clear();
        assert!(draft.staged().is_empty());
        assert!(draft.slots.iter().all(|s| s.is_padding()));

        let corrected = vec![
            AllocationEntry::new(dup, 10),
            AllocationEntry::new(Pubkey::new_unique(), 15),
        ];
        draft.append(&corrected).unwrap();
        assert_eq!(validate_slots(draft.staged(), 25).unwrap(), 2);
    }
}
