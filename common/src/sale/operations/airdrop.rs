// Airdrop Allocator
// Owner batch issuance drawn from the reserved airdrop budget.

use log::debug;
use primitive_types::U256;

use crate::crypto::Address;
use crate::sale::{ItemOrigin, SaleError, SaleResult};

use super::mint::issue_items;
use super::{check_owner, checked_sum, load_contract, RuntimeContext, SaleStorage};

/// Issue `counts[i]` items to `recipients[i]` for every i
///
/// Pause flags, stage caps, payment and the per-call limit do not apply.
/// Entries with a zero count are skipped. Duplicate recipients accumulate.
///
/// # Returns
/// - `Ok(Vec<u64>)`: All new token IDs in issuance order
/// - `Err(SaleError)`: Error code (entire batch fails)
pub fn air_drop_to<S: SaleStorage + ?Sized>(
    storage: &mut S,
    ctx: &RuntimeContext,
    recipients: &[Address],
    counts: &[u64],
) -> SaleResult<Vec<u64>> {
    let mut contract = load_contract(storage)?;
    check_owner(&contract, &ctx.caller)?;

    // Step 1: Input validation
    if recipients.is_empty() || counts.is_empty() {
        return Err(SaleError::NoBeneficiaries);
    }
    if recipients.len() != counts.len() {
        return Err(SaleError::ArraySizeMismatch);
    }
    if recipients
        .iter()
        .zip(counts)
        .any(|(recipient, count)| *count > 0 && recipient.is_zero())
    {
        return Err(SaleError::ZeroAddress);
    }

    // Step 2: Budget and supply for the entire batch
    let total = checked_sum(counts)?;
    contract.can_airdrop(total)?;
    contract.can_issue(total)?;

    // Step 3: Apply
    let mut token_ids = Vec::with_capacity(total as usize);
    for (recipient, count) in recipients.iter().zip(counts) {
        if *count == 0 {
            continue;
        }

        let ids = issue_items(
            storage,
            &mut contract,
            recipient,
            *count,
            ItemOrigin::Airdrop,
            U256::zero(),
            ctx.block_height,
        )?;
        token_ids.extend(ids);

        let dropped = storage
            .get_airdrop_count(recipient)
            .checked_add(*count)
            .ok_or(SaleError::Overflow)?;
        storage.set_airdrop_count(recipient, dropped)?;
    }
    contract.airdropped += total;
    storage.set_contract(&contract)?;

    debug!(
        "Airdropped {} item(s) to {} recipient(s)",
        total,
        recipients.len()
    );
    Ok(token_ids)
}
