// Item Transfer
// Moves an item between holders and keeps the owner index in sync.

use log::debug;

use crate::crypto::Address;
use crate::sale::{SaleError, SaleResult};

use super::{load_contract, RuntimeContext, SaleStorage};

/// Transfer item `token_id` from `from` to `to`
///
/// Only the current holder may move an item; there are no approvals.
/// Paid mint records stay with the original minter.
pub fn transfer_from<S: SaleStorage + ?Sized>(
    storage: &mut S,
    ctx: &RuntimeContext,
    from: Address,
    to: Address,
    token_id: u64,
) -> SaleResult<()> {
    load_contract(storage)?;

    // Step 1: Item must exist
    let mut item = storage.get_item(token_id).ok_or(SaleError::TokenNotFound)?;

    // Step 2: Ownership
    if item.owner != from || ctx.caller != from {
        return Err(SaleError::NotTokenOwner);
    }

    // Step 3: Recipient
    if to.is_zero() {
        return Err(SaleError::ZeroAddress);
    }

    // Step 4: Apply
    if from != to {
        item.owner = to;
        storage.set_item(&item)?;
        storage.remove_owned_token(&from, token_id)?;
        storage.add_owned_token(&to, token_id)?;
    }

    debug!("Item {} transferred from {} to {}", token_id, from, to);
    Ok(())
}
