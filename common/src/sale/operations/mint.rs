// Sale Mint Operations
// This module contains the paid stage mint and the shared issuance logic.

use log::debug;
use primitive_types::U256;

use crate::crypto::Address;
use crate::sale::{Item, ItemOrigin, MintContract, SaleError, SaleResult, Stage};

use super::{load_contract, RuntimeContext, SaleStorage};

// ========================================
// Issuance
// ========================================

/// Write `count` new items owned by `recipient`
///
/// Updates the global counters of `contract` in place; the caller is
/// responsible for persisting the contract record afterwards. All cap
/// checks must have passed before calling this.
pub(crate) fn issue_items<S: SaleStorage + ?Sized>(
    storage: &mut S,
    contract: &mut MintContract,
    recipient: &Address,
    count: u64,
    origin: ItemOrigin,
    unit_cost: U256,
    block_height: u64,
) -> SaleResult<Vec<u64>> {
    let token_ids = contract.allocate_token_ids(count)?;
    for token_id in &token_ids {
        let item = Item {
            id: *token_id,
            owner: *recipient,
            minter: *recipient,
            origin,
            cost: unit_cost,
            minted_at: block_height,
        };
        storage.set_item(&item)?;
        storage.add_owned_token(recipient, *token_id)?;
    }
    Ok(token_ids)
}

// ========================================
// Mint Operation
// ========================================

/// Mint `count` items to the caller during `stage`
///
/// Checks, in order: stage open, count non-zero, per-call limit, global cap,
/// stage cap, payment. The whole attached value is credited to net revenue
/// and to the caller's recorded cost; overpayment is kept.
///
/// # Returns
/// - `Ok(Vec<u64>)`: The new token IDs
/// - `Err(SaleError)`: Error code
pub fn mint_nft<S: SaleStorage + ?Sized>(
    storage: &mut S,
    ctx: &RuntimeContext,
    count: u64,
    stage: Stage,
) -> SaleResult<Vec<u64>> {
    let mut contract = load_contract(storage)?;

    // Step 1: Stage gate
    let stage_state = contract.stage(stage);
    if stage_state.paused {
        return Err(stage.paused_error());
    }

    // Step 2: Count validation
    if count == 0 {
        return Err(SaleError::ZeroMintCount);
    }
    if count > contract.max_mint_per_time {
        return Err(SaleError::MaxMintPerTimeExceeded);
    }

    // Step 3: Supply limits
    contract.can_issue(count)?;
    let stage_minted = stage_state
        .minted
        .checked_add(count)
        .ok_or(SaleError::Overflow)?;
    if stage_minted > stage_state.max {
        return Err(stage.max_reached_error());
    }

    // Step 4: Payment
    let unit_cost = stage_state.cost;
    if ctx.value < stage_state.required_payment(count)? {
        return Err(stage.insufficient_payment_error());
    }

    let mut record = storage.get_mint_record(&ctx.caller);
    record.count = record.count.checked_add(count).ok_or(SaleError::Overflow)?;
    record.total_cost = record
        .total_cost
        .checked_add(ctx.value)
        .ok_or(SaleError::Overflow)?;
    let net_revenue = contract
        .net_revenue
        .checked_add(ctx.value)
        .ok_or(SaleError::Overflow)?;
    let contract_balance = storage
        .get_contract_balance()
        .checked_add(ctx.value)
        .ok_or(SaleError::Overflow)?;

    // Step 5: Apply
    let token_ids = issue_items(
        storage,
        &mut contract,
        &ctx.caller,
        count,
        ItemOrigin::Sale(stage),
        unit_cost,
        ctx.block_height,
    )?;
    contract.stage_mut(stage).minted = stage_minted;
    contract.net_revenue = net_revenue;

    storage.set_contract(&contract)?;
    storage.set_mint_record(&ctx.caller, &record)?;
    storage.set_contract_balance(contract_balance)?;

    if log::log_enabled!(log::Level::Debug) {
        debug!(
            "{} minted {} item(s) in stage {} for {} units: {:?}",
            ctx.caller, count, stage, ctx.value, token_ids
        );
    }
    Ok(token_ids)
}
