// Stage Gate Operations
// Owner-only controls over the pause flag and price of each stage.

use log::debug;
use primitive_types::U256;

use crate::sale::{SaleResult, Stage};

use super::{check_owner, load_contract, RuntimeContext, SaleStorage};

/// Set the paused flag of a stage
pub fn pause<S: SaleStorage + ?Sized>(
    storage: &mut S,
    ctx: &RuntimeContext,
    paused: bool,
    stage: Stage,
) -> SaleResult<()> {
    let mut contract = load_contract(storage)?;
    check_owner(&contract, &ctx.caller)?;

    contract.stage_mut(stage).paused = paused;
    storage.set_contract(&contract)?;

    debug!("Stage {} paused: {}", stage, paused);
    Ok(())
}

/// Overwrite the unit price of a stage
///
/// Past mints keep the price they paid.
pub fn set_cost<S: SaleStorage + ?Sized>(
    storage: &mut S,
    ctx: &RuntimeContext,
    cost: U256,
    stage: Stage,
) -> SaleResult<()> {
    let mut contract = load_contract(storage)?;
    check_owner(&contract, &ctx.caller)?;

    contract.stage_mut(stage).cost = cost;
    storage.set_contract(&contract)?;

    debug!("Stage {} cost set to {}", stage, cost);
    Ok(())
}
