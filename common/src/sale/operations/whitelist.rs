// Allow-List Registry
// Any caller may register once. Membership does not gate minting.

use log::debug;

use crate::sale::{SaleError, SaleResult};

use super::{load_contract, RuntimeContext, SaleStorage};

/// Register the caller on the allow-list
pub fn join_white_list<S: SaleStorage + ?Sized>(
    storage: &mut S,
    ctx: &RuntimeContext,
) -> SaleResult<()> {
    load_contract(storage)?;

    if storage.is_white_listed(&ctx.caller) {
        return Err(SaleError::AlreadyWhiteListed);
    }
    storage.push_white_list(&ctx.caller)?;

    debug!("{} joined the white list", ctx.caller);
    Ok(())
}
