// Contract Administration
// Owner-only configuration changes and ownership management.

use log::{debug, info};

use crate::crypto::Address;
use crate::sale::{SaleError, SaleResult};

use super::{check_owner, load_contract, RuntimeContext, SaleStorage};

/// Replace the URI prefix used by every item
pub fn set_base_uri<S: SaleStorage + ?Sized>(
    storage: &mut S,
    ctx: &RuntimeContext,
    base_uri: String,
) -> SaleResult<()> {
    let mut contract = load_contract(storage)?;
    check_owner(&contract, &ctx.caller)?;

    debug!("Base URI changed from {} to {}", contract.base_uri, base_uri);
    contract.base_uri = base_uri;
    storage.set_contract(&contract)
}

/// Change the per-call limit of sale mints
///
/// Zero is accepted and closes both stages to public minting.
pub fn set_max_mint_per_time<S: SaleStorage + ?Sized>(
    storage: &mut S,
    ctx: &RuntimeContext,
    max_mint_per_time: u64,
) -> SaleResult<()> {
    let mut contract = load_contract(storage)?;
    check_owner(&contract, &ctx.caller)?;

    contract.max_mint_per_time = max_mint_per_time;
    storage.set_contract(&contract)?;

    debug!("Max mint per time set to {}", max_mint_per_time);
    Ok(())
}

/// Hand the administrator role to `new_owner`
pub fn transfer_ownership<S: SaleStorage + ?Sized>(
    storage: &mut S,
    ctx: &RuntimeContext,
    new_owner: Address,
) -> SaleResult<()> {
    let mut contract = load_contract(storage)?;
    check_owner(&contract, &ctx.caller)?;
    if new_owner.is_zero() {
        return Err(SaleError::ZeroAddress);
    }

    let previous = contract.owner;
    contract.owner = new_owner;
    storage.set_contract(&contract)?;

    info!("Ownership transferred from {} to {}", previous, new_owner);
    Ok(())
}

/// Give up the administrator role for good
///
/// Every owner-only operation fails afterwards.
pub fn renounce_ownership<S: SaleStorage + ?Sized>(
    storage: &mut S,
    ctx: &RuntimeContext,
) -> SaleResult<()> {
    let mut contract = load_contract(storage)?;
    check_owner(&contract, &ctx.caller)?;

    contract.owner = Address::zero();
    storage.set_contract(&contract)?;

    info!("Ownership renounced by {}", ctx.caller);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::*;
    use super::super::{pause, withdraw_trapped_cash};
    use super::*;
    use crate::sale::Stage;

    #[test]
    fn test_set_base_uri() {
        let mut storage = deployed();
        let ctx = RuntimeContext::new(owner(), 2);
        set_base_uri(&mut storage, &ctx, "ipfs://next/".to_string()).unwrap();

        let contract = storage.get_contract().unwrap();
        assert_eq!(contract.base_uri, "ipfs://next/");
        assert_eq!(contract.token_uri(3), "ipfs://next/3");

        let result = set_base_uri(
            &mut storage,
            &RuntimeContext::new(minter(), 3),
            "ipfs://evil/".to_string(),
        );
        assert_eq!(result, Err(SaleError::NotOwner));
        assert_eq!(storage.get_contract().unwrap().base_uri, "ipfs://next/");
    }

    #[test]
    fn test_set_max_mint_per_time() {
        let mut storage = deployed();
        set_max_mint_per_time(&mut storage, &RuntimeContext::new(owner(), 2), 6).unwrap();
        assert_eq!(storage.get_contract().unwrap().max_mint_per_time, 6);

        let result = set_max_mint_per_time(&mut storage, &RuntimeContext::new(minter(), 2), 1);
        assert_eq!(result, Err(SaleError::NotOwner));
        assert_eq!(storage.get_contract().unwrap().max_mint_per_time, 6);
    }

    #[test]
    fn test_transfer_ownership() {
        let mut storage = deployed();
        transfer_ownership(&mut storage, &RuntimeContext::new(owner(), 2), minter()).unwrap();
        assert_eq!(storage.get_contract().unwrap().owner, minter());

        // Old owner lost its rights, new owner has them
        let result = pause(&mut storage, &RuntimeContext::new(owner(), 3), false, Stage::One);
        assert_eq!(result, Err(SaleError::NotOwner));
        assert!(pause(&mut storage, &RuntimeContext::new(minter(), 3), false, Stage::One).is_ok());
    }

    #[test]
    fn test_transfer_ownership_to_zero_fails() {
        let mut storage = deployed();
        let result = transfer_ownership(
            &mut storage,
            &RuntimeContext::new(owner(), 2),
            Address::zero(),
        );
        assert_eq!(result, Err(SaleError::ZeroAddress));
        assert_eq!(storage.get_contract().unwrap().owner, owner());
    }

    #[test]
    fn test_renounce_ownership() {
        let mut storage = deployed();
        assert_eq!(
            renounce_ownership(&mut storage, &RuntimeContext::new(minter(), 2)),
            Err(SaleError::NotOwner)
        );

        renounce_ownership(&mut storage, &RuntimeContext::new(owner(), 2)).unwrap();
        assert!(storage.get_contract().unwrap().owner.is_zero());

        assert_eq!(
            withdraw_trapped_cash(&mut storage, &RuntimeContext::new(owner(), 3)),
            Err(SaleError::NotOwner)
        );
        assert_eq!(
            withdraw_trapped_cash(&mut storage, &RuntimeContext::new(Address::zero(), 3)),
            Err(SaleError::NotOwner)
        );
    }
}
