// Treasury Ledger Operations
// This module tracks net revenue against the raw contract balance.
//
// Net revenue only grows through paid mints and trapped cash recovery,
// and only shrinks through owner withdrawals. The raw balance may hold
// more than net revenue when value reached the contract outside minting.

use log::{debug, info};
use primitive_types::U256;

use crate::crypto::Address;
use crate::sale::{Payout, SaleError, SaleResult};

use super::{check_owner, load_contract, RuntimeContext, SaleStorage};

// ========================================
// Split Calculation
// ========================================

/// Split `amount` proportionally to `weights`
///
/// Weights are unit-less (percentages and basis points both work). Each
/// share is first rounded down, then the leftover units are handed out one
/// by one by largest remainder, ties going to the lower index. The shares
/// always sum to `amount`.
pub fn split_amount(amount: U256, weights: &[u64]) -> SaleResult<Vec<U256>> {
    let total_weight = weights
        .iter()
        .try_fold(U256::zero(), |acc, weight| acc.checked_add(U256::from(*weight)))
        .ok_or(SaleError::Overflow)?;
    if total_weight.is_zero() {
        return Err(SaleError::ZeroSplitWeights);
    }

    let mut shares = Vec::with_capacity(weights.len());
    let mut remainders = Vec::with_capacity(weights.len());
    let mut distributed = U256::zero();
    for (index, weight) in weights.iter().enumerate() {
        let product = amount
            .checked_mul(U256::from(*weight))
            .ok_or(SaleError::Overflow)?;
        let share = product / total_weight;
        distributed = distributed.checked_add(share).ok_or(SaleError::Overflow)?;
        shares.push(share);
        remainders.push((product % total_weight, index));
    }

    // Strictly less than the number of recipients
    let mut leftover = amount
        .checked_sub(distributed)
        .ok_or(SaleError::Internal)?;
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for (_, index) in remainders {
        if leftover.is_zero() {
            break;
        }
        shares[index] += U256::one();
        leftover -= U256::one();
    }

    Ok(shares)
}

// ========================================
// Withdraw Operation
// ========================================

/// Pay `amount` of net revenue out to `recipients`, split by `weights`
///
/// # Returns
/// - `Ok(Vec<Payout>)`: Amount credited to each recipient, in input order
/// - `Err(SaleError)`: Error code (nothing is paid)
pub fn withdraw_to<S: SaleStorage + ?Sized>(
    storage: &mut S,
    ctx: &RuntimeContext,
    recipients: &[Address],
    weights: &[u64],
    amount: U256,
) -> SaleResult<Vec<Payout>> {
    let mut contract = load_contract(storage)?;
    check_owner(&contract, &ctx.caller)?;

    // Step 1: Amount checks
    if amount.is_zero() {
        return Err(SaleError::ZeroAmount);
    }
    if amount > contract.net_revenue {
        return Err(SaleError::InsufficientFund);
    }

    // Step 2: Recipients
    if recipients.is_empty() {
        return Err(SaleError::NoRecipients);
    }
    if recipients.len() != weights.len() {
        return Err(SaleError::ArraySizeMismatch);
    }
    if recipients.iter().any(Address::is_zero) {
        return Err(SaleError::ZeroAddress);
    }
    let shares = split_amount(amount, weights)?;

    // Step 3: Funds must really be there
    let contract_balance = storage.get_contract_balance();
    if amount > contract_balance {
        return Err(SaleError::InsufficientContractBalance);
    }

    // Step 4: Compute every new balance before writing any
    let mut payouts: Vec<Payout> = Vec::with_capacity(recipients.len());
    let mut credited: Vec<(Address, U256)> = Vec::with_capacity(recipients.len());
    for (recipient, share) in recipients.iter().zip(shares) {
        let current = match credited.iter().find(|(account, _)| account == recipient) {
            Some((_, balance)) => *balance,
            None => storage.get_account_balance(recipient),
        };
        let balance = current.checked_add(share).ok_or(SaleError::Overflow)?;
        match credited.iter_mut().find(|(account, _)| account == recipient) {
            Some(entry) => entry.1 = balance,
            None => credited.push((*recipient, balance)),
        }
        payouts.push(Payout {
            recipient: *recipient,
            amount: share,
        });
    }

    // Step 5: Apply
    contract.net_revenue -= amount;
    storage.set_contract(&contract)?;
    storage.set_contract_balance(contract_balance - amount)?;
    for (account, balance) in credited {
        storage.set_account_balance(&account, balance)?;
    }

    info!(
        "Withdrew {} units to {} recipient(s), net revenue now {}",
        amount,
        payouts.len(),
        contract.net_revenue
    );
    Ok(payouts)
}

// ========================================
// Trapped Cash
// ========================================

/// Raise net revenue to the raw contract balance
///
/// Moves no funds; the recovered excess becomes withdrawable afterwards.
///
/// # Returns
/// - `Ok(U256)`: Amount recovered (zero when nothing was trapped)
pub fn withdraw_trapped_cash<S: SaleStorage + ?Sized>(
    storage: &mut S,
    ctx: &RuntimeContext,
) -> SaleResult<U256> {
    let mut contract = load_contract(storage)?;
    check_owner(&contract, &ctx.caller)?;

    let balance = storage.get_contract_balance();
    if balance <= contract.net_revenue {
        return Ok(U256::zero());
    }

    let recovered = balance - contract.net_revenue;
    contract.net_revenue = balance;
    storage.set_contract(&contract)?;

    info!("Recovered {} units of trapped cash", recovered);
    Ok(recovered)
}

/// Accept a plain value transfer to the contract
///
/// The raw balance grows, net revenue does not.
pub fn receive<S: SaleStorage + ?Sized>(storage: &mut S, ctx: &RuntimeContext) -> SaleResult<()> {
    load_contract(storage)?;
    if ctx.value.is_zero() {
        return Err(SaleError::ZeroAmount);
    }

    let balance = storage
        .get_contract_balance()
        .checked_add(ctx.value)
        .ok_or(SaleError::Overflow)?;
    storage.set_contract_balance(balance)?;

    debug!("{} sent {} units outside the mint path", ctx.caller, ctx.value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::*;
    use super::super::mint_nft;
    use super::*;
    use crate::sale::{ErrorKind, SaleState, Stage};
    use crate::utils::from_coin;

    fn units(value: u64) -> U256 {
        U256::from(value)
    }

    /// Sell out both stages with exact payments
    fn sold_out() -> SaleState {
        let mut storage = open_sale();
        let contract = storage.get_contract().unwrap();
        for (stage, max) in [(Stage::One, 4), (Stage::Two, 6)] {
            let ctx = RuntimeContext::new(minter(), 3).with_value(contract.stage(stage).cost);
            for _ in 0..max {
                mint_nft(&mut storage, &ctx, 1, stage).unwrap();
            }
        }
        storage
    }

    #[test]
    fn test_split_exact() {
        let shares = split_amount(units(1000), &[40, 60]).unwrap();
        assert_eq!(shares, vec![units(400), units(600)]);

        let shares = split_amount(units(1000), &[3000, 7000]).unwrap();
        assert_eq!(shares, vec![units(300), units(700)]);
    }

    #[test]
    fn test_split_largest_remainder() {
        // 100 / 3 = 33.33 each, the single leftover unit goes to index 0
        let shares = split_amount(units(100), &[1, 1, 1]).unwrap();
        assert_eq!(shares, vec![units(34), units(33), units(33)]);

        // 10 * 1/6 = 1.67, 10 * 2/6 = 3.33, 10 * 3/6 = 5
        let shares = split_amount(units(10), &[1, 2, 3]).unwrap();
        assert_eq!(shares, vec![units(2), units(3), units(5)]);
    }

    #[test]
    fn test_split_zero_weight_gets_nothing() {
        let shares = split_amount(units(7), &[0, 1, 1]).unwrap();
        assert_eq!(shares[0], U256::zero());
        assert_eq!(shares[1] + shares[2], units(7));
        assert_eq!(
            split_amount(units(7), &[0, 0]),
            Err(SaleError::ZeroSplitWeights)
        );
    }

    #[test]
    fn test_withdraw_to() {
        let mut storage = sold_out();
        let net_revenue = storage.get_contract().unwrap().net_revenue;
        assert_eq!(net_revenue, from_coin("0.32").unwrap());

        let ctx = RuntimeContext::new(owner(), 9);
        let payouts =
            withdraw_to(&mut storage, &ctx, &[minter(), minter2()], &[40, 60], units(1000))
                .unwrap();
        assert_eq!(payouts[0].amount, units(400));
        assert_eq!(payouts[1].amount, units(600));

        assert_eq!(
            storage.get_contract().unwrap().net_revenue,
            net_revenue - units(1000)
        );
        assert_eq!(storage.get_contract_balance(), net_revenue - units(1000));
        assert_eq!(storage.get_account_balance(&minter()), units(400));
        assert_eq!(storage.get_account_balance(&minter2()), units(600));
    }

    #[test]
    fn test_withdraw_duplicate_recipient_accumulates() {
        let mut storage = sold_out();
        let ctx = RuntimeContext::new(owner(), 9);
        withdraw_to(&mut storage, &ctx, &[minter(), minter()], &[1, 1], units(10)).unwrap();
        assert_eq!(storage.get_account_balance(&minter()), units(10));
    }

    #[test]
    fn test_withdraw_by_non_owner_fails() {
        let mut storage = sold_out();
        let ctx = RuntimeContext::new(minter2(), 9);
        let result = withdraw_to(&mut storage, &ctx, &[minter(), minter2()], &[30, 70], units(1000));
        assert_eq!(result, Err(SaleError::NotOwner));
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn test_withdraw_zero_amount_fails() {
        let mut storage = sold_out();
        let ctx = RuntimeContext::new(owner(), 9);
        let result = withdraw_to(&mut storage, &ctx, &[minter(), minter2()], &[30, 70], units(0));
        assert_eq!(result, Err(SaleError::ZeroAmount));
    }

    #[test]
    fn test_withdraw_more_than_revenue_fails() {
        let mut storage = sold_out();
        let before = snapshot(&storage);
        let net_revenue = storage.get_contract().unwrap().net_revenue;

        let ctx = RuntimeContext::new(owner(), 9);
        let result = withdraw_to(
            &mut storage,
            &ctx,
            &[minter(), minter2()],
            &[30, 70],
            net_revenue + units(1000),
        );
        assert_eq!(result, Err(SaleError::InsufficientFund));
        assert_eq!(result.unwrap_err().kind(), ErrorKind::InsufficientFunds);
        assert_eq!(snapshot(&storage), before);
    }

    #[test]
    fn test_withdraw_recipient_validation() {
        let mut storage = sold_out();
        let ctx = RuntimeContext::new(owner(), 9);

        assert_eq!(
            withdraw_to(&mut storage, &ctx, &[], &[], units(1)),
            Err(SaleError::NoRecipients)
        );
        assert_eq!(
            withdraw_to(&mut storage, &ctx, &[minter()], &[1, 2], units(1)),
            Err(SaleError::ArraySizeMismatch)
        );
        assert_eq!(
            withdraw_to(&mut storage, &ctx, &[Address::zero()], &[1], units(1)),
            Err(SaleError::ZeroAddress)
        );
        assert_eq!(
            withdraw_to(&mut storage, &ctx, &[minter()], &[0], units(1)),
            Err(SaleError::ZeroSplitWeights)
        );
    }

    #[test]
    fn test_trapped_cash_recovery() {
        let mut storage = deployed();
        let amount = from_coin("3.8").unwrap();
        assert_eq!(storage.get_contract_balance(), U256::zero());

        receive(&mut storage, &RuntimeContext::new(minter2(), 4).with_value(amount)).unwrap();
        assert_eq!(storage.get_contract_balance(), amount);
        assert_eq!(storage.get_contract().unwrap().net_revenue, U256::zero());

        let recovered = withdraw_trapped_cash(&mut storage, &RuntimeContext::new(owner(), 5))
            .unwrap();
        assert_eq!(recovered, amount);
        assert_eq!(storage.get_contract_balance(), amount);
        assert_eq!(storage.get_contract().unwrap().net_revenue, amount);

        // Nothing left to recover
        let recovered = withdraw_trapped_cash(&mut storage, &RuntimeContext::new(owner(), 6))
            .unwrap();
        assert_eq!(recovered, U256::zero());
    }

    #[test]
    fn test_trapped_cash_becomes_withdrawable() {
        let mut storage = deployed();
        let amount = from_coin("1").unwrap();
        receive(&mut storage, &RuntimeContext::new(minter2(), 4).with_value(amount)).unwrap();

        let ctx = RuntimeContext::new(owner(), 5);
        assert_eq!(
            withdraw_to(&mut storage, &ctx, &[owner()], &[100], amount),
            Err(SaleError::InsufficientFund)
        );
        withdraw_trapped_cash(&mut storage, &ctx).unwrap();
        withdraw_to(&mut storage, &ctx, &[owner()], &[100], amount).unwrap();
        assert_eq!(storage.get_account_balance(&owner()), amount);
        assert_eq!(storage.get_contract_balance(), U256::zero());
    }

    #[test]
    fn test_trapped_cash_owner_only() {
        let mut storage = deployed();
        let result = withdraw_trapped_cash(&mut storage, &RuntimeContext::new(minter(), 5));
        assert_eq!(result, Err(SaleError::NotOwner));
    }

    #[test]
    fn test_receive_zero_value_fails() {
        let mut storage = deployed();
        let result = receive(&mut storage, &RuntimeContext::new(minter(), 5));
        assert_eq!(result, Err(SaleError::ZeroAmount));
    }
}
