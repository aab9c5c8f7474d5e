// Read-Only Queries
// Views over the contract record, items and per-address records.
// None of these functions modify storage.

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::crypto::Address;
use crate::sale::{Item, SaleError, SaleResult, Stage};

use super::{load_contract, SaleStorage};

/// Snapshot of the public configuration and counters
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractInfo {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub owner: Address,
    pub base_uri: String,
    pub max_supply: u64,
    pub total_supply: u64,
    pub max_mint_per_time: u64,
    pub stage_one_max: u64,
    pub stage_one_cost: U256,
    pub stage_one_paused: bool,
    pub stage_one_minted: u64,
    pub stage_two_max: u64,
    pub stage_two_cost: U256,
    pub stage_two_paused: bool,
    pub stage_two_minted: u64,
    pub airdrop_max: u64,
    pub airdropped: u64,
    pub net_revenue: U256,
    pub contract_balance: U256,
}

pub fn contract_info<S: SaleStorage + ?Sized>(storage: &S) -> SaleResult<ContractInfo> {
    let contract = load_contract(storage)?;
    Ok(ContractInfo {
        address: contract.address,
        name: contract.name,
        symbol: contract.symbol,
        owner: contract.owner,
        base_uri: contract.base_uri,
        max_supply: contract.max_supply,
        total_supply: contract.total_supply,
        max_mint_per_time: contract.max_mint_per_time,
        stage_one_max: contract.stage_one.max,
        stage_one_cost: contract.stage_one.cost,
        stage_one_paused: contract.stage_one.paused,
        stage_one_minted: contract.stage_one.minted,
        stage_two_max: contract.stage_two.max,
        stage_two_cost: contract.stage_two.cost,
        stage_two_paused: contract.stage_two.paused,
        stage_two_minted: contract.stage_two.minted,
        airdrop_max: contract.airdrop_max,
        airdropped: contract.airdropped,
        net_revenue: contract.net_revenue,
        contract_balance: storage.get_contract_balance(),
    })
}

// ========================================
// Contract Record
// ========================================

pub fn get_name<S: SaleStorage + ?Sized>(storage: &S) -> SaleResult<String> {
    Ok(load_contract(storage)?.name)
}

pub fn get_symbol<S: SaleStorage + ?Sized>(storage: &S) -> SaleResult<String> {
    Ok(load_contract(storage)?.symbol)
}

pub fn get_owner<S: SaleStorage + ?Sized>(storage: &S) -> SaleResult<Address> {
    Ok(load_contract(storage)?.owner)
}

pub fn get_base_uri<S: SaleStorage + ?Sized>(storage: &S) -> SaleResult<String> {
    Ok(load_contract(storage)?.base_uri)
}

pub fn get_max_supply<S: SaleStorage + ?Sized>(storage: &S) -> SaleResult<u64> {
    Ok(load_contract(storage)?.max_supply)
}

pub fn get_total_supply<S: SaleStorage + ?Sized>(storage: &S) -> SaleResult<u64> {
    Ok(load_contract(storage)?.total_supply)
}

pub fn get_max_mint_per_time<S: SaleStorage + ?Sized>(storage: &S) -> SaleResult<u64> {
    Ok(load_contract(storage)?.max_mint_per_time)
}

pub fn get_airdrop_max<S: SaleStorage + ?Sized>(storage: &S) -> SaleResult<u64> {
    Ok(load_contract(storage)?.airdrop_max)
}

pub fn get_stage_max<S: SaleStorage + ?Sized>(storage: &S, stage: Stage) -> SaleResult<u64> {
    Ok(load_contract(storage)?.stage(stage).max)
}

pub fn get_stage_cost<S: SaleStorage + ?Sized>(storage: &S, stage: Stage) -> SaleResult<U256> {
    Ok(load_contract(storage)?.stage(stage).cost)
}

pub fn is_stage_paused<S: SaleStorage + ?Sized>(storage: &S, stage: Stage) -> SaleResult<bool> {
    Ok(load_contract(storage)?.stage(stage).paused)
}

pub fn get_net_revenue<S: SaleStorage + ?Sized>(storage: &S) -> SaleResult<U256> {
    Ok(load_contract(storage)?.net_revenue)
}

/// Raw balance held by the contract, including trapped cash
pub fn contract_balance<S: SaleStorage + ?Sized>(storage: &S) -> SaleResult<U256> {
    load_contract(storage)?;
    Ok(storage.get_contract_balance())
}

// ========================================
// Items
// ========================================

/// Every issued item in id order
pub fn get_minted_nfts<S: SaleStorage + ?Sized>(storage: &S) -> SaleResult<Vec<Item>> {
    load_contract(storage)?;
    Ok(storage.get_items())
}

/// Ids currently held by `account`, in acquisition order
pub fn get_owner_nfts<S: SaleStorage + ?Sized>(
    storage: &S,
    account: &Address,
) -> SaleResult<Vec<u64>> {
    load_contract(storage)?;
    Ok(storage.get_owned_tokens(account))
}

pub fn balance_of<S: SaleStorage + ?Sized>(storage: &S, account: &Address) -> SaleResult<u64> {
    load_contract(storage)?;
    Ok(storage.get_balance(account))
}

pub fn owner_of<S: SaleStorage + ?Sized>(storage: &S, token_id: u64) -> SaleResult<Address> {
    load_contract(storage)?;
    storage
        .get_item(token_id)
        .map(|item| item.owner)
        .ok_or(SaleError::TokenNotFound)
}

/// URI built from the current base URI
pub fn token_uri<S: SaleStorage + ?Sized>(storage: &S, token_id: u64) -> SaleResult<String> {
    let contract = load_contract(storage)?;
    if storage.get_item(token_id).is_none() {
        return Err(SaleError::TokenNotFound);
    }
    Ok(contract.token_uri(token_id))
}

// ========================================
// Per-Address Records
// ========================================

/// Cumulative value paid for stage mints
pub fn total_cost<S: SaleStorage + ?Sized>(storage: &S, account: &Address) -> SaleResult<U256> {
    load_contract(storage)?;
    Ok(storage.get_mint_record(account).total_cost)
}

/// Number of items bought through stage mints
pub fn minted_count<S: SaleStorage + ?Sized>(storage: &S, account: &Address) -> SaleResult<u64> {
    load_contract(storage)?;
    Ok(storage.get_mint_record(account).count)
}

pub fn get_airdroppers<S: SaleStorage + ?Sized>(storage: &S) -> SaleResult<Vec<Address>> {
    load_contract(storage)?;
    Ok(storage.get_airdroppers())
}

pub fn airdropped_count<S: SaleStorage + ?Sized>(
    storage: &S,
    account: &Address,
) -> SaleResult<u64> {
    load_contract(storage)?;
    Ok(storage.get_airdrop_count(account))
}

pub fn get_white_list<S: SaleStorage + ?Sized>(storage: &S) -> SaleResult<Vec<Address>> {
    load_contract(storage)?;
    Ok(storage.get_white_list())
}

pub fn is_white_listed<S: SaleStorage + ?Sized>(
    storage: &S,
    account: &Address,
) -> SaleResult<bool> {
    load_contract(storage)?;
    Ok(storage.is_white_listed(account))
}

/// External balance credited by withdrawals
pub fn account_balance<S: SaleStorage + ?Sized>(
    storage: &S,
    account: &Address,
) -> SaleResult<U256> {
    load_contract(storage)?;
    Ok(storage.get_account_balance(account))
}
