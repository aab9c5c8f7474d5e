// Sale Operations Module
// This module contains the core business logic of the sale contract.
//
// The operations are designed to be runtime-agnostic:
// - Storage operations are abstracted via traits
// - Runtime values (caller, attached value, block height) are passed as parameters
// - Every operation validates all preconditions before its first write,
//   so a rejected call leaves storage untouched

mod admin;
mod airdrop;
mod deploy;
mod mint;
mod query;
mod stage;
mod transfer;
mod treasury;
mod whitelist;

pub use admin::*;
pub use airdrop::*;
pub use deploy::*;
pub use mint::*;
pub use query::*;
pub use stage::*;
pub use transfer::*;
pub use treasury::*;
pub use whitelist::*;

use primitive_types::U256;

use crate::crypto::Address;
use crate::sale::{Item, MintContract, MintRecord, SaleError, SaleResult};

// ========================================
// Storage Trait (for dependency injection)
// ========================================

/// Abstract storage interface for sale operations
/// Runtime implementations provide concrete storage backends
pub trait SaleStorage {
    // Contract record
    fn get_contract(&self) -> Option<MintContract>;
    fn set_contract(&mut self, contract: &MintContract) -> SaleResult<()>;

    // Item operations
    fn get_item(&self, token_id: u64) -> Option<Item>;
    fn set_item(&mut self, item: &Item) -> SaleResult<()>;
    /// All issued items in id order
    fn get_items(&self) -> Vec<Item>;

    // Owner index
    fn get_owned_tokens(&self, owner: &Address) -> Vec<u64>;
    fn add_owned_token(&mut self, owner: &Address, token_id: u64) -> SaleResult<()>;
    fn remove_owned_token(&mut self, owner: &Address, token_id: u64) -> SaleResult<()>;

    fn get_balance(&self, owner: &Address) -> u64 {
        self.get_owned_tokens(owner).len() as u64
    }

    // Paid mint records
    fn get_mint_record(&self, account: &Address) -> MintRecord;
    fn set_mint_record(&mut self, account: &Address, record: &MintRecord) -> SaleResult<()>;

    // Allow-list (append only)
    fn is_white_listed(&self, account: &Address) -> bool;
    fn push_white_list(&mut self, account: &Address) -> SaleResult<()>;
    fn get_white_list(&self) -> Vec<Address>;

    // Airdrop records, recipients kept in first-drop order
    fn get_airdrop_count(&self, account: &Address) -> u64;
    fn set_airdrop_count(&mut self, account: &Address, count: u64) -> SaleResult<()>;
    fn get_airdroppers(&self) -> Vec<Address>;

    // Native balances held by the host ledger
    fn get_contract_balance(&self) -> U256;
    fn set_contract_balance(&mut self, balance: U256) -> SaleResult<()>;
    fn get_account_balance(&self, account: &Address) -> U256;
    fn set_account_balance(&mut self, account: &Address, balance: U256) -> SaleResult<()>;
}

// ========================================
// Runtime Context
// ========================================

/// Runtime context providing caller, attached value and block information
#[derive(Clone, Debug)]
pub struct RuntimeContext {
    /// Current caller (transaction signer)
    pub caller: Address,
    /// Native value attached to the call
    ///
    /// Payable operations credit it to the contract balance themselves; the
    /// host only debits the caller.
    pub value: U256,
    /// Current block height
    pub block_height: u64,
}

impl RuntimeContext {
    /// Create a new runtime context without attached value
    pub fn new(caller: Address, block_height: u64) -> Self {
        Self {
            caller,
            value: U256::zero(),
            block_height,
        }
    }

    /// Attach native value to the call
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }
}

// ========================================
// Shared Checks
// ========================================

/// Load the contract record or fail when nothing was deployed yet
pub fn load_contract<S: SaleStorage + ?Sized>(storage: &S) -> SaleResult<MintContract> {
    storage.get_contract().ok_or(SaleError::NotDeployed)
}

/// Check that the caller is the contract owner
pub fn check_owner(contract: &MintContract, caller: &Address) -> SaleResult<()> {
    if contract.is_owner(caller) {
        Ok(())
    } else {
        Err(SaleError::NotOwner)
    }
}

/// Sum counts with overflow detection
pub(crate) fn checked_sum(counts: &[u64]) -> SaleResult<u64> {
    counts
        .iter()
        .try_fold(0u64, |acc, count| acc.checked_add(*count))
        .ok_or(SaleError::Overflow)
}
