// In-Memory Sale State
// A serializable `SaleStorage` backend holding the whole contract state.
// Hosts persist it as a single document between calls.

use indexmap::{IndexMap, IndexSet};
use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::crypto::Address;

use super::operations::SaleStorage;
use super::{Item, MintContract, MintRecord, SaleResult};

/// Complete contract state plus the host balances it touches
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleState {
    /// Contract record, `None` until deployed
    #[serde(default)]
    pub contract: Option<MintContract>,

    /// Items by id, in issuance order
    #[serde(default)]
    pub items: IndexMap<u64, Item>,

    /// Ids held by each address, in acquisition order
    #[serde(default)]
    pub owned: IndexMap<Address, IndexSet<u64>>,

    #[serde(default)]
    pub mint_records: IndexMap<Address, MintRecord>,

    #[serde(default)]
    pub white_list: IndexSet<Address>,

    /// Airdropped count per recipient, in first-drop order
    #[serde(default)]
    pub airdrops: IndexMap<Address, u64>,

    /// Raw native balance of the contract
    #[serde(default)]
    pub contract_balance: U256,

    /// External balances credited by withdrawals
    #[serde(default)]
    pub accounts: IndexMap<Address, U256>,
}

impl SaleState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_deployed(&self) -> bool {
        self.contract.is_some()
    }
}

impl SaleStorage for SaleState {
    fn get_contract(&self) -> Option<MintContract> {
        self.contract.clone()
    }

    fn set_contract(&mut self, contract: &MintContract) -> SaleResult<()> {
        self.contract = Some(contract.clone());
        Ok(())
    }

    fn get_item(&self, token_id: u64) -> Option<Item> {
        self.items.get(&token_id).cloned()
    }

    fn set_item(&mut self, item: &Item) -> SaleResult<()> {
        self.items.insert(item.id, item.clone());
        Ok(())
    }

    fn get_items(&self) -> Vec<Item> {
        self.items.values().cloned().collect()
    }

    fn get_owned_tokens(&self, owner: &Address) -> Vec<u64> {
        self.owned
            .get(owner)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    }

    fn add_owned_token(&mut self, owner: &Address, token_id: u64) -> SaleResult<()> {
        self.owned.entry(*owner).or_default().insert(token_id);
        Ok(())
    }

    fn remove_owned_token(&mut self, owner: &Address, token_id: u64) -> SaleResult<()> {
        if let Some(ids) = self.owned.get_mut(owner) {
            ids.shift_remove(&token_id);
        }
        Ok(())
    }

    fn get_balance(&self, owner: &Address) -> u64 {
        self.owned.get(owner).map_or(0, |ids| ids.len() as u64)
    }

    fn get_mint_record(&self, account: &Address) -> MintRecord {
        self.mint_records.get(account).cloned().unwrap_or_default()
    }

    fn set_mint_record(&mut self, account: &Address, record: &MintRecord) -> SaleResult<()> {
        self.mint_records.insert(*account, record.clone());
        Ok(())
    }

    fn is_white_listed(&self, account: &Address) -> bool {
        self.white_list.contains(account)
    }

    fn push_white_list(&mut self, account: &Address) -> SaleResult<()> {
        self.white_list.insert(*account);
        Ok(())
    }

    fn get_white_list(&self) -> Vec<Address> {
        self.white_list.iter().copied().collect()
    }

    fn get_airdrop_count(&self, account: &Address) -> u64 {
        self.airdrops.get(account).copied().unwrap_or(0)
    }

    fn set_airdrop_count(&mut self, account: &Address, count: u64) -> SaleResult<()> {
        self.airdrops.insert(*account, count);
        Ok(())
    }

    fn get_airdroppers(&self) -> Vec<Address> {
        self.airdrops.keys().copied().collect()
    }

    fn get_contract_balance(&self) -> U256 {
        self.contract_balance
    }

    fn set_contract_balance(&mut self, balance: U256) -> SaleResult<()> {
        self.contract_balance = balance;
        Ok(())
    }

    fn get_account_balance(&self, account: &Address) -> U256 {
        self.accounts.get(account).copied().unwrap_or_default()
    }

    fn set_account_balance(&mut self, account: &Address, balance: U256) -> SaleResult<()> {
        self.accounts.insert(*account, balance);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sale::{ItemOrigin, Stage};

    fn address(byte: u8) -> Address {
        Address::new([byte; 20])
    }

    fn item(id: u64, owner: Address) -> Item {
        Item {
            id,
            owner,
            minter: owner,
            origin: ItemOrigin::Sale(Stage::One),
            cost: U256::from(20u64),
            minted_at: 1,
        }
    }

    #[test]
    fn test_owner_index_keeps_order() {
        let mut state = SaleState::new();
        let owner = address(1);
        for id in [3, 1, 2] {
            state.add_owned_token(&owner, id).unwrap();
        }
        state.remove_owned_token(&owner, 1).unwrap();
        assert_eq!(state.get_owned_tokens(&owner), vec![3, 2]);
        assert_eq!(state.get_balance(&owner), 2);
        assert_eq!(state.get_balance(&address(2)), 0);
    }

    #[test]
    fn test_defaults_for_unknown_accounts() {
        let state = SaleState::new();
        let account = address(7);
        assert_eq!(state.get_mint_record(&account), MintRecord::default());
        assert_eq!(state.get_airdrop_count(&account), 0);
        assert_eq!(state.get_account_balance(&account), U256::zero());
        assert!(!state.is_white_listed(&account));
        assert!(!state.is_deployed());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut state = SaleState::new();
        state.set_item(&item(1, address(2))).unwrap();
        state.add_owned_token(&address(2), 1).unwrap();
        state.push_white_list(&address(3)).unwrap();
        state.set_airdrop_count(&address(4), 2).unwrap();
        state.set_contract_balance(U256::exp10(18)).unwrap();

        let json = serde_json::to_string_pretty(&state).unwrap();
        let restored: SaleState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_empty_document_loads() {
        let state: SaleState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, SaleState::new());
    }
}
