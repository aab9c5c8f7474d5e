// Sale Deployment
// This module contains the constructor-style initialization of the contract.

use log::{debug, warn};
use primitive_types::U256;

use crate::config::{
    CONTRACT_NAME, CONTRACT_SYMBOL, DEFAULT_MAX_MINT_PER_TIME, DEFAULT_STAGE_ONE_COST,
    DEFAULT_STAGE_TWO_COST, FIRST_TOKEN_ID,
};
use crate::crypto::Address;
use crate::sale::{MintContract, SaleError, SaleResult, StageState};

use super::{RuntimeContext, SaleStorage};

// ========================================
// Deploy Parameters
// ========================================

/// Parameters for deploying the contract
#[derive(Clone, Debug)]
pub struct DeployParams {
    /// Prefix of every item URI
    pub base_uri: String,
    /// Global cap on issued items
    pub max_supply: u64,
    /// Stage one cap
    pub stage_one_max: u64,
    /// Stage two cap
    pub stage_two_max: u64,
    /// Reserved airdrop budget
    pub airdrop_max: u64,
    /// Administrator of the contract
    pub admin: Address,
    /// Deployer nonce used to derive the contract address
    pub nonce: u64,
}

impl DeployParams {
    pub fn new(
        base_uri: String,
        max_supply: u64,
        stage_one_max: u64,
        stage_two_max: u64,
        airdrop_max: u64,
        admin: Address,
    ) -> Self {
        Self {
            base_uri,
            max_supply,
            stage_one_max,
            stage_two_max,
            airdrop_max,
            admin,
            nonce: 0,
        }
    }

    /// Set the deployer nonce
    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }
}

// ========================================
// Deploy Operation
// ========================================

/// Deploy the contract into empty storage
///
/// Both stages start paused, with the default prices and per-call limit.
///
/// # Returns
/// - `Ok(Address)`: The derived contract address
/// - `Err(SaleError)`: Error code
pub fn deploy<S: SaleStorage + ?Sized>(
    storage: &mut S,
    ctx: &RuntimeContext,
    params: DeployParams,
) -> SaleResult<Address> {
    if storage.get_contract().is_some() {
        return Err(SaleError::AlreadyDeployed);
    }

    if params.max_supply == 0 {
        return Err(SaleError::ZeroMaxSupply);
    }
    if params.stage_one_max > params.max_supply
        || params.stage_two_max > params.max_supply
        || params.airdrop_max > params.max_supply
    {
        return Err(SaleError::AllocationExceedsSupply);
    }

    let address = Address::derive_contract(&ctx.caller, params.nonce);
    let contract = MintContract {
        address,
        name: CONTRACT_NAME.to_string(),
        symbol: CONTRACT_SYMBOL.to_string(),
        owner: params.admin,
        base_uri: params.base_uri,
        max_supply: params.max_supply,
        max_mint_per_time: DEFAULT_MAX_MINT_PER_TIME,
        stage_one: StageState::new(params.stage_one_max, U256::from(DEFAULT_STAGE_ONE_COST)),
        stage_two: StageState::new(params.stage_two_max, U256::from(DEFAULT_STAGE_TWO_COST)),
        airdrop_max: params.airdrop_max,
        airdropped: 0,
        total_supply: 0,
        next_token_id: FIRST_TOKEN_ID,
        net_revenue: U256::zero(),
        deployed_at: ctx.block_height,
    };

    // Sub-caps may overlap: the global cap is enforced on every issuance instead
    if !contract.is_fully_allocatable() {
        warn!(
            "Stage caps ({} + {}) and airdrop budget ({}) exceed max supply {}",
            contract.stage_one.max, contract.stage_two.max, contract.airdrop_max, contract.max_supply
        );
    }

    storage.set_contract(&contract)?;

    debug!(
        "Deployed {} at {} with owner {}",
        contract.symbol, address, contract.owner
    );
    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::*;
    use super::*;
    use crate::sale::{SaleState, Stage};

    #[test]
    fn test_deploy_defaults() {
        let storage = deployed();
        let contract = storage.get_contract().unwrap();

        assert_eq!(contract.name, "Dapp Mint NFT");
        assert_eq!(contract.symbol, "DM");
        assert_eq!(contract.owner, owner());
        assert_eq!(contract.base_uri, BASE_URI);
        assert_eq!(contract.max_supply, 10);
        assert_eq!(contract.stage(Stage::One).max, 4);
        assert_eq!(contract.stage(Stage::Two).max, 6);
        assert_eq!(contract.airdrop_max, 5);
        assert_eq!(contract.max_mint_per_time, 4);
        assert_eq!(contract.stage_one.cost, U256::from(DEFAULT_STAGE_ONE_COST));
        assert_eq!(contract.stage_two.cost, U256::from(DEFAULT_STAGE_TWO_COST));
        assert!(contract.stage_one.paused);
        assert!(contract.stage_two.paused);
        assert_eq!(contract.next_token_id, 1);
        assert_eq!(contract.net_revenue, U256::zero());
        assert_eq!(contract.deployed_at, 1);
    }

    #[test]
    fn test_deploy_derives_address_from_deployer() {
        let mut storage = SaleState::new();
        let ctx = RuntimeContext::new(minter(), 0);
        let params = DeployParams::new(BASE_URI.to_string(), 10, 4, 6, 5, owner()).with_nonce(7);

        let address = deploy(&mut storage, &ctx, params).unwrap();
        assert_eq!(address, Address::derive_contract(&minter(), 7));
        // Admin, not deployer, owns the contract
        assert_eq!(storage.get_contract().unwrap().owner, owner());
    }

    #[test]
    fn test_deploy_twice_fails() {
        let mut storage = deployed();
        let ctx = RuntimeContext::new(owner(), 1);
        let result = deploy(
            &mut storage,
            &ctx,
            DeployParams::new(String::new(), 1, 1, 1, 1, owner()),
        );
        assert_eq!(result, Err(SaleError::AlreadyDeployed));
    }

    #[test]
    fn test_deploy_rejects_bad_caps() {
        let ctx = RuntimeContext::new(owner(), 1);

        let mut storage = SaleState::new();
        let result = deploy(
            &mut storage,
            &ctx,
            DeployParams::new(String::new(), 0, 0, 0, 0, owner()),
        );
        assert_eq!(result, Err(SaleError::ZeroMaxSupply));

        let result = deploy(
            &mut storage,
            &ctx,
            DeployParams::new(String::new(), 5, 6, 0, 0, owner()),
        );
        assert_eq!(result, Err(SaleError::AllocationExceedsSupply));
        assert!(storage.get_contract().is_none());
    }
}
