// Token Sale - Core Types
// This module defines all data structures for sale operations.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::crypto::Address;

use super::error::{SaleError, SaleResult};

// ========================================
// Stage
// ========================================

/// One of the two sequential public sale phases
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum Stage {
    #[strum(to_string = "one", serialize = "1")]
    One = 1,
    #[strum(to_string = "two", serialize = "2")]
    Two = 2,
}

impl Stage {
    /// Stage number as used by callers (1 or 2)
    #[inline]
    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn paused_error(&self) -> SaleError {
        match self {
            Stage::One => SaleError::StageOnePaused,
            Stage::Two => SaleError::StageTwoPaused,
        }
    }

    pub fn max_reached_error(&self) -> SaleError {
        match self {
            Stage::One => SaleError::StageOneMaxReached,
            Stage::Two => SaleError::StageTwoMaxReached,
        }
    }

    pub fn insufficient_payment_error(&self) -> SaleError {
        match self {
            Stage::One => SaleError::InsufficientStageOnePayment,
            Stage::Two => SaleError::InsufficientStageTwoPayment,
        }
    }
}

impl TryFrom<u8> for Stage {
    type Error = SaleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Stage::One),
            2 => Ok(Stage::Two),
            _ => Err(SaleError::InvalidStage),
        }
    }
}

// ========================================
// Stage State
// ========================================

/// Price, cap, issuance counter and pause flag of one sale stage
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageState {
    /// Maximum items issuable during this stage
    pub max: u64,

    /// Unit price in smallest units
    pub cost: U256,

    /// Whether minting is halted for this stage
    pub paused: bool,

    /// Items issued so far during this stage
    pub minted: u64,
}

impl StageState {
    /// Create a paused stage with nothing minted
    pub fn new(max: u64, cost: U256) -> Self {
        Self {
            max,
            cost,
            paused: true,
            minted: 0,
        }
    }

    /// Items still available in this stage
    pub fn remaining(&self) -> u64 {
        self.max.saturating_sub(self.minted)
    }

    /// Required payment for `count` items at the current price
    pub fn required_payment(&self, count: u64) -> SaleResult<U256> {
        self.cost
            .checked_mul(U256::from(count))
            .ok_or(SaleError::Overflow)
    }
}

// ========================================
// Contract
// ========================================

/// The contract record: sale configuration plus supply and treasury counters
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintContract {
    /// Derived contract address
    pub address: Address,

    /// Collection name
    pub name: String,

    /// Collection symbol
    pub symbol: String,

    /// Administrator allowed to call owner-only operations
    pub owner: Address,

    /// Prefix of every item URI
    pub base_uri: String,

    /// Global cap on issued items
    pub max_supply: u64,

    /// Per-call limit for sale mints
    pub max_mint_per_time: u64,

    pub stage_one: StageState,
    pub stage_two: StageState,

    /// Reserved airdrop budget
    pub airdrop_max: u64,

    /// Items issued through airdrops so far
    pub airdropped: u64,

    /// Items issued so far (sales and airdrops)
    pub total_supply: u64,

    /// Next token ID (starts from 1)
    pub next_token_id: u64,

    /// Funds attributable to sales, withdrawable by the owner
    pub net_revenue: U256,

    /// Deployment block height
    pub deployed_at: u64,
}

impl MintContract {
    pub fn stage(&self, stage: Stage) -> &StageState {
        match stage {
            Stage::One => &self.stage_one,
            Stage::Two => &self.stage_two,
        }
    }

    pub fn stage_mut(&mut self, stage: Stage) -> &mut StageState {
        match stage {
            Stage::One => &mut self.stage_one,
            Stage::Two => &mut self.stage_two,
        }
    }

    #[inline]
    pub fn is_owner(&self, caller: &Address) -> bool {
        !self.owner.is_zero() && self.owner == *caller
    }

    /// Check that `count` more items fit under the global cap
    pub fn can_issue(&self, count: u64) -> SaleResult<()> {
        let new_supply = self
            .total_supply
            .checked_add(count)
            .ok_or(SaleError::Overflow)?;
        if new_supply > self.max_supply {
            return Err(SaleError::MaxSupplyReached);
        }
        Ok(())
    }

    /// Check that `count` more items fit in the airdrop budget
    pub fn can_airdrop(&self, count: u64) -> SaleResult<()> {
        let new_total = self
            .airdropped
            .checked_add(count)
            .ok_or(SaleError::Overflow)?;
        if new_total > self.airdrop_max {
            return Err(SaleError::AirdropMaxReached);
        }
        Ok(())
    }

    /// Reserve `count` sequential ids and bump the global counters
    ///
    /// Callers must have checked `can_issue` first.
    pub fn allocate_token_ids(&mut self, count: u64) -> SaleResult<Vec<u64>> {
        let first = self.next_token_id;
        self.next_token_id = first.checked_add(count).ok_or(SaleError::Overflow)?;
        self.total_supply = self
            .total_supply
            .checked_add(count)
            .ok_or(SaleError::Overflow)?;
        Ok((first..self.next_token_id).collect())
    }

    /// Whether stage caps and airdrop budget fit within the global cap
    pub fn is_fully_allocatable(&self) -> bool {
        self.stage_one
            .max
            .checked_add(self.stage_two.max)
            .and_then(|sum| sum.checked_add(self.airdrop_max))
            .map(|sum| sum <= self.max_supply)
            .unwrap_or(false)
    }

    /// Item URI: base URI concatenated with the id
    pub fn token_uri(&self, token_id: u64) -> String {
        format!("{}{}", self.base_uri, token_id)
    }
}

// ========================================
// Item
// ========================================

/// Where an item came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemOrigin {
    /// Paid mint during a sale stage
    Sale(Stage),
    /// Owner-driven airdrop
    Airdrop,
}

/// An issued item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Token ID (starts from 1, 0 is invalid)
    pub id: u64,

    /// Current owner
    pub owner: Address,

    /// Original recipient
    pub minter: Address,

    pub origin: ItemOrigin,

    /// Unit price paid at issuance (zero for airdrops)
    pub cost: U256,

    /// Issuance block height
    pub minted_at: u64,
}

// ========================================
// Records
// ========================================

/// Cumulative paid mints of one address
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintRecord {
    pub count: u64,
    pub total_cost: U256,
}

/// One recipient's share of a withdrawal
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub recipient: Address,
    pub amount: U256,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn contract() -> MintContract {
        MintContract {
            address: Address::new([9u8; 20]),
            name: "Test".to_string(),
            symbol: "T".to_string(),
            owner: Address::new([1u8; 20]),
            base_uri: "ipfs://base/".to_string(),
            max_supply: 10,
            max_mint_per_time: 4,
            stage_one: StageState::new(4, U256::from(2u64)),
            stage_two: StageState::new(6, U256::from(4u64)),
            airdrop_max: 5,
            airdropped: 0,
            total_supply: 0,
            next_token_id: 1,
            net_revenue: U256::zero(),
            deployed_at: 0,
        }
    }

    #[test]
    fn test_stage_parsing() {
        assert_eq!(Stage::try_from(1u8), Ok(Stage::One));
        assert_eq!(Stage::try_from(2u8), Ok(Stage::Two));
        assert_eq!(Stage::try_from(3u8), Err(SaleError::InvalidStage));
        assert_eq!(Stage::from_str("ONE"), Ok(Stage::One));
        assert_eq!(Stage::from_str("2"), Ok(Stage::Two));
        assert_eq!(Stage::Two.to_string(), "two");
        assert_eq!(Stage::Two.number(), 2);
    }

    #[test]
    fn test_can_issue_respects_max_supply() {
        let mut c = contract();
        assert!(c.can_issue(10).is_ok());
        assert_eq!(c.can_issue(11), Err(SaleError::MaxSupplyReached));
        c.total_supply = 9;
        assert!(c.can_issue(1).is_ok());
        assert_eq!(c.can_issue(2), Err(SaleError::MaxSupplyReached));
        assert_eq!(c.can_issue(u64::MAX), Err(SaleError::Overflow));
    }

    #[test]
    fn test_allocate_token_ids_sequential() {
        let mut c = contract();
        assert_eq!(c.allocate_token_ids(3).unwrap(), vec![1, 2, 3]);
        assert_eq!(c.allocate_token_ids(1).unwrap(), vec![4]);
        assert_eq!(c.total_supply, 4);
        assert_eq!(c.next_token_id, 5);
    }

    #[test]
    fn test_allocation_check() {
        let mut c = contract();
        assert!(!c.is_fully_allocatable());
        c.max_supply = 15;
        assert!(c.is_fully_allocatable());
    }

    #[test]
    fn test_renounced_owner_is_nobody() {
        let mut c = contract();
        assert!(c.is_owner(&Address::new([1u8; 20])));
        c.owner = Address::zero();
        assert!(!c.is_owner(&Address::zero()));
    }

    #[test]
    fn test_token_uri() {
        assert_eq!(contract().token_uri(7), "ipfs://base/7");
    }
}
