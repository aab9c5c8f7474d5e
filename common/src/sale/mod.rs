// Staged Token Sale
// This module provides the fixed-supply issuance contract.
//
// Features:
// - Two sequential sale stages with independent price, cap and pause flag
// - Global supply cap checked on every issuance
// - Owner-driven airdrops from a reserved budget
// - Set-once allow-list
// - Revenue accounting with split withdrawals and trapped cash recovery
//
// Module Structure:
// - error: Error codes and types
// - types: Core data structures (MintContract, Item, etc.)
// - state: Serializable in-memory storage backend
// - operations: Core operation logic (deploy, mint, airdrop, withdraw, query)

mod error;
pub mod operations;
mod state;
mod types;

pub use error::*;
pub use operations::*;
pub use state::*;
pub use types::*;
