use primitive_types::U256;

pub const VERSION: &str = env!("BUILD_VERSION");

// Collection metadata, fixed at deployment
pub const CONTRACT_NAME: &str = "Dapp Mint NFT";
pub const CONTRACT_SYMBOL: &str = "DM";

// 18 decimals numbers
pub const COIN_DECIMALS: u8 = 18;

// Default number of items a single mint call may issue
pub const DEFAULT_MAX_MINT_PER_TIME: u64 = 4;

// 0.02 coin per item during stage one
pub const DEFAULT_STAGE_ONE_COST: u64 = 20_000_000_000_000_000;
// 0.04 coin per item during stage two
pub const DEFAULT_STAGE_TWO_COST: u64 = 40_000_000_000_000_000;

// First token id issued by a freshly deployed contract
pub const FIRST_TOKEN_ID: u64 = 1;

/// Smallest units in one full coin
#[inline]
pub fn coin_value() -> U256 {
    U256::exp10(COIN_DECIMALS as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_costs_match_coin_value() {
        assert_eq!(
            U256::from(DEFAULT_STAGE_ONE_COST) * 50,
            coin_value(),
            "stage one costs 0.02 coin"
        );
        assert_eq!(U256::from(DEFAULT_STAGE_TWO_COST) * 25, coin_value());
    }
}
