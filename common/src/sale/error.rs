// Token Sale - Error Codes
// This module defines all error codes for sale operations.
//
// Every error carries a stable, human-readable reason (its Display output)
// that hosts surface to users as-is. Errors are grouped into coarse kinds
// for programmatic dispatch.
//
// Error Code Ranges:
// - 0: Success
// - 1-99: Lifecycle errors
// - 100-199: Stage errors
// - 200-299: Supply errors
// - 300-399: Permission errors
// - 400-499: Input validation errors
// - 500-599: Treasury errors
// - 900-999: System errors

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

/// Sale operation result type
pub type SaleResult<T> = Result<T, SaleError>;

/// Coarse classification of a rejected operation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum ErrorKind {
    InvalidArgument,
    NotReady,
    InsufficientFunds,
    CapacityExceeded,
    Unauthorized,
    AlreadyRegistered,
    EmptyInput,
    LengthMismatch,
}

/// Sale error type with numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[repr(u64)]
pub enum SaleError {
    // ========================================
    // Lifecycle errors (1-99)
    // ========================================
    #[error("Contract not deployed")]
    NotDeployed = 1,

    #[error("Contract already deployed")]
    AlreadyDeployed = 2,

    #[error("Max supply must not be zero")]
    ZeroMaxSupply = 3,

    #[error("Allocation exceeds max supply")]
    AllocationExceedsSupply = 4,

    // ========================================
    // Stage errors (100-199)
    // ========================================
    #[error("Invalid stage")]
    InvalidStage = 100,

    #[error("Stage one paused, check back later")]
    StageOnePaused = 101,

    #[error("Stage two paused, check back later")]
    StageTwoPaused = 102,

    #[error("Insufficient ethers for stage one")]
    InsufficientStageOnePayment = 103,

    #[error("Insufficient ethers for stage two")]
    InsufficientStageTwoPayment = 104,

    // ========================================
    // Supply errors (200-299)
    // ========================================
    #[error("Max supply reached")]
    MaxSupplyReached = 200,

    #[error("Stage one max reached")]
    StageOneMaxReached = 201,

    #[error("Stage two max reached")]
    StageTwoMaxReached = 202,

    #[error("Insufficient tokens for airdrop")]
    AirdropMaxReached = 203,

    #[error("Token does not exist")]
    TokenNotFound = 204,

    // ========================================
    // Permission errors (300-399)
    // ========================================
    #[error("Ownable: caller is not the owner")]
    NotOwner = 300,

    #[error("Caller is not token owner")]
    NotTokenOwner = 301,

    #[error("Account already in the list")]
    AlreadyWhiteListed = 302,

    // ========================================
    // Input validation errors (400-499)
    // ========================================
    #[error("Number of mints must be greater than zero")]
    ZeroMintCount = 400,

    #[error("Exceeded max mint per time")]
    MaxMintPerTimeExceeded = 401,

    #[error("Beneficiary must not be zero")]
    NoBeneficiaries = 402,

    #[error("Array sizes not matching")]
    ArraySizeMismatch = 403,

    #[error("Transfer to the zero address")]
    ZeroAddress = 404,

    #[error("Recipient must not be zero")]
    NoRecipients = 405,

    #[error("Split weights must not be zero")]
    ZeroSplitWeights = 406,

    // ========================================
    // Treasury errors (500-599)
    // ========================================
    #[error("Amount must not be zero")]
    ZeroAmount = 500,

    #[error("Insufficient fund")]
    InsufficientFund = 501,

    #[error("Insufficient contract balance")]
    InsufficientContractBalance = 502,

    // ========================================
    // System errors (900-999)
    // ========================================
    #[error("Arithmetic overflow")]
    Overflow = 900,

    #[error("Storage error")]
    StorageError = 901,

    #[error("Internal error")]
    Internal = 999,
}

impl SaleError {
    /// Get the numeric error code
    #[inline]
    pub fn code(&self) -> u64 {
        *self as u64
    }

    /// Stable reason string shown to callers
    pub fn reason(&self) -> String {
        self.to_string()
    }

    /// Coarse kind used for dispatch
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotDeployed | Self::StageOnePaused | Self::StageTwoPaused => ErrorKind::NotReady,
            Self::InsufficientStageOnePayment
            | Self::InsufficientStageTwoPayment
            | Self::InsufficientFund
            | Self::InsufficientContractBalance => ErrorKind::InsufficientFunds,
            Self::MaxSupplyReached
            | Self::StageOneMaxReached
            | Self::StageTwoMaxReached
            | Self::AirdropMaxReached => ErrorKind::CapacityExceeded,
            Self::NotOwner | Self::NotTokenOwner => ErrorKind::Unauthorized,
            Self::AlreadyWhiteListed => ErrorKind::AlreadyRegistered,
            Self::NoBeneficiaries | Self::NoRecipients => ErrorKind::EmptyInput,
            Self::ArraySizeMismatch => ErrorKind::LengthMismatch,
            Self::AlreadyDeployed
            | Self::ZeroMaxSupply
            | Self::AllocationExceedsSupply
            | Self::InvalidStage
            | Self::TokenNotFound
            | Self::ZeroMintCount
            | Self::MaxMintPerTimeExceeded
            | Self::ZeroAddress
            | Self::ZeroSplitWeights
            | Self::ZeroAmount
            | Self::Overflow
            | Self::StorageError
            | Self::Internal => ErrorKind::InvalidArgument,
        }
    }

    /// Create error from numeric code
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(Self::NotDeployed),
            2 => Some(Self::AlreadyDeployed),
            3 => Some(Self::ZeroMaxSupply),
            4 => Some(Self::AllocationExceedsSupply),
            100 => Some(Self::InvalidStage),
            101 => Some(Self::StageOnePaused),
            102 => Some(Self::StageTwoPaused),
            103 => Some(Self::InsufficientStageOnePayment),
            104 => Some(Self::InsufficientStageTwoPayment),
            200 => Some(Self::MaxSupplyReached),
            201 => Some(Self::StageOneMaxReached),
            202 => Some(Self::StageTwoMaxReached),
            203 => Some(Self::AirdropMaxReached),
            204 => Some(Self::TokenNotFound),
            300 => Some(Self::NotOwner),
            301 => Some(Self::NotTokenOwner),
            302 => Some(Self::AlreadyWhiteListed),
            400 => Some(Self::ZeroMintCount),
            401 => Some(Self::MaxMintPerTimeExceeded),
            402 => Some(Self::NoBeneficiaries),
            403 => Some(Self::ArraySizeMismatch),
            404 => Some(Self::ZeroAddress),
            405 => Some(Self::NoRecipients),
            406 => Some(Self::ZeroSplitWeights),
            500 => Some(Self::ZeroAmount),
            501 => Some(Self::InsufficientFund),
            502 => Some(Self::InsufficientContractBalance),
            900 => Some(Self::Overflow),
            901 => Some(Self::StorageError),
            999 => Some(Self::Internal),
            _ => None,
        }
    }
}
