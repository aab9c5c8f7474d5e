use serde::de::Error as SerdeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};
use std::{
    fmt::{Debug, Display, Error, Formatter},
    str::FromStr,
};

use super::CryptoError;

pub const ADDRESS_SIZE: usize = 20; // 20 bytes / 160 bits

// "0x" prefix + two hex chars per byte
const MAX_ADDRESS_HEX_LENGTH: usize = 2 + ADDRESS_SIZE * 2;

/// Account identifier, rendered as `0x` followed by 40 lowercase hex chars
#[derive(Eq, PartialEq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Address([u8; ADDRESS_SIZE]);

impl Address {
    pub const fn new(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Address(bytes)
    }

    pub const fn zero() -> Self {
        Address::new([0; ADDRESS_SIZE])
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; ADDRESS_SIZE]
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }

    pub fn to_bytes(self) -> [u8; ADDRESS_SIZE] {
        self.0
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parse an address from hex, with or without the `0x` prefix
    pub fn from_hex(value: &str) -> Result<Self, CryptoError> {
        let value = value.trim();
        if value.len() > MAX_ADDRESS_HEX_LENGTH {
            return Err(CryptoError::HexTooLong {
                len: value.len(),
                max: MAX_ADDRESS_HEX_LENGTH,
            });
        }

        let digits = value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .unwrap_or(value);
        let bytes = hex::decode(digits).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
        let len = bytes.len();
        let bytes: [u8; ADDRESS_SIZE] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidAddressLength {
                    len,
                    expected: ADDRESS_SIZE,
                })?;

        Ok(Address(bytes))
    }

    /// Derive the address of a contract deployed by `deployer`
    ///
    /// The address is the last 20 bytes of `keccak256(deployer || nonce)`,
    /// with the nonce encoded as big-endian u64.
    pub fn derive_contract(deployer: &Address, nonce: u64) -> Self {
        let mut hasher = Keccak256::new();
        hasher.update(deployer.as_bytes());
        hasher.update(nonce.to_be_bytes());
        let digest = hasher.finalize();

        let mut bytes = [0u8; ADDRESS_SIZE];
        bytes.copy_from_slice(&digest[digest.len() - ADDRESS_SIZE..]);
        Address(bytes)
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::zero()
    }
}

impl FromStr for Address {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::from_hex(s)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.to_hex())
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "Address({})", self.to_hex())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'a> Deserialize<'a> for Address {
    fn deserialize<D: Deserializer<'a>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Address::from_hex(&hex).map_err(SerdeError::custom)
    }
}
