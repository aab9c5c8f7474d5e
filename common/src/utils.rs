// Amount helpers: conversion between smallest units and human-readable coins

use primitive_types::U256;
use thiserror::Error;

use crate::config::{coin_value, COIN_DECIMALS};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("Amount is empty")]
    Empty,

    #[error("Invalid amount: '{0}'")]
    Invalid(String),

    #[error("Too many decimals: {found}, maximum: {max}")]
    TooManyDecimals { found: usize, max: u8 },

    #[error("Amount overflow")]
    Overflow,
}

/// Parse a decimal coin amount (`"0.02"`, `"3.8"`, `"10"`) into smallest units
pub fn from_coin(value: &str) -> Result<U256, AmountError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AmountError::Empty);
    }

    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(AmountError::Invalid(value.to_string()));
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(AmountError::Invalid(value.to_string()));
    }
    if fraction.len() > COIN_DECIMALS as usize {
        return Err(AmountError::TooManyDecimals {
            found: fraction.len(),
            max: COIN_DECIMALS,
        });
    }

    let whole = if whole.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(whole).map_err(|_| AmountError::Overflow)?
    };
    let padded = format!("{:0<width$}", fraction, width = COIN_DECIMALS as usize);
    let fraction = U256::from_dec_str(&padded).map_err(|_| AmountError::Overflow)?;

    whole
        .checked_mul(coin_value())
        .and_then(|units| units.checked_add(fraction))
        .ok_or(AmountError::Overflow)
}

/// Format smallest units as a coin amount, trailing zeros stripped
pub fn format_coin(value: U256) -> String {
    let unit = coin_value();
    let whole = value / unit;
    let fraction = value % unit;
    if fraction.is_zero() {
        return whole.to_string();
    }

    let fraction = format!(
        "{:0>width$}",
        fraction.to_string(),
        width = COIN_DECIMALS as usize
    );
    format!("{}.{}", whole, fraction.trim_end_matches('0'))
}
