use std::str::FromStr;

use bigdecimal::{
    num_bigint::{BigInt, Sign},
    BigDecimal, ToPrimitive, Zero,
};
use num_integer::Integer;
use starknet::core::types::Felt;

use super::TipError;

lazy_static::lazy_static! {
    static ref TWO_POW_128: BigInt = BigInt::from(2).pow(128);
    static ref TWO_POW_256: BigInt = BigInt::from(2).pow(256);
}

const MAX_AMOUNT_LEN: usize = 128;
// 2^256 has 78 decimal digits
const MAX_UINT256_DIGITS: i64 = 78;

/// Unsigned 256-bit integer split in two 128-bit words, as Cairo's `u256`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uint256 {
    pub low: u128,
    pub high: u128,
}

impl Uint256 {
    /// Calldata order for a `u256` argument: low word first.
    pub fn to_felts(self) -> [Felt; 2] {
        [Felt::from(self.low), Felt::from(self.high)]
    }

    #[cfg(test)]
    pub fn to_bigint(self) -> BigInt {
        BigInt::from(self.high) * &*TWO_POW_128 + BigInt::from(self.low)
    }
}

/// Splits `n` on 2^128. Returns `None` when `n` is negative or does not fit in 256 bits.
pub fn to_uint256(n: &BigInt) -> Option<Uint256> {
    if n.sign() == Sign::Minus || *n >= *TWO_POW_256 {
        return None;
    }
    let (n_high, n_low) = n.div_rem(&TWO_POW_128);
    Some(Uint256 {
        low: n_low.to_u128()?,
        high: n_high.to_u128()?,
    })
}

/// Converts a decimal token amount (`"10"`, `"0.5"`, `"1e3"`) into its base-unit
/// `u256`, i.e. `floor(amount * 10^decimals)`. Parsing is exact, no float involved.
pub fn parse_token_amount(amount: &str, decimals: u32) -> Result<Uint256, TipError> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(TipError::InvalidAmount("amount is required".to_string()));
    }
    if amount.len() > MAX_AMOUNT_LEN {
        return Err(TipError::InvalidAmount("amount is too long".to_string()));
    }

    let decimal_amount = BigDecimal::from_str(amount)
        .map_err(|_| TipError::InvalidAmount(format!("{:?} is not a decimal number", amount)))?;

    // decimal_amount = digits * 10^-scale
    let (digits, scale) = decimal_amount.into_bigint_and_exponent();
    if digits.sign() == Sign::Minus {
        return Err(TipError::InvalidAmount(format!(
            "{:?} is negative",
            amount
        )));
    }
    if digits.is_zero() {
        return Ok(Uint256 { low: 0, high: 0 });
    }
    let digit_count = digits.to_str_radix(10).len() as i64;
    let shift = (decimals as i64)
        .checked_sub(scale)
        .ok_or_else(|| overflow(amount))?;

    let scaled = if shift >= 0 {
        if digit_count.saturating_add(shift) > MAX_UINT256_DIGITS {
            return Err(overflow(amount));
        }
        digits * BigInt::from(10).pow(shift as u32)
    } else {
        // shift is negative here, so its magnitude fits in u64
        let drop = shift.unsigned_abs();
        if drop > digit_count as u64 {
            BigInt::zero()
        } else {
            // integer division truncates, which is floor for non-negative values
            digits / BigInt::from(10).pow(drop as u32)
        }
    };

    to_uint256(&scaled).ok_or_else(|| overflow(amount))
}

fn overflow(amount: &str) -> TipError {
    TipError::InvalidAmount(format!("{:?} does not fit in a u256", amount))
}
