//! Fee arithmetic for amounts quoted with a decimal fee rate.
//!
//! A fee rate `fee` with `decimals` places means `fee / 10^decimals`; e.g.
//! `fee = 150, decimals = 4` is 1.5%. Results are floored.

use crate::errors::ShareError;

/// Fee charged on `amount`.
pub fn fee(amount: u128, fee: u128, decimals: u32) -> Result<u128, ShareError> {
    let unit = 10u128
        .checked_pow(decimals)
        .ok_or(ShareError::Overflow("fee decimals"))?;
    let charged = amount
        .checked_mul(fee)
        .ok_or(ShareError::Overflow("fee"))?;
    Ok(charged / unit)
}

/// `amount` after deducting its fee.
pub fn without_fee(amount: u128, fee_rate: u128, decimals: u32) -> Result<u128, ShareError> {
    amount
        .checked_sub(fee(amount, fee_rate, decimals)?)
        .ok_or(ShareError::Overflow("fee exceeds amount"))
}
