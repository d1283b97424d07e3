//! Fixed-point share rounding.
//!
//! Shares are computed with integer arithmetic and rounded half-up to a fixed
//! number of decimal places, then exposed as [`Decimal`] values.

use crate::errors::ShareError;
use dayweight_types::Weight;
use rust_decimal::Decimal;

/// `weight / total * 10^scale`, rounded half-up.
pub fn scaled_ratio(weight: Weight, total: Weight, scale: u32) -> Result<u128, ShareError> {
    if total == 0 {
        return Err(ShareError::ZeroTotalWeight);
    }
    let unit = 10u128
        .checked_pow(scale)
        .ok_or(ShareError::Overflow("share scale"))?;
    // (2 * w * unit + t) / (2 * t) == floor(w * unit / t + 1/2)
    let numerator = weight
        .checked_mul(unit)
        .and_then(|n| n.checked_mul(2))
        .and_then(|n| n.checked_add(total))
        .ok_or(ShareError::Overflow("share numerator"))?;
    let denominator = total
        .checked_mul(2)
        .ok_or(ShareError::Overflow("share denominator"))?;
    Ok(numerator / denominator)
}

/// `weight / total` rounded half-up to `scale` decimal places.
pub fn rounded_share(weight: Weight, total: Weight, scale: u32) -> Result<Decimal, ShareError> {
    let scaled = scaled_ratio(weight, total, scale)?;
    let mantissa = i128::try_from(scaled).map_err(|_| ShareError::Overflow("share value"))?;
    Decimal::try_from_i128_with_scale(mantissa, scale)
        .map_err(|_| ShareError::Overflow("share value"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_four_places() {
        assert_eq!(rounded_share(23_600, 67_100, 4).unwrap(), dec("0.3517"));
        assert_eq!(rounded_share(43_500, 67_100, 4).unwrap(), dec("0.6483"));
        assert_eq!(rounded_share(1, 3, 4).unwrap(), dec("0.3333"));
        assert_eq!(rounded_share(2, 3, 4).unwrap(), dec("0.6667"));
        assert_eq!(rounded_share(5, 5, 4).unwrap(), dec("1.0000"));
        assert_eq!(rounded_share(0, 5, 4).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_midpoint_rounds_up() {
        // 1 / 20000 = 0.00005 exactly
        assert_eq!(rounded_share(1, 20_000, 4).unwrap(), dec("0.0001"));
        assert_eq!(rounded_share(1, 20_001, 4).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_scale_is_preserved() {
        let share = rounded_share(1, 4, 4).unwrap();
        assert_eq!(share.scale(), 4);
        assert_eq!(share.to_string(), "0.2500");
        assert_eq!(rounded_share(1, 8, 2).unwrap().to_string(), "0.13");
    }

    #[test]
    fn test_zero_total_is_an_error() {
        assert_eq!(rounded_share(1, 0, 4), Err(ShareError::ZeroTotalWeight));
        assert_eq!(scaled_ratio(0, 0, 4), Err(ShareError::ZeroTotalWeight));
    }

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(
            scaled_ratio(u128::MAX / 2, u128::MAX, 4),
            Err(ShareError::Overflow("share numerator"))
        );
    }
}
