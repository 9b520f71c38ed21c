use alloy::primitives::U256;
use rust_decimal::Decimal;

use crate::error::{BscError, Result};

/// Number of decimals of the native BNB coin.
pub const NATIVE_DECIMALS: u8 = 18;

/// 将最小单位金额格式化为人类可读的十进制字符串
///
/// The output keeps at least one fractional digit and trims trailing zeros,
/// so `0` becomes `"0.0"` and `1500000000000000000` at 18 decimals becomes
/// `"1.5"`.
///
/// ```ignore
/// let formatted = format_units(U256::from(1_500_000u64), 6); // "1.5"
/// ```
pub fn format_units(raw_amount: U256, decimals: u8) -> String {
    let digits = raw_amount.to_string();
    let decimals = decimals as usize;

    let (integer, fraction) = if digits.len() > decimals {
        let (integer, fraction) = digits.split_at(digits.len() - decimals);
        (integer.to_string(), fraction.to_string())
    } else {
        ("0".to_string(), format!("{:0>width$}", digits, width = decimals))
    };

    let fraction = fraction.trim_end_matches('0');
    let fraction = if fraction.is_empty() { "0" } else { fraction };

    format!("{}.{}", integer, fraction)
}

/// 将 wei 格式化为 BNB
pub fn format_ether(raw_amount: U256) -> String {
    format_units(raw_amount, NATIVE_DECIMALS)
}

/// 将十进制金额转换为原始代币金额（最小单位）
///
/// Amounts carrying more fractional digits than `decimals` are rejected
/// rather than silently truncated.
pub fn parse_units(amount: Decimal, decimals: u8) -> Result<U256> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(BscError::InvalidAmount(format!(
            "amount must not be negative: {}",
            amount
        )));
    }

    let normalized = amount.normalize();
    let scale = normalized.scale();
    if scale > decimals as u32 {
        return Err(BscError::Precision(format!(
            "{} has more than {} fractional digits",
            normalized, decimals
        )));
    }

    let mantissa = U256::from(normalized.mantissa().unsigned_abs());
    let multiplier = U256::from(10u64).pow(U256::from(decimals as u32 - scale));

    mantissa
        .checked_mul(multiplier)
        .ok_or_else(|| BscError::Precision("Multiplication overflow".to_string()))
}
