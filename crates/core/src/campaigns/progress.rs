//! Progress projection for fundraising campaigns.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// Share of `goal` reached by `running_total`, as a percentage in `[0, 100]`.
///
/// A zero (or negative) goal yields 0. Never stored; callers recompute it on
/// every read.
pub fn percentage(goal: Decimal, running_total: Decimal) -> Decimal {
    if goal <= Decimal::ZERO || running_total <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let hundred = dec!(100);
    let ratio = match running_total.checked_div(goal) {
        Some(ratio) => ratio,
        None => return hundred,
    };
    ratio
        .checked_mul(hundred)
        .unwrap_or(hundred)
        .min(hundred)
        .round_dp(DISPLAY_DECIMAL_PRECISION)
}
