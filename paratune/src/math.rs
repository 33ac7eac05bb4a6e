use num_traits::ToPrimitive;

/// Rounds to the nearest integer and saturates into `u32`; NaN maps to 0.
pub fn saturating_f64_to_u32(value: f64) -> u32 {
    if value.is_nan() {
        return 0;
    }

    value.round().to_u32().unwrap_or(if value.is_sign_negative() { 0 } else { u32::MAX })
}

/// Snaps `value` to the closest power of two. Ties favor the larger power, so 12 snaps to 16.
/// Zero is treated as one.
pub fn nearest_power_of_two(value: u32) -> u32 {
    let value = value.max(1);
    if value.is_power_of_two() {
        return value;
    }

    let lower = 1_u32 << (u32::BITS - 1 - value.leading_zeros());
    match lower.checked_mul(2) {
        Some(upper) if upper - value <= value - lower => upper,
        _ => lower,
    }
}

pub fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && 0.0 < value
}
