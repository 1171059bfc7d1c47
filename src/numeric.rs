//! Range checks for the integral ladder (byte -> short -> int -> long -> big integer).
//!
//! The predicates answer whether an integral value converts into the narrower
//! width without loss. They are used by the integral node accessors (`is_byte()`
//! and friends report the actual magnitude, not the storage width) and by the
//! constructor when it picks the narrowest width for a parsed literal.
//!
//! Inputs are expected to be integral (`i8`..`i128`, `u8`..`u128`, [`BigInt`]);
//! for floating point inputs `num-traits` truncates, which is not what these
//! predicates are meant to answer.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

/// Largest integral part, in decimal digits, expanded out of an arbitrary
/// precision decimal. Bigger magnitudes count as out of range.
pub(crate) const MAX_EXPANDED_DIGITS: u64 = 4096;

/// True if `value` fits losslessly into a signed 8-bit integer.
pub fn fits_into_byte<T: ToPrimitive + ?Sized>(value: &T) -> bool {
    value.to_i8().is_some()
}

/// True if `value` fits losslessly into a signed 16-bit integer.
pub fn fits_into_short<T: ToPrimitive + ?Sized>(value: &T) -> bool {
    value.to_i16().is_some()
}

/// True if `value` fits losslessly into a signed 32-bit integer.
pub fn fits_into_int<T: ToPrimitive + ?Sized>(value: &T) -> bool {
    value.to_i32().is_some()
}

/// True if `value` fits losslessly into a signed 64-bit integer.
pub fn fits_into_long<T: ToPrimitive + ?Sized>(value: &T) -> bool {
    value.to_i64().is_some()
}

/// Width of the integral ladder, narrowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntegralWidth {
    Byte,
    Short,
    Int,
    Long,
    BigInteger,
}

/// First (narrowest) width of the ladder that holds `value` exactly.
pub fn narrowest_width(value: &BigInt) -> IntegralWidth {
    if fits_into_byte(value) {
        IntegralWidth::Byte
    } else if fits_into_short(value) {
        IntegralWidth::Short
    } else if fits_into_int(value) {
        IntegralWidth::Int
    } else if fits_into_long(value) {
        IntegralWidth::Long
    } else {
        IntegralWidth::BigInteger
    }
}

/// Integral part of `value`, truncated toward zero.
///
/// `None` when the integral part has more than `max_digits` digits. The size
/// is worked out from the digit count and the scale, before anything is
/// multiplied out, so `1e900000` is rejected without expanding it.
pub(crate) fn truncate_big_decimal(value: &BigDecimal, max_digits: u64) -> Option<BigInt> {
    let (digits, scale) = value.as_bigint_and_exponent();
    let integral_digits = i128::from(value.digits()) - i128::from(scale);
    if digits.is_zero() || integral_digits <= 0 {
        return Some(BigInt::zero());
    }
    if integral_digits > i128::from(max_digits) {
        return None;
    }
    let ten = BigInt::from(10u8);
    Some(if scale <= 0 {
        digits * ten.pow(u32::try_from(scale.unsigned_abs()).ok()?)
    } else {
        digits / ten.pow(u32::try_from(scale).ok()?)
    })
}

/// `value` as `digits e exponent`, the form the float parsers round from.
fn scientific(value: &BigDecimal) -> String {
    let (digits, scale) = value.as_bigint_and_exponent();
    format!("{digits}e{}", -i128::from(scale))
}

/// Nearest `f64` to `value`, correctly rounded. Magnitudes out of range
/// become infinite or zero.
pub(crate) fn big_decimal_to_f64(value: &BigDecimal) -> f64 {
    scientific(value).parse().unwrap_or(f64::NAN)
}

/// Nearest `f32` to `value`, rounded once from the exact decimal.
pub(crate) fn big_decimal_to_f32(value: &BigDecimal) -> f32 {
    scientific(value).parse().unwrap_or(f32::NAN)
}
