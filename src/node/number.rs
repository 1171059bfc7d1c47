//! Numeric payloads of scalar nodes: the integral ladder and the decimal widths.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

use crate::numeric::{self, IntegralWidth};
use crate::zmij_format;

/// An integral value tagged with the width it was created with.
#[derive(Clone, Debug)]
pub enum Integral {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    BigInteger(BigInt),
}

/// A decimal value tagged with the precision it was created with.
#[derive(Clone, Debug)]
pub enum Decimal {
    Float(f32),
    Double(f64),
    BigDecimal(BigDecimal),
}

/// Any numeric scalar payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Number {
    Integral(Integral),
    Decimal(Decimal),
}

impl Integral {
    /// Store `value` in the narrowest width that holds it exactly.
    pub fn narrowest(value: BigInt) -> Integral {
        match numeric::narrowest_width(&value) {
            IntegralWidth::Byte => value.to_i8().map(Integral::Byte),
            IntegralWidth::Short => value.to_i16().map(Integral::Short),
            IntegralWidth::Int => value.to_i32().map(Integral::Int),
            IntegralWidth::Long => value.to_i64().map(Integral::Long),
            IntegralWidth::BigInteger => None,
        }
        .unwrap_or(Integral::BigInteger(value))
    }

    /// Width this value was stored with.
    pub fn width(&self) -> IntegralWidth {
        match self {
            Integral::Byte(_) => IntegralWidth::Byte,
            Integral::Short(_) => IntegralWidth::Short,
            Integral::Int(_) => IntegralWidth::Int,
            Integral::Long(_) => IntegralWidth::Long,
            Integral::BigInteger(_) => IntegralWidth::BigInteger,
        }
    }

    pub fn to_big_integer(&self) -> BigInt {
        match self {
            Integral::Byte(v) => BigInt::from(*v),
            Integral::Short(v) => BigInt::from(*v),
            Integral::Int(v) => BigInt::from(*v),
            Integral::Long(v) => BigInt::from(*v),
            Integral::BigInteger(v) => v.clone(),
        }
    }

    /// Low 64 bits of the value, two's complement; narrower casts wrap from here.
    pub(crate) fn wrapping_i64(&self) -> i64 {
        match self {
            Integral::Byte(v) => *v as i64,
            Integral::Short(v) => *v as i64,
            Integral::Int(v) => *v as i64,
            Integral::Long(v) => *v,
            Integral::BigInteger(v) => low_i64(v),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Integral::BigInteger(v) => v.is_zero(),
            other => other.wrapping_i64() == 0,
        }
    }
}

/// Low 64 bits of an arbitrary precision integer.
fn low_i64(value: &BigInt) -> i64 {
    if let Some(v) = value.to_i64() {
        return v;
    }
    let bytes = value.to_signed_bytes_le();
    let fill = if value.sign() == num_bigint::Sign::Minus { 0xFF } else { 0 };
    let mut low = [fill; 8];
    for (slot, byte) in low.iter_mut().zip(bytes.iter()) {
        *slot = *byte;
    }
    i64::from_le_bytes(low)
}

impl ToPrimitive for Integral {
    fn to_i64(&self) -> Option<i64> {
        match self {
            Integral::BigInteger(v) => v.to_i64(),
            other => Some(other.wrapping_i64()),
        }
    }

    fn to_u64(&self) -> Option<u64> {
        match self {
            Integral::BigInteger(v) => v.to_u64(),
            other => other.wrapping_i64().to_u64(),
        }
    }

    fn to_i128(&self) -> Option<i128> {
        match self {
            Integral::BigInteger(v) => v.to_i128(),
            other => Some(other.wrapping_i64() as i128),
        }
    }

    fn to_f32(&self) -> Option<f32> {
        match self {
            Integral::BigInteger(v) => v.to_f32(),
            other => Some(other.wrapping_i64() as f32),
        }
    }

    fn to_f64(&self) -> Option<f64> {
        match self {
            Integral::BigInteger(v) => v.to_f64(),
            other => Some(other.wrapping_i64() as f64),
        }
    }
}

impl PartialEq for Integral {
    fn eq(&self, other: &Self) -> bool {
        match (self.to_i64(), other.to_i64()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.to_big_integer() == other.to_big_integer(),
            _ => false,
        }
    }
}

impl Eq for Integral {}

impl Hash for Integral {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.to_i64() {
            Some(v) => v.hash(state),
            None => self.to_big_integer().hash(state),
        }
    }
}

impl PartialOrd for Integral {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Integral {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.to_i64(), other.to_i64()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => self.to_big_integer().cmp(&other.to_big_integer()),
        }
    }
}

impl fmt::Display for Integral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Integral::Byte(v) => write!(f, "{v}"),
            Integral::Short(v) => write!(f, "{v}"),
            Integral::Int(v) => write!(f, "{v}"),
            Integral::Long(v) => write!(f, "{v}"),
            Integral::BigInteger(v) => write!(f, "{v}"),
        }
    }
}

impl Decimal {
    pub fn is_nan(&self) -> bool {
        match self {
            Decimal::Float(v) => v.is_nan(),
            Decimal::Double(v) => v.is_nan(),
            Decimal::BigDecimal(_) => false,
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Decimal::Float(v) => v.is_finite(),
            Decimal::Double(v) => v.is_finite(),
            Decimal::BigDecimal(_) => true,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Decimal::Float(v) => *v == 0.0,
            Decimal::Double(v) => *v == 0.0,
            Decimal::BigDecimal(v) => v.is_zero(),
        }
    }

    /// Exact (for arbitrary precision) or shortest round-trip (for binary
    /// floats) decimal form. `None` for NaN and the infinities.
    pub fn to_big_decimal(&self) -> Option<BigDecimal> {
        match self {
            Decimal::Float(v) if v.is_finite() => {
                BigDecimal::from_str(&zmij_format::float_string(*v)).ok()
            }
            Decimal::Double(v) if v.is_finite() => {
                BigDecimal::from_str(&zmij_format::float_string(*v)).ok()
            }
            Decimal::BigDecimal(v) => Some(v.clone()),
            _ => None,
        }
    }

    /// Integral part, truncated toward zero. `None` for NaN, the infinities
    /// and integral parts too long to expand.
    pub fn truncate(&self) -> Option<BigInt> {
        let value = self.to_big_decimal()?;
        numeric::truncate_big_decimal(&value, numeric::MAX_EXPANDED_DIGITS)
    }

    fn lossy_f32(&self) -> f32 {
        match self {
            Decimal::Float(v) => *v,
            Decimal::Double(v) => *v as f32,
            Decimal::BigDecimal(v) => numeric::big_decimal_to_f32(v),
        }
    }

    fn lossy_f64(&self) -> f64 {
        match self {
            Decimal::Float(v) => *v as f64,
            Decimal::Double(v) => *v,
            Decimal::BigDecimal(v) => numeric::big_decimal_to_f64(v),
        }
    }

    fn canonical(&self) -> Canonical {
        match self {
            Decimal::Float(v) if v.is_nan() => Canonical::NaN,
            Decimal::Double(v) if v.is_nan() => Canonical::NaN,
            Decimal::Float(v) if v.is_infinite() => Canonical::Infinite(v.is_sign_negative()),
            Decimal::Double(v) if v.is_infinite() => Canonical::Infinite(v.is_sign_negative()),
            _ => match self.to_big_decimal() {
                Some(v) => {
                    let (digits, exponent) = v.normalized().into_bigint_and_exponent();
                    Canonical::Finite(digits, exponent)
                }
                None => Canonical::NaN,
            },
        }
    }
}

/// The decimal number a [`Decimal`] stands for. A binary float stands for
/// its shortest round-trip text, so `0.1f32`, `0.1f64` and the arbitrary
/// precision `0.1` are the same number. Finite values are normalized.
#[derive(PartialEq, Eq, Hash)]
enum Canonical {
    NaN,
    Infinite(bool),
    Finite(BigInt, i64),
}

impl ToPrimitive for Decimal {
    fn to_i64(&self) -> Option<i64> {
        match self {
            Decimal::Float(v) => v.to_i64(),
            Decimal::Double(v) => v.to_i64(),
            Decimal::BigDecimal(v) => numeric::truncate_big_decimal(v, 20)?.to_i64(),
        }
    }

    fn to_u64(&self) -> Option<u64> {
        match self {
            Decimal::Float(v) => v.to_u64(),
            Decimal::Double(v) => v.to_u64(),
            Decimal::BigDecimal(v) => numeric::truncate_big_decimal(v, 20)?.to_u64(),
        }
    }

    fn to_f32(&self) -> Option<f32> {
        Some(self.lossy_f32())
    }

    fn to_f64(&self) -> Option<f64> {
        Some(self.lossy_f64())
    }
}

/// Decimals are equal when they stand for the same decimal number, whatever
/// their precision: a binary float counts as its shortest round-trip text.
/// NaN equals NaN and `-0.0` equals `0.0`.
impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Decimal::Float(a), Decimal::Float(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Decimal::Double(a), Decimal::Double(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Decimal::BigDecimal(a), Decimal::BigDecimal(b)) => a == b,
            _ => self.canonical() == other.canonical(),
        }
    }
}

impl Eq for Decimal {}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decimal::Float(v) => zmij_format::write_float_string(f, *v),
            Decimal::Double(v) => zmij_format::write_float_string(f, *v),
            Decimal::BigDecimal(v) => zmij_format::write_big_decimal(f, v),
        }
    }
}

impl Number {
    pub fn is_integral(&self) -> bool {
        matches!(self, Number::Integral(_))
    }

    pub fn is_decimal(&self) -> bool {
        matches!(self, Number::Decimal(_))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integral(v) => v.fmt(f),
            Number::Decimal(v) => v.fmt(f),
        }
    }
}

impl From<Integral> for Number {
    fn from(value: Integral) -> Self {
        Number::Integral(value)
    }
}

impl From<Decimal> for Number {
    fn from(value: Decimal) -> Self {
        Number::Decimal(value)
    }
}
