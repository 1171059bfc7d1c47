//! Typed value accessors.
//!
//! Every value type has three accessors:
//!
//! - `x_value()` reads the node's own value when it has the matching kind
//!   (any numeric node for the numeric types) and otherwise answers the
//!   type's zero value;
//! - `as_x_value()` additionally converts from other kinds (text is parsed,
//!   booleans count as 1 and 0, ...) and answers the zero value when that
//!   fails;
//! - `as_x_value_or(default)` is `as_x_value()` with the caller's fallback.
//!
//! None of them fail. Numeric nodes are cast with Rust `as` semantics
//! (decimals truncate toward zero, wider integrals wrap), while numbers
//! parsed out of text must fit the requested width exactly.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, TimeZone, Utc};
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

use super::{Decimal, Integral, Node, Number};
use crate::base64::decode_base64_yaml;
use crate::numeric;
use crate::parse_scalars::{self, FloatLiteral, TextNumber};
use crate::timestamp;

/// Digits of `u64::MAX`; text spelling longer integral parts fits no primitive.
const PRIMITIVE_DIGITS: u64 = 20;

/// Integral part of a decimal as `i64` with `as` semantics: saturating for
/// binary floats, low 64 bits for arbitrary precision, 0 for NaN.
fn decimal_as_i64(value: &Decimal) -> i64 {
    match value {
        Decimal::Float(v) => *v as i64,
        Decimal::Double(v) => *v as i64,
        Decimal::BigDecimal(v) => {
            // 10^64 is a multiple of 2^64, so such integral parts have no low bits.
            let (_, scale) = v.as_bigint_and_scale();
            if scale <= -64 {
                return 0;
            }
            numeric::truncate_big_decimal(v, u64::MAX)
                .map(|v| Integral::BigInteger(v).wrapping_i64())
                .unwrap_or(0)
        }
    }
}

/// Integer a text spells. Float text counts when finite, truncated, and
/// when its integral part has at most `max_digits` digits.
fn text_big_integer(text: &str, max_digits: u64) -> Option<BigInt> {
    match parse_scalars::parse_number(text)? {
        TextNumber::Int(v) => Some(v),
        TextNumber::Float(FloatLiteral::Finite(v)) => numeric::truncate_big_decimal(&v, max_digits),
        TextNumber::Float(FloatLiteral::Special(_)) => None,
    }
}

fn text_f64(text: &str) -> Option<f64> {
    match parse_scalars::parse_number(text)? {
        TextNumber::Int(v) => v.to_f64(),
        TextNumber::Float(f) => Some(f.to_f64()),
    }
}

fn text_f32(text: &str) -> Option<f32> {
    match parse_scalars::parse_number(text)? {
        TextNumber::Int(v) => v.to_f32(),
        TextNumber::Float(FloatLiteral::Finite(v)) => Some(numeric::big_decimal_to_f32(&v)),
        TextNumber::Float(FloatLiteral::Special(v)) => Some(v as f32),
    }
}

fn text_big_decimal(text: &str) -> Option<BigDecimal> {
    match parse_scalars::parse_number(text)? {
        TextNumber::Int(v) => Some(BigDecimal::new(v, 0)),
        TextNumber::Float(FloatLiteral::Finite(v)) => Some(v),
        TextNumber::Float(FloatLiteral::Special(_)) => None,
    }
}

/// `Number` a text spells: the narrowest integral, or a double.
fn text_number(text: &str) -> Option<Number> {
    Some(match parse_scalars::parse_number(text)? {
        TextNumber::Int(v) => Number::Integral(Integral::narrowest(v)),
        TextNumber::Float(f) => Number::Decimal(Decimal::Double(f.to_f64())),
    })
}

macro_rules! integral_accessors {
    ($($ty:ty: $value:ident, $as_value:ident, $as_value_or:ident, $to:ident;)*) => {$(
        #[doc = concat!("Numeric value cast to `", stringify!($ty), "`; 0 for non-numeric nodes.")]
        pub fn $value(&self) -> $ty {
            match self {
                Node::Integral(v) => v.wrapping_i64() as $ty,
                Node::Decimal(v) => decimal_as_i64(v) as $ty,
                _ => 0,
            }
        }

        #[doc = concat!("Like [`", stringify!($as_value_or), "`](Self::", stringify!($as_value_or), ") with 0 as the default.")]
        pub fn $as_value(&self) -> $ty {
            self.$as_value_or(0)
        }

        #[doc = concat!("Best-effort `", stringify!($ty), "`: numbers are cast, booleans are 1 or 0, text must spell a number in range.")]
        pub fn $as_value_or(&self, default: $ty) -> $ty {
            match self {
                Node::Integral(_) | Node::Decimal(_) => self.$value(),
                Node::Boolean(b) => <$ty>::from(*b),
                Node::Text(s) => text_big_integer(s, PRIMITIVE_DIGITS)
                    .and_then(|v| v.$to())
                    .unwrap_or(default),
                _ => default,
            }
        }
    )*};
}

impl Node {
    pub fn boolean_value(&self) -> bool {
        matches!(self, Node::Boolean(true))
    }

    pub fn as_boolean_value(&self) -> bool {
        self.as_boolean_value_or(false)
    }

    /// Best-effort boolean: numbers are true when non-zero, text must be
    /// `true` or `false` (any case).
    pub fn as_boolean_value_or(&self, default: bool) -> bool {
        match self {
            Node::Boolean(b) => *b,
            Node::Integral(v) => !v.is_zero(),
            Node::Decimal(v) => !v.is_zero(),
            Node::Text(s) => {
                let t = s.trim();
                if t.eq_ignore_ascii_case("true") {
                    true
                } else if t.eq_ignore_ascii_case("false") {
                    false
                } else {
                    default
                }
            }
            _ => default,
        }
    }

    integral_accessors! {
        i8: byte_value, as_byte_value, as_byte_value_or, to_i8;
        i16: short_value, as_short_value, as_short_value_or, to_i16;
        i32: int_value, as_int_value, as_int_value_or, to_i32;
        i64: long_value, as_long_value, as_long_value_or, to_i64;
    }

    /// Numeric value as an arbitrary precision integer (decimals truncate);
    /// 0 for non-numeric nodes.
    pub fn big_integer_value(&self) -> BigInt {
        match self {
            Node::Integral(v) => v.to_big_integer(),
            Node::Decimal(v) => v.truncate().unwrap_or_default(),
            _ => BigInt::zero(),
        }
    }

    pub fn as_big_integer_value(&self) -> BigInt {
        self.as_big_integer_value_or(BigInt::zero())
    }

    pub fn as_big_integer_value_or(&self, default: BigInt) -> BigInt {
        match self {
            Node::Integral(v) => v.to_big_integer(),
            Node::Decimal(v) => v.truncate().unwrap_or(default),
            Node::Boolean(b) => BigInt::from(u8::from(*b)),
            Node::Text(s) => text_big_integer(s, numeric::MAX_EXPANDED_DIGITS).unwrap_or(default),
            _ => default,
        }
    }

    /// Numeric value as `f32`; 0.0 for non-numeric nodes.
    pub fn float_value(&self) -> f32 {
        match self {
            Node::Integral(v) => v.to_f32().unwrap_or(0.0),
            Node::Decimal(v) => v.to_f32().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    pub fn as_float_value(&self) -> f32 {
        self.as_float_value_or(0.0)
    }

    pub fn as_float_value_or(&self, default: f32) -> f32 {
        match self {
            Node::Integral(_) | Node::Decimal(_) => self.float_value(),
            Node::Boolean(b) => f32::from(u8::from(*b)),
            Node::Text(s) => text_f32(s).unwrap_or(default),
            _ => default,
        }
    }

    /// Numeric value as `f64`; 0.0 for non-numeric nodes.
    pub fn double_value(&self) -> f64 {
        match self {
            Node::Integral(v) => v.to_f64().unwrap_or(0.0),
            Node::Decimal(v) => v.to_f64().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    pub fn as_double_value(&self) -> f64 {
        self.as_double_value_or(0.0)
    }

    pub fn as_double_value_or(&self, default: f64) -> f64 {
        match self {
            Node::Integral(_) | Node::Decimal(_) => self.double_value(),
            Node::Boolean(b) => f64::from(u8::from(*b)),
            Node::Text(s) => text_f64(s).unwrap_or(default),
            _ => default,
        }
    }

    /// Numeric value as an arbitrary precision decimal; 0 for non-numeric
    /// nodes and for NaN or infinite decimals.
    pub fn big_decimal_value(&self) -> BigDecimal {
        match self {
            Node::Integral(v) => BigDecimal::new(v.to_big_integer(), 0),
            Node::Decimal(v) => v.to_big_decimal().unwrap_or_default(),
            _ => BigDecimal::zero(),
        }
    }

    pub fn as_big_decimal_value(&self) -> BigDecimal {
        self.as_big_decimal_value_or(BigDecimal::zero())
    }

    pub fn as_big_decimal_value_or(&self, default: BigDecimal) -> BigDecimal {
        match self {
            Node::Integral(v) => BigDecimal::new(v.to_big_integer(), 0),
            Node::Decimal(v) => v.to_big_decimal().unwrap_or(default),
            Node::Boolean(b) => BigDecimal::from(u8::from(*b)),
            Node::Text(s) => text_big_decimal(s).unwrap_or(default),
            _ => default,
        }
    }

    /// Bytes of a binary node; empty otherwise.
    pub fn binary_value(&self) -> &[u8] {
        match self {
            Node::Binary(v) => v,
            _ => &[],
        }
    }

    pub fn as_binary_value(&self) -> Vec<u8> {
        self.as_binary_value_or(Vec::new())
    }

    /// Best-effort bytes: text is decoded as base64.
    pub fn as_binary_value_or(&self, default: Vec<u8>) -> Vec<u8> {
        match self {
            Node::Binary(v) => v.clone(),
            Node::Text(s) => decode_base64_yaml(s).unwrap_or(default),
            _ => default,
        }
    }

    /// Content of a text node; empty otherwise.
    pub fn text_value(&self) -> &str {
        match self {
            Node::Text(v) => v,
            _ => "",
        }
    }

    pub fn as_text_value(&self) -> String {
        self.as_text_value_or("")
    }

    /// Text form of any scalar: `null`, `true`/`false`, numbers as YAML
    /// writes them, base64 for binary, RFC 3339 for time. Containers and
    /// the missing sentinel answer `default`.
    pub fn as_text_value_or(&self, default: &str) -> String {
        match self {
            Node::Text(v) => v.clone(),
            Node::Null => "null".to_owned(),
            Node::Boolean(b) => b.to_string(),
            Node::Integral(v) => v.to_string(),
            Node::Decimal(v) => v.to_string(),
            Node::Binary(v) => crate::base64::encode_base64_yaml(v, 0).concat(),
            Node::Time(v) => timestamp::format(v),
            _ => default.to_owned(),
        }
    }

    /// Timestamp of a time node; `None` otherwise.
    pub fn time_value(&self) -> Option<DateTime<Utc>> {
        match self {
            Node::Time(v) => Some(*v),
            _ => None,
        }
    }

    /// Best-effort timestamp: text is parsed as a YAML timestamp, integral
    /// values count milliseconds since the Unix epoch.
    pub fn as_time_value(&self) -> Option<DateTime<Utc>> {
        match self {
            Node::Time(v) => Some(*v),
            Node::Text(s) => timestamp::parse(s),
            Node::Integral(v) => v.to_i64().and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
            _ => None,
        }
    }

    pub fn as_time_value_or(&self, default: DateTime<Utc>) -> DateTime<Utc> {
        self.as_time_value().unwrap_or(default)
    }

    /// Payload of a numeric node; `None` otherwise.
    pub fn number_value(&self) -> Option<Number> {
        match self {
            Node::Integral(v) => Some(Number::Integral(v.clone())),
            Node::Decimal(v) => Some(Number::Decimal(v.clone())),
            _ => None,
        }
    }

    /// Best-effort number: booleans are 1 or 0, text is parsed (integers
    /// at their narrowest width, other numbers as doubles).
    pub fn as_number_value(&self) -> Option<Number> {
        match self {
            Node::Integral(_) | Node::Decimal(_) => self.number_value(),
            Node::Boolean(b) => Some(Number::Integral(Integral::Byte(i8::from(*b)))),
            Node::Text(s) => text_number(s),
            _ => None,
        }
    }

    pub fn as_number_value_or(&self, default: Number) -> Number {
        self.as_number_value().unwrap_or(default)
    }
}

impl FromStr for Number {
    type Err = crate::Error;

    /// Parse a YAML integer or float literal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        text_number(s).ok_or_else(|| crate::Error::msg(format!("not a number: `{s}`")))
    }
}
