//! Scalar literal parsing and implicit tag resolution for plain scalars.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::numeric;
use crate::tags::Tag;
use crate::timestamp;

/// Parse a YAML 1.1 boolean from a &str (handles the "Norway problem").
///
/// Accepted TRUE literals (case-insensitive): "y", "yes", "true", "on"
/// Accepted FALSE literals (case-insensitive): "n", "no", "false", "off"
///
/// Returns:
/// - Ok(true/false) on success
/// - Err(...) if the input is not a YAML 1.1 boolean literal
pub(crate) fn parse_yaml11_bool(s: &str) -> Result<bool, String> {
    let t = s.trim();
    if t.eq_ignore_ascii_case("true")
        || t.eq_ignore_ascii_case("yes")
        || t.eq_ignore_ascii_case("y")
        || t.eq_ignore_ascii_case("on")
    {
        Ok(true)
    } else if t.eq_ignore_ascii_case("false")
        || t.eq_ignore_ascii_case("no")
        || t.eq_ignore_ascii_case("n")
        || t.eq_ignore_ascii_case("off")
    {
        Ok(false)
    } else {
        Err(format!("invalid YAML 1.1 bool: `{}`", s))
    }
}

/// Boolean spelled the way an untagged plain scalar may spell it. The
/// single-letter forms are left to explicit `!!bool` only.
fn implicit_bool(s: &str, strict: bool) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else if strict || s.len() == 1 {
        None
    } else {
        parse_yaml11_bool(s).ok()
    }
}

pub(crate) fn is_null_literal(s: &str) -> bool {
    s.is_empty() || s == "~" || s.eq_ignore_ascii_case("null")
}

/// Parse an integer literal: optional sign, `0x`/`0o`/`0b` radix prefixes,
/// `_` digit separators. With `legacy_octal`, a `00` prefix also means octal.
pub(crate) fn parse_int(s: &str, legacy_octal: bool) -> Option<BigInt> {
    let t = s.trim();
    let (neg, rest) = match t.strip_prefix('+') {
        Some(r) => (false, r),
        None => match t.strip_prefix('-') {
            Some(r) => (true, r),
            None => (false, t),
        },
    };

    // Detect base
    let (radix, digits) = if let Some(r) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        (16u32, r)
    } else if let Some(r) = rest.strip_prefix("0o").or_else(|| rest.strip_prefix("0O")) {
        (8u32, r)
    } else if let Some(r) = rest.strip_prefix("0b").or_else(|| rest.strip_prefix("0B")) {
        (2u32, r)
    } else if legacy_octal && rest.starts_with("00") {
        (8u32, &rest[2..])
    } else {
        (10u32, rest)
    };

    // A separator may not open the digits ("0x_1" and "_1" are not numbers).
    if digits.starts_with('_') {
        return None;
    }
    let cleaned: Vec<u8> = digits.bytes().filter(|b| *b != b'_').collect();
    if cleaned.is_empty() || !cleaned.iter().all(|b| (*b as char).is_digit(radix)) {
        return None;
    }
    let magnitude = BigInt::parse_bytes(&cleaned, radix)?;
    Some(if neg { -magnitude } else { magnitude })
}

/// A float literal: one of the three special values, or a finite decimal
/// kept at full precision.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum FloatLiteral {
    Special(f64),
    Finite(BigDecimal),
}

impl FloatLiteral {
    pub(crate) fn to_f64(&self) -> f64 {
        match self {
            FloatLiteral::Special(v) => *v,
            FloatLiteral::Finite(v) => numeric::big_decimal_to_f64(v),
        }
    }
}

/// Parse a float literal. Plain integers are not floats: a `.` or an
/// exponent is required.
pub(crate) fn parse_float(s: &str) -> Option<FloatLiteral> {
    let t: String = s.trim().chars().filter(|c| *c != '_').collect();
    let lower = t.to_ascii_lowercase();
    match lower.as_str() {
        ".nan" | "+.nan" | "-.nan" => return Some(FloatLiteral::Special(f64::NAN)),
        ".inf" | "+.inf" => return Some(FloatLiteral::Special(f64::INFINITY)),
        "-.inf" => return Some(FloatLiteral::Special(f64::NEG_INFINITY)),
        _ => {}
    }

    let (neg, body) = match lower.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, lower.strip_prefix('+').unwrap_or(&lower)),
    };
    let (mantissa, exponent) = match body.split_once('e') {
        Some((m, e)) => (m, Some(e)),
        None => (body, None),
    };
    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (mantissa, None),
    };
    if frac_part.is_none() && exponent.is_none() {
        return None;
    }
    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !frac_part.is_none_or(all_digits) {
        return None;
    }
    if int_part.is_empty() && frac_part.is_none_or(str::is_empty) {
        return None;
    }
    if let Some(e) = exponent {
        let digits = e.strip_prefix(['+', '-']).unwrap_or(e);
        if digits.is_empty() || !all_digits(digits) {
            return None;
        }
    }

    let mut normalized = String::with_capacity(lower.len() + 3);
    if neg {
        normalized.push('-');
    }
    normalized.push_str(if int_part.is_empty() { "0" } else { int_part });
    if let Some(f) = frac_part.filter(|f| !f.is_empty()) {
        normalized.push('.');
        normalized.push_str(f);
    }
    if let Some(e) = exponent {
        normalized.push('e');
        normalized.push_str(e);
    }
    BigDecimal::from_str(&normalized).ok().map(FloatLiteral::Finite)
}

/// Number spelled by a text, for accessors that read numbers out of text
/// nodes. Integer syntax wins over float syntax.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum TextNumber {
    Int(BigInt),
    Float(FloatLiteral),
}

pub(crate) fn parse_number(s: &str) -> Option<TextNumber> {
    parse_int(s, false)
        .map(TextNumber::Int)
        .or_else(|| parse_float(s).map(TextNumber::Float))
}

/// Knobs of implicit resolution.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Resolver {
    pub(crate) strict_booleans: bool,
    pub(crate) legacy_octal: bool,
}

impl Resolver {
    /// Tag an untagged plain scalar resolves to.
    pub(crate) fn resolve(&self, value: &str) -> Tag {
        let tag = if is_null_literal(value) {
            Tag::Null
        } else if implicit_bool(value, self.strict_booleans).is_some() {
            Tag::Bool
        } else if self.looks_numeric(value) && parse_int(value, self.legacy_octal).is_some() {
            Tag::Int
        } else if self.looks_numeric(value) && parse_float(value).is_some() {
            Tag::Float
        } else if timestamp::looks_like_timestamp(value) && timestamp::parse(value).is_some() {
            Tag::Timestamp
        } else {
            Tag::Str
        };
        log::trace!("plain scalar {value:?} resolved as {tag}");
        tag
    }

    /// Cheap pre-check so words never reach the number parsers.
    fn looks_numeric(&self, value: &str) -> bool {
        let b = value.as_bytes();
        let first = b.first().copied().unwrap_or(b' ');
        first.is_ascii_digit() || matches!(first, b'-' | b'+' | b'.')
    }
}
