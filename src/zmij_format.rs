//! Format as float string, make changes to be sure valid YAML float (zmij may render 4e-6 and not 4.0e-6)
use std::fmt::{self, Write};

use bigdecimal::BigDecimal;
use num_traits::float::FloatCore;
use zmij::Float;

/// Write the shortest text that reads back as the same `f32`/`f64`, in a form
/// the YAML float resolver recognizes (`.nan`, `.inf`, `-.inf`, always a `.`).
pub(crate) fn write_float_string<F: Float + FloatCore, W: Write + ?Sized>(
    target: &mut W,
    f: F,
) -> fmt::Result {
    if f.is_nan() {
        target.write_str(".nan")
    } else if f.is_infinite() {
        if f.is_sign_positive() {
            target.write_str(".inf")
        } else {
            target.write_str("-.inf")
        }
    } else {
        let mut buf = zmij::Buffer::new();
        // Branches .is_nan and .is_infinite are already covered above
        let s = buf.format_finite(f);
        write_with_decimal_point(target, s)
    }
}

/// Same as [`write_float_string`] but collects into a fresh `String`.
pub(crate) fn float_string<F: Float + FloatCore>(f: F) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_float_string(&mut out, f);
    out
}

/// Render an arbitrary precision decimal so that it resolves as `!!float`
/// rather than `!!int` when read back (`3` becomes `3.0`, `1E+3` becomes `1.0E+3`).
pub(crate) fn write_big_decimal<W: Write + ?Sized>(target: &mut W, value: &BigDecimal) -> fmt::Result {
    let s = value.to_string();
    write_with_decimal_point(target, &s)
}

/// Insert `.0` where the formatted number lacks a decimal point.
fn write_with_decimal_point<W: Write + ?Sized>(target: &mut W, s: &str) -> fmt::Result {
    if s.as_bytes().contains(&b'.') {
        return target.write_str(s);
    }
    if let Some(exp_pos) = s.find(['e', 'E']) {
        // Has exponent but no decimal: insert .0 before the e
        // "4e-6" -> "4.0e-6"
        target.write_str(&s[..exp_pos])?;
        target.write_str(".0")?;
        target.write_str(&s[exp_pos..])
    } else {
        // No decimal and no exponent: append .0
        target.write_str(s)?;
        target.write_str(".0")
    }
}
