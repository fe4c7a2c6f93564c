//! Java-compatible number rendering.
//!
//! EL stringifies numbers the way `Double.toString` and
//! `BigDecimal.toString` do, so `${1.0 + 2}` renders as `3.0` and large
//! magnitudes switch to `1.0E10` notation.

use bigdecimal::BigDecimal;
use num_traits::Signed;

/// Render a `double` like `Double.toString`.
pub fn format_double(d: f64) -> String {
    if d.is_nan() {
        return "NaN".to_string();
    }
    if d.is_infinite() {
        return if d > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = d.abs();
    if d == 0.0 || (1e-3..1e7).contains(&magnitude) {
        plain(format!("{d}"))
    } else {
        scientific(&format!("{d:e}"))
    }
}

/// Render a `float` like `Float.toString`.
pub fn format_float(f: f32) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = f.abs();
    if f == 0.0 || (1e-3..1e7).contains(&magnitude) {
        plain(format!("{f}"))
    } else {
        scientific(&format!("{f:e}"))
    }
}

fn plain(mut s: String) -> String {
    if !s.contains('.') {
        s.push_str(".0");
    }
    s
}

/// `1.5e-5` -> `1.5E-5`, `1e10` -> `1.0E10`.
fn scientific(s: &str) -> String {
    let (mantissa, exponent) = s.split_once('e').unwrap_or((s, "0"));
    let mantissa = if mantissa.contains('.') {
        mantissa.to_string()
    } else {
        format!("{mantissa}.0")
    };
    format!("{mantissa}E{exponent}")
}

/// Render a `BigDecimal` like `BigDecimal.toString`: plain notation unless
/// the scale is negative or the adjusted exponent is below -6.
pub fn format_big_decimal(d: &BigDecimal) -> String {
    let (unscaled, scale) = d.as_bigint_and_exponent();
    let negative = unscaled.is_negative();
    let digits = unscaled.abs().to_string();
    let len = i64::try_from(digits.len()).unwrap_or(i64::MAX);
    let adjusted = -scale + (len - 1);

    let body = if scale == 0 {
        digits
    } else if scale > 0 && adjusted >= -6 {
        let scale_len = usize::try_from(scale).unwrap_or(usize::MAX);
        if digits.len() > scale_len {
            let (int_part, frac_part) = digits.split_at(digits.len() - scale_len);
            format!("{int_part}.{frac_part}")
        } else {
            let zeros = "0".repeat(scale_len - digits.len());
            format!("0.{zeros}{digits}")
        }
    } else {
        let (first, rest) = digits.split_at(1);
        let sign = if adjusted >= 0 { "+" } else { "" };
        if rest.is_empty() {
            format!("{first}E{sign}{adjusted}")
        } else {
            format!("{first}.{rest}E{sign}{adjusted}")
        }
    };

    if negative {
        format!("-{body}")
    } else {
        body
    }
}
