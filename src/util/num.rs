/// Significant digits used when printing results.
pub const PRINT_PRECISION: usize = 4;
/// Minimum field width used when printing results.
pub const PRINT_WIDTH: usize = 4;

/// Formats a value like C's `printf("%W.Pg", value)`.
///
/// The value is rounded to `precision` significant digits. If the decimal
/// exponent of the rounded value is below `-4` or at least `precision`,
/// scientific notation with a signed, two-digit minimum exponent is used;
/// otherwise fixed notation. Trailing zeros in the fraction are removed, and
/// the result is right-aligned in a field of at least `width` characters.
///
/// A precision of `0` is treated as `1`.
///
/// ## Example
/// ```
/// use dynacalc::util::num::format_general;
///
/// assert_eq!(format_general(5.0, 4, 4), "   5");
/// assert_eq!(format_general(3.14159, 4, 4), "3.142");
/// assert_eq!(format_general(123_456.0, 4, 4), "1.235e+05");
/// assert_eq!(format_general(f64::INFINITY, 4, 4), " inf");
/// ```
#[must_use]
pub fn format_general(value: f64, precision: usize, width: usize) -> String {
    let body = general_body(value, precision.max(1));
    format!("{body:>width$}")
}

/// Formats a value for the `print` builtin and the session echo.
///
/// ## Example
/// ```
/// use dynacalc::util::num::format_result;
///
/// assert_eq!(format_result(120.0), " 120");
/// assert_eq!(format_result(2.0 / 3.0), "0.6667");
/// ```
#[must_use]
pub fn format_result(value: f64) -> String {
    format_general(value, PRINT_PRECISION, PRINT_WIDTH)
}

fn general_body(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return if value.is_sign_negative() { "-nan" } else { "nan" }.to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }

    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let max_exponent = i32::try_from(precision).unwrap_or(i32::MAX);

    if exponent < -4 || exponent >= max_exponent {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exponent.unsigned_abs())
    } else {
        let decimals = usize::try_from(max_exponent - 1 - exponent).unwrap_or(0);
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

/// Removes trailing zeros after the decimal point, and the point itself if
/// nothing follows it.
fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}
