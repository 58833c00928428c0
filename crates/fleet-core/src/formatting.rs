use chrono::NaiveDate;

/// Placeholder shown wherever an optional reading is missing.
pub const MISSING: &str = "-";

/// Round `value` to `decimals` places, halves away from zero.
///
/// # Examples
///
/// ```
/// use fleet_core::formatting::round_to;
///
/// assert_eq!(round_to(7.0, 2), 7.0);
/// assert_eq!(round_to(2.345_678, 2), 2.35);
/// assert_eq!(round_to(-2.5, 0), -3.0);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Format a number with thousands separators and a fixed number of decimal
/// places.
///
/// # Examples
///
/// ```
/// use fleet_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let fixed = format!("{:.prec$}", value.abs(), prec = decimals as usize);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = group_thousands(int_part);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }

    // "-0.00" reads badly in a table; only keep the sign for non-zero output.
    let is_zero = out.chars().all(|c| matches!(c, '0' | '.' | ','));
    if value < 0.0 && !is_zero {
        format!("-{out}")
    } else {
        out
    }
}

/// Format a reading with its unit, e.g. `"7.00 L"`.
pub fn format_measure(value: f64, decimals: u32, unit: &str) -> String {
    format!("{} {}", format_number(value, decimals), unit)
}

/// Format an optional sensor reading, substituting [`MISSING`] for `None`.
///
/// # Examples
///
/// ```
/// use fleet_core::formatting::format_optional;
///
/// assert_eq!(format_optional(Some(92.345), 1), "92.3");
/// assert_eq!(format_optional(None, 1), "-");
/// ```
pub fn format_optional(value: Option<f64>, decimals: u32) -> String {
    match value {
        Some(v) => format_number(v, decimals),
        None => MISSING.to_string(),
    }
}

/// Short chart label for a date, e.g. `"May 14"`.
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    let len = s.len();
    let mut result = String::with_capacity(len + len / 3);
    for (i, c) in s.chars().enumerate() {
        if i != 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_half_away_from_zero() {
        // 1.125 is exact in binary, so the scaled value is a true half.
        assert_eq!(round_to(1.125, 2), 1.13);
        assert_eq!(round_to(-1.125, 2), -1.13);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(80.0, 2), 80.0);
    }

    #[test]
    fn test_format_number_zero() {
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_number(0.0, 2), "0.00");
    }

    #[test]
    fn test_format_number_no_thousands() {
        assert_eq!(format_number(123.456, 2), "123.46");
    }

    #[test]
    fn test_format_number_with_thousands() {
        assert_eq!(format_number(1_234.5, 1), "1,234.5");
        assert_eq!(format_number(1_234_567.0, 0), "1,234,567");
        assert_eq!(format_number(100_000.0, 0), "100,000");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-9_876.5, 1), "-9,876.5");
        assert_eq!(format_number(-0.001, 2), "0.00");
    }

    #[test]
    fn test_format_measure() {
        assert_eq!(format_measure(7.0, 2, "L"), "7.00 L");
        assert_eq!(format_measure(1_480.26, 1, "km"), "1,480.3 km");
    }

    #[test]
    fn test_format_optional_placeholder() {
        assert_eq!(format_optional(None, 0), MISSING);
        assert_eq!(format_optional(Some(1_234.0), 0), "1,234");
    }

    #[test]
    fn test_format_short_date() {
        let d = NaiveDate::from_ymd_opt(2023, 5, 4).unwrap();
        assert_eq!(format_short_date(d), "May 4");
    }
}
