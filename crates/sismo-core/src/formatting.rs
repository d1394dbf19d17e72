/// Spanish month abbreviations used on chart axes, January first.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Ene.", "Feb.", "Mar.", "Abr.", "May.", "Jun.", "Jul.", "Ago.", "Sep.", "Oct.", "Nov.", "Dic.",
];

/// Abbreviation for a calendar month (`1..=12`). Out-of-range months yield `""`.
///
/// # Examples
///
/// ```
/// use sismo_core::formatting::month_abbreviation;
///
/// assert_eq!(month_abbreviation(1), "Ene.");
/// assert_eq!(month_abbreviation(12), "Dic.");
/// assert_eq!(month_abbreviation(13), "");
/// ```
pub fn month_abbreviation(month: u32) -> &'static str {
    match month {
        1..=12 => MONTH_ABBREVIATIONS[(month - 1) as usize],
        _ => "",
    }
}

/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use sismo_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Nudge by a relative epsilon so exact midpoints round away from zero.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    let grouped = group_thousands(&integer_part.to_string());

    let result = if decimals == 0 {
        grouped
    } else {
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        // `frac_str` looks like "0.50"; keep ".50".
        format!("{}{}", grouped, &frac_str[1..])
    };

    if negative {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a count with thousands separators.
///
/// ```
/// use sismo_core::formatting::format_count;
///
/// assert_eq!(format_count(12_345), "12,345");
/// ```
pub fn format_count(count: u64) -> String {
    group_thousands(&count.to_string())
}

/// Magnitudes are published with one decimal; always show it (`7.0`, not `7`).
pub fn format_magnitude(magnitude: f64) -> String {
    format_number(magnitude, 1)
}

/// `"1 sismo"` for exactly one event, `"N sismos"` otherwise.
///
/// # Examples
///
/// ```
/// use sismo_core::formatting::pluralize_sismos;
///
/// assert_eq!(pluralize_sismos(1), "1 sismo");
/// assert_eq!(pluralize_sismos(0), "0 sismos");
/// assert_eq!(pluralize_sismos(3), "3 sismos");
/// ```
pub fn pluralize_sismos(count: u64) -> String {
    if count == 1 {
        format!("{count} sismo")
    } else {
        format!("{count} sismos")
    }
}

/// Share of `count` in `total` as a percentage rounded to `decimal_places`.
/// An empty total gives `0.0`.
///
/// ```
/// use sismo_core::formatting::percentage;
///
/// assert_eq!(percentage(50, 200, 1), 25.0);
/// assert_eq!(percentage(0, 0, 2), 0.0);
/// ```
pub fn percentage(count: u64, total: u64, decimal_places: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let factor = 10_f64.powi(decimal_places as i32);
    (count as f64 * 100.0 / total as f64 * factor).round() / factor
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
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
    fn test_month_abbreviations_cover_year() {
        let labels: Vec<&str> = (1..=12).map(month_abbreviation).collect();
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0], "Ene.");
        assert_eq!(labels[7], "Ago.");
        assert_eq!(month_abbreviation(0), "");
    }

    #[test]
    fn test_format_number_zero() {
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_number(0.0, 2), "0.00");
    }

    #[test]
    fn test_format_number_with_thousands() {
        assert_eq!(format_number(1_234.5, 1), "1,234.5");
    }

    #[test]
    fn test_format_number_exact_thousands() {
        assert_eq!(format_number(1_000.0, 0), "1,000");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_magnitude_keeps_decimal() {
        assert_eq!(format_magnitude(7.0), "7.0");
        assert_eq!(format_magnitude(8.2), "8.2");
    }

    #[test]
    fn test_pluralize_singular() {
        assert_eq!(pluralize_sismos(1), "1 sismo");
    }

    #[test]
    fn test_pluralize_plural_branches() {
        assert_eq!(pluralize_sismos(0), "0 sismos");
        assert_eq!(pluralize_sismos(2), "2 sismos");
        assert_eq!(pluralize_sismos(150), "150 sismos");
    }

    #[test]
    fn test_percentage_zero_whole() {
        assert_eq!(percentage(10, 0, 2), 0.0);
    }

    #[test]
    fn test_percentage_rounding() {
        let p = percentage(1, 3, 2);
        assert!((p - 33.33).abs() < 1e-2, "percentage = {p}");
    }
}
