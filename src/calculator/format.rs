//! Display formatting.
//!
//! The display is a fixed-width window: results are cut to [`MAX_DIGITS`]
//! characters, never rounded.

use super::error::CalcError;

/// Width of the display, in characters.
pub const MAX_DIGITS: usize = 12;

/// Format a value for the display.
///
/// Integral values lose their decimal point, everything else uses the
/// shortest decimal rendering that round-trips. Either way the text is
/// truncated to [`MAX_DIGITS`] characters.
pub fn format_number(value: f64) -> String {
    let formatted = if value.fract() == 0.0 {
        if value == 0.0 {
            // -0 shows as 0
            "0".to_string()
        } else {
            format!("{value:.0}")
        }
    } else {
        format!("{value}")
    };

    truncate(formatted)
}

/// Read the display back as a number.
pub fn parse_display(text: &str) -> Result<f64, CalcError> {
    text.parse::<f64>().map_err(|_| CalcError::InvalidDisplay {
        text: text.to_string(),
    })
}

fn truncate(mut text: String) -> String {
    if let Some((idx, _)) = text.char_indices().nth(MAX_DIGITS) {
        text.truncate(idx);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_have_no_point() {
        assert_eq!(format_number(7.0), "7");
        assert_eq!(format_number(-42.0), "-42");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_decimals() {
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-0.125), "-0.125");
    }

    #[test]
    fn test_truncates_not_rounds() {
        // 2/3 would round up to ...67
        assert_eq!(format_number(2.0 / 3.0), "0.6666666666");
        assert_eq!(format_number(1.0 / 3.0), "0.3333333333");
        assert_eq!(format_number(1.0 / 3.0).len(), MAX_DIGITS);
    }

    #[test]
    fn test_large_integers_truncated() {
        assert_eq!(format_number(1e20), "100000000000");
        assert_eq!(format_number(123456789012345.0), "123456789012");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_number(f64::INFINITY), "inf");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_parse_display() {
        assert_eq!(parse_display("12.5").unwrap(), 12.5);
        assert_eq!(parse_display("-0.").unwrap(), 0.0);
        assert_eq!(parse_display("12345678901.").unwrap(), 12345678901.0);
        assert!(matches!(
            parse_display("-"),
            Err(CalcError::InvalidDisplay { .. })
        ));
    }
}
