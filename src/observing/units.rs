//! Unit-aware formatting of grid values.

const METERS_PER_MILE: f64 = 1609.344;

/// Format a visibility reading for display.
///
/// NWS reports visibility in meters (`wmoUnit:m`). Long distances read
/// naturally in miles, short ones in kilometers:
/// at least ten miles renders as whole miles, at least one mile as miles to
/// one decimal, anything shorter as kilometers to one decimal. A null value
/// renders as `unknown`; an unrecognized unit passes the raw number through
/// with no suffix rather than mislabeling it.
pub fn format_visibility(value: Option<f64>, uom: Option<&str>) -> String {
    let Some(meters) = value else {
        return "unknown".to_string();
    };
    if !uom.is_some_and(is_meters) {
        return format!("{meters}");
    }

    let miles = meters / METERS_PER_MILE;
    if miles >= 10.0 {
        format!("{miles:.0} mi")
    } else if miles >= 1.0 {
        format!("{miles:.1} mi")
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

fn is_meters(uom: &str) -> bool {
    uom == "m" || uom.ends_with(":m")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_visibility_in_whole_miles() {
        assert_eq!(format_visibility(Some(32_000.0), Some("wmoUnit:m")), "20 mi");
    }

    #[test]
    fn medium_visibility_in_decimal_miles() {
        assert_eq!(format_visibility(Some(16_000.0), Some("wmoUnit:m")), "9.9 mi");
    }

    #[test]
    fn short_visibility_in_kilometers() {
        assert_eq!(format_visibility(Some(500.0), Some("wmoUnit:m")), "0.5 km");
    }

    #[test]
    fn missing_value_is_unknown() {
        assert_eq!(format_visibility(None, Some("wmoUnit:m")), "unknown");
        assert_eq!(format_visibility(None, None), "unknown");
    }

    #[test]
    fn unrecognized_unit_passes_raw_value() {
        assert_eq!(format_visibility(Some(42.0), Some("wmoUnit:km")), "42");
        assert_eq!(format_visibility(Some(42.0), None), "42");
    }

    #[test]
    fn bare_meters_unit_is_recognized() {
        assert_eq!(format_visibility(Some(16_093.44), Some("m")), "10 mi");
    }
}
