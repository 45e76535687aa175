//! Common validation utilities.

use validator::ValidationError;

/// Maximum length accepted for a client-chosen field identifier.
pub const MAX_FIELD_ID_LEN: usize = 191;

/// Validates a `#rgb` / `#rrggbb` hex color string.
pub fn validate_hex_color(value: &str) -> Result<(), ValidationError> {
    let hex = match value.strip_prefix('#') {
        Some(h) => h,
        None => {
            let mut err = ValidationError::new("hex_color");
            err.message = Some("Color must start with '#'".into());
            return Err(err);
        }
    };

    if (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("hex_color");
        err.message = Some("Color must be a 3 or 6 digit hex value".into());
        Err(err)
    }
}

/// Validates a CSS width such as `100%`, `50%`, or `240px`.
pub fn validate_css_width(value: &str) -> Result<(), ValidationError> {
    let digits = value
        .strip_suffix('%')
        .or_else(|| value.strip_suffix("px"))
        .unwrap_or("");

    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("css_width");
        err.message = Some("Width must be a number followed by '%' or 'px'".into());
        Err(err)
    }
}

/// Validates a client-chosen field identifier: non-empty and within the
/// column width of the fields table.
pub fn validate_field_id(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.len() > MAX_FIELD_ID_LEN {
        let mut err = ValidationError::new("field_id");
        err.message = Some("Field id must be 1-191 characters".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_hex_color() {
        assert!(validate_hex_color("#fff").is_ok());
        assert!(validate_hex_color("#374151").is_ok());
        assert!(validate_hex_color("#D1D5DB").is_ok());
        assert!(validate_hex_color("374151").is_err());
        assert!(validate_hex_color("#37415").is_err());
        assert!(validate_hex_color("#gggggg").is_err());
        assert!(validate_hex_color("#").is_err());
    }

    #[test]
    fn test_validate_hex_color_error_message() {
        let err = validate_hex_color("red").unwrap_err();
        assert_eq!(err.message.unwrap().to_string(), "Color must start with '#'");
    }

    #[test]
    fn test_validate_css_width() {
        assert!(validate_css_width("100%").is_ok());
        assert!(validate_css_width("50%").is_ok());
        assert!(validate_css_width("240px").is_ok());
        assert!(validate_css_width("%").is_err());
        assert!(validate_css_width("abc").is_err());
        assert!(validate_css_width("100").is_err());
        assert!(validate_css_width("").is_err());
    }

    #[test]
    fn test_validate_field_id() {
        assert!(validate_field_id("name").is_ok());
        assert!(validate_field_id("field-1700000000000").is_ok());
        assert!(validate_field_id("").is_err());
        assert!(validate_field_id(&"x".repeat(192)).is_err());
        assert!(validate_field_id(&"x".repeat(191)).is_ok());
    }
}
