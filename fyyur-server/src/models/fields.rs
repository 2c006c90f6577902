//! Field-level checks shared by the venue, artist and show forms
//!
//! Each helper takes the raw submitted value and either returns the cleaned
//! value or a `ValidationError` naming the field.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Column width for city, state, address, phone and facebook links
pub const MAX_SHORT_TEXT_LEN: usize = 120;

/// Column width for website links
pub const MAX_WEBSITE_LEN: usize = 300;

/// Column width for image links
pub const MAX_IMAGE_LINK_LEN: usize = 500;

/// Digits with optional leading `+` and common separators.
/// Must start and end with a digit, 7..=20 characters overall.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9][0-9 ().-]{5,17}[0-9]$").expect("invalid phone regex")
});

/// Two-letter state code (stored upper-case)
static STATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}$").expect("invalid state regex"));

/// Trim a required value, rejecting missing or blank input.
pub fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_owned()),
        _ => Err(ValidationError::Empty { field }),
    }
}

/// Trim an optional value; blank input becomes `None`.
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Enforce a maximum length in characters.
pub fn bounded(field: &'static str, value: String, max: usize) -> Result<String, ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(value)
}

/// Required, bounded, phone-shaped value.
pub fn phone(value: Option<String>) -> Result<String, ValidationError> {
    let value = bounded("phone", required("phone", value)?, MAX_SHORT_TEXT_LEN)?;
    if !PHONE_RE.is_match(&value) {
        return Err(ValidationError::InvalidFormat {
            field: "phone",
            reason: "must be a phone number such as 415-000-1234",
        });
    }
    Ok(value)
}

/// Required two-letter state code, normalized to upper-case.
pub fn state(value: Option<String>) -> Result<String, ValidationError> {
    let value = required("state", value)?.to_uppercase();
    if !STATE_RE.is_match(&value) {
        return Err(ValidationError::InvalidFormat {
            field: "state",
            reason: "must be a two-letter state code",
        });
    }
    Ok(value)
}

/// Optional absolute http(s) link.
pub fn link(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    let Some(value) = optional(value) else {
        return Ok(None);
    };
    let value = bounded(field, value, max)?;

    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !host.contains(char::is_whitespace) => Ok(Some(value)),
        _ => Err(ValidationError::InvalidFormat {
            field,
            reason: "must be an http:// or https:// URL",
        }),
    }
}

/// HTML checkbox semantics: present with a truthy value means checked.
pub fn checkbox(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("y" | "yes" | "on" | "true" | "1")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(required("name", Some("  Hop ".into())).unwrap(), "Hop");
        assert!(matches!(
            required("name", Some("   ".into())),
            Err(ValidationError::Empty { field: "name" })
        ));
        assert!(required("name", None).is_err());
    }

    #[test]
    fn optional_drops_blank() {
        assert_eq!(optional(Some(" ".into())), None);
        assert_eq!(optional(Some(" x ".into())).as_deref(), Some("x"));
    }

    #[test]
    fn phone_formats() {
        assert!(phone(Some("123-123-1234".into())).is_ok());
        assert!(phone(Some("+1 (415) 000 1234".into())).is_ok());
        assert!(phone(Some("914.003.1132".into())).is_ok());

        assert!(matches!(
            phone(Some("call me".into())),
            Err(ValidationError::InvalidFormat { field: "phone", .. })
        ));
        assert!(matches!(phone(Some("12345".into())), Err(ValidationError::InvalidFormat { .. })));
        assert!(matches!(phone(None), Err(ValidationError::Empty { field: "phone" })));
    }

    #[test]
    fn state_is_uppercased() {
        assert_eq!(state(Some("ca".into())).unwrap(), "CA");
        assert!(state(Some("California".into())).is_err());
    }

    #[test]
    fn links() {
        assert_eq!(
            link("website", Some("https://www.themusicalhop.com".into()), MAX_WEBSITE_LEN).unwrap(),
            Some("https://www.themusicalhop.com".to_owned())
        );
        assert_eq!(link("website", Some("".into()), MAX_WEBSITE_LEN).unwrap(), None);
        assert!(link("website", Some("www.example.com".into()), MAX_WEBSITE_LEN).is_err());
        assert!(link("website", Some("https://".into()), MAX_WEBSITE_LEN).is_err());

        let long = format!("https://{}", "a".repeat(MAX_WEBSITE_LEN));
        assert!(matches!(
            link("website", Some(long), MAX_WEBSITE_LEN),
            Err(ValidationError::TooLong { max: MAX_WEBSITE_LEN, .. })
        ));
    }

    #[test]
    fn checkbox_values() {
        assert!(checkbox(Some("y")));
        assert!(checkbox(Some("True")));
        assert!(checkbox(Some("on")));
        assert!(!checkbox(Some("n")));
        assert!(!checkbox(None));
    }
}
