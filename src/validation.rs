//! Format checks for free-text answers.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

/// `localpart@domain.tld`: one `@`, a dot after it, no whitespace.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Validate an email address. Empty input is reported as missing.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Validate an optional URL. Empty input is accepted; anything else must
/// parse as an absolute URL.
pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    if url.is_empty() {
        return Ok(());
    }
    url::Url::parse(url)
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidUrl)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_email_is_required() {
        let err = validate_email("").unwrap_err();
        assert_eq!(err, ValidationError::EmailRequired);
        assert!(err.to_string().contains("required"));
    }

    #[test]
    fn email_without_tld_is_invalid() {
        assert_eq!(validate_email("a@b"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("foo"), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn email_rejects_whitespace_and_extra_at() {
        assert!(validate_email("a b@c.com").is_err());
        assert!(validate_email("a@b .com").is_err());
        assert!(validate_email("a@@b.com").is_err());
        assert!(validate_email(" a@b.com").is_err());
    }

    #[test]
    fn well_formed_emails_pass() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("foo@bar.com").is_ok());
        assert!(validate_email("first.last+tag@mail.example.co.uk").is_ok());
    }

    #[test]
    fn empty_url_is_optional() {
        assert!(validate_url("").is_ok());
    }

    #[test]
    fn url_must_be_absolute() {
        assert_eq!(validate_url("not a url"), Err(ValidationError::InvalidUrl));
        assert_eq!(validate_url("example.com"), Err(ValidationError::InvalidUrl));
        assert_eq!(
            validate_url("not a url").unwrap_err().to_string(),
            "Please enter a valid URL"
        );
    }

    #[test]
    fn absolute_urls_pass() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://localhost:8080/path?q=1").is_ok());
    }
}
