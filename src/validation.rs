use lazy_static::lazy_static;
use regex::Regex;

use crate::error::AppError;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    static ref URL_RE: Regex = Regex::new(r"^https?://[^\s/$.?#][^\s]*$").unwrap();
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_url(url: &str) -> bool {
    URL_RE.is_match(url)
}

/// Trims and lowercases an address, rejecting malformed ones.
pub fn normalize_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(AppError::Validation(
            "Please enter a valid email address.".into(),
        ));
    }
    Ok(email)
}

/// Requires a non-blank value and returns it trimmed.
pub fn required(value: &str, field: &str) -> Result<String, AppError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(AppError::Validation(format!("{field} is required.")));
    }
    Ok(v.to_string())
}

/// Blank optional strings are stored as NULL.
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn char_len_between(value: &str, min: usize, max: usize, msg: &str) -> Result<(), AppError> {
    let n = value.chars().count();
    if n < min || n > max {
        return Err(AppError::Validation(msg.to_string()));
    }
    Ok(())
}

pub const MIN_PASSWORD_LEN: usize = 6;

/// Password + confirmation rules shared by sign-up and reset.
pub fn check_new_password(password: &str, confirm: &str) -> Result<(), AppError> {
    if password.is_empty() {
        return Err(AppError::Validation("Please create a password.".into()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(
            "Password must be at least 6 characters long.".into(),
        ));
    }
    if confirm.is_empty() {
        return Err(AppError::Validation("Please confirm your password.".into()));
    }
    if password != confirm {
        return Err(AppError::Validation("Passwords do not match.".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("ada@example.com"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada example@x.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email("  Ada@Example.COM ").unwrap(), "ada@example.com");
        assert!(normalize_email("nope").is_err());
    }

    #[test]
    fn url_pattern() {
        assert!(is_valid_url("https://discord.gg/rustaceans"));
        assert!(is_valid_url("http://localhost:3000/community"));
        assert!(!is_valid_url("discord.gg/rustaceans"));
        assert!(!is_valid_url("https:// spaced"));
    }

    #[test]
    fn optional_blanks_become_none() {
        assert_eq!(optional(Some("   ".into())), None);
        assert_eq!(optional(Some(" x ".into())), Some("x".into()));
        assert_eq!(optional(None), None);
    }

    #[test]
    fn password_rules() {
        assert!(check_new_password("secret1", "secret1").is_ok());
        assert!(check_new_password("short", "short").is_err());
        assert!(check_new_password("secret1", "secret2").is_err());
        assert!(check_new_password("secret1", "").is_err());
        assert!(check_new_password("", "").is_err());
    }

    #[test]
    fn length_bounds_count_chars() {
        assert!(char_len_between("Zoë", 2, 3, "bad").is_ok());
        assert!(char_len_between("Z", 2, 20, "bad").is_err());
    }
}
