use time::OffsetDateTime;

use crate::{
    auth::{password::verify_password, repo_types::PasswordReset},
    error::AppError,
    mail::Mailer,
};

pub const RESET_MAIL_SUBJECT: &str = "Password Reset OTP";

pub fn reset_mail_body(otp: &str, ttl_minutes: i64) -> String {
    format!("Your OTP code is {otp}. It will expire in {ttl_minutes} minutes.")
}

pub async fn send_reset_code(
    mailer: &dyn Mailer,
    email: &str,
    otp: &str,
    ttl_minutes: i64,
) -> anyhow::Result<()> {
    mailer
        .send(email, RESET_MAIL_SUBJECT, &reset_mail_body(otp, ttl_minutes))
        .await
}

fn otp_mismatch() -> AppError {
    AppError::Validation("OTP does not match. Please check your input.".into())
}

/// Checks a submitted code against the stored reset. A missing reset gets
/// the same answer as a wrong code.
pub fn check_reset_code(
    reset: Option<&PasswordReset>,
    otp: &str,
    now: OffsetDateTime,
) -> Result<(), AppError> {
    let reset = reset.ok_or_else(otp_mismatch)?;
    if reset.is_expired(now) {
        return Err(AppError::Validation(
            "OTP has expired. Please request a new one.".into(),
        ));
    }
    if !verify_password(otp.trim(), &reset.otp_hash)? {
        return Err(otp_mismatch());
    }
    Ok(())
}
