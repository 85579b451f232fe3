use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

/// Credentials for the admin account created at startup when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminBootstrap {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub otp_ttl_minutes: i64,
    pub mail_sender: String,
    pub admin_bootstrap: Option<AdminBootstrap>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "pathway".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "pathway-users".into()),
            ttl_minutes: env_i64("JWT_TTL_MINUTES").unwrap_or(60),
            refresh_ttl_minutes: env_i64("JWT_REFRESH_TTL_MINUTES").unwrap_or(60 * 24 * 14),
        };
        let otp_ttl_minutes = env_i64("OTP_TTL_MINUTES").unwrap_or(10);
        let mail_sender = std::env::var("MAIL_DEFAULT_SENDER")
            .unwrap_or_else(|_| "noreply@pathway.com".into());

        let admin_bootstrap = match (
            std::env::var("ADMIN_EMAIL").ok(),
            std::env::var("ADMIN_PASSWORD").ok(),
        ) {
            (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
                Some(AdminBootstrap { email, password })
            }
            _ => None,
        };

        Ok(Self {
            database_url,
            jwt,
            otp_ttl_minutes,
            mail_sender,
            admin_bootstrap,
        })
    }
}

fn env_i64(key: &str) -> Option<i64> {
    std::env::var(key).ok().and_then(|v| v.parse::<i64>().ok())
}
