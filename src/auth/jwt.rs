use std::time::Duration;

use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, warn};
use uuid::Uuid;

use super::claims::{Claims, Role, TokenKind};
use crate::{config::JwtConfig, error::AppError, state::AppState};

/// Holds JWT signing and verification keys with config data.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig {
            secret,
            issuer,
            audience,
            ttl_minutes,
            refresh_ttl_minutes,
        } = state.config.jwt.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            audience,
            access_ttl: Duration::from_secs((ttl_minutes.max(0) as u64) * 60),
            refresh_ttl: Duration::from_secs((refresh_ttl_minutes.max(0) as u64) * 60),
        }
    }
}

/// A freshly issued access/refresh pair.
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl JwtKeys {
    fn sign_with_kind(&self, sub: Uuid, role: Role, kind: TokenKind) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let exp = now + TimeDuration::seconds(ttl.as_secs() as i64);
        let claims = Claims {
            sub,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            kind,
            role,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(sub = %sub, role = ?role, kind = ?kind, "jwt signed");
        Ok(token)
    }

    pub fn sign_access(&self, sub: Uuid, role: Role) -> anyhow::Result<String> {
        self.sign_with_kind(sub, role, TokenKind::Access)
    }

    pub fn sign_refresh(&self, sub: Uuid, role: Role) -> anyhow::Result<String> {
        self.sign_with_kind(sub, role, TokenKind::Refresh)
    }

    pub fn issue_pair(&self, sub: Uuid, role: Role) -> anyhow::Result<TokenPair> {
        Ok(TokenPair {
            access_token: self.sign_access(sub, role)?,
            refresh_token: self.sign_refresh(sub, role)?,
        })
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(sub = %data.claims.sub, kind = ?data.claims.kind, "jwt verified");
        Ok(data.claims)
    }

    pub fn verify_refresh(&self, token: &str) -> anyhow::Result<Claims> {
        let claims = self.verify(token)?;
        if claims.kind != TokenKind::Refresh {
            anyhow::bail!("not a refresh token");
        }
        Ok(claims)
    }
}

/// Reads `Authorization: Bearer <token>` and returns verified access claims.
fn access_claims(parts: &Parts, keys: &JwtKeys) -> Result<Claims, AppError> {
    let auth_header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .or_else(|| auth_header.strip_prefix("bearer "))
        .ok_or_else(|| AppError::Unauthorized("Invalid Authorization header".into()))?;

    let claims = keys.verify(token).map_err(|_| {
        warn!("invalid or expired token");
        AppError::Unauthorized("Invalid or expired token".into())
    })?;

    if claims.kind != TokenKind::Access {
        return Err(AppError::Unauthorized("Access token required".into()));
    }
    Ok(claims)
}

/// The signed-in end user. Admin tokens are rejected.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let claims = access_claims(parts, &keys)?;
        if claims.role != Role::User {
            return Err(AppError::Unauthorized("Please log in to continue.".into()));
        }
        Ok(AuthUser(claims.sub))
    }
}

/// The signed-in administrator. User tokens get 403.
pub struct AdminUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let claims = access_claims(parts, &keys)?;
        if claims.role != Role::Admin {
            warn!(sub = %claims.sub, "non-admin token on admin route");
            return Err(AppError::Forbidden);
        }
        Ok(AdminUser(claims.sub))
    }
}
