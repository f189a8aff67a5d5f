use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::warn;
use uuid::Uuid;

use super::jwt::JwtKeys;
use crate::error::AppError;

pub const NO_TOKEN: &str = "No token provided";
pub const INVALID_TOKEN: &str = "Invalid token";

/// Extracts and validates the bearer JWT, yielding the user ID.
pub struct AuthUser(pub Uuid);

/// `Authorization: Bearer <token>` → `<token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    Some(token)
}

/// Bad signature, malformed structure and expiry all collapse to one error.
pub fn authorize(headers: &HeaderMap, keys: &JwtKeys) -> Result<Uuid, AppError> {
    let token = bearer_token(headers).ok_or_else(|| AppError::auth(NO_TOKEN))?;
    match keys.verify(token) {
        Ok(claims) => Ok(claims.sub),
        Err(e) => {
            warn!(reason = ?e.kind(), "bearer token rejected");
            Err(AppError::auth(INVALID_TOKEN))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        authorize(&parts.headers, &keys).map(AuthUser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use axum::http::HeaderValue;
    use time::{Duration, OffsetDateTime};

    fn keys() -> JwtKeys {
        JwtKeys::new(&JwtConfig {
            secret: "guard-secret".into(),
            issuer: "iss".into(),
            audience: "aud".into(),
            ttl_minutes: 60 * 24,
        })
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(AUTHORIZATION, HeaderValue::from_str(value).expect("header"));
        h
    }

    fn message(err: AppError) -> String {
        match err {
            AppError::Auth(m) => m,
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[test]
    fn bearer_token_parsing() {
        assert_eq!(bearer_token(&headers_with("Bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers_with("bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers_with("Bearer   abc ")), Some("abc"));
        assert_eq!(bearer_token(&headers_with("Bearer")), None);
        assert_eq!(bearer_token(&headers_with("Bearer  ")), None);
        assert_eq!(bearer_token(&headers_with("Basic abc")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn missing_header_means_no_token() {
        let err = authorize(&HeaderMap::new(), &keys()).unwrap_err();
        assert_eq!(message(err), NO_TOKEN);
    }

    #[test]
    fn valid_token_yields_user_id() {
        let keys = keys();
        let user_id = Uuid::new_v4();
        let token = keys.sign(user_id).expect("sign");
        let got = authorize(&headers_with(&format!("Bearer {token}")), &keys).expect("authorized");
        assert_eq!(got, user_id);
    }

    #[test]
    fn every_verification_failure_looks_the_same() {
        let keys = keys();
        let other = JwtKeys::new(&JwtConfig {
            secret: "other-secret".into(),
            issuer: "iss".into(),
            audience: "aud".into(),
            ttl_minutes: 60,
        });
        let expired = keys
            .sign_at(Uuid::new_v4(), OffsetDateTime::now_utc() - Duration::days(2))
            .expect("sign");
        let foreign = other.sign(Uuid::new_v4()).expect("sign");

        for token in [expired.as_str(), foreign.as_str(), "not.a.jwt"] {
            let err = authorize(&headers_with(&format!("Bearer {token}")), &keys).unwrap_err();
            assert_eq!(message(err), INVALID_TOKEN);
        }
    }
}
