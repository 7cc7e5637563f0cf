use crate::types::{AppEnvironment, SessionContext};
use axum_extra::extract::cookie::{Cookie, SameSite};
use base64::engine::general_purpose::URL_SAFE_NO_PAD as BASE64_URL;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

pub const SESSION_VALIDITY_DAYS: i64 = 7;

#[derive(Serialize, Deserialize, Debug)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

pub enum Error {
    /// No signing secret configured. An operator problem, never a user one.
    MissingSecret,
    InvalidToken,
    ExpiredToken,
}

type Result<T> = std::result::Result<T, Error>;

fn sign(secret: &str, payload: &str) -> Result<String> {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).map_err(|_| Error::MissingSecret)?;
    mac.update(payload.as_bytes());

    Ok(BASE64_URL.encode(mac.finalize().into_bytes()))
}

/// Mints a signed session token asserting `phone` as subject, valid for
/// seven days.
pub fn mint(session: &SessionContext, phone: &str) -> Result<String> {
    let secret = session
        .signing_secret
        .as_ref()
        .ok_or(Error::MissingSecret)?;

    let now = Utc::now();
    let claims = Claims {
        sub: phone.to_string(),
        iat: now.timestamp(),
        exp: (now + chrono::Duration::days(SESSION_VALIDITY_DAYS)).timestamp(),
    };

    let payload =
        BASE64_URL.encode(serde_json::to_vec(&claims).map_err(|_| Error::InvalidToken)?);
    let signature = sign(secret, &payload)?;

    Ok(format!("{}.{}", payload, signature))
}

pub fn verify(session: &SessionContext, token: &str) -> Result<Claims> {
    let secret = session
        .signing_secret
        .as_ref()
        .ok_or(Error::MissingSecret)?;

    let (payload, signature) = token.split_once('.').ok_or(Error::InvalidToken)?;

    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).map_err(|_| Error::MissingSecret)?;
    mac.update(payload.as_bytes());

    let signature = BASE64_URL
        .decode(signature)
        .map_err(|_| Error::InvalidToken)?;
    mac.verify_slice(&signature).map_err(|_| Error::InvalidToken)?;

    let claims = BASE64_URL
        .decode(payload)
        .ok()
        .and_then(|bytes| serde_json::from_slice::<Claims>(&bytes).ok())
        .ok_or(Error::InvalidToken)?;

    if claims.exp < Utc::now().timestamp() {
        return Err(Error::ExpiredToken);
    }

    Ok(claims)
}

/// Builds the session cookie: HTTP-only, SameSite=Lax, Secure in
/// production, path `/`, max-age seven days.
pub fn session_cookie(
    session: &SessionContext,
    environment: &AppEnvironment,
    token: String,
) -> Cookie<'static> {
    Cookie::build((session.cookie_name.clone(), token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(matches!(environment, AppEnvironment::Production))
        .path("/")
        .max_age(time::Duration::days(SESSION_VALIDITY_DAYS))
        .build()
}

/// Cookie used by logout to clear the session (max-age 0).
pub fn removal_cookie(session: &SessionContext) -> Cookie<'static> {
    Cookie::build((session.cookie_name.clone(), ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SessionContext {
        SessionContext {
            signing_secret: Some("test-secret".to_string()),
            cookie_name: "vf_session".to_string(),
        }
    }

    #[test]
    fn minted_token_verifies_with_phone_subject() {
        let session = session();

        let token = mint(&session, "966512345678").ok().unwrap();
        let claims = verify(&session, &token).ok().unwrap();

        assert_eq!(claims.sub, "966512345678");
        assert!(claims.exp - claims.iat == SESSION_VALIDITY_DAYS * 24 * 60 * 60);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let session = session();
        let token = mint(&session, "966512345678").ok().unwrap();

        let (payload, _) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", payload, "AAAA");

        assert!(matches!(verify(&session, &forged), Err(Error::InvalidToken)));
        assert!(matches!(verify(&session, "garbage"), Err(Error::InvalidToken)));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = mint(&session(), "966512345678").ok().unwrap();

        let other = SessionContext {
            signing_secret: Some("other-secret".to_string()),
            cookie_name: "vf_session".to_string(),
        };

        assert!(matches!(verify(&other, &token), Err(Error::InvalidToken)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let session = session();
        let secret = session.signing_secret.as_deref().unwrap();

        let claims = Claims {
            sub: "966512345678".to_string(),
            iat: Utc::now().timestamp() - 120,
            exp: Utc::now().timestamp() - 60,
        };
        let payload = BASE64_URL.encode(serde_json::to_vec(&claims).unwrap());
        let token = format!("{}.{}", payload, sign(secret, &payload).ok().unwrap());

        assert!(matches!(verify(&session, &token), Err(Error::ExpiredToken)));
    }

    #[test]
    fn missing_secret_is_a_distinct_error() {
        let unconfigured = SessionContext {
            signing_secret: None,
            cookie_name: "vf_session".to_string(),
        };

        assert!(matches!(
            mint(&unconfigured, "966512345678"),
            Err(Error::MissingSecret)
        ));
    }

    #[test]
    fn cookie_attributes_follow_environment() {
        let session = session();

        let dev = session_cookie(
            &session,
            &AppEnvironment::Development,
            "token".to_string(),
        );
        assert_eq!(dev.http_only(), Some(true));
        assert_eq!(dev.same_site(), Some(SameSite::Lax));
        assert_eq!(dev.secure(), Some(false));
        assert_eq!(dev.path(), Some("/"));

        let prod = session_cookie(&session, &AppEnvironment::Production, "token".to_string());
        assert_eq!(prod.secure(), Some(true));

        let removal = removal_cookie(&session);
        assert_eq!(removal.max_age(), Some(time::Duration::ZERO));
    }
}
