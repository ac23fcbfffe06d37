use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::config::session::SessionSettings;

/// Name of the session cookie holding the signed token.
pub const SESSION_COOKIE: &str = "session";

/// Claims carried inside the signed session cookie.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // Subject (user id)
    pub iat: usize,  // Issued at (as UTC timestamp)
    pub exp: usize,  // Expiration time (as UTC timestamp)
}

impl Claims {
    /// Parse the user ID from the claims subject field.
    /// Returns None if it is not a valid integer id.
    pub fn user_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }
}

pub fn issue_session_token(
    user_id: i32,
    settings: &SessionSettings,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(settings.expiration_hours);

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp() as usize,
        exp: expires_at.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.secret.expose_secret().as_bytes()),
    )
}

pub fn verify_session_token(
    token: &str,
    settings: &SessionSettings,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.secret.expose_secret().as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;
    Ok(token_data.claims)
}

/// Build the session cookie set on login and signup.
pub fn session_cookie(token: String, settings: &SessionSettings) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::hours(settings.expiration_hours))
        .finish()
}

/// Build the expired cookie that clears the session on logout.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SessionSettings {
        SessionSettings::new("test-secret".into(), 24)
    }

    #[test]
    fn issue_then_verify_returns_same_user() {
        let settings = settings();
        let token = issue_session_token(42, &settings).expect("sign token");
        let claims = verify_session_token(&token, &settings).expect("verify token");
        assert_eq!(claims.user_id(), Some(42));
    }

    #[test]
    fn verify_rejects_token_signed_with_other_secret() {
        let token = issue_session_token(1, &settings()).expect("sign token");
        let other = SessionSettings::new("other-secret".into(), 24);
        assert!(verify_session_token(&token, &other).is_err());
    }

    #[test]
    fn verify_rejects_garbage() {
        assert!(verify_session_token("not-a-token", &settings()).is_err());
    }

    #[test]
    fn session_cookie_is_http_only() {
        let settings = settings();
        let token = issue_session_token(7, &settings).expect("sign token");
        let cookie = session_cookie(token, &settings);
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
    }
}
