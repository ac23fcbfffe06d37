use actix_web::{web, HttpResponse};
use secrecy::ExposeSecret;
use serde_json::json;
use sqlx::PgPool;

use crate::auth::session::{
    issue_session_token, removal_cookie, session_cookie, Claims,
};
use crate::config::session::SessionSettings;
use crate::db::users::{find_user_by_email, find_user_by_id, insert_user};
use crate::errors::{is_unique_violation, ApiError};
use crate::models::user::{LoginRequest, SignupRequest, UserResponse};
use crate::utils::password::{hash_password, verify_password};

/// Treat absent and empty strings the same way for presence checks.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[tracing::instrument(name = "Signing up a new user", skip(signup_form, pool, session_settings))]
pub async fn signup_user(
    signup_form: web::Json<SignupRequest>,
    pool: web::Data<PgPool>,
    session_settings: web::Data<SessionSettings>,
) -> Result<HttpResponse, ApiError> {
    let email = present(signup_form.email.as_deref());
    let password = signup_form
        .password
        .as_ref()
        .map(|p| p.expose_secret())
        .filter(|p| !p.is_empty());

    let (email, password) = match (email, password) {
        (Some(email), Some(password)) => (email, password),
        _ => {
            return Err(ApiError::Validation(
                "Email and password are required".into(),
            ))
        }
    };

    // Best-effort pre-check; the unique constraint below is the real guard
    if find_user_by_email(&pool, email).await?.is_some() {
        return Err(ApiError::Conflict("Email already registered".into()));
    }

    let password_hash = hash_password(password).map_err(ApiError::internal)?;

    let user = insert_user(&pool, email, &password_hash, signup_form.full_name.as_deref())
        .await
        .map_err(|e| {
            // A concurrent signup can still hit the constraint after the
            // pre-check passed; surface it as the same conflict
            if is_unique_violation(&e) {
                ApiError::Conflict("Email already registered".into())
            } else {
                e.into()
            }
        })?;

    let token = issue_session_token(user.id, &session_settings).map_err(ApiError::internal)?;

    tracing::info!("New user registered: {}", user.id);
    Ok(HttpResponse::Created()
        .cookie(session_cookie(token, &session_settings))
        .json(json!({
            "success": true,
            "user": UserResponse::from(&user)
        })))
}

#[tracing::instrument(name = "Login user attempt", skip(login_form, pool, session_settings))]
pub async fn login_user(
    login_form: web::Json<LoginRequest>,
    pool: web::Data<PgPool>,
    session_settings: web::Data<SessionSettings>,
) -> Result<HttpResponse, ApiError> {
    let email = present(login_form.email.as_deref());
    let password = login_form
        .password
        .as_ref()
        .map(|p| p.expose_secret())
        .filter(|p| !p.is_empty());

    let (email, password) = match (email, password) {
        (Some(email), Some(password)) => (email, password),
        _ => {
            return Err(ApiError::Validation(
                "Email and password are required".into(),
            ))
        }
    };

    // Unknown email and wrong password must be indistinguishable
    let user = match find_user_by_email(&pool, email).await? {
        Some(user) => user,
        None => {
            tracing::info!("Login attempt for unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !verify_password(password, &user.password_hash) {
        tracing::info!("Invalid password for user {}", user.id);
        return Err(ApiError::InvalidCredentials);
    }

    let token = issue_session_token(user.id, &session_settings).map_err(ApiError::internal)?;

    tracing::info!("User logged in: {}", user.id);
    Ok(HttpResponse::Ok()
        .cookie(session_cookie(token, &session_settings))
        .json(json!({
            "success": true,
            "user": UserResponse::from(&user)
        })))
}

#[tracing::instrument(name = "Logout user", skip_all)]
pub async fn logout_user() -> HttpResponse {
    HttpResponse::Ok()
        .cookie(removal_cookie())
        .json(json!({ "success": true }))
}

#[tracing::instrument(name = "Get current user", skip(pool, claims))]
pub async fn current_user(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let user_id = claims.user_id().ok_or(ApiError::AuthenticationRequired)?;

    // The session may outlive the user row; treat that as an expired session
    let user = find_user_by_id(&pool, user_id)
        .await?
        .ok_or(ApiError::AuthenticationRequired)?;

    Ok(HttpResponse::Ok().json(UserResponse::from(&user)))
}
