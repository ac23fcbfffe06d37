use actix_web::{get, post, web, HttpResponse};
use sqlx::PgPool;

use crate::auth::session::Claims;
use crate::config::session::SessionSettings;
use crate::errors::ApiError;
use crate::handlers::auth_handler::{current_user, login_user, logout_user, signup_user};
use crate::models::user::{LoginRequest, SignupRequest};

#[post("/api/signup")]
async fn signup(
    signup_form: web::Json<SignupRequest>,
    pool: web::Data<PgPool>,
    session_settings: web::Data<SessionSettings>,
) -> Result<HttpResponse, ApiError> {
    signup_user(signup_form, pool, session_settings).await
}

#[post("/api/login")]
async fn login(
    login_form: web::Json<LoginRequest>,
    pool: web::Data<PgPool>,
    session_settings: web::Data<SessionSettings>,
) -> Result<HttpResponse, ApiError> {
    login_user(login_form, pool, session_settings).await
}

#[post("/logout")]
async fn logout() -> HttpResponse {
    logout_user().await
}

#[get("/user")]
async fn user(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    current_user(pool, claims).await
}
