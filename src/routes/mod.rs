use actix_web::web;

pub mod auth;
pub mod health;
pub mod workout_history;

use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // Public routes
    cfg.service(auth::signup)
        .service(auth::login)
        .service(health::backend_health);

    // Everything else under /api requires an authenticated session
    cfg.service(
        web::scope("/api")
            .wrap(AuthMiddleware)
            .service(auth::logout)
            .service(auth::user)
            .service(workout_history::save_workout)
            .service(workout_history::get_workout_history),
    );
}
