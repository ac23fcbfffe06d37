use actix_web::{get, post, web, HttpResponse};
use sqlx::PgPool;

use crate::auth::session::Claims;
use crate::errors::ApiError;
use crate::handlers::workout_handler;
use crate::models::workout::{SaveWorkoutRequest, WorkoutHistoryQuery};

#[post("/workout-history")]
async fn save_workout(
    workout_form: web::Json<SaveWorkoutRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    workout_handler::save_workout(workout_form, pool, claims).await
}

#[get("/workout-history")]
async fn get_workout_history(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    query: web::Query<WorkoutHistoryQuery>,
) -> Result<HttpResponse, ApiError> {
    workout_handler::get_workout_history(pool, claims, query).await
}
