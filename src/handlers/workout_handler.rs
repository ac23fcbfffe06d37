use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;

use crate::auth::session::Claims;
use crate::db::workouts::{insert_workout, list_workout_history};
use crate::errors::ApiError;
use crate::models::workout::{SaveWorkoutRequest, WorkoutHistoryItem, WorkoutHistoryQuery};

const DEFAULT_HISTORY_LIMIT: i64 = 50;
const MAX_HISTORY_LIMIT: i64 = 100;

#[tracing::instrument(name = "Save workout", skip(workout_form, pool, claims))]
pub async fn save_workout(
    workout_form: web::Json<SaveWorkoutRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let user_id = claims.user_id().ok_or(ApiError::AuthenticationRequired)?;

    let exercise_type = workout_form
        .exercise_type
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty());
    let sport_category = workout_form
        .sport_category
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let (exercise_type, sport_category) = match (exercise_type, sport_category) {
        (Some(exercise_type), Some(sport_category)) => (exercise_type, sport_category),
        _ => {
            return Err(ApiError::Validation(
                "exercise_type and sport_category are required".into(),
            ))
        }
    };

    let metrics = workout_form.metrics.clone().unwrap_or_else(|| json!({}));

    let workout_id = insert_workout(
        &pool,
        user_id,
        exercise_type,
        sport_category,
        workout_form.duration_seconds,
        workout_form.reps_count,
        metrics,
    )
    .await?;

    tracing::info!("Workout {} saved for user {}", workout_id, user_id);
    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "workout_id": workout_id
    })))
}

#[tracing::instrument(name = "Get workout history", skip(pool, claims))]
pub async fn get_workout_history(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    query: web::Query<WorkoutHistoryQuery>,
) -> Result<HttpResponse, ApiError> {
    let user_id = claims.user_id().ok_or(ApiError::AuthenticationRequired)?;

    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);

    let workouts: Vec<WorkoutHistoryItem> = list_workout_history(&pool, user_id, limit)
        .await?
        .into_iter()
        .map(WorkoutHistoryItem::from)
        .collect();

    tracing::info!(
        "Retrieved {} workouts for user {}",
        workouts.len(),
        user_id
    );
    Ok(HttpResponse::Ok().json(json!({ "workouts": workouts })))
}
