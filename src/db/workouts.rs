use sqlx::PgPool;

use crate::models::workout::WorkoutRecord;

#[tracing::instrument(
    name = "Insert workout into database",
    skip(pool, metrics),
    fields(user_id = %user_id, exercise_type = %exercise_type)
)]
pub async fn insert_workout(
    pool: &PgPool,
    user_id: i32,
    exercise_type: &str,
    sport_category: &str,
    duration_seconds: Option<i32>,
    reps_count: Option<i32>,
    metrics: serde_json::Value,
) -> Result<i32, sqlx::Error> {
    // Wrapped in a transaction so a failure leaves no partial row behind
    let mut tx = pool.begin().await?;

    let (workout_id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO workout_history
            (user_id, exercise_type, sport_category, duration_seconds, reps_count, metrics)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(exercise_type)
    .bind(sport_category)
    .bind(duration_seconds)
    .bind(reps_count)
    .bind(metrics)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute workout insert query: {:?}", e);
        e
    })?;

    tx.commit().await?;
    Ok(workout_id)
}

/// Fetch a user's workouts, newest first. `id DESC` breaks ties between
/// rows created inside the same timestamp tick.
pub async fn list_workout_history(
    pool: &PgPool,
    user_id: i32,
    limit: i64,
) -> Result<Vec<WorkoutRecord>, sqlx::Error> {
    sqlx::query_as::<_, WorkoutRecord>(
        r#"
        SELECT id, user_id, exercise_type, sport_category,
               duration_seconds, reps_count, metrics, created_at
        FROM workout_history
        WHERE user_id = $1
        ORDER BY created_at DESC, id DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}
