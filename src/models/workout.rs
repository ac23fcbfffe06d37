use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted workout session. Rows are immutable after creation and
/// only go away when the owning user is deleted (cascade).
#[derive(Debug, sqlx::FromRow)]
pub struct WorkoutRecord {
    pub id: i32,
    pub user_id: i32,
    pub exercise_type: String,
    pub sport_category: String,
    pub duration_seconds: Option<i32>,
    pub reps_count: Option<i32>,
    pub metrics: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SaveWorkoutRequest {
    pub exercise_type: Option<String>,
    pub sport_category: Option<String>,
    pub duration_seconds: Option<i32>,
    pub reps_count: Option<i32>,
    pub metrics: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct WorkoutHistoryItem {
    pub id: i32,
    pub exercise_type: String,
    pub sport_category: String,
    pub duration_seconds: Option<i32>,
    pub reps_count: Option<i32>,
    pub metrics: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl From<WorkoutRecord> for WorkoutHistoryItem {
    fn from(record: WorkoutRecord) -> Self {
        Self {
            id: record.id,
            exercise_type: record.exercise_type,
            sport_category: record.sport_category,
            duration_seconds: record.duration_seconds,
            reps_count: record.reps_count,
            metrics: record.metrics,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WorkoutHistoryQuery {
    pub limit: Option<i64>,
}
