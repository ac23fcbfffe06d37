pub mod auth_handler;
pub mod workout_handler;
