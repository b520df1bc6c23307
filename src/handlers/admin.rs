// src/handlers/admin.rs

use axum::{Json, extract::State, response::IntoResponse};
use chrono::{Duration, Utc};
use serde_json::json;
use sqlx::PgPool;

use crate::{error::AppError, stats, store};

/// Admin dashboard data: the registered-student directory (newest first),
/// each row carrying its aggregate totals, plus the headline stats. Every
/// registrant appears exactly once, zero-filled when they have no attempts.
/// Admin only.
pub async fn list_students(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let users = store::fetch_directory(&pool).await;
    let tree = store::fetch_result_tree(&pool).await;

    let attempts = stats::tree::flatten_tree(&tree);
    let students = stats::aggregate::summarize_directory(&users, &attempts);

    let week_ago = Utc::now() - Duration::days(7);
    let new_this_week = users.iter().filter(|u| u.created_at > week_ago).count();
    let active_emails = users.iter().filter(|u| !u.email.is_empty()).count();

    Ok(Json(json!({
        "students": students,
        "stats": {
            "totalStudents": users.len(),
            "newThisWeek": new_this_week,
            "activeEmails": active_emails,
        },
    })))
}
