// src/handlers/quiz.rs

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::attempt::Attempt,
    stats, store,
    utils::{jwt::Claims, keys::push_key, sanitize::sanitize_key},
};

const DEFAULT_SUBJECT: &str = "General Knowledge";

/// Raw submission inputs. Kept as strings so garbage never fails extraction;
/// parsing falls back to 0 / the default subject.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitResultQuery {
    pub score: Option<String>,
    pub total: Option<String>,
    pub subject: Option<String>,
}

fn parse_count(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok()).unwrap_or(0)
}

fn parse_subject(raw: Option<&str>) -> String {
    match raw {
        Some(subject) if !subject.trim().is_empty() => subject.trim().to_owned(),
        _ => DEFAULT_SUBJECT.to_owned(),
    }
}

/// Display name used for the bucket path: profile name, then the email
/// local part, then a fixed fallback.
fn student_display_name(name: &str, email: &str) -> String {
    if !name.is_empty() {
        return name.to_owned();
    }
    let local_part = email.split('@').next().unwrap_or_default();
    if !local_part.is_empty() {
        return local_part.to_owned();
    }
    "Unknown Student".to_owned()
}

/// Persists one quiz attempt for the signed-in student.
///
/// The bucket path is `{student-slug}/{YYYY-MM-DD}/{subject-slug}` with the
/// store-reserved characters sanitized out; the attempt key is generated
/// here and the timestamp is server-assigned. Zero-question submissions are
/// acknowledged but not persisted. Delivery is at-least-once: a failed write
/// surfaces as 500 so the client keeps its unsaved flag and may retry.
pub async fn submit_result(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<SubmitResultQuery>,
) -> Result<impl IntoResponse, AppError> {
    let score = parse_count(params.score.as_deref());
    let total = parse_count(params.total.as_deref());
    let subject = parse_subject(params.subject.as_deref());

    let percentage = if total > 0 {
        score as f64 / total as f64 * 100.0
    } else {
        0.0
    };
    let percentage = (percentage * 100.0).round() / 100.0;

    if total <= 0 {
        return Ok((
            StatusCode::OK,
            Json(json!({
                "saved": false,
                "percentage": percentage,
                "subject": subject,
            })),
        ));
    }

    let user = store::fetch_user(&pool, &claims.sub)
        .await?
        .ok_or(AppError::AuthError("Account not found".to_string()))?;

    let student_name = student_display_name(&user.name, &user.email);
    let now = Utc::now();

    let bucket = [
        sanitize_key(&student_name),
        now.format("%Y-%m-%d").to_string(),
        sanitize_key(&subject),
    ];
    let attempt_key = push_key(now);

    let attempt = Attempt {
        marks: score,
        total,
        subject: subject.clone(),
        percentage,
        timestamp: now.timestamp_millis(),
        student_email: user.email.clone(),
        student_name,
    };

    store::append_attempt(&pool, &bucket, &attempt_key, serde_json::to_value(&attempt)?)
        .await
        .map_err(|e| {
            tracing::error!("Failed to save quiz result: {:?}", e);
            e
        })?;

    tracing::info!(
        "Result saved for {} under {}/{}/{}",
        user.email,
        bucket[0],
        bucket[1],
        bucket[2]
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "saved": true,
            "attemptKey": attempt_key,
            "percentage": percentage,
            "subject": subject,
        })),
    ))
}

/// Builds the global leaderboard: full directory + full results tree,
/// flattened, aggregated per email and sorted by marks (accuracy tie-break).
/// The response carries the podium (ranks 1..=3) and the remaining
/// standings, each annotated with its 1-based rank.
pub async fn get_leaderboard(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let users = store::fetch_directory(&pool).await;
    let tree = store::fetch_result_tree(&pool).await;

    let attempts = stats::tree::flatten_tree(&tree);
    let mut entries = stats::aggregate::build_leaderboard(&users, &attempts);
    stats::rank::sort_standings(&mut entries);

    let (podium, standings) = stats::rank::partition(entries);

    Ok(Json(json!({
        "podium": podium,
        "standings": standings,
    })))
}
