// src/models/attempt.rs

use serde::{Deserialize, Serialize};

/// One scored quiz submission, as stored at the leaves of the results tree.
/// Field names are camelCase on the wire because that is how the tree holds
/// them. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub marks: i64,
    pub total: i64,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub percentage: f64,
    /// Server-assigned submission time, Unix millis.
    #[serde(default)]
    pub timestamp: i64,
    pub student_email: String,
    #[serde(default)]
    pub student_name: String,
}

/// Derived per-student totals for the leaderboard. Never persisted;
/// recomputed from the full attempt set on every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub name: String,
    pub email: String,
    pub total_marks: i64,
    pub total_questions: i64,
    pub test_count: i64,
    /// totalMarks / totalQuestions * 100; exactly 0 when totalQuestions is 0.
    pub accuracy: f64,
}

impl LeaderboardEntry {
    pub fn new(name: String, email: String) -> Self {
        Self {
            name,
            email,
            total_marks: 0,
            total_questions: 0,
            test_count: 0,
            accuracy: 0.0,
        }
    }
}

/// A leaderboard entry annotated with its 1-based display rank.
#[derive(Debug, Clone, Serialize)]
pub struct RankedEntry {
    pub rank: usize,
    #[serde(flatten)]
    pub entry: LeaderboardEntry,
}

/// Directory row for the admin dashboard: profile fields plus zero-filled
/// aggregate totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub uid: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub total_marks: i64,
    pub total_questions: i64,
    pub test_count: i64,
}
