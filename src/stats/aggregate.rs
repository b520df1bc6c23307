// src/stats/aggregate.rs

use std::collections::HashMap;

use crate::models::attempt::{Attempt, LeaderboardEntry, StudentSummary};
use crate::models::user::UserProfile;

/// Totals for one email, folded over the flattened attempt list.
#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    marks: i64,
    questions: i64,
    count: i64,
}

/// Groups attempts by `studentEmail`, exact string equality. Missing marks
/// and totals already read as 0 at the flattening boundary.
fn fold_by_email(attempts: &[Attempt]) -> HashMap<&str, Totals> {
    let mut groups: HashMap<&str, Totals> = HashMap::new();
    for attempt in attempts {
        let totals = groups.entry(attempt.student_email.as_str()).or_default();
        totals.marks += attempt.marks;
        totals.questions += attempt.total;
        totals.count += 1;
    }
    groups
}

/// Admin dashboard variant: one summary per registered user, in directory
/// order, zero-filled when no attempts match. Attempts whose email matches
/// no registrant are ignored here; the leaderboard variant picks them up.
pub fn summarize_directory(users: &[UserProfile], attempts: &[Attempt]) -> Vec<StudentSummary> {
    let groups = fold_by_email(attempts);

    users
        .iter()
        .map(|user| {
            let totals = groups.get(user.email.as_str()).copied().unwrap_or_default();
            StudentSummary {
                uid: user.uid.clone(),
                name: user.name.clone(),
                email: user.email.clone(),
                role: user.role.clone(),
                created_at: user.created_at,
                total_marks: totals.marks,
                total_questions: totals.questions,
                test_count: totals.count,
            }
        })
        .collect()
}

/// Leaderboard variant: seeds every registered user at 0/0/0, then folds in
/// every attempt. An attempt whose email is not in the directory creates an
/// entry on the fly with the attempt's own display name, so a student still
/// shows up when the directory fetch lags behind a just-written attempt.
/// Accuracy is derived once from the final totals, not summed incrementally.
pub fn build_leaderboard(users: &[UserProfile], attempts: &[Attempt]) -> Vec<LeaderboardEntry> {
    let mut entries: HashMap<&str, LeaderboardEntry> = HashMap::new();

    for user in users {
        entries.insert(
            user.email.as_str(),
            LeaderboardEntry::new(display_name(&user.name), user.email.clone()),
        );
    }

    for attempt in attempts {
        let entry = entries
            .entry(attempt.student_email.as_str())
            .or_insert_with(|| {
                LeaderboardEntry::new(
                    display_name(&attempt.student_name),
                    attempt.student_email.clone(),
                )
            });
        entry.total_marks += attempt.marks;
        entry.total_questions += attempt.total;
        entry.test_count += 1;
    }

    entries
        .into_values()
        .map(|mut entry| {
            entry.accuracy = accuracy(entry.total_marks, entry.total_questions);
            entry
        })
        .collect()
}

/// Accuracy percentage; exactly 0 when no questions were answered.
pub fn accuracy(total_marks: i64, total_questions: i64) -> f64 {
    if total_questions > 0 {
        total_marks as f64 / total_questions as f64 * 100.0
    } else {
        0.0
    }
}

fn display_name(name: &str) -> String {
    if name.is_empty() {
        "Anonymous".to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(name: &str, email: &str) -> UserProfile {
        UserProfile {
            uid: format!("uid-{email}"),
            name: name.to_string(),
            email: email.to_string(),
            password: String::new(),
            role: "student".to_string(),
            created_at: Utc::now(),
        }
    }

    fn attempt(email: &str, name: &str, marks: i64, total: i64) -> Attempt {
        Attempt {
            marks,
            total,
            subject: "Math".to_string(),
            percentage: 0.0,
            timestamp: 0,
            student_email: email.to_string(),
            student_name: name.to_string(),
        }
    }

    #[test]
    fn directory_summary_conserves_marks_and_counts() {
        let users = vec![user("A", "a@x.com"), user("B", "b@x.com")];
        let attempts = vec![
            attempt("a@x.com", "A", 8, 10),
            attempt("a@x.com", "A", 5, 10),
            attempt("b@x.com", "B", 3, 5),
        ];

        let summaries = summarize_directory(&users, &attempts);
        assert_eq!(summaries.len(), 2);

        let a = summaries.iter().find(|s| s.email == "a@x.com").unwrap();
        assert_eq!((a.total_marks, a.total_questions, a.test_count), (13, 20, 2));

        let b = summaries.iter().find(|s| s.email == "b@x.com").unwrap();
        assert_eq!((b.total_marks, b.total_questions, b.test_count), (3, 5, 1));

        // Nothing double counted, nothing dropped.
        let marks: i64 = summaries.iter().map(|s| s.total_marks).sum();
        assert_eq!(marks, attempts.iter().map(|a| a.marks).sum::<i64>());
    }

    #[test]
    fn registered_user_without_attempts_is_zero_filled() {
        let users = vec![user("New Kid", "new@x.com")];
        let summaries = summarize_directory(&users, &[]);

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].test_count, 0);
        assert_eq!(summaries[0].total_marks, 0);
        assert_eq!(summaries[0].total_questions, 0);
    }

    #[test]
    fn directory_summary_preserves_directory_order() {
        let users = vec![user("Z", "z@x.com"), user("A", "a@x.com")];
        let summaries = summarize_directory(&users, &[]);
        assert_eq!(summaries[0].email, "z@x.com");
        assert_eq!(summaries[1].email, "a@x.com");
    }

    #[test]
    fn email_matching_is_case_sensitive() {
        let users = vec![user("A", "a@x.com")];
        let attempts = vec![attempt("A@X.COM", "A", 8, 10)];

        let summaries = summarize_directory(&users, &attempts);
        assert_eq!(summaries[0].test_count, 0);
    }

    #[test]
    fn leaderboard_seeds_every_registered_user() {
        let users = vec![user("A", "a@x.com"), user("", "b@x.com")];
        let entries = build_leaderboard(&users, &[]);

        assert_eq!(entries.len(), 2);
        let b = entries.iter().find(|e| e.email == "b@x.com").unwrap();
        assert_eq!(b.name, "Anonymous");
        assert_eq!(b.accuracy, 0.0);
    }

    #[test]
    fn attempt_without_matching_user_creates_an_entry_on_the_fly() {
        let users = vec![user("A", "a@x.com")];
        let attempts = vec![attempt("lagging@x.com", "Laggy", 4, 5)];

        let entries = build_leaderboard(&users, &attempts);
        assert_eq!(entries.len(), 2);

        let laggy = entries.iter().find(|e| e.email == "lagging@x.com").unwrap();
        assert_eq!(laggy.name, "Laggy");
        assert_eq!((laggy.total_marks, laggy.test_count), (4, 1));
        assert_eq!(laggy.accuracy, 80.0);
    }

    #[test]
    fn accuracy_is_zero_when_no_questions_were_answered() {
        assert_eq!(accuracy(0, 0), 0.0);
        assert_eq!(accuracy(5, 0), 0.0);
        assert!(accuracy(5, 0).is_finite());
    }

    #[test]
    fn accuracy_is_derived_from_final_totals() {
        let users = vec![user("A", "a@x.com")];
        let attempts = vec![
            attempt("a@x.com", "A", 1, 3),
            attempt("a@x.com", "A", 1, 3),
            attempt("a@x.com", "A", 1, 3),
        ];

        let entries = build_leaderboard(&users, &attempts);
        // 3/9, computed once from the sums; no per-attempt rounding drift.
        assert_eq!(entries[0].accuracy, 3.0 / 9.0 * 100.0);
    }

    #[test]
    fn end_to_end_fixture_from_directory_and_tree() {
        let users = vec![user("A", "a@x.com")];
        let tree = serde_json::json!({
            "A": { "2024-01-01": { "Math": {
                "k1": { "marks": 8, "total": 10, "studentEmail": "a@x.com" }
            } } }
        });

        let attempts = crate::stats::tree::flatten_tree(&tree);
        let summaries = summarize_directory(&users, &attempts);
        assert_eq!(
            (
                summaries[0].total_marks,
                summaries[0].total_questions,
                summaries[0].test_count
            ),
            (8, 10, 1)
        );

        let entries = build_leaderboard(&users, &attempts);
        assert_eq!(entries[0].accuracy, 80.0);
    }
}
