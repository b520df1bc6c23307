// src/stats/rank.rs

use std::cmp::Ordering;

use crate::models::attempt::{LeaderboardEntry, RankedEntry};

/// Sorts entries by total marks descending, breaking ties on accuracy
/// descending. No further tie-break is defined: equal-marks-and-accuracy
/// entries keep an unspecified relative order.
pub fn sort_standings(entries: &mut [LeaderboardEntry]) {
    entries.sort_by(|a, b| {
        b.total_marks
            .cmp(&a.total_marks)
            .then_with(|| b.accuracy.partial_cmp(&a.accuracy).unwrap_or(Ordering::Equal))
    });
}

/// Splits the sorted list into the podium (ranks 1..=3) and the scrollable
/// remainder, each entry annotated with its 1-based rank.
pub fn partition(sorted: Vec<LeaderboardEntry>) -> (Vec<RankedEntry>, Vec<RankedEntry>) {
    let mut ranked = sorted
        .into_iter()
        .enumerate()
        .map(|(index, entry)| RankedEntry {
            rank: index + 1,
            entry,
        });

    let podium: Vec<RankedEntry> = ranked.by_ref().take(3).collect();
    let standings: Vec<RankedEntry> = ranked.collect();
    (podium, standings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(email: &str, marks: i64, accuracy: f64) -> LeaderboardEntry {
        LeaderboardEntry {
            name: email.to_string(),
            email: email.to_string(),
            total_marks: marks,
            total_questions: 100,
            test_count: 1,
            accuracy,
        }
    }

    #[test]
    fn orders_by_marks_then_accuracy() {
        let mut entries = vec![
            entry("a@x.com", 50, 80.0),
            entry("b@x.com", 50, 90.0),
            entry("c@x.com", 60, 10.0),
        ];
        sort_standings(&mut entries);

        let order: Vec<&str> = entries.iter().map(|e| e.email.as_str()).collect();
        assert_eq!(order, ["c@x.com", "b@x.com", "a@x.com"]);
    }

    #[test]
    fn podium_holds_the_top_three() {
        let mut entries = vec![
            entry("d@x.com", 10, 50.0),
            entry("a@x.com", 40, 50.0),
            entry("c@x.com", 20, 50.0),
            entry("b@x.com", 30, 50.0),
            entry("e@x.com", 5, 50.0),
        ];
        sort_standings(&mut entries);
        let (podium, standings) = partition(entries);

        assert_eq!(podium.len(), 3);
        assert_eq!(podium[0].rank, 1);
        assert_eq!(podium[0].entry.email, "a@x.com");
        assert_eq!(podium[2].entry.email, "c@x.com");

        // The remainder starts at rank 4.
        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].rank, 4);
        assert_eq!(standings[0].entry.email, "d@x.com");
        assert_eq!(standings[1].rank, 5);
    }

    #[test]
    fn partition_handles_fewer_than_three_entries() {
        let (podium, standings) = partition(vec![entry("a@x.com", 1, 0.0)]);
        assert_eq!(podium.len(), 1);
        assert!(standings.is_empty());

        let (podium, standings) = partition(Vec::new());
        assert!(podium.is_empty());
        assert!(standings.is_empty());
    }
}
