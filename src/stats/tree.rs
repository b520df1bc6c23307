// src/stats/tree.rs

use serde_json::{Map, Value};

use crate::models::attempt::Attempt;

/// Flattens the raw results tree into a deduplicated list of attempts.
///
/// The tree is laid out student-slug -> date -> subject-slug -> attempt-key
/// and comes from a schemaless store, so every level is treated as untrusted:
/// a missing or non-object node at any depth is skipped silently. Leaves are
/// deduplicated by attempt key; when the same key shows up twice the last one
/// visited wins, matching the store's own overwrite semantics. Output
/// ordering is unspecified and callers must not rely on it.
pub fn flatten_tree(tree: &Value) -> Vec<Attempt> {
    let mut dedup: std::collections::BTreeMap<String, Attempt> = std::collections::BTreeMap::new();

    let Some(students) = tree.as_object() else {
        return Vec::new();
    };

    for student_node in students.values() {
        let Some(dates) = student_node.as_object() else {
            continue;
        };
        for date_node in dates.values() {
            let Some(subjects) = date_node.as_object() else {
                continue;
            };
            for subject_node in subjects.values() {
                let Some(leaves) = subject_node.as_object() else {
                    continue;
                };
                for (attempt_key, leaf) in leaves {
                    if let Some(attempt) = attempt_from_value(leaf) {
                        dedup.insert(attempt_key.clone(), attempt);
                    }
                }
            }
        }
    }

    dedup.into_values().collect()
}

/// Validates a single leaf in one pass.
///
/// A leaf is accepted only if it is object-shaped and carries a non-empty
/// `studentEmail`; everything else is dropped, never raised. Numeric fields
/// read as 0 when missing or malformed.
pub fn attempt_from_value(raw: &Value) -> Option<Attempt> {
    let leaf = raw.as_object()?;

    let student_email = leaf
        .get("studentEmail")
        .and_then(Value::as_str)
        .filter(|email| !email.is_empty())?;

    Some(Attempt {
        marks: leaf.get("marks").and_then(Value::as_i64).unwrap_or(0),
        total: leaf.get("total").and_then(Value::as_i64).unwrap_or(0),
        subject: leaf
            .get("subject")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned(),
        percentage: leaf
            .get("percentage")
            .and_then(Value::as_f64)
            .unwrap_or(0.0),
        timestamp: leaf.get("timestamp").and_then(Value::as_i64).unwrap_or(0),
        student_email: student_email.to_owned(),
        student_name: leaf
            .get("studentName")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned(),
    })
}

/// Inserts one attempt payload at `bucket[0]/bucket[1]/bucket[2]/key`,
/// creating intermediate objects as needed. A scalar found where an
/// intermediate object belongs is replaced, consistent with treating
/// non-object nodes as empty on the read path.
pub fn insert_attempt(tree: &mut Value, bucket: &[String; 3], key: &str, attempt: Value) {
    let mut node = tree;
    for segment in bucket {
        node = as_object_mut(node)
            .entry(segment.clone())
            .or_insert(Value::Null);
    }
    as_object_mut(node).insert(key.to_owned(), attempt);
}

fn as_object_mut(node: &mut Value) -> &mut Map<String, Value> {
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => map,
        _ => unreachable!("node was just replaced with an object"),
    }
}
