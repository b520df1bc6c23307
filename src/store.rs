// src/store.rs
//
// Access to the two backing stores: the `users` directory and the results
// tree. The two reads are separate queries with no shared snapshot, so
// callers must tolerate one lagging behind the other. Read failures are
// logged and degrade to empty data rather than failing the request.

use serde_json::Value;
use sqlx::PgPool;

use crate::{error::AppError, models::user::UserProfile};

/// Full directory scan, newest registration first. Returns an empty
/// directory on failure.
pub async fn fetch_directory(pool: &PgPool) -> Vec<UserProfile> {
    let result = sqlx::query_as::<_, UserProfile>(
        r#"
        SELECT uid, name, email, password, role, created_at
        FROM users
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await;

    match result {
        Ok(users) => users,
        Err(e) => {
            tracing::error!("Failed to fetch user directory: {:?}", e);
            Vec::new()
        }
    }
}

/// Full-subtree fetch of the results tree. Returns an empty tree on failure
/// or when no tree has been written yet.
pub async fn fetch_result_tree(pool: &PgPool) -> Value {
    let result: Result<Option<Value>, sqlx::Error> =
        sqlx::query_scalar("SELECT tree FROM result_store WHERE id = 1")
            .fetch_optional(pool)
            .await;

    match result {
        Ok(Some(tree)) => tree,
        Ok(None) => Value::Object(serde_json::Map::new()),
        Err(e) => {
            tracing::error!("Failed to fetch results tree: {:?}", e);
            Value::Object(serde_json::Map::new())
        }
    }
}

/// Looks up one profile by uid (used by the write path to resolve the
/// current display name).
pub async fn fetch_user(pool: &PgPool, uid: &str) -> Result<Option<UserProfile>, AppError> {
    let user = sqlx::query_as::<_, UserProfile>(
        r#"
        SELECT uid, name, email, password, role, created_at
        FROM users
        WHERE uid = $1
        "#,
    )
    .bind(uid)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Appends one attempt payload under `bucket` with the given key.
///
/// The whole tree is read, modified in memory and written back inside one
/// transaction with the row locked, so concurrent submissions cannot drop
/// each other's writes.
pub async fn append_attempt(
    pool: &PgPool,
    bucket: &[String; 3],
    key: &str,
    payload: Value,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let tree: Option<Value> =
        sqlx::query_scalar("SELECT tree FROM result_store WHERE id = 1 FOR UPDATE")
            .fetch_optional(&mut *tx)
            .await?;

    let mut tree = tree.unwrap_or_else(|| Value::Object(serde_json::Map::new()));
    crate::stats::tree::insert_attempt(&mut tree, bucket, key, payload);

    sqlx::query(
        r#"
        INSERT INTO result_store (id, tree)
        VALUES (1, $1)
        ON CONFLICT (id) DO UPDATE SET tree = EXCLUDED.tree, updated_at = now()
        "#,
    )
    .bind(&tree)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}
