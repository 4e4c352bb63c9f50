//! In-memory SQLite fixtures shared by tests

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};

use crate::data::query::{Entity, OrderBy, SelectQuery};
use crate::data::{QueryExecutor, SqliteExecutor};

/// Single-connection pool; every in-memory connection is its own database
pub(crate) async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap()
}

pub(crate) fn people() -> Entity {
    Entity::new("people")
}

/// `people` with a soft-delete flag and a JSON `tags` array, plus their `pets`
///
/// | id | name   | age | email             | tags              | deleted |
/// |----|--------|-----|-------------------|-------------------|---------|
/// | 1  | Alice  | 34  | alice@example.com | admin, staff      | no      |
/// | 2  | bob    | 19  |                   | staff             | no      |
/// | 3  | Carol  | 52  | carol@example.org |                   | no      |
/// | 4  | Dave   | 27  | dave@example.com  | guest             | yes     |
/// | 5  | alicia | 41  |                   | staff             | no      |
///
/// Pets: Alice has a cat and a dog, Carol a dog, Dave a cat.
pub(crate) async fn people_executor() -> SqliteExecutor {
    let pool = memory_pool().await;
    for statement in [
        "CREATE TABLE people (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            age INTEGER NOT NULL,
            email TEXT,
            tags TEXT NOT NULL DEFAULT '[]',
            deleted BOOLEAN NOT NULL DEFAULT 0
        )",
        r#"INSERT INTO people (id, name, age, email, tags, deleted) VALUES
            (1, 'Alice', 34, 'alice@example.com', '["admin","staff"]', 0),
            (2, 'bob', 19, NULL, '["staff"]', 0),
            (3, 'Carol', 52, 'carol@example.org', '[]', 0),
            (4, 'Dave', 27, 'dave@example.com', '["guest"]', 1),
            (5, 'alicia', 41, NULL, '["staff"]', 0)"#,
        "CREATE TABLE pets (id INTEGER PRIMARY KEY, owner_id INTEGER NOT NULL, kind TEXT NOT NULL)",
        "INSERT INTO pets (id, owner_id, kind) VALUES
            (1, 1, 'cat'), (2, 1, 'dog'), (3, 3, 'dog'), (4, 4, 'cat')",
    ] {
        sqlx::query(statement).execute(&pool).await.unwrap();
    }
    SqliteExecutor::new(pool)
}

/// Primary keys of the rows matched by `query`, ascending
pub(crate) async fn row_ids(executor: &SqliteExecutor, query: SelectQuery) -> Vec<i64> {
    let id = query.entity().id_column();
    let query = query.order_by(OrderBy::asc(id));
    executor
        .fetch_all(&query)
        .await
        .unwrap()
        .iter()
        .map(|row| row.get::<i64, _>("id"))
        .collect()
}

pub(crate) fn numbers() -> Entity {
    Entity::new("numbers")
}

/// `numbers` holding ids `1..=count`, each labelled `n{id}`
pub(crate) async fn numbers_executor(count: i64) -> SqliteExecutor {
    let pool = memory_pool().await;
    sqlx::query(
        "CREATE TABLE numbers (
            id INTEGER PRIMARY KEY,
            label TEXT NOT NULL,
            deleted BOOLEAN NOT NULL DEFAULT 0
        )",
    )
    .execute(&pool)
    .await
    .unwrap();
    for id in 1..=count {
        sqlx::query("INSERT INTO numbers (id, label) VALUES (?, ?)")
            .bind(id)
            .bind(format!("n{id}"))
            .execute(&pool)
            .await
            .unwrap();
    }
    SqliteExecutor::new(pool)
}
