use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

/// Persisted shape of a student. `id` is `None` until the store assigns one
/// on insert.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct StudentEntity {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
}

/// The narrow persistence contract the service depends on, independent of the
/// concrete store.
#[async_trait]
pub trait StudentRepo: Send + Sync {
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<StudentEntity>>;
    async fn find_all(&self) -> anyhow::Result<Vec<StudentEntity>>;
    /// Insert when `entity.id` is `None`, update otherwise. Returns the
    /// persisted record with the store-assigned id populated.
    async fn save(&self, entity: StudentEntity) -> anyhow::Result<StudentEntity>;
    async fn delete_by_id(&self, id: i64) -> anyhow::Result<()>;
    async fn exists_by_id(&self, id: i64) -> anyhow::Result<bool>;
}

pub struct PgStudentRepo {
    db: PgPool,
}

impl PgStudentRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentRepo for PgStudentRepo {
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<StudentEntity>> {
        let row = sqlx::query_as::<_, StudentEntity>(
            r#"
            SELECT id, first_name, last_name
            FROM students
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<StudentEntity>> {
        let rows = sqlx::query_as::<_, StudentEntity>(
            r#"
            SELECT id, first_name, last_name
            FROM students
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn save(&self, entity: StudentEntity) -> anyhow::Result<StudentEntity> {
        let saved = match entity.id {
            Some(id) => {
                sqlx::query_as::<_, StudentEntity>(
                    r#"
                    UPDATE students
                    SET first_name = $2, last_name = $3
                    WHERE id = $1
                    RETURNING id, first_name, last_name
                    "#,
                )
                .bind(id)
                .bind(&entity.first_name)
                .bind(&entity.last_name)
                .fetch_one(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, StudentEntity>(
                    r#"
                    INSERT INTO students (first_name, last_name)
                    VALUES ($1, $2)
                    RETURNING id, first_name, last_name
                    "#,
                )
                .bind(&entity.first_name)
                .bind(&entity.last_name)
                .fetch_one(&self.db)
                .await?
            }
        };
        Ok(saved)
    }

    async fn delete_by_id(&self, id: i64) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    async fn exists_by_id(&self, id: i64) -> anyhow::Result<bool> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM students WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.db)
                .await?;
        Ok(exists.0)
    }
}

/// In-memory store keyed by id, with a monotonically increasing id counter.
/// Backs the service and router tests; no database required.
#[derive(Default)]
pub struct InMemoryStudentRepo {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    rows: BTreeMap<i64, StudentEntity>,
    next_id: i64,
}

#[async_trait]
impl StudentRepo for InMemoryStudentRepo {
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<StudentEntity>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<StudentEntity>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.rows.values().cloned().collect())
    }

    async fn save(&self, mut entity: StudentEntity) -> anyhow::Result<StudentEntity> {
        let mut inner = self.inner.lock().unwrap();
        let id = match entity.id {
            Some(id) => id,
            None => {
                inner.next_id += 1;
                inner.next_id
            }
        };
        entity.id = Some(id);
        inner.rows.insert(id, entity.clone());
        Ok(entity)
    }

    async fn delete_by_id(&self, id: i64) -> anyhow::Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.rows.remove(&id);
        Ok(())
    }

    async fn exists_by_id(&self, id: i64) -> anyhow::Result<bool> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.rows.contains_key(&id))
    }
}
