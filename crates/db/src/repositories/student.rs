//! Student repository.

use std::sync::Arc;

use crate::entities::{Student, student};
use feedcat_common::{AppError, AppResult};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

/// Student repository for database operations.
///
/// Students are only ever created inside
/// [`FeedbackRepository::record_feedback`](super::FeedbackRepository::record_feedback),
/// so this repository is read-only.
#[derive(Clone)]
pub struct StudentRepository {
    db: Arc<DatabaseConnection>,
}

impl StudentRepository {
    /// Create a new student repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a student by platform user ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<student::Model>> {
        Student::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a student by platform user ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<student::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Student not found: {id}")))
    }

    /// Count all students.
    pub async fn count(&self) -> AppResult<u64> {
        Student::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_student(id: i64, name: &str) -> student::Model {
        student::Model {
            id,
            name: name.to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_find_by_id_returns_student() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_student(100, "Анна Петрова")]])
                .into_connection(),
        );

        let repo = StudentRepository::new(db);
        let found = repo.find_by_id(100).await.unwrap().unwrap();

        assert_eq!(found.id, 100);
        assert_eq!(found.name, "Анна Петрова");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<student::Model>::new()])
                .into_connection(),
        );

        let repo = StudentRepository::new(db);
        let result = repo.get_by_id(404).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_count() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(3))
                }]])
                .into_connection(),
        );

        let repo = StudentRepository::new(db);
        assert_eq!(repo.count().await.unwrap(), 3);
    }
}
