//! Feedback repository.

use std::sync::Arc;

use crate::entities::{Feedback, FeedbackCategory, Student, feedback, student};
use feedcat_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    Order, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// Feedback repository for database operations.
#[derive(Clone)]
pub struct FeedbackRepository {
    db: Arc<DatabaseConnection>,
}

impl FeedbackRepository {
    /// Create a new feedback repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Record a piece of feedback, creating the student on first contact.
    ///
    /// The student lookup, the optional student insert and the feedback
    /// insert run in one transaction. On any failure the whole transaction
    /// is rolled back, so a student row never appears without its feedback.
    pub async fn record_feedback(
        &self,
        student_id: i64,
        display_name: &str,
        category: FeedbackCategory,
        message: &str,
    ) -> AppResult<feedback::Model> {
        let name = display_name.to_string();
        let message = message.to_string();

        self.db
            .transaction::<_, feedback::Model, DbErr>(|txn| {
                Box::pin(async move {
                    if Student::find_by_id(student_id).one(txn).await?.is_none() {
                        student::ActiveModel {
                            id: Set(student_id),
                            name: Set(name),
                            created_at: NotSet,
                        }
                        .insert(txn)
                        .await?;
                    }

                    feedback::ActiveModel {
                        id: NotSet,
                        student_id: Set(student_id),
                        category: Set(category),
                        message: Set(message),
                        created_at: NotSet,
                    }
                    .insert(txn)
                    .await
                })
            })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find all feedback left by a student, oldest first.
    pub async fn find_by_student(&self, student_id: i64) -> AppResult<Vec<feedback::Model>> {
        Feedback::find()
            .filter(feedback::Column::StudentId.eq(student_id))
            .order_by(feedback::Column::CreatedAt, Order::Asc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count feedback entries in a category.
    pub async fn count_by_category(&self, category: FeedbackCategory) -> AppResult<u64> {
        Feedback::find()
            .filter(feedback::Column::Category.eq(category))
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

    fn create_test_student(id: i64) -> student::Model {
        student::Model {
            id,
            name: "Test Student".to_string(),
            created_at: Utc::now(),
        }
    }

    fn create_test_feedback(id: i32, student_id: i64, category: FeedbackCategory, message: &str) -> feedback::Model {
        feedback::Model {
            id,
            student_id,
            category,
            message: message.to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_record_feedback_creates_missing_student() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<student::Model>::new()])
                .append_query_results([[create_test_student(100)]])
                .append_query_results([[create_test_feedback(1, 100, FeedbackCategory::Liked, "Great app")]])
                .into_connection(),
        );

        let repo = FeedbackRepository::new(db);
        let saved = repo
            .record_feedback(100, "Test Student", FeedbackCategory::Liked, "Great app")
            .await
            .unwrap();

        assert_eq!(saved.student_id, 100);
        assert_eq!(saved.category, FeedbackCategory::Liked);
        assert_eq!(saved.message, "Great app");
    }

    #[tokio::test]
    async fn test_record_feedback_reuses_existing_student() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_student(100)]])
                .append_query_results([[create_test_feedback(2, 100, FeedbackCategory::Add, "More cards")]])
                .into_connection(),
        );

        let repo = FeedbackRepository::new(db);
        let saved = repo
            .record_feedback(100, "Test Student", FeedbackCategory::Add, "More cards")
            .await
            .unwrap();

        assert_eq!(saved.id, 2);
        assert_eq!(saved.category, FeedbackCategory::Add);
    }

    #[tokio::test]
    async fn test_record_feedback_failure_is_database_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<student::Model>::new()])
                .append_query_results([[create_test_student(100)]])
                .append_query_errors([DbErr::Custom("insert failed".to_string())])
                .into_connection(),
        );

        let repo = FeedbackRepository::new(db);
        let result = repo
            .record_feedback(100, "Test Student", FeedbackCategory::Liked, "Great app")
            .await;

        assert!(matches!(result, Err(AppError::Database(msg)) if msg.contains("insert failed")));
    }

    #[tokio::test]
    async fn test_find_by_student() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[
                    create_test_feedback(1, 100, FeedbackCategory::Liked, "first"),
                    create_test_feedback(2, 100, FeedbackCategory::Add, "second"),
                ]])
                .into_connection(),
        );

        let repo = FeedbackRepository::new(db);
        let entries = repo.find_by_student(100).await.unwrap();

        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|f| f.student_id == 100));
    }

    #[tokio::test]
    async fn test_count_by_category() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(7))
                }]])
                .into_connection(),
        );

        let repo = FeedbackRepository::new(db);
        let count = repo.count_by_category(FeedbackCategory::Liked).await.unwrap();

        assert_eq!(count, 7);
    }
}
