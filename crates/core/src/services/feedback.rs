//! Feedback service.

use feedcat_common::AppResult;
use feedcat_db::entities::{FeedbackCategory, feedback};
use feedcat_db::repositories::FeedbackRepository;
use tracing::info;

/// Service for storing student feedback.
#[derive(Clone)]
pub struct FeedbackService {
    feedback_repo: FeedbackRepository,
}

impl FeedbackService {
    /// Create a new feedback service.
    #[must_use]
    pub const fn new(feedback_repo: FeedbackRepository) -> Self {
        Self { feedback_repo }
    }

    /// Store a feedback message, creating the student on first contact.
    pub async fn submit(
        &self,
        student_id: i64,
        display_name: &str,
        category: FeedbackCategory,
        text: &str,
    ) -> AppResult<feedback::Model> {
        let saved = self
            .feedback_repo
            .record_feedback(student_id, display_name, category, text)
            .await?;

        info!(
            feedback_id = saved.id,
            student_id = student_id,
            category = category.as_str(),
            "Feedback recorded"
        );

        Ok(saved)
    }

    /// All feedback a student has left.
    pub async fn history(&self, student_id: i64) -> AppResult<Vec<feedback::Model>> {
        self.feedback_repo.find_by_student(student_id).await
    }
}
