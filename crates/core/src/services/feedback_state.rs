//! Per-chat feedback collection state.

use std::collections::HashMap;
use std::sync::Arc;

use feedcat_db::entities::FeedbackCategory;
use tokio::sync::RwLock;

use crate::ChatId;

/// Where a chat stands in the feedback flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConversationState {
    /// Free text is not treated as feedback.
    #[default]
    Idle,
    /// The next free-text message is feedback of this category.
    AwaitingFeedback(FeedbackCategory),
}

/// Tracks which chats are waiting for feedback text.
///
/// Idle chats have no entry in the map. Every operation takes the lock once,
/// so operations on the same chat are serialized.
#[derive(Clone, Default)]
pub struct FeedbackStateTracker {
    pending: Arc<RwLock<HashMap<ChatId, FeedbackCategory>>>,
}

impl FeedbackStateTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start waiting for feedback text, replacing any pending category.
    pub async fn begin_collection(&self, chat_id: ChatId, category: FeedbackCategory) {
        self.pending.write().await.insert(chat_id, category);
    }

    /// Stop waiting for feedback text. No-op for idle chats.
    pub async fn cancel(&self, chat_id: ChatId) {
        self.pending.write().await.remove(&chat_id);
    }

    /// Take the pending category, leaving the chat idle.
    ///
    /// Returns `None` for idle chats. Each pending request is handed out
    /// exactly once.
    pub async fn consume(&self, chat_id: ChatId) -> Option<FeedbackCategory> {
        self.pending.write().await.remove(&chat_id)
    }

    /// Whether the chat is waiting for feedback text.
    pub async fn is_awaiting(&self, chat_id: ChatId) -> bool {
        self.pending.read().await.contains_key(&chat_id)
    }

    /// Current state of the chat.
    pub async fn state(&self, chat_id: ChatId) -> ConversationState {
        self.pending
            .read()
            .await
            .get(&chat_id)
            .map_or(ConversationState::Idle, |category| {
                ConversationState::AwaitingFeedback(*category)
            })
    }
}
