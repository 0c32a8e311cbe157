//! Test helpers: a messenger that records instead of sending, and can be
//! told to fail.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use feedcat_common::{AppError, AppResult};
use feedcat_common::config::ContentConfig;
use feedcat_core::{
    CardAssets, Catalog, ChatId, FeedbackService, FeedbackStateTracker, GameProgressTracker,
};
use tokio::sync::Mutex;

use crate::handlers::BotState;
use crate::messenger::{Messenger, OutboundMessage};

/// A recorded callback acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackAck {
    /// ID of the answered callback.
    pub callback_id: String,
    /// Notice shown to the user, if any.
    pub notice: Option<String>,
}

/// Messenger that keeps everything it is asked to send.
#[derive(Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<(ChatId, OutboundMessage)>>,
    acks: Mutex<Vec<CallbackAck>>,
    failing: AtomicBool,
}

impl RecordingMessenger {
    /// Messages sent so far, oldest first.
    pub async fn sent(&self) -> Vec<(ChatId, OutboundMessage)> {
        self.sent.lock().await.clone()
    }

    /// Messages sent since the last call, oldest first.
    pub async fn take_sent(&self) -> Vec<OutboundMessage> {
        std::mem::take(&mut *self.sent.lock().await)
            .into_iter()
            .map(|(_, message)| message)
            .collect()
    }

    /// Make later sends fail with a transport error until switched back.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Callback acknowledgements so far.
    pub async fn acks(&self) -> Vec<CallbackAck> {
        self.acks.lock().await.clone()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send(&self, chat_id: ChatId, message: OutboundMessage) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Transport("sendMessage: connection reset".to_string()));
        }
        self.sent.lock().await.push((chat_id, message));
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, notice: Option<&str>) -> AppResult<()> {
        self.acks.lock().await.push(CallbackAck {
            callback_id: callback_id.to_string(),
            notice: notice.map(str::to_string),
        });
        Ok(())
    }
}

/// Bot state with fresh trackers, the full catalog and default content.
pub fn bot_state(
    messenger: Arc<RecordingMessenger>,
    feedback: FeedbackService,
    cards: CardAssets,
) -> BotState {
    BotState {
        messenger,
        feedback,
        feedback_state: FeedbackStateTracker::new(),
        game: GameProgressTracker::new(),
        catalog: Catalog::herzen(),
        cards,
        content: ContentConfig::default(),
    }
}
