//! Event handlers and the dispatcher that routes events to them.

pub mod feedback;
pub mod game;
pub mod menu;

use feedcat_common::AppResult;
use feedcat_common::config::ContentConfig;
use feedcat_core::{
    CardAssets, Catalog, ChatId, FeedbackService, FeedbackStateTracker, GameProgressTracker,
};
use tracing::{debug, warn};

use crate::event::{CallbackPayload, Event, Route, Sender};
use crate::messenger::{MessengerService, OutboundMessage};

/// Everything the handlers need, shared across events.
#[derive(Clone)]
pub struct BotState {
    /// Outbound channel.
    pub messenger: MessengerService,
    /// Feedback persistence.
    pub feedback: FeedbackService,
    /// Pending feedback category per chat.
    pub feedback_state: FeedbackStateTracker,
    /// Card game progress per chat.
    pub game: GameProgressTracker,
    /// Card labels and texts.
    pub catalog: Catalog,
    /// Card images on disk.
    pub cards: CardAssets,
    /// Remote images for the greeting and the resource list.
    pub content: ContentConfig,
}

impl BotState {
    /// Send a message, logging what went out.
    pub(crate) async fn send(&self, chat_id: ChatId, message: OutboundMessage) -> AppResult<()> {
        debug!(chat_id = chat_id, photo = message.is_photo(), "Sending message");
        self.messenger.send(chat_id, message).await
    }
}

/// How a button press is acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAnswer {
    /// Stop the client's progress indicator without a notice.
    Silent,
    /// Show a short notice to the user.
    Notice(&'static str),
}

impl CallbackAnswer {
    const fn notice(self) -> Option<&'static str> {
        match self {
            Self::Silent => None,
            Self::Notice(text) => Some(text),
        }
    }
}

/// Routes events to handlers.
///
/// Handler errors stop at the dispatcher: they are logged and the next event
/// is processed normally. Every button press is answered exactly once, also
/// when its handler fails.
#[derive(Clone)]
pub struct Dispatcher {
    state: BotState,
}

impl Dispatcher {
    /// Dispatcher over shared state.
    #[must_use]
    pub const fn new(state: BotState) -> Self {
        Self { state }
    }

    /// State the handlers share.
    #[must_use]
    pub const fn state(&self) -> &BotState {
        &self.state
    }

    /// Handle a single event.
    pub async fn dispatch(&self, event: Event) {
        let route = Route::of(&event);
        debug!(chat_id = event.chat_id(), route = ?route, "Dispatching event");

        match event {
            Event::Message {
                chat_id,
                sender,
                text,
            } => {
                if let Err(e) = self.on_message(route, chat_id, &sender, &text).await {
                    e.log("Failed to handle message");
                }
            }
            Event::Callback {
                id,
                chat_id,
                sender,
                data,
            } => {
                let answer = match route {
                    Route::Callback(payload) => self.on_callback(payload, chat_id, &sender).await,
                    _ => {
                        warn!(chat_id = chat_id, data = %data, "Unknown callback payload");
                        Ok(CallbackAnswer::Silent)
                    }
                };
                let answer = answer.unwrap_or_else(|e| {
                    e.log("Failed to handle callback");
                    CallbackAnswer::Silent
                });

                if let Err(e) = self.state.messenger.answer_callback(&id, answer.notice()).await {
                    e.log("Failed to answer callback");
                }
            }
        }
    }

    async fn on_message(
        &self,
        route: Route,
        chat_id: ChatId,
        sender: &Sender,
        text: &str,
    ) -> AppResult<()> {
        let state = &self.state;
        match route {
            Route::Start => menu::start(state, chat_id).await,
            Route::FeedbackMenu => menu::feedback_menu(state, chat_id).await,
            Route::Help => menu::help(state, chat_id).await,
            Route::Resources => menu::resources(state, chat_id).await,
            Route::Game => game::start(state, chat_id).await,
            Route::FreeText => feedback::submit_text(state, chat_id, sender, text).await,
            Route::Callback(_) | Route::UnknownCallback => Ok(()),
        }
    }

    async fn on_callback(
        &self,
        payload: CallbackPayload,
        chat_id: ChatId,
        sender: &Sender,
    ) -> AppResult<CallbackAnswer> {
        let state = &self.state;
        debug!(chat_id = chat_id, user_id = sender.id, payload = %payload, "Button pressed");

        match payload {
            CallbackPayload::Category(category) => {
                feedback::begin(state, chat_id, category).await
            }
            CallbackPayload::CancelFeedback => feedback::cancel(state, chat_id).await,
            CallbackPayload::EndFeedback => feedback::end(state, chat_id).await,
            CallbackPayload::Part { stage, choice } => {
                game::choose(state, chat_id, stage, choice).await
            }
            CallbackPayload::Next { stage } => game::next(state, chat_id, stage).await,
        }
    }
}
