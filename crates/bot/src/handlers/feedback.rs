//! Feedback collection.

use feedcat_common::AppResult;
use feedcat_core::ChatId;
use feedcat_core::content::{
    FEEDBACK_CANCELLED, FEEDBACK_END_TOAST, FEEDBACK_ENDED, FEEDBACK_PROMPT, FEEDBACK_SAVE_FAILED,
    FEEDBACK_THANKS,
};
use feedcat_db::entities::FeedbackCategory;
use tracing::{debug, info};

use super::{BotState, CallbackAnswer};
use crate::event::Sender;
use crate::keyboards;
use crate::messenger::OutboundMessage;

/// `liked` / `add`: wait for the next text message.
pub async fn begin(
    state: &BotState,
    chat_id: ChatId,
    category: FeedbackCategory,
) -> AppResult<CallbackAnswer> {
    state.feedback_state.begin_collection(chat_id, category).await;
    debug!(chat_id = chat_id, category = category.as_str(), "Awaiting feedback");

    let message = OutboundMessage::text(FEEDBACK_PROMPT).markup(keyboards::cancel_feedback());
    state.send(chat_id, message).await?;
    Ok(CallbackAnswer::Silent)
}

/// `cancel_feedback`: drop the pending category and bring back the menu.
pub async fn cancel(state: &BotState, chat_id: ChatId) -> AppResult<CallbackAnswer> {
    state.feedback_state.cancel(chat_id).await;

    let message = OutboundMessage::text(FEEDBACK_CANCELLED).markup(keyboards::main_menu());
    state.send(chat_id, message).await?;
    Ok(CallbackAnswer::Silent)
}

/// `feedback_end`: leave feedback mode with a thank-you notice.
pub async fn end(state: &BotState, chat_id: ChatId) -> AppResult<CallbackAnswer> {
    state.feedback_state.cancel(chat_id).await;

    state
        .send(chat_id, OutboundMessage::text(FEEDBACK_ENDED))
        .await?;
    Ok(CallbackAnswer::Notice(FEEDBACK_END_TOAST))
}

/// Free text: stored as feedback when a category is pending, ignored otherwise.
///
/// If storing fails the category is pending again, so the student can simply
/// resend the text.
pub async fn submit_text(
    state: &BotState,
    chat_id: ChatId,
    sender: &Sender,
    text: &str,
) -> AppResult<()> {
    let Some(category) = state.feedback_state.consume(chat_id).await else {
        debug!(chat_id = chat_id, "Ignoring text outside feedback collection");
        return Ok(());
    };

    match state
        .feedback
        .submit(sender.id, &sender.display_name, category, text)
        .await
    {
        Ok(saved) => {
            info!(chat_id = chat_id, feedback_id = saved.id, "Feedback accepted");
            let message = OutboundMessage::text(FEEDBACK_THANKS).markup(keyboards::after_feedback());
            state.send(chat_id, message).await
        }
        Err(e) => {
            e.log("Failed to save feedback");
            state.feedback_state.begin_collection(chat_id, category).await;

            let message =
                OutboundMessage::text(FEEDBACK_SAVE_FAILED).markup(keyboards::cancel_feedback());
            state.send(chat_id, message).await
        }
    }
}
