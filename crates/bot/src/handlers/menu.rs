//! Main menu entries.

use feedcat_common::AppResult;
use feedcat_core::ChatId;
use feedcat_core::content::{
    FEEDBACK_CHOOSE_CATEGORY, GREETING_CAPTION, HELP_TEXT, RESOURCES_CAPTION,
};

use super::BotState;
use crate::keyboards;
use crate::messenger::{OutboundMessage, PhotoSource};

/// `/start`: greeting image and the main menu keyboard.
pub async fn start(state: &BotState, chat_id: ChatId) -> AppResult<()> {
    let message = OutboundMessage::photo(PhotoSource::Url(state.content.greeting_image.clone()))
        .caption(GREETING_CAPTION)
        .html()
        .markup(keyboards::main_menu());
    state.send(chat_id, message).await
}

/// "Обратная связь": offer the two categories.
pub async fn feedback_menu(state: &BotState, chat_id: ChatId) -> AppResult<()> {
    let message =
        OutboundMessage::text(FEEDBACK_CHOOSE_CATEGORY).markup(keyboards::feedback_categories());
    state.send(chat_id, message).await
}

/// "Помощь"
pub async fn help(state: &BotState, chat_id: ChatId) -> AppResult<()> {
    state
        .send(chat_id, OutboundMessage::text(HELP_TEXT).html())
        .await
}

/// Useful links with the resources image.
pub async fn resources(state: &BotState, chat_id: ChatId) -> AppResult<()> {
    let message =
        OutboundMessage::photo(PhotoSource::Url(state.content.resources_image.clone()))
            .caption(RESOURCES_CAPTION)
            .html();
    state.send(chat_id, message).await
}
