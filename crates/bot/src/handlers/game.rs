//! The nine-stage card game.

use std::path::PathBuf;

use feedcat_common::AppResult;
use feedcat_core::content::{GAME_ALREADY_CHOSEN, GAME_CARD_UNAVAILABLE, GAME_COMPLETED, GAME_CONTINUE_PROMPT};
use feedcat_core::{Advance, ChatId, Choice, ChoiceOutcome, GameStage, Stage};
use tracing::{debug, info};

use super::{BotState, CallbackAnswer};
use crate::keyboards;
use crate::messenger::{OutboundMessage, PhotoSource};

/// "Игра": start over at the first card.
pub async fn start(state: &BotState, chat_id: ChatId) -> AppResult<()> {
    state.game.start(chat_id).await;
    info!(chat_id = chat_id, "Game started");

    match state.cards.find(Stage::FIRST).await {
        Some(card) => send_card(state, chat_id, Stage::FIRST, card).await,
        None => card_unavailable(state, chat_id).await,
    }
}

/// `part_<stage>_<choice>`
pub async fn choose(
    state: &BotState,
    chat_id: ChatId,
    stage: Stage,
    choice: Choice,
) -> AppResult<CallbackAnswer> {
    if state.game.choice(chat_id, stage).await.is_some() {
        return Ok(CallbackAnswer::Notice(GAME_ALREADY_CHOSEN));
    }
    if state.game.stage(chat_id).await != GameStage::InProgress(stage) {
        debug!(chat_id = chat_id, stage = stage.get(), "Ignoring choice for inactive stage");
        return Ok(CallbackAnswer::Silent);
    }

    if state.game.record_choice(chat_id, stage, choice).await == ChoiceOutcome::AlreadyChosen {
        return Ok(CallbackAnswer::Notice(GAME_ALREADY_CHOSEN));
    }
    debug!(chat_id = chat_id, stage = stage.get(), choice = choice.get(), "Choice recorded");

    // An answer the chat never saw must not lock the stage.
    if let Err(e) = reveal_choice(state, chat_id, stage, choice).await {
        state.game.forget_choice(chat_id, stage).await;
        return Err(e);
    }

    Ok(CallbackAnswer::Silent)
}

async fn reveal_choice(
    state: &BotState,
    chat_id: ChatId,
    stage: Stage,
    choice: Choice,
) -> AppResult<()> {
    let text = state.catalog.stage_text(stage, choice);
    state
        .send(chat_id, OutboundMessage::text(text).html())
        .await?;

    let prompt = OutboundMessage::text(GAME_CONTINUE_PROMPT).markup(keyboards::next_button(stage));
    state.send(chat_id, prompt).await
}

/// `next_<stage>`: show the following card, or finish after the last one.
///
/// The chat stays on its stage until the next card has been delivered.
pub async fn next(state: &BotState, chat_id: ChatId, stage: Stage) -> AppResult<CallbackAnswer> {
    if !state.game.ready_to_advance(chat_id, stage).await {
        debug!(chat_id = chat_id, stage = stage.get(), "Ignoring stale next button");
        return Ok(CallbackAnswer::Silent);
    }

    let Some(following) = stage.next() else {
        if state.game.advance(chat_id, stage).await == Advance::Completed {
            info!(chat_id = chat_id, "Game completed");
            state
                .send(chat_id, OutboundMessage::text(GAME_COMPLETED))
                .await?;
        }
        return Ok(CallbackAnswer::Silent);
    };

    let Some(card) = state.cards.find(following).await else {
        card_unavailable(state, chat_id).await?;
        return Ok(CallbackAnswer::Silent);
    };

    send_card(state, chat_id, following, card).await?;
    if state.game.advance(chat_id, stage).await == Advance::Stale {
        debug!(chat_id = chat_id, stage = stage.get(), "Progress changed while sending card");
    }
    Ok(CallbackAnswer::Silent)
}

async fn send_card(state: &BotState, chat_id: ChatId, stage: Stage, card: PathBuf) -> AppResult<()> {
    let message = OutboundMessage::photo(PhotoSource::File(card))
        .markup(keyboards::stage_choices(&state.catalog, stage));
    state.send(chat_id, message).await
}

async fn card_unavailable(state: &BotState, chat_id: ChatId) -> AppResult<()> {
    state
        .send(chat_id, OutboundMessage::text(GAME_CARD_UNAVAILABLE))
        .await
}
