//! Keyboards attached to outbound messages.

use feedcat_core::content::{
    FEEDBACK_ADD_LABEL, FEEDBACK_CANCEL_LABEL, FEEDBACK_END_LABEL, FEEDBACK_LIKED_LABEL,
    GAME_NEXT_LABEL, MAIN_MENU,
};
use feedcat_core::{Catalog, Choice, Stage};
use feedcat_db::entities::FeedbackCategory;

use crate::event::CallbackPayload;
use crate::messenger::{InlineButton, ReplyMarkup};

/// The four menu labels, two per row.
#[must_use]
pub fn main_menu() -> ReplyMarkup {
    ReplyMarkup::Keyboard {
        rows: MAIN_MENU
            .chunks(2)
            .map(|row| row.iter().map(|label| (*label).to_string()).collect())
            .collect(),
        resize: true,
    }
}

fn category_button(category: FeedbackCategory) -> InlineButton {
    let label = match category {
        FeedbackCategory::Liked => FEEDBACK_LIKED_LABEL,
        FeedbackCategory::Add => FEEDBACK_ADD_LABEL,
    };
    InlineButton::new(label, CallbackPayload::Category(category))
}

/// Category chooser, one button per row.
#[must_use]
pub fn feedback_categories() -> ReplyMarkup {
    ReplyMarkup::Inline(vec![
        vec![category_button(FeedbackCategory::Liked)],
        vec![category_button(FeedbackCategory::Add)],
    ])
}

/// A single "cancel" button under the feedback prompt.
#[must_use]
pub fn cancel_feedback() -> ReplyMarkup {
    ReplyMarkup::Inline(vec![vec![InlineButton::new(
        FEEDBACK_CANCEL_LABEL,
        CallbackPayload::CancelFeedback,
    )]])
}

/// Shown after a successful submission: both categories, then "finish".
#[must_use]
pub fn after_feedback() -> ReplyMarkup {
    ReplyMarkup::Inline(vec![
        vec![
            category_button(FeedbackCategory::Liked),
            category_button(FeedbackCategory::Add),
        ],
        vec![InlineButton::new(
            FEEDBACK_END_LABEL,
            CallbackPayload::EndFeedback,
        )],
    ])
}

/// The three card choices of a stage, one per row.
#[must_use]
pub fn stage_choices(catalog: &Catalog, stage: Stage) -> ReplyMarkup {
    let labels = catalog.choice_labels(stage);
    ReplyMarkup::Inline(
        Choice::all()
            .zip(labels)
            .map(|(choice, label)| {
                vec![InlineButton::new(
                    label,
                    CallbackPayload::Part { stage, choice },
                )]
            })
            .collect(),
    )
}

/// Moves on from `stage`.
#[must_use]
pub fn next_button(stage: Stage) -> ReplyMarkup {
    ReplyMarkup::Inline(vec![vec![InlineButton::new(
        GAME_NEXT_LABEL,
        CallbackPayload::Next { stage },
    )]])
}
