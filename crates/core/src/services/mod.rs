//! Conversation services.

#![allow(missing_docs)]

pub mod cards;
pub mod catalog;
pub mod feedback;
pub mod feedback_state;
pub mod game_progress;

pub use cards::CardAssets;
pub use catalog::{Catalog, StageContent};
pub use feedback::FeedbackService;
pub use feedback_state::{ConversationState, FeedbackStateTracker};
pub use game_progress::{
    Advance, CHOICES_PER_STAGE, Choice, ChoiceOutcome, GameProgressTracker, GameStage,
    STAGE_COUNT, Stage,
};
