//! Per-chat card game progress.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::ChatId;

/// Number of stages in the game.
pub const STAGE_COUNT: u8 = 9;

/// Number of choices offered on every stage.
pub const CHOICES_PER_STAGE: u8 = 3;

/// A stage index in `1..=STAGE_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Stage(u8);

impl Stage {
    /// The stage a new game starts at.
    pub const FIRST: Self = Self(1);
    /// The final stage.
    pub const LAST: Self = Self(STAGE_COUNT);

    /// Returns `None` when `n` is outside `1..=STAGE_COUNT`.
    #[must_use]
    pub const fn new(n: u8) -> Option<Self> {
        if n >= 1 && n <= STAGE_COUNT {
            Some(Self(n))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// The following stage, or `None` after the last one.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    #[must_use]
    pub const fn is_last(self) -> bool {
        self.0 == STAGE_COUNT
    }

    /// All stages in order.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=STAGE_COUNT).map(Self)
    }

    pub(crate) const fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A choice index in `1..=CHOICES_PER_STAGE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Choice(u8);

impl Choice {
    /// Returns `None` when `n` is outside `1..=CHOICES_PER_STAGE`.
    #[must_use]
    pub const fn new(n: u8) -> Option<Self> {
        if n >= 1 && n <= CHOICES_PER_STAGE {
            Some(Self(n))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// All choices in display order.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=CHOICES_PER_STAGE).map(Self)
    }

    pub(crate) const fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of [`GameProgressTracker::record_choice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceOutcome {
    /// The choice was recorded.
    Accepted,
    /// The stage already had a choice; nothing changed.
    AlreadyChosen,
}

/// Result of [`GameProgressTracker::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The chat moved on to this stage.
    Moved(Stage),
    /// The last stage was finished and the progress was cleared.
    Completed,
    /// The chat is not at that stage, or has not answered it yet.
    Stale,
}

/// Where a chat is in the game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameStage {
    #[default]
    NotStarted,
    InProgress(Stage),
}

#[derive(Debug, Clone, Default)]
struct GameProgress {
    stage: GameStage,
    choices: [Option<Choice>; STAGE_COUNT as usize],
}

/// Tracks the choices each chat made in the card game.
///
/// Once a stage has a choice it never changes until the chat's progress is
/// reset. Chats without progress have no entry in the map.
#[derive(Clone, Default)]
pub struct GameProgressTracker {
    chats: Arc<RwLock<HashMap<ChatId, GameProgress>>>,
}

impl GameProgressTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new game: drop earlier choices and move to the first stage.
    pub async fn start(&self, chat_id: ChatId) {
        let progress = GameProgress {
            stage: GameStage::InProgress(Stage::FIRST),
            ..GameProgress::default()
        };
        self.chats.write().await.insert(chat_id, progress);
    }

    /// Record a choice for a stage. The first answer wins.
    pub async fn record_choice(
        &self,
        chat_id: ChatId,
        stage: Stage,
        choice: Choice,
    ) -> ChoiceOutcome {
        let mut chats = self.chats.write().await;
        let slot = &mut chats.entry(chat_id).or_default().choices[stage.index()];

        if slot.is_some() {
            return ChoiceOutcome::AlreadyChosen;
        }

        *slot = Some(choice);
        ChoiceOutcome::Accepted
    }

    /// Drop the choice for a stage so it can be answered again.
    pub async fn forget_choice(&self, chat_id: ChatId, stage: Stage) {
        if let Some(progress) = self.chats.write().await.get_mut(&chat_id) {
            progress.choices[stage.index()] = None;
        }
    }

    /// The recorded choice for a stage, if any.
    pub async fn choice(&self, chat_id: ChatId, stage: Stage) -> Option<Choice> {
        self.chats
            .read()
            .await
            .get(&chat_id)
            .and_then(|progress| progress.choices[stage.index()])
    }

    /// Recorded choices indexed by stage, `0` meaning unselected.
    pub async fn selections(&self, chat_id: ChatId) -> [u8; STAGE_COUNT as usize] {
        let mut selections = [0; STAGE_COUNT as usize];
        if let Some(progress) = self.chats.read().await.get(&chat_id) {
            for (out, choice) in selections.iter_mut().zip(progress.choices) {
                *out = choice.map_or(0, Choice::get);
            }
        }
        selections
    }

    /// The chat's current stage.
    pub async fn stage(&self, chat_id: ChatId) -> GameStage {
        self.chats
            .read()
            .await
            .get(&chat_id)
            .map(|progress| progress.stage)
            .unwrap_or_default()
    }

    /// Whether the chat sits at `from` and has answered it.
    pub async fn ready_to_advance(&self, chat_id: ChatId, from: Stage) -> bool {
        self.chats
            .read()
            .await
            .get(&chat_id)
            .is_some_and(|progress| Self::is_ready(progress, from))
    }

    /// Move on from `from`.
    ///
    /// Leaving the last stage clears the chat's progress.
    pub async fn advance(&self, chat_id: ChatId, from: Stage) -> Advance {
        let mut chats = self.chats.write().await;

        let Some(progress) = chats.get_mut(&chat_id) else {
            return Advance::Stale;
        };
        if !Self::is_ready(progress, from) {
            return Advance::Stale;
        }

        match from.next() {
            Some(next) => {
                progress.stage = GameStage::InProgress(next);
                Advance::Moved(next)
            }
            None => {
                chats.remove(&chat_id);
                Advance::Completed
            }
        }
    }

    /// Clear all choices for a chat. Idempotent.
    pub async fn reset(&self, chat_id: ChatId) {
        self.chats.write().await.remove(&chat_id);
    }

    fn is_ready(progress: &GameProgress, from: Stage) -> bool {
        progress.stage == GameStage::InProgress(from) && progress.choices[from.index()].is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn stage(n: u8) -> Stage {
        Stage::new(n).unwrap()
    }

    fn choice(n: u8) -> Choice {
        Choice::new(n).unwrap()
    }

    #[test]
    fn test_index_ranges() {
        assert!(Stage::new(0).is_none());
        assert!(Stage::new(10).is_none());
        assert!(Choice::new(0).is_none());
        assert!(Choice::new(4).is_none());
        assert_eq!(Stage::all().count(), 9);
        assert_eq!(Stage::LAST.next(), None);
        assert_eq!(stage(3).next(), Some(stage(4)));
    }

    #[tokio::test]
    async fn test_first_answer_wins_on_every_stage() {
        let tracker = GameProgressTracker::new();

        for s in Stage::all() {
            assert_eq!(tracker.record_choice(200, s, choice(2)).await, ChoiceOutcome::Accepted);
            for c in Choice::all() {
                assert_eq!(
                    tracker.record_choice(200, s, c).await,
                    ChoiceOutcome::AlreadyChosen
                );
            }
            assert_eq!(tracker.choice(200, s).await, Some(choice(2)));
        }
    }

    #[tokio::test]
    async fn test_reset_is_idempotent() {
        let tracker = GameProgressTracker::new();
        tracker.record_choice(1, stage(4), choice(1)).await;

        for _ in 0..3 {
            tracker.reset(1).await;
            assert_eq!(tracker.selections(1).await, [0; 9]);
            assert_eq!(tracker.stage(1).await, GameStage::NotStarted);
        }
    }

    #[tokio::test]
    async fn test_start_clears_previous_game() {
        let tracker = GameProgressTracker::new();
        tracker.start(7).await;
        tracker.record_choice(7, stage(1), choice(3)).await;

        tracker.start(7).await;

        assert_eq!(tracker.stage(7).await, GameStage::InProgress(Stage::FIRST));
        assert_eq!(tracker.choice(7, stage(1)).await, None);
    }

    #[tokio::test]
    async fn test_advance_requires_answer_at_current_stage() {
        let tracker = GameProgressTracker::new();

        // No game at all
        assert_eq!(tracker.advance(3, stage(1)).await, Advance::Stale);

        tracker.start(3).await;
        // Not answered yet
        assert_eq!(tracker.advance(3, stage(1)).await, Advance::Stale);

        tracker.record_choice(3, stage(1), choice(1)).await;
        assert!(tracker.ready_to_advance(3, stage(1)).await);
        assert_eq!(tracker.advance(3, stage(1)).await, Advance::Moved(stage(2)));

        // Pressing the old button again does nothing
        assert_eq!(tracker.advance(3, stage(1)).await, Advance::Stale);
        assert_eq!(tracker.stage(3).await, GameStage::InProgress(stage(2)));
    }

    #[tokio::test]
    async fn test_full_playthrough_resets_at_the_end() {
        let tracker = GameProgressTracker::new();
        tracker.start(200).await;

        for s in Stage::all() {
            assert_eq!(tracker.record_choice(200, s, choice(1)).await, ChoiceOutcome::Accepted);
            let expected = s.next().map_or(Advance::Completed, Advance::Moved);
            assert_eq!(tracker.advance(200, s).await, expected);
        }

        assert_eq!(tracker.selections(200).await, [0; 9]);
        assert_eq!(tracker.stage(200).await, GameStage::NotStarted);
    }

    #[tokio::test]
    async fn test_forget_choice_reopens_stage() {
        let tracker = GameProgressTracker::new();
        tracker.start(9).await;
        tracker.record_choice(9, stage(1), choice(2)).await;

        tracker.forget_choice(9, stage(1)).await;

        assert_eq!(tracker.choice(9, stage(1)).await, None);
        assert!(!tracker.ready_to_advance(9, stage(1)).await);
        assert_eq!(tracker.record_choice(9, stage(1), choice(3)).await, ChoiceOutcome::Accepted);
        // Unknown chats stay unknown
        tracker.forget_choice(10, stage(1)).await;
        assert_eq!(tracker.stage(10).await, GameStage::NotStarted);
    }

    #[tokio::test]
    async fn test_selections_report_zero_for_unanswered() {
        let tracker = GameProgressTracker::new();
        tracker.record_choice(8, stage(2), choice(3)).await;

        assert_eq!(tracker.selections(8).await, [0, 3, 0, 0, 0, 0, 0, 0, 0]);
    }
}
