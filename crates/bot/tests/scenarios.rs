//! Conversation scenarios driven through the dispatcher.
//!
//! Each test wires a dispatcher to a recording messenger and a mock database
//! and plays a conversation as a user would.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use feedcat_bot::messenger::{Content, PhotoSource, ReplyMarkup};
use feedcat_bot::test_utils::{CallbackAck, RecordingMessenger, bot_state};
use feedcat_bot::{Dispatcher, Event, Sender};
use feedcat_core::{
    CardAssets, Choice, ConversationState, FeedbackService, GameStage, STAGE_COUNT, Stage,
};
use feedcat_db::entities::{FeedbackCategory, feedback, student};
use feedcat_db::repositories::FeedbackRepository;
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase};

struct Harness {
    dispatcher: Dispatcher,
    messenger: Arc<RecordingMessenger>,
    cards_dir: PathBuf,
    next_callback: u32,
}

impl Harness {
    async fn new(db: Arc<DatabaseConnection>, cards: &[u8]) -> Self {
        let cards_dir =
            std::env::temp_dir().join(format!("feedcat-scenario-{}", uuid::Uuid::new_v4()));
        let assets = CardAssets::new(&cards_dir);
        assets.ensure_dir().await.unwrap();
        for &n in cards {
            tokio::fs::write(assets.path_for(Stage::new(n).unwrap()), b"png")
                .await
                .unwrap();
        }

        let messenger = Arc::new(RecordingMessenger::default());
        let feedback = FeedbackService::new(FeedbackRepository::new(db));
        let dispatcher = Dispatcher::new(bot_state(messenger.clone(), feedback, assets));

        Self {
            dispatcher,
            messenger,
            cards_dir,
            next_callback: 0,
        }
    }

    async fn with_all_cards(db: Arc<DatabaseConnection>) -> Self {
        let all: Vec<u8> = (1..=STAGE_COUNT).collect();
        Self::new(db, &all).await
    }

    fn sender(chat_id: i64) -> Sender {
        Sender::new(chat_id, "Анна", Some("Петрова"))
    }

    async fn text(&self, chat_id: i64, text: &str) {
        self.dispatcher
            .dispatch(Event::Message {
                chat_id,
                sender: Self::sender(chat_id),
                text: text.to_string(),
            })
            .await;
    }

    async fn press(&mut self, chat_id: i64, data: &str) -> CallbackAck {
        self.next_callback += 1;
        let id = format!("cb-{}", self.next_callback);
        self.dispatcher
            .dispatch(Event::Callback {
                id: id.clone(),
                chat_id,
                sender: Self::sender(chat_id),
                data: data.to_string(),
            })
            .await;

        let acks: Vec<CallbackAck> = self
            .messenger
            .acks()
            .await
            .into_iter()
            .filter(|ack| ack.callback_id == id)
            .collect();
        assert_eq!(acks.len(), 1, "callback {data} must be answered exactly once");
        acks.into_iter().next().unwrap()
    }

    async fn bodies(&self) -> Vec<String> {
        self.messenger
            .take_sent()
            .await
            .iter()
            .filter_map(|m| m.body().map(str::to_string))
            .collect()
    }

    async fn cleanup(self) {
        tokio::fs::remove_dir_all(&self.cards_dir).await.unwrap();
    }
}

fn empty_db() -> Arc<DatabaseConnection> {
    Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
}

fn student_row(id: i64) -> student::Model {
    student::Model {
        id,
        name: "Анна Петрова".to_string(),
        created_at: Utc::now(),
    }
}

fn feedback_row(student_id: i64, category: FeedbackCategory, message: &str) -> feedback::Model {
    feedback::Model {
        id: 1,
        student_id,
        category,
        message: message.to_string(),
        created_at: Utc::now(),
    }
}

fn stage(n: u8) -> Stage {
    Stage::new(n).unwrap()
}

#[tokio::test]
async fn start_sends_greeting_with_main_menu() {
    let harness = Harness::with_all_cards(empty_db()).await;

    harness.text(100, "/start").await;

    let sent = harness.messenger.take_sent().await;
    assert_eq!(sent.len(), 1);
    let greeting = &sent[0];
    assert!(matches!(
        &greeting.content,
        Content::Photo { source: PhotoSource::Url(url), .. } if url.starts_with("https://")
    ));
    assert!(greeting.body().unwrap().contains("кот для сбора обратной связи"));

    let Some(ReplyMarkup::Keyboard { rows, resize }) = &greeting.markup else {
        panic!("greeting must carry the main menu");
    };
    assert!(resize);
    assert_eq!(rows.iter().flatten().count(), 4);

    harness.cleanup().await;
}

#[tokio::test]
async fn liked_feedback_is_stored_for_new_student() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<student::Model>::new()])
            .append_query_results([[student_row(100)]])
            .append_query_results([[feedback_row(100, FeedbackCategory::Liked, "Great app")]])
            .into_connection(),
    );
    let mut harness = Harness::with_all_cards(db.clone()).await;

    harness.text(100, "Обратная связь").await;
    let sent = harness.messenger.take_sent().await;
    assert_eq!(sent[0].body(), Some("Выберите тип обратной связи:"));
    assert_eq!(sent[0].markup.as_ref().unwrap().payloads(), ["liked", "add"]);

    let ack = harness.press(100, "liked").await;
    assert_eq!(ack.notice, None);
    assert_eq!(harness.bodies().await, ["Напишите вашу обратную связь:"]);
    assert_eq!(
        harness.dispatcher.state().feedback_state.state(100).await,
        ConversationState::AwaitingFeedback(FeedbackCategory::Liked)
    );

    harness.text(100, "Great app").await;

    let sent = harness.messenger.take_sent().await;
    assert_eq!(sent.len(), 1);
    assert!(sent[0].body().unwrap().starts_with("✅ Спасибо"));
    assert_eq!(
        sent[0].markup.as_ref().unwrap().payloads(),
        ["liked", "add", "feedback_end"]
    );
    assert!(!harness.dispatcher.state().feedback_state.is_awaiting(100).await);

    let cards_dir = harness.cards_dir.clone();
    drop(harness);
    tokio::fs::remove_dir_all(cards_dir).await.unwrap();
    let log = format!(
        "{:?}",
        Arc::try_unwrap(db).unwrap().into_transaction_log()
    );
    assert!(log.contains("students"));
    assert!(log.contains("Great app"));
    assert!(log.contains("liked"));
}

#[tokio::test]
async fn cancelled_feedback_is_not_stored() {
    let db = empty_db();
    let mut harness = Harness::with_all_cards(db.clone()).await;

    harness.press(100, "liked").await;
    harness.press(100, "cancel_feedback").await;

    let sent = harness.messenger.take_sent().await;
    assert_eq!(sent.last().unwrap().body(), Some("Отмена отправки сообщения"));
    assert!(matches!(
        sent.last().unwrap().markup,
        Some(ReplyMarkup::Keyboard { .. })
    ));
    assert_eq!(
        harness.dispatcher.state().feedback_state.state(100).await,
        ConversationState::Idle
    );

    // Free text while idle goes nowhere
    harness.text(100, "Great app").await;
    assert!(harness.messenger.take_sent().await.is_empty());

    let cards_dir = harness.cards_dir.clone();
    drop(harness);
    tokio::fs::remove_dir_all(cards_dir).await.unwrap();
    assert!(Arc::try_unwrap(db).unwrap().into_transaction_log().is_empty());
}

#[tokio::test]
async fn feedback_end_thanks_and_clears_state() {
    let mut harness = Harness::with_all_cards(empty_db()).await;

    harness.press(100, "add").await;
    harness.messenger.take_sent().await;

    let ack = harness.press(100, "feedback_end").await;

    assert_eq!(ack.notice.as_deref(), Some("Спасибо за участие!"));
    assert_eq!(
        harness.bodies().await,
        ["Обратная связь завершена. Если хотите, можете продолжить игру."]
    );
    assert!(!harness.dispatcher.state().feedback_state.is_awaiting(100).await);

    harness.cleanup().await;
}

#[tokio::test]
async fn menu_text_is_not_taken_as_feedback() {
    let mut harness = Harness::with_all_cards(empty_db()).await;

    harness.press(100, "liked").await;
    harness.messenger.take_sent().await;

    harness.text(100, "Помощь").await;

    let bodies = harness.bodies().await;
    assert_eq!(bodies.len(), 1);
    assert!(bodies[0].contains("Для того, чтобы оставить обратную связь"));
    assert!(harness.dispatcher.state().feedback_state.is_awaiting(100).await);

    harness.cleanup().await;
}

#[tokio::test]
async fn first_choice_wins() {
    let mut harness = Harness::with_all_cards(empty_db()).await;

    harness.text(200, "Игра").await;
    let sent = harness.messenger.take_sent().await;
    assert_eq!(sent.len(), 1);
    assert!(matches!(
        &sent[0].content,
        Content::Photo { source: PhotoSource::File(path), .. } if path.ends_with("1.png")
    ));
    assert_eq!(
        sent[0].markup.as_ref().unwrap().payloads(),
        ["part_1_1", "part_1_2", "part_1_3"]
    );

    let ack = harness.press(200, "part_1_2").await;
    assert_eq!(ack.notice, None);
    let sent = harness.messenger.take_sent().await;
    assert_eq!(sent.len(), 2);
    assert!(sent[0].body().unwrap().contains("первого конкретного шага"));
    assert_eq!(sent[1].body(), Some("Продолжить игру!"));
    assert_eq!(sent[1].markup.as_ref().unwrap().payloads(), ["next_1"]);

    let ack = harness.press(200, "part_1_3").await;
    assert_eq!(ack.notice.as_deref(), Some("Вы уже выбрали картинку!"));
    assert!(harness.messenger.take_sent().await.is_empty());

    let game = &harness.dispatcher.state().game;
    assert_eq!(game.choice(200, stage(1)).await, Choice::new(2));

    harness.cleanup().await;
}

#[tokio::test]
async fn full_playthrough_completes_and_resets() {
    let mut harness = Harness::with_all_cards(empty_db()).await;

    harness.text(200, "Игра").await;
    harness.messenger.take_sent().await;

    for n in 1..=STAGE_COUNT {
        harness.press(200, &format!("part_{n}_1")).await;
        harness.messenger.take_sent().await;

        harness.press(200, &format!("next_{n}")).await;
        let sent = harness.messenger.take_sent().await;
        assert_eq!(sent.len(), 1);

        if n < STAGE_COUNT {
            assert!(sent[0].is_photo());
            let expected = [1, 2, 3].map(|k| format!("part_{}_{k}", n + 1));
            assert_eq!(sent[0].markup.as_ref().unwrap().payloads(), expected);
        } else {
            assert!(sent[0].body().unwrap().starts_with("🎉 Вы завершили игру!"));
        }
    }

    let game = &harness.dispatcher.state().game;
    assert_eq!(game.selections(200).await, [0; STAGE_COUNT as usize]);
    assert_eq!(game.stage(200).await, GameStage::NotStarted);

    harness.cleanup().await;
}

#[tokio::test]
async fn save_failure_apologizes_and_keeps_category_pending() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            // First attempt: feedback insert fails, transaction rolls back
            .append_query_results([Vec::<student::Model>::new()])
            .append_query_results([[student_row(100)]])
            .append_query_errors([DbErr::Custom("commit failed".to_string())])
            // Second attempt succeeds
            .append_query_results([Vec::<student::Model>::new()])
            .append_query_results([[student_row(100)]])
            .append_query_results([[feedback_row(100, FeedbackCategory::Add, "Больше игр")]])
            .into_connection(),
    );
    let mut harness = Harness::with_all_cards(db.clone()).await;

    harness.press(100, "add").await;
    harness.messenger.take_sent().await;

    harness.text(100, "Больше игр").await;

    let bodies = harness.bodies().await;
    assert_eq!(bodies.len(), 1);
    assert!(bodies[0].contains("Не удалось сохранить"));
    assert_eq!(
        harness.dispatcher.state().feedback_state.state(100).await,
        ConversationState::AwaitingFeedback(FeedbackCategory::Add)
    );

    harness.text(100, "Больше игр").await;

    let bodies = harness.bodies().await;
    assert!(bodies[0].starts_with("✅ Спасибо"));
    assert!(!harness.dispatcher.state().feedback_state.is_awaiting(100).await);

    let cards_dir = harness.cards_dir.clone();
    drop(harness);
    tokio::fs::remove_dir_all(cards_dir).await.unwrap();

    // The failed attempt leaves no student behind
    let log = Arc::try_unwrap(db).unwrap().into_transaction_log();
    assert_eq!(log.len(), 2);
    let failed = format!("{:?}", log[0]);
    assert!(failed.contains("INSERT INTO") && failed.contains("students"));
    assert!(failed.contains("ROLLBACK"));
    assert!(!failed.contains("COMMIT"));
    let saved = format!("{:?}", log[1]);
    assert!(saved.contains("COMMIT"));
}

#[tokio::test]
async fn missing_card_keeps_current_stage() {
    let mut harness = Harness::new(empty_db(), &[1]).await;

    harness.text(300, "Игра").await;
    harness.press(300, "part_1_1").await;
    harness.messenger.take_sent().await;

    harness.press(300, "next_1").await;

    assert_eq!(harness.bodies().await, ["Изображение временно недоступно"]);
    assert_eq!(
        harness.dispatcher.state().game.stage(300).await,
        GameStage::InProgress(stage(1))
    );

    harness.cleanup().await;
}

#[tokio::test]
async fn stale_and_unknown_buttons_are_answered_quietly() {
    let mut harness = Harness::with_all_cards(empty_db()).await;

    // No game yet, e.g. after a restart
    assert_eq!(harness.press(400, "next_3").await.notice, None);
    assert_eq!(harness.press(400, "part_5_1").await.notice, None);
    assert_eq!(harness.press(400, "bogus").await.notice, None);
    assert_eq!(harness.press(400, "part_1_9").await.notice, None);
    assert!(harness.messenger.take_sent().await.is_empty());

    harness.text(400, "Игра").await;
    // Next before answering
    harness.press(400, "next_1").await;
    // Choice for a later stage
    harness.press(400, "part_2_1").await;
    harness.messenger.take_sent().await;

    let game = &harness.dispatcher.state().game;
    assert_eq!(game.stage(400).await, GameStage::InProgress(stage(1)));
    assert_eq!(game.selections(400).await, [0; STAGE_COUNT as usize]);

    harness.cleanup().await;
}

#[tokio::test]
async fn restarting_the_game_clears_earlier_answers() {
    let mut harness = Harness::with_all_cards(empty_db()).await;

    harness.text(500, "Игра").await;
    harness.press(500, "part_1_3").await;
    harness.press(500, "next_1").await;
    harness.press(500, "part_2_2").await;

    harness.text(500, "Игра").await;
    harness.messenger.take_sent().await;

    let ack = harness.press(500, "part_1_1").await;
    assert_eq!(ack.notice, None);
    let game = &harness.dispatcher.state().game;
    assert_eq!(game.choice(500, stage(1)).await, Choice::new(1));
    assert_eq!(game.choice(500, stage(2)).await, None);

    harness.cleanup().await;
}

#[tokio::test]
async fn failed_card_delivery_keeps_current_stage() {
    let mut harness = Harness::with_all_cards(empty_db()).await;

    harness.text(600, "Игра").await;
    harness.press(600, "part_1_1").await;
    harness.messenger.take_sent().await;

    harness.messenger.set_failing(true);
    let ack = harness.press(600, "next_1").await;
    assert_eq!(ack.notice, None);
    assert_eq!(
        harness.dispatcher.state().game.stage(600).await,
        GameStage::InProgress(stage(1))
    );

    // The same button works once sending recovers
    harness.messenger.set_failing(false);
    harness.press(600, "next_1").await;
    let sent = harness.messenger.take_sent().await;
    assert_eq!(sent.len(), 1);
    assert!(matches!(
        &sent[0].content,
        Content::Photo { source: PhotoSource::File(path), .. } if path.ends_with("2.png")
    ));
    assert_eq!(
        harness.dispatcher.state().game.stage(600).await,
        GameStage::InProgress(stage(2))
    );

    harness.cleanup().await;
}

#[tokio::test]
async fn failed_choice_delivery_allows_choosing_again() {
    let mut harness = Harness::with_all_cards(empty_db()).await;

    harness.text(700, "Игра").await;
    harness.messenger.take_sent().await;

    harness.messenger.set_failing(true);
    harness.press(700, "part_1_2").await;
    assert_eq!(harness.dispatcher.state().game.choice(700, stage(1)).await, None);

    harness.messenger.set_failing(false);
    let ack = harness.press(700, "part_1_3").await;
    assert_eq!(ack.notice, None);
    let sent = harness.messenger.take_sent().await;
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].markup.as_ref().unwrap().payloads(), ["next_1"]);
    assert_eq!(
        harness.dispatcher.state().game.choice(700, stage(1)).await,
        Choice::new(3)
    );

    harness.cleanup().await;
}
