//! Inbound events and routing.

use std::fmt;

use feedcat_core::content::{MENU_FEEDBACK, MENU_GAME, MENU_HELP, MENU_RESOURCES};
use feedcat_core::{ChatId, Choice, Stage};
use feedcat_db::entities::FeedbackCategory;

const CANCEL_FEEDBACK: &str = "cancel_feedback";
const END_FEEDBACK: &str = "feedback_end";
const PART_PREFIX: &str = "part_";
const NEXT_PREFIX: &str = "next_";

/// The user behind an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    /// Platform user id, also used as the student id.
    pub id: i64,
    /// First and last name joined by a space.
    pub display_name: String,
}

impl Sender {
    /// Build a sender from the platform's name parts.
    #[must_use]
    pub fn new(id: i64, first_name: &str, last_name: Option<&str>) -> Self {
        let display_name = match last_name {
            Some(last) if !last.is_empty() => format!("{first_name} {last}"),
            _ => first_name.to_string(),
        };
        Self { id, display_name }
    }
}

/// An update the bot reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A text message.
    Message {
        chat_id: ChatId,
        sender: Sender,
        text: String,
    },
    /// An inline button press.
    Callback {
        id: String,
        chat_id: ChatId,
        sender: Sender,
        data: String,
    },
}

impl Event {
    #[must_use]
    /// Chat the event came from.
    pub const fn chat_id(&self) -> ChatId {
        match self {
            Self::Message { chat_id, .. } | Self::Callback { chat_id, .. } => *chat_id,
        }
    }
}

/// Decoded inline button payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackPayload {
    /// `liked` or `add`
    Category(FeedbackCategory),
    /// `cancel_feedback`
    CancelFeedback,
    /// `feedback_end`
    EndFeedback,
    /// `part_<stage>_<choice>`
    Part { stage: Stage, choice: Choice },
    /// `next_<stage>`
    Next { stage: Stage },
}

impl CallbackPayload {
    /// Parse a payload. Unknown or out-of-range payloads yield `None`.
    #[must_use]
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            CANCEL_FEEDBACK => return Some(Self::CancelFeedback),
            END_FEEDBACK => return Some(Self::EndFeedback),
            _ => {}
        }

        if let Some(category) = FeedbackCategory::parse(data) {
            return Some(Self::Category(category));
        }

        if let Some(rest) = data.strip_prefix(PART_PREFIX) {
            let (stage, choice) = rest.split_once('_')?;
            return Some(Self::Part {
                stage: Stage::new(stage.parse().ok()?)?,
                choice: Choice::new(choice.parse().ok()?)?,
            });
        }

        let stage = data.strip_prefix(NEXT_PREFIX)?;
        Some(Self::Next {
            stage: Stage::new(stage.parse().ok()?)?,
        })
    }
}

impl fmt::Display for CallbackPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category(category) => f.write_str(category.as_str()),
            Self::CancelFeedback => f.write_str(CANCEL_FEEDBACK),
            Self::EndFeedback => f.write_str(END_FEEDBACK),
            Self::Part { stage, choice } => write!(f, "{PART_PREFIX}{stage}_{choice}"),
            Self::Next { stage } => write!(f, "{NEXT_PREFIX}{stage}"),
        }
    }
}

/// Where an event goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/start`, with or without arguments.
    Start,
    /// "Обратная связь"
    FeedbackMenu,
    /// "Помощь"
    Help,
    /// "Ресурсы"
    Resources,
    /// "Игра"
    Game,
    /// Any other text; only meaningful while feedback is awaited.
    FreeText,
    /// A recognised button press.
    Callback(CallbackPayload),
    /// A payload nobody understands.
    UnknownCallback,
}

impl Route {
    /// Route a text message. Commands and menu labels win over free text.
    #[must_use]
    pub fn for_text(text: &str) -> Self {
        if is_start_command(text) {
            return Self::Start;
        }
        match text {
            MENU_FEEDBACK => Self::FeedbackMenu,
            MENU_HELP => Self::Help,
            MENU_RESOURCES => Self::Resources,
            MENU_GAME => Self::Game,
            _ => Self::FreeText,
        }
    }

    /// Route a button payload.
    #[must_use]
    pub fn for_callback(data: &str) -> Self {
        CallbackPayload::parse(data).map_or(Self::UnknownCallback, Self::Callback)
    }

    /// Route any event.
    #[must_use]
    pub fn of(event: &Event) -> Self {
        match event {
            Event::Message { text, .. } => Self::for_text(text),
            Event::Callback { data, .. } => Self::for_callback(data),
        }
    }
}

/// `/start`, `/start <args>` or `/start@botname`.
fn is_start_command(text: &str) -> bool {
    let command = text.split_whitespace().next().unwrap_or_default();
    let command = command.split_once('@').map_or(command, |(name, _)| name);
    command == "/start"
}
