//! Outbound messaging.
//!
//! Handlers describe what to send with [`OutboundMessage`] and hand it to a
//! [`Messenger`]. The Bot API client implements the trait for production;
//! tests record messages instead.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use feedcat_common::AppResult;
use feedcat_core::ChatId;

/// Trait for delivering messages to chats.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send a message to a chat.
    async fn send(&self, chat_id: ChatId, message: OutboundMessage) -> AppResult<()>;

    /// Acknowledge a button press, optionally with a short notice shown to the user.
    async fn answer_callback(&self, callback_id: &str, notice: Option<&str>) -> AppResult<()>;
}

/// Type alias for a shared messenger.
pub type MessengerService = Arc<dyn Messenger>;

/// Body of an outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Plain message text.
    Text(String),
    /// An image with an optional caption.
    Photo {
        /// Where the image comes from.
        source: PhotoSource,
        /// Text under the image.
        caption: Option<String>,
    },
}

/// Where a photo comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSource {
    /// Fetched by the platform from a remote URL.
    Url(String),
    /// Uploaded from the local disk.
    File(PathBuf),
}

/// How the platform interprets markup in text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// The HTML subset (`<b>`, `<i>`, `<a>`).
    Html,
}

impl ParseMode {
    /// Name the Bot API expects.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Html => "HTML",
        }
    }
}

/// A button attached below a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    /// Label on the button.
    pub text: String,
    /// Callback data sent back when pressed.
    pub payload: String,
}

impl InlineButton {
    /// Button sending `payload` when pressed.
    pub fn new(text: impl Into<String>, payload: impl ToString) -> Self {
        Self {
            text: text.into(),
            payload: payload.to_string(),
        }
    }
}

/// Keyboard attached to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyMarkup {
    /// Buttons under the message that send a callback payload.
    Inline(Vec<Vec<InlineButton>>),
    /// Persistent keyboard replacing the text input; each button sends its label.
    Keyboard {
        /// Button labels, row by row.
        rows: Vec<Vec<String>>,
        /// Let the client shrink the keyboard to fit.
        resize: bool,
    },
}

impl ReplyMarkup {
    /// All inline payloads, row by row.
    #[must_use]
    pub fn payloads(&self) -> Vec<&str> {
        match self {
            Self::Inline(rows) => rows
                .iter()
                .flatten()
                .map(|button| button.payload.as_str())
                .collect(),
            Self::Keyboard { .. } => Vec::new(),
        }
    }
}

/// A message ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// What is sent.
    pub content: Content,
    /// Markup interpretation, plain text when absent.
    pub parse_mode: Option<ParseMode>,
    /// Keyboard attached to the message.
    pub markup: Option<ReplyMarkup>,
}

impl OutboundMessage {
    /// Plain text message.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: Content::Text(text.into()),
            parse_mode: None,
            markup: None,
        }
    }

    /// Photo without a caption.
    #[must_use]
    pub const fn photo(source: PhotoSource) -> Self {
        Self {
            content: Content::Photo {
                source,
                caption: None,
            },
            parse_mode: None,
            markup: None,
        }
    }

    /// Set the caption of a photo. Ignored for text messages.
    #[must_use]
    pub fn caption(mut self, text: impl Into<String>) -> Self {
        if let Content::Photo { caption, .. } = &mut self.content {
            *caption = Some(text.into());
        }
        self
    }

    /// Render the text or caption as HTML.
    #[must_use]
    pub const fn html(mut self) -> Self {
        self.parse_mode = Some(ParseMode::Html);
        self
    }

    /// Attach a keyboard.
    #[must_use]
    pub fn markup(mut self, markup: ReplyMarkup) -> Self {
        self.markup = Some(markup);
        self
    }

    /// The text, or the caption of a photo.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            Content::Photo { caption, .. } => caption.as_deref(),
        }
    }

    /// Whether this goes out as a photo.
    #[must_use]
    pub const fn is_photo(&self) -> bool {
        matches!(self.content, Content::Photo { .. })
    }
}
