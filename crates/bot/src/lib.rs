//! Telegram front-end for feedcat.
//!
//! This crate turns platform updates into conversation events and back:
//!
//! - **Events**: inbound messages and button presses, routed by text or payload
//! - **Handlers**: menu, feedback collection and the card game
//! - **Messenger**: the outbound seam, implemented by the Bot API client
//! - **Polling**: the `getUpdates` loop feeding the dispatcher

pub mod event;
pub mod handlers;
pub mod keyboards;
pub mod messenger;
pub mod polling;
pub mod telegram;
pub mod test_utils;

pub use event::{CallbackPayload, Event, Route, Sender};
pub use handlers::{BotState, Dispatcher};
pub use messenger::{Messenger, MessengerService, OutboundMessage};
pub use polling::Poller;
pub use telegram::TelegramClient;
