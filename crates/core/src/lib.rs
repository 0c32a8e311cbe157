//! Core conversation logic for feedcat.
//!
//! Holds the per-chat trackers, the card catalog and the feedback service.
//! Nothing here knows about the messaging transport.

pub mod content;
pub mod services;

pub use services::*;

/// Chat identifier assigned by the messaging platform.
pub type ChatId = i64;
