//! Common utilities and shared types for feedcat.
//!
//! This crate provides the foundational pieces used across all feedcat crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//!
//! # Example
//!
//! ```no_run
//! use feedcat_common::{AppResult, Config};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     println!("Polling {}", config.telegram.api_url);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;

pub use config::{CatalogKind, Config};
pub use error::{AppError, AppResult};
