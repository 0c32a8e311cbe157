//! Database entities.

#![allow(missing_docs)]

pub mod feedback;
pub mod student;

pub use feedback::{Entity as Feedback, FeedbackCategory};
pub use student::Entity as Student;
