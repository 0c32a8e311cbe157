//! Database repositories.

pub mod feedback;
pub mod student;

pub use feedback::FeedbackRepository;
pub use student::StudentRepository;
