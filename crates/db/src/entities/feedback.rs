//! Feedback entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of feedback a student leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum FeedbackCategory {
    /// Something the student liked.
    #[sea_orm(string_value = "liked")]
    Liked,
    /// Something the student would like to see added.
    #[sea_orm(string_value = "add")]
    Add,
}

impl FeedbackCategory {
    /// Wire name, shared by the database column and the button payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Liked => "liked",
            Self::Add => "add",
        }
    }

    /// Parse a wire name.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "liked" => Some(Self::Liked),
            "add" => Some(Self::Add),
            _ => None,
        }
    }
}

/// A single piece of feedback. Immutable once written.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "feedback")]
pub struct Model {
    /// Assigned by the database.
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Owning student.
    #[sea_orm(indexed)]
    pub student_id: i64,

    /// What kind of feedback it is.
    pub category: FeedbackCategory,

    /// Free-text body as the student typed it.
    #[sea_orm(column_type = "Text")]
    pub message: String,

    /// Time of submission.
    pub created_at: DateTime<Utc>,
}

/// Relationships.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The student who wrote it.
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_names() {
        assert_eq!(FeedbackCategory::Liked.as_str(), "liked");
        assert_eq!(FeedbackCategory::Add.as_str(), "add");
        assert_eq!(FeedbackCategory::parse("add"), Some(FeedbackCategory::Add));
        assert_eq!(FeedbackCategory::parse("disliked"), None);
    }
}
