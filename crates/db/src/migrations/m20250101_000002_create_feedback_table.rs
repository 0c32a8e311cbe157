//! Create feedback table migration.

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_students_table::Students;

#[derive(DeriveMigrationName)]
/// Creates `feedback` with its foreign key to `students`.
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Feedback::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Feedback::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Feedback::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Feedback::Category).string_len(16).not_null())
                    .col(ColumnDef::new(Feedback::Message).text().not_null())
                    .col(
                        ColumnDef::new(Feedback::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    // Students are never deleted, so no cascade.
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feedback_student")
                            .from(Feedback::Table, Feedback::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: student_id
        manager
            .create_index(
                Index::create()
                    .name("idx_feedback_student_id")
                    .table(Feedback::Table)
                    .col(Feedback::StudentId)
                    .to_owned(),
            )
            .await?;

        // Index: category (for per-category reports)
        manager
            .create_index(
                Index::create()
                    .name("idx_feedback_category")
                    .table(Feedback::Table)
                    .col(Feedback::Category)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Feedback::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Feedback {
    Table,
    Id,
    StudentId,
    Category,
    Message,
    CreatedAt,
}
