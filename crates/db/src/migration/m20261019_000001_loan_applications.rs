//! Creates the loan_applications table.
//!
//! Built with the schema builder rather than raw SQL so the same migration
//! runs on Postgres and on the SQLite databases used in tests.

use sea_orm_migration::prelude::*;

/// Creates `loan_applications` and its `created_at` index.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LoanApplications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LoanApplications::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LoanApplications::Name).string().not_null())
                    .col(ColumnDef::new(LoanApplications::Email).string().not_null())
                    .col(
                        ColumnDef::new(LoanApplications::Telephone)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LoanApplications::Occupation)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LoanApplications::Salary).string().not_null())
                    .col(
                        ColumnDef::new(LoanApplications::DocumentUrl)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(LoanApplications::DocumentName)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(LoanApplications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LoanApplications::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing is always newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_loan_applications_created_at")
                    .table(LoanApplications::Table)
                    .col(LoanApplications::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(LoanApplications::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum LoanApplications {
    Table,
    Id,
    Name,
    Email,
    Telephone,
    Occupation,
    Salary,
    DocumentUrl,
    DocumentName,
    CreatedAt,
    UpdatedAt,
}
