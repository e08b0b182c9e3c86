//! Create `expense` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Expense::Table)
                    .if_not_exists()
                    .col(uuid(Expense::Id).primary_key())
                    .col(uuid(Expense::GroupId).not_null())
                    .col(uuid(Expense::PayerId).not_null())
                    .col(decimal_len(Expense::Amount, 12, 2).not_null())
                    .col(string_len(Expense::Description, 255).not_null())
                    .col(string_len(Expense::SplitType, 16).not_null())
                    .col(timestamp_with_time_zone(Expense::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expense_payer")
                            .from(Expense::Table, Expense::PayerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Expense::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Expense { Table, Id, GroupId, PayerId, Amount, Description, SplitType, CreatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }
