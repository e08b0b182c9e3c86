use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // GroupMember: one membership per (group, user)
        manager
            .create_index(
                Index::create()
                    .name("uniq_group_member_group_user")
                    .table(GroupMember::Table)
                    .col(GroupMember::GroupId)
                    .col(GroupMember::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // GroupMember: listing a user's groups
        manager
            .create_index(
                Index::create()
                    .name("idx_group_member_user")
                    .table(GroupMember::Table)
                    .col(GroupMember::UserId)
                    .to_owned(),
            )
            .await?;

        // Payment: per-group ledger ordered by time
        manager
            .create_index(
                Index::create()
                    .name("idx_payment_group_created")
                    .table(Payment::Table)
                    .col(Payment::GroupId)
                    .col(Payment::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_expense_group")
                    .table(Expense::Table)
                    .col(Expense::GroupId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_group_member_group_user").table(GroupMember::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_group_member_user").table(GroupMember::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_payment_group_created").table(Payment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_expense_group").table(Expense::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GroupMember { Table, GroupId, UserId }

#[derive(DeriveIden)]
enum Payment { Table, GroupId, CreatedAt }

#[derive(DeriveIden)]
enum Expense { Table, GroupId }
