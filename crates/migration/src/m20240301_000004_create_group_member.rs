//! Create `group_member` join table.
//!
//! `group_id` has no FK: deleting a group leaves memberships behind and readers skip them.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GroupMember::Table)
                    .if_not_exists()
                    .col(uuid(GroupMember::Id).primary_key())
                    .col(uuid(GroupMember::GroupId).not_null())
                    .col(uuid(GroupMember::UserId).not_null())
                    .col(boolean(GroupMember::IsAdmin).not_null())
                    .col(timestamp_with_time_zone(GroupMember::JoinedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_member_user")
                            .from(GroupMember::Table, GroupMember::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(GroupMember::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum GroupMember { Table, Id, GroupId, UserId, IsAdmin, JoinedAt }

#[derive(DeriveIden)]
enum User { Table, Id }
