//! Create `group` table with FK to the creating `user`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Group::Table)
                    .if_not_exists()
                    .col(uuid(Group::Id).primary_key())
                    .col(string_len(Group::Name, 128).not_null())
                    .col(string_len(Group::Type, 32).not_null())
                    .col(uuid(Group::CreatedBy).not_null())
                    .col(string_len_null(Group::ProfileImageUrl, 512))
                    .col(timestamp_with_time_zone(Group::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Group::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_created_by")
                            .from(Group::Table, Group::CreatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Group::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Group { Table, Id, Name, Type, CreatedBy, ProfileImageUrl, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }
