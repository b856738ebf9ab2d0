//! Creates the extraction taxonomy: `admin_item_type`, `admin_meta`,
//! `admin_item` and `admin_item_by_task`.

use sea_orm_migration::{prelude::*, schema::*};

use super::{cascade_fk, index, user_fk};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminItemType::Table)
                    .if_not_exists()
                    .col(pk_auto(AdminItemType::ItemTypeId))
                    .col(string_len_null(AdminItemType::ItemTypeName, 64))
                    .col(
                        timestamp_with_time_zone_null(AdminItemType::CreatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone_null(AdminItemType::UpdatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer_null(AdminItemType::UserId))
                    .foreign_key(&mut user_fk(
                        "fk_admin_item_type_user",
                        AdminItemType::Table,
                        AdminItemType::UserId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AdminMeta::Table)
                    .if_not_exists()
                    .col(pk_auto(AdminMeta::MetaId))
                    .col(string_len_null(AdminMeta::MetaName, 64))
                    .col(integer_null(AdminMeta::ItemTypeId))
                    .col(string_len_null(AdminMeta::Depth, 16))
                    .col(
                        timestamp_with_time_zone_null(AdminMeta::CreatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone_null(AdminMeta::UpdatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer_null(AdminMeta::UserId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_admin_meta_item_type")
                            .from(AdminMeta::Table, AdminMeta::ItemTypeId)
                            .to(AdminItemType::Table, AdminItemType::ItemTypeId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(&mut user_fk(
                        "fk_admin_meta_user",
                        AdminMeta::Table,
                        AdminMeta::UserId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "ix_admin_meta_item_type_id",
                AdminMeta::Table,
                AdminMeta::ItemTypeId,
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AdminItem::Table)
                    .if_not_exists()
                    .col(pk_auto(AdminItem::ItemId))
                    .col(string_len_null(AdminItem::ItemName, 128))
                    .col(integer_null(AdminItem::MetaId))
                    .col(integer_null(AdminItem::Priority))
                    .col(
                        timestamp_with_time_zone_null(AdminItem::CreatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone_null(AdminItem::UpdatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer_null(AdminItem::UserId))
                    .col(integer_null(AdminItem::DocId))
                    // No ON DELETE action: a meta row in use cannot be removed.
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_admin_item_meta")
                            .from(AdminItem::Table, AdminItem::MetaId)
                            .to(AdminMeta::Table, AdminMeta::MetaId),
                    )
                    .foreign_key(&mut user_fk(
                        "fk_admin_item_user",
                        AdminItem::Table,
                        AdminItem::UserId,
                    ))
                    .foreign_key(&mut cascade_fk(
                        "fk_admin_item_document",
                        AdminItem::Table,
                        AdminItem::DocId,
                        AdminDocument::Table,
                        AdminDocument::DocId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index("ix_admin_item_meta_id", AdminItem::Table, AdminItem::MetaId))
            .await?;
        manager
            .create_index(index("ix_admin_item_doc_id", AdminItem::Table, AdminItem::DocId))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AdminItemByTask::Table)
                    .if_not_exists()
                    .col(pk_auto(AdminItemByTask::ItemByTaskId))
                    .col(integer_null(AdminItemByTask::ItemId))
                    .col(integer_null(AdminItemByTask::TaskId))
                    .col(integer_null(AdminItemByTask::MetaId))
                    .col(integer_null(AdminItemByTask::Priority))
                    .col(
                        timestamp_with_time_zone_null(AdminItemByTask::CreatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone_null(AdminItemByTask::UpdatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer_null(AdminItemByTask::UserId))
                    .foreign_key(&mut cascade_fk(
                        "fk_admin_item_by_task_item",
                        AdminItemByTask::Table,
                        AdminItemByTask::ItemId,
                        AdminItem::Table,
                        AdminItem::ItemId,
                    ))
                    .foreign_key(&mut cascade_fk(
                        "fk_admin_item_by_task_task",
                        AdminItemByTask::Table,
                        AdminItemByTask::TaskId,
                        AdminTask::Table,
                        AdminTask::TaskId,
                    ))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_admin_item_by_task_meta")
                            .from(AdminItemByTask::Table, AdminItemByTask::MetaId)
                            .to(AdminMeta::Table, AdminMeta::MetaId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(&mut user_fk(
                        "fk_admin_item_by_task_user",
                        AdminItemByTask::Table,
                        AdminItemByTask::UserId,
                    ))
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("ix_admin_item_by_task_item_id", AdminItemByTask::ItemId),
            ("ix_admin_item_by_task_task_id", AdminItemByTask::TaskId),
            ("ix_admin_item_by_task_meta_id", AdminItemByTask::MetaId),
        ] {
            manager
                .create_index(index(name, AdminItemByTask::Table, column))
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminItemByTask::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AdminItem::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AdminMeta::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AdminItemType::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AdminItemType {
    Table,
    ItemTypeId,
    ItemTypeName,
    CreatedDate,
    UpdatedDate,
    UserId,
}

#[derive(DeriveIden)]
enum AdminMeta {
    Table,
    MetaId,
    MetaName,
    ItemTypeId,
    Depth,
    CreatedDate,
    UpdatedDate,
    UserId,
}

#[derive(DeriveIden)]
enum AdminItem {
    Table,
    ItemId,
    ItemName,
    MetaId,
    Priority,
    CreatedDate,
    UpdatedDate,
    UserId,
    DocId,
}

#[derive(DeriveIden)]
enum AdminItemByTask {
    Table,
    ItemByTaskId,
    ItemId,
    TaskId,
    MetaId,
    Priority,
    CreatedDate,
    UpdatedDate,
    UserId,
}

#[derive(DeriveIden)]
enum AdminDocument {
    Table,
    DocId,
}

#[derive(DeriveIden)]
enum AdminTask {
    Table,
    TaskId,
}
