//! Creates `admin_category`, `admin_keyword` and `admin_keyword_by_task`.

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
                    .table(AdminCategory::Table)
                    .if_not_exists()
                    .col(pk_auto(AdminCategory::CategoryId))
                    .col(string_len_null(AdminCategory::CategoryName, 128))
                    .col(
                        timestamp_with_time_zone_null(AdminCategory::CreatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone_null(AdminCategory::UpdatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer_null(AdminCategory::UserId))
                    .foreign_key(&mut user_fk(
                        "fk_admin_category_user",
                        AdminCategory::Table,
                        AdminCategory::UserId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AdminKeyword::Table)
                    .if_not_exists()
                    .col(pk_auto(AdminKeyword::KeywordId))
                    .col(string_len_null(AdminKeyword::KeywordName, 4000))
                    .col(integer_null(AdminKeyword::CategoryId))
                    .col(
                        timestamp_with_time_zone_null(AdminKeyword::CreatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone_null(AdminKeyword::UpdatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer_null(AdminKeyword::UserId))
                    .col(integer_null(AdminKeyword::DocId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_admin_keyword_category")
                            .from(AdminKeyword::Table, AdminKeyword::CategoryId)
                            .to(AdminCategory::Table, AdminCategory::CategoryId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(&mut user_fk(
                        "fk_admin_keyword_user",
                        AdminKeyword::Table,
                        AdminKeyword::UserId,
                    ))
                    .foreign_key(&mut cascade_fk(
                        "fk_admin_keyword_document",
                        AdminKeyword::Table,
                        AdminKeyword::DocId,
                        AdminDocument::Table,
                        AdminDocument::DocId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "ix_admin_keyword_category_id",
                AdminKeyword::Table,
                AdminKeyword::CategoryId,
            ))
            .await?;
        manager
            .create_index(index(
                "ix_admin_keyword_doc_id",
                AdminKeyword::Table,
                AdminKeyword::DocId,
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AdminKeywordByTask::Table)
                    .if_not_exists()
                    .col(pk_auto(AdminKeywordByTask::KeywordByTaskId))
                    .col(integer_null(AdminKeywordByTask::KeywordId))
                    .col(integer_null(AdminKeywordByTask::TaskId))
                    .col(
                        timestamp_with_time_zone_null(AdminKeywordByTask::CreatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone_null(AdminKeywordByTask::UpdatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer_null(AdminKeywordByTask::UserId))
                    .foreign_key(&mut cascade_fk(
                        "fk_admin_kw_by_task_keyword",
                        AdminKeywordByTask::Table,
                        AdminKeywordByTask::KeywordId,
                        AdminKeyword::Table,
                        AdminKeyword::KeywordId,
                    ))
                    .foreign_key(&mut cascade_fk(
                        "fk_admin_kw_by_task_task",
                        AdminKeywordByTask::Table,
                        AdminKeywordByTask::TaskId,
                        AdminTask::Table,
                        AdminTask::TaskId,
                    ))
                    .foreign_key(&mut user_fk(
                        "fk_admin_kw_by_task_user",
                        AdminKeywordByTask::Table,
                        AdminKeywordByTask::UserId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "ix_admin_kw_by_task_keyword_id",
                AdminKeywordByTask::Table,
                AdminKeywordByTask::KeywordId,
            ))
            .await?;
        manager
            .create_index(index(
                "ix_admin_kw_by_task_task_id",
                AdminKeywordByTask::Table,
                AdminKeywordByTask::TaskId,
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminKeywordByTask::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AdminKeyword::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AdminCategory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AdminCategory {
    Table,
    CategoryId,
    CategoryName,
    CreatedDate,
    UpdatedDate,
    UserId,
}

#[derive(DeriveIden)]
enum AdminKeyword {
    Table,
    KeywordId,
    KeywordName,
    CategoryId,
    CreatedDate,
    UpdatedDate,
    UserId,
    DocId,
}

#[derive(DeriveIden)]
enum AdminKeywordByTask {
    Table,
    KeywordByTaskId,
    KeywordId,
    TaskId,
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
