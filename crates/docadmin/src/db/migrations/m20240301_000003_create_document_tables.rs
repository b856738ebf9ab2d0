//! Creates `admin_document` and the `admin_document_by_task` link table.

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
                    .table(AdminDocument::Table)
                    .if_not_exists()
                    .col(pk_auto(AdminDocument::DocId))
                    .col(string_len_null(AdminDocument::DocCode, 32))
                    .col(string_len_null(AdminDocument::DocName, 128))
                    .col(string_len_null(AdminDocument::ExtractionTarget, 8))
                    .col(
                        timestamp_with_time_zone_null(AdminDocument::CreatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone_null(AdminDocument::UpdatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer_null(AdminDocument::UserId))
                    .foreign_key(&mut user_fk(
                        "fk_admin_document_user",
                        AdminDocument::Table,
                        AdminDocument::UserId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "ix_admin_document_extr_target",
                AdminDocument::Table,
                AdminDocument::ExtractionTarget,
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AdminDocumentByTask::Table)
                    .if_not_exists()
                    .col(pk_auto(AdminDocumentByTask::DocByTaskId))
                    .col(integer_null(AdminDocumentByTask::TaskId))
                    .col(integer_null(AdminDocumentByTask::DocId))
                    .foreign_key(&mut cascade_fk(
                        "fk_admin_doc_by_task_task",
                        AdminDocumentByTask::Table,
                        AdminDocumentByTask::TaskId,
                        AdminTask::Table,
                        AdminTask::TaskId,
                    ))
                    .foreign_key(&mut cascade_fk(
                        "fk_admin_doc_by_task_doc",
                        AdminDocumentByTask::Table,
                        AdminDocumentByTask::DocId,
                        AdminDocument::Table,
                        AdminDocument::DocId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "ix_admin_doc_by_task_task_id",
                AdminDocumentByTask::Table,
                AdminDocumentByTask::TaskId,
            ))
            .await?;
        manager
            .create_index(index(
                "ix_admin_doc_by_task_doc_id",
                AdminDocumentByTask::Table,
                AdminDocumentByTask::DocId,
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminDocumentByTask::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AdminDocument::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AdminDocument {
    Table,
    DocId,
    DocCode,
    DocName,
    ExtractionTarget,
    CreatedDate,
    UpdatedDate,
    UserId,
}

#[derive(DeriveIden)]
enum AdminDocumentByTask {
    Table,
    DocByTaskId,
    TaskId,
    DocId,
}

#[derive(DeriveIden)]
enum AdminTask {
    Table,
    TaskId,
}
