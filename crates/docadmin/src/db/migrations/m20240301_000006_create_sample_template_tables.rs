//! Creates `admin_doc_sample`, `admin_template` and `admin_template_page`.

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
                    .table(AdminDocSample::Table)
                    .if_not_exists()
                    .col(pk_auto(AdminDocSample::DocSampleId))
                    .col(string_len_null(AdminDocSample::FilePath, 128))
                    .col(string_len_null(AdminDocSample::FileName, 128))
                    .col(string_len(AdminDocSample::DocTitles, 1024).default("[]"))
                    .col(string_len(AdminDocSample::PageNumbers, 1024).default("[]"))
                    .col(
                        timestamp_with_time_zone_null(AdminDocSample::CreatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone_null(AdminDocSample::UpdatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer_null(AdminDocSample::UserId))
                    .col(integer_null(AdminDocSample::DocId))
                    .foreign_key(&mut user_fk(
                        "fk_admin_doc_sample_user",
                        AdminDocSample::Table,
                        AdminDocSample::UserId,
                    ))
                    .foreign_key(&mut cascade_fk(
                        "fk_admin_doc_sample_document",
                        AdminDocSample::Table,
                        AdminDocSample::DocId,
                        AdminDocument::Table,
                        AdminDocument::DocId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "ix_admin_doc_sample_doc_id",
                AdminDocSample::Table,
                AdminDocSample::DocId,
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AdminTemplate::Table)
                    .if_not_exists()
                    .col(pk_auto(AdminTemplate::TemplateId))
                    .col(string_len_null(AdminTemplate::TemplateCode, 64).unique_key())
                    .col(string_len_null(AdminTemplate::TemplateName, 128))
                    .col(string_len_null(AdminTemplate::FilePath, 128))
                    .col(string_len_null(AdminTemplate::FileName, 128))
                    .col(integer_null(AdminTemplate::PageCount))
                    .col(integer(AdminTemplate::Status).default(0))
                    .col(text(AdminTemplate::TitleBlocks).default("[]"))
                    .col(text(AdminTemplate::EtcBlocks).default("[]"))
                    .col(
                        timestamp_with_time_zone_null(AdminTemplate::CreatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone_null(AdminTemplate::UpdatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer_null(AdminTemplate::UserId))
                    .col(integer_null(AdminTemplate::DocId))
                    .foreign_key(&mut user_fk(
                        "fk_admin_template_user",
                        AdminTemplate::Table,
                        AdminTemplate::UserId,
                    ))
                    .foreign_key(&mut cascade_fk(
                        "fk_admin_template_document",
                        AdminTemplate::Table,
                        AdminTemplate::DocId,
                        AdminDocument::Table,
                        AdminDocument::DocId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "ix_admin_template_status",
                AdminTemplate::Table,
                AdminTemplate::Status,
            ))
            .await?;
        manager
            .create_index(index(
                "ix_admin_template_doc_id",
                AdminTemplate::Table,
                AdminTemplate::DocId,
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AdminTemplatePage::Table)
                    .if_not_exists()
                    .col(pk_auto(AdminTemplatePage::TemplatePageId))
                    .col(integer_null(AdminTemplatePage::PageNumber))
                    .col(integer(AdminTemplatePage::PageAngle).default(0))
                    .col(integer_null(AdminTemplatePage::PageWidth))
                    .col(integer_null(AdminTemplatePage::PageHeight))
                    .col(text(AdminTemplatePage::Blocks).default("[]"))
                    .col(integer_null(AdminTemplatePage::TemplateId))
                    .foreign_key(&mut cascade_fk(
                        "fk_admin_template_page_template",
                        AdminTemplatePage::Table,
                        AdminTemplatePage::TemplateId,
                        AdminTemplate::Table,
                        AdminTemplate::TemplateId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "ix_admin_template_page_template_id",
                AdminTemplatePage::Table,
                AdminTemplatePage::TemplateId,
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminTemplatePage::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AdminTemplate::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AdminDocSample::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AdminDocSample {
    Table,
    DocSampleId,
    FilePath,
    FileName,
    DocTitles,
    PageNumbers,
    CreatedDate,
    UpdatedDate,
    UserId,
    DocId,
}

#[derive(DeriveIden)]
enum AdminTemplate {
    Table,
    TemplateId,
    TemplateCode,
    TemplateName,
    FilePath,
    FileName,
    PageCount,
    Status,
    TitleBlocks,
    EtcBlocks,
    CreatedDate,
    UpdatedDate,
    UserId,
    DocId,
}

#[derive(DeriveIden)]
enum AdminTemplatePage {
    Table,
    TemplatePageId,
    PageNumber,
    PageAngle,
    PageWidth,
    PageHeight,
    Blocks,
    TemplateId,
}

#[derive(DeriveIden)]
enum AdminDocument {
    Table,
    DocId,
}
