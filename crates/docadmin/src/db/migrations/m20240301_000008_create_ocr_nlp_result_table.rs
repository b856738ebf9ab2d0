//! Creates `ocr_nlp_result`, keyed by `(request_id, file_id)`.

use sea_orm_migration::{prelude::*, schema::*};

use super::{index, user_fk};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OcrNlpResult::Table)
                    .if_not_exists()
                    .col(string_len_null(OcrNlpResult::BatchId, 64))
                    .col(string_len(OcrNlpResult::RequestId, 64))
                    .col(string_len(OcrNlpResult::RequestType, 10).default("NLP"))
                    .col(string_len(OcrNlpResult::RequestFrom, 10).default("AGENT"))
                    .col(text_null(OcrNlpResult::RequestBody))
                    .col(string_len(OcrNlpResult::RequestStatus, 10).default("WAITING"))
                    .col(text_null(OcrNlpResult::NlpFileResult))
                    .col(string_len(OcrNlpResult::FileStatus, 32).default("WAITING"))
                    .col(string_len(OcrNlpResult::FileStep, 32).default("Upload_Waiting"))
                    .col(string_len_null(OcrNlpResult::NlpStatus, 32))
                    .col(string_len_null(OcrNlpResult::ReqFailureCause, 32))
                    .col(string_len_null(OcrNlpResult::FileFailureCause, 32))
                    .col(text_null(OcrNlpResult::DocCodeList))
                    .col(string_len_null(OcrNlpResult::BizCode, 32))
                    .col(string_len_null(OcrNlpResult::TaskCode, 32))
                    .col(string_len_null(OcrNlpResult::SuccessStep, 32))
                    .col(string_len(OcrNlpResult::FileId, 64))
                    .col(string_len_null(OcrNlpResult::FileName, 512))
                    .col(string_len_null(OcrNlpResult::FilePath, 2048))
                    .col(boolean(OcrNlpResult::FileMerged).default(false))
                    .col(string_len_null(OcrNlpResult::OriginalFilesInfo, 2048))
                    .col(string_len_null(OcrNlpResult::OriginalFilesName, 2048))
                    .col(integer_null(OcrNlpResult::PageCount))
                    .col(string_len_null(OcrNlpResult::ErrorMessage, 4000))
                    .col(
                        timestamp_with_time_zone_null(OcrNlpResult::RequestDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(OcrNlpResult::AnalysedDate))
                    .col(timestamp_with_time_zone_null(OcrNlpResult::ConfirmedDate))
                    .col(timestamp_with_time_zone_null(OcrNlpResult::UpdatedDate))
                    .col(integer_null(OcrNlpResult::UserId))
                    .col(string_len_null(OcrNlpResult::UserName, 32))
                    .primary_key(
                        Index::create()
                            .col(OcrNlpResult::RequestId)
                            .col(OcrNlpResult::FileId),
                    )
                    .foreign_key(&mut user_fk(
                        "fk_ocr_nlp_result_user",
                        OcrNlpResult::Table,
                        OcrNlpResult::UserId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "ix_ocr_nlp_result_batch_id",
                OcrNlpResult::Table,
                OcrNlpResult::BatchId,
            ))
            .await?;
        manager
            .create_index(index(
                "ix_ocr_nlp_result_user_id",
                OcrNlpResult::Table,
                OcrNlpResult::UserId,
            ))
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OcrNlpResult::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum OcrNlpResult {
    Table,
    BatchId,
    RequestId,
    RequestType,
    RequestFrom,
    RequestBody,
    RequestStatus,
    NlpFileResult,
    FileStatus,
    FileStep,
    NlpStatus,
    ReqFailureCause,
    FileFailureCause,
    DocCodeList,
    BizCode,
    TaskCode,
    SuccessStep,
    FileId,
    FileName,
    FilePath,
    FileMerged,
    OriginalFilesInfo,
    OriginalFilesName,
    PageCount,
    ErrorMessage,
    RequestDate,
    AnalysedDate,
    ConfirmedDate,
    UpdatedDate,
    UserId,
    UserName,
}
