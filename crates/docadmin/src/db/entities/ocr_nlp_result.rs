//! OCR/NLP processing record for one file of one request.
//!
//! Rows are keyed by `(request_id, file_id)`. The status, step and failure
//! cause columns hold labels from [`crate::lifecycle`]; the request body and
//! NLP result are free-form JSON written by the processing pipeline.

use sea_orm::entity::prelude::*;

use crate::lifecycle::{FileError, FileStatus, FileStep, OcrNlpStep, RequestStatus, UnknownLabel};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ocr_nlp_result")]
pub struct Model {
    pub batch_id: Option<String>,
    #[sea_orm(primary_key, auto_increment = false)]
    pub request_id: String,
    /// `ServiceType` label.
    pub request_type: String,
    /// `RequestFrom` label.
    pub request_from: String,
    /// OCR/NLP request body as received.
    #[sea_orm(column_type = "Text", nullable)]
    pub request_body: Option<String>,
    /// `RequestStatus` label for the whole request.
    pub request_status: String,
    /// NLP output for this file.
    #[sea_orm(column_type = "Text", nullable)]
    pub nlp_file_result: Option<String>,
    /// `FileStatus` label.
    pub file_status: String,
    /// `FileStep` label.
    pub file_step: String,
    /// `NlpResultStatus` label; depends on whether a contract was found.
    pub nlp_status: Option<String>,
    /// `ReqError` label.
    pub req_failure_cause: Option<String>,
    /// `FileError` label.
    pub file_failure_cause: Option<String>,
    /// JSON array of distinct document codes found in the file.
    #[sea_orm(column_type = "Text", nullable)]
    pub doc_code_list: Option<String>,
    pub biz_code: Option<String>,
    pub task_code: Option<String>,
    /// `OcrNlpStep` label of the last stage that succeeded.
    pub success_step: Option<String>,
    #[sea_orm(primary_key, auto_increment = false)]
    pub file_id: String,
    pub file_name: Option<String>,
    pub file_path: Option<String>,
    pub file_merged: bool,
    pub original_files_info: Option<String>,
    pub original_files_name: Option<String>,
    pub page_count: Option<i32>,
    pub error_message: Option<String>,
    pub request_date: Option<DateTimeUtc>,
    pub analysed_date: Option<DateTimeUtc>,
    pub confirmed_date: Option<DateTimeUtc>,
    pub updated_date: Option<DateTimeUtc>,
    pub user_id: Option<i32>,
    /// Requesting user's display name, copied at request time.
    pub user_name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::UserId",
        on_delete = "SetNull"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

timestamped_behavior!(request_date, updated_date);

impl Model {
    pub fn step(&self) -> Result<FileStep, UnknownLabel> {
        self.file_step.parse()
    }

    pub fn status(&self) -> Result<FileStatus, UnknownLabel> {
        self.file_status.parse()
    }

    pub fn request_state(&self) -> Result<RequestStatus, UnknownLabel> {
        self.request_status.parse()
    }

    pub fn failure_cause(&self) -> Result<Option<FileError>, UnknownLabel> {
        self.file_failure_cause.as_deref().map(str::parse).transpose()
    }

    pub fn succeeded_stage(&self) -> Result<Option<OcrNlpStep>, UnknownLabel> {
        self.success_step.as_deref().map(str::parse).transpose()
    }

    pub fn doc_codes(&self) -> Vec<String> {
        self.doc_code_list
            .as_deref()
            .map(super::decode_json_list::<String>)
            .unwrap_or_default()
    }
}
