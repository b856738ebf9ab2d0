//! Bookkeeping for `ocr_nlp_result`: one row per file of an OCR/NLP request,
//! tracking where the file is in its lifecycle and why it failed, if it did.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder,
};

use super::entities::ocr_nlp_result;
use super::entities::OcrNlpResult;
use super::DatabaseError;
use crate::lifecycle::{
    FileError, FileStatus, FileStep, NlpResultStatus, ReqError, RequestFrom, RequestStatus,
    ServiceType,
};

/// Longest error message the `error_message` column holds.
pub const MAX_ERROR_MESSAGE_LEN: usize = 4000;

/// A file entering the pipeline.
#[derive(Debug, Clone)]
pub struct NewFileResult {
    pub request_id: String,
    pub file_id: String,
    pub batch_id: Option<String>,
    pub request_type: ServiceType,
    pub request_from: RequestFrom,
    pub request_body: Option<String>,
    pub file_name: Option<String>,
    pub file_path: Option<String>,
    pub page_count: Option<i32>,
    /// Set when the file was assembled from several uploads; the row then
    /// starts at `Before_File_Merging`.
    pub original_files_info: Option<String>,
    pub original_files_name: Option<String>,
    pub biz_code: Option<String>,
    pub task_code: Option<String>,
    pub user_id: Option<i32>,
    pub user_name: Option<String>,
}

impl NewFileResult {
    pub fn new(request_id: impl Into<String>, file_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            file_id: file_id.into(),
            batch_id: None,
            request_type: ServiceType::Nlp,
            request_from: RequestFrom::Agent,
            request_body: None,
            file_name: None,
            file_path: None,
            page_count: None,
            original_files_info: None,
            original_files_name: None,
            biz_code: None,
            task_code: None,
            user_id: None,
            user_name: None,
        }
    }

    fn initial_step(&self) -> FileStep {
        if self.original_files_info.is_some() {
            FileStep::BeforeFileMerging
        } else {
            FileStep::default()
        }
    }
}

fn not_found(request_id: &str, file_id: &str) -> DatabaseError {
    DatabaseError::NotFound {
        entity: "ocr_nlp_result",
        key: format!("{}/{}", request_id, file_id),
    }
}

/// Inserts a row in the waiting state.
pub async fn register<C>(db: &C, file: &NewFileResult) -> Result<ocr_nlp_result::Model, DatabaseError>
where
    C: ConnectionTrait,
{
    let model = ocr_nlp_result::ActiveModel {
        request_id: Set(file.request_id.clone()),
        file_id: Set(file.file_id.clone()),
        batch_id: Set(file.batch_id.clone()),
        request_type: Set(file.request_type.into()),
        request_from: Set(file.request_from.into()),
        request_body: Set(file.request_body.clone()),
        request_status: Set(RequestStatus::AnalyseWaiting.into()),
        file_status: Set(FileStatus::Waiting.into()),
        file_step: Set(file.initial_step().into()),
        file_name: Set(file.file_name.clone()),
        file_path: Set(file.file_path.clone()),
        page_count: Set(file.page_count),
        original_files_info: Set(file.original_files_info.clone()),
        original_files_name: Set(file.original_files_name.clone()),
        biz_code: Set(file.biz_code.clone()),
        task_code: Set(file.task_code.clone()),
        user_id: Set(file.user_id),
        user_name: Set(file.user_name.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    log::debug!(
        "Registered file {} of request {} at {}",
        model.file_id,
        model.request_id,
        model.file_step
    );
    Ok(model)
}

pub async fn find<C>(
    db: &C,
    request_id: &str,
    file_id: &str,
) -> Result<Option<ocr_nlp_result::Model>, DatabaseError>
where
    C: ConnectionTrait,
{
    Ok(OcrNlpResult::find_by_id((request_id.to_string(), file_id.to_string()))
        .one(db)
        .await?)
}

/// All files of one request, ordered by file id.
pub async fn find_by_request<C>(
    db: &C,
    request_id: &str,
) -> Result<Vec<ocr_nlp_result::Model>, DatabaseError>
where
    C: ConnectionTrait,
{
    Ok(OcrNlpResult::find()
        .filter(ocr_nlp_result::Column::RequestId.eq(request_id))
        .order_by_asc(ocr_nlp_result::Column::FileId)
        .all(db)
        .await?)
}

/// All files of one batch, across requests.
pub async fn find_by_batch<C>(
    db: &C,
    batch_id: &str,
) -> Result<Vec<ocr_nlp_result::Model>, DatabaseError>
where
    C: ConnectionTrait,
{
    Ok(OcrNlpResult::find()
        .filter(ocr_nlp_result::Column::BatchId.eq(batch_id))
        .order_by_asc(ocr_nlp_result::Column::RequestId)
        .order_by_asc(ocr_nlp_result::Column::FileId)
        .all(db)
        .await?)
}

/// Moves a file forward to `target`.
///
/// Staying in place or moving backward fails with
/// [`DatabaseError::InvalidStepTransition`]; skipping steps is allowed.
pub async fn advance_file_step<C>(
    db: &C,
    request_id: &str,
    file_id: &str,
    target: FileStep,
) -> Result<ocr_nlp_result::Model, DatabaseError>
where
    C: ConnectionTrait,
{
    let model = find(db, request_id, file_id)
        .await?
        .ok_or_else(|| not_found(request_id, file_id))?;
    let current = model.step()?;

    if !current.can_advance_to(target) {
        log::warn!(
            "Refusing step change {} -> {} for file {}",
            current,
            target,
            file_id
        );
        return Err(DatabaseError::InvalidStepTransition {
            file_id: file_id.to_string(),
            from: current,
            to: target,
        });
    }

    let now = Utc::now();
    let analysed = model.analysed_date.is_some();
    let mut active: ocr_nlp_result::ActiveModel = model.into();
    active.file_step = Set(target.into());
    if let Some(stage) = target.completed_stage() {
        active.success_step = Set(Some(stage.into()));
    }
    // Any step past analysis counts as analysed, even when reached by a skip.
    if target.is_success() {
        active.file_status = Set(FileStatus::Success.into());
        if !analysed {
            active.analysed_date = Set(Some(now));
        }
    }
    match target {
        FileStep::FileMergeCompleted => {
            active.file_merged = Set(true);
        }
        FileStep::ConfirmCompleted => {
            active.confirmed_date = Set(Some(now));
        }
        _ => {}
    }

    let updated = active.update(db).await?;
    log::debug!("File {} of request {}: {} -> {}", file_id, request_id, current, target);
    Ok(updated)
}

/// Marks a file as failed. The message is cut to the column width.
pub async fn mark_failed<C>(
    db: &C,
    request_id: &str,
    file_id: &str,
    cause: FileError,
    message: &str,
) -> Result<ocr_nlp_result::Model, DatabaseError>
where
    C: ConnectionTrait,
{
    let model = find(db, request_id, file_id)
        .await?
        .ok_or_else(|| not_found(request_id, file_id))?;

    let mut active: ocr_nlp_result::ActiveModel = model.into();
    active.file_status = Set(FileStatus::Fail.into());
    active.file_failure_cause = Set(Some(cause.into()));
    active.error_message = Set(Some(truncate_chars(message, MAX_ERROR_MESSAGE_LEN)));

    let updated = active.update(db).await?;
    log::warn!(
        "File {} of request {} failed: {}",
        file_id,
        request_id,
        cause
    );
    Ok(updated)
}

/// Stores the NLP output for a file along with the document codes it found.
pub async fn record_nlp_result<C>(
    db: &C,
    request_id: &str,
    file_id: &str,
    result: &serde_json::Value,
    doc_codes: &[String],
    status: NlpResultStatus,
) -> Result<ocr_nlp_result::Model, DatabaseError>
where
    C: ConnectionTrait,
{
    let model = find(db, request_id, file_id)
        .await?
        .ok_or_else(|| not_found(request_id, file_id))?;

    let mut distinct: Vec<&String> = Vec::with_capacity(doc_codes.len());
    for code in doc_codes {
        if !distinct.contains(&code) {
            distinct.push(code);
        }
    }

    let mut active: ocr_nlp_result::ActiveModel = model.into();
    active.nlp_file_result = Set(Some(serde_json::to_string(result)?));
    active.doc_code_list = Set(Some(serde_json::to_string(&distinct)?));
    active.nlp_status = Set(Some(status.into()));
    Ok(active.update(db).await?)
}

/// Folds the file rows of a request into one request status.
///
/// Any file still waiting keeps the request waiting; otherwise all failed
/// means failed, all confirmed means confirmed, and anything else is a
/// (possibly partial) success. `None` when the request has no rows.
pub async fn request_summary<C>(
    db: &C,
    request_id: &str,
) -> Result<Option<RequestStatus>, DatabaseError>
where
    C: ConnectionTrait,
{
    let rows = find_by_request(db, request_id).await?;
    if rows.is_empty() {
        return Ok(None);
    }

    let mut statuses = Vec::with_capacity(rows.len());
    for row in &rows {
        statuses.push((row.status()?, row.step()?));
    }
    Ok(Some(summarize(&statuses)))
}

fn summarize(files: &[(FileStatus, FileStep)]) -> RequestStatus {
    if files.iter().any(|(status, _)| *status == FileStatus::Waiting) {
        RequestStatus::AnalyseWaiting
    } else if files.iter().all(|(status, _)| *status == FileStatus::Fail) {
        RequestStatus::AnalyseFailed
    } else if files.iter().all(|(_, step)| step.is_confirmed()) {
        RequestStatus::ConfirmCompleted
    } else {
        RequestStatus::AnalyseCompleted
    }
}

/// Writes the summary from [`request_summary`] onto every row of the
/// request. A request whose files all failed also gets `ALL Failed` as its
/// failure cause; once it recovers only that cause is cleared, so causes set
/// elsewhere (such as `Contract Failed`) are kept.
pub async fn refresh_request_status<C>(
    db: &C,
    request_id: &str,
) -> Result<Option<RequestStatus>, DatabaseError>
where
    C: ConnectionTrait,
{
    let Some(status) = request_summary(db, request_id).await? else {
        return Ok(None);
    };

    let now = Utc::now();
    let all_failed = status == RequestStatus::AnalyseFailed;
    let mut update = OcrNlpResult::update_many()
        .col_expr(
            ocr_nlp_result::Column::RequestStatus,
            Expr::value(status.as_str()),
        )
        .col_expr(ocr_nlp_result::Column::UpdatedDate, Expr::value(now));
    if all_failed {
        update = update.col_expr(
            ocr_nlp_result::Column::ReqFailureCause,
            Expr::value(ReqError::AllFailed.as_str()),
        );
    }
    update
        .filter(ocr_nlp_result::Column::RequestId.eq(request_id))
        .exec(db)
        .await?;

    if !all_failed {
        OcrNlpResult::update_many()
            .col_expr(
                ocr_nlp_result::Column::ReqFailureCause,
                Expr::value(Option::<String>::None),
            )
            .filter(ocr_nlp_result::Column::RequestId.eq(request_id))
            .filter(ocr_nlp_result::Column::ReqFailureCause.eq(ReqError::AllFailed.as_str()))
            .exec(db)
            .await?;
    }

    log::info!("Request {} is now {}", request_id, status);
    Ok(Some(status))
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;
    use crate::lifecycle::OcrNlpStep;

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("abc", 5), "abc");
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("가나다라", 2), "가나");
    }

    #[test]
    fn test_summarize() {
        use FileStatus::*;
        use FileStep::*;

        assert_eq!(
            summarize(&[(Success, AnalyseCompleted), (Waiting, OcrCompleted)]),
            RequestStatus::AnalyseWaiting
        );
        assert_eq!(
            summarize(&[(Fail, OcrCompleted), (Fail, UploadWaiting)]),
            RequestStatus::AnalyseFailed
        );
        assert_eq!(
            summarize(&[(Success, ConfirmCompleted), (Success, ConfirmCompleted)]),
            RequestStatus::ConfirmCompleted
        );
        assert_eq!(
            summarize(&[(Success, AnalyseCompleted), (Fail, OcrCompleted)]),
            RequestStatus::AnalyseCompleted
        );
    }

    #[tokio::test]
    async fn test_register_defaults() {
        let db = open_in_memory().await.unwrap();
        let row = register(&db, &NewFileResult::new("req-1", "file-1")).await.unwrap();

        assert_eq!(row.request_type, "NLP");
        assert_eq!(row.request_from, "AGENT");
        assert_eq!(row.request_state().unwrap(), RequestStatus::AnalyseWaiting);
        assert_eq!(row.status().unwrap(), FileStatus::Waiting);
        assert_eq!(row.step().unwrap(), FileStep::UploadWaiting);
        assert!(!row.file_merged);
        assert!(row.request_date.is_some());
        assert!(row.doc_codes().is_empty());
    }

    #[tokio::test]
    async fn test_merged_upload_starts_before_merge() {
        let db = open_in_memory().await.unwrap();
        let mut file = NewFileResult::new("req-1", "merged");
        file.original_files_info = Some(r#"[{"name":"a.tif"},{"name":"b.tif"}]"#.to_string());
        let row = register(&db, &file).await.unwrap();
        assert_eq!(row.step().unwrap(), FileStep::BeforeFileMerging);

        let row = advance_file_step(&db, "req-1", "merged", FileStep::FileMergeCompleted)
            .await
            .unwrap();
        assert!(row.file_merged);
        assert_eq!(row.succeeded_stage().unwrap(), Some(OcrNlpStep::FileMerge));
    }

    #[tokio::test]
    async fn test_advance_records_stages() {
        let db = open_in_memory().await.unwrap();
        register(&db, &NewFileResult::new("req-1", "file-1")).await.unwrap();

        let row = advance_file_step(&db, "req-1", "file-1", FileStep::UploadCompleted)
            .await
            .unwrap();
        assert_eq!(row.succeeded_stage().unwrap(), Some(OcrNlpStep::FileProcess));

        let row = advance_file_step(&db, "req-1", "file-1", FileStep::AnalyseCompleted)
            .await
            .unwrap();
        assert_eq!(row.succeeded_stage().unwrap(), Some(OcrNlpStep::NlpProcess));
        assert_eq!(row.status().unwrap(), FileStatus::Success);
        assert!(row.analysed_date.is_some());
        assert!(row.confirmed_date.is_none());

        let row = advance_file_step(&db, "req-1", "file-1", FileStep::ConfirmCompleted)
            .await
            .unwrap();
        assert!(row.confirmed_date.is_some());
        assert!(row.step().unwrap().is_confirmed());
    }

    #[tokio::test]
    async fn test_advance_rejects_backward_and_same_step() {
        let db = open_in_memory().await.unwrap();
        register(&db, &NewFileResult::new("req-1", "file-1")).await.unwrap();
        advance_file_step(&db, "req-1", "file-1", FileStep::OcrCompleted)
            .await
            .unwrap();

        for target in [FileStep::UploadCompleted, FileStep::OcrCompleted] {
            let err = advance_file_step(&db, "req-1", "file-1", target)
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                DatabaseError::InvalidStepTransition {
                    from: FileStep::OcrCompleted,
                    ..
                }
            ));
        }

        let row = find(&db, "req-1", "file-1").await.unwrap().unwrap();
        assert_eq!(row.step().unwrap(), FileStep::OcrCompleted);
    }

    #[tokio::test]
    async fn test_advance_unknown_file() {
        let db = open_in_memory().await.unwrap();
        let err = advance_file_step(&db, "req-1", "nope", FileStep::OcrCompleted)
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_mark_failed_truncates_message() {
        let db = open_in_memory().await.unwrap();
        register(&db, &NewFileResult::new("req-1", "file-1")).await.unwrap();

        let long = "x".repeat(MAX_ERROR_MESSAGE_LEN + 100);
        let row = mark_failed(&db, "req-1", "file-1", FileError::OcrFailed, &long)
            .await
            .unwrap();

        assert_eq!(row.status().unwrap(), FileStatus::Fail);
        assert_eq!(row.failure_cause().unwrap(), Some(FileError::OcrFailed));
        assert_eq!(
            row.error_message.as_deref().map(str::len),
            Some(MAX_ERROR_MESSAGE_LEN)
        );
    }

    #[tokio::test]
    async fn test_record_nlp_result_dedups_codes() {
        let db = open_in_memory().await.unwrap();
        register(&db, &NewFileResult::new("req-1", "file-1")).await.unwrap();

        let codes = vec!["D01".to_string(), "D02".to_string(), "D01".to_string()];
        let row = record_nlp_result(
            &db,
            "req-1",
            "file-1",
            &serde_json::json!({"pages": []}),
            &codes,
            NlpResultStatus::Success,
        )
        .await
        .unwrap();

        assert_eq!(row.doc_codes(), vec!["D01", "D02"]);
        assert_eq!(row.nlp_status.as_deref(), Some("SUCCESS"));
    }

    #[tokio::test]
    async fn test_request_and_batch_queries() {
        let db = open_in_memory().await.unwrap();
        for (request, file) in [("req-1", "b"), ("req-1", "a"), ("req-2", "c")] {
            let mut new = NewFileResult::new(request, file);
            new.batch_id = Some("batch-1".to_string());
            register(&db, &new).await.unwrap();
        }

        let files: Vec<String> = find_by_request(&db, "req-1")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.file_id)
            .collect();
        assert_eq!(files, vec!["a", "b"]);
        assert_eq!(find_by_batch(&db, "batch-1").await.unwrap().len(), 3);
        assert!(find_by_batch(&db, "batch-2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_request_status_all_failed() {
        let db = open_in_memory().await.unwrap();
        for file in ["a", "b"] {
            register(&db, &NewFileResult::new("req-1", file)).await.unwrap();
            mark_failed(&db, "req-1", file, FileError::FileFailed, "unreadable")
                .await
                .unwrap();
        }

        let status = refresh_request_status(&db, "req-1").await.unwrap();
        assert_eq!(status, Some(RequestStatus::AnalyseFailed));

        for row in find_by_request(&db, "req-1").await.unwrap() {
            assert_eq!(row.request_state().unwrap(), RequestStatus::AnalyseFailed);
            assert_eq!(row.req_failure_cause.as_deref(), Some("ALL Failed"));
        }
        assert_eq!(refresh_request_status(&db, "req-9").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_skip_to_confirm_completed_marks_success() {
        let db = open_in_memory().await.unwrap();
        register(&db, &NewFileResult::new("req-1", "file-1")).await.unwrap();

        let row = advance_file_step(&db, "req-1", "file-1", FileStep::ConfirmCompleted)
            .await
            .unwrap();
        assert_eq!(row.status().unwrap(), FileStatus::Success);
        assert!(row.analysed_date.is_some());
        assert!(row.confirmed_date.is_some());

        let status = refresh_request_status(&db, "req-1").await.unwrap();
        assert_eq!(status, Some(RequestStatus::ConfirmCompleted));
    }

    #[tokio::test]
    async fn test_confirm_keeps_first_analysed_date() {
        let db = open_in_memory().await.unwrap();
        register(&db, &NewFileResult::new("req-1", "file-1")).await.unwrap();

        let analysed = advance_file_step(&db, "req-1", "file-1", FileStep::AnalyseCompleted)
            .await
            .unwrap()
            .analysed_date;
        let row = advance_file_step(&db, "req-1", "file-1", FileStep::ConfirmProcessing)
            .await
            .unwrap();
        assert_eq!(row.analysed_date, analysed);
        assert_eq!(row.status().unwrap(), FileStatus::Success);
    }

    #[tokio::test]
    async fn test_refresh_keeps_external_failure_cause() {
        let db = open_in_memory().await.unwrap();
        register(&db, &NewFileResult::new("req-1", "file-1")).await.unwrap();
        advance_file_step(&db, "req-1", "file-1", FileStep::AnalyseCompleted)
            .await
            .unwrap();
        OcrNlpResult::update_many()
            .col_expr(
                ocr_nlp_result::Column::ReqFailureCause,
                Expr::value(ReqError::ContractFailed.as_str()),
            )
            .filter(ocr_nlp_result::Column::RequestId.eq("req-1"))
            .exec(&db)
            .await
            .unwrap();

        let status = refresh_request_status(&db, "req-1").await.unwrap();
        assert_eq!(status, Some(RequestStatus::AnalyseCompleted));
        let row = find(&db, "req-1", "file-1").await.unwrap().unwrap();
        assert_eq!(row.req_failure_cause.as_deref(), Some("Contract Failed"));
    }

    #[tokio::test]
    async fn test_refresh_clears_stale_all_failed() {
        let db = open_in_memory().await.unwrap();
        register(&db, &NewFileResult::new("req-1", "file-1")).await.unwrap();
        mark_failed(&db, "req-1", "file-1", FileError::OcrFailed, "timeout")
            .await
            .unwrap();
        refresh_request_status(&db, "req-1").await.unwrap();

        // A retry succeeds.
        advance_file_step(&db, "req-1", "file-1", FileStep::AnalyseCompleted)
            .await
            .unwrap();
        let status = refresh_request_status(&db, "req-1").await.unwrap();
        assert_eq!(status, Some(RequestStatus::AnalyseCompleted));
        let row = find(&db, "req-1", "file-1").await.unwrap().unwrap();
        assert_eq!(row.req_failure_cause, None);
    }
}
