//! Referential actions: what happens to dependent rows when a parent goes.

mod common;

use common::*;
use sea_orm::{EntityTrait, ModelTrait};

use docadmin::db::entities::{
    Business, DocSample, Document, DocumentByTask, Item, ItemByTask, Keyword, KeywordByTask, Meta,
    OcrNlpResult, SpellCheckDict, Task, Template, TemplatePage,
};
use docadmin::db::ocr_nlp_result_repo::{self, NewFileResult};
use docadmin::db::spell_check_repo;
use docadmin::db::template_repo::{self, NewTemplate, NewTemplatePage};
use docadmin::db::user_repo;
use docadmin::lifecycle::KeywordType;

#[tokio::test]
async fn test_deleting_user_nulls_ownership() {
    let h = TestHarness::new().await;
    let owner = h.create_user("owner", "Owner").await;
    let uid = Some(owner.user_id);

    let biz = h.insert(business("B1", uid)).await;
    let t1 = h.insert(task("T1", biz.biz_id, uid)).await;
    let doc = h.insert(document("D1", uid)).await;
    let rule = spell_check_repo::add_rule(&h.db, KeywordType::Key, "Nmae", "Name", uid)
        .await
        .unwrap();
    let mut file = NewFileResult::new("req-1", "file-1");
    file.user_id = uid;
    file.user_name = Some("Owner".to_string());
    ocr_nlp_result_repo::register(&h.db, &file).await.unwrap();

    assert_eq!(user_repo::delete_by_id(&h.db, owner.user_id).await.unwrap(), 1);

    let biz = Business::find_by_id(biz.biz_id).one(&h.db).await.unwrap().unwrap();
    assert_eq!(biz.user_id, None);
    let t1 = Task::find_by_id(t1.task_id).one(&h.db).await.unwrap().unwrap();
    assert_eq!(t1.user_id, None);
    let doc = Document::find_by_id(doc.doc_id).one(&h.db).await.unwrap().unwrap();
    assert_eq!(doc.user_id, None);
    let rule = SpellCheckDict::find_by_id(rule.spell_dict_id)
        .one(&h.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(rule.user_id, None);

    // The display name is a copy, not a reference.
    let result = ocr_nlp_result_repo::find(&h.db, "req-1", "file-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(result.user_id, None);
    assert_eq!(result.user_name.as_deref(), Some("Owner"));
    assert_eq!(h.count(OcrNlpResult).await, 1);
}

#[tokio::test]
async fn test_deleting_document_removes_its_children() {
    let h = TestHarness::new().await;
    let biz = h.insert(business("B1", None)).await;
    let t1 = h.insert(task("T1", biz.biz_id, None)).await;
    let doc = h.insert(document("D1", None)).await;
    let other = h.insert(document("D2", None)).await;

    let kind = h.insert(item_type("text")).await;
    let amount = h.insert(meta("amount", kind.item_type_id)).await;
    let total = h.insert(item("total", amount.meta_id, doc.doc_id)).await;
    h.insert(item_by_task(total.item_id, t1.task_id, amount.meta_id))
        .await;
    h.insert(item("total", amount.meta_id, other.doc_id)).await;

    let cat = h.insert(category("finance")).await;
    let kw = h.insert(keyword("invoice", Some(cat.category_id), doc.doc_id)).await;
    h.insert(keyword_by_task(kw.keyword_id, t1.task_id)).await;

    h.insert(doc_sample(doc.doc_id)).await;
    h.insert(document_by_task(t1.task_id, doc.doc_id)).await;
    template_repo::create_with_pages(
        &h.db,
        &NewTemplate {
            template_code: "TPL-D1".to_string(),
            doc_id: Some(doc.doc_id),
            ..Default::default()
        },
        &[NewTemplatePage {
            page_number: 1,
            ..Default::default()
        }],
    )
    .await
    .unwrap();

    let deleted = doc.delete(&h.db).await.unwrap();
    assert_eq!(deleted.rows_affected, 1);

    assert_eq!(h.count(Item).await, 1, "only the other document's item remains");
    assert_eq!(h.count(ItemByTask).await, 0);
    assert_eq!(h.count(Keyword).await, 0);
    assert_eq!(h.count(KeywordByTask).await, 0);
    assert_eq!(h.count(DocSample).await, 0);
    assert_eq!(h.count(DocumentByTask).await, 0);
    assert_eq!(h.count(Template).await, 0);
    assert_eq!(h.count(TemplatePage).await, 0);

    // Shared taxonomy and the task itself survive.
    assert_eq!(h.count(Meta).await, 1);
    assert_eq!(h.count(Task).await, 1);
}

#[tokio::test]
async fn test_deleting_business_removes_tasks_and_links() {
    let h = TestHarness::new().await;
    let biz = h.insert(business("B1", None)).await;
    let t1 = h.insert(task("T1", biz.biz_id, None)).await;
    let doc = h.insert(document("D1", None)).await;
    h.insert(document_by_task(t1.task_id, doc.doc_id)).await;

    let cat = h.insert(category("finance")).await;
    let kw = h.insert(keyword("invoice", Some(cat.category_id), doc.doc_id)).await;
    h.insert(keyword_by_task(kw.keyword_id, t1.task_id)).await;

    biz.delete(&h.db).await.unwrap();

    assert_eq!(h.count(Task).await, 0);
    assert_eq!(h.count(DocumentByTask).await, 0);
    assert_eq!(h.count(KeywordByTask).await, 0);
    // Documents and keywords belong to the document, not the task.
    assert_eq!(h.count(Document).await, 1);
    assert_eq!(h.count(Keyword).await, 1);
}

#[tokio::test]
async fn test_deleting_category_keeps_keywords() {
    let h = TestHarness::new().await;
    let doc = h.insert(document("D1", None)).await;
    let cat = h.insert(category("finance")).await;
    let kw = h.insert(keyword("invoice", Some(cat.category_id), doc.doc_id)).await;

    cat.delete(&h.db).await.unwrap();

    let kw = Keyword::find_by_id(kw.keyword_id)
        .one(&h.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kw.category_id, None);
}

#[tokio::test]
async fn test_meta_in_use_cannot_be_deleted() {
    let h = TestHarness::new().await;
    let doc = h.insert(document("D1", None)).await;
    let kind = h.insert(item_type("text")).await;
    let amount = h.insert(meta("amount", kind.item_type_id)).await;
    h.insert(item("total", amount.meta_id, doc.doc_id)).await;

    assert!(amount.delete(&h.db).await.is_err());
    assert_eq!(h.count(Meta).await, 1);
}

#[tokio::test]
async fn test_task_documents_many_to_many() {
    let h = TestHarness::new().await;
    let biz = h.insert(business("B1", None)).await;
    let t1 = h.insert(task("T1", biz.biz_id, None)).await;
    let first = h.insert(document("D1", None)).await;
    let second = h.insert(document("D2", None)).await;
    h.insert(document_by_task(t1.task_id, first.doc_id)).await;
    h.insert(document_by_task(t1.task_id, second.doc_id)).await;

    let mut codes: Vec<String> = t1
        .find_related(Document)
        .all(&h.db)
        .await
        .unwrap()
        .into_iter()
        .filter_map(|d| d.doc_code)
        .collect();
    codes.sort();
    assert_eq!(codes, vec!["D1", "D2"]);

    let tasks = first.find_related(Task).all(&h.db).await.unwrap();
    assert_eq!(tasks.len(), 1);
}
