//! Layout templates and their per-page block definitions.

use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, ModelTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use super::entities::{template, template_page};
use super::entities::{Template, TemplatePage};
use super::DatabaseError;

/// A template as drawn in the admin editor.
#[derive(Debug, Clone, Default)]
pub struct NewTemplate {
    pub template_code: String,
    pub template_name: Option<String>,
    pub file_path: Option<String>,
    pub file_name: Option<String>,
    pub doc_id: Option<i32>,
    pub user_id: Option<i32>,
    pub title_blocks: Vec<serde_json::Value>,
    pub etc_blocks: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default)]
pub struct NewTemplatePage {
    pub page_number: i32,
    pub page_angle: i32,
    pub page_width: Option<i32>,
    pub page_height: Option<i32>,
    pub blocks: Vec<serde_json::Value>,
}

/// Inserts a template and all of its pages, or nothing at all.
pub async fn create_with_pages(
    db: &DatabaseConnection,
    new: &NewTemplate,
    pages: &[NewTemplatePage],
) -> Result<(template::Model, Vec<template_page::Model>), DatabaseError> {
    let title_blocks = serde_json::to_string(&new.title_blocks)?;
    let etc_blocks = serde_json::to_string(&new.etc_blocks)?;

    let txn = db.begin().await?;

    let saved = template::ActiveModel {
        template_code: Set(Some(new.template_code.clone())),
        template_name: Set(new.template_name.clone()),
        file_path: Set(new.file_path.clone()),
        file_name: Set(new.file_name.clone()),
        page_count: Set(i32::try_from(pages.len()).ok()),
        title_blocks: Set(title_blocks),
        etc_blocks: Set(etc_blocks),
        doc_id: Set(new.doc_id),
        user_id: Set(new.user_id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut saved_pages = Vec::with_capacity(pages.len());
    for page in pages {
        let row = template_page::ActiveModel {
            page_number: Set(Some(page.page_number)),
            page_angle: Set(page.page_angle),
            page_width: Set(page.page_width),
            page_height: Set(page.page_height),
            blocks: Set(serde_json::to_string(&page.blocks)?),
            template_id: Set(Some(saved.template_id)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        saved_pages.push(row);
    }

    txn.commit().await?;

    log::info!(
        "Created template '{}' with {} page(s)",
        new.template_code,
        saved_pages.len()
    );
    Ok((saved, saved_pages))
}

/// Loads a template with its pages in page order.
pub async fn find_with_pages<C>(
    db: &C,
    template_id: i32,
) -> Result<Option<(template::Model, Vec<template_page::Model>)>, DatabaseError>
where
    C: ConnectionTrait,
{
    let Some(found) = Template::find_by_id(template_id).one(db).await? else {
        return Ok(None);
    };
    let pages = found
        .find_related(TemplatePage)
        .order_by_asc(template_page::Column::PageNumber)
        .all(db)
        .await?;
    Ok(Some((found, pages)))
}

pub async fn find_by_code<C>(db: &C, template_code: &str) -> Result<Option<template::Model>, DatabaseError>
where
    C: ConnectionTrait,
{
    Ok(Template::find()
        .filter(template::Column::TemplateCode.eq(template_code))
        .one(db)
        .await?)
}

/// Deletes a template; its pages go with it.
pub async fn delete<C>(db: &C, template_id: i32) -> Result<u64, DatabaseError>
where
    C: ConnectionTrait,
{
    let result = Template::delete_by_id(template_id).exec(db).await?;
    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;
    use sea_orm::PaginatorTrait;

    fn sample_template(code: &str) -> NewTemplate {
        NewTemplate {
            template_code: code.to_string(),
            template_name: Some("Invoice".to_string()),
            title_blocks: vec![serde_json::json!({"x": 10, "y": 20, "text": "INVOICE"})],
            ..Default::default()
        }
    }

    fn sample_pages() -> Vec<NewTemplatePage> {
        vec![
            NewTemplatePage {
                page_number: 2,
                page_angle: 90,
                ..Default::default()
            },
            NewTemplatePage {
                page_number: 1,
                blocks: vec![serde_json::json!({"x": 0, "y": 0})],
                ..Default::default()
            },
        ]
    }

    #[tokio::test]
    async fn test_create_and_find_with_pages() {
        let db = open_in_memory().await.unwrap();
        let (saved, pages) = create_with_pages(&db, &sample_template("T-001"), &sample_pages())
            .await
            .unwrap();
        assert_eq!(saved.page_count, Some(2));
        assert_eq!(saved.status, 0);
        assert_eq!(saved.etc_blocks, "[]");
        assert_eq!(pages.len(), 2);

        let (found, pages) = find_with_pages(&db, saved.template_id).await.unwrap().unwrap();
        assert_eq!(found.template_code.as_deref(), Some("T-001"));
        let numbers: Vec<Option<i32>> = pages.iter().map(|p| p.page_number).collect();
        assert_eq!(numbers, vec![Some(1), Some(2)]);
        assert_eq!(pages[1].page_angle, 90);
        assert_eq!(pages[1].blocks, "[]");
    }

    #[tokio::test]
    async fn test_duplicate_code_rejected() {
        let db = open_in_memory().await.unwrap();
        create_with_pages(&db, &sample_template("T-001"), &sample_pages())
            .await
            .unwrap();

        let result = create_with_pages(&db, &sample_template("T-001"), &sample_pages()).await;
        assert!(matches!(result, Err(DatabaseError::Orm(_))));
        assert_eq!(Template::find().count(&db).await.unwrap(), 1);
        assert_eq!(TemplatePage::find().count(&db).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_pages() {
        let db = open_in_memory().await.unwrap();
        let (saved, _) = create_with_pages(&db, &sample_template("T-001"), &sample_pages())
            .await
            .unwrap();

        assert_eq!(delete(&db, saved.template_id).await.unwrap(), 1);
        assert!(find_by_code(&db, "T-001").await.unwrap().is_none());
        assert_eq!(TemplatePage::find().count(&db).await.unwrap(), 0);
    }
}
