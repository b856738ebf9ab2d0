//! Source document entity, the root of items, keywords, samples and templates.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_document")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub doc_id: i32,
    pub doc_code: Option<String>,
    pub doc_name: Option<String>,
    /// Short code naming what the extractor should target.
    pub extraction_target: Option<String>,
    pub created_date: Option<DateTimeUtc>,
    pub updated_date: Option<DateTimeUtc>,
    pub user_id: Option<i32>,
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
    #[sea_orm(has_many = "super::item::Entity")]
    Item,
    #[sea_orm(has_many = "super::keyword::Entity")]
    Keyword,
    #[sea_orm(has_many = "super::doc_sample::Entity")]
    DocSample,
    #[sea_orm(has_many = "super::template::Entity")]
    Template,
    #[sea_orm(has_many = "super::document_by_task::Entity")]
    DocumentByTask,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl Related<super::keyword::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Keyword.def()
    }
}

impl Related<super::doc_sample::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DocSample.def()
    }
}

impl Related<super::template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Template.def()
    }
}

impl Related<super::document_by_task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DocumentByTask.def()
    }
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        super::document_by_task::Relation::Task.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::document_by_task::Relation::Document.def().rev())
    }
}

timestamped_behavior!(created_date, updated_date);
