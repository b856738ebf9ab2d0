//! Task entity. A task belongs to a business and is deleted with it.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_task")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub task_id: i32,
    pub task_code: Option<String>,
    pub task_name: Option<String>,
    pub biz_id: Option<i32>,
    pub created_date: Option<DateTimeUtc>,
    pub updated_date: Option<DateTimeUtc>,
    pub user_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::business::Entity",
        from = "Column::BizId",
        to = "super::business::Column::BizId",
        on_delete = "Cascade"
    )]
    Business,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::UserId",
        on_delete = "SetNull"
    )]
    User,
    #[sea_orm(has_many = "super::document_by_task::Entity")]
    DocumentByTask,
    #[sea_orm(has_many = "super::item_by_task::Entity")]
    ItemByTask,
    #[sea_orm(has_many = "super::keyword_by_task::Entity")]
    KeywordByTask,
}

impl Related<super::business::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Business.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::document_by_task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DocumentByTask.def()
    }
}

impl Related<super::item_by_task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemByTask.def()
    }
}

impl Related<super::keyword_by_task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::KeywordByTask.def()
    }
}

/// Documents assigned to this task, through `admin_document_by_task`.
impl Related<super::document::Entity> for Entity {
    fn to() -> RelationDef {
        super::document_by_task::Relation::Document.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::document_by_task::Relation::Task.def().rev())
    }
}

timestamped_behavior!(created_date, updated_date);
