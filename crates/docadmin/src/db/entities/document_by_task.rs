//! Link table assigning documents to tasks.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_document_by_task")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub doc_by_task_id: i32,
    pub task_id: Option<i32>,
    pub doc_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::task::Entity",
        from = "Column::TaskId",
        to = "super::task::Column::TaskId",
        on_delete = "Cascade"
    )]
    Task,
    #[sea_orm(
        belongs_to = "super::document::Entity",
        from = "Column::DocId",
        to = "super::document::Column::DocId",
        on_delete = "Cascade"
    )]
    Document,
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Task.def()
    }
}

impl Related<super::document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Document.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
