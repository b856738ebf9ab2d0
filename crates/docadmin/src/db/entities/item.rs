//! Extraction item (a field to pull out of a document).

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub item_id: i32,
    pub item_name: Option<String>,
    /// Deleting a meta row that still has items is rejected by the database.
    pub meta_id: Option<i32>,
    pub priority: Option<i32>,
    pub created_date: Option<DateTimeUtc>,
    pub updated_date: Option<DateTimeUtc>,
    pub user_id: Option<i32>,
    pub doc_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::meta::Entity",
        from = "Column::MetaId",
        to = "super::meta::Column::MetaId"
    )]
    Meta,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::UserId",
        on_delete = "SetNull"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::document::Entity",
        from = "Column::DocId",
        to = "super::document::Column::DocId",
        on_delete = "Cascade"
    )]
    Document,
    #[sea_orm(has_many = "super::item_by_task::Entity")]
    ItemByTask,
}

impl Related<super::meta::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Meta.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Document.def()
    }
}

impl Related<super::item_by_task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemByTask.def()
    }
}

timestamped_behavior!(created_date, updated_date);
