//! Document layout template. Per-page block definitions live in
//! `admin_template_page` and are deleted with the template.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_template")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub template_id: i32,
    #[sea_orm(unique)]
    pub template_code: Option<String>,
    pub template_name: Option<String>,
    pub file_path: Option<String>,
    pub file_name: Option<String>,
    pub page_count: Option<i32>,
    /// 0 while the template is being edited; other values are set by the
    /// admin front end.
    pub status: i32,
    /// JSON array of title blocks.
    #[sea_orm(column_type = "Text")]
    pub title_blocks: String,
    /// JSON array of non-title blocks.
    #[sea_orm(column_type = "Text")]
    pub etc_blocks: String,
    pub created_date: Option<DateTimeUtc>,
    pub updated_date: Option<DateTimeUtc>,
    pub user_id: Option<i32>,
    pub doc_id: Option<i32>,
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
    #[sea_orm(
        belongs_to = "super::document::Entity",
        from = "Column::DocId",
        to = "super::document::Column::DocId",
        on_delete = "Cascade"
    )]
    Document,
    #[sea_orm(has_many = "super::template_page::Entity")]
    TemplatePage,
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

impl Related<super::template_page::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TemplatePage.def()
    }
}

timestamped_behavior!(created_date, updated_date);
