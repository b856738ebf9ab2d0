//! Sample file for a document type, with the titles and pages it contains.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_doc_sample")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub doc_sample_id: i32,
    pub file_path: Option<String>,
    pub file_name: Option<String>,
    /// JSON array of document titles found in the sample.
    pub doc_titles: String,
    /// JSON array of page numbers, parallel to `doc_titles`.
    pub page_numbers: String,
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

timestamped_behavior!(created_date, updated_date);

impl Model {
    pub fn titles(&self) -> Vec<String> {
        super::decode_json_list(&self.doc_titles)
    }

    pub fn pages(&self) -> Vec<i64> {
        super::decode_json_list(&self.page_numbers)
    }
}
