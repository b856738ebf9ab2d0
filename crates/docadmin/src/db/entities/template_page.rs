use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_template_page")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub template_page_id: i32,
    pub page_number: Option<i32>,
    /// Rotation in degrees.
    pub page_angle: i32,
    pub page_width: Option<i32>,
    pub page_height: Option<i32>,
    /// JSON array of block definitions on this page.
    #[sea_orm(column_type = "Text")]
    pub blocks: String,
    pub template_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::template::Entity",
        from = "Column::TemplateId",
        to = "super::template::Column::TemplateId",
        on_delete = "Cascade"
    )]
    Template,
}

impl Related<super::template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Template.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
