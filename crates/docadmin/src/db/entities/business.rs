//! Business unit entity.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_business")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub biz_id: i32,
    pub biz_code: Option<String>,
    pub biz_name: Option<String>,
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
    #[sea_orm(has_many = "super::task::Entity")]
    Task,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Task.def()
    }
}

timestamped_behavior!(created_date, updated_date);
