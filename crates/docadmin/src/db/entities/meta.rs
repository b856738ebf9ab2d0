use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_meta")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub meta_id: i32,
    pub meta_name: Option<String>,
    pub item_type_id: Option<i32>,
    /// Nesting level label within the item type.
    pub depth: Option<String>,
    pub created_date: Option<DateTimeUtc>,
    pub updated_date: Option<DateTimeUtc>,
    pub user_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::item_type::Entity",
        from = "Column::ItemTypeId",
        to = "super::item_type::Column::ItemTypeId",
        on_delete = "SetNull"
    )]
    ItemType,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::UserId",
        on_delete = "SetNull"
    )]
    User,
    #[sea_orm(has_many = "super::item::Entity")]
    Item,
}

impl Related<super::item_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemType.def()
    }
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

timestamped_behavior!(created_date, updated_date);
