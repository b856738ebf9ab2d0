//! Spell-check substitution rule: `wrong_keyword` is replaced by
//! `correct_keyword` in extracted keys, values, or both.

use sea_orm::entity::prelude::*;

use crate::lifecycle::{KeywordType, UnknownLabel};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_spell_check_dict")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub spell_dict_id: i32,
    /// One of the `KeywordType` labels.
    pub keyword_type: String,
    pub wrong_keyword: Option<String>,
    pub correct_keyword: Option<String>,
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
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

timestamped_behavior!(created_date, updated_date);

impl Model {
    pub fn rule_type(&self) -> Result<KeywordType, UnknownLabel> {
        self.keyword_type.parse()
    }
}
