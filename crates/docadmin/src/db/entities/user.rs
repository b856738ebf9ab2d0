//! Administrative account entity.

use sea_orm::entity::prelude::*;

use crate::lifecycle::Permission;

/// Admin user model.
///
/// Almost every other table references a user as its creator/updater; those
/// references are nulled when the user is deleted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub user_id: i32,
    /// Display name.
    pub user_name: Option<String>,
    /// Login name, unique across accounts.
    #[sea_orm(unique)]
    pub user_account: Option<String>,
    /// bcrypt hash of the password. Never the plaintext.
    pub password: Option<String>,
    pub is_super: bool,
    /// One of the `Permission` labels.
    pub admin_permission: String,
    pub review_permission: bool,
    pub is_active: bool,
    pub created_date: Option<DateTimeUtc>,
    pub updated_date: Option<DateTimeUtc>,
    pub last_login_date: Option<DateTimeUtc>,
    pub pwd_updated_date: Option<DateTimeUtc>,
    /// JSON array of allowed source IP strings.
    pub ip_list: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::business::Entity")]
    Business,
    #[sea_orm(has_many = "super::task::Entity")]
    Task,
    #[sea_orm(has_many = "super::document::Entity")]
    Document,
}

impl Related<super::business::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Business.def()
    }
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

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = chrono::Utc::now();
        if insert {
            if self.created_date.is_not_set() {
                self.created_date = sea_orm::ActiveValue::Set(Some(now));
            }
            if self.pwd_updated_date.is_not_set() {
                self.pwd_updated_date = sea_orm::ActiveValue::Set(Some(now));
            }
        } else {
            self.updated_date = sea_orm::ActiveValue::Set(Some(now));
        }
        Ok(self)
    }
}

impl Model {
    /// Parsed permission level. Unknown labels are reported as an error.
    pub fn permission(&self) -> Result<Permission, crate::lifecycle::UnknownLabel> {
        self.admin_permission.parse()
    }

    /// Allowed source IPs decoded from the JSON column.
    pub fn allowed_ips(&self) -> Vec<String> {
        super::decode_json_list(&self.ip_list)
    }

    pub fn is_admin(&self) -> bool {
        self.is_super || matches!(self.permission(), Ok(Permission::Admin))
    }
}
