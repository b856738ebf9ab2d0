//! User repository: account creation, lookup, login and deletion for the
//! `admin_user` table.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
};
use serde::{Deserialize, Serialize};

use super::entities::user;
use super::entities::User;
use super::DatabaseError;
use crate::error::{DocAdminError, ValidationError};
use crate::lifecycle::Permission;
use crate::password;

const MAX_ACCOUNT_LEN: usize = 32;
const MAX_NAME_LEN: usize = 32;
const MAX_IP_LIST_LEN: usize = 4000;

/// A new account as submitted by an administrator.
#[derive(Clone, Serialize, Deserialize)]
pub struct UserCreateRequest {
    pub user_account: String,
    /// Plaintext; hashed before it reaches the database.
    pub password: String,
    pub user_name: String,
    #[serde(default)]
    pub admin_permission: Permission,
    #[serde(default = "default_review_permission")]
    pub review_permission: bool,
    #[serde(default)]
    pub ip_list: Vec<String>,
}

fn default_review_permission() -> bool {
    true
}

impl std::fmt::Debug for UserCreateRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCreateRequest")
            .field("user_account", &self.user_account)
            .field("password", &"[REDACTED]")
            .field("user_name", &self.user_name)
            .field("admin_permission", &self.admin_permission)
            .field("review_permission", &self.review_permission)
            .field("ip_list", &self.ip_list)
            .finish()
    }
}

impl UserCreateRequest {
    pub fn new(
        user_account: impl Into<String>,
        password: impl Into<String>,
        user_name: impl Into<String>,
    ) -> Self {
        Self {
            user_account: user_account.into(),
            password: password.into(),
            user_name: user_name.into(),
            admin_permission: Permission::default(),
            review_permission: default_review_permission(),
            ip_list: Vec::new(),
        }
    }

    /// Checks the request against the column widths of `admin_user`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_text("user_account", &self.user_account, MAX_ACCOUNT_LEN)?;
        check_text("user_name", &self.user_name, MAX_NAME_LEN)?;
        if self.password.is_empty() {
            return Err(ValidationError::new("password", "must not be empty"));
        }
        let encoded_len = self.encoded_ip_list().map(|s| s.chars().count()).unwrap_or(0);
        if encoded_len > MAX_IP_LIST_LEN {
            return Err(ValidationError::new(
                "ip_list",
                format!("encoded list is {} characters, limit is {}", encoded_len, MAX_IP_LIST_LEN),
            ));
        }
        Ok(())
    }

    fn encoded_ip_list(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.ip_list)
    }
}

fn check_text(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::new(
            field,
            format!("{} characters, limit is {}", len, max),
        ));
    }
    Ok(())
}

/// Finds the account with exactly this login name.
pub async fn find_by_account<C>(db: &C, account: &str) -> Result<Option<user::Model>, DatabaseError>
where
    C: ConnectionTrait,
{
    Ok(User::find()
        .filter(user::Column::UserAccount.eq(account))
        .one(db)
        .await?)
}

pub async fn find_by_id<C>(db: &C, user_id: i32) -> Result<Option<user::Model>, DatabaseError>
where
    C: ConnectionTrait,
{
    Ok(User::find_by_id(user_id).one(db).await?)
}

/// Creates an account. Fails with `AccountExists` when the login name is
/// taken; a racing insert that slips past the check hits the unique index.
pub async fn create<C>(
    db: &C,
    request: &UserCreateRequest,
    cost: u32,
) -> Result<user::Model, DocAdminError>
where
    C: ConnectionTrait,
{
    request.validate()?;

    if find_by_account(db, &request.user_account).await?.is_some() {
        return Err(DatabaseError::AccountExists(request.user_account.clone()).into());
    }

    let hash = password::hash_password(&request.password, cost)?;
    let ip_list = request.encoded_ip_list().map_err(DatabaseError::from)?;

    let model = user::ActiveModel {
        user_account: Set(Some(request.user_account.clone())),
        password: Set(Some(hash)),
        user_name: Set(Some(request.user_name.clone())),
        admin_permission: Set(request.admin_permission.into()),
        review_permission: Set(request.review_permission),
        ip_list: Set(ip_list),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(DatabaseError::from)?;

    log::info!(
        "Created account '{}' (user_id={})",
        request.user_account,
        model.user_id
    );
    Ok(model)
}

/// Deletes an account by id and returns the number of rows removed.
/// Rows the user owned keep existing with `user_id` nulled.
pub async fn delete_by_id<C>(db: &C, user_id: i32) -> Result<u64, DatabaseError>
where
    C: ConnectionTrait,
{
    let result = User::delete_by_id(user_id).exec(db).await?;
    if result.rows_affected > 0 {
        log::info!("Deleted account user_id={}", user_id);
    }
    Ok(result.rows_affected)
}

/// Verifies a login. Returns `None` for an unknown account, a wrong password
/// or a deactivated account; on success stamps `last_login_date`.
pub async fn authenticate<C>(
    db: &C,
    account: &str,
    plaintext: &str,
) -> Result<Option<user::Model>, DocAdminError>
where
    C: ConnectionTrait,
{
    let Some(mut model) = find_by_account(db, account).await? else {
        log::debug!("Login for unknown account '{}'", account);
        return Ok(None);
    };

    let Some(hash) = model.password.as_deref() else {
        log::warn!("Account '{}' has no password set", account);
        return Ok(None);
    };
    if !password::verify_password(plaintext, hash)? {
        log::debug!("Wrong password for account '{}'", account);
        return Ok(None);
    }
    if !model.is_active {
        log::warn!("Login refused for deactivated account '{}'", account);
        return Ok(None);
    }

    // Bypasses before_save so a login does not count as a profile update.
    let now = Utc::now();
    User::update_many()
        .col_expr(user::Column::LastLoginDate, Expr::value(now))
        .filter(user::Column::UserId.eq(model.user_id))
        .exec(db)
        .await
        .map_err(DatabaseError::from)?;
    model.last_login_date = Some(now);

    Ok(Some(model))
}

/// Replaces the password hash and stamps `pwd_updated_date`.
pub async fn change_password<C>(
    db: &C,
    user_id: i32,
    new_password: &str,
    cost: u32,
) -> Result<user::Model, DocAdminError>
where
    C: ConnectionTrait,
{
    let model = find_by_id(db, user_id)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: "admin_user",
            key: user_id.to_string(),
        })?;

    let hash = password::hash_password(new_password, cost)?;

    let mut active: user::ActiveModel = model.into();
    active.password = Set(Some(hash));
    active.pwd_updated_date = Set(Some(Utc::now()));
    let updated = active.update(db).await.map_err(DatabaseError::from)?;

    log::info!("Password changed for user_id={}", user_id);
    Ok(updated)
}
