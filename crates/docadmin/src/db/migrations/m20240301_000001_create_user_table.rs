//! Creates `admin_user`.

use sea_orm_migration::{prelude::*, schema::*};

use super::index;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminUser::Table)
                    .if_not_exists()
                    .col(pk_auto(AdminUser::UserId))
                    .col(string_len_null(AdminUser::UserName, 32))
                    .col(string_len_null(AdminUser::UserAccount, 32).unique_key())
                    .col(string_len_null(AdminUser::Password, 128))
                    .col(boolean(AdminUser::IsSuper).default(false))
                    .col(string_len(AdminUser::AdminPermission, 8).default("MEMBER"))
                    .col(boolean(AdminUser::ReviewPermission).default(true))
                    .col(boolean(AdminUser::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone_null(AdminUser::CreatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(AdminUser::UpdatedDate))
                    .col(timestamp_with_time_zone_null(AdminUser::LastLoginDate))
                    .col(
                        timestamp_with_time_zone_null(AdminUser::PwdUpdatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(string_len(AdminUser::IpList, 4000).default("[]"))
                    .to_owned(),
            )
            .await?;

        // Filters used by the account list screen.
        for (name, column) in [
            ("ix_admin_user_is_super", AdminUser::IsSuper),
            ("ix_admin_user_admin_perm", AdminUser::AdminPermission),
            ("ix_admin_user_review_perm", AdminUser::ReviewPermission),
            ("ix_admin_user_is_active", AdminUser::IsActive),
        ] {
            manager
                .create_index(index(name, AdminUser::Table, column))
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminUser::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AdminUser {
    Table,
    UserId,
    UserName,
    UserAccount,
    Password,
    IsSuper,
    AdminPermission,
    ReviewPermission,
    IsActive,
    CreatedDate,
    UpdatedDate,
    LastLoginDate,
    PwdUpdatedDate,
    IpList,
}
