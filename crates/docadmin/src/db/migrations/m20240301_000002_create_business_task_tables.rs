//! Creates `admin_business` and `admin_task`.

use sea_orm_migration::{prelude::*, schema::*};

use super::{cascade_fk, index, user_fk};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminBusiness::Table)
                    .if_not_exists()
                    .col(pk_auto(AdminBusiness::BizId))
                    .col(string_len_null(AdminBusiness::BizCode, 32))
                    .col(string_len_null(AdminBusiness::BizName, 64))
                    .col(
                        timestamp_with_time_zone_null(AdminBusiness::CreatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone_null(AdminBusiness::UpdatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer_null(AdminBusiness::UserId))
                    .foreign_key(&mut user_fk(
                        "fk_admin_business_user",
                        AdminBusiness::Table,
                        AdminBusiness::UserId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AdminTask::Table)
                    .if_not_exists()
                    .col(pk_auto(AdminTask::TaskId))
                    .col(string_len_null(AdminTask::TaskCode, 32))
                    .col(string_len_null(AdminTask::TaskName, 64))
                    .col(integer_null(AdminTask::BizId))
                    .col(
                        timestamp_with_time_zone_null(AdminTask::CreatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone_null(AdminTask::UpdatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer_null(AdminTask::UserId))
                    .foreign_key(&mut cascade_fk(
                        "fk_admin_task_business",
                        AdminTask::Table,
                        AdminTask::BizId,
                        AdminBusiness::Table,
                        AdminBusiness::BizId,
                    ))
                    .foreign_key(&mut user_fk(
                        "fk_admin_task_user",
                        AdminTask::Table,
                        AdminTask::UserId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index("ix_admin_task_biz_id", AdminTask::Table, AdminTask::BizId))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminTask::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AdminBusiness::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AdminBusiness {
    Table,
    BizId,
    BizCode,
    BizName,
    CreatedDate,
    UpdatedDate,
    UserId,
}

#[derive(DeriveIden)]
enum AdminTask {
    Table,
    TaskId,
    TaskCode,
    TaskName,
    BizId,
    CreatedDate,
    UpdatedDate,
    UserId,
}
