//! Creates `admin_spell_check_dict`.

use sea_orm_migration::{prelude::*, schema::*};

use super::{index, user_fk};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminSpellCheckDict::Table)
                    .if_not_exists()
                    .col(pk_auto(AdminSpellCheckDict::SpellDictId))
                    .col(string_len(AdminSpellCheckDict::KeywordType, 16).default("ALL"))
                    .col(string_len_null(AdminSpellCheckDict::WrongKeyword, 64))
                    .col(string_len_null(AdminSpellCheckDict::CorrectKeyword, 64))
                    .col(
                        timestamp_with_time_zone_null(AdminSpellCheckDict::CreatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone_null(AdminSpellCheckDict::UpdatedDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer_null(AdminSpellCheckDict::UserId))
                    .foreign_key(&mut user_fk(
                        "fk_admin_spell_check_dict_user",
                        AdminSpellCheckDict::Table,
                        AdminSpellCheckDict::UserId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "ix_admin_spell_check_dict_keyword_type",
                AdminSpellCheckDict::Table,
                AdminSpellCheckDict::KeywordType,
            ))
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminSpellCheckDict::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AdminSpellCheckDict {
    Table,
    SpellDictId,
    KeywordType,
    WrongKeyword,
    CorrectKeyword,
    CreatedDate,
    UpdatedDate,
    UserId,
}
