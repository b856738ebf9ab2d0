//! Database migrations.
//!
//! Tables are created in dependency order so that every foreign key target
//! exists first. Foreign keys are declared inline with `CREATE TABLE`, which
//! keeps the migrations valid on SQLite as well as PostgreSQL.

use sea_orm_migration::prelude::*;

mod m20240301_000001_create_user_table;
mod m20240301_000002_create_business_task_tables;
mod m20240301_000003_create_document_tables;
mod m20240301_000004_create_item_tables;
mod m20240301_000005_create_keyword_tables;
mod m20240301_000006_create_sample_template_tables;
mod m20240301_000007_create_spell_check_dict_table;
mod m20240301_000008_create_ocr_nlp_result_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_user_table::Migration),
            Box::new(m20240301_000002_create_business_task_tables::Migration),
            Box::new(m20240301_000003_create_document_tables::Migration),
            Box::new(m20240301_000004_create_item_tables::Migration),
            Box::new(m20240301_000005_create_keyword_tables::Migration),
            Box::new(m20240301_000006_create_sample_template_tables::Migration),
            Box::new(m20240301_000007_create_spell_check_dict_table::Migration),
            Box::new(m20240301_000008_create_ocr_nlp_result_table::Migration),
        ]
    }
}

#[derive(DeriveIden)]
pub(crate) enum AdminUser {
    Table,
    UserId,
}

/// `user_id` reference to `admin_user`, nulled when the user is deleted.
pub(crate) fn user_fk<T, C>(name: &str, table: T, column: C) -> ForeignKeyCreateStatement
where
    T: IntoTableRef,
    C: IntoIden,
{
    ForeignKey::create()
        .name(name)
        .from(table, column)
        .to(AdminUser::Table, AdminUser::UserId)
        .on_delete(ForeignKeyAction::SetNull)
        .to_owned()
}

/// Reference to a parent row; the child row is deleted with its parent.
pub(crate) fn cascade_fk<T, C, P, PC>(
    name: &str,
    table: T,
    column: C,
    parent: P,
    parent_column: PC,
) -> ForeignKeyCreateStatement
where
    T: IntoTableRef,
    C: IntoIden,
    P: IntoTableRef,
    PC: IntoIden,
{
    ForeignKey::create()
        .name(name)
        .from(table, column)
        .to(parent, parent_column)
        .on_delete(ForeignKeyAction::Cascade)
        .to_owned()
}

/// Non-unique single-column index.
pub(crate) fn index<T, C>(name: &str, table: T, column: C) -> IndexCreateStatement
where
    T: IntoTableRef,
    C: IntoIndexColumn,
{
    Index::create()
        .name(name)
        .table(table)
        .col(column)
        .to_owned()
}
