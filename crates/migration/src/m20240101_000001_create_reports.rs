use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reports::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reports::Loop).string().not_null())
                    .col(ColumnDef::new(Reports::Section).string().not_null())
                    .col(
                        ColumnDef::new(Reports::Status)
                            .string()
                            .not_null()
                            .default("green"),
                    )
                    .col(ColumnDef::new(Reports::Assigned).string().null())
                    .col(
                        ColumnDef::new(Reports::Remark)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Reports::Timestamp).string().not_null())
                    .to_owned(),
            )
            .await?;

        // One report per (loop, section); upserts conflict on this index
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_reports_loop_section")
                    .table(Reports::Table)
                    .col(Reports::Loop)
                    .col(Reports::Section)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_reports_loop_section")
                    .table(Reports::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Reports::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Reports {
    Table,
    Id,
    Loop,
    Section,
    Status,
    Assigned,
    Remark,
    Timestamp,
}
