use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SkillCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SkillCategories::Id)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SkillCategories::Name).text().not_null())
                    .col(
                        ColumnDef::new(SkillCategories::ColorScheme)
                            .string_len(16)
                            .not_null()
                            .default("blue"),
                    )
                    .col(
                        ColumnDef::new(SkillCategories::Skills)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SkillCategories::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SkillCategories {
    Table,
    Id,
    Name,
    ColorScheme,
    Skills,
}
