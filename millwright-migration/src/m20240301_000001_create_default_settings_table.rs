use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No unique constraint: the startup seeder guarantees a single row
        manager
            .create_table(
                Table::create()
                    .table(DefaultSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DefaultSettings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DefaultSettings::ResourceLimits)
                            .json()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DefaultSettings::Weights).json().not_null())
                    .col(
                        ColumnDef::new(DefaultSettings::RecipesOff)
                            .json()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DefaultSettings::Inputs).json().not_null())
                    .col(ColumnDef::new(DefaultSettings::Outputs).json().not_null())
                    .col(ColumnDef::new(DefaultSettings::MaxItem).string())
                    .col(
                        ColumnDef::new(DefaultSettings::CheckboxNuclearWaste)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(DefaultSettings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DefaultSettings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum DefaultSettings {
    Table,
    Id,
    ResourceLimits,
    Weights,
    RecipesOff,
    Inputs,
    Outputs,
    MaxItem,
    CheckboxNuclearWaste,
    CreatedAt,
}
