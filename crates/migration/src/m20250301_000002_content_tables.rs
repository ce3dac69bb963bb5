use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Announcements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Announcements::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Announcements::Title).string().not_null())
                    .col(ColumnDef::new(Announcements::Body).text().not_null())
                    .col(ColumnDef::new(Announcements::AttachmentUrl).string())
                    .col(ColumnDef::new(Announcements::PublishedOn).date().not_null())
                    .col(
                        ColumnDef::new(Announcements::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PanelMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PanelMembers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PanelMembers::Name).string().not_null())
                    .col(ColumnDef::new(PanelMembers::Designation).string().not_null())
                    .col(ColumnDef::new(PanelMembers::District).string())
                    .col(ColumnDef::new(PanelMembers::PhotoUrl).string())
                    .col(
                        ColumnDef::new(PanelMembers::DisplayOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(PanelMembers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Achievements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Achievements::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Achievements::Title).string().not_null())
                    .col(ColumnDef::new(Achievements::Description).text().not_null())
                    .col(ColumnDef::new(Achievements::ImageUrl).string())
                    .col(ColumnDef::new(Achievements::AchievedOn).date().not_null())
                    .col(
                        ColumnDef::new(Achievements::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GalleryItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GalleryItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GalleryItems::Title).string().not_null())
                    .col(ColumnDef::new(GalleryItems::ImageUrl).string().not_null())
                    .col(ColumnDef::new(GalleryItems::TakenOn).date())
                    .col(
                        ColumnDef::new(GalleryItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MediaCoverages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MediaCoverages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MediaCoverages::Title).string().not_null())
                    .col(ColumnDef::new(MediaCoverages::Outlet).string().not_null())
                    .col(ColumnDef::new(MediaCoverages::ArticleUrl).string())
                    .col(ColumnDef::new(MediaCoverages::ImageUrl).string())
                    .col(ColumnDef::new(MediaCoverages::PublishedOn).date().not_null())
                    .col(
                        ColumnDef::new(MediaCoverages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ElectionDocuments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ElectionDocuments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ElectionDocuments::Title).string().not_null())
                    .col(ColumnDef::new(ElectionDocuments::FileUrl).string().not_null())
                    .col(
                        ColumnDef::new(ElectionDocuments::PublishedOn)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ElectionDocuments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ElectionDocuments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MediaCoverages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GalleryItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Achievements::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PanelMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Announcements::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Announcements {
    Table,
    Id,
    Title,
    Body,
    AttachmentUrl,
    PublishedOn,
    CreatedAt,
}

#[derive(DeriveIden)]
enum PanelMembers {
    Table,
    Id,
    Name,
    Designation,
    District,
    PhotoUrl,
    DisplayOrder,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Achievements {
    Table,
    Id,
    Title,
    Description,
    ImageUrl,
    AchievedOn,
    CreatedAt,
}

#[derive(DeriveIden)]
enum GalleryItems {
    Table,
    Id,
    Title,
    ImageUrl,
    TakenOn,
    CreatedAt,
}

#[derive(DeriveIden)]
enum MediaCoverages {
    Table,
    Id,
    Title,
    Outlet,
    ArticleUrl,
    ImageUrl,
    PublishedOn,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ElectionDocuments {
    Table,
    Id,
    Title,
    FileUrl,
    PublishedOn,
    CreatedAt,
}
