use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Registrations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Registrations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Registrations::FirstName).string().not_null())
                    .col(ColumnDef::new(Registrations::LastName).string().not_null())
                    .col(ColumnDef::new(Registrations::CouncilRegNo).string())
                    .col(ColumnDef::new(Registrations::MemberNumber).string())
                    .col(ColumnDef::new(Registrations::Phone).string().not_null())
                    .col(ColumnDef::new(Registrations::Email).string())
                    .col(ColumnDef::new(Registrations::Address).string())
                    .col(ColumnDef::new(Registrations::District).string())
                    .col(
                        ColumnDef::new(Registrations::MembershipType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Registrations::PaymentStatus)
                            .string()
                            .not_null()
                            .default("unpaid"),
                    )
                    .col(ColumnDef::new(Registrations::PaymentReference).string())
                    .col(ColumnDef::new(Registrations::Source).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Registrations::Status)
                            .string()
                            .not_null()
                            .default("pending-verification"),
                    )
                    .col(ColumnDef::new(Registrations::OtpCode).string())
                    .col(ColumnDef::new(Registrations::OtpExpiresAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Registrations::OtpAttempts)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Registrations::VerificationToken)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Registrations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Registrations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_registrations_phone")
                    .table(Registrations::Table)
                    .col(Registrations::Phone)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_registrations_council_reg_no")
                    .table(Registrations::Table)
                    .col(Registrations::CouncilRegNo)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let _ = manager
            .drop_index(Index::drop().name("idx_registrations_phone").to_owned())
            .await;
        let _ = manager
            .drop_index(
                Index::drop()
                    .name("idx_registrations_council_reg_no")
                    .to_owned(),
            )
            .await;

        manager
            .drop_table(Table::drop().table(Registrations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Registrations {
    Table,
    Id,
    FirstName,
    LastName,
    CouncilRegNo,
    MemberNumber,
    Phone,
    Email,
    Address,
    District,
    MembershipType,
    PaymentStatus,
    PaymentReference,
    Source,
    Status,
    OtpCode,
    OtpExpiresAt,
    OtpAttempts,
    VerificationToken,
    CreatedAt,
    UpdatedAt,
}
