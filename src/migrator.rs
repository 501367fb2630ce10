//! Programmatic schema migrations, run at startup when `auto_migrate` is
//! set and unconditionally by the test harness.

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_catalog_tables::Migration),
            Box::new(m20240601_000002_create_account_tables::Migration),
            Box::new(m20240601_000003_create_stock_tables::Migration),
            Box::new(m20240601_000004_create_trade_tables::Migration),
            Box::new(m20240601_000005_create_debt_tables::Migration),
            Box::new(m20240601_000006_create_return_tables::Migration),
            Box::new(m20240601_000007_create_expense_tables::Migration),
        ]
    }
}

mod m20240601_000001_create_catalog_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000001_create_catalog_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Products::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Products::Store).string().not_null())
                        .col(ColumnDef::new(Products::Name).string().not_null())
                        .col(ColumnDef::new(Products::Kind).string().null())
                        .col(ColumnDef::new(Products::Size).string().null())
                        .col(ColumnDef::new(Products::Color).string().null())
                        .col(ColumnDef::new(Products::Brand).string().null())
                        .col(ColumnDef::new(Products::Description).string().null())
                        .col(
                            ColumnDef::new(Products::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Products::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_products_store")
                        .table(Products::Table)
                        .col(Products::Store)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Warehouses::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Warehouses::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Warehouses::Store).string().not_null())
                        .col(ColumnDef::new(Warehouses::Name).string().not_null())
                        .col(
                            ColumnDef::new(Warehouses::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("uq_warehouses_store_name")
                        .table(Warehouses::Table)
                        .col(Warehouses::Store)
                        .col(Warehouses::Name)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Suppliers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Suppliers::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Suppliers::Store).string().not_null())
                        .col(ColumnDef::new(Suppliers::Name).string().not_null())
                        .col(ColumnDef::new(Suppliers::Contact).string().null())
                        .col(ColumnDef::new(Suppliers::Address).string().null())
                        .col(
                            ColumnDef::new(Suppliers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("uq_suppliers_store_name")
                        .table(Suppliers::Table)
                        .col(Suppliers::Store)
                        .col(Suppliers::Name)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Suppliers::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Warehouses::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Products {
        Table,
        Id,
        Store,
        Name,
        Kind,
        Size,
        Color,
        Brand,
        Description,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Warehouses {
        Table,
        Id,
        Store,
        Name,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum Suppliers {
        Table,
        Id,
        Store,
        Name,
        Contact,
        Address,
        CreatedAt,
    }
}

mod m20240601_000002_create_account_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000002_create_account_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Accounts::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Accounts::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Accounts::Store).string().not_null())
                        .col(ColumnDef::new(Accounts::Name).string().not_null())
                        .col(ColumnDef::new(Accounts::Kind).string().not_null())
                        .col(ColumnDef::new(Accounts::BankName).string().null())
                        .col(ColumnDef::new(Accounts::AccountNumber).string().null())
                        .col(
                            ColumnDef::new(Accounts::IsDefault)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Accounts::Balance)
                                .decimal_len(19, 4)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Accounts::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Accounts::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("uq_accounts_store_name")
                        .table(Accounts::Table)
                        .col(Accounts::Store)
                        .col(Accounts::Name)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(AccountTransactions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(AccountTransactions::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AccountTransactions::AccountId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AccountTransactions::Amount)
                                .decimal_len(19, 4)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AccountTransactions::Description)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(AccountTransactions::Kind).string().not_null())
                        .col(
                            ColumnDef::new(AccountTransactions::TransactionDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AccountTransactions::BalanceAfter)
                                .decimal_len(19, 4)
                                .not_null(),
                        )
                        .col(ColumnDef::new(AccountTransactions::CreatedBy).string().null())
                        .col(
                            ColumnDef::new(AccountTransactions::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_account_transactions_account")
                                .from(AccountTransactions::Table, AccountTransactions::AccountId)
                                .to(Accounts::Table, Accounts::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_account_transactions_account_date")
                        .table(AccountTransactions::Table)
                        .col(AccountTransactions::AccountId)
                        .col(AccountTransactions::TransactionDate)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(AccountTransactions::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Accounts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Accounts {
        Table,
        Id,
        Store,
        Name,
        Kind,
        BankName,
        AccountNumber,
        IsDefault,
        Balance,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum AccountTransactions {
        Table,
        Id,
        AccountId,
        Amount,
        Description,
        Kind,
        TransactionDate,
        BalanceAfter,
        CreatedBy,
        CreatedAt,
    }
}

mod m20240601_000003_create_stock_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000003_create_stock_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(StockLevels::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StockLevels::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockLevels::Store).string().not_null())
                        .col(ColumnDef::new(StockLevels::ProductId).uuid().not_null())
                        .col(ColumnDef::new(StockLevels::WarehouseId).uuid().not_null())
                        .col(
                            ColumnDef::new(StockLevels::Quantity)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(StockLevels::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockLevels::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("uq_stock_levels_store_product_warehouse")
                        .table(StockLevels::Table)
                        .col(StockLevels::Store)
                        .col(StockLevels::ProductId)
                        .col(StockLevels::WarehouseId)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(StockAdjustments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StockAdjustments::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockAdjustments::Store).string().not_null())
                        .col(ColumnDef::new(StockAdjustments::ProductId).uuid().not_null())
                        .col(
                            ColumnDef::new(StockAdjustments::WarehouseId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockAdjustments::Direction)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockAdjustments::Quantity)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockAdjustments::Reason).string().not_null())
                        .col(
                            ColumnDef::new(StockAdjustments::AdjustedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockAdjustments::CreatedBy).string().null())
                        .col(
                            ColumnDef::new(StockAdjustments::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(StockAdjustments::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(StockLevels::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum StockLevels {
        Table,
        Id,
        Store,
        ProductId,
        WarehouseId,
        Quantity,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum StockAdjustments {
        Table,
        Id,
        Store,
        ProductId,
        WarehouseId,
        Direction,
        Quantity,
        Reason,
        AdjustedAt,
        CreatedBy,
        CreatedAt,
    }
}

mod m20240601_000004_create_trade_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000004_create_trade_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(PurchaseLines::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PurchaseLines::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PurchaseLines::Store).string().not_null())
                        .col(ColumnDef::new(PurchaseLines::GroupId).uuid().not_null())
                        .col(ColumnDef::new(PurchaseLines::ProductId).uuid().not_null())
                        .col(ColumnDef::new(PurchaseLines::WarehouseId).uuid().not_null())
                        .col(ColumnDef::new(PurchaseLines::SupplierId).uuid().not_null())
                        .col(
                            ColumnDef::new(PurchaseLines::Quantity)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseLines::UnitPrice)
                                .decimal_len(19, 4)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseLines::Total)
                                .decimal_len(19, 4)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseLines::PaymentKind)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PurchaseLines::AccountId).uuid().null())
                        .col(ColumnDef::new(PurchaseLines::DebtId).uuid().null())
                        .col(ColumnDef::new(PurchaseLines::InvoiceNumber).string().null())
                        .col(ColumnDef::new(PurchaseLines::Description).string().null())
                        .col(
                            ColumnDef::new(PurchaseLines::TransactionDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PurchaseLines::CreatedBy).string().null())
                        .col(
                            ColumnDef::new(PurchaseLines::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_purchase_lines_store_product")
                        .table(PurchaseLines::Table)
                        .col(PurchaseLines::Store)
                        .col(PurchaseLines::ProductId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_purchase_lines_group")
                        .table(PurchaseLines::Table)
                        .col(PurchaseLines::GroupId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(SaleLines::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SaleLines::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SaleLines::Store).string().not_null())
                        .col(ColumnDef::new(SaleLines::GroupId).uuid().not_null())
                        .col(ColumnDef::new(SaleLines::ProductId).uuid().not_null())
                        .col(ColumnDef::new(SaleLines::WarehouseId).uuid().not_null())
                        .col(ColumnDef::new(SaleLines::CustomerName).string().null())
                        .col(
                            ColumnDef::new(SaleLines::Quantity)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SaleLines::UnitPrice)
                                .decimal_len(19, 4)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SaleLines::Total)
                                .decimal_len(19, 4)
                                .not_null(),
                        )
                        .col(ColumnDef::new(SaleLines::PaymentKind).string().not_null())
                        .col(ColumnDef::new(SaleLines::AccountId).uuid().null())
                        .col(ColumnDef::new(SaleLines::DebtId).uuid().null())
                        .col(ColumnDef::new(SaleLines::InvoiceNumber).string().null())
                        .col(ColumnDef::new(SaleLines::Description).string().null())
                        .col(
                            ColumnDef::new(SaleLines::TransactionDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SaleLines::CreatedBy).string().null())
                        .col(
                            ColumnDef::new(SaleLines::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_sale_lines_store_date")
                        .table(SaleLines::Table)
                        .col(SaleLines::Store)
                        .col(SaleLines::TransactionDate)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SaleLines::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(PurchaseLines::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum PurchaseLines {
        Table,
        Id,
        Store,
        GroupId,
        ProductId,
        WarehouseId,
        SupplierId,
        Quantity,
        UnitPrice,
        Total,
        PaymentKind,
        AccountId,
        DebtId,
        InvoiceNumber,
        Description,
        TransactionDate,
        CreatedBy,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum SaleLines {
        Table,
        Id,
        Store,
        GroupId,
        ProductId,
        WarehouseId,
        CustomerName,
        Quantity,
        UnitPrice,
        Total,
        PaymentKind,
        AccountId,
        DebtId,
        InvoiceNumber,
        Description,
        TransactionDate,
        CreatedBy,
        CreatedAt,
    }
}

mod m20240601_000005_create_debt_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000005_create_debt_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Debts::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Debts::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Debts::Store).string().not_null())
                        .col(ColumnDef::new(Debts::Direction).string().not_null())
                        .col(ColumnDef::new(Debts::SupplierId).uuid().null())
                        .col(ColumnDef::new(Debts::CustomerName).string().null())
                        .col(
                            ColumnDef::new(Debts::TotalDebt)
                                .decimal_len(19, 4)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Debts::PaidAmount)
                                .decimal_len(19, 4)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Debts::RemainingDebt)
                                .decimal_len(19, 4)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Debts::Status).string().not_null())
                        .col(
                            ColumnDef::new(Debts::DueDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(ColumnDef::new(Debts::Description).string().null())
                        .col(ColumnDef::new(Debts::GroupId).uuid().null())
                        .col(
                            ColumnDef::new(Debts::DebtDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Debts::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Debts::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_debts_store_status")
                        .table(Debts::Table)
                        .col(Debts::Store)
                        .col(Debts::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(PaymentHistory::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PaymentHistory::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PaymentHistory::DebtId).uuid().not_null())
                        .col(
                            ColumnDef::new(PaymentHistory::Amount)
                                .decimal_len(19, 4)
                                .not_null(),
                        )
                        .col(ColumnDef::new(PaymentHistory::Note).string().null())
                        .col(
                            ColumnDef::new(PaymentHistory::PaidAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PaymentHistory::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_payment_history_debt")
                                .from(PaymentHistory::Table, PaymentHistory::DebtId)
                                .to(Debts::Table, Debts::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_payment_history_debt")
                        .table(PaymentHistory::Table)
                        .col(PaymentHistory::DebtId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PaymentHistory::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Debts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Debts {
        Table,
        Id,
        Store,
        Direction,
        SupplierId,
        CustomerName,
        TotalDebt,
        PaidAmount,
        RemainingDebt,
        Status,
        DueDate,
        Description,
        GroupId,
        DebtDate,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum PaymentHistory {
        Table,
        Id,
        DebtId,
        Amount,
        Note,
        PaidAt,
        CreatedAt,
    }
}

mod m20240601_000006_create_return_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000006_create_return_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Returns::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Returns::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Returns::Store).string().not_null())
                        .col(ColumnDef::new(Returns::Kind).string().not_null())
                        .col(ColumnDef::new(Returns::ReturnType).string().not_null())
                        .col(ColumnDef::new(Returns::Reason).string().not_null())
                        .col(ColumnDef::new(Returns::Description).string().null())
                        .col(ColumnDef::new(Returns::WarehouseId).uuid().not_null())
                        .col(ColumnDef::new(Returns::SupplierId).uuid().null())
                        .col(ColumnDef::new(Returns::CustomerName).string().null())
                        .col(ColumnDef::new(Returns::AccountId).uuid().null())
                        .col(
                            ColumnDef::new(Returns::Total)
                                .decimal_len(19, 4)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Returns::InvoiceNumber).string().null())
                        .col(
                            ColumnDef::new(Returns::ReturnDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Returns::CreatedBy).string().null())
                        .col(
                            ColumnDef::new(Returns::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ReturnLines::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ReturnLines::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ReturnLines::ReturnId).uuid().not_null())
                        .col(ColumnDef::new(ReturnLines::ProductId).uuid().not_null())
                        .col(
                            ColumnDef::new(ReturnLines::Quantity)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ReturnLines::UnitPrice)
                                .decimal_len(19, 4)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ReturnLines::Subtotal)
                                .decimal_len(19, 4)
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_return_lines_return")
                                .from(ReturnLines::Table, ReturnLines::ReturnId)
                                .to(Returns::Table, Returns::Id),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ReturnLines::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Returns::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Returns {
        Table,
        Id,
        Store,
        Kind,
        ReturnType,
        Reason,
        Description,
        WarehouseId,
        SupplierId,
        CustomerName,
        AccountId,
        Total,
        InvoiceNumber,
        ReturnDate,
        CreatedBy,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum ReturnLines {
        Table,
        Id,
        ReturnId,
        ProductId,
        Quantity,
        UnitPrice,
        Subtotal,
    }
}

mod m20240601_000007_create_expense_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000007_create_expense_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(OperationalExpenses::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OperationalExpenses::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(OperationalExpenses::Store).string().not_null())
                        .col(
                            ColumnDef::new(OperationalExpenses::ExpenseType)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OperationalExpenses::Amount)
                                .decimal_len(19, 4)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OperationalExpenses::Description)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(OperationalExpenses::AccountId).uuid().null())
                        .col(
                            ColumnDef::new(OperationalExpenses::ReferenceId)
                                .uuid()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(OperationalExpenses::ExpenseDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OperationalExpenses::CreatedBy)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(OperationalExpenses::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(SalaryPayments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SalaryPayments::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SalaryPayments::Store).string().not_null())
                        .col(
                            ColumnDef::new(SalaryPayments::StaffName)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SalaryPayments::Period).date().not_null())
                        .col(
                            ColumnDef::new(SalaryPayments::Amount)
                                .decimal_len(19, 4)
                                .not_null(),
                        )
                        .col(ColumnDef::new(SalaryPayments::ExpenseId).uuid().not_null())
                        .col(ColumnDef::new(SalaryPayments::Note).string().null())
                        .col(
                            ColumnDef::new(SalaryPayments::PaidAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalaryPayments::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SalaryPayments::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(OperationalExpenses::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum OperationalExpenses {
        Table,
        Id,
        Store,
        ExpenseType,
        Amount,
        Description,
        AccountId,
        ReferenceId,
        ExpenseDate,
        CreatedBy,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum SalaryPayments {
        Table,
        Id,
        Store,
        StaffName,
        Period,
        Amount,
        ExpenseId,
        Note,
        PaidAt,
        CreatedAt,
    }
}
