//! Initial database migration.
//!
//! Creates the company, report period, category and line item tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(COMPANIES_SQL).await?;
        db.execute_unprepared(REPORT_PERIODS_SQL).await?;
        db.execute_unprepared(CATEGORIES_SQL).await?;
        db.execute_unprepared(LINE_ITEMS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            r"
DROP TABLE IF EXISTS line_items CASCADE;
DROP TABLE IF EXISTS categories CASCADE;
DROP TABLE IF EXISTS report_periods CASCADE;
DROP TABLE IF EXISTS companies CASCADE;
",
        )
        .await?;
        Ok(())
    }
}

const COMPANIES_SQL: &str = r"
CREATE TABLE companies (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const REPORT_PERIODS_SQL: &str = r"
CREATE TABLE report_periods (
    id BIGSERIAL PRIMARY KEY,
    company_id BIGINT NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    taxes NUMERIC(20, 4),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Merge queries match both bounds exactly
CREATE INDEX idx_report_periods_bounds ON report_periods(start_date, end_date);

CREATE INDEX idx_report_periods_company ON report_periods(company_id);
";

const CATEGORIES_SQL: &str = r"
CREATE TABLE categories (
    id BIGSERIAL PRIMARY KEY,
    report_period_id BIGINT NOT NULL REFERENCES report_periods(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    category_type TEXT NOT NULL,
    value NUMERIC(20, 4) NOT NULL DEFAULT 0
);

CREATE INDEX idx_categories_period ON categories(report_period_id);
";

const LINE_ITEMS_SQL: &str = r"
CREATE TABLE line_items (
    id BIGSERIAL PRIMARY KEY,
    category_id BIGINT NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    original_name TEXT,
    value NUMERIC(20, 4) NOT NULL DEFAULT 0,
    account_id TEXT
);

CREATE INDEX idx_line_items_category ON line_items(category_id);
";
