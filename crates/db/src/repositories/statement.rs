//! Statement repository for canonical period records.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use finsync_core::merge::{CompanyRef, PeriodRef, StoredCategory};
use finsync_core::pipeline::{EntityCounts, PersistenceError};
use finsync_core::ports::StatementStore;
use finsync_core::schema::{LineItem, PeriodRecord};
use finsync_shared::types::{
    CategoryId, CompanyId, DateFormatError, ReportDate, ReportPeriodId,
};
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info};

use crate::entities::{categories, companies, line_items, report_periods};

/// Error types for statement persistence.
#[derive(Debug, thiserror::Error)]
pub enum StatementRepoError {
    /// A record date is not a strict calendar date.
    #[error(transparent)]
    InvalidDate(#[from] DateFormatError),

    /// A report period points at a company that does not exist.
    #[error("Company not found: {0}")]
    CompanyNotFound(i64),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<StatementRepoError> for PersistenceError {
    fn from(err: StatementRepoError) -> Self {
        match err {
            StatementRepoError::InvalidDate(e) => Self::InvalidDate(e.to_string()),
            StatementRepoError::Database(e) => Self::Database(e.to_string()),
            other @ StatementRepoError::CompanyNotFound(_) => Self::Database(other.to_string()),
        }
    }
}

/// Repository for companies, report periods, categories and line items.
#[derive(Debug, Clone)]
pub struct StatementRepository {
    db: DatabaseConnection,
}

impl StatementRepository {
    /// Creates a new statement repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Writes one company's records in a single transaction.
    ///
    /// The company is looked up by name and created when missing. Each record
    /// becomes one report period with one category per canonical key.
    ///
    /// # Errors
    ///
    /// Returns an error if a date is malformed or any insert fails; nothing is
    /// committed in that case.
    pub async fn save_records(
        &self,
        company_name: &str,
        records: &[PeriodRecord],
    ) -> Result<EntityCounts, StatementRepoError> {
        let txn = self.db.begin().await?;

        let company = find_or_create_company(&txn, company_name).await?;
        let mut counts = EntityCounts {
            companies: 1,
            ..EntityCounts::default()
        };

        for record in records {
            let (start_date, end_date) = record_bounds(record)?;

            let period = report_periods::ActiveModel {
                company_id: Set(company.id),
                start_date: Set(start_date.date()),
                end_date: Set(end_date.date()),
                taxes: Set(record.taxes.map(stored_amount)),
                ..Default::default()
            };
            let period = period.insert(&txn).await?;
            counts.report_periods += 1;

            for (key, amount) in record.amounts.iter() {
                let category = categories::ActiveModel {
                    report_period_id: Set(period.id),
                    name: Set(key.as_str().to_string()),
                    category_type: Set(key.as_str().to_string()),
                    value: Set(stored_amount(*amount)),
                    ..Default::default()
                };
                let category = category.insert(&txn).await?;
                counts.categories += 1;

                for item in record.line_items.get(key) {
                    line_item_model(category.id, item).insert(&txn).await?;
                    counts.line_items += 1;
                }
            }
        }

        txn.commit().await?;

        info!(
            company = %company_name,
            company_id = company.id,
            report_periods = counts.report_periods,
            categories = counts.categories,
            line_items = counts.line_items,
            "Saved statement records"
        );
        Ok(counts)
    }

    /// Loads categories whose report period has exactly these bounds.
    ///
    /// Categories are ordered by id and carry their line items (ordered by id),
    /// period and company.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn load_categories(
        &self,
        start_date: ReportDate,
        end_date: ReportDate,
    ) -> Result<Vec<StoredCategory>, StatementRepoError> {
        let rows = categories::Entity::find()
            .find_also_related(report_periods::Entity)
            .filter(report_periods::Column::StartDate.eq(start_date.date()))
            .filter(report_periods::Column::EndDate.eq(end_date.date()))
            .order_by_asc(categories::Column::Id)
            .all(&self.db)
            .await?;

        let rows: Vec<(categories::Model, report_periods::Model)> = rows
            .into_iter()
            .filter_map(|(category, period)| period.map(|p| (category, p)))
            .collect();
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let company_ids: Vec<i64> = rows.iter().map(|(_, p)| p.company_id).collect();
        let company_list = companies::Entity::find()
            .filter(companies::Column::Id.is_in(company_ids))
            .all(&self.db)
            .await?;

        let category_ids: Vec<i64> = rows.iter().map(|(c, _)| c.id).collect();
        let item_list = line_items::Entity::find()
            .filter(line_items::Column::CategoryId.is_in(category_ids))
            .order_by_asc(line_items::Column::Id)
            .all(&self.db)
            .await?;

        debug!(
            %start_date,
            %end_date,
            categories = rows.len(),
            line_items = item_list.len(),
            "Loaded categories by period bounds"
        );
        assemble_categories(rows, company_list, item_list)
    }

    /// Counts rows in the four statement tables.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_rows(&self) -> Result<EntityCounts, StatementRepoError> {
        Ok(EntityCounts {
            companies: companies::Entity::find().count(&self.db).await?,
            report_periods: report_periods::Entity::find().count(&self.db).await?,
            categories: categories::Entity::find().count(&self.db).await?,
            line_items: line_items::Entity::find().count(&self.db).await?,
        })
    }
}

#[async_trait]
impl StatementStore for StatementRepository {
    async fn save(
        &self,
        company_name: &str,
        records: &[PeriodRecord],
    ) -> Result<EntityCounts, PersistenceError> {
        Ok(self.save_records(company_name, records).await?)
    }

    async fn find_categories_by_period_bounds(
        &self,
        start_date: ReportDate,
        end_date: ReportDate,
    ) -> Result<Vec<StoredCategory>, PersistenceError> {
        Ok(self.load_categories(start_date, end_date).await?)
    }

    async fn count_entities(&self) -> Result<EntityCounts, PersistenceError> {
        Ok(self.count_rows().await?)
    }
}

async fn find_or_create_company<C>(conn: &C, name: &str) -> Result<companies::Model, DbErr>
where
    C: ConnectionTrait,
{
    let existing = companies::Entity::find()
        .filter(companies::Column::Name.eq(name))
        .one(conn)
        .await?;

    if let Some(company) = existing {
        return Ok(company);
    }

    companies::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(conn)
    .await
}

/// Decimal places kept by the `NUMERIC(20, 4)` amount columns.
pub(crate) const AMOUNT_SCALE: u32 = 4;

/// Rounds an amount to the stored scale, half away from zero.
pub(crate) fn stored_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Parses a record's bounds as strict dates.
pub(crate) fn record_bounds(
    record: &PeriodRecord,
) -> Result<(ReportDate, ReportDate), DateFormatError> {
    Ok((
        ReportDate::parse(&record.start_date)?,
        ReportDate::parse(&record.end_date)?,
    ))
}

pub(crate) fn line_item_model(category_id: i64, item: &LineItem) -> line_items::ActiveModel {
    line_items::ActiveModel {
        category_id: Set(category_id),
        name: Set(item.key.clone()),
        original_name: Set(item.original_name.clone()),
        value: Set(stored_amount(item.value)),
        account_id: Set(item.account_id.clone()),
        ..Default::default()
    }
}

/// Joins loaded rows into stored categories, keeping the category order.
pub(crate) fn assemble_categories(
    rows: Vec<(categories::Model, report_periods::Model)>,
    company_list: Vec<companies::Model>,
    item_list: Vec<line_items::Model>,
) -> Result<Vec<StoredCategory>, StatementRepoError> {
    let companies_by_id: HashMap<i64, companies::Model> =
        company_list.into_iter().map(|c| (c.id, c)).collect();

    let mut items_by_category: BTreeMap<i64, Vec<LineItem>> = BTreeMap::new();
    for item in item_list {
        items_by_category
            .entry(item.category_id)
            .or_default()
            .push(LineItem {
                key: item.name,
                original_name: item.original_name,
                value: item.value,
                account_id: item.account_id,
            });
    }

    rows.into_iter()
        .map(|(category, period)| {
            let company = companies_by_id
                .get(&period.company_id)
                .ok_or(StatementRepoError::CompanyNotFound(period.company_id))?;

            Ok(StoredCategory {
                id: CategoryId::new(category.id),
                line_items: items_by_category.remove(&category.id).unwrap_or_default(),
                name: category.name,
                category_type: category.category_type,
                value: category.value,
                period: PeriodRef {
                    id: ReportPeriodId::new(period.id),
                    start_date: ReportDate::from(period.start_date),
                    end_date: ReportDate::from(period.end_date),
                    company_id: CompanyId::new(period.company_id),
                },
                company: CompanyRef {
                    id: CompanyId::new(company.id),
                    name: company.name.clone(),
                },
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "statement_tests.rs"]
mod tests;
