//! `SeaORM` Entity for categories table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub report_period_id: i64,
    pub name: String,
    pub category_type: String,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub value: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::report_periods::Entity",
        from = "Column::ReportPeriodId",
        to = "super::report_periods::Column::Id",
        on_delete = "Cascade"
    )]
    ReportPeriods,
    #[sea_orm(has_many = "super::line_items::Entity")]
    LineItems,
}

impl Related<super::report_periods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReportPeriods.def()
    }
}

impl Related<super::line_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LineItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
