//! Wire types for the hierarchical provider's report document.

use serde::{Deserialize, Serialize};

/// A whole report: column metadata plus the row tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TreeReport {
    /// Report header, kept opaque.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<serde_json::Value>,
    /// Column definitions.
    #[serde(default)]
    pub columns: Columns,
    /// Top-level rows.
    #[serde(default)]
    pub rows: Rows,
}

/// Column list wrapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Columns {
    /// Columns in display order.
    #[serde(default)]
    pub column: Vec<Column>,
}

/// One report column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Column {
    /// Display title.
    #[serde(default)]
    pub col_title: String,
    /// Column type (`Account`, `Money`, ...).
    #[serde(default)]
    pub col_type: String,
    /// Name/value annotations such as `StartDate` and `EndDate`.
    #[serde(default)]
    pub meta_data: Vec<MetaData>,
}

impl Column {
    /// Returns the annotation value for `name`.
    #[must_use]
    pub fn meta(&self, name: &str) -> Option<&str> {
        self.meta_data
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.value.as_str())
    }
}

/// Column annotation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetaData {
    /// Annotation name.
    #[serde(default)]
    pub name: String,
    /// Annotation value.
    #[serde(default)]
    pub value: String,
}

/// Row list wrapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Rows {
    /// Rows in display order.
    #[serde(default)]
    pub row: Vec<Row>,
}

/// A report row: either a data row with its own cells, or a section with
/// a header, nested rows and a summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Row {
    /// `Section` or `Data`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub row_type: Option<String>,
    /// Group name; present on group rows only.
    #[serde(default, rename = "group", skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Section header cells.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<CellRow>,
    /// Nested rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Rows>,
    /// Rolled-up subtotal cells.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<CellRow>,
    /// Data row cells.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_data: Option<Vec<Cell>>,
}

impl Row {
    /// First-cell label: own cells, then header, then summary.
    #[must_use]
    pub fn label(&self) -> &str {
        self.col_data
            .as_deref()
            .or_else(|| self.header.as_ref().map(|h| h.col_data.as_slice()))
            .or_else(|| self.summary.as_ref().map(|s| s.col_data.as_slice()))
            .and_then(<[Cell]>::first)
            .map_or("", |cell| cell.value.as_str())
    }

    /// Child rows, empty for data rows.
    #[must_use]
    pub fn children(&self) -> &[Row] {
        self.rows.as_ref().map_or(&[], |rows| rows.row.as_slice())
    }
}

/// A row of cells.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CellRow {
    /// Cells, one per column.
    #[serde(default)]
    pub col_data: Vec<Cell>,
}

/// One cell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Display text.
    #[serde(default)]
    pub value: String,
    /// Provider identifier (account id on label cells).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}
