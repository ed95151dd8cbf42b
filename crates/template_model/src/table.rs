//! Table payload - the sub-tree nested inside table elements
//!
//! A table element's single value entry is a [`TableData`]: ordered columns,
//! ordered rows, and per-table settings. The structural invariant here is
//! the cells/columns sync: every row's cell map has exactly one entry per
//! existing column id, maintained by the mutation helpers below.
//!
//! Tables also enforce a hard floor of one column and one row, unlike
//! document-level rows and columns which may be emptied freely.

use crate::NodeProps;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Per-table display settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSettings {
    pub borders: bool,
    pub header_row: bool,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            borders: true,
            header_row: true,
        }
    }
}

/// A column of a table payload. The id is an opaque unique string; `name`
/// is the header text shown in the rendered table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableColumn {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub order: usize,
    pub props: NodeProps,
}

impl TableColumn {
    /// Title shown in the structure tree.
    pub fn display_title(&self) -> String {
        self.title.clone().unwrap_or_else(|| self.name.clone())
    }
}

/// A row of a table payload. `cells` maps column ids to cell text and is
/// kept in sync with the table's column set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub id: String,
    pub order: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub props: NodeProps,
    pub cells: BTreeMap<String, String>,
}

impl TableRow {
    /// Title shown in the structure tree.
    pub fn display_title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("Row {}", self.order + 1))
    }
}

/// The nested table sub-tree carried by a table element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<TableRow>,
    pub settings: TableSettings,
}

fn sub_id() -> String {
    Uuid::new_v4().to_string()
}

impl TableData {
    /// Create a table with the given dimensions. Columns are named
    /// "Column 1".."Column n" and all cells start empty. Dimensions are
    /// clamped to the one-column, one-row floor.
    pub fn with_dimensions(columns: usize, rows: usize) -> Self {
        let columns: Vec<TableColumn> = (0..columns.max(1))
            .map(|order| TableColumn {
                id: sub_id(),
                name: format!("Column {}", order + 1),
                title: None,
                order,
                props: NodeProps::default(),
            })
            .collect();

        let rows = (0..rows.max(1))
            .map(|order| TableRow {
                id: sub_id(),
                order,
                title: None,
                props: NodeProps::default(),
                cells: columns
                    .iter()
                    .map(|c| (c.id.clone(), String::new()))
                    .collect(),
            })
            .collect();

        Self {
            columns,
            rows,
            settings: TableSettings::default(),
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Look up a column by id.
    pub fn column(&self, id: &str) -> Option<&TableColumn> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Mutable lookup of a column by id.
    pub fn column_mut(&mut self, id: &str) -> Option<&mut TableColumn> {
        self.columns.iter_mut().find(|c| c.id == id)
    }

    /// Look up a row by id.
    pub fn row(&self, id: &str) -> Option<&TableRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Mutable lookup of a row by id.
    pub fn row_mut(&mut self, id: &str) -> Option<&mut TableRow> {
        self.rows.iter_mut().find(|r| r.id == id)
    }

    /// Append a column and give every row an empty cell for it.
    pub fn add_column(&mut self, name: impl Into<String>) -> &TableColumn {
        let index = self.columns.len();
        let column = TableColumn {
            id: sub_id(),
            name: name.into(),
            title: None,
            order: index,
            props: NodeProps::default(),
        };
        for row in &mut self.rows {
            row.cells.insert(column.id.clone(), String::new());
        }
        self.columns.push(column);
        &self.columns[index]
    }

    /// Remove a column and its cell entry from every row, re-indexing the
    /// remaining column orders. Refused when it would remove the last
    /// column, or when the id does not resolve; returns whether anything
    /// changed.
    pub fn remove_column(&mut self, id: &str) -> bool {
        if self.columns.len() <= 1 {
            return false;
        }
        let Some(index) = self.columns.iter().position(|c| c.id == id) else {
            return false;
        };
        self.columns.remove(index);
        for (order, column) in self.columns.iter_mut().enumerate() {
            column.order = order;
        }
        for row in &mut self.rows {
            row.cells.remove(id);
        }
        true
    }

    /// Append a row with one empty cell per existing column.
    pub fn add_row(&mut self) -> &TableRow {
        let index = self.rows.len();
        let row = TableRow {
            id: sub_id(),
            order: index,
            title: None,
            props: NodeProps::default(),
            cells: self
                .columns
                .iter()
                .map(|c| (c.id.clone(), String::new()))
                .collect(),
        };
        self.rows.push(row);
        &self.rows[index]
    }

    /// Remove a row, re-indexing the remaining row orders. Refused when it
    /// would remove the last row or the id does not resolve.
    pub fn remove_row(&mut self, id: &str) -> bool {
        if self.rows.len() <= 1 {
            return false;
        }
        let Some(index) = self.rows.iter().position(|r| r.id == id) else {
            return false;
        };
        self.rows.remove(index);
        for (order, row) in self.rows.iter_mut().enumerate() {
            row.order = order;
        }
        true
    }

    /// Set a cell's text. Returns false if the row or column does not
    /// resolve.
    pub fn set_cell(&mut self, row_id: &str, column_id: &str, value: impl Into<String>) -> bool {
        if self.column(column_id).is_none() {
            return false;
        }
        match self.row_mut(row_id) {
            Some(row) => {
                row.cells.insert(column_id.to_string(), value.into());
                true
            }
            None => false,
        }
    }

    /// Check the cells/columns sync invariant: every row has exactly one
    /// cell entry per existing column id.
    pub fn cells_in_sync(&self) -> bool {
        let column_ids: std::collections::BTreeSet<&str> =
            self.columns.iter().map(|c| c.id.as_str()).collect();
        self.rows.iter().all(|row| {
            row.cells.len() == column_ids.len()
                && row.cells.keys().all(|id| column_ids.contains(id.as_str()))
        })
    }
}

impl Default for TableData {
    fn default() -> Self {
        Self::with_dimensions(2, 2)
    }
}
