//! Column nodes - top-level containers within a template

use crate::{NodeProps, Row};
use serde::{Deserialize, Serialize};

/// A vertical band of the template. Columns are ordered left to right;
/// `order` is a dense zero-based rank that doubles as the column's identity
/// key within the template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub order: usize,
    /// Display title for the structure tree; `None` falls back to a
    /// positional label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub props: NodeProps,
    pub rows: Vec<Row>,
}

impl Column {
    /// Create an empty column at the given order.
    pub fn new(order: usize, props: NodeProps) -> Self {
        Self {
            order,
            title: None,
            props,
            rows: Vec::new(),
        }
    }

    /// Title shown in the structure tree.
    pub fn display_title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("Column {}", self.order + 1))
    }

    /// Look up a row by its order key within this column.
    pub fn row(&self, order: usize) -> Option<&Row> {
        self.rows.iter().find(|r| r.order == order)
    }

    /// Mutable lookup of a row by its order key.
    pub fn row_mut(&mut self, order: usize) -> Option<&mut Row> {
        self.rows.iter_mut().find(|r| r.order == order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_title_fallback() {
        let mut column = Column::new(2, NodeProps::default());
        assert_eq!(column.display_title(), "Column 3");

        column.title = Some("Sidebar".to_string());
        assert_eq!(column.display_title(), "Sidebar");
    }
}
