//! Row nodes - element containers within a column

use crate::{Element, NodeProps};
use serde::{Deserialize, Serialize};

/// A horizontal band within a column. `order` is a dense zero-based rank
/// unique only within the owning column, so a row is always addressed by a
/// (column order, row order) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub order: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub props: NodeProps,
    pub elements: Vec<Element>,
}

impl Row {
    /// Create an empty row at the given order.
    pub fn new(order: usize, props: NodeProps) -> Self {
        Self {
            order,
            title: None,
            props,
            elements: Vec::new(),
        }
    }

    /// Title shown in the structure tree.
    pub fn display_title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("Row {}", self.order + 1))
    }

    /// Look up an element by id within this row.
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }
}
