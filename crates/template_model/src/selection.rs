//! Selection model - references into the template tree
//!
//! A selection is a view over the tree, not owned data: whenever the node it
//! points at disappears from a new snapshot, the selection must be reset.
//! The editing engine performs that repair; the types here only describe the
//! reference shape.

use serde::{Deserialize, Serialize};

/// What the user currently has selected on the canvas or in the structure
/// tree. Columns are addressed by order, rows by (column, row) order pair,
/// elements by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    None,
    Column {
        column: usize,
    },
    Row {
        column: usize,
        row: usize,
    },
    Element {
        id: String,
    },
}

impl Selection {
    pub fn element(id: impl Into<String>) -> Self {
        Self::Element { id: id.into() }
    }

    pub fn row(column: usize, row: usize) -> Self {
        Self::Row { column, row }
    }

    pub fn column(column: usize) -> Self {
        Self::Column { column }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The selected element id, if an element is selected.
    pub fn element_id(&self) -> Option<&str> {
        match self {
            Self::Element { id } => Some(id),
            _ => None,
        }
    }
}

/// Which half of a table payload a sub-selection points into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableSelectionKind {
    Column,
    Row,
}

/// A selection of a single column or row inside a table element's payload.
/// Orthogonal to [`Selection`]: it exists alongside the owning element's
/// selection and is invalidated with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSelection {
    /// Id of the owning table element
    pub element_id: String,
    pub kind: TableSelectionKind,
    /// Id of the selected TableColumn or TableRow
    pub sub_id: String,
}

impl TableSelection {
    pub fn column(element_id: impl Into<String>, sub_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            kind: TableSelectionKind::Column,
            sub_id: sub_id.into(),
        }
    }

    pub fn row(element_id: impl Into<String>, sub_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            kind: TableSelectionKind::Row,
            sub_id: sub_id.into(),
        }
    }
}
