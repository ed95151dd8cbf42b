//! Template root node and document-level defaults

use crate::{Column, NodeProps, Row};
use serde::{Deserialize, Serialize};

/// Page orientation. Wire names follow the persisted format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    #[serde(rename = "VERTICAL")]
    Portrait,
    #[serde(rename = "LANDSCAPE")]
    Landscape,
}

/// Supported paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperFormat {
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
}

/// Who can see a saved template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Access {
    Private,
    Public,
}

/// Document-level properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateProps {
    pub title: String,
    pub orientation: Orientation,
    pub format: PaperFormat,
    pub snap_to_grid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    pub access: Access,
    #[serde(
        rename = "authorID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub author_id: Option<i64>,
}

impl Default for TemplateProps {
    fn default() -> Self {
        Self {
            title: "New Template".to_string(),
            orientation: Orientation::Portrait,
            format: PaperFormat::A4,
            snap_to_grid: false,
            background: Some("#FFFFFF".to_string()),
            access: Access::Private,
            author_id: None,
        }
    }
}

/// Partial update for [`TemplateProps`]. Fields left as `None` keep their
/// current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplatePropsPatch {
    pub title: Option<String>,
    pub orientation: Option<Orientation>,
    pub format: Option<PaperFormat>,
    pub snap_to_grid: Option<bool>,
    pub background: Option<String>,
    pub access: Option<Access>,
    #[serde(rename = "authorID")]
    pub author_id: Option<i64>,
}

impl TemplateProps {
    /// Shallow-merge a patch into these properties.
    pub fn apply(&mut self, patch: TemplatePropsPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(orientation) = patch.orientation {
            self.orientation = orientation;
        }
        if let Some(format) = patch.format {
            self.format = format;
        }
        if let Some(snap_to_grid) = patch.snap_to_grid {
            self.snap_to_grid = snap_to_grid;
        }
        if let Some(background) = patch.background {
            self.background = Some(background);
        }
        if let Some(access) = patch.access {
            self.access = access;
        }
        if let Some(author_id) = patch.author_id {
            self.author_id = Some(author_id);
        }
    }
}

/// The root document being edited. Exactly one exists per editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Persisted identifier, assigned by the persistence service on save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub props: TemplateProps,
    pub columns: Vec<Column>,
}

impl Template {
    /// Create a new template: one full-bleed column containing one
    /// full-bleed row with no elements.
    pub fn new() -> Self {
        Self {
            id: None,
            props: TemplateProps::default(),
            columns: vec![Column {
                order: 0,
                title: None,
                props: NodeProps::at(50.0, 50.0, 100.0, 100.0),
                rows: vec![Row {
                    order: 0,
                    title: None,
                    props: NodeProps::at(50.0, 50.0, 100.0, 100.0),
                    elements: Vec::new(),
                }],
            }],
        }
    }

    /// Look up a column by its order key.
    pub fn column(&self, order: usize) -> Option<&Column> {
        self.columns.iter().find(|c| c.order == order)
    }

    /// Mutable lookup of a column by its order key.
    pub fn column_mut(&mut self, order: usize) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.order == order)
    }

    /// Look up a row by its (column order, row order) pair. Row orders are
    /// only unique within their column.
    pub fn row(&self, column_order: usize, row_order: usize) -> Option<&Row> {
        self.column(column_order)?.row(row_order)
    }

    /// Total element count across the whole tree.
    pub fn element_count(&self) -> usize {
        self.columns
            .iter()
            .flat_map(|c| &c.rows)
            .map(|r| r.elements.len())
            .sum()
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::new()
    }
}
