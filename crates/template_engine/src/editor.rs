//! The template editing engine
//!
//! [`TemplateEditor`] owns the current template tree, the selection state,
//! the clipboard slot, and the snapshot history. Every mutation operates
//! copy-on-write: it clones the current tree, applies the edit, re-establishes
//! the order/identity invariants, and commits the new tree as a history
//! snapshot. The tree is never edited in place, which is what makes the
//! history's snapshotting safe without further bookkeeping.
//!
//! Lookup failures surface as typed [`EditError`]s; a failed operation leaves
//! the tree, the selection, and the history untouched.

use crate::clipboard::{paste_target, ClipboardSlot};
use crate::locate::{element_at, element_at_mut, locate_element, reindex_elements};
use crate::{EditError, History, Result};
use template_model::{
    next_element_id, normalize_title, Column, Element, ElementType, ElementValue, NodeProps,
    PropsPatch, Row, Selection, TableData, TableSelection, TableSelectionKind, Template,
    TemplatePropsPatch,
};

/// Format string for the captured value of new datetime elements.
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// The editing engine for a single template session.
pub struct TemplateEditor {
    template: Template,
    selection: Selection,
    table_selection: Option<TableSelection>,
    clipboard: Option<ClipboardSlot>,
    history: History<Template>,
    /// Set while an undo/redo snapshot is being applied, so that follow-up
    /// bookkeeping can never push onto the history mid-replay.
    replaying: bool,
}

impl TemplateEditor {
    /// Create an editor with a fresh default template.
    pub fn new() -> Self {
        Self::with_template(Template::new())
    }

    /// Create an editor around an existing template. The given state is the
    /// history baseline and cannot be undone past.
    pub fn with_template(template: Template) -> Self {
        Self {
            history: History::new(template.clone()),
            template,
            selection: Selection::None,
            table_selection: None,
            clipboard: None,
            replaying: false,
        }
    }

    /// The current template tree.
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// The current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Set the selection.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    /// The current table sub-selection, if any.
    pub fn table_selection(&self) -> Option<&TableSelection> {
        self.table_selection.as_ref()
    }

    /// Set the table sub-selection.
    pub fn set_table_selection(&mut self, selection: Option<TableSelection>) {
        self.table_selection = selection;
    }

    /// The currently selected element, if the selection is an element that
    /// still resolves in the tree.
    pub fn selected_element(&self) -> Option<&Element> {
        let id = self.selection.element_id()?;
        let path = locate_element(&self.template, id)?;
        Some(element_at(&self.template, path))
    }

    // ------------------------------------------------------------------
    // Property patching
    // ------------------------------------------------------------------

    /// Shallow-merge a patch into the template's document properties.
    /// Values are accepted as given, without validation.
    pub fn update_template_props(&mut self, patch: TemplatePropsPatch) {
        let mut next = self.template.clone();
        next.props.apply(patch);
        self.commit(next);
    }

    /// Merge a patch into an element's property bag. The patch's `title`
    /// rides along as a distinguished field and is split out before the
    /// merge; an empty title unsets it.
    pub fn update_element_props(&mut self, element_id: &str, patch: PropsPatch) -> Result<()> {
        let mut next = self.template.clone();
        let path = locate_element(&next, element_id)
            .ok_or_else(|| EditError::ElementNotFound(element_id.to_string()))?;
        let element = element_at_mut(&mut next, path);
        if let Some(title) = patch.title {
            element.title = normalize_title(title);
        }
        element.props.merge(patch.props);
        self.commit(next);
        Ok(())
    }

    /// Replace an element's value sequence wholesale.
    pub fn update_element_values(
        &mut self,
        element_id: &str,
        values: Vec<ElementValue>,
    ) -> Result<()> {
        let mut next = self.template.clone();
        let path = locate_element(&next, element_id)
            .ok_or_else(|| EditError::ElementNotFound(element_id.to_string()))?;
        element_at_mut(&mut next, path).values = values;
        self.commit(next);
        Ok(())
    }

    /// Set an element's display title. An empty string unsets it, falling
    /// back to the default label.
    pub fn update_element_title(&mut self, element_id: &str, title: impl Into<String>) -> Result<()> {
        let mut next = self.template.clone();
        let path = locate_element(&next, element_id)
            .ok_or_else(|| EditError::ElementNotFound(element_id.to_string()))?;
        element_at_mut(&mut next, path).title = normalize_title(title);
        self.commit(next);
        Ok(())
    }

    /// Set a column's display title.
    pub fn update_column_title(
        &mut self,
        column_order: usize,
        title: impl Into<String>,
    ) -> Result<()> {
        let mut next = self.template.clone();
        let column = next
            .column_mut(column_order)
            .ok_or(EditError::ColumnNotFound(column_order))?;
        column.title = normalize_title(title);
        self.commit(next);
        Ok(())
    }

    /// Set a row's display title.
    pub fn update_row_title(
        &mut self,
        column_order: usize,
        row_order: usize,
        title: impl Into<String>,
    ) -> Result<()> {
        let mut next = self.template.clone();
        let column = next
            .column_mut(column_order)
            .ok_or(EditError::ColumnNotFound(column_order))?;
        let row = column.row_mut(row_order).ok_or(EditError::RowNotFound {
            column: column_order,
            row: row_order,
        })?;
        row.title = normalize_title(title);
        self.commit(next);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Structural edits
    // ------------------------------------------------------------------

    /// Append a new element of `kind` to the row addressed by
    /// (column order, row order), select it, and return its id.
    pub fn add_element(
        &mut self,
        kind: ElementType,
        row_order: usize,
        column_order: usize,
    ) -> Result<String> {
        let mut next = self.template.clone();
        let column = next
            .column_mut(column_order)
            .ok_or(EditError::ColumnNotFound(column_order))?;
        let row = column.row_mut(row_order).ok_or(EditError::RowNotFound {
            column: column_order,
            row: row_order,
        })?;

        let id = next_element_id(kind, &row.elements);
        let same_type = row.elements.iter().filter(|e| e.kind == kind).count();
        let element = Element {
            id: id.clone(),
            order: row.elements.len(),
            kind,
            title: Some(format!("{} {}", kind.label(), same_type + 1)),
            values: default_values(kind),
            props: default_props(kind),
        };
        row.elements.push(element);

        self.commit(next);
        self.selection = Selection::element(id.clone());
        Ok(id)
    }

    /// Remove an element, re-indexing its siblings to a dense order
    /// sequence. A selection pointing at the removed element is reset.
    pub fn remove_element(&mut self, element_id: &str) -> Result<()> {
        let mut next = self.template.clone();
        let path = locate_element(&next, element_id)
            .ok_or_else(|| EditError::ElementNotFound(element_id.to_string()))?;
        let row = &mut next.columns[path.column_index].rows[path.row_index];
        row.elements.remove(path.element_index);
        reindex_elements(row);
        self.commit(next);
        self.repair_selection();
        Ok(())
    }

    /// Move an element to the end of another row. The target is validated
    /// before the element is detached, so a stale target leaves the source
    /// untouched.
    pub fn move_element(
        &mut self,
        element_id: &str,
        new_row_order: usize,
        new_column_order: usize,
    ) -> Result<()> {
        let mut next = self.template.clone();
        let path = locate_element(&next, element_id)
            .ok_or_else(|| EditError::ElementNotFound(element_id.to_string()))?;
        let target_column_index = next
            .columns
            .iter()
            .position(|c| c.order == new_column_order)
            .ok_or(EditError::ColumnNotFound(new_column_order))?;
        let target_row_index = next.columns[target_column_index]
            .rows
            .iter()
            .position(|r| r.order == new_row_order)
            .ok_or(EditError::RowNotFound {
                column: new_column_order,
                row: new_row_order,
            })?;

        let source_row = &mut next.columns[path.column_index].rows[path.row_index];
        let mut element = source_row.elements.remove(path.element_index);
        reindex_elements(source_row);

        let target_row = &mut next.columns[target_column_index].rows[target_row_index];
        element.order = target_row.elements.len();
        target_row.elements.push(element);

        self.commit(next);
        Ok(())
    }

    /// Append a new empty row to a column and select it. The row is placed
    /// directly below the column's current last row.
    pub fn add_row(&mut self, column_order: usize) -> Result<()> {
        let mut next = self.template.clone();
        let column = next
            .column_mut(column_order)
            .ok_or(EditError::ColumnNotFound(column_order))?;

        let order = column.rows.len();
        let y = match column.rows.last() {
            Some(last) => last.props.y.unwrap_or(50.0) + 10.0,
            None => column.props.y.unwrap_or(50.0),
        };
        let props = NodeProps {
            x: column.props.x,
            y: Some(y),
            width: column.props.width,
            height: Some(10.0),
            ..Default::default()
        };
        column.rows.push(Row::new(order, props));

        self.commit(next);
        self.selection = Selection::row(column_order, order);
        Ok(())
    }

    /// Remove a row and re-index its siblings. There is no last-row floor
    /// at the document level; a column may end up with no rows.
    pub fn remove_row(&mut self, row_order: usize, column_order: usize) -> Result<()> {
        let mut next = self.template.clone();
        let column = next
            .column_mut(column_order)
            .ok_or(EditError::ColumnNotFound(column_order))?;
        let index = column
            .rows
            .iter()
            .position(|r| r.order == row_order)
            .ok_or(EditError::RowNotFound {
                column: column_order,
                row: row_order,
            })?;
        column.rows.remove(index);
        for (order, row) in column.rows.iter_mut().enumerate() {
            row.order = order;
        }

        self.commit(next);
        if self.selection == Selection::row(column_order, row_order) {
            self.selection = Selection::None;
        }
        self.repair_selection();
        Ok(())
    }

    /// Append a new empty column, rebalance all column widths to the
    /// equal-split layout, and select it.
    pub fn add_column(&mut self) {
        let mut next = self.template.clone();
        let order = next.columns.len();
        let x = match next.columns.last() {
            Some(last) => last.props.x.unwrap_or(50.0) + last.props.width.unwrap_or(100.0) / 2.0,
            None => 50.0,
        };
        next.columns.push(Column::new(
            order,
            NodeProps {
                x: Some(x),
                y: Some(50.0),
                height: Some(100.0),
                ..Default::default()
            },
        ));

        let width = 100.0 / next.columns.len() as f64;
        for column in &mut next.columns {
            column.props.width = Some(width);
        }

        self.commit(next);
        self.selection = Selection::column(order);
    }

    /// Remove a column, re-index the remaining columns, and rebalance their
    /// widths to the equal-split layout.
    pub fn remove_column(&mut self, column_order: usize) -> Result<()> {
        let mut next = self.template.clone();
        let index = next
            .columns
            .iter()
            .position(|c| c.order == column_order)
            .ok_or(EditError::ColumnNotFound(column_order))?;
        next.columns.remove(index);

        let count = next.columns.len();
        for (order, column) in next.columns.iter_mut().enumerate() {
            column.order = order;
            column.props.width = Some(100.0 / count as f64);
        }

        self.commit(next);
        if self.selection == Selection::column(column_order) {
            self.selection = Selection::None;
        }
        self.repair_selection();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Clipboard
    // ------------------------------------------------------------------

    /// Deep-copy the selected element into the clipboard slot, recording
    /// the (row order, column order) it was captured from. Does not touch
    /// the tree or the history.
    pub fn copy(&mut self) -> Result<()> {
        let id = self
            .selection
            .element_id()
            .ok_or(EditError::NoElementSelected)?
            .to_string();
        let path =
            locate_element(&self.template, &id).ok_or_else(|| EditError::ElementNotFound(id))?;
        self.clipboard = Some(ClipboardSlot {
            element: element_at(&self.template, path).clone(),
            origin: (path.row_order, path.column_order),
        });
        Ok(())
    }

    /// Copy the selected element, then remove it from the tree. One history
    /// entry; the selection is cleared along with the removal.
    pub fn cut(&mut self) -> Result<()> {
        let id = self
            .selection
            .element_id()
            .ok_or(EditError::NoElementSelected)?
            .to_string();
        self.copy()?;
        self.remove_element(&id)
    }

    /// Paste the clipboard element at the position derived from the current
    /// selection. A no-op when the clipboard is empty or the template has
    /// nowhere to paste into. The pasted copy gets a fresh id evaluated
    /// against the target row; pasting back into the origin row offsets the
    /// copy by +5/+5 percentage points so it does not cover the source.
    pub fn paste(&mut self) -> Result<()> {
        let Some(slot) = self.clipboard.clone() else {
            return Ok(());
        };
        let mut next = self.template.clone();
        if next.columns.is_empty() {
            return Ok(());
        }

        let (row_order, column_order) = paste_target(&next, &self.selection);
        // Stale targets fall back to the first column / first row.
        let column_index = next
            .columns
            .iter()
            .position(|c| c.order == column_order)
            .unwrap_or(0);
        if next.columns[column_index].rows.is_empty() {
            return Ok(());
        }
        let row_index = next.columns[column_index]
            .rows
            .iter()
            .position(|r| r.order == row_order)
            .unwrap_or(0);

        let target = (
            next.columns[column_index].rows[row_index].order,
            next.columns[column_index].order,
        );
        let row = &mut next.columns[column_index].rows[row_index];

        let mut element = slot.element.clone();
        element.id = next_element_id(element.kind, &row.elements);
        element.order = row.elements.len();
        if target == slot.origin {
            element.props.x = Some(element.props.x.unwrap_or(50.0) + 5.0);
            element.props.y = Some(element.props.y.unwrap_or(50.0) + 5.0);
        }

        let id = element.id.clone();
        row.elements.push(element);
        self.commit(next);
        self.selection = Selection::element(id);
        Ok(())
    }

    /// Copy then paste the selected element: an offset duplicate in the
    /// same row, with a single history entry from the paste.
    pub fn duplicate(&mut self) -> Result<()> {
        self.copy()?;
        self.paste()
    }

    /// Whether the clipboard holds an element.
    pub fn can_paste(&self) -> bool {
        self.clipboard.is_some()
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Step back one snapshot. Returns false when there is nothing to undo.
    /// Selections left dangling by the restored tree are reset.
    pub fn undo(&mut self) -> bool {
        self.replaying = true;
        let restored = self.history.undo().cloned();
        let applied = match restored {
            Some(template) => {
                self.template = template;
                self.repair_selection();
                true
            }
            None => false,
        };
        self.replaying = false;
        applied
    }

    /// Step forward one snapshot. Returns false when there is nothing to
    /// redo.
    pub fn redo(&mut self) -> bool {
        self.replaying = true;
        let restored = self.history.redo().cloned();
        let applied = match restored {
            Some(template) => {
                self.template = template;
                self.repair_selection();
                true
            }
            None => false,
        };
        self.replaying = false;
        applied
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ------------------------------------------------------------------
    // Import / export
    // ------------------------------------------------------------------

    /// Serialize the current template to pretty JSON in the canonical
    /// persisted layout.
    pub fn export_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.template).map_err(EditError::Serialization)
    }

    /// Parse a template from JSON and install it as the new present state.
    /// The history is reset so the imported state is the new baseline, and
    /// all selections are cleared. Malformed input is rejected with
    /// [`EditError::InvalidFormat`].
    pub fn import_json(&mut self, json: &str) -> Result<()> {
        let template: Template = serde_json::from_str(json).map_err(EditError::InvalidFormat)?;
        self.template = template.clone();
        self.history.reset(template);
        self.selection = Selection::None;
        self.table_selection = None;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Install a new tree snapshot and record it in the history, unless an
    /// undo/redo replay is in progress.
    pub(crate) fn commit(&mut self, next: Template) {
        self.template = next;
        if !self.replaying {
            self.history.push(self.template.clone());
        }
    }

    /// Reset any selection whose referenced node no longer resolves in the
    /// current tree. Table sub-selections additionally require the owning
    /// element to still be a table containing the referenced sub-node.
    pub(crate) fn repair_selection(&mut self) {
        let resolved = match &self.selection {
            Selection::None => true,
            Selection::Element { id } => locate_element(&self.template, id).is_some(),
            Selection::Row { column, row } => self.template.row(*column, *row).is_some(),
            Selection::Column { column } => self.template.column(*column).is_some(),
        };
        if !resolved {
            self.selection = Selection::None;
        }

        if let Some(sub) = &self.table_selection {
            let alive = locate_element(&self.template, &sub.element_id)
                .map(|path| element_at(&self.template, path))
                .filter(|element| element.kind == ElementType::Table)
                .and_then(Element::table_data)
                .map(|table| match sub.kind {
                    TableSelectionKind::Column => table.column(&sub.sub_id).is_some(),
                    TableSelectionKind::Row => table.row(&sub.sub_id).is_some(),
                })
                .unwrap_or(false);
            if !alive {
                self.table_selection = None;
            }
        }
    }
}

impl Default for TemplateEditor {
    fn default() -> Self {
        Self::new()
    }
}

/// Default value sequence for a freshly created element.
fn default_values(kind: ElementType) -> Vec<ElementValue> {
    match kind {
        ElementType::Table => vec![ElementValue::Table(TableData::default())],
        ElementType::DateTime => vec![ElementValue::Text(
            chrono::Local::now().format(DATETIME_FORMAT).to_string(),
        )],
        _ => Vec::new(),
    }
}

/// Default property bag for a freshly created element: 20%x10%, centered.
fn default_props(kind: ElementType) -> NodeProps {
    let mut props = NodeProps::at(50.0, 50.0, 20.0, 10.0);
    if kind == ElementType::DateTime {
        props.current = Some(false);
        props.date = Some(true);
        props.time = Some(true);
        props.format = Some(DATETIME_FORMAT.to_string());
    }
    props
}
