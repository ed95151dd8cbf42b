//! Table sub-tree operations
//!
//! Tables nest a second tree (columns, rows, cells) inside a single element
//! value. The operations here follow the same copy-on-write discipline as the
//! document-level edits in [`TemplateEditor`]: clone, mutate the nested
//! payload, commit. Deleting the last remaining table column or row is
//! refused silently, so a table can never be hollowed out from the UI.

use crate::locate::{element_at_mut, locate_element};
use crate::{EditError, Result, TemplateEditor};
use template_model::{normalize_title, PropsPatch, TableData, TableSettings, Template};

/// Resolve the table payload of an element, by id.
fn table_payload_mut<'a>(template: &'a mut Template, element_id: &str) -> Result<&'a mut TableData> {
    let path = locate_element(template, element_id)
        .ok_or_else(|| EditError::ElementNotFound(element_id.to_string()))?;
    element_at_mut(template, path)
        .table_data_mut()
        .ok_or_else(|| EditError::NotATable(element_id.to_string()))
}

impl TemplateEditor {
    /// Append a column to a table element, named "Column {n}" after the new
    /// column count. Every row gains an empty cell for it. Returns the new
    /// column's id.
    pub fn add_table_column(&mut self, element_id: &str) -> Result<String> {
        let mut next = self.template().clone();
        let table = table_payload_mut(&mut next, element_id)?;
        let name = format!("Column {}", table.column_count() + 1);
        let id = table.add_column(name).id.clone();
        self.commit(next);
        Ok(id)
    }

    /// Append a row to a table element, with one empty cell per column.
    /// Returns the new row's id.
    pub fn add_table_row(&mut self, element_id: &str) -> Result<String> {
        let mut next = self.template().clone();
        let table = table_payload_mut(&mut next, element_id)?;
        let id = table.add_row().id.clone();
        self.commit(next);
        Ok(id)
    }

    /// Delete a table column and its cells. Deleting the last remaining
    /// column is refused without an error, leaving the tree and history
    /// untouched.
    pub fn delete_table_column(&mut self, element_id: &str, column_id: &str) -> Result<()> {
        let mut next = self.template().clone();
        let table = table_payload_mut(&mut next, element_id)?;
        if table.column(column_id).is_none() {
            return Err(EditError::TableColumnNotFound(column_id.to_string()));
        }
        if !table.remove_column(column_id) {
            return Ok(());
        }
        self.commit(next);
        self.repair_selection();
        Ok(())
    }

    /// Delete a table row. Deleting the last remaining row is refused
    /// without an error, leaving the tree and history untouched.
    pub fn delete_table_row(&mut self, element_id: &str, row_id: &str) -> Result<()> {
        let mut next = self.template().clone();
        let table = table_payload_mut(&mut next, element_id)?;
        if table.row(row_id).is_none() {
            return Err(EditError::TableRowNotFound(row_id.to_string()));
        }
        if !table.remove_row(row_id) {
            return Ok(());
        }
        self.commit(next);
        self.repair_selection();
        Ok(())
    }

    /// Merge a patch into a table column's property bag, with the same
    /// title-splitting behavior as element patches.
    pub fn update_table_column_props(
        &mut self,
        element_id: &str,
        column_id: &str,
        patch: PropsPatch,
    ) -> Result<()> {
        let mut next = self.template().clone();
        let table = table_payload_mut(&mut next, element_id)?;
        let column = table
            .column_mut(column_id)
            .ok_or_else(|| EditError::TableColumnNotFound(column_id.to_string()))?;
        if let Some(title) = patch.title {
            column.title = normalize_title(title);
        }
        column.props.merge(patch.props);
        self.commit(next);
        Ok(())
    }

    /// Merge a patch into a table row's property bag.
    pub fn update_table_row_props(
        &mut self,
        element_id: &str,
        row_id: &str,
        patch: PropsPatch,
    ) -> Result<()> {
        let mut next = self.template().clone();
        let table = table_payload_mut(&mut next, element_id)?;
        let row = table
            .row_mut(row_id)
            .ok_or_else(|| EditError::TableRowNotFound(row_id.to_string()))?;
        if let Some(title) = patch.title {
            row.title = normalize_title(title);
        }
        row.props.merge(patch.props);
        self.commit(next);
        Ok(())
    }

    /// Change a table column's header text.
    pub fn rename_table_column(
        &mut self,
        element_id: &str,
        column_id: &str,
        name: impl Into<String>,
    ) -> Result<()> {
        let mut next = self.template().clone();
        let table = table_payload_mut(&mut next, element_id)?;
        let column = table
            .column_mut(column_id)
            .ok_or_else(|| EditError::TableColumnNotFound(column_id.to_string()))?;
        column.name = name.into();
        self.commit(next);
        Ok(())
    }

    /// Set a single cell's text.
    pub fn set_table_cell(
        &mut self,
        element_id: &str,
        row_id: &str,
        column_id: &str,
        value: impl Into<String>,
    ) -> Result<()> {
        let mut next = self.template().clone();
        let table = table_payload_mut(&mut next, element_id)?;
        if table.column(column_id).is_none() {
            return Err(EditError::TableColumnNotFound(column_id.to_string()));
        }
        if !table.set_cell(row_id, column_id, value) {
            return Err(EditError::TableRowNotFound(row_id.to_string()));
        }
        self.commit(next);
        Ok(())
    }

    /// Replace a table's display settings.
    pub fn update_table_settings(
        &mut self,
        element_id: &str,
        settings: TableSettings,
    ) -> Result<()> {
        let mut next = self.template().clone();
        let table = table_payload_mut(&mut next, element_id)?;
        table.settings = settings;
        self.commit(next);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use template_model::{ElementType, NodeProps, TableSelection};

    /// Editor with one table element, returning its id.
    fn editor_with_table() -> (TemplateEditor, String) {
        let mut editor = TemplateEditor::new();
        let id = editor.add_element(ElementType::Table, 0, 0).unwrap();
        (editor, id)
    }

    fn table<'a>(editor: &'a TemplateEditor, id: &str) -> &'a TableData {
        editor
            .template()
            .column(0)
            .unwrap()
            .rows
            .iter()
            .find_map(|r| r.element(id))
            .and_then(|e| e.table_data())
            .unwrap()
    }

    #[test]
    fn test_add_column_names_after_count() {
        let (mut editor, id) = editor_with_table();
        editor.add_table_column(&id).unwrap();
        let payload = table(&editor, &id);
        assert_eq!(payload.column_count(), 3);
        assert_eq!(payload.columns[2].name, "Column 3");
        assert!(payload.cells_in_sync());
    }

    #[test]
    fn test_add_row_fills_cells() {
        let (mut editor, id) = editor_with_table();
        let row_id = editor.add_table_row(&id).unwrap();
        let payload = table(&editor, &id);
        assert_eq!(payload.row_count(), 3);
        assert_eq!(payload.row(&row_id).unwrap().cells.len(), 2);
        assert!(payload.cells_in_sync());
    }

    #[test]
    fn test_delete_column_keeps_cells_in_sync() {
        let (mut editor, id) = editor_with_table();
        let column_id = table(&editor, &id).columns[0].id.clone();
        editor.delete_table_column(&id, &column_id).unwrap();
        let payload = table(&editor, &id);
        assert_eq!(payload.column_count(), 1);
        assert!(payload.cells_in_sync());
    }

    #[test]
    fn test_last_column_refused_without_history_push() {
        let (mut editor, id) = editor_with_table();
        let column_id = table(&editor, &id).columns[0].id.clone();
        editor.delete_table_column(&id, &column_id).unwrap();
        let depth_before = editor.can_undo();
        assert!(depth_before);

        // Only one column left now; the delete is a silent no-op.
        let last = table(&editor, &id).columns[0].id.clone();
        let snapshot = editor.template().clone();
        editor.delete_table_column(&id, &last).unwrap();
        assert_eq!(*editor.template(), snapshot);
        assert_eq!(table(&editor, &id).column_count(), 1);
    }

    #[test]
    fn test_last_row_refused() {
        let (mut editor, id) = editor_with_table();
        let first = table(&editor, &id).rows[0].id.clone();
        editor.delete_table_row(&id, &first).unwrap();

        let last = table(&editor, &id).rows[0].id.clone();
        let snapshot = editor.template().clone();
        editor.delete_table_row(&id, &last).unwrap();
        assert_eq!(*editor.template(), snapshot);
    }

    #[test]
    fn test_unknown_sub_ids_error() {
        let (mut editor, id) = editor_with_table();
        assert!(matches!(
            editor.delete_table_column(&id, "missing"),
            Err(EditError::TableColumnNotFound(_))
        ));
        assert!(matches!(
            editor.delete_table_row(&id, "missing"),
            Err(EditError::TableRowNotFound(_))
        ));
        assert!(matches!(
            editor.rename_table_column(&id, "missing", "X"),
            Err(EditError::TableColumnNotFound(_))
        ));
    }

    #[test]
    fn test_non_table_element_rejected() {
        let mut editor = TemplateEditor::new();
        let id = editor.add_element(ElementType::Text, 0, 0).unwrap();
        assert!(matches!(
            editor.add_table_column(&id),
            Err(EditError::NotATable(_))
        ));
    }

    #[test]
    fn test_set_cell_and_undo() {
        let (mut editor, id) = editor_with_table();
        let payload = table(&editor, &id);
        let row_id = payload.rows[0].id.clone();
        let column_id = payload.columns[0].id.clone();

        editor.set_table_cell(&id, &row_id, &column_id, "42").unwrap();
        assert_eq!(table(&editor, &id).rows[0].cells[&column_id], "42");

        assert!(editor.undo());
        assert_eq!(table(&editor, &id).rows[0].cells[&column_id], "");
    }

    #[test]
    fn test_rename_column() {
        let (mut editor, id) = editor_with_table();
        let column_id = table(&editor, &id).columns[1].id.clone();
        editor.rename_table_column(&id, &column_id, "Amount").unwrap();
        assert_eq!(table(&editor, &id).columns[1].name, "Amount");
    }

    #[test]
    fn test_column_props_patch_splits_title() {
        let (mut editor, id) = editor_with_table();
        let column_id = table(&editor, &id).columns[0].id.clone();

        let patch = PropsPatch {
            title: Some("Totals".to_string()),
            props: NodeProps {
                background: Some("#EEEEEE".to_string()),
                ..NodeProps::default()
            },
        };
        editor.update_table_column_props(&id, &column_id, patch).unwrap();

        let column = table(&editor, &id).column(&column_id).unwrap();
        assert_eq!(column.title.as_deref(), Some("Totals"));
        assert_eq!(column.props.background.as_deref(), Some("#EEEEEE"));
    }

    #[test]
    fn test_row_props_patch() {
        let (mut editor, id) = editor_with_table();
        let row_id = table(&editor, &id).rows[1].id.clone();

        let patch = PropsPatch {
            title: None,
            props: NodeProps {
                color: Some("#FF0000".to_string()),
                ..NodeProps::default()
            },
        };
        editor.update_table_row_props(&id, &row_id, patch).unwrap();
        let row = table(&editor, &id).row(&row_id).unwrap();
        assert_eq!(row.props.color.as_deref(), Some("#FF0000"));
    }

    #[test]
    fn test_settings_replaced() {
        let (mut editor, id) = editor_with_table();
        editor
            .update_table_settings(
                &id,
                TableSettings {
                    borders: false,
                    header_row: false,
                },
            )
            .unwrap();
        let settings = table(&editor, &id).settings;
        assert!(!settings.borders);
        assert!(!settings.header_row);
    }

    #[test]
    fn test_sub_selection_cleared_when_column_deleted() {
        let (mut editor, id) = editor_with_table();
        let column_id = table(&editor, &id).columns[0].id.clone();
        editor.set_table_selection(Some(TableSelection::column(&id, &column_id)));

        editor.delete_table_column(&id, &column_id).unwrap();
        assert!(editor.table_selection().is_none());
    }

    #[test]
    fn test_sub_selection_survives_unrelated_edit() {
        let (mut editor, id) = editor_with_table();
        let column_id = table(&editor, &id).columns[0].id.clone();
        editor.set_table_selection(Some(TableSelection::column(&id, &column_id)));

        editor.add_table_row(&id).unwrap();
        assert!(editor.table_selection().is_some());
    }
}
