//! Clipboard slot and paste-target resolution
//!
//! The clipboard holds at most one element (a deep copy) together with the
//! (row order, column order) it was captured from. It lives only in the
//! editing session and is cleared by replacement, never explicitly.

use crate::locate::locate_element;
use template_model::{Element, Selection, Template};

/// A single held element plus its capture position.
#[derive(Debug, Clone)]
pub struct ClipboardSlot {
    pub element: Element,
    /// (row order, column order) the element was copied or cut from
    pub origin: (usize, usize),
}

/// Resolve the (row order, column order) a paste should target, derived
/// from the current selection:
/// - element selected: the element's own row and column
/// - row selected: that row
/// - column selected: the column's first row (row 0 when it has none)
/// - nothing selected: (0, 0)
///
/// Stale references fall back toward (0, 0); the final existence check
/// against the tree happens at paste time.
pub(crate) fn paste_target(template: &Template, selection: &Selection) -> (usize, usize) {
    match selection {
        Selection::Element { id } => match locate_element(template, id) {
            Some(path) => (path.row_order, path.column_order),
            None => (0, 0),
        },
        Selection::Row { column, row } => (*row, *column),
        Selection::Column { column } => {
            let row = template
                .column(*column)
                .and_then(|c| c.rows.first())
                .map(|r| r.order)
                .unwrap_or(0);
            (row, *column)
        }
        Selection::None => (0, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use template_model::{NodeProps, Row};

    #[test]
    fn test_target_from_row_selection() {
        let template = Template::new();
        let target = paste_target(&template, &Selection::row(0, 0));
        assert_eq!(target, (0, 0));
    }

    #[test]
    fn test_target_from_column_selection_uses_first_row() {
        let mut template = Template::new();
        // Column whose first row has order 0; add a second row to make sure
        // the first is picked.
        template.columns[0]
            .rows
            .push(Row::new(1, NodeProps::default()));
        let target = paste_target(&template, &Selection::column(0));
        assert_eq!(target, (0, 0));
    }

    #[test]
    fn test_target_defaults_to_origin_cell() {
        let template = Template::new();
        assert_eq!(paste_target(&template, &Selection::None), (0, 0));
        // Stale element selection also falls back.
        assert_eq!(
            paste_target(&template, &Selection::element("text-9")),
            (0, 0)
        );
    }
}
