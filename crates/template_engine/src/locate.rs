//! Structural position lookup within a template
//!
//! Elements are located by scanning columns -> rows -> elements. This is
//! O(total elements) per lookup, which is fine at document-designer scale;
//! an incremental id -> locator index would replace it if element counts
//! grew by orders of magnitude.

use template_model::{Row, Template};

/// The resolved structural position of an element: vector indices into the
/// tree plus the order keys of the containing column and row (equal to the
/// indices while orders stay dense, but callers should not rely on that).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ElementPath {
    /// Index of the column in `template.columns`
    pub column_index: usize,
    /// Index of the row in the column's `rows`
    pub row_index: usize,
    /// Index of the element in the row's `elements`
    pub element_index: usize,
    /// Order key of the containing column
    pub column_order: usize,
    /// Order key of the containing row
    pub row_order: usize,
}

/// Find an element by id anywhere in the tree.
pub(crate) fn locate_element(template: &Template, id: &str) -> Option<ElementPath> {
    for (column_index, column) in template.columns.iter().enumerate() {
        for (row_index, row) in column.rows.iter().enumerate() {
            if let Some(element_index) = row.elements.iter().position(|e| e.id == id) {
                return Some(ElementPath {
                    column_index,
                    row_index,
                    element_index,
                    column_order: column.order,
                    row_order: row.order,
                });
            }
        }
    }
    None
}

/// Resolve a (column order, row order) pair to vector indices.
pub(crate) fn locate_row(
    template: &Template,
    column_order: usize,
    row_order: usize,
) -> Option<(usize, usize)> {
    let column_index = template
        .columns
        .iter()
        .position(|c| c.order == column_order)?;
    let row_index = template.columns[column_index]
        .rows
        .iter()
        .position(|r| r.order == row_order)?;
    Some((column_index, row_index))
}

/// Borrow the element at a resolved path.
pub(crate) fn element_at(template: &Template, path: ElementPath) -> &template_model::Element {
    &template.columns[path.column_index].rows[path.row_index].elements[path.element_index]
}

/// Mutably borrow the element at a resolved path.
pub(crate) fn element_at_mut(
    template: &mut Template,
    path: ElementPath,
) -> &mut template_model::Element {
    &mut template.columns[path.column_index].rows[path.row_index].elements[path.element_index]
}

/// Re-index sibling element orders to a dense 0..k-1 sequence.
pub(crate) fn reindex_elements(row: &mut Row) {
    for (order, element) in row.elements.iter_mut().enumerate() {
        element.order = order;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use template_model::{Element, ElementType, NodeProps, next_element_id};

    fn template_with_element() -> Template {
        let mut template = Template::new();
        let row = &mut template.columns[0].rows[0];
        row.elements.push(Element {
            id: next_element_id(ElementType::Text, &row.elements),
            order: 0,
            kind: ElementType::Text,
            title: None,
            values: Vec::new(),
            props: NodeProps::default(),
        });
        template
    }

    #[test]
    fn test_locate_element() {
        let template = template_with_element();
        let path = locate_element(&template, "text-1").unwrap();
        assert_eq!(path.column_index, 0);
        assert_eq!(path.row_index, 0);
        assert_eq!(path.element_index, 0);
        assert_eq!(path.column_order, 0);
        assert_eq!(path.row_order, 0);

        assert!(locate_element(&template, "text-9").is_none());
    }

    #[test]
    fn test_locate_row_by_order_pair() {
        let template = Template::new();
        assert_eq!(locate_row(&template, 0, 0), Some((0, 0)));
        assert_eq!(locate_row(&template, 0, 3), None);
        assert_eq!(locate_row(&template, 2, 0), None);
    }
}
